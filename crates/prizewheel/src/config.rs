use crate::wheel::DEFAULT_LINE_THICKNESS;
use crate::wheel::section::{ImageRef, MarkerPosition, WheelSection};
use crate::wheel::style::{LineStyle, WheelStyle};
use arcpaint::Color;
use directories::ProjectDirs;
use palette::Srgb;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// `#rrggbb` color for the TOML surface. Alpha is always opaque.
#[derive(Debug, Clone, Copy, PartialEq, SerializeDisplay, DeserializeFromStr)]
pub struct HexColor(pub Color);

impl FromStr for HexColor {
    type Err = palette::rgb::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rgb: Srgb<u8> = s.parse()?;
        Ok(Self(Color::new(rgb.red, rgb.green, rgb.blue, 255)))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.0;
        write!(f, "#{:02x}{:02x}{:02x}", c.red, c.green, c.blue)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SectionConfig {
    pub color: Option<HexColor>,
    pub image: Option<ImageRef>,
}

impl SectionConfig {
    pub fn to_section(&self) -> Result<WheelSection, ConfigError> {
        match (self.color, self.image.clone()) {
            (Some(color), None) => Ok(WheelSection::Color(color.0)),
            (None, Some(image)) => Ok(WheelSection::Image(image)),
            _ => Err(ConfigError::AmbiguousSection),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct LineConfig {
    pub color: Option<HexColor>,
    pub thickness: u32,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            color: None,
            thickness: DEFAULT_LINE_THICKNESS,
        }
    }
}

impl LineConfig {
    fn to_style(self) -> LineStyle {
        LineStyle {
            color: self.color.map(|c| c.0),
            thickness: self.thickness,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct WheelConfig {
    #[serde(default)]
    pub sections: Vec<SectionConfig>,
    #[serde(default)]
    pub marker: MarkerPosition,
    #[serde(default)]
    pub border: LineConfig,
    #[serde(default)]
    pub separator: LineConfig,
}

impl WheelConfig {
    pub fn style(&self) -> WheelStyle {
        WheelStyle {
            border: self.border.to_style(),
            separator: self.separator.to_style(),
        }
    }

    pub fn sections(&self) -> Result<Vec<WheelSection>, ConfigError> {
        self.sections
            .iter()
            .map(SectionConfig::to_section)
            .collect()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Wheel section must set exactly one of `color` or `image`")]
    AmbiguousSection,
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "prizewheel", "prizewheel").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<WheelConfig, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("PRIZEWHEEL"))
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Loads the user config, falling back to a built-in eight-color wheel when
/// the file is missing, empty, or unreadable.
pub fn load_or_default() -> WheelConfig {
    match load_config() {
        Ok(config) if !config.sections.is_empty() => config,
        Ok(_) => default_wheel(),
        Err(e) => {
            log::error!("Using the default wheel: {}", e);
            default_wheel()
        }
    }
}

fn default_wheel() -> WheelConfig {
    let colors = [
        "#e6194b", "#f58231", "#ffe119", "#3cb44b", "#42d4f4", "#4363d8", "#911eb4", "#f032e6",
    ];
    WheelConfig {
        sections: colors
            .iter()
            .map(|hex| SectionConfig {
                color: hex.parse().ok(),
                image: None,
            })
            .collect(),
        ..Default::default()
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path = get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_deserialization() {
        let cases = vec![
            ("\"#ff0000\"", Color::new(255, 0, 0, 255)),
            ("\"00ff00\"", Color::new(0, 255, 0, 255)),
            ("\"#4363d8\"", Color::new(0x43, 0x63, 0xd8, 255)),
        ];

        for (json, expected) in cases {
            let deserialized: HexColor = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized.0, expected);
        }

        assert!(serde_json::from_str::<HexColor>("\"#zzzzzz\"").is_err());
    }

    #[test]
    fn hex_color_round_trips_through_display() {
        let color: HexColor = "#4363d8".parse().unwrap();
        assert_eq!(color.to_string(), "#4363d8");
    }

    #[test]
    fn section_config_requires_exactly_one_source() {
        let both = SectionConfig {
            color: "#ffffff".parse().ok(),
            image: Some(ImageRef::new("prize")),
        };
        let neither = SectionConfig::default();
        let image_only = SectionConfig {
            color: None,
            image: Some(ImageRef::new("prize")),
        };

        assert!(matches!(both.to_section(), Err(ConfigError::AmbiguousSection)));
        assert!(matches!(neither.to_section(), Err(ConfigError::AmbiguousSection)));
        assert_eq!(
            image_only.to_section().unwrap(),
            WheelSection::Image(ImageRef::new("prize"))
        );
    }

    #[test]
    fn embedded_default_config_parses() {
        let config: WheelConfig = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.sections.len(), 8);
        assert!(config.sections().is_ok());
        assert_eq!(config.marker, MarkerPosition::Top);
        assert!(config.style().border.color.is_some());
    }

    #[test]
    fn fallback_wheel_is_drawable() {
        let config = default_wheel();
        let sections = config.sections().unwrap();
        assert_eq!(sections.len(), 8);
        assert!(sections.iter().all(|s| matches!(s, WheelSection::Color(_))));
    }
}
