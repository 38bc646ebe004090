use crate::error::WheelError;
use crate::wheel::{MAX_SECTIONS, MIN_SECTIONS};
use arcpaint::{Color, Pixmap, opaque};
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// Opaque handle to an externally managed image. The library never decodes
/// anything; the host's resolver turns the reference into pixels.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WheelSection {
    /// A solid fill.
    Color(Color),
    /// Resolved to pixels through the widget's image resolver.
    Image(ImageRef),
    /// Pixels supplied directly by the caller.
    RawBitmap(Pixmap),
}

/// Section list whose length is already known to be drawable.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionList(Vec<WheelSection>);

impl SectionList {
    pub fn new(sections: Vec<WheelSection>) -> Result<Self, WheelError> {
        let count = sections.len();
        if !(MIN_SECTIONS..=MAX_SECTIONS).contains(&count) {
            return Err(WheelError::InvalidSectionCount { count });
        }
        Ok(Self(sections))
    }

    /// Alternating gray wheel shown before any real sections arrive.
    pub fn placeholder() -> Self {
        let shades = [opaque(189, 189, 189), opaque(97, 97, 97)];
        Self((0..8).map(|i| WheelSection::Color(shades[i % 2])).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WheelSection> {
        self.0.iter()
    }

    /// Angular span of one section in degrees.
    pub fn sweep_angle(&self) -> f64 {
        360.0 / self.0.len() as f64
    }
}

/// Where the winning-section marker sits on the rim.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum MarkerPosition {
    #[default]
    #[strum(serialize = "Top", serialize = "t", serialize = "0")]
    Top,
    #[strum(serialize = "Right", serialize = "r", serialize = "1")]
    Right,
    #[strum(serialize = "Bottom", serialize = "b", serialize = "2")]
    Bottom,
    #[strum(serialize = "Left", serialize = "l", serialize = "3")]
    Left,
}

impl MarkerPosition {
    /// Degrees added to the wheel rotation before the section lookup.
    pub fn degree_offset(&self) -> f64 {
        *self as usize as f64 * 90.0
    }
}
