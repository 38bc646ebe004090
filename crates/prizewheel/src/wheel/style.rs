use crate::wheel::DEFAULT_LINE_THICKNESS;
use arcpaint::Color;

/// Stroke settings for a wheel overlay. The overlay draws only while a color
/// is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Option<Color>,
    pub thickness: u32,
}

impl LineStyle {
    pub fn colored(color: Color) -> Self {
        Self {
            color: Some(color),
            thickness: DEFAULT_LINE_THICKNESS,
        }
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: None,
            thickness: DEFAULT_LINE_THICKNESS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelStyle {
    pub border: LineStyle,
    pub separator: LineStyle,
}
