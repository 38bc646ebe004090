use crate::wheel::section::ImageRef;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WheelError {
    #[error("Wheel requires between 2 and 16 sections, got {count}")]
    InvalidSectionCount { count: usize },
    #[error("No pixel data for wheel section image '{image}'")]
    InvalidSectionData { image: ImageRef },
    #[error("Wheel dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}
