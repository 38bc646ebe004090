pub mod compose;
pub mod section;
pub mod style;

pub use compose::{ImageCache, composite};
pub use section::{ImageRef, MarkerPosition, SectionList, WheelSection};
pub use style::{LineStyle, WheelStyle};

pub const MIN_SECTIONS: usize = 2;
pub const MAX_SECTIONS: usize = 16;
pub const WHEEL_RIM_INSET: f64 = 2.0; // wheel radius pulls in this much from the square edge
pub const DEFAULT_LINE_THICKNESS: u32 = 10; // border and separator stroke width
