//! Minimal CPU raster surface shared by the wheel compositor.

mod color;
mod draw;
mod geom;
mod pixmap;

pub use color::{Color, opaque, transparent};
pub use geom::Point;
pub use pixmap::{Pixmap, PixmapError};
