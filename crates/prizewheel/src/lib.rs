//! Spinnable prize-wheel widget core: a section-based wheel compositor and a
//! drag/fling rotation engine, with the platform canvas, event loop, and
//! image decoding left to the host.

pub mod config;
pub mod error;
pub mod events;
pub mod spin;
pub mod wheel;
pub mod widget;

pub use error::WheelError;
pub use events::{PointerEvent, PointerPhase};
pub use wheel::{ImageRef, MarkerPosition, SectionList, WheelSection, WheelStyle};
pub use widget::{ImageResolver, NullResolver, WheelUpdate, WheelWidget};
