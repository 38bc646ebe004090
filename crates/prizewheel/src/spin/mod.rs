pub mod geometry;
pub mod gesture;
pub mod rotation;

pub use geometry::{Quadrant, QuadrantSet, angle_from_center, selected_index};
pub use gesture::{FlingDetector, GestureEngine, GesturePhase, Tick};
pub use rotation::RotationState;

pub const INITIAL_FLING_DAMPENING: f64 = 3.0; // divides the recognizer velocity sum once
pub const FLING_DAMPENING: f64 = 1.025; // divides the velocity every animation tick
pub const FLING_STOP_THRESHOLD: f64 = 5.0; // |velocity| at or under this settles the wheel
pub const FLING_TICK_DIVISOR: f64 = 75.0; // velocity units per degree of rotation per tick
pub const MIN_FLING_VELOCITY: f64 = 50.0; // px/s, slower releases are not flings
pub const MAX_FLING_VELOCITY: f64 = 8_000.0; // px/s, velocity components clamp here
pub const VELOCITY_WINDOW_MS: u64 = 100; // only samples this recent feed the estimate
pub const VELOCITY_SAMPLES: usize = 20; // detector ring capacity
