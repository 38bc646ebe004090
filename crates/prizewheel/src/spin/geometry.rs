use crate::wheel::section::MarkerPosition;
use arcpaint::Point;

/// Angle of a pointer position about the view center, degrees in [0, 360).
///
/// Measured counterclockwise from the positive x axis with y flipped upward,
/// so a touch right of center reads 0 and one above center reads 90.
pub fn angle_from_center(position: Point, width: f64, height: f64) -> f64 {
    let x = position.x - width / 2.0;
    let y = height - position.y - height / 2.0;
    y.atan2(x).to_degrees().rem_euclid(360.0)
}

/// Mathematical quadrant of a center-relative offset, counterclockwise from
/// the top-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    First = 1,
    Second,
    Third,
    Fourth,
}

impl Quadrant {
    /// Points on an axis land in the quadrant that reads the zero coordinate
    /// as positive.
    pub fn of(x: f64, y: f64) -> Self {
        match (x >= 0.0, y >= 0.0) {
            (true, true) => Self::First,
            (false, true) => Self::Second,
            (false, false) => Self::Third,
            (true, false) => Self::Fourth,
        }
    }

    /// Quadrant of a screen position within a view, y flipped upward.
    pub fn of_position(position: Point, width: f64, height: f64) -> Self {
        Self::of(position.x - width / 2.0, height - position.y - height / 2.0)
    }
}

/// Which quadrants a gesture has passed through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuadrantSet(u8);

impl QuadrantSet {
    pub fn insert(&mut self, quadrant: Quadrant) {
        self.0 |= 1 << (quadrant as u8 - 1);
    }

    pub fn contains(&self, quadrant: Quadrant) -> bool {
        self.0 & (1 << (quadrant as u8 - 1)) != 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }
}

/// Index of the section sitting under the marker at the given rotation.
///
/// The marker offset can push the adjusted angle past a full turn; it wraps
/// only when strictly past, so an adjusted angle of exactly 360 falls through
/// to the final clamp.
pub fn selected_index(
    absolute_degrees: f64,
    section_count: usize,
    marker: MarkerPosition,
) -> usize {
    let sweep = 360.0 / section_count as f64;
    let mut adjusted = absolute_degrees + marker.degree_offset();
    if adjusted > 360.0 {
        adjusted -= 360.0;
    }
    ((adjusted / sweep).floor() as usize).min(section_count - 1)
}
