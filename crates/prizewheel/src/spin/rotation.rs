use arcpaint::Point;

/// Wheel orientation plus the fixed translation that centers the square wheel
/// image in the view.
///
/// The display transform is rebuilt from one normalized angle on every read
/// instead of accumulating matrix multiplications, so the angle read back for
/// section selection never drifts.
#[derive(Debug, Clone, Default)]
pub struct RotationState {
    degrees: f64,
    center: Point,
    translation: Point,
}

impl RotationState {
    /// Records the view dimensions once layout has run. The wheel image of
    /// side `min(width, height)` sits centered in the view.
    pub fn init_layout(&mut self, width: f64, height: f64) {
        let side = width.min(height);
        self.center = Point::new(width / 2.0, height / 2.0);
        self.translation = Point::new((width - side) / 2.0, (height - side) / 2.0);
    }

    /// Turns the wheel. Positive degrees advance the absolute angle.
    pub fn rotate_by(&mut self, delta_degrees: f64) {
        self.degrees = (self.degrees + delta_degrees).rem_euclid(360.0);
    }

    pub fn degrees(&self) -> f64 {
        self.degrees
    }

    /// Whole-degree reading in [0, 360); rounding up to a full turn collapses
    /// back to 0.
    pub fn absolute_degrees(&self) -> f64 {
        let rounded = self.degrees.round();
        if rounded >= 360.0 { 0.0 } else { rounded }
    }

    /// Row-major 2x3 affine `[a, b, tx, c, d, ty]` mapping wheel-image pixels
    /// to view pixels: the centering translation followed by a screen-space
    /// clockwise turn of `degrees` about the view center.
    pub fn matrix(&self) -> [f64; 6] {
        let (sin, cos) = self.degrees.to_radians().sin_cos();
        let (cx, cy) = (self.center.x, self.center.y);
        let shifted_x = self.translation.x - cx;
        let shifted_y = self.translation.y - cy;
        [
            cos,
            -sin,
            cos * shifted_x - sin * shifted_y + cx,
            sin,
            cos,
            sin * shifted_x + cos * shifted_y + cy,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_turns_accumulate_and_wrap() {
        let mut rotation = RotationState::default();
        let cases = vec![(90.0, 90.0), (90.0, 180.0), (90.0, 270.0), (90.0, 0.0)];

        for (delta, expected) in cases {
            rotation.rotate_by(delta);
            assert_eq!(rotation.absolute_degrees(), expected);
        }
    }

    #[test]
    fn full_turn_reads_as_identity() {
        let mut rotation = RotationState::default();
        rotation.rotate_by(360.0);
        assert_eq!(rotation.absolute_degrees(), 0.0);

        rotation.rotate_by(-0.2);
        // 359.8 rounds to a full turn, which is the identity reading
        assert_eq!(rotation.absolute_degrees(), 0.0);
    }

    #[test]
    fn negative_rotation_wraps_upward() {
        let mut rotation = RotationState::default();
        rotation.rotate_by(-90.0);
        assert_eq!(rotation.absolute_degrees(), 270.0);
    }

    #[test]
    fn identity_matrix_is_the_centering_translation() {
        let mut rotation = RotationState::default();
        rotation.init_layout(100.0, 60.0);

        let m = rotation.matrix();
        assert_eq!(m, [1.0, 0.0, 20.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn quarter_turn_matrix_rotates_about_the_view_center() {
        let mut rotation = RotationState::default();
        rotation.init_layout(100.0, 100.0);
        rotation.rotate_by(90.0);

        let m = rotation.matrix();
        let apply = |x: f64, y: f64| (m[0] * x + m[1] * y + m[2], m[3] * x + m[4] * y + m[5]);

        // the image center maps onto the view center
        let (cx, cy) = apply(50.0, 50.0);
        assert!((cx - 50.0).abs() < 1e-9 && (cy - 50.0).abs() < 1e-9);

        // a point right of center swings to below it, a clockwise turn on screen
        let (px, py) = apply(80.0, 50.0);
        assert!((px - 50.0).abs() < 1e-9, "x was {}", px);
        assert!((py - 80.0).abs() < 1e-9, "y was {}", py);
    }
}
