//! Scanline primitives over [`Pixmap`]. Coverage is decided per pixel at its
//! center, so repeated calls with the same arguments produce identical bytes.

use crate::color::Color;
use crate::geom::Point;
use crate::pixmap::Pixmap;

impl Pixmap {
    /// Fills the circle sector spanning `[start_deg, start_deg + sweep_deg)`.
    ///
    /// Angles are measured in degrees from the positive x axis. Rows grow
    /// downward, so positive angles turn clockwise on screen.
    pub fn fill_sector(
        &mut self,
        center: Point,
        radius: f64,
        start_deg: f64,
        sweep_deg: f64,
        color: Color,
    ) {
        if radius <= 0.0 || sweep_deg <= 0.0 {
            return;
        }
        let (x0, y0, x1, y1) = self.clip_box(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        );
        let r2 = radius * radius;
        for y in y0..y1 {
            for x in x0..x1 {
                let dx = (x as f64 + 0.5) - center.x;
                let dy = (y as f64 + 0.5) - center.y;
                if dx * dx + dy * dy > r2 {
                    continue;
                }
                let angle = dy.atan2(dx).to_degrees();
                if (angle - start_deg).rem_euclid(360.0) < sweep_deg {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    /// Strokes a circle outline of the given thickness, centered on the path.
    pub fn stroke_circle(&mut self, center: Point, radius: f64, thickness: f64, color: Color) {
        if radius <= 0.0 || thickness <= 0.0 {
            return;
        }
        let outer = radius + thickness / 2.0;
        let inner = (radius - thickness / 2.0).max(0.0);
        let (outer2, inner2) = (outer * outer, inner * inner);
        let (x0, y0, x1, y1) = self.clip_box(
            center.x - outer,
            center.y - outer,
            center.x + outer,
            center.y + outer,
        );
        for y in y0..y1 {
            for x in x0..x1 {
                let dx = (x as f64 + 0.5) - center.x;
                let dy = (y as f64 + 0.5) - center.y;
                let d2 = dx * dx + dy * dy;
                if d2 >= inner2 && d2 <= outer2 {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    /// Strokes a line segment with round caps.
    pub fn stroke_line(&mut self, from: Point, to: Point, thickness: f64, color: Color) {
        if thickness <= 0.0 {
            return;
        }
        let half = thickness / 2.0;
        let (x0, y0, x1, y1) = self.clip_box(
            from.x.min(to.x) - half,
            from.y.min(to.y) - half,
            from.x.max(to.x) + half,
            from.y.max(to.y) + half,
        );
        let vx = to.x - from.x;
        let vy = to.y - from.y;
        let len2 = vx * vx + vy * vy;
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                let t = if len2 == 0.0 {
                    0.0
                } else {
                    (((p.x - from.x) * vx + (p.y - from.y) * vy) / len2).clamp(0.0, 1.0)
                };
                let nearest = Point::new(from.x + t * vx, from.y + t * vy);
                if p.distance_to(nearest) <= half {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    /// Clamps a fractional bounding box to whole pixel rows and columns.
    fn clip_box(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> (u32, u32, u32, u32) {
        let x0 = min_x.floor().max(0.0) as u32;
        let y0 = min_y.floor().max(0.0) as u32;
        let x1 = (max_x.ceil().max(0.0) as u32).min(self.width());
        let y1 = (max_y.ceil().max(0.0) as u32).min(self.height());
        (x0, y0, x1, y1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{opaque, transparent};

    fn canvas() -> Pixmap {
        Pixmap::new(20, 20).unwrap()
    }

    #[test]
    fn sector_covers_its_quadrant_only() {
        let mut pm = canvas();
        let red = opaque(255, 0, 0);
        // 0..90 degrees reaches the bottom-right quadrant in screen space
        pm.fill_sector(Point::new(10.0, 10.0), 8.0, 0.0, 90.0, red);

        assert_eq!(pm.pixel(14, 14), Some(red));
        assert_eq!(pm.pixel(14, 6), Some(transparent()));
        assert_eq!(pm.pixel(6, 14), Some(transparent()));
        assert_eq!(pm.pixel(19, 19), Some(transparent()));
    }

    #[test]
    fn full_sweep_fills_a_disc() {
        let mut pm = canvas();
        let blue = opaque(0, 0, 255);
        pm.fill_sector(Point::new(10.0, 10.0), 8.0, 0.0, 360.0, blue);

        assert_eq!(pm.pixel(10, 10), Some(blue));
        assert_eq!(pm.pixel(10, 3), Some(blue));
        assert_eq!(pm.pixel(0, 0), Some(transparent()));
    }

    #[test]
    fn adjacent_sectors_share_no_pixel() {
        let mut pm = canvas();
        let red = opaque(255, 0, 0);
        let green = opaque(0, 255, 0);
        pm.fill_sector(Point::new(10.0, 10.0), 9.0, 0.0, 180.0, red);
        pm.fill_sector(Point::new(10.0, 10.0), 9.0, 180.0, 180.0, green);

        let mut reds = 0;
        let mut greens = 0;
        let mut blends = 0;
        for y in 0..20 {
            for x in 0..20 {
                match pm.pixel(x, y) {
                    Some(c) if c == red => reds += 1,
                    Some(c) if c == green => greens += 1,
                    Some(c) if c == transparent() => {}
                    _ => blends += 1,
                }
            }
        }
        assert!(reds > 0 && greens > 0);
        assert_eq!(blends, 0);
    }

    #[test]
    fn circle_stroke_is_an_annulus() {
        let mut pm = canvas();
        let white = opaque(255, 255, 255);
        pm.stroke_circle(Point::new(10.0, 10.0), 6.0, 2.0, white);

        assert_eq!(pm.pixel(16, 10), Some(white)); // on the path
        assert_eq!(pm.pixel(10, 10), Some(transparent())); // center
        assert_eq!(pm.pixel(19, 10), Some(transparent())); // beyond
    }

    #[test]
    fn line_stroke_respects_thickness_and_caps() {
        let mut pm = canvas();
        let white = opaque(255, 255, 255);
        pm.stroke_line(Point::new(4.0, 10.0), Point::new(16.0, 10.0), 3.0, white);

        assert_eq!(pm.pixel(10, 10), Some(white));
        assert_eq!(pm.pixel(10, 9), Some(white));
        assert_eq!(pm.pixel(10, 13), Some(transparent()));
        assert_eq!(pm.pixel(1, 10), Some(transparent())); // past the cap
    }

    #[test]
    fn degenerate_shapes_draw_nothing() {
        let mut pm = canvas();
        let c = opaque(1, 2, 3);
        pm.fill_sector(Point::new(10.0, 10.0), 0.0, 0.0, 90.0, c);
        pm.fill_sector(Point::new(10.0, 10.0), 5.0, 0.0, 0.0, c);
        pm.stroke_circle(Point::new(10.0, 10.0), 5.0, 0.0, c);
        pm.stroke_line(Point::new(2.0, 2.0), Point::new(8.0, 8.0), 0.0, c);
        assert!(pm.data().iter().all(|&b| b == 0));
    }
}
