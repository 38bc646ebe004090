use crate::error::WheelError;
use crate::wheel::WHEEL_RIM_INSET;
use crate::wheel::section::{ImageRef, SectionList, WheelSection};
use crate::wheel::style::WheelStyle;
use arcpaint::{Pixmap, Point, opaque};
use std::collections::HashMap;

/// Resolved image sections, keyed by reference. Owned per widget instance so
/// two wheels never share pixel buffers.
pub type ImageCache = HashMap<ImageRef, Pixmap>;

/// Renders the wheel into a fresh square pixmap of side `min(width, height)`.
///
/// Sections are laid out clockwise from the positive x axis, each spanning
/// `360 / n` degrees. The output depends only on the arguments, so repeating
/// a call yields byte-identical pixels.
pub fn composite(
    sections: &SectionList,
    images: &ImageCache,
    width: u32,
    height: u32,
    style: &WheelStyle,
) -> Result<Pixmap, WheelError> {
    if width == 0 || height == 0 {
        return Err(WheelError::InvalidDimensions { width, height });
    }
    let side = width.min(height);
    let blank = || {
        Pixmap::new(side, side).map_err(|_| WheelError::InvalidDimensions { width, height })
    };

    let mut wheel = blank()?;
    let center = Point::new(side as f64 / 2.0, side as f64 / 2.0);
    let radius = side as f64 / 2.0 - WHEEL_RIM_INSET;
    let sweep = sections.sweep_angle();

    // mask and scratch layers are shared across bitmap sections
    let needs_layers = sections
        .iter()
        .any(|s| !matches!(s, WheelSection::Color(_)));
    let mut layers = if needs_layers {
        Some((blank()?, blank()?))
    } else {
        None
    };

    for (index, section) in sections.iter().enumerate() {
        let sector = Sector {
            center,
            radius,
            start: index as f64 * sweep,
            sweep,
        };
        match section {
            WheelSection::Color(color) => {
                wheel.fill_sector(center, radius, sector.start, sweep, *color);
            }
            WheelSection::Image(image) => {
                let source = images.get(image).ok_or_else(|| WheelError::InvalidSectionData {
                    image: image.clone(),
                })?;
                if let Some((mask, scratch)) = &mut layers {
                    blit_sector(&mut wheel, mask, scratch, source, sector);
                }
            }
            WheelSection::RawBitmap(source) => {
                if let Some((mask, scratch)) = &mut layers {
                    blit_sector(&mut wheel, mask, scratch, source, sector);
                }
            }
        }
    }

    if let Some(color) = style.separator.color {
        for index in 0..sections.len() {
            let angle = (index as f64 * sweep).to_radians();
            let length = side as f64 / 2.0;
            let end = Point::new(
                center.x + length * angle.cos(),
                center.y + length * angle.sin(),
            );
            wheel.stroke_line(center, end, style.separator.thickness as f64, color);
        }
    }

    if let Some(color) = style.border.color {
        let border_radius = (side as f64 - style.border.thickness as f64) / 2.0;
        wheel.stroke_circle(center, border_radius, style.border.thickness as f64, color);
    }

    Ok(wheel)
}

#[derive(Clone, Copy)]
struct Sector {
    center: Point,
    radius: f64,
    start: f64,
    sweep: f64,
}

/// Windows `source` to one sector and composites it onto the wheel. The mask
/// and scratch layers are cleared here, so each section starts from nothing.
fn blit_sector(
    wheel: &mut Pixmap,
    mask: &mut Pixmap,
    scratch: &mut Pixmap,
    source: &Pixmap,
    sector: Sector,
) {
    mask.clear();
    mask.fill_sector(
        sector.center,
        sector.radius,
        sector.start,
        sector.sweep,
        opaque(255, 255, 255),
    );

    scratch.clear();
    scratch.draw_pixmap(source, 0, 0);
    scratch.mask_intersect(mask);

    wheel.draw_pixmap(scratch, 0, 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::style::LineStyle;
    use arcpaint::{Color, transparent};

    fn solid(side: u32, color: Color) -> Pixmap {
        let mut pm = Pixmap::new(side, side).unwrap();
        pm.fill(color);
        pm
    }

    /// Sample point in the middle of section `index` of `count`, at half the
    /// wheel radius.
    fn midpoint(side: u32, index: usize, count: usize) -> (u32, u32) {
        let sweep = 360.0 / count as f64;
        let angle = ((index as f64 + 0.5) * sweep).to_radians();
        let r = side as f64 / 4.0;
        let c = side as f64 / 2.0;
        ((c + r * angle.cos()) as u32, (c + r * angle.sin()) as u32)
    }

    #[test]
    fn four_section_wheel_places_every_source_kind() {
        let red = opaque(255, 0, 0);
        let green = opaque(0, 255, 0);
        let blue = opaque(0, 0, 255);
        let yellow = opaque(255, 255, 0);
        let side = 64;

        let sections = SectionList::new(vec![
            WheelSection::Color(red),
            WheelSection::Image(ImageRef::new("green")),
            WheelSection::Color(blue),
            WheelSection::RawBitmap(solid(side, yellow)),
        ])
        .unwrap();
        let mut images = ImageCache::new();
        images.insert(ImageRef::new("green"), solid(side, green));

        let wheel = composite(&sections, &images, side, side, &WheelStyle::default()).unwrap();

        for (index, expected) in [red, green, blue, yellow].into_iter().enumerate() {
            let (x, y) = midpoint(side, index, 4);
            assert_eq!(wheel.pixel(x, y), Some(expected), "section {}", index);
        }
        // corners lie outside the disc
        assert_eq!(wheel.pixel(0, 0), Some(transparent()));
        assert_eq!(wheel.pixel(side - 1, side - 1), Some(transparent()));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let sections = SectionList::placeholder();
        let images = ImageCache::new();

        assert_eq!(
            composite(&sections, &images, 0, 32, &WheelStyle::default()),
            Err(WheelError::InvalidDimensions {
                width: 0,
                height: 32,
            })
        );
        assert_eq!(
            composite(&sections, &images, 32, 0, &WheelStyle::default()),
            Err(WheelError::InvalidDimensions {
                width: 32,
                height: 0,
            })
        );
    }

    #[test]
    fn unresolved_image_reference_is_an_error() {
        let sections = SectionList::new(vec![
            WheelSection::Color(opaque(1, 1, 1)),
            WheelSection::Image(ImageRef::new("missing")),
        ])
        .unwrap();

        let images = ImageCache::new();
        let result = composite(&sections, &images, 32, 32, &WheelStyle::default());
        assert_eq!(
            result,
            Err(WheelError::InvalidSectionData {
                image: ImageRef::new("missing"),
            })
        );
    }

    #[test]
    fn repeat_composite_is_bit_identical() {
        let sections = SectionList::new(vec![
            WheelSection::Color(opaque(200, 40, 40)),
            WheelSection::RawBitmap(solid(48, opaque(40, 200, 40))),
            WheelSection::Color(opaque(40, 40, 200)),
        ])
        .unwrap();
        let images = ImageCache::new();
        let style = WheelStyle {
            border: LineStyle::colored(opaque(0, 0, 0)),
            separator: LineStyle::colored(opaque(255, 255, 255)),
        };

        let first = composite(&sections, &images, 48, 48, &style).unwrap();
        let second = composite(&sections, &images, 48, 48, &style).unwrap();
        assert_eq!(first.data(), second.data());
    }

    #[test]
    fn wheel_is_square_for_landscape_views() {
        let sections = SectionList::placeholder();
        let images = ImageCache::new();
        let wheel = composite(&sections, &images, 100, 60, &WheelStyle::default()).unwrap();
        assert_eq!((wheel.width(), wheel.height()), (60, 60));
    }

    #[test]
    fn border_ring_lands_inside_the_edge() {
        let black = opaque(0, 0, 0);
        let sections = SectionList::placeholder();
        let style = WheelStyle {
            border: LineStyle::colored(black),
            separator: Default::default(),
        };

        let side = 64;
        let wheel = composite(&sections, &ImageCache::new(), side, side, &style).unwrap();
        // ring midline sits at (side - thickness) / 2 = 27 from the center
        assert_eq!(wheel.pixel(side / 2 + 27, side / 2), Some(black));
        assert_ne!(wheel.pixel(side / 2, side / 2), Some(black));
    }
}
