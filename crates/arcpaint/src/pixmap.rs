use crate::color::{self, Color};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PixmapError {
    #[error("pixmap dimensions must be non-zero, got {width}x{height}")]
    ZeroSize { width: u32, height: u32 },
}

/// Owned straight-alpha RGBA8 raster, row-major from the top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Pixmap {
    /// Creates a fully transparent pixmap.
    pub fn new(width: u32, height: u32) -> Result<Self, PixmapError> {
        if width == 0 || height == 0 {
            return Err(PixmapError::ZeroSize { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        })
    }

    pub fn from_rgba8(width: u32, height: u32, mut data: Vec<u8>) -> Result<Self, PixmapError> {
        if width == 0 || height == 0 {
            return Err(PixmapError::ZeroSize { width, height });
        }
        data.resize(width as usize * height as usize * 4, 0);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize * self.width as usize + x as usize) * 4)
        } else {
            None
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let i = self.offset(x, y)?;
        Some(Color::new(
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ))
    }

    /// Overwrites the pixel, no blending. Out of bounds is a no-op.
    pub fn put_pixel(&mut self, x: u32, y: u32, color: Color) {
        if let Some(i) = self.offset(x, y) {
            let (r, g, b, a) = color.into_components();
            self.data[i] = r;
            self.data[i + 1] = g;
            self.data[i + 2] = b;
            self.data[i + 3] = a;
        }
    }

    /// Source-over blends the pixel. Out of bounds is a no-op.
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Color) {
        if let Some(below) = self.pixel(x, y) {
            self.put_pixel(x, y, color::source_over(color, below));
        }
    }

    pub fn fill(&mut self, color: Color) {
        let (r, g, b, a) = color.into_components();
        for px in self.data.chunks_exact_mut(4) {
            px[0] = r;
            px[1] = g;
            px[2] = b;
            px[3] = a;
        }
    }

    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Source-over composites `src` with its top-left corner at `(left, top)`.
    /// Regions falling outside either pixmap are clipped.
    pub fn draw_pixmap(&mut self, src: &Pixmap, left: i64, top: i64) {
        for sy in 0..src.height {
            let dy = top + sy as i64;
            if dy < 0 || dy >= self.height as i64 {
                continue;
            }
            for sx in 0..src.width {
                let dx = left + sx as i64;
                if dx < 0 || dx >= self.width as i64 {
                    continue;
                }
                if let Some(over) = src.pixel(sx, sy) {
                    self.blend_pixel(dx as u32, dy as u32, over);
                }
            }
        }
    }

    /// Multiplies this pixmap's alpha by the mask's alpha, leaving color
    /// channels untouched. Both pixmaps must share dimensions.
    pub fn mask_intersect(&mut self, mask: &Pixmap) {
        debug_assert_eq!((self.width, self.height), (mask.width, mask.height));
        for (px, mp) in self.data.chunks_exact_mut(4).zip(mask.data.chunks_exact(4)) {
            px[3] = ((px[3] as u32 * mp[3] as u32 + 127) / 255) as u8;
        }
    }
}
