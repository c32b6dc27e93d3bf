//! Surface — an addressable RGB pixel buffer.
//!
//! Surfaces are the only thing sprites, the scene and backends exchange.
//! The single pixel operation the animation core needs is `blit`.

use crate::types::{Rect, Rgb};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Surface {
    /// A black surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgb::BLACK)
    }

    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        Surface {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Wrap row-major pixel data. Returns `None` if the length does not match.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgb>) -> Option<Self> {
        (pixels.len() == width as usize * height as usize).then_some(Surface {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_xywh(0, 0, self.width, self.height)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        self.bounds()
            .contains(x, y)
            .then(|| self.pixels[self.index(x, y)])
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        if self.bounds().contains(x, y) {
            let i = self.index(x, y);
            self.pixels[i] = color;
        }
    }

    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Copy `area` of this surface onto `dst` with its top-left corner at
    /// `(dst_x, dst_y)`.
    ///
    /// The area is clipped to this surface first, then the footprint is
    /// clipped to `dst`. Whatever falls outside either is skipped.
    pub fn blit(&self, area: Rect, dst: &mut Surface, dst_x: i32, dst_y: i32) {
        let Some(src) = area.intersect(&self.bounds()) else {
            return;
        };

        // Shift the destination by however much the source got clipped.
        let dst_x = dst_x + (src.x0 - area.x0);
        let dst_y = dst_y + (src.y0 - area.y0);

        let target = Rect::from_xywh(dst_x, dst_y, src.width(), src.height());
        let Some(clipped) = target.intersect(&dst.bounds()) else {
            return;
        };

        let offset_x = clipped.x0 - dst_x;
        let offset_y = clipped.y0 - dst_y;
        let row_len = clipped.width() as usize;

        for row in 0..clipped.height() as i32 {
            let s = self.index(src.x0 + offset_x, src.y0 + offset_y + row);
            let d = dst.index(clipped.x0, clipped.y0 + row);
            dst.pixels[d..d + row_len].copy_from_slice(&self.pixels[s..s + row_len]);
        }
    }

    /// A new surface of the given size keeping the overlapping content.
    pub fn resized(&self, width: u32, height: u32) -> Surface {
        let mut out = Surface::new(width, height);
        self.blit(self.bounds(), &mut out, 0, 0);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(w: u32, h: u32) -> Surface {
        let pixels = (0..h)
            .flat_map(|y| (0..w).map(move |x| Rgb::new(x as u8, y as u8, 0)))
            .collect();
        Surface::from_pixels(w, h, pixels).unwrap()
    }

    #[test]
    fn from_pixels_rejects_bad_length() {
        assert!(Surface::from_pixels(3, 3, vec![Rgb::BLACK; 8]).is_none());
    }

    #[test]
    fn blit_copies_region_at_offset() {
        let src = gradient(8, 8);
        let mut dst = Surface::new(10, 10);
        src.blit(Rect::from_xywh(2, 3, 4, 2), &mut dst, 5, 1);

        assert_eq!(dst.pixel(5, 1), Some(Rgb::new(2, 3, 0)));
        assert_eq!(dst.pixel(8, 2), Some(Rgb::new(5, 4, 0)));
        assert_eq!(dst.pixel(4, 1), Some(Rgb::BLACK));
        assert_eq!(dst.pixel(5, 3), Some(Rgb::BLACK));
    }

    #[test]
    fn blit_clips_negative_destination() {
        let src = gradient(4, 4);
        let mut dst = Surface::new(4, 4);
        src.blit(src.bounds(), &mut dst, -2, -1);

        // Pixel (2, 1) of src lands on (0, 0).
        assert_eq!(dst.pixel(0, 0), Some(Rgb::new(2, 1, 0)));
        assert_eq!(dst.pixel(1, 2), Some(Rgb::new(3, 3, 0)));
        assert_eq!(dst.pixel(2, 0), Some(Rgb::BLACK));
    }

    #[test]
    fn blit_clips_source_outside_bounds() {
        let src = gradient(4, 4);
        let mut dst = Surface::filled(6, 6, Rgb::new(9, 9, 9));
        src.blit(Rect::from_xywh(-1, -1, 3, 3), &mut dst, 0, 0);

        // The part of the area above/left of src is skipped, not shifted.
        assert_eq!(dst.pixel(0, 0), Some(Rgb::new(9, 9, 9)));
        assert_eq!(dst.pixel(1, 1), Some(Rgb::new(0, 0, 0)));
        assert_eq!(dst.pixel(2, 2), Some(Rgb::new(1, 1, 0)));
    }

    #[test]
    fn blit_entirely_outside_is_noop() {
        let src = gradient(4, 4);
        let mut dst = Surface::new(4, 4);
        src.blit(src.bounds(), &mut dst, 10, 10);
        assert_eq!(dst, Surface::new(4, 4));
    }

    #[test]
    fn resized_keeps_overlap() {
        let src = gradient(4, 4);
        let small = src.resized(2, 3);
        assert_eq!((small.width(), small.height()), (2, 3));
        assert_eq!(small.pixel(1, 2), Some(Rgb::new(1, 2, 0)));

        let big = src.resized(6, 6);
        assert_eq!(big.pixel(3, 3), Some(Rgb::new(3, 3, 0)));
        assert_eq!(big.pixel(5, 5), Some(Rgb::BLACK));
    }
}
