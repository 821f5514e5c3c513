//! Pixel mirror for the bench window
//!
//! The window shows a grid of logical pixels, each one either lit or unlit.
//! [`PixelMirror`] keeps that grid in memory as one byte per logical pixel so
//! app code can read pixels back and the presenter can repaint the window
//! without asking the window system for its contents.

use crate::error::{BenchError, BenchResult};
use std::fmt;
use std::str::FromStr;

/// Binary drawing mode: lit pixels use the foreground colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Pen {
    Erase = 0,
    #[default]
    Draw = 1,
}

impl Pen {
    /// The opposite pen
    pub fn toggle(self) -> Self {
        match self {
            Pen::Draw => Pen::Erase,
            Pen::Erase => Pen::Draw,
        }
    }

    /// Value stored in the mirror (0 or 1)
    #[inline]
    pub fn bit(self) -> u8 {
        self as u8
    }

    pub fn is_draw(self) -> bool {
        self == Pen::Draw
    }
}

impl From<bool> for Pen {
    fn from(draw: bool) -> Self {
        if draw {
            Pen::Draw
        } else {
            Pen::Erase
        }
    }
}

impl From<u8> for Pen {
    /// Any non-zero value draws
    fn from(value: u8) -> Self {
        Pen::from(value != 0)
    }
}

impl fmt::Display for Pen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bit())
    }
}

/// Opaque RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    #[inline]
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl FromStr for Color {
    type Err = BenchError;

    /// Parses `#RRGGBB` (the leading `#` is optional)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BenchError::InvalidColor(s.to_string());
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Flat buffer mirroring the displayed window, one byte per logical pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMirror {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelMirror {
    /// All pixels start unlit
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Buffer offset of a logical pixel, rows are `width` bytes apart
    pub fn index(&self, x: i32, y: i32) -> BenchResult<usize> {
        let in_bounds = x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height;
        if !in_bounds {
            return Err(BenchError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    pub fn set(&mut self, x: i32, y: i32, pen: Pen) -> BenchResult<()> {
        let idx = self.index(x, y)?;
        self.pixels[idx] = pen.bit();
        Ok(())
    }

    pub fn get(&self, x: i32, y: i32) -> BenchResult<Pen> {
        let idx = self.index(x, y)?;
        Ok(Pen::from(self.pixels[idx]))
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Number of lit pixels
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != 0).count()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Paint an RGBA frame of `width * height * 4` bytes from the mirror.
    ///
    /// A frame of the wrong size is painted only as far as both buffers go.
    pub fn render_rgba(&self, frame: &mut [u8], foreground: Color, background: Color) {
        let fg = foreground.to_rgba();
        let bg = background.to_rgba();
        for (out, &bit) in frame.chunks_exact_mut(4).zip(self.pixels.iter()) {
            out.copy_from_slice(if bit != 0 { &fg } else { &bg });
        }
    }

    /// Text dump, `#` for lit and `.` for unlit, one line per row
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for row in self.pixels.chunks(self.width.max(1) as usize) {
            out.extend(row.iter().map(|&p| if p != 0 { '#' } else { '.' }));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_mirror_is_blank() {
        let mirror = PixelMirror::new(8, 4);
        assert_eq!(mirror.dimensions(), (8, 4));
        assert_eq!(mirror.as_bytes().len(), 32);
        assert_eq!(mirror.lit_count(), 0);
    }

    #[test]
    fn test_row_stride_uses_width() {
        // Non-square so a height-based stride would land elsewhere
        let mut mirror = PixelMirror::new(10, 3);
        mirror.set(4, 2, Pen::Draw).unwrap();

        assert_eq!(mirror.index(4, 2).unwrap(), 24);
        assert_eq!(mirror.as_bytes()[24], 1);
        assert_eq!(mirror.get(4, 2).unwrap(), Pen::Draw);
        assert_eq!(mirror.get(4, 1).unwrap(), Pen::Erase);
    }

    #[test]
    fn test_erase_pen_clears_pixel() {
        let mut mirror = PixelMirror::new(4, 4);
        mirror.set(1, 1, Pen::Draw).unwrap();
        mirror.set(1, 1, Pen::Erase).unwrap();
        assert_eq!(mirror.get(1, 1).unwrap(), Pen::Erase);
        assert_eq!(mirror.lit_count(), 0);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut mirror = PixelMirror::new(4, 3);
        let before = mirror.clone();

        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 3), (i32::MAX, i32::MAX)] {
            let err = mirror.set(x, y, Pen::Draw).unwrap_err();
            assert_eq!(
                err,
                BenchError::OutOfBounds {
                    x,
                    y,
                    width: 4,
                    height: 3
                }
            );
            assert!(mirror.get(x, y).is_err());
        }
        assert_eq!(mirror, before);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut mirror = PixelMirror::new(5, 5);
        for i in 0..5 {
            mirror.set(i, i, Pen::Draw).unwrap();
        }
        assert_eq!(mirror.lit_count(), 5);
        mirror.clear();
        assert_eq!(mirror.lit_count(), 0);
    }

    #[test]
    fn test_render_rgba_maps_colors() {
        let mut mirror = PixelMirror::new(2, 1);
        mirror.set(1, 0, Pen::Draw).unwrap();

        let mut frame = vec![0u8; 8];
        mirror.render_rgba(&mut frame, Color::BLACK, Color::WHITE);
        assert_eq!(frame, vec![0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0xff]);
    }

    #[test]
    fn test_to_ascii() {
        let mut mirror = PixelMirror::new(3, 2);
        mirror.set(0, 0, Pen::Draw).unwrap();
        mirror.set(2, 1, Pen::Draw).unwrap();
        assert_eq!(mirror.to_ascii(), "#..\n..#\n");
    }

    #[test]
    fn test_pen_conversions() {
        assert_eq!(Pen::default(), Pen::Draw);
        assert_eq!(Pen::Draw.toggle(), Pen::Erase);
        assert_eq!(Pen::Erase.toggle(), Pen::Draw);
        assert_eq!(Pen::from(0u8), Pen::Erase);
        assert_eq!(Pen::from(7u8), Pen::Draw);
        assert_eq!(Pen::from(true).to_string(), "1");
    }

    #[test]
    fn test_color_parsing() {
        assert_eq!("#000000".parse::<Color>().unwrap(), Color::BLACK);
        assert_eq!("ffffff".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!(
            "#7C3AED".parse::<Color>().unwrap(),
            Color::rgb(0x7c, 0x3a, 0xed)
        );
        assert_eq!(Color::rgb(0x7c, 0x3a, 0xed).to_string(), "#7C3AED");

        for bad in ["", "#fff", "#12345g", "#1234567", "black"] {
            assert_eq!(
                bad.parse::<Color>(),
                Err(BenchError::InvalidColor(bad.to_string()))
            );
        }
    }

    proptest! {
        #[test]
        fn prop_set_then_get(w in 1u32..64, h in 1u32..64, x in 0i32..64, y in 0i32..64, draw in any::<bool>()) {
            let mut mirror = PixelMirror::new(w, h);
            let result = mirror.set(x, y, Pen::from(draw));
            if (x as u32) < w && (y as u32) < h {
                prop_assert!(result.is_ok());
                prop_assert_eq!(mirror.get(x, y).unwrap(), Pen::from(draw));
                prop_assert_eq!(mirror.lit_count(), draw as usize);
            } else {
                prop_assert!(result.is_err());
                prop_assert_eq!(mirror.lit_count(), 0);
            }
        }
    }
}
