//! Background Image Source
//!
//! The read-only texel grid the rasterizer samples from. Loaded once at
//! startup from a PNG (or generated procedurally) and never mutated.

use std::path::Path;

pub const BYTES_PER_PIXEL: u32 = 4;

/// An RGBA texel grid with an explicit row pitch.
///
/// Pitch is bytes per row and may exceed `width * 4` when rows carry
/// alignment padding; all addressing goes through it.
pub struct Background {
    width: u32,
    height: u32,
    pitch: u32,
    pixels: Vec<u8>,
}

impl Background {
    /// Wrap raw RGBA bytes with an explicit pitch.
    /// Fails if the buffer is too small for `pitch * height` or the pitch
    /// cannot hold a full row of texels.
    pub fn from_raw(width: u32, height: u32, pitch: u32, pixels: Vec<u8>) -> Result<Self, String> {
        if pitch < width * BYTES_PER_PIXEL {
            return Err(format!(
                "pitch {} too small for width {} at 4 bytes/pixel",
                pitch, width
            ));
        }
        if pixels.len() < (pitch * height) as usize {
            return Err(format!(
                "pixel buffer holds {} bytes, need {}",
                pixels.len(),
                pitch * height
            ));
        }
        Ok(Self {
            width,
            height,
            pitch,
            pixels,
        })
    }

    /// Load from an image file on disk. Any format the `image` crate
    /// decodes works; everything is converted to tightly packed RGBA.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|e| format!("Failed to load {}: {}", path.display(), e))?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_raw(width, height, width * BYTES_PER_PIXEL, rgba.into_raw())
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row (may exceed `width * 4`)
    #[inline]
    pub fn pitch(&self) -> u32 {
        self.pitch
    }

    #[inline]
    pub fn bytes_per_pixel(&self) -> u32 {
        BYTES_PER_PIXEL
    }

    /// Bounds-checked texel fetch. Returns the 4-byte RGBA slice at (x, y),
    /// or None when the coordinate falls outside the grid. Never wraps,
    /// never clamps.
    #[inline]
    pub fn texel(&self, x: i32, y: i32) -> Option<&[u8]> {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return None;
        }
        let idx = (y as u32 * self.pitch + x as u32 * BYTES_PER_PIXEL) as usize;
        Some(&self.pixels[idx..idx + 4])
    }

    fn set_texel(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8, a: u8) {
        let idx = (y * self.pitch + x * BYTES_PER_PIXEL) as usize;
        self.pixels[idx..idx + 4].copy_from_slice(&[r, g, b, a]);
    }
}

// ============================================================================
// Procedural Patterns
// ============================================================================

impl Background {
    fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pitch: width * BYTES_PER_PIXEL,
            pixels: vec![0; (width * height * BYTES_PER_PIXEL) as usize],
        }
    }

    /// Generate a checkerboard pattern
    pub fn checkerboard(size: u32, tile_size: u32, c1: (u8, u8, u8), c2: (u8, u8, u8)) -> Self {
        let mut bg = Self::blank(size, size);
        for y in 0..size {
            for x in 0..size {
                let checker = ((x / tile_size) + (y / tile_size)) % 2 == 0;
                let (r, g, b) = if checker { c1 } else { c2 };
                bg.set_texel(x, y, r, g, b, 255);
            }
        }
        bg
    }

    /// Generate an XOR pattern (classic demoscene texture)
    pub fn xor_pattern(size: u32) -> Self {
        let mut bg = Self::blank(size, size);
        for y in 0..size {
            for x in 0..size {
                let v = (x ^ y) as u8;
                bg.set_texel(x, y, v, v, v, 255);
            }
        }
        bg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a background where every texel encodes its own coordinates,
    /// with `pad` bytes of junk after each row.
    fn coordinate_grid(width: u32, height: u32, pad: u32) -> Background {
        let pitch = width * BYTES_PER_PIXEL + pad;
        let mut pixels = vec![0xEE; (pitch * height) as usize];
        for y in 0..height {
            for x in 0..width {
                let idx = (y * pitch + x * BYTES_PER_PIXEL) as usize;
                pixels[idx..idx + 4].copy_from_slice(&[x as u8, y as u8, 0, 255]);
            }
        }
        Background::from_raw(width, height, pitch, pixels).unwrap()
    }

    #[test]
    fn test_texel_addressing_respects_pitch() {
        let bg = coordinate_grid(5, 4, 12);
        for y in 0..4 {
            for x in 0..5 {
                assert_eq!(bg.texel(x, y), Some(&[x as u8, y as u8, 0, 255][..]));
            }
        }
    }

    #[test]
    fn test_texel_out_of_bounds_is_none() {
        let bg = coordinate_grid(5, 4, 0);
        assert_eq!(bg.texel(-1, 0), None);
        assert_eq!(bg.texel(5, 0), None);
        assert_eq!(bg.texel(0, -1), None);
        assert_eq!(bg.texel(0, 4), None);
    }

    #[test]
    fn test_from_raw_rejects_short_buffer() {
        assert!(Background::from_raw(4, 4, 16, vec![0; 32]).is_err());
    }

    #[test]
    fn test_from_raw_rejects_undersized_pitch() {
        assert!(Background::from_raw(4, 4, 8, vec![0; 64]).is_err());
    }

    #[test]
    fn test_checkerboard_alternates_tiles() {
        let bg = Background::checkerboard(8, 4, (255, 0, 0), (0, 0, 255));
        assert_eq!(bg.texel(0, 0), Some(&[255, 0, 0, 255][..]));
        assert_eq!(bg.texel(4, 0), Some(&[0, 0, 255, 255][..]));
        assert_eq!(bg.texel(4, 4), Some(&[255, 0, 0, 255][..]));
    }

    #[test]
    fn test_xor_pattern_values() {
        let bg = Background::xor_pattern(16);
        assert_eq!(bg.texel(3, 5), Some(&[6, 6, 6, 255][..]));
    }
}
