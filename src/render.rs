//! Background Rasterizer
//!
//! The per-frame core: for every destination pixel, compute a camera-space
//! offset from the screen center, carry it into background-image space
//! through the camera's affine (or per-scanline perspective) transform, and
//! copy the sampled RGBA texel. Samples that miss the background — including
//! non-finite coordinates from a degenerate transform — leave the
//! destination pixel at its cleared value; there is no wrapping or clamping.
//!
//! Sample coordinates step linearly along a scanline, so the inner loops
//! use incremental stepping instead of a per-pixel matrix multiply.

use crate::background::Background;
use crate::camera::{Camera, RenderMode};
use crate::display::PixelBuffer;
use crate::math::{Mat2, Vec2};

/// Rasterize the background into `buffer` with the current camera.
/// Overwrites covered pixels in place; mutates nothing else.
pub fn render(buffer: &mut PixelBuffer, background: &Background, camera: &Camera, mode: RenderMode) {
    match mode {
        RenderMode::Affine => render_affine(buffer, background, camera),
        RenderMode::Perspective => render_perspective(buffer, background, camera),
    }
}

/// Whole-screen inverse affine sampling.
///
/// `sample = ground + (R(θ)·S(sx,sy))⁻¹ · ((x,y) − (W/2,H/2))`
fn render_affine(buffer: &mut PixelBuffer, background: &Background, camera: &Camera) {
    let w = buffer.width() as usize;
    let h = buffer.height() as usize;
    let cx = buffer.width() as f32 / 2.0;
    let cy = buffer.height() as f32 / 2.0;

    let transform = Mat2::rotation(camera.rotation) * Mat2::scale(camera.scale.x, camera.scale.y);
    let inv = transform.inverse();
    let ground = camera.ground();

    let bw = background.width() as f32;
    let bh = background.height() as f32;

    let pixels = buffer.as_bytes_mut();
    let mut idx = 0;

    for y in 0..h {
        let row = ground + inv * Vec2::new(-cx, y as f32 - cy);
        let mut sx = row.x;
        let mut sy = row.y;

        for _x in 0..w {
            // Float-space bounds test: rejects out-of-range and NaN alike,
            // so the integer conversion below is always in range.
            if sx >= 0.0 && sx < bw && sy >= 0.0 && sy < bh {
                if let Some(texel) = background.texel(sx as i32, sy as i32) {
                    pixels[idx..idx + 4].copy_from_slice(texel);
                }
            }
            sx += inv.a;
            sy += inv.c;
            idx += 4;
        }
    }
}

/// Ground-plane perspective sampling below the horizon scanline.
///
/// For scanline `y > horizon` with `dist = y − horizon ≥ 1`, the row scale
/// is `λ = cameraHeight / dist` and
/// `sample = (pos.x, pos.z) + R(θ)·S(λ,λ) · (x − W/2, near + dist)`.
/// Rows at or above the horizon are left at their cleared value. The loop
/// starts strictly below the horizon row, so the divide never sees zero.
fn render_perspective(buffer: &mut PixelBuffer, background: &Background, camera: &Camera) {
    let w = buffer.width() as usize;
    let h = buffer.height() as usize;
    let cx = buffer.width() as f32 / 2.0;

    let rot = Mat2::rotation(camera.rotation);
    let ground = camera.ground();
    let horizon = camera.horizon as usize;

    let bw = background.width() as f32;
    let bh = background.height() as f32;

    let pixels = buffer.as_bytes_mut();

    for y in (horizon + 1)..h {
        let dist = (y - horizon) as f32;
        let lambda = camera.position.y / dist;
        let row_transform = rot * Mat2::scale(lambda, lambda);

        let row = ground + row_transform * Vec2::new(-cx, camera.near + dist);
        let mut sx = row.x;
        let mut sy = row.y;
        let mut idx = y * w * 4;

        for _x in 0..w {
            if sx >= 0.0 && sx < bw && sy >= 0.0 && sy < bh {
                if let Some(texel) = background.texel(sx as i32, sy as i32) {
                    pixels[idx..idx + 4].copy_from_slice(texel);
                }
            }
            sx += row_transform.a;
            sy += row_transform.c;
            idx += 4;
        }
    }
}
