// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Nearest-pixel texture colour sampling

use crate::error::{Error, Result};
use image::{Rgb, RgbImage};
use nalgebra::Point2;
use roomscan_core::ColorKey;

/// Sample the texel under a texture coordinate
///
/// Pixel indices are `x = trunc(u * (width - 1))` and
/// `y = trunc((1 - v) * (height - 1))`; `v` is flipped because texture space
/// grows upward while image rows grow downward. No interpolation.
///
/// Coordinates are expected in `[0, 1]`. Outside that range the result is
/// only defined while the truncated index still lands inside the image;
/// otherwise (or for non-finite input) this returns
/// [`Error::TexCoordOutOfRange`]. Values are never clamped.
pub fn sample_color(tex_coord: Point2<f64>, image: &RgbImage) -> Result<ColorKey> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage);
    }

    let x = (tex_coord.x * (width - 1) as f64).trunc();
    let y = ((1.0 - tex_coord.y) * (height - 1) as f64).trunc();

    let in_range = x.is_finite()
        && y.is_finite()
        && x >= 0.0
        && y >= 0.0
        && x < width as f64
        && y < height as f64;
    if !in_range {
        return Err(Error::TexCoordOutOfRange {
            u: tex_coord.x,
            v: tex_coord.y,
            width,
            height,
        });
    }

    let Rgb([r, g, b]) = *image.get_pixel(x as u32, y as u32);
    Ok(ColorKey::from_rgb(r, g, b))
}

/// Whether the texel under `tex_coord` has the given hex colour (any case)
pub fn compare_color(tex_coord: Point2<f64>, image: &RgbImage, hex: &str) -> bool {
    sample_color(tex_coord, image)
        .map(|key| key.matches_hex(hex))
        .unwrap_or(false)
}
