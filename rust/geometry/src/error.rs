// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during geometry processing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid bounding box: min {min} > max {max} on axis {axis}")]
    InvalidBox { axis: usize, min: f64, max: f64 },

    #[error("Texture coordinate ({u}, {v}) maps outside a {width}x{height} image")]
    TexCoordOutOfRange {
        u: f64,
        v: f64,
        width: u32,
        height: u32,
    },

    #[error("Cannot sample an empty image")]
    EmptyImage,
}
