// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # RoomScan Geometry
//!
//! Geometry primitives for the room/object extraction pipeline:
//!
//! - [`BoundingBox`] / [`bounding_box_of`]: per-axis min/max over a point set
//! - [`Wireframe`] / [`box_to_wireframe`]: 8-corner, 12-edge box outlines
//! - [`sample_color`]: nearest-pixel lookup of a texture coordinate

pub mod bbox;
pub mod error;
pub mod texture;
pub mod wireframe;

pub use bbox::{bounding_box_of, BoundingBox};
pub use error::{Error, Result};
pub use texture::{compare_color, sample_color};
pub use wireframe::{box_to_wireframe, Wireframe, BOX_EDGES, BOX_VERTEX_COUNT};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3};
