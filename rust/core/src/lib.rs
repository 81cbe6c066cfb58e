// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # RoomScan Core
//!
//! Input parsing for colour-coded semantic building scans.
//!
//! - **Mesh attributes**: [`parse_mesh_attributes`] reads the textual mesh
//!   into one [`Vertex`] per position, each carrying its texture coordinate
//!   and the material that was active when it was declared.
//! - **Annotations**: [`parse_annotations`] reads the per-instance
//!   colour → object/room table into an [`AnnotationTable`].
//! - **Colour keys**: [`ColorKey`] is the packed RGB value that joins the two.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use roomscan_core::{parse_annotations, parse_mesh_attributes};
//!
//! let mesh = parse_mesh_attributes(&std::fs::read_to_string("output_file.obj")?)?;
//! let table = parse_annotations(&std::fs::read_to_string("scene.semantic.txt")?)?;
//! println!("{} vertices, {} rooms", mesh.len(), table.len());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: serialize [`ColorKey`] as its 6-digit hex form

pub mod annotations;
pub mod color;
pub mod error;
pub mod mesh;

pub use annotations::{parse_annotations, AnnotationRecord, AnnotationTable, RoomAnnotations};
pub use color::ColorKey;
pub use error::{Error, Result};
pub use mesh::{parse_mesh_attributes, MaterialId, MeshAttributes, Vertex};
