// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room/object hierarchy extraction from colour-coded semantic meshes.
//!
//! This crate provides the pipeline stages shared by the CLI:
//! 1. Loading material images once per building ([`MaterialLibrary`])
//! 2. Grouping vertices by sampled texture colour ([`group_by_color`])
//! 3. Building object and room bounding boxes ([`build_hierarchy`])
//! 4. Writing the building structure JSON and PLY wireframes
//!
//! # Usage
//!
//! ```rust,ignore
//! use roomscan_processing::{process_all_folders, regenerate_all_folders, PipelineConfig};
//!
//! let config = PipelineConfig::default();
//! let summary = process_all_folders(Path::new("scans"), &config)?;
//! println!("{} buildings processed", summary.processed.len());
//!
//! // Later, rebuild wireframes from the saved JSON only
//! regenerate_all_folders(Path::new("scans"), &config)?;
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod grouping;
pub mod hierarchy;
pub mod materials;
pub mod pipeline;
pub mod ply;
pub mod structure;

pub use batch::{list_building_folders, process_all_folders, regenerate_all_folders, BatchSummary};
pub use config::PipelineConfig;
pub use error::{Error, Result};
pub use grouping::{group_by_color, ColorBuckets, GroupingStats};
pub use hierarchy::{build_hierarchy, HierarchyReport, SkippedObject};
pub use materials::{MaterialLibrary, MaterialSource};
pub use pipeline::{
    extract_building, process_folder, regenerate_wireframes, Extraction, ExtractionStats,
    FolderLayout, FolderOutcome, FolderReport,
};
pub use ply::{write_box_ply, write_boxes_ply, write_ply, write_wireframe_file};
pub use structure::{read_building, write_building, Building, Room, RoomObject};
