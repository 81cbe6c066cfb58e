// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pipeline configuration: input/output naming inside a building folder.

/// Pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Textual mesh written by the scene exporter, inside each folder.
    pub mesh_file_name: String,
    /// Appended to the folder's base name to find the annotation table.
    pub annotation_suffix: String,
    /// `usemtl NAME` refers to the image `NAME.<texture_extension>`.
    pub texture_extension: String,
    /// Appended to the folder name for the building structure JSON.
    pub structure_suffix: String,
    /// Combined room wireframe file name.
    pub rooms_wireframe_name: String,
    /// Combined object wireframe file name.
    pub objects_wireframe_name: String,
    /// Sub-folder for per-object wireframes.
    pub object_boxes_dir: String,
    /// Write the combined wireframes after extraction.
    pub write_wireframes: bool,
    /// Write one wireframe file per object after extraction.
    pub per_object_wireframes: bool,
    /// Worker threads of the batch pool (`None` = rayon default).
    pub worker_threads: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mesh_file_name: "output_file.obj".into(),
            annotation_suffix: ".semantic.txt".into(),
            texture_extension: "png".into(),
            structure_suffix: "_structure.json".into(),
            rooms_wireframe_name: "room_bounding_boxes.ply".into(),
            objects_wireframe_name: "object_bounding_boxes.ply".into(),
            object_boxes_dir: "object_boxes".into(),
            write_wireframes: true,
            per_object_wireframes: false,
            worker_threads: None,
        }
    }
}
