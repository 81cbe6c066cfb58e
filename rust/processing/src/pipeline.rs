// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-building pipeline.
//!
//! Extraction: parse → sample → group → build hierarchy → write JSON (and
//! wireframes). Regeneration: read JSON → write wireframes.

use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::grouping::group_by_color;
use crate::hierarchy::{build_hierarchy, HierarchyReport};
use crate::materials::{MaterialLibrary, MaterialSource};
use crate::ply::{write_box_ply, write_wireframe_file};
use crate::structure::{read_building, write_building, Building};
use roomscan_core::{parse_annotations, parse_mesh_attributes, AnnotationTable, MeshAttributes};
use rustc_hash::FxHashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// File locations for one building folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderLayout {
    pub folder: PathBuf,
    pub building_name: String,
    pub mesh: PathBuf,
    pub annotations: PathBuf,
    pub structure: PathBuf,
    pub rooms_wireframe: PathBuf,
    pub objects_wireframe: PathBuf,
    pub object_boxes_dir: PathBuf,
}

impl FolderLayout {
    /// Resolve paths from the folder name.
    ///
    /// The annotation table is named after the last `-`-separated part of
    /// the folder name (`00006-HkseAnWCgqk` → `HkseAnWCgqk.semantic.txt`);
    /// outputs are named after the full folder name.
    pub fn new(folder: &Path, config: &PipelineConfig) -> Result<Self> {
        let building_name = folder
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| Error::InvalidFolder(folder.to_path_buf()))?
            .to_string();
        let base = building_name.rsplit('-').next().unwrap_or(&building_name);

        Ok(Self {
            folder: folder.to_path_buf(),
            mesh: folder.join(&config.mesh_file_name),
            annotations: folder.join(format!("{}{}", base, config.annotation_suffix)),
            structure: folder.join(format!("{}{}", building_name, config.structure_suffix)),
            rooms_wireframe: folder.join(&config.rooms_wireframe_name),
            objects_wireframe: folder.join(&config.objects_wireframe_name),
            object_boxes_dir: folder.join(&config.object_boxes_dir),
            building_name,
        })
    }
}

/// What happened to one folder.
#[derive(Debug, Clone)]
pub enum FolderOutcome {
    Processed(FolderReport),
    /// Required inputs were absent
    Skipped { missing: Vec<PathBuf> },
}

/// Summary of a processed folder.
#[derive(Debug, Clone, Default)]
pub struct FolderReport {
    pub building_name: String,
    pub stats: ExtractionStats,
    pub outputs: Vec<PathBuf>,
}

/// Counters for one extraction run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub vertices: usize,
    pub grouped_vertices: usize,
    pub missing_material_vertices: usize,
    pub out_of_range_vertices: usize,
    pub colors: usize,
    pub rooms: usize,
    pub objects: usize,
    pub skipped_rooms: usize,
    pub skipped_objects: usize,
}

/// Result of the in-memory extraction stages.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub hierarchy: HierarchyReport,
    pub stats: ExtractionStats,
}

impl Extraction {
    pub fn building(&self) -> &Building {
        &self.hierarchy.building
    }
}

/// Run grouping and hierarchy building over parsed inputs
pub fn extract_building<M>(
    building_name: &str,
    mesh: &MeshAttributes,
    annotations: &AnnotationTable,
    materials: &M,
) -> Extraction
where
    M: MaterialSource + ?Sized,
{
    let (buckets, grouping) = group_by_color(mesh, materials);
    let hierarchy = build_hierarchy(building_name, annotations, &buckets);

    let stats = ExtractionStats {
        vertices: mesh.len(),
        grouped_vertices: grouping.grouped,
        missing_material_vertices: grouping.missing_material,
        out_of_range_vertices: grouping.out_of_range,
        colors: buckets.len(),
        rooms: hierarchy.building.rooms.len(),
        objects: hierarchy.building.object_count(),
        skipped_rooms: hierarchy.skipped_rooms.len(),
        skipped_objects: hierarchy.skipped_objects.len(),
    };

    Extraction { hierarchy, stats }
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

fn parse_error(path: &Path) -> impl FnOnce(roomscan_core::Error) -> Error + '_ {
    move |source| Error::Parse {
        path: path.to_path_buf(),
        source,
    }
}

fn missing_inputs(paths: &[&Path]) -> Vec<PathBuf> {
    paths
        .iter()
        .filter(|p| !p.is_file())
        .map(|p| p.to_path_buf())
        .collect()
}

/// Extract the building structure of one folder and write its outputs
pub fn process_folder(folder: &Path, config: &PipelineConfig) -> Result<FolderOutcome> {
    let start = Instant::now();
    let layout = FolderLayout::new(folder, config)?;

    let missing = missing_inputs(&[layout.mesh.as_path(), layout.annotations.as_path()]);
    if !missing.is_empty() {
        tracing::warn!(
            folder = %folder.display(),
            missing = ?missing,
            "Missing required files, skipping folder"
        );
        return Ok(FolderOutcome::Skipped { missing });
    }

    tracing::info!(folder = %folder.display(), "Processing building");

    let annotations =
        parse_annotations(&read_text(&layout.annotations)?).map_err(parse_error(&layout.annotations))?;
    let mesh = parse_mesh_attributes(&read_text(&layout.mesh)?).map_err(parse_error(&layout.mesh))?;
    tracing::debug!(
        vertices = mesh.len(),
        materials = mesh.materials.len(),
        rooms = annotations.len(),
        records = annotations.record_count(),
        "Parsed inputs"
    );

    let materials = MaterialLibrary::load(folder, &mesh, &config.texture_extension);
    tracing::debug!(
        loaded = materials.loaded_count(),
        total = materials.len(),
        "Loaded material images"
    );

    let extraction = extract_building(&layout.building_name, &mesh, &annotations, &materials);
    log_skipped(&extraction.hierarchy);

    let building = extraction.building();
    let mut outputs = Vec::new();

    write_building(&layout.structure, building)?;
    tracing::info!(path = %layout.structure.display(), "Building structure saved");
    outputs.push(layout.structure.clone());

    if config.write_wireframes {
        outputs.extend(write_wireframes(&layout, building)?);
    }
    if config.per_object_wireframes {
        outputs.extend(write_object_boxes(&layout, building)?);
    }

    let stats = extraction.stats;
    tracing::info!(
        building = %layout.building_name,
        rooms = stats.rooms,
        objects = stats.objects,
        vertices = stats.vertices,
        grouped = stats.grouped_vertices,
        dropped_missing_material = stats.missing_material_vertices,
        dropped_out_of_range = stats.out_of_range_vertices,
        colors = stats.colors,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Building processed"
    );

    Ok(FolderOutcome::Processed(FolderReport {
        building_name: layout.building_name,
        stats,
        outputs,
    }))
}

fn log_skipped(hierarchy: &HierarchyReport) {
    for object in &hierarchy.skipped_objects {
        tracing::warn!(
            room = %object.room_id,
            object = %object.object_id,
            color = %object.hex_color,
            "Object colour not found on any sampled vertex, skipping object"
        );
    }
    for room in &hierarchy.skipped_rooms {
        tracing::warn!(room = %room, "Room has no resolvable objects, skipping room");
    }
}

fn write_wireframes(layout: &FolderLayout, building: &Building) -> Result<Vec<PathBuf>> {
    write_wireframe_file(&layout.rooms_wireframe, &building.room_wireframe())?;
    tracing::info!(path = %layout.rooms_wireframe.display(), rooms = building.rooms.len(), "Room bounding boxes saved");

    write_wireframe_file(&layout.objects_wireframe, &building.object_wireframe())?;
    tracing::info!(path = %layout.objects_wireframe.display(), objects = building.object_count(), "Object bounding boxes saved");

    Ok(vec![
        layout.rooms_wireframe.clone(),
        layout.objects_wireframe.clone(),
    ])
}

/// Path-safe form of an identifier: anything but ASCII alphanumerics, `-` and `_` becomes `_`
fn file_stem_part(id: &str) -> String {
    let part: String = id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if part.is_empty() {
        "_".to_string()
    } else {
        part
    }
}

/// One `{room}_{object}.ply` per object; repeated names get a `_2`, `_3`, ... suffix
fn object_box_names(building: &Building) -> Vec<String> {
    let mut used: FxHashSet<String> = FxHashSet::default();
    let mut names = Vec::with_capacity(building.object_count());

    for room in &building.rooms {
        for object in &room.objects {
            let stem = format!("{}_{}", file_stem_part(&room.room_id), file_stem_part(&object.object_id));
            let mut name = format!("{}.ply", stem);
            let mut n = 2;
            while !used.insert(name.clone()) {
                name = format!("{}_{}.ply", stem, n);
                n += 1;
            }
            names.push(name);
        }
    }
    names
}

fn write_object_boxes(layout: &FolderLayout, building: &Building) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(&layout.object_boxes_dir).map_err(|e| Error::io(&layout.object_boxes_dir, e))?;

    let mut written = Vec::with_capacity(building.object_count());
    for (bbox, name) in building.object_boxes().zip(object_box_names(building)) {
        let path = layout.object_boxes_dir.join(name);
        write_box_ply(&path, bbox)?;
        written.push(path);
    }

    tracing::debug!(count = written.len(), dir = %layout.object_boxes_dir.display(), "Per-object boxes saved");
    Ok(written)
}

/// Rewrite the room and object wireframes of a folder from its structure JSON
pub fn regenerate_wireframes(folder: &Path, config: &PipelineConfig) -> Result<FolderOutcome> {
    let layout = FolderLayout::new(folder, config)?;

    if !layout.structure.is_file() {
        tracing::warn!(
            folder = %folder.display(),
            expected = %layout.structure.display(),
            "No building structure JSON found, skipping folder"
        );
        return Ok(FolderOutcome::Skipped {
            missing: vec![layout.structure],
        });
    }

    let building = read_building(&layout.structure)?;
    let outputs = write_wireframes(&layout, &building)?;

    Ok(FolderOutcome::Processed(FolderReport {
        building_name: layout.building_name,
        stats: ExtractionStats {
            rooms: building.rooms.len(),
            objects: building.object_count(),
            ..Default::default()
        },
        outputs,
    }))
}
