// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh attribute parsing
//!
//! Reads the line-oriented textual mesh format (Wavefront OBJ as written by
//! the scene exporter) into one record per vertex. Three directives matter:
//!
//! - `usemtl NAME` switches the active material
//! - `v X Y Z` emits a vertex position tagged with the active material
//! - `vt U V` emits a texture coordinate
//!
//! Positions and texture coordinates are emitted in the same order by the
//! exporter, so the i-th `v` and the i-th `vt` describe the same vertex.
//! Every other directive is ignored.

use crate::error::{Error, Result};
use nalgebra::{Point2, Point3};
use rustc_hash::FxHashMap;

/// Index into [`MeshAttributes::materials`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub u32);

impl MaterialId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A mesh vertex with its index-aligned attributes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in mesh space
    pub position: Point3<f64>,
    /// Texture coordinate, `v = 0` at the bottom of the image
    pub tex_coord: Point2<f64>,
    /// Material active when the vertex was declared (`None` before any `usemtl`)
    pub material: Option<MaterialId>,
}

/// Parsed per-vertex attributes of one mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshAttributes {
    /// Material names in order of first `usemtl` appearance
    pub materials: Vec<String>,
    pub vertices: Vec<Vertex>,
}

impl MeshAttributes {
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn material_name(&self, id: MaterialId) -> Option<&str> {
        self.materials.get(id.index()).map(String::as_str)
    }

    /// Materials that at least one vertex refers to
    pub fn used_materials(&self) -> Vec<MaterialId> {
        let mut used = vec![false; self.materials.len()];
        for id in self.vertices.iter().filter_map(|v| v.material) {
            used[id.index()] = true;
        }
        used.iter()
            .enumerate()
            .filter_map(|(i, &u)| u.then_some(MaterialId(i as u32)))
            .collect()
    }
}

/// Running state while folding over mesh lines
#[derive(Default)]
struct MeshAccumulator {
    materials: Vec<String>,
    material_ids: FxHashMap<String, MaterialId>,
    current: Option<MaterialId>,
    positions: Vec<(Point3<f64>, Option<MaterialId>)>,
    tex_coords: Vec<Point2<f64>>,
}

impl MeshAccumulator {
    fn consume(mut self, line_no: usize, line: &str) -> Result<Self> {
        let mut tokens = line.split_whitespace();
        let Some(directive) = tokens.next() else {
            return Ok(self);
        };

        match directive {
            "usemtl" => {
                let name = tokens
                    .next()
                    .ok_or_else(|| Error::malformed(line_no, "'usemtl' without a material name"))?;
                self.current = Some(self.intern(name));
            }
            "v" => {
                let [x, y, z] = parse_fields::<3>(tokens, line_no, directive)?;
                self.positions.push((Point3::new(x, y, z), self.current));
            }
            "vt" => {
                let [u, v] = parse_fields::<2>(tokens, line_no, directive)?;
                self.tex_coords.push(Point2::new(u, v));
            }
            _ => {}
        }

        Ok(self)
    }

    fn intern(&mut self, name: &str) -> MaterialId {
        if let Some(&id) = self.material_ids.get(name) {
            return id;
        }
        let id = MaterialId(self.materials.len() as u32);
        self.materials.push(name.to_string());
        self.material_ids.insert(name.to_string(), id);
        id
    }

    fn finish(self) -> Result<MeshAttributes> {
        if self.positions.len() != self.tex_coords.len() {
            return Err(Error::AttributeCountMismatch {
                positions: self.positions.len(),
                tex_coords: self.tex_coords.len(),
            });
        }

        let vertices = self
            .positions
            .into_iter()
            .zip(self.tex_coords)
            .map(|((position, material), tex_coord)| Vertex {
                position,
                tex_coord,
                material,
            })
            .collect();

        Ok(MeshAttributes {
            materials: self.materials,
            vertices,
        })
    }
}

/// Parse the first `N` whitespace-separated fields as floats; extra fields are ignored
fn parse_fields<'a, const N: usize>(
    mut tokens: impl Iterator<Item = &'a str>,
    line_no: usize,
    directive: &str,
) -> Result<[f64; N]> {
    let mut values = [0.0; N];
    for (i, slot) in values.iter_mut().enumerate() {
        let token = tokens.next().ok_or_else(|| {
            Error::malformed(
                line_no,
                format!("'{}' expects {} numeric fields, found {}", directive, N, i),
            )
        })?;
        let value: f64 = fast_float::parse(token).map_err(|_| {
            Error::malformed(line_no, format!("'{}': invalid number '{}'", directive, token))
        })?;
        if !value.is_finite() {
            return Err(Error::malformed(
                line_no,
                format!("'{}': non-finite number '{}'", directive, token),
            ));
        }
        *slot = value;
    }
    Ok(values)
}

/// Parse textual mesh content into index-aligned vertex records
///
/// The material of a vertex is whichever `usemtl` was most recently seen
/// before its `v` line. Fails on a directive with too few, non-numeric or
/// non-finite fields, and when the number of positions and texture coordinates differ.
pub fn parse_mesh_attributes(content: &str) -> Result<MeshAttributes> {
    content
        .lines()
        .enumerate()
        .try_fold(MeshAccumulator::default(), |acc, (i, line)| {
            acc.consume(i + 1, line)
        })?
        .finish()
}
