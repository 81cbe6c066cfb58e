// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Colour grouping: bucket vertex positions by sampled texture colour.

use crate::materials::MaterialSource;
use nalgebra::Point3;
use roomscan_core::{ColorKey, MeshAttributes};
use roomscan_geometry::sample_color;
use rustc_hash::FxHashMap;

/// Vertex positions per sampled colour, each bucket in mesh order.
#[derive(Debug, Clone, Default)]
pub struct ColorBuckets {
    buckets: FxHashMap<ColorKey, Vec<Point3<f64>>>,
}

impl ColorBuckets {
    pub fn get(&self, key: ColorKey) -> Option<&[Point3<f64>]> {
        self.buckets.get(&key).map(Vec::as_slice)
    }

    pub fn insert(&mut self, key: ColorKey, position: Point3<f64>) {
        self.buckets.entry(key).or_default().push(position);
    }

    /// Number of distinct colours
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = ColorKey> + '_ {
        self.buckets.keys().copied()
    }
}

/// Counts of vertices kept and dropped while grouping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupingStats {
    pub grouped: usize,
    /// No material, or material image unavailable
    pub missing_material: usize,
    /// Texture coordinate outside the sampled image
    pub out_of_range: usize,
}

/// Sample every vertex's colour and bucket its position under that colour.
///
/// Vertices whose material image is unavailable, or whose texture
/// coordinate cannot be sampled, join no bucket.
pub fn group_by_color<M>(mesh: &MeshAttributes, materials: &M) -> (ColorBuckets, GroupingStats)
where
    M: MaterialSource + ?Sized,
{
    mesh.vertices.iter().fold(
        (ColorBuckets::default(), GroupingStats::default()),
        |(mut buckets, mut stats), vertex| {
            let Some(image) = vertex.material.and_then(|id| materials.image(id)) else {
                stats.missing_material += 1;
                return (buckets, stats);
            };

            match sample_color(vertex.tex_coord, image) {
                Ok(key) => {
                    buckets.insert(key, vertex.position);
                    stats.grouped += 1;
                }
                Err(_) => stats.out_of_range += 1,
            }

            (buckets, stats)
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::MaterialLibrary;
    use image::{Rgb, RgbImage};
    use roomscan_core::parse_mesh_attributes;

    /// 2x1 texture: left half red, right half blue
    fn split_texture() -> RgbImage {
        RgbImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 0, 255])
            }
        })
    }

    const RED: ColorKey = ColorKey::from_rgb(255, 0, 0);
    const BLUE: ColorKey = ColorKey::from_rgb(0, 0, 255);

    #[test]
    fn test_groups_by_sampled_colour() {
        let mesh = parse_mesh_attributes(
            "usemtl tex\nv 0 0 0\nv 1 0 0\nv 2 0 0\nvt 0.1 0.5\nvt 0.9 0.5\nvt 0.2 0.5\n",
        )
        .unwrap();
        let library = MaterialLibrary::from_images(vec![Some(split_texture())]);

        let (buckets, stats) = group_by_color(&mesh, &library);

        assert_eq!(buckets.len(), 2);
        assert_eq!(
            buckets.get(RED).unwrap(),
            &[Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)]
        );
        assert_eq!(buckets.get(BLUE).unwrap(), &[Point3::new(1.0, 0.0, 0.0)]);
        assert_eq!(stats.grouped, 3);
        assert_eq!(buckets.vertex_count(), 3);
    }

    #[test]
    fn test_missing_material_drops_vertices() {
        let mesh = parse_mesh_attributes(
            "v 9 9 9\nusemtl ok\nv 0 0 0\nusemtl gone\nv 5 5 5\nvt 0 0\nvt 0 0\nvt 0 0\n",
        )
        .unwrap();
        let library = MaterialLibrary::from_images(vec![Some(split_texture()), None]);

        let (buckets, stats) = group_by_color(&mesh, &library);

        assert_eq!(buckets.get(RED).unwrap(), &[Point3::new(0.0, 0.0, 0.0)]);
        assert_eq!(
            stats,
            GroupingStats {
                grouped: 1,
                missing_material: 2,
                out_of_range: 0
            }
        );
    }

    #[test]
    fn test_out_of_range_drops_vertex() {
        let mesh = parse_mesh_attributes("usemtl tex\nv 0 0 0\nv 1 1 1\nvt 3.0 0.5\nvt 0 0.5\n").unwrap();
        let library = MaterialLibrary::from_images(vec![Some(split_texture())]);

        let (buckets, stats) = group_by_color(&mesh, &library);

        assert_eq!(stats.out_of_range, 1);
        assert_eq!(buckets.get(RED).unwrap(), &[Point3::new(1.0, 1.0, 1.0)]);
    }

    #[test]
    fn test_unknown_colour_has_no_bucket() {
        let buckets = ColorBuckets::default();
        assert!(buckets.get(RED).is_none());
        assert!(buckets.is_empty());
    }
}
