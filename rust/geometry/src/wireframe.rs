// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Box outlines as point-and-edge meshes

use crate::bbox::BoundingBox;
use nalgebra::Point3;

/// Edges of one box, indexing [`BoundingBox::corners`]
///
/// Four edges on the `x = min` face, four on the `x = max` face, then the
/// four edges running along x.
#[rustfmt::skip]
pub const BOX_EDGES: [[u32; 2]; 12] = [
    [0, 1], [1, 3], [3, 2], [2, 0],
    [4, 5], [5, 7], [7, 6], [6, 4],
    [0, 4], [1, 5], [2, 6], [3, 7],
];

/// Corners per box
pub const BOX_VERTEX_COUNT: usize = 8;

/// Point-and-edge mesh; edge indices are 0-based into `vertices`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wireframe {
    pub vertices: Vec<Point3<f64>>,
    pub edges: Vec<[u32; 2]>,
}

impl Wireframe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one box, offsetting its edges by the current vertex count
    pub fn push_box(&mut self, bbox: &BoundingBox) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&bbox.corners());
        self.edges
            .extend(BOX_EDGES.iter().map(|[a, b]| [a + offset, b + offset]));
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl<'a> FromIterator<&'a BoundingBox> for Wireframe {
    fn from_iter<I: IntoIterator<Item = &'a BoundingBox>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |mut wireframe, bbox| {
            wireframe.push_box(bbox);
            wireframe
        })
    }
}

/// Outline of a single box: 8 corners and 12 edges
pub fn box_to_wireframe(bbox: &BoundingBox) -> Wireframe {
    let mut wireframe = Wireframe::new();
    wireframe.push_box(bbox);
    wireframe
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbox::bounding_box_of;

    fn sample_box(offset: f64) -> BoundingBox {
        BoundingBox::from_corners(
            Point3::new(offset, offset - 1.0, 0.5),
            Point3::new(offset + 2.0, offset + 3.0, 4.5),
        )
        .unwrap()
    }

    #[test]
    fn test_single_box_counts() {
        let wireframe = box_to_wireframe(&sample_box(0.0));
        assert_eq!(wireframe.vertex_count(), 8);
        assert_eq!(wireframe.edge_count(), 12);
    }

    #[test]
    fn test_edges_change_exactly_one_axis() {
        let wireframe = box_to_wireframe(&sample_box(1.0));
        for [a, b] in &wireframe.edges {
            let pa = wireframe.vertices[*a as usize];
            let pb = wireframe.vertices[*b as usize];
            let differing = (0..3).filter(|&k| pa[k] != pb[k]).count();
            assert_eq!(differing, 1, "edge {}-{} is not axis-aligned", a, b);
        }
    }

    #[test]
    fn test_every_corner_has_three_edges() {
        let wireframe = box_to_wireframe(&sample_box(0.0));
        let mut degree = [0; 8];
        for [a, b] in &wireframe.edges {
            degree[*a as usize] += 1;
            degree[*b as usize] += 1;
        }
        assert_eq!(degree, [3; 8]);
    }

    #[test]
    fn test_box_round_trip() {
        let bbox = sample_box(-3.25);
        let wireframe = box_to_wireframe(&bbox);
        assert_eq!(bounding_box_of(&wireframe.vertices), Some(bbox));
    }

    #[test]
    fn test_wireframe_is_pure() {
        let bbox = sample_box(7.0);
        assert_eq!(box_to_wireframe(&bbox), box_to_wireframe(&bbox));
    }

    #[test]
    fn test_multiple_boxes_are_offset() {
        let boxes = [sample_box(0.0), sample_box(10.0), sample_box(20.0)];
        let wireframe: Wireframe = boxes.iter().collect();

        assert_eq!(wireframe.vertex_count(), 24);
        assert_eq!(wireframe.edge_count(), 36);

        // Every box keeps its own edge list, shifted by 8 per box
        for (i, chunk) in wireframe.edges.chunks(12).enumerate() {
            let offset = (i * BOX_VERTEX_COUNT) as u32;
            for (edge, local) in chunk.iter().zip(BOX_EDGES.iter()) {
                assert_eq!(*edge, [local[0] + offset, local[1] + offset]);
            }
        }

        // Each box's corners rebuild that box
        for (i, bbox) in boxes.iter().enumerate() {
            let corners = &wireframe.vertices[i * 8..(i + 1) * 8];
            assert_eq!(bounding_box_of(corners), Some(*bbox));
        }
    }
}
