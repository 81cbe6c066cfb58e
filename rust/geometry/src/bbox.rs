// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned bounding boxes

use crate::error::{Error, Result};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Serialized form: `[[min_x, min_y, min_z], [max_x, max_y, max_z]]`
type BoxCorners = ([f64; 3], [f64; 3]);

/// Axis-aligned bounding box with `min[k] <= max[k]` on every axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoxCorners", into = "BoxCorners")]
pub struct BoundingBox {
    min: Point3<f64>,
    max: Point3<f64>,
}

impl BoundingBox {
    /// Build a box from explicit corners, rejecting inverted axes
    pub fn from_corners(min: Point3<f64>, max: Point3<f64>) -> Result<Self> {
        for axis in 0..3 {
            // Negated so that NaN is rejected as well
            if !(min[axis] <= max[axis]) {
                return Err(Error::InvalidBox {
                    axis,
                    min: min[axis],
                    max: max[axis],
                });
            }
        }
        Ok(Self { min, max })
    }

    /// Per-axis min/max over a point set; `None` when the set is empty
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3<f64>>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;

        let (min, max) = iter.fold((first, first), |(mut min, mut max), p| {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
            (min, max)
        });

        Some(Self { min, max })
    }

    #[inline]
    pub fn min(&self) -> Point3<f64> {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Point3<f64> {
        self.max
    }

    /// The 8 corners; bit 2 of the index selects x, bit 1 y, bit 0 z (0 = min, 1 = max)
    pub fn corners(&self) -> [Point3<f64>; 8] {
        std::array::from_fn(|i| {
            Point3::new(
                if i & 0b100 == 0 { self.min.x } else { self.max.x },
                if i & 0b010 == 0 { self.min.y } else { self.max.y },
                if i & 0b001 == 0 { self.min.z } else { self.max.z },
            )
        })
    }

    pub fn contains(&self, point: &Point3<f64>) -> bool {
        (0..3).all(|axis| self.min[axis] <= point[axis] && point[axis] <= self.max[axis])
    }
}

impl TryFrom<BoxCorners> for BoundingBox {
    type Error = Error;

    fn try_from((min, max): BoxCorners) -> Result<Self> {
        Self::from_corners(Point3::from(min), Point3::from(max))
    }
}

impl From<BoundingBox> for BoxCorners {
    fn from(bbox: BoundingBox) -> Self {
        (
            [bbox.min.x, bbox.min.y, bbox.min.z],
            [bbox.max.x, bbox.max.y, bbox.max.z],
        )
    }
}

/// Bounding box of a point set; `None` for an empty set
pub fn bounding_box_of(points: &[Point3<f64>]) -> Option<BoundingBox> {
    BoundingBox::from_points(points)
}
