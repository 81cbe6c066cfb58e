// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hierarchy builder: join annotations with colour buckets.
//!
//! Objects get the box of the vertices sampled with their colour. Rooms get
//! the box of the union of their objects' vertices, recomputed from the
//! buckets rather than merged from the object boxes.

use crate::grouping::ColorBuckets;
use crate::structure::{Building, Room, RoomObject};
use roomscan_core::{AnnotationTable, ColorKey, RoomAnnotations};
use roomscan_geometry::BoundingBox;

/// An annotated object whose colour was never sampled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedObject {
    pub room_id: String,
    pub object_id: String,
    pub hex_color: ColorKey,
}

/// The built hierarchy plus what had to be left out of it
#[derive(Debug, Clone)]
pub struct HierarchyReport {
    pub building: Building,
    pub skipped_objects: Vec<SkippedObject>,
    /// Rooms none of whose objects resolved to any vertex
    pub skipped_rooms: Vec<String>,
}

/// Build the building → room → object hierarchy
pub fn build_hierarchy(
    building_name: &str,
    annotations: &AnnotationTable,
    buckets: &ColorBuckets,
) -> HierarchyReport {
    let mut rooms = Vec::with_capacity(annotations.len());
    let mut skipped_objects = Vec::new();
    let mut skipped_rooms = Vec::new();

    for room in annotations.rooms() {
        let (objects, missing) = resolve_objects(room, buckets);
        skipped_objects.extend(missing);

        match room_bounding_box(&objects, buckets) {
            Some(room_bounding_box) => rooms.push(Room {
                room_id: room.room_id.clone(),
                room_bounding_box,
                objects,
            }),
            None => skipped_rooms.push(room.room_id.clone()),
        }
    }

    HierarchyReport {
        building: Building::new(building_name, rooms),
        skipped_objects,
        skipped_rooms,
    }
}

/// Object pass: one object per record whose colour has vertices
fn resolve_objects(
    room: &RoomAnnotations,
    buckets: &ColorBuckets,
) -> (Vec<RoomObject>, Vec<SkippedObject>) {
    let mut objects = Vec::with_capacity(room.records.len());
    let mut missing = Vec::new();

    for record in &room.records {
        let bbox = buckets
            .get(record.hex_color)
            .and_then(BoundingBox::from_points);

        match bbox {
            Some(bounding_box) => objects.push(RoomObject {
                object_id: record.object_id.clone(),
                object_name: record.object_name.clone(),
                hex_color: record.hex_color,
                bounding_box,
            }),
            None => missing.push(SkippedObject {
                room_id: room.room_id.clone(),
                object_id: record.object_id.clone(),
                hex_color: record.hex_color,
            }),
        }
    }

    (objects, missing)
}

/// Room pass: box over every vertex of every included object
fn room_bounding_box(objects: &[RoomObject], buckets: &ColorBuckets) -> Option<BoundingBox> {
    BoundingBox::from_points(
        objects
            .iter()
            .filter_map(|object| buckets.get(object.hex_color))
            .flatten(),
    )
}
