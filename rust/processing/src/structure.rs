// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building structure: the building → rooms → objects hierarchy and its
//! JSON interchange form.
//!
//! ```json
//! {
//!     "building_name": "HkseAnWCgqk",
//!     "number_of_rooms": 1,
//!     "rooms": [
//!         {
//!             "room_id": "0",
//!             "room_bounding_box": [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]],
//!             "objects": [
//!                 {
//!                     "object_id": "1",
//!                     "object_name": "chair",
//!                     "hex_color": "FF0000",
//!                     "bounding_box": [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]
//!                 }
//!             ]
//!         }
//!     ]
//! }
//! ```

use crate::error::{Error, Result};
use roomscan_core::ColorKey;
use roomscan_geometry::{BoundingBox, Wireframe};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// One annotated object with the box of its colour's vertices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomObject {
    pub object_id: String,
    pub object_name: String,
    pub hex_color: ColorKey,
    pub bounding_box: BoundingBox,
}

/// A room with the box of all its objects' vertices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub room_id: String,
    pub room_bounding_box: BoundingBox,
    pub objects: Vec<RoomObject>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub building_name: String,
    pub number_of_rooms: usize,
    pub rooms: Vec<Room>,
}

impl Building {
    pub fn new(building_name: impl Into<String>, rooms: Vec<Room>) -> Self {
        Self {
            building_name: building_name.into(),
            number_of_rooms: rooms.len(),
            rooms,
        }
    }

    pub fn object_count(&self) -> usize {
        self.rooms.iter().map(|r| r.objects.len()).sum()
    }

    pub fn room_boxes(&self) -> impl Iterator<Item = &BoundingBox> {
        self.rooms.iter().map(|r| &r.room_bounding_box)
    }

    /// Object boxes, room by room
    pub fn object_boxes(&self) -> impl Iterator<Item = &BoundingBox> {
        self.rooms
            .iter()
            .flat_map(|r| r.objects.iter().map(|o| &o.bounding_box))
    }

    /// All room boxes as one wireframe
    pub fn room_wireframe(&self) -> Wireframe {
        self.room_boxes().collect()
    }

    /// All object boxes as one wireframe
    pub fn object_wireframe(&self) -> Wireframe {
        self.object_boxes().collect()
    }

    /// Pretty JSON with 4-space indentation
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        self.write_json(&mut buf)?;
        // serde_json only emits UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    fn write_json<W: Write>(&self, writer: W) -> serde_json::Result<()> {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        self.serialize(&mut serializer)
    }
}

/// Write a building structure file
pub fn write_building(path: &Path, building: &Building) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = BufWriter::new(file);
    building.write_json(&mut writer).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(|e| Error::io(path, e))
}

/// Read a building structure file
pub fn read_building(path: &Path) -> Result<Building> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}
