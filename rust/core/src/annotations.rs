// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Semantic annotation table parsing
//!
//! The table has a header line followed by one row per semantic instance:
//!
//! ```text
//! object_id,hex_color,"object_name",room_id
//! 1,2A5E1F,"chair",0
//! ```

use crate::color::ColorKey;
use crate::error::{Error, Result};
use rustc_hash::FxHashMap;

const FIELD_COUNT: usize = 4;

/// One annotated semantic instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRecord {
    pub object_id: String,
    pub hex_color: ColorKey,
    pub object_name: String,
    pub room_id: String,
}

/// All annotation records of one room, in file order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomAnnotations {
    pub room_id: String,
    pub records: Vec<AnnotationRecord>,
}

/// Annotation records grouped by room, rooms ordered by first appearance
#[derive(Debug, Clone, Default)]
pub struct AnnotationTable {
    rooms: Vec<RoomAnnotations>,
    index: FxHashMap<String, usize>,
}

impl AnnotationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: AnnotationRecord) {
        match self.index.get(&record.room_id) {
            Some(&slot) => self.rooms[slot].records.push(record),
            None => {
                self.index.insert(record.room_id.clone(), self.rooms.len());
                self.rooms.push(RoomAnnotations {
                    room_id: record.room_id.clone(),
                    records: vec![record],
                });
            }
        }
    }

    pub fn rooms(&self) -> &[RoomAnnotations] {
        &self.rooms
    }

    pub fn room(&self, room_id: &str) -> Option<&RoomAnnotations> {
        self.index.get(room_id).map(|&slot| &self.rooms[slot])
    }

    /// Number of distinct rooms
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.rooms.iter().map(|r| r.records.len()).sum()
    }
}

impl FromIterator<AnnotationRecord> for AnnotationTable {
    fn from_iter<I: IntoIterator<Item = AnnotationRecord>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |mut table, record| {
            table.push(record);
            table
        })
    }
}

/// Split a row on commas that are not inside double quotes
fn split_row(row: &str) -> Vec<&str> {
    let mut fields = Vec::with_capacity(FIELD_COUNT);
    let mut in_quotes = false;
    let mut start = 0;

    for (i, b) in row.bytes().enumerate() {
        match b {
            b'"' => in_quotes = !in_quotes,
            b',' if !in_quotes => {
                fields.push(row[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    fields.push(row[start..].trim());

    fields
}

/// Strip exactly one layer of surrounding double quotes
fn unquote(field: &str) -> &str {
    field
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(field)
}

fn parse_row(line_no: usize, row: &str) -> Result<AnnotationRecord> {
    let fields = split_row(row);
    if fields.len() != FIELD_COUNT {
        return Err(Error::malformed(
            line_no,
            format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
        ));
    }

    let hex_color = ColorKey::parse_hex(fields[1])
        .map_err(|e| Error::malformed(line_no, e.to_string()))?;

    Ok(AnnotationRecord {
        object_id: fields[0].to_string(),
        hex_color,
        object_name: unquote(fields[2]).to_string(),
        room_id: fields[3].to_string(),
    })
}

/// Parse an annotation table, discarding the header line
///
/// Blank lines are skipped. A row with the wrong number of fields or an
/// invalid colour fails with the 1-based line number.
pub fn parse_annotations(content: &str) -> Result<AnnotationTable> {
    let records = content
        .lines()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_row(i + 1, line.trim()))
        .collect::<Result<Vec<_>>>()?;

    Ok(records.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
HM3D Semantic Annotations
1,FF0000,\"chair\",0
2,00ff00,\"table\",0
3,0000FF,\"bed\",1
4,ABCDEF,\"lamp\",0
";

    #[test]
    fn test_parse_groups_by_room() {
        let table = parse_annotations(TABLE).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.record_count(), 4);

        let ids: Vec<_> = table.rooms().iter().map(|r| r.room_id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1"]);

        let room0: Vec<_> = table
            .room("0")
            .unwrap()
            .records
            .iter()
            .map(|r| r.object_name.as_str())
            .collect();
        assert_eq!(room0, vec!["chair", "table", "lamp"]);
    }

    #[test]
    fn test_colour_is_case_insensitive() {
        let table = parse_annotations(TABLE).unwrap();
        let table_record = &table.room("0").unwrap().records[1];
        assert_eq!(table_record.hex_color, ColorKey::from_rgb(0, 0xFF, 0));
    }

    #[test]
    fn test_strips_one_layer_of_quotes() {
        let table = parse_annotations("header\n7,FF0000,\"\"quoted\"\",2\n").unwrap();
        assert_eq!(table.rooms()[0].records[0].object_name, "\"quoted\"");
    }

    #[test]
    fn test_unquoted_name() {
        let table = parse_annotations("header\n7,FF0000,sofa,2\n").unwrap();
        assert_eq!(table.rooms()[0].records[0].object_name, "sofa");
    }

    #[test]
    fn test_comma_inside_quotes() {
        let table = parse_annotations("header\n7,FF0000,\"chair, office\",2\n").unwrap();
        let record = &table.rooms()[0].records[0];
        assert_eq!(record.object_name, "chair, office");
        assert_eq!(record.room_id, "2");
    }

    #[test]
    fn test_header_only_and_blank_lines() {
        assert!(parse_annotations("header\n").unwrap().is_empty());
        assert!(parse_annotations("").unwrap().is_empty());

        let table = parse_annotations("header\n\n1,FF0000,\"a\",0\n\r\n").unwrap();
        assert_eq!(table.record_count(), 1);
    }

    #[test]
    fn test_crlf_line_endings() {
        let table = parse_annotations("header\r\n1,FF0000,\"a\",0\r\n").unwrap();
        assert_eq!(table.rooms()[0].room_id, "0");
    }

    #[test]
    fn test_wrong_field_count_reports_line() {
        let err = parse_annotations("header\n1,FF0000,\"a\",0\n2,00FF00,\"b\"\n").unwrap_err();
        assert_eq!(err.line(), Some(3));
        assert!(err.to_string().contains("expected 4 fields, found 3"));
    }

    #[test]
    fn test_invalid_colour_reports_line() {
        let err = parse_annotations("header\n1,XYZ,\"a\",0\n").unwrap_err();
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_duplicate_object_ids_are_kept() {
        let table = parse_annotations("header\n1,FF0000,\"a\",0\n1,00FF00,\"b\",0\n").unwrap();
        assert_eq!(table.room("0").unwrap().records.len(), 2);
    }
}
