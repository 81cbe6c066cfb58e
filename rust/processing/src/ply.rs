// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ASCII PLY output for box wireframes (vertices + edges, no faces).

use crate::error::{Error, Result};
use roomscan_geometry::{box_to_wireframe, BoundingBox, Wireframe};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write a wireframe as ASCII PLY
pub fn write_ply<W: Write>(writer: &mut W, wireframe: &Wireframe) -> io::Result<()> {
    writeln!(writer, "ply")?;
    writeln!(writer, "format ascii 1.0")?;
    writeln!(writer, "element vertex {}", wireframe.vertex_count())?;
    writeln!(writer, "property float x")?;
    writeln!(writer, "property float y")?;
    writeln!(writer, "property float z")?;
    writeln!(writer, "element edge {}", wireframe.edge_count())?;
    writeln!(writer, "property int vertex1")?;
    writeln!(writer, "property int vertex2")?;
    writeln!(writer, "end_header")?;

    // Debug formatting keeps the decimal point on whole numbers ("1.0")
    for v in &wireframe.vertices {
        writeln!(writer, "{:?} {:?} {:?}", v.x, v.y, v.z)?;
    }
    for [a, b] in &wireframe.edges {
        writeln!(writer, "{} {}", a, b)?;
    }

    Ok(())
}

/// Write a wireframe to a PLY file
pub fn write_wireframe_file(path: &Path, wireframe: &Wireframe) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_ply(&mut writer, wireframe)
        .and_then(|_| writer.flush())
        .map_err(|e| Error::io(path, e))
}

/// Write a single box outline to a PLY file
pub fn write_box_ply(path: &Path, bbox: &BoundingBox) -> Result<()> {
    write_wireframe_file(path, &box_to_wireframe(bbox))
}

/// Write several box outlines into one PLY file
pub fn write_boxes_ply<'a, I>(path: &Path, boxes: I) -> Result<()>
where
    I: IntoIterator<Item = &'a BoundingBox>,
{
    let wireframe: Wireframe = boxes.into_iter().collect();
    write_wireframe_file(path, &wireframe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use roomscan_geometry::bounding_box_of;

    fn render(wireframe: &Wireframe) -> String {
        let mut buf = Vec::new();
        write_ply(&mut buf, wireframe).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn unit_box(offset: f64) -> BoundingBox {
        BoundingBox::from_corners(
            Point3::new(offset, offset, offset),
            Point3::new(offset + 1.0, offset + 1.0, offset + 1.0),
        )
        .unwrap()
    }

    /// Split a rendered file into (header, vertex lines, edge lines)
    fn sections(text: &str) -> (Vec<&str>, Vec<&str>, Vec<&str>) {
        let lines: Vec<&str> = text.lines().collect();
        let end = lines.iter().position(|l| *l == "end_header").unwrap();
        let vertex_count: usize = lines[2].trim_start_matches("element vertex ").parse().unwrap();
        let body = &lines[end + 1..];
        (
            lines[..=end].to_vec(),
            body[..vertex_count].to_vec(),
            body[vertex_count..].to_vec(),
        )
    }

    #[test]
    fn test_single_box_file() {
        let text = render(&box_to_wireframe(&unit_box(0.0)));
        let (header, vertices, edges) = sections(&text);

        assert_eq!(
            header,
            vec![
                "ply",
                "format ascii 1.0",
                "element vertex 8",
                "property float x",
                "property float y",
                "property float z",
                "element edge 12",
                "property int vertex1",
                "property int vertex2",
                "end_header",
            ]
        );
        assert_eq!(vertices.len(), 8);
        assert_eq!(edges.len(), 12);
        assert_eq!(vertices[0], "0.0 0.0 0.0");
        assert_eq!(vertices[1], "0.0 0.0 1.0");
        assert_eq!(vertices[7], "1.0 1.0 1.0");
        assert_eq!(edges[0], "0 1");
        assert_eq!(edges[11], "3 7");
    }

    #[test]
    fn test_multi_box_file_writes_every_edge() {
        let boxes = [unit_box(0.0), unit_box(5.0)];
        let wireframe: Wireframe = boxes.iter().collect();
        let text = render(&wireframe);
        let (header, vertices, edges) = sections(&text);

        assert_eq!(header[2], "element vertex 16");
        assert_eq!(header[6], "element edge 24");
        assert_eq!(vertices.len(), 16);
        assert_eq!(edges.len(), 24);
        // Second box's edges point into its own corners
        assert_eq!(edges[12], "8 9");
        assert_eq!(edges[23], "11 15");
    }

    #[test]
    fn test_corners_rebuild_boxes() {
        let boxes = [unit_box(-2.5), unit_box(3.0)];
        let text = render(&boxes.iter().collect());
        let (_, vertices, edges) = sections(&text);

        let points: Vec<Point3<f64>> = vertices
            .iter()
            .map(|line| {
                let v: Vec<f64> = line.split(' ').map(|t| t.parse().unwrap()).collect();
                Point3::new(v[0], v[1], v[2])
            })
            .collect();

        for (i, bbox) in boxes.iter().enumerate() {
            assert_eq!(bounding_box_of(&points[i * 8..(i + 1) * 8]), Some(*bbox));
        }
        for line in edges {
            for index in line.split(' ') {
                assert!(index.parse::<usize>().unwrap() < points.len());
            }
        }
    }

    #[test]
    fn test_empty_wireframe() {
        let text = render(&Wireframe::new());
        assert!(text.contains("element vertex 0"));
        assert!(text.contains("element edge 0"));
        assert!(text.ends_with("end_header\n"));
    }

    #[test]
    fn test_file_writers() {
        let dir = tempfile::tempdir().unwrap();
        let single = dir.path().join("one.ply");
        let many = dir.path().join("many.ply");

        write_box_ply(&single, &unit_box(0.0)).unwrap();
        write_boxes_ply(&many, &[unit_box(0.0), unit_box(1.0), unit_box(2.0)]).unwrap();

        let many_text = std::fs::read_to_string(&many).unwrap();
        assert!(std::fs::read_to_string(&single).unwrap().contains("element edge 12"));
        assert!(many_text.contains("element vertex 24"));
        assert!(many_text.contains("element edge 36"));
    }
}
