// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Material texture cache for one building.
//!
//! Each material referenced by a vertex is decoded at most once. A material
//! whose image is absent or fails to decode is remembered as unavailable;
//! its vertices are later dropped by the grouping stage.

use image::RgbImage;
use roomscan_core::{MaterialId, MeshAttributes};
use std::path::Path;

/// Lookup of decoded material images.
pub trait MaterialSource {
    /// Decoded image of a material, `None` if it could not be loaded.
    fn image(&self, material: MaterialId) -> Option<&RgbImage>;
}

/// Images indexed by [`MaterialId`], loaded for a single building.
#[derive(Debug, Default)]
pub struct MaterialLibrary {
    images: Vec<Option<RgbImage>>,
}

impl MaterialLibrary {
    /// Build from pre-decoded images; position `i` is material `i`.
    pub fn from_images(images: Vec<Option<RgbImage>>) -> Self {
        Self { images }
    }

    /// Decode every material used by `mesh` from `NAME.<extension>` in `folder`.
    pub fn load(folder: &Path, mesh: &MeshAttributes, extension: &str) -> Self {
        let mut images: Vec<Option<RgbImage>> = vec![None; mesh.materials.len()];

        for id in mesh.used_materials() {
            let name = &mesh.materials[id.index()];
            let path = folder.join(format!("{}.{}", name, extension));
            images[id.index()] = load_image(&path);
        }

        Self { images }
    }

    /// Number of materials with a decoded image.
    pub fn loaded_count(&self) -> usize {
        self.images.iter().filter(|img| img.is_some()).count()
    }

    /// Number of material slots, loaded or not.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl MaterialSource for MaterialLibrary {
    fn image(&self, material: MaterialId) -> Option<&RgbImage> {
        self.images.get(material.index()).and_then(Option::as_ref)
    }
}

fn load_image(path: &Path) -> Option<RgbImage> {
    match image::open(path) {
        Ok(img) => {
            let rgb = img.to_rgb8();
            tracing::debug!(
                path = %path.display(),
                width = rgb.width(),
                height = rgb.height(),
                "Loaded material image"
            );
            Some(rgb)
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Material image unavailable, its vertices will be ignored"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use roomscan_core::parse_mesh_attributes;

    #[test]
    fn test_from_images_lookup() {
        let library = MaterialLibrary::from_images(vec![
            Some(RgbImage::from_pixel(1, 1, Rgb([1, 2, 3]))),
            None,
        ]);

        assert!(library.image(MaterialId(0)).is_some());
        assert!(library.image(MaterialId(1)).is_none());
        assert!(library.image(MaterialId(5)).is_none());
        assert_eq!(library.loaded_count(), 1);
        assert_eq!(library.len(), 2);
    }

    #[test]
    fn test_load_from_folder() {
        let dir = tempfile::tempdir().unwrap();
        RgbImage::from_pixel(2, 2, Rgb([255, 0, 0]))
            .save(dir.path().join("red.png"))
            .unwrap();
        std::fs::write(dir.path().join("broken.png"), b"not a png").unwrap();

        let mesh = parse_mesh_attributes(
            "usemtl red\nv 0 0 0\nusemtl broken\nv 1 1 1\nusemtl missing\nv 2 2 2\nusemtl unused\nvt 0 0\nvt 0 0\nvt 0 0\n",
        )
        .unwrap();
        let library = MaterialLibrary::load(dir.path(), &mesh, "png");

        assert_eq!(library.len(), 4);
        assert_eq!(library.loaded_count(), 1);
        assert_eq!(
            library.image(MaterialId(0)).map(|img| *img.get_pixel(0, 0)),
            Some(Rgb([255, 0, 0]))
        );
        assert!(library.image(MaterialId(1)).is_none());
        assert!(library.image(MaterialId(2)).is_none());
    }
}
