//! A loaded scene: every mesh triangle of one OBJ file plus the optional texture
//! shared by faces of the textured material.

use std::path::Path;

use log::warn;

use crate::colors::MaterialKind;
use crate::mesh::{self, LoadError, MeshTriangle, SceneOptions};
use crate::texture::TextureImage;

#[derive(Debug, Clone, Default)]
pub struct Scene {
    name: String,
    triangles: Vec<MeshTriangle>,
    texture: Option<TextureImage>,
}

impl Scene {
    pub fn new(name: impl Into<String>, triangles: Vec<MeshTriangle>) -> Self {
        Self {
            name: name.into(),
            triangles,
            texture: None,
        }
    }

    /// Load a scene from an OBJ file, named after the file stem.
    pub fn load<P: AsRef<Path>>(path: P, options: &SceneOptions) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let triangles = mesh::load_obj(path, options)?;
        Ok(Self::new(name, triangles))
    }

    /// Attach the texture sampled by textured faces.
    pub fn with_texture(mut self, texture: TextureImage) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn triangles(&self) -> &[MeshTriangle] {
        &self.triangles
    }

    pub fn texture(&self) -> Option<&TextureImage> {
        self.texture.as_ref()
    }

    pub fn textured_faces(&self) -> usize {
        self.triangles
            .iter()
            .filter(|t| t.color.kind() == MaterialKind::Textured)
            .count()
    }

    /// Warns when textured faces exist but nothing can be sampled for them.
    /// Returns true when the scene is consistent.
    pub fn check_texture(&self) -> bool {
        let textured = self.textured_faces();
        if textured > 0 && self.texture.is_none() {
            warn!(
                "Scene '{}' has {textured} textured faces but no texture; they will be filled flat",
                self.name
            );
            return false;
        }
        true
    }
}
