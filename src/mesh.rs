//! Object-space triangles and the OBJ/MTL loader that produces them.
//!
//! Faces are triangulated by tobj. Each face gets the [`Color`] of the material
//! it was declared under (`Kd * 255`, truncated); faces outside any material are
//! white. Texture coordinates are scaled into texture-pixel space by the texture
//! extent and rounded, and faces without texture indices carry none.

use std::fmt;
use std::io::{self, BufRead, Read};
use std::path::Path;

use log::{debug, info, warn};

use crate::colors::{Color, MaterialKind};
use crate::math::vec3::Vec3;
use crate::render::TexturePoint;

/// Default name of the material drawn with the scene texture.
pub const DEFAULT_TEXTURED_MATERIAL: &str = "Cobbles";

/// A triangle of a loaded mesh. Read-only during rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshTriangle {
    pub vertices: [Vec3; 3],
    pub color: Color,
    pub texture_points: Option<[TexturePoint; 3]>,
}

impl MeshTriangle {
    pub fn new(vertices: [Vec3; 3], color: Color) -> Self {
        Self {
            vertices,
            color,
            texture_points: None,
        }
    }

    pub fn with_texture(self, texture_points: [TexturePoint; 3]) -> Self {
        Self {
            texture_points: Some(texture_points),
            ..self
        }
    }
}

#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),
    Obj(tobj::LoadError),
    VertexIndex { mesh: String, index: u32 },
    TexcoordIndex { mesh: String, index: u32 },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "failed to read OBJ: {e}"),
            LoadError::Obj(e) => write!(f, "failed to load OBJ: {e}"),
            LoadError::VertexIndex { mesh, index } => {
                write!(f, "mesh '{mesh}' references missing vertex {index}")
            }
            LoadError::TexcoordIndex { mesh, index } => {
                write!(f, "mesh '{mesh}' references missing texture coordinate {index}")
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Obj(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<tobj::LoadError> for LoadError {
    fn from(e: tobj::LoadError) -> Self {
        LoadError::Obj(e)
    }
}

/// How OBJ data is turned into mesh triangles.
#[derive(Debug, Clone)]
pub struct SceneOptions {
    /// Uniform scale applied to every vertex position.
    pub scale: f32,
    /// Width and height the normalized texture coordinates are scaled by.
    pub texture_extent: (f32, f32),
    /// Material whose faces are drawn textured.
    pub textured_material: String,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            texture_extent: (480.0, 395.0),
            textured_material: DEFAULT_TEXTURED_MATERIAL.to_string(),
        }
    }
}

fn tobj_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: false,
        ..Default::default()
    }
}

/// Load every face of an OBJ file. `mtllib` paths resolve next to the file.
pub fn load_obj<P: AsRef<Path>>(path: P, options: &SceneOptions) -> Result<Vec<MeshTriangle>, LoadError> {
    let path = path.as_ref();
    info!("Loading OBJ file: {}", path.display());
    let source = std::fs::read_to_string(path)?;
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    let (models, materials) = tobj::load_obj_buf(&mut source.as_bytes(), &tobj_options(), |mtl| {
        tobj::load_mtl(dir.join(mtl))
    })?;
    let materials = materials.unwrap_or_else(|e| {
        warn!("No usable material library for {}: {e}", path.display());
        Vec::new()
    });
    triangles_from_models(&models, &materials, &face_texture_flags(&source), options)
}

/// Load faces from in-memory OBJ text, resolving any `mtllib` to `materials`.
pub fn load_obj_buf<R: BufRead>(
    reader: &mut R,
    materials: &str,
    options: &SceneOptions,
) -> Result<Vec<MeshTriangle>, LoadError> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    let (models, loaded) = tobj::load_obj_buf(&mut source.as_bytes(), &tobj_options(), |_| {
        tobj::load_mtl_buf(&mut materials.as_bytes())
    })?;
    let loaded = loaded.unwrap_or_else(|e| {
        warn!("Material library could not be parsed: {e}");
        Vec::new()
    });
    triangles_from_models(&models, &loaded, &face_texture_flags(&source), options)
}

/// Whether each triangle, in load order, comes from a face that names a texture
/// coordinate on every corner (`f 1/1 2/2 3/3` but not `f 1 2 3` or `f 1//1 ...`).
///
/// tobj substitutes indices for corners without one, so presence has to be read
/// from the face lines themselves. A polygon of `n` corners yields `n - 2` entries.
fn face_texture_flags(source: &str) -> Vec<bool> {
    let mut flags = Vec::new();
    for line in source.lines() {
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some("f") {
            continue;
        }
        let corners: Vec<&str> = tokens.collect();
        let textured = corners
            .iter()
            .all(|c| c.split('/').nth(1).is_some_and(|t| !t.is_empty()));
        flags.extend(std::iter::repeat(textured).take(corners.len().saturating_sub(2)));
    }
    flags
}

/// Resolve one tobj material to a face color, tagging the textured material.
fn material_color(material: &tobj::Material, options: &SceneOptions) -> Color {
    let [r, g, b] = material.diffuse.unwrap_or([1.0, 1.0, 1.0]);
    let color = Color::named(
        material.name.as_str(),
        (r * 255.0) as u8,
        (g * 255.0) as u8,
        (b * 255.0) as u8,
    );
    if material.name == options.textured_material {
        color.with_kind(MaterialKind::Textured)
    } else {
        color
    }
}

fn triangles_from_models(
    models: &[tobj::Model],
    materials: &[tobj::Material],
    textured_faces: &[bool],
    options: &SceneOptions,
) -> Result<Vec<MeshTriangle>, LoadError> {
    let face_count: usize = models.iter().map(|m| m.mesh.indices.len() / 3).sum();
    let textured_faces = if textured_faces.len() == face_count {
        textured_faces
    } else {
        warn!(
            "Found {} face entries for {face_count} triangles; trusting loader texture indices",
            textured_faces.len()
        );
        &[]
    };
    let palette: Vec<Color> = materials
        .iter()
        .map(|m| material_color(m, options))
        .collect();
    let (extent_u, extent_v) = options.texture_extent;
    let mut triangles = Vec::new();

    for model in models {
        let mesh = &model.mesh;
        let color = match mesh.material_id.and_then(|id| palette.get(id)) {
            Some(color) => color.clone(),
            None => {
                debug!("Mesh '{}' has no material, using white", model.name);
                Color::default()
            }
        };

        let vertex = |index: u32| -> Result<Vec3, LoadError> {
            let i = index as usize * 3;
            match mesh.positions.get(i..i + 3) {
                Some(p) => Ok(Vec3::new(p[0], p[1], p[2]) * options.scale),
                None => Err(LoadError::VertexIndex {
                    mesh: model.name.clone(),
                    index,
                }),
            }
        };
        let texcoord = |index: u32| -> Result<TexturePoint, LoadError> {
            let i = index as usize * 2;
            match mesh.texcoords.get(i..i + 2) {
                Some(t) => Ok(TexturePoint::new(
                    (t[0] * extent_u).round(),
                    (t[1] * extent_v).round(),
                )),
                None => Err(LoadError::TexcoordIndex {
                    mesh: model.name.clone(),
                    index,
                }),
            }
        };

        let has_texcoords = mesh.texcoord_indices.len() == mesh.indices.len();
        for (face, corners) in mesh.indices.chunks_exact(3).enumerate() {
            let vertices = [vertex(corners[0])?, vertex(corners[1])?, vertex(corners[2])?];
            let mut triangle = MeshTriangle::new(vertices, color.clone());
            let textured = textured_faces
                .get(triangles.len())
                .copied()
                .unwrap_or(has_texcoords);
            if textured && has_texcoords {
                let t = &mesh.texcoord_indices[face * 3..face * 3 + 3];
                triangle = triangle.with_texture([texcoord(t[0])?, texcoord(t[1])?, texcoord(t[2])?]);
            }
            triangles.push(triangle);
        }
    }

    info!(
        "Loaded {} triangles from {} meshes and {} materials",
        triangles.len(),
        models.len(),
        materials.len()
    );
    Ok(triangles)
}
