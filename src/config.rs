use std::path::PathBuf;

use clap::Parser;

use crate::mesh::{SceneOptions, DEFAULT_TEXTURED_MATERIAL};
use crate::texture::TextureImage;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Software scanline rasterizer", long_about = None)]
pub struct Config {
    /// Path to the input OBJ file
    #[arg(long, default_value = "models/textured-cornell-box.obj")]
    pub obj: PathBuf,

    /// Texture sampled by faces of the textured material
    #[arg(long, default_value = "models/texture.ppm")]
    pub texture: PathBuf,

    /// Render without loading a texture
    #[arg(long, default_value_t = false)]
    pub no_texture: bool,

    /// Width of the window and output image
    #[arg(long, default_value_t = 640, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Height of the window and output image
    #[arg(long, default_value_t = 480, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Uniform scale applied to every vertex
    #[arg(long, default_value_t = 1.0)]
    pub scale: f32,

    /// Camera focal length
    #[arg(long, default_value_t = 2.0)]
    pub focal_length: f32,

    /// Name of the material drawn with the texture
    #[arg(long, default_value = DEFAULT_TEXTURED_MATERIAL)]
    pub textured_material: String,

    /// Where saved frames are written (binary PPM)
    #[arg(short, long, default_value = "output.ppm")]
    pub output: PathBuf,

    /// Render a single frame to the output file without opening a window
    #[arg(long, default_value_t = false)]
    pub headless: bool,

    /// Keep the camera orientation instead of re-aiming at the origin every frame
    #[arg(long, default_value_t = false)]
    pub free_look: bool,
}

impl Config {
    /// Loader options; texture coordinates are scaled by the texture's size
    /// when one is loaded.
    pub fn scene_options(&self, texture: Option<&TextureImage>) -> SceneOptions {
        let defaults = SceneOptions::default();
        SceneOptions {
            scale: self.scale,
            texture_extent: texture
                .map(|t| (t.width() as f32, t.height() as f32))
                .unwrap_or(defaults.texture_extent),
            textured_material: self.textured_material.clone(),
        }
    }
}
