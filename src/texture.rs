use std::fmt;
use std::path::Path;

/// Errors produced while building a [`TextureImage`].
#[derive(Debug)]
pub enum TextureError {
    Image(image::ImageError),
    Empty,
    SizeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Image(e) => write!(f, "failed to read texture: {e}"),
            TextureError::Empty => write!(f, "texture has zero width or height"),
            TextureError::SizeMismatch { expected, actual } => write!(
                f,
                "texture pixel buffer holds {actual} pixels, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for TextureError {
    fn from(e: image::ImageError) -> Self {
        TextureError::Image(e)
    }
}

/// A read-only texture addressed in pixel units.
///
/// Texture coordinates carried by screen points are already in pixel space
/// (the loader scales them by the texture extent), so sampling is a plain
/// nearest-neighbor lookup at `round(v) * width + round(u)`.
#[derive(Debug, Clone)]
pub struct TextureImage {
    data: Vec<u32>, // Packed ARGB, row-major.
    width: u32,
    height: u32,
}

impl TextureImage {
    /// Load a texture from an image file (PPM, PNG, JPG, ...).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let img = image::open(path)?.to_rgb8();
        let (width, height) = img.dimensions();

        let data: Vec<u32> = img
            .pixels()
            .map(|p| {
                let [r, g, b] = p.0;
                crate::colors::pack_rgb(r, g, b)
            })
            .collect();

        Self::from_pixels(width, height, data)
    }

    /// Wrap an existing packed pixel buffer of `width * height` entries.
    pub fn from_pixels(width: u32, height: u32, data: Vec<u32>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty);
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(TextureError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// A texture filled with a single color.
    pub fn solid(width: u32, height: u32, color: u32) -> Result<Self, TextureError> {
        Self::from_pixels(width, height, vec![color; width as usize * height as usize])
    }

    /// Sample the texture at pixel coordinates using nearest-neighbor filtering.
    ///
    /// Coordinates outside the image are clamped to its edge.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> u32 {
        let x = clamp_to_extent(u, self.width);
        let y = clamp_to_extent(v, self.height);
        self.data[y * self.width as usize + x]
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.data[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

#[inline]
fn clamp_to_extent(coord: f32, extent: u32) -> usize {
    // NaN maps to 0 through the saturating cast.
    (coord.round().max(0.0) as usize).min(extent as usize - 1)
}
