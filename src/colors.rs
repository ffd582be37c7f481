//! Material colors and packed ARGB8888 helpers.
//!
//! A [`Color`] doubles as the material of a mesh face: besides its RGB channels it
//! carries the material name it was loaded under and a [`MaterialKind`] tag that
//! tells the frame renderer whether to fill the face with the color or to sample
//! the scene texture.

use std::fmt;

/// Cleared color buffer.
pub const BACKGROUND: u32 = 0xFF000000;
/// Outline drawn around filled and textured triangles when requested.
pub const OUTLINE: u32 = 0xFFFFFFFF;

/// How faces using a material are rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaterialKind {
    /// Solid fill with the material color.
    #[default]
    Flat,
    /// Affine texture mapping from the scene texture.
    Textured,
}

/// An immutable named RGB color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color {
    name: String,
    red: u8,
    green: u8,
    blue: u8,
    kind: MaterialKind,
}

impl Color {
    /// Unnamed flat color.
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::named("", red, green, blue)
    }

    pub fn named(name: impl Into<String>, red: u8, green: u8, blue: u8) -> Self {
        Self {
            name: name.into(),
            red,
            green,
            blue,
            kind: MaterialKind::Flat,
        }
    }

    /// Same color with a different material kind.
    pub fn with_kind(self, kind: MaterialKind) -> Self {
        Self { kind, ..self }
    }

    /// Unpacks an ARGB8888 value, ignoring alpha.
    pub fn from_packed(argb: u32) -> Self {
        Self::rgb((argb >> 16) as u8, (argb >> 8) as u8, argb as u8)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn red(&self) -> u8 {
        self.red
    }

    pub fn green(&self) -> u8 {
        self.green
    }

    pub fn blue(&self) -> u8 {
        self.blue
    }

    pub fn kind(&self) -> MaterialKind {
        self.kind
    }

    /// Packs the color as opaque ARGB8888.
    #[inline]
    pub fn pack(&self) -> u32 {
        pack_rgb(self.red, self.green, self.blue)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(255, 255, 255)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "[{}, {}, {}]", self.red, self.green, self.blue)
        } else {
            write!(
                f,
                "{} [{}, {}, {}]",
                self.name, self.red, self.green, self.blue
            )
        }
    }
}

#[inline]
pub fn pack_rgb(red: u8, green: u8, blue: u8) -> u32 {
    (255 << 24) | ((red as u32) << 16) | ((green as u32) << 8) | blue as u32
}

/// Splits an ARGB8888 value into its RGB bytes.
#[inline]
pub fn unpack_rgb(argb: u32) -> [u8; 3] {
    [(argb >> 16) as u8, (argb >> 8) as u8, argb as u8]
}
