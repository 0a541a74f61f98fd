//! Auxiliary ("special") surface specification.

use crate::error::DefError;
use std::io::{Read, Write};
use voxdef_core::wire;

/// A texture name plus backface-culling flag for one auxiliary surface.
///
/// Carries no version byte of its own; it is only ever embedded inside a
/// versioned parent record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceSpec {
    /// Texture name, empty when the surface slot is unused.
    pub texture: String,
    /// Whether backfaces of this surface are culled.
    pub backface_culling: bool,
}

impl Default for SurfaceSpec {
    fn default() -> Self {
        Self {
            texture: String::new(),
            backface_culling: true,
        }
    }
}

impl SurfaceSpec {
    /// Build a spec from a texture name and culling flag.
    pub fn new(texture: impl Into<String>, backface_culling: bool) -> Self {
        Self {
            texture: texture.into(),
            backface_culling,
        }
    }

    /// Serialize as a length-prefixed name plus one flag byte.
    pub fn serialize<W: Write>(&self, w: &mut W) -> Result<(), DefError> {
        wire::write_string16(w, &self.texture)?;
        wire::write_bool(w, self.backface_culling)?;
        Ok(())
    }

    /// Deserialize the name/flag pair.
    pub fn deserialize<R: Read>(r: &mut R) -> Result<Self, DefError> {
        let texture = wire::read_string16(r)?;
        let backface_culling = wire::read_bool(r)?;
        Ok(Self {
            texture,
            backface_culling,
        })
    }
}
