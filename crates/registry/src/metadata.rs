//! Optional per-descriptor metadata templates.

use crate::error::DefError;
use std::io::{Read, Write};
use voxdef_core::wire;

/// Opaque handle to game services.
///
/// Threaded through deserialization so metadata factories can reach item
/// definitions and similar context without global state. The registry
/// itself never looks inside it.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameContext;

/// An owned metadata record template stamped onto newly placed content.
///
/// The body is an opaque payload preserved verbatim; the type id selects
/// which metadata factory interprets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataTemplate {
    /// Which metadata kind the body encodes.
    pub type_id: u16,
    /// Raw payload bytes, interpreted by the owning metadata kind.
    pub body: Vec<u8>,
}

impl MetadataTemplate {
    /// Build a template from a type id and raw body bytes.
    pub fn new(type_id: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            type_id,
            body: body.into(),
        }
    }

    /// Serialize as the type id followed by the length-framed body.
    pub fn serialize<W: Write>(&self, w: &mut W) -> Result<(), DefError> {
        wire::write_u16(w, self.type_id)?;
        wire::write_bytes16(w, &self.body)?;
        Ok(())
    }

    /// Factory: decode a template from the stream.
    ///
    /// The context handle is reserved for metadata kinds that need game
    /// services to reconstruct themselves.
    pub fn deserialize<R: Read>(r: &mut R, _ctx: &GameContext) -> Result<Self, DefError> {
        let type_id = wire::read_u16(r)?;
        let body = wire::read_bytes16(r)?;
        Ok(Self { type_id, body })
    }
}
