//! Physical dig/material properties attached to a descriptor.
//!
//! The registry treats this record as opaque beyond serialize/deserialize
//! delegation; gameplay code interprets the fields.

use crate::error::DefError;
use std::io::{Read, Write};
use voxdef_core::wire;

/// Current material-properties serialization version.
const MATERIAL_VERSION: u8 = 0;

/// How digging time is derived for a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Diggability {
    /// Cannot be dug at all.
    NotDiggable = 0,
    /// Dig time derived from the material parameters and the tool.
    Normal = 1,
    /// Fixed dig time regardless of tool.
    Constant = 2,
}

impl Diggability {
    fn from_wire(value: u8) -> Result<Self, DefError> {
        match value {
            0 => Ok(Diggability::NotDiggable),
            1 => Ok(Diggability::Normal),
            2 => Ok(Diggability::Constant),
            _ => Err(DefError::InvalidTag {
                what: "diggability",
                value,
            }),
        }
    }
}

/// Physical material parameters, all fixed-point on the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialProperties {
    /// Dig-time derivation mode.
    pub diggability: Diggability,
    /// Dig time used by [`Diggability::Constant`], in seconds.
    pub constant_time: f32,
    /// Resistance to being lifted out of place.
    pub weight: f32,
    /// Susceptibility to cracking blows (picks).
    pub crackiness: f32,
    /// Susceptibility to crumbling (shovels).
    pub crumbliness: f32,
    /// Susceptibility to cutting (axes).
    pub cuttability: f32,
    /// How readily the material burns.
    pub flammability: f32,
}

impl Default for MaterialProperties {
    fn default() -> Self {
        Self {
            diggability: Diggability::Normal,
            constant_time: 0.5,
            weight: 0.0,
            crackiness: 0.0,
            crumbliness: 0.0,
            cuttability: 0.0,
            flammability: 0.0,
        }
    }
}

impl MaterialProperties {
    /// Serialize in the versioned fixed field order.
    pub fn serialize<W: Write>(&self, w: &mut W) -> Result<(), DefError> {
        wire::write_u8(w, MATERIAL_VERSION)?;
        wire::write_u8(w, self.diggability as u8)?;
        wire::write_f1000(w, self.constant_time)?;
        wire::write_f1000(w, self.weight)?;
        wire::write_f1000(w, self.crackiness)?;
        wire::write_f1000(w, self.crumbliness)?;
        wire::write_f1000(w, self.cuttability)?;
        wire::write_f1000(w, self.flammability)?;
        Ok(())
    }

    /// Deserialize, rejecting any version but the supported one.
    pub fn deserialize<R: Read>(r: &mut R) -> Result<Self, DefError> {
        let version = wire::read_u8(r)?;
        if version != MATERIAL_VERSION {
            return Err(DefError::UnsupportedVersion(version));
        }
        Ok(Self {
            diggability: Diggability::from_wire(wire::read_u8(r)?)?,
            constant_time: wire::read_f1000(r)?,
            weight: wire::read_f1000(r)?,
            crackiness: wire::read_f1000(r)?,
            crumbliness: wire::read_f1000(r)?,
            cuttability: wire::read_f1000(r)?,
            flammability: wire::read_f1000(r)?,
        })
    }
}
