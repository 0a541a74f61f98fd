//! Selection-box geometry for registered content.

use crate::error::DefError;
use glam::Vec3;
use std::io::{Read, Write};
use voxdef_core::wire;

/// Current selection-box serialization version.
const BOX_GEOMETRY_VERSION: u8 = 0;

/// Thickness of the wall-mounted slab variants.
const WALL_THICKNESS: f32 = 1.0 / 16.0;

/// How the selection box is derived from the descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BoxShape {
    /// The full unit cube of the voxel.
    Regular = 0,
    /// The explicitly stored generic box.
    Fixed = 1,
    /// One of the wall-mounted variants, picked by placement.
    WallMounted = 2,
}

impl BoxShape {
    fn from_wire(value: u8) -> Result<Self, DefError> {
        match value {
            0 => Ok(BoxShape::Regular),
            1 => Ok(BoxShape::Fixed),
            2 => Ok(BoxShape::WallMounted),
            _ => Err(DefError::InvalidTag {
                what: "box shape",
                value,
            }),
        }
    }
}

/// Axis-aligned box extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Build a box from its two corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }
}

/// Tagged selection-box shape with fixed-point extents.
///
/// All four extent pairs are always present and always serialized,
/// regardless of which shape tag is active; the wire format is not
/// shape-conditional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxGeometry {
    /// Active shape tag.
    pub shape: BoxShape,
    /// Generic box used by [`BoxShape::Fixed`].
    pub fixed: Aabb,
    /// Ceiling-mounted slab.
    pub wall_top: Aabb,
    /// Floor-mounted slab.
    pub wall_bottom: Aabb,
    /// Side-mounted slab.
    pub wall_side: Aabb,
}

impl Default for BoxGeometry {
    fn default() -> Self {
        Self {
            shape: BoxShape::Regular,
            fixed: Aabb::new(Vec3::splat(-0.5), Vec3::splat(0.5)),
            wall_top: Aabb::new(
                Vec3::new(-0.5, 0.5 - WALL_THICKNESS, -0.5),
                Vec3::new(0.5, 0.5, 0.5),
            ),
            wall_bottom: Aabb::new(
                Vec3::new(-0.5, -0.5, -0.5),
                Vec3::new(0.5, -0.5 + WALL_THICKNESS, 0.5),
            ),
            wall_side: Aabb::new(
                Vec3::new(-0.5, -0.5, -0.5),
                Vec3::new(-0.5 + WALL_THICKNESS, 0.5, 0.5),
            ),
        }
    }
}

impl BoxGeometry {
    /// Serialize in the versioned fixed-field-order wire format.
    pub fn serialize<W: Write>(&self, w: &mut W) -> Result<(), DefError> {
        wire::write_u8(w, BOX_GEOMETRY_VERSION)?;
        wire::write_u8(w, self.shape as u8)?;
        for aabb in [self.fixed, self.wall_top, self.wall_bottom, self.wall_side] {
            wire::write_v3f1000(w, aabb.min)?;
            wire::write_v3f1000(w, aabb.max)?;
        }
        Ok(())
    }

    /// Deserialize, rejecting any version but the supported one.
    pub fn deserialize<R: Read>(r: &mut R) -> Result<Self, DefError> {
        let version = wire::read_u8(r)?;
        if version != BOX_GEOMETRY_VERSION {
            return Err(DefError::UnsupportedVersion(version));
        }
        let shape = BoxShape::from_wire(wire::read_u8(r)?)?;
        let fixed = read_aabb(r)?;
        let wall_top = read_aabb(r)?;
        let wall_bottom = read_aabb(r)?;
        let wall_side = read_aabb(r)?;
        Ok(Self {
            shape,
            fixed,
            wall_top,
            wall_bottom,
            wall_side,
        })
    }
}

fn read_aabb<R: Read>(r: &mut R) -> Result<Aabb, DefError> {
    let min = wire::read_v3f1000(r)?;
    let max = wire::read_v3f1000(r)?;
    Ok(Aabb::new(min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_cube_roundtrips_at_thousandth_precision() {
        let geometry = BoxGeometry {
            shape: BoxShape::Fixed,
            fixed: Aabb::new(Vec3::splat(-0.5), Vec3::splat(0.5)),
            ..BoxGeometry::default()
        };

        let mut buf = Vec::new();
        geometry.serialize(&mut buf).unwrap();
        let decoded = BoxGeometry::deserialize(&mut &buf[..]).unwrap();

        assert_eq!(decoded.shape, BoxShape::Fixed);
        assert_eq!(decoded.fixed.min, Vec3::splat(-0.5));
        assert_eq!(decoded.fixed.max, Vec3::splat(0.5));
        assert_eq!(decoded, geometry);
    }

    #[test]
    fn all_four_extent_pairs_are_always_framed() {
        // 1 version + 1 shape + 4 pairs * 2 corners * 3 coords * 4 bytes.
        let mut buf = Vec::new();
        BoxGeometry::default().serialize(&mut buf).unwrap();
        assert_eq!(buf.len(), 2 + 4 * 2 * 12);
    }

    #[test]
    fn version_mismatch_is_fatal() {
        let mut buf = Vec::new();
        BoxGeometry::default().serialize(&mut buf).unwrap();
        buf[0] = 1;
        assert!(matches!(
            BoxGeometry::deserialize(&mut &buf[..]),
            Err(DefError::UnsupportedVersion(1))
        ));
    }

    #[test]
    fn unknown_shape_tag_is_rejected() {
        let mut buf = Vec::new();
        BoxGeometry::default().serialize(&mut buf).unwrap();
        buf[1] = 9;
        assert!(matches!(
            BoxGeometry::deserialize(&mut &buf[..]),
            Err(DefError::InvalidTag {
                what: "box shape",
                value: 9
            })
        ));
    }
}
