//! The full per-content feature record.

use crate::error::DefError;
use crate::geometry::BoxGeometry;
use crate::material::MaterialProperties;
use crate::metadata::{GameContext, MetadataTemplate};
use crate::render::RenderCache;
use crate::surface::SurfaceSpec;
use std::collections::BTreeSet;
use std::io::{Read, Write};
use voxdef_core::{wire, ContentId, CONTENT_IGNORE};

/// Current feature-descriptor serialization version.
const DESCRIPTOR_VERSION: u8 = 0;

/// Number of auxiliary surface slots per descriptor.
///
/// Shared by both sides of the wire format through the special-count
/// sentinel, so changing it is a protocol break.
pub const SPECIAL_SURFACE_COUNT: usize = 2;

/// Marker appended by [`FeatureDescriptor::set_inventory_texture`] to
/// force a flat single-image inventory icon.
pub const FORCE_SINGLE_MARKER: &str = "^[forcesingle";

/// Render strategy selector for a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DrawKind {
    /// Plain cube.
    Normal = 0,
    /// Invisible, like air.
    AirLike = 1,
    /// Still liquid source.
    Liquid = 2,
    /// Flowing liquid with surface levels.
    FlowingLiquid = 3,
    /// Cube with interior faces removed between neighbors.
    GlassLike = 4,
    /// Cube drawing all faces regardless of neighbors.
    AllFaces = 5,
    /// [`DrawKind::AllFaces`] when the style toggle allows, else normal.
    AllFacesOptional = 6,
    /// Wall/floor/ceiling-mounted torch sprite.
    TorchLike = 7,
    /// Wall-mounted flat sprite.
    SignLike = 8,
    /// X-shaped sprite pair.
    PlantLike = 9,
    /// Post with connecting rails.
    FenceLike = 10,
    /// Flat track following neighbor connections.
    RailLike = 11,
}

impl DrawKind {
    fn from_wire(value: u8) -> Result<Self, DefError> {
        Ok(match value {
            0 => DrawKind::Normal,
            1 => DrawKind::AirLike,
            2 => DrawKind::Liquid,
            3 => DrawKind::FlowingLiquid,
            4 => DrawKind::GlassLike,
            5 => DrawKind::AllFaces,
            6 => DrawKind::AllFacesOptional,
            7 => DrawKind::TorchLike,
            8 => DrawKind::SignLike,
            9 => DrawKind::PlantLike,
            10 => DrawKind::FenceLike,
            11 => DrawKind::RailLike,
            _ => {
                return Err(DefError::InvalidTag {
                    what: "draw kind",
                    value,
                })
            }
        })
    }
}

/// How the auxiliary per-voxel parameter byte is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ParamKind {
    /// The parameter byte is unused.
    #[default]
    None = 0,
    /// The parameter byte stores a light level.
    Light = 1,
}

impl ParamKind {
    fn from_wire(value: u8) -> Result<Self, DefError> {
        match value {
            0 => Ok(ParamKind::None),
            1 => Ok(ParamKind::Light),
            _ => Err(DefError::InvalidTag {
                what: "param kind",
                value,
            }),
        }
    }
}

/// Liquid behavior of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum LiquidKind {
    /// Not a liquid.
    #[default]
    None = 0,
    /// Flowing liquid volume.
    Flowing = 1,
    /// Liquid source block.
    Source = 2,
}

impl LiquidKind {
    fn from_wire(value: u8) -> Result<Self, DefError> {
        match value {
            0 => Ok(LiquidKind::None),
            1 => Ok(LiquidKind::Flowing),
            2 => Ok(LiquidKind::Source),
            _ => Err(DefError::InvalidTag {
                what: "liquid kind",
                value,
            }),
        }
    }
}

/// Post-effect screen tint, serialized alpha first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorRgba {
    /// Alpha channel.
    pub alpha: u8,
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
}

/// The full feature record associated with one content identifier.
///
/// Owned exclusively by the registry's slot array; callers receive
/// read-only views. Equality compares persisted fields only — the
/// used-texture-name set and the render cache are working state.
#[derive(Debug, Clone)]
pub struct FeatureDescriptor {
    /// String key; empty means unregistered/default.
    pub name: String,
    /// Render strategy.
    pub draw_kind: DrawKind,
    /// Visual scale applied to sprite-ish draw kinds.
    pub visual_scale: f32,
    /// One texture name per cube face.
    pub tile_textures: [String; 6],
    /// Inventory-icon texture descriptor string.
    pub inventory_texture: String,
    /// Auxiliary surface slots.
    pub special_surfaces: [SurfaceSpec; SPECIAL_SURFACE_COUNT],
    /// Face alpha (255 = opaque).
    pub alpha: u8,
    /// Screen tint applied while inside this content.
    pub post_effect_color: ColorRgba,
    /// Interpretation of the auxiliary parameter byte.
    pub param_kind: ParamKind,
    /// Belongs to the ground layer carved by mapgen.
    pub is_ground_content: bool,
    /// Light passes through.
    pub light_propagates: bool,
    /// Sunlight passes through undiminished.
    pub sunlight_propagates: bool,
    /// Collides with moving bodies.
    pub walkable: bool,
    /// Can be targeted by the crosshair.
    pub pointable: bool,
    /// Can be dug at all.
    pub diggable: bool,
    /// Can be climbed like a ladder.
    pub climbable: bool,
    /// Placement may replace this content.
    pub buildable_to: bool,
    /// Uses the wall-mounted selection variants.
    pub wall_mounted: bool,
    /// Treated as air by gameplay queries.
    pub air_equivalent: bool,
    /// Mineral generation frequently substitutes into this content.
    pub often_contains_mineral: bool,
    /// Item handed out when dug.
    pub dug_item: String,
    /// Extra item occasionally handed out when dug.
    pub extra_dug_item: String,
    /// One-in-N chance for the extra item.
    pub extra_dug_item_rarity: i32,
    /// Metadata template stamped onto newly placed instances.
    pub initial_metadata: Option<MetadataTemplate>,
    /// Liquid behavior.
    pub liquid_kind: LiquidKind,
    /// Flowing counterpart for liquid pairs.
    pub liquid_alternative_flowing: ContentId,
    /// Source counterpart for liquid pairs.
    pub liquid_alternative_source: ContentId,
    /// Flow resistance (higher is thicker).
    pub liquid_viscosity: u8,
    /// Emitted light level.
    pub light_source: u8,
    /// Contact damage per second.
    pub damage_per_second: u32,
    /// Selection-box geometry.
    pub selection_box: BoxGeometry,
    /// Physical dig/material record.
    pub material: MaterialProperties,
    /// Cooking result item; empty = not cookable.
    pub cook_result: String,
    /// Cook duration in seconds.
    pub cook_time: f32,
    /// Fuel burn duration; negative = not a fuel.
    pub burn_time: f32,

    /// Every name handed to [`Self::set_texture`]. Working state.
    pub used_texture_names: BTreeSet<String>,
    /// Derived rendering state. Working state.
    pub render: RenderCache,
}

impl Default for FeatureDescriptor {
    fn default() -> Self {
        Self {
            name: String::new(),
            draw_kind: DrawKind::Normal,
            visual_scale: 1.0,
            tile_textures: Default::default(),
            inventory_texture: String::new(),
            special_surfaces: Default::default(),
            alpha: 255,
            post_effect_color: ColorRgba::default(),
            param_kind: ParamKind::None,
            is_ground_content: false,
            light_propagates: false,
            sunlight_propagates: false,
            walkable: true,
            pointable: true,
            diggable: true,
            climbable: false,
            buildable_to: false,
            wall_mounted: false,
            air_equivalent: false,
            often_contains_mineral: false,
            dug_item: String::new(),
            extra_dug_item: String::new(),
            extra_dug_item_rarity: 2,
            initial_metadata: None,
            liquid_kind: LiquidKind::None,
            liquid_alternative_flowing: CONTENT_IGNORE,
            liquid_alternative_source: CONTENT_IGNORE,
            liquid_viscosity: 0,
            light_source: 0,
            damage_per_second: 0,
            selection_box: BoxGeometry::default(),
            material: MaterialProperties::default(),
            cook_result: String::new(),
            cook_time: 3.0,
            burn_time: -1.0,
            used_texture_names: BTreeSet::new(),
            render: RenderCache::default(),
        }
    }
}

impl PartialEq for FeatureDescriptor {
    fn eq(&self, other: &Self) -> bool {
        // Persisted fields only; working state is never compared.
        self.name == other.name
            && self.draw_kind == other.draw_kind
            && self.visual_scale == other.visual_scale
            && self.tile_textures == other.tile_textures
            && self.inventory_texture == other.inventory_texture
            && self.special_surfaces == other.special_surfaces
            && self.alpha == other.alpha
            && self.post_effect_color == other.post_effect_color
            && self.param_kind == other.param_kind
            && self.is_ground_content == other.is_ground_content
            && self.light_propagates == other.light_propagates
            && self.sunlight_propagates == other.sunlight_propagates
            && self.walkable == other.walkable
            && self.pointable == other.pointable
            && self.diggable == other.diggable
            && self.climbable == other.climbable
            && self.buildable_to == other.buildable_to
            && self.wall_mounted == other.wall_mounted
            && self.air_equivalent == other.air_equivalent
            && self.often_contains_mineral == other.often_contains_mineral
            && self.dug_item == other.dug_item
            && self.extra_dug_item == other.extra_dug_item
            && self.extra_dug_item_rarity == other.extra_dug_item_rarity
            && self.initial_metadata == other.initial_metadata
            && self.liquid_kind == other.liquid_kind
            && self.liquid_alternative_flowing == other.liquid_alternative_flowing
            && self.liquid_alternative_source == other.liquid_alternative_source
            && self.liquid_viscosity == other.liquid_viscosity
            && self.light_source == other.light_source
            && self.damage_per_second == other.damage_per_second
            && self.selection_box == other.selection_box
            && self.material == other.material
            && self.cook_result == other.cook_result
            && self.cook_time == other.cook_time
            && self.burn_time == other.burn_time
    }
}

impl FeatureDescriptor {
    /// Restore every field to its documented default, clearing working
    /// state along with the persisted fields.
    pub fn reset(&mut self) {
        *self = FeatureDescriptor::default();
    }

    /// Assign one of the six face surfaces.
    ///
    /// Records the name in the used-texture set; if the inventory surface
    /// is still unset it defaults to the same (raw) name.
    ///
    /// # Panics
    /// Panics if `face >= 6`.
    pub fn set_texture(&mut self, face: usize, name: &str) {
        self.used_texture_names.insert(name.to_string());
        self.tile_textures[face] = name.to_string();
        if self.inventory_texture.is_empty() {
            self.inventory_texture = name.to_string();
        }
    }

    /// Assign the same surface to all six faces and force the inventory
    /// icon to match, bypassing the only-if-unset rule of
    /// [`Self::set_texture`].
    pub fn set_all_textures(&mut self, name: &str) {
        for face in 0..6 {
            self.set_texture(face, name);
        }
        self.set_inventory_texture(name);
    }

    /// Assign one auxiliary surface slot.
    pub fn set_special_surface(&mut self, index: usize, spec: SurfaceSpec) -> Result<(), DefError> {
        if index >= SPECIAL_SURFACE_COUNT {
            return Err(DefError::OutOfRange(index));
        }
        self.special_surfaces[index] = spec;
        Ok(())
    }

    /// Use a flat single image as the inventory icon.
    pub fn set_inventory_texture(&mut self, image: &str) {
        self.inventory_texture = format!("{image}{FORCE_SINGLE_MARKER}");
    }

    /// Compose a three-face cube inventory icon from plain image names.
    ///
    /// The separator character is escaped in the inputs so the encoded
    /// string stays parseable by the icon renderer.
    pub fn set_inventory_texture_cube(&mut self, top: &str, left: &str, right: &str) {
        let top = top.replace('^', "&");
        let left = left.replace('^', "&");
        let right = right.replace('^', "&");
        self.inventory_texture = format!("[inventorycube{{{top}{{{left}{{{right}");
    }

    /// Serialize in the versioned fixed field order.
    pub fn serialize<W: Write>(&self, w: &mut W) -> Result<(), DefError> {
        wire::write_u8(w, DESCRIPTOR_VERSION)?;
        wire::write_string16(w, &self.name)?;
        wire::write_u8(w, self.draw_kind as u8)?;
        wire::write_f1000(w, self.visual_scale)?;
        // Redundant tile count; a forward-compatibility sentinel.
        wire::write_u8(w, 6)?;
        for tile in &self.tile_textures {
            wire::write_string16(w, tile)?;
        }
        wire::write_string16(w, &self.inventory_texture)?;
        wire::write_u8(w, SPECIAL_SURFACE_COUNT as u8)?;
        for surface in &self.special_surfaces {
            surface.serialize(w)?;
        }
        wire::write_u8(w, self.alpha)?;
        wire::write_u8(w, self.post_effect_color.alpha)?;
        wire::write_u8(w, self.post_effect_color.red)?;
        wire::write_u8(w, self.post_effect_color.green)?;
        wire::write_u8(w, self.post_effect_color.blue)?;
        wire::write_u8(w, self.param_kind as u8)?;
        wire::write_bool(w, self.is_ground_content)?;
        wire::write_bool(w, self.light_propagates)?;
        wire::write_bool(w, self.sunlight_propagates)?;
        wire::write_bool(w, self.walkable)?;
        wire::write_bool(w, self.pointable)?;
        wire::write_bool(w, self.diggable)?;
        wire::write_bool(w, self.climbable)?;
        wire::write_bool(w, self.buildable_to)?;
        wire::write_bool(w, self.wall_mounted)?;
        wire::write_bool(w, self.air_equivalent)?;
        wire::write_bool(w, self.often_contains_mineral)?;
        wire::write_string16(w, &self.dug_item)?;
        wire::write_string16(w, &self.extra_dug_item)?;
        wire::write_i32(w, self.extra_dug_item_rarity)?;
        match &self.initial_metadata {
            Some(template) => {
                wire::write_bool(w, true)?;
                template.serialize(w)?;
            }
            None => wire::write_bool(w, false)?,
        }
        wire::write_u8(w, self.liquid_kind as u8)?;
        wire::write_u16(w, self.liquid_alternative_flowing)?;
        wire::write_u16(w, self.liquid_alternative_source)?;
        wire::write_u8(w, self.liquid_viscosity)?;
        wire::write_u8(w, self.light_source)?;
        wire::write_u32(w, self.damage_per_second)?;
        self.selection_box.serialize(w)?;
        self.material.serialize(w)?;
        wire::write_string16(w, &self.cook_result)?;
        wire::write_f1000(w, self.cook_time)?;
        wire::write_f1000(w, self.burn_time)?;
        Ok(())
    }

    /// Deserialize a descriptor written by [`Self::serialize`].
    ///
    /// Working state (used-texture set, render cache) comes back at
    /// defaults; it is recomputed, never transmitted.
    pub fn deserialize<R: Read>(r: &mut R, ctx: &GameContext) -> Result<Self, DefError> {
        let version = wire::read_u8(r)?;
        if version != DESCRIPTOR_VERSION {
            return Err(DefError::UnsupportedVersion(version));
        }
        let mut f = FeatureDescriptor::default();
        f.name = wire::read_string16(r)?;
        f.draw_kind = DrawKind::from_wire(wire::read_u8(r)?)?;
        f.visual_scale = wire::read_f1000(r)?;
        let tile_count = wire::read_u8(r)?;
        if tile_count != 6 {
            return Err(DefError::UnsupportedTileCount(tile_count));
        }
        for tile in &mut f.tile_textures {
            *tile = wire::read_string16(r)?;
        }
        f.inventory_texture = wire::read_string16(r)?;
        let special_count = wire::read_u8(r)?;
        if special_count != SPECIAL_SURFACE_COUNT as u8 {
            return Err(DefError::UnsupportedSpecialCount(special_count));
        }
        for surface in &mut f.special_surfaces {
            *surface = SurfaceSpec::deserialize(r)?;
        }
        f.alpha = wire::read_u8(r)?;
        f.post_effect_color.alpha = wire::read_u8(r)?;
        f.post_effect_color.red = wire::read_u8(r)?;
        f.post_effect_color.green = wire::read_u8(r)?;
        f.post_effect_color.blue = wire::read_u8(r)?;
        f.param_kind = ParamKind::from_wire(wire::read_u8(r)?)?;
        f.is_ground_content = wire::read_bool(r)?;
        f.light_propagates = wire::read_bool(r)?;
        f.sunlight_propagates = wire::read_bool(r)?;
        f.walkable = wire::read_bool(r)?;
        f.pointable = wire::read_bool(r)?;
        f.diggable = wire::read_bool(r)?;
        f.climbable = wire::read_bool(r)?;
        f.buildable_to = wire::read_bool(r)?;
        f.wall_mounted = wire::read_bool(r)?;
        f.air_equivalent = wire::read_bool(r)?;
        f.often_contains_mineral = wire::read_bool(r)?;
        f.dug_item = wire::read_string16(r)?;
        f.extra_dug_item = wire::read_string16(r)?;
        f.extra_dug_item_rarity = wire::read_i32(r)?;
        if wire::read_bool(r)? {
            f.initial_metadata = Some(MetadataTemplate::deserialize(r, ctx)?);
        }
        f.liquid_kind = LiquidKind::from_wire(wire::read_u8(r)?)?;
        f.liquid_alternative_flowing = wire::read_u16(r)?;
        f.liquid_alternative_source = wire::read_u16(r)?;
        f.liquid_viscosity = wire::read_u8(r)?;
        f.light_source = wire::read_u8(r)?;
        f.damage_per_second = wire::read_u32(r)?;
        f.selection_box = BoxGeometry::deserialize(r)?;
        f.material = MaterialProperties::deserialize(r)?;
        f.cook_result = wire::read_string16(r)?;
        f.cook_time = wire::read_f1000(r)?;
        f.burn_time = wire::read_f1000(r)?;
        Ok(f)
    }
}
