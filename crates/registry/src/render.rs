//! Rendering-cache boundary.
//!
//! Everything here is derived state: recomputed on demand from the
//! persisted descriptor fields plus the external texture source and
//! settings, and never serialized. The computation is idempotent and
//! leaves persisted fields untouched.

use crate::descriptor::{DrawKind, FeatureDescriptor, SPECIAL_SURFACE_COUNT};
use bitflags::bitflags;

/// Opaque handle to a resolved texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Resolves texture names to handles. Rendering-backend specific.
pub trait TextureSource {
    /// Resolve a (possibly modifier-carrying) texture name.
    fn get_texture(&self, name: &str) -> TextureHandle;
    /// Resolve a raw image name without applying modifiers.
    fn get_texture_raw(&self, name: &str) -> TextureHandle;
}

/// Read-only access to global rendering settings.
pub trait SettingsProvider {
    /// Look up a boolean setting by key.
    fn get_bool(&self, key: &str) -> bool;
}

/// The style toggles consulted when rebuilding the cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderToggles {
    /// Render liquid sources with the new-style surface mesh.
    pub new_style_water: bool,
    /// Render optional all-faces content (leaves) with all faces.
    pub new_style_leaves: bool,
    /// Force liquids fully opaque.
    pub opaque_water: bool,
}

impl RenderToggles {
    /// Snapshot the relevant toggles from a settings provider.
    pub fn from_settings(settings: &dyn SettingsProvider) -> Self {
        Self {
            new_style_water: settings.get_bool("new_style_water"),
            new_style_leaves: settings.get_bool("new_style_leaves"),
            opaque_water: settings.get_bool("opaque_water"),
        }
    }
}

bitflags! {
    /// Flag bits applied to a tile's render material.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MaterialFlags: u8 {
        /// Cull backfaces of this tile.
        const BACKFACE_CULLING = 1 << 0;
    }
}

/// Alpha handling for a tile's render material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaterialKind {
    /// Fully opaque, simple alpha test.
    #[default]
    AlphaSimple,
    /// Per-vertex alpha blending.
    AlphaVertex,
}

/// Derived render state for one cube face.
#[derive(Debug, Clone, Copy, Default)]
pub struct TileRender {
    /// Resolved texture, absent for an empty tile name.
    pub texture: Option<TextureHandle>,
    /// Effective alpha applied to the face.
    pub alpha: u8,
    /// Alpha handling mode.
    pub material_kind: MaterialKind,
    /// Material flag bits.
    pub flags: MaterialFlags,
}

/// Derived render state for one auxiliary surface.
#[derive(Debug, Clone, Copy)]
pub struct SpecialRender {
    /// Resolved texture for the surface.
    pub texture: TextureHandle,
    /// Whether backfaces are culled.
    pub backface_culling: bool,
    /// Whether the surface blends with per-vertex alpha.
    pub vertex_alpha: bool,
}

/// Per-descriptor derived rendering state.
///
/// Lives alongside the persisted fields but is excluded from equality and
/// from the wire format; [`FeatureDescriptor::reset`] restores it to
/// defaults.
#[derive(Debug, Clone)]
pub struct RenderCache {
    /// Physical solidness classification (0 = not solid, 2 = fully solid).
    pub solidness: u8,
    /// Visual-only solidness for content drawn solid but not physical.
    pub visual_solidness: u8,
    /// Whether tile materials cull backfaces.
    pub backface_culling: bool,
    /// Effective draw kind after style toggles are applied.
    pub draw_kind: DrawKind,
    /// Resolved inventory-icon texture.
    pub inventory_texture: Option<TextureHandle>,
    /// Per-face derived render state.
    pub tiles: [TileRender; 6],
    /// Per-auxiliary-surface derived render state.
    pub specials: [Option<SpecialRender>; SPECIAL_SURFACE_COUNT],
}

impl Default for RenderCache {
    fn default() -> Self {
        Self {
            solidness: 2,
            visual_solidness: 0,
            backface_culling: true,
            draw_kind: DrawKind::Normal,
            inventory_texture: None,
            tiles: [TileRender::default(); 6],
            specials: [None; SPECIAL_SURFACE_COUNT],
        }
    }
}

impl FeatureDescriptor {
    /// Recompute this descriptor's derived rendering state.
    ///
    /// Reads only persisted fields and the supplied collaborators; writes
    /// only [`RenderCache`]. Calling it again with the same inputs
    /// produces the same cache.
    pub fn update_render_cache(&mut self, tsrc: &dyn TextureSource, toggles: RenderToggles) {
        let mut cache = RenderCache {
            backface_culling: self.render.backface_culling,
            ..RenderCache::default()
        };
        cache.draw_kind = self.draw_kind;

        // Liquids may be forced opaque without touching the stored alpha.
        let liquid_face = matches!(self.draw_kind, DrawKind::Liquid | DrawKind::FlowingLiquid);
        let effective_alpha = if liquid_face && toggles.opaque_water {
            255
        } else {
            self.alpha
        };

        let mut noalpha_tiles = false;
        match self.draw_kind {
            DrawKind::Normal => cache.solidness = 2,
            DrawKind::AirLike => cache.solidness = 0,
            DrawKind::Liquid => {
                if toggles.new_style_water {
                    cache.solidness = 0;
                } else {
                    cache.solidness = if effective_alpha == 255 { 2 } else { 1 };
                }
            }
            DrawKind::FlowingLiquid => cache.solidness = 0,
            DrawKind::GlassLike | DrawKind::AllFaces => {
                cache.solidness = 0;
                cache.visual_solidness = 1;
            }
            DrawKind::AllFacesOptional => {
                if toggles.new_style_leaves {
                    cache.draw_kind = DrawKind::AllFaces;
                    cache.solidness = 0;
                    cache.visual_solidness = 1;
                } else {
                    cache.draw_kind = DrawKind::Normal;
                    cache.solidness = 1;
                    noalpha_tiles = true;
                }
            }
            DrawKind::TorchLike
            | DrawKind::SignLike
            | DrawKind::PlantLike
            | DrawKind::FenceLike
            | DrawKind::RailLike => cache.solidness = 0,
        }

        if !self.inventory_texture.is_empty() {
            cache.inventory_texture = Some(tsrc.get_texture_raw(&self.inventory_texture));
        }

        for (tile, name) in cache.tiles.iter_mut().zip(&self.tile_textures) {
            tile.alpha = effective_alpha;
            tile.material_kind = if effective_alpha == 255 {
                MaterialKind::AlphaSimple
            } else {
                MaterialKind::AlphaVertex
            };
            tile.flags.set(
                MaterialFlags::BACKFACE_CULLING,
                cache.backface_culling,
            );
            if name.is_empty() {
                continue;
            }
            tile.texture = if noalpha_tiles {
                Some(tsrc.get_texture(&format!("[noalpha:{name}")))
            } else {
                Some(tsrc.get_texture(name))
            };
        }

        for (slot, spec) in cache.specials.iter_mut().zip(&self.special_surfaces) {
            if spec.texture.is_empty() {
                continue;
            }
            *slot = Some(SpecialRender {
                texture: tsrc.get_texture(&spec.texture),
                backface_culling: spec.backface_culling,
                vertex_alpha: effective_alpha != 255,
            });
        }

        self.render = cache;
    }
}
