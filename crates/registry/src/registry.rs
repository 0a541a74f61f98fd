//! The content definition registry.

use crate::descriptor::{DrawKind, FeatureDescriptor, LiquidKind, ParamKind};
use crate::error::DefError;
use crate::metadata::GameContext;
use crate::render::{RenderToggles, SettingsProvider, TextureSource};
use std::io::{Read, Write};
use tracing::{debug, error, info};
use voxdef_core::{
    wire, ContentId, NameIdTable, CONTENT_AIR, CONTENT_IGNORE, FULL_PARAM_POOL, MAX_CONTENT,
    PARTIAL_PARAM_POOL,
};

/// Texture assigned to every unregistered slot.
pub const UNKNOWN_TEXTURE: &str = "unknown_block.png";

/// Process-wide table mapping content identifiers to feature descriptors.
///
/// The slot array is dense: every identifier always holds some
/// descriptor, possibly the empty default. The registry is the sole
/// owner; lookups hand out read-only views, never copies.
///
/// Mutation is expected to happen in a single loading phase (or behind
/// external synchronization); afterwards the registry is read-mostly.
/// [`Clone`] takes a point-in-time snapshot that never observes later
/// mutation of the source.
#[derive(Debug)]
pub struct ContentRegistry {
    slots: Vec<FeatureDescriptor>,
    names: NameIdTable,
}

impl Default for ContentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentRegistry {
    /// Create a registry holding only the reserved descriptors.
    pub fn new() -> Self {
        let mut registry = Self {
            slots: vec![FeatureDescriptor::default(); MAX_CONTENT as usize + 1],
            names: NameIdTable::new(),
        };
        registry.clear();
        registry
    }

    /// Reset every slot to the unknown-texture default, then re-establish
    /// the two reserved descriptors through the normal [`Self::set`] path.
    pub fn clear(&mut self) {
        self.names.clear();
        for slot in &mut self.slots {
            slot.reset();
            slot.set_all_textures(UNKNOWN_TEXTURE);
        }

        let mut air = FeatureDescriptor::default();
        air.name = "air".to_string();
        air.draw_kind = DrawKind::AirLike;
        air.param_kind = ParamKind::Light;
        air.light_propagates = true;
        air.sunlight_propagates = true;
        air.walkable = false;
        air.pointable = false;
        air.diggable = false;
        air.buildable_to = true;
        air.air_equivalent = true;
        self.set(CONTENT_AIR, air)
            .expect("reserved air id is in range");

        let mut ignore = FeatureDescriptor::default();
        ignore.name = "ignore".to_string();
        ignore.draw_kind = DrawKind::AirLike;
        ignore.param_kind = ParamKind::Light;
        ignore.light_propagates = true;
        ignore.sunlight_propagates = true;
        ignore.walkable = false;
        ignore.pointable = false;
        ignore.diggable = false;
        ignore.buildable_to = true;
        ignore.air_equivalent = true;
        self.set(CONTENT_IGNORE, ignore)
            .expect("reserved ignore id is in range");
    }

    /// Find a free identifier, or `CONTENT_IGNORE` when the searched
    /// pool(s) are exhausted.
    ///
    /// Requests that do not need the full parameter byte try the large
    /// partial-param pool first and fall back to the small pool; requests
    /// that do need it search only the small pool. Never returns a
    /// reserved identifier.
    pub fn get_free_id(&self, require_full_param: bool) -> ContentId {
        if !require_full_param {
            for id in PARTIAL_PARAM_POOL {
                if self.slots[id as usize].name.is_empty() {
                    return id;
                }
            }
        }
        for id in FULL_PARAM_POOL {
            if self.slots[id as usize].name.is_empty() {
                return id;
            }
        }
        CONTENT_IGNORE
    }

    /// Read-only view of the descriptor at `id`.
    pub fn get(&self, id: ContentId) -> Result<&FeatureDescriptor, DefError> {
        self.slots
            .get(id as usize)
            .ok_or(DefError::OutOfRange(id as usize))
    }

    /// Resolve a name; unresolved names yield the `ignore` descriptor.
    pub fn get_by_name(&self, name: &str) -> &FeatureDescriptor {
        let id = self.names.get_id(name).unwrap_or(CONTENT_IGNORE);
        &self.slots[id as usize]
    }

    /// Resolve a name to its identifier without mutating anything.
    pub fn get_id_by_name(&self, name: &str) -> Option<ContentId> {
        self.names.get_id(name)
    }

    /// Overwrite the slot at `id`, binding the descriptor's name when it
    /// has one.
    pub fn set(&mut self, id: ContentId, descriptor: FeatureDescriptor) -> Result<(), DefError> {
        if id > MAX_CONTENT {
            return Err(DefError::OutOfRange(id as usize));
        }
        debug!(id, name = %descriptor.name, "registering content id");
        if !descriptor.name.is_empty() {
            self.names.set(id, &descriptor.name);
        }
        self.slots[id as usize] = descriptor;
        Ok(())
    }

    /// Register a descriptor under `name`, reusing the existing
    /// identifier when the name is already bound and allocating one
    /// otherwise.
    ///
    /// Returns `CONTENT_IGNORE` without mutating anything when the
    /// searched pool(s) have no free identifier; callers must check.
    pub fn set_by_name(
        &mut self,
        name: &str,
        descriptor: FeatureDescriptor,
    ) -> Result<ContentId, DefError> {
        if descriptor.name != name {
            return Err(DefError::InvalidArgument(
                "descriptor name must match the registered name",
            ));
        }
        if let Some(id) = self.names.get_id(name) {
            self.set(id, descriptor)?;
            return Ok(id);
        }
        // These draw kinds and flowing liquids consume more of the
        // auxiliary parameter byte than the common case.
        let require_full_param = descriptor.liquid_kind == LiquidKind::Flowing
            || matches!(
                descriptor.draw_kind,
                DrawKind::FlowingLiquid | DrawKind::TorchLike | DrawKind::SignLike
            );
        let id = self.get_free_id(require_full_param);
        if id == CONTENT_IGNORE {
            return Ok(CONTENT_IGNORE);
        }
        self.set(id, descriptor)?;
        Ok(id)
    }

    /// Register a placeholder descriptor with all-unknown textures so a
    /// name resolves before its real definition arrives.
    pub fn allocate_placeholder(&mut self, name: &str) -> Result<ContentId, DefError> {
        if name.is_empty() {
            return Err(DefError::InvalidArgument(
                "placeholder name must not be empty",
            ));
        }
        let mut f = FeatureDescriptor::default();
        f.name = name.to_string();
        f.set_all_textures(UNKNOWN_TEXTURE);
        self.set_by_name(name, f)
    }

    /// Recompute derived rendering state for every slot.
    ///
    /// Reads persisted fields plus the texture source and settings;
    /// writes only each descriptor's render cache. Idempotent.
    pub fn update_rendering_cache(
        &mut self,
        texture_source: &dyn TextureSource,
        settings: &dyn SettingsProvider,
    ) {
        info!("rebuilding render caches for all content definitions");
        let toggles = RenderToggles::from_settings(settings);
        for slot in &mut self.slots {
            slot.update_render_cache(texture_source, toggles);
        }
    }

    /// Serialize every registered, non-reserved slot.
    ///
    /// Wire format: `u16` entry count, then one `u32`-length-prefixed
    /// blob of `(u16 id, descriptor)` entries. The reserved identifiers
    /// never appear; receivers reconstruct them locally.
    pub fn serialize<W: Write>(&self, w: &mut W) -> Result<(), DefError> {
        let mut count: u16 = 0;
        let mut blob = Vec::new();
        for id in 0..=MAX_CONTENT {
            if id == CONTENT_AIR || id == CONTENT_IGNORE {
                continue;
            }
            let f = &self.slots[id as usize];
            if f.name.is_empty() {
                continue;
            }
            wire::write_u16(&mut blob, id)?;
            f.serialize(&mut blob)?;
            count += 1;
        }
        wire::write_u16(w, count)?;
        wire::write_bytes32(w, &blob)?;
        Ok(())
    }

    /// Load a table written by [`Self::serialize`], resetting first.
    ///
    /// Entries with an out-of-range identifier are logged and skipped;
    /// their bytes are still consumed so the rest of the blob parses.
    /// Any other failure aborts the call. Best-effort, not transactional:
    /// slots applied before a mid-stream error stay applied.
    pub fn deserialize<R: Read>(&mut self, r: &mut R, ctx: &GameContext) -> Result<(), DefError> {
        self.clear();
        let count = wire::read_u16(r)?;
        let blob = wire::read_bytes32(r)?;
        let mut cursor = &blob[..];
        for _ in 0..count {
            let id = wire::read_u16(&mut cursor)?;
            // Decode unconditionally so a rejected id cannot desync the
            // remaining entries.
            let f = FeatureDescriptor::deserialize(&mut cursor, ctx)?;
            if id > MAX_CONTENT {
                error!(id, "skipping definition entry with out-of-range content id");
                continue;
            }
            if !f.name.is_empty() {
                self.names.set(id, &f.name);
            }
            self.slots[id as usize] = f;
        }
        Ok(())
    }
}

impl Clone for ContentRegistry {
    /// Deep per-slot copy with a fresh name table rebuilt from the
    /// copied descriptors.
    fn clone(&self) -> Self {
        let mut copy = ContentRegistry::new();
        for id in 0..=MAX_CONTENT {
            let descriptor = self.slots[id as usize].clone();
            copy.set(id, descriptor)
                .expect("source and copy share the identifier space");
        }
        copy
    }
}
