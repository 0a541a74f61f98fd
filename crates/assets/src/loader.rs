use std::fs;
use std::path::Path;

use tracing::info;
use voxdef_core::{ContentId, CONTENT_IGNORE};
use voxdef_registry::{ContentRegistry, DrawKind, FeatureDescriptor};

use crate::{AssetError, ContentDefinition, FaceTextureConfig};

/// Parse a JSON string into a list of content definitions.
pub fn load_definitions_str(input: &str) -> Result<Vec<ContentDefinition>, AssetError> {
    Ok(serde_json::from_str(input)?)
}

/// Load a registry from the provided JSON pack file path.
pub fn registry_from_file(path: &Path) -> Result<ContentRegistry, AssetError> {
    let data = fs::read_to_string(path)?;
    registry_from_str(&data)
}

/// Load a registry from an in-memory JSON pack.
pub fn registry_from_str(input: &str) -> Result<ContentRegistry, AssetError> {
    let mut registry = ContentRegistry::new();
    register_definitions(&mut registry, load_definitions_str(input)?)?;
    Ok(registry)
}

/// Register every definition, returning the identifiers assigned to them
/// in pack order.
pub fn register_definitions(
    registry: &mut ContentRegistry,
    definitions: Vec<ContentDefinition>,
) -> Result<Vec<ContentId>, AssetError> {
    let mut ids = Vec::with_capacity(definitions.len());
    for definition in definitions {
        let name = definition.name.clone();
        let descriptor = build_descriptor(definition)?;
        let id = registry.set_by_name(&name, descriptor)?;
        if id == CONTENT_IGNORE {
            return Err(AssetError::Exhausted(name));
        }
        ids.push(id);
    }
    info!(count = ids.len(), "registered definition pack");
    Ok(ids)
}

/// Parse a draw kind from its pack spelling.
fn parse_draw_kind(s: &str) -> Option<DrawKind> {
    match s.to_lowercase().as_str() {
        "normal" => Some(DrawKind::Normal),
        "airlike" => Some(DrawKind::AirLike),
        "liquid" => Some(DrawKind::Liquid),
        "flowingliquid" => Some(DrawKind::FlowingLiquid),
        "glasslike" => Some(DrawKind::GlassLike),
        "allfaces" => Some(DrawKind::AllFaces),
        "allfaces_optional" => Some(DrawKind::AllFacesOptional),
        "torchlike" => Some(DrawKind::TorchLike),
        "signlike" => Some(DrawKind::SignLike),
        "plantlike" => Some(DrawKind::PlantLike),
        "fencelike" => Some(DrawKind::FenceLike),
        "raillike" => Some(DrawKind::RailLike),
        _ => None,
    }
}

fn build_descriptor(definition: ContentDefinition) -> Result<FeatureDescriptor, AssetError> {
    let mut f = FeatureDescriptor::default();
    f.name = definition.name.clone();

    if let Some(kind) = definition.draw_kind.as_deref() {
        f.draw_kind =
            parse_draw_kind(kind).ok_or_else(|| AssetError::UnknownDrawKind(kind.to_string()))?;
    }

    let base = definition
        .texture
        .clone()
        .unwrap_or_else(|| format!("{}.png", definition.name));
    f.set_all_textures(&base);
    if let Some(config) = definition.textures {
        apply_face_textures(&mut f, &config);
    }

    f.walkable = definition.walkable.unwrap_or(f.walkable);
    f.pointable = definition.pointable.unwrap_or(f.pointable);
    f.diggable = definition.diggable.unwrap_or(f.diggable);
    f.light_propagates = definition.light_propagates;
    f.sunlight_propagates = definition.sunlight_propagates;
    f.light_source = definition.light_source;
    if let Some(alpha) = definition.alpha {
        f.alpha = alpha;
    }
    if let Some(dug_item) = definition.dug_item {
        f.dug_item = dug_item;
    }
    if let Some(cook_result) = definition.cook_result {
        f.cook_result = cook_result;
    }
    if let Some(burn_time) = definition.burn_time {
        f.burn_time = burn_time;
    }
    Ok(f)
}

fn apply_face_textures(f: &mut FeatureDescriptor, config: &FaceTextureConfig) {
    if let Some(all) = config.all.as_deref() {
        f.set_all_textures(all);
    }
    if let Some(side) = config.side.as_deref() {
        for face in 2..6 {
            f.set_texture(face, side);
        }
    }
    for (face, name) in [
        (0, config.top.as_deref()),
        (1, config.bottom.as_deref()),
        (2, config.east.as_deref()),
        (3, config.west.as_deref()),
        (4, config.south.as_deref()),
        (5, config.north.as_deref()),
    ] {
        if let Some(name) = name {
            f.set_texture(face, name);
        }
    }
}
