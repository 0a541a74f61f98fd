#![warn(missing_docs)]
//! Definition pack schema + loading helpers.

mod loader;

pub use loader::{
    load_definitions_str, register_definitions, registry_from_file, registry_from_str,
};

use serde::Deserialize;
use thiserror::Error;
use voxdef_registry::DefError;

/// One authored content definition from a JSON pack.
#[derive(Debug, Deserialize)]
pub struct ContentDefinition {
    /// Human-readable identifier (e.g., "stone").
    pub name: String,
    /// Draw kind name (defaults to a normal cube).
    #[serde(default)]
    pub draw_kind: Option<String>,
    /// Texture to use for all faces (defaults to `<name>.png`).
    #[serde(default)]
    pub texture: Option<String>,
    /// Optional per-face textures.
    #[serde(default)]
    pub textures: Option<FaceTextureConfig>,
    /// Collides with moving bodies (default true).
    #[serde(default)]
    pub walkable: Option<bool>,
    /// Can be targeted by the crosshair (default true).
    #[serde(default)]
    pub pointable: Option<bool>,
    /// Can be dug (default true).
    #[serde(default)]
    pub diggable: Option<bool>,
    /// Light passes through.
    #[serde(default)]
    pub light_propagates: bool,
    /// Sunlight passes through undiminished.
    #[serde(default)]
    pub sunlight_propagates: bool,
    /// Emitted light level.
    #[serde(default)]
    pub light_source: u8,
    /// Face alpha override (255 = opaque).
    #[serde(default)]
    pub alpha: Option<u8>,
    /// Item handed out when dug.
    #[serde(default)]
    pub dug_item: Option<String>,
    /// Cooking result item.
    #[serde(default)]
    pub cook_result: Option<String>,
    /// Fuel burn duration in seconds.
    #[serde(default)]
    pub burn_time: Option<f32>,
}

/// Configuration for per-face textures.
///
/// Face order in the registry: 0 top (+Y), 1 bottom (−Y), 2 east (+X),
/// 3 west (−X), 4 south (+Z), 5 north (−Z).
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FaceTextureConfig {
    /// Apply to all faces when specified.
    pub all: Option<String>,
    /// Apply to all side faces when specified.
    pub side: Option<String>,
    /// Specific texture for the top face.
    pub top: Option<String>,
    /// Specific texture for the bottom face.
    pub bottom: Option<String>,
    /// Specific texture for the east (+X) face.
    pub east: Option<String>,
    /// Specific texture for the west (-X) face.
    pub west: Option<String>,
    /// Specific texture for the south (+Z) face.
    pub south: Option<String>,
    /// Specific texture for the north (-Z) face.
    pub north: Option<String>,
}

/// Errors emitted during pack loading.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Wrap IO errors when reading packs.
    #[error("failed to read definition pack: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap serde parsing issues.
    #[error("failed to parse definition pack: {0}")]
    Parse(#[from] serde_json::Error),
    /// A definition named a draw kind this build does not know.
    #[error("unknown draw kind \"{0}\"")]
    UnknownDrawKind(String),
    /// The registry ran out of identifiers for this definition.
    #[error("no free content id for \"{0}\"")]
    Exhausted(String),
    /// Registry-level failure while registering a definition.
    #[error(transparent)]
    Def(#[from] DefError),
}
