//! Table-level serialization round-trips.
//!
//! Serializes a populated registry into the count-prefixed blob format
//! and validates that a fresh registry reloads every non-reserved entry
//! identically, that reserved slots always come back at their fixed
//! defaults, and that malformed entries degrade the way the format
//! promises.

use voxdef_core::{wire, CONTENT_AIR, CONTENT_IGNORE, MAX_CONTENT};
use voxdef_registry::{
    ContentRegistry, DefError, DrawKind, FeatureDescriptor, GameContext, LiquidKind,
    MetadataTemplate, ParamKind, SurfaceSpec,
};

fn stone() -> FeatureDescriptor {
    let mut f = FeatureDescriptor::default();
    f.name = "stone".to_string();
    f.set_all_textures("stone.png");
    f.is_ground_content = true;
    f.often_contains_mineral = true;
    f.dug_item = "cobble".to_string();
    f
}

fn torch() -> FeatureDescriptor {
    let mut f = FeatureDescriptor::default();
    f.name = "torch".to_string();
    f.draw_kind = DrawKind::TorchLike;
    f.set_all_textures("torch.png");
    f.param_kind = ParamKind::Light;
    f.light_source = 13;
    f.walkable = false;
    f.wall_mounted = true;
    f
}

fn water_source() -> FeatureDescriptor {
    let mut f = FeatureDescriptor::default();
    f.name = "water_source".to_string();
    f.draw_kind = DrawKind::Liquid;
    f.set_all_textures("water.png");
    f.alpha = 160;
    f.liquid_kind = LiquidKind::Source;
    f.liquid_viscosity = 1;
    f.set_special_surface(0, SurfaceSpec::new("water_surface.png", false))
        .unwrap();
    f
}

fn chest() -> FeatureDescriptor {
    let mut f = FeatureDescriptor::default();
    f.name = "chest".to_string();
    f.set_all_textures("chest.png");
    f.initial_metadata = Some(MetadataTemplate::new(1, b"8 slots".to_vec()));
    f
}

#[test]
fn populated_table_roundtrips() {
    let mut source = ContentRegistry::new();
    let stone_id = source.set_by_name("stone", stone()).unwrap();
    let torch_id = source.set_by_name("torch", torch()).unwrap();
    let water_id = source.set_by_name("water_source", water_source()).unwrap();
    let chest_id = source.set_by_name("chest", chest()).unwrap();

    let mut blob = Vec::new();
    source.serialize(&mut blob).unwrap();

    let mut reloaded = ContentRegistry::new();
    reloaded.deserialize(&mut &blob[..], &GameContext).unwrap();

    for (id, name) in [
        (stone_id, "stone"),
        (torch_id, "torch"),
        (water_id, "water_source"),
        (chest_id, "chest"),
    ] {
        assert_eq!(
            reloaded.get(id).unwrap(),
            source.get(id).unwrap(),
            "slot {name} must reload identically"
        );
        assert_eq!(reloaded.get_id_by_name(name), Some(id));
    }

    // The metadata template came back as an owned value.
    assert_eq!(
        reloaded.get(chest_id).unwrap().initial_metadata,
        Some(MetadataTemplate::new(1, b"8 slots".to_vec()))
    );

    // Slots nobody registered are still the unknown-texture default.
    let untouched = reloaded.get(3).unwrap();
    assert!(untouched.name.is_empty());
}

#[test]
fn reserved_slots_always_reload_to_fixed_defaults() {
    let mut source = ContentRegistry::new();
    source.set_by_name("stone", stone()).unwrap();

    // Vandalize a reserved slot before serializing; the wire format
    // never carries it, so the receiver rebuilds the real thing.
    let mut rogue = FeatureDescriptor::default();
    rogue.name = "air".to_string();
    rogue.walkable = true;
    rogue.damage_per_second = 99;
    source.set(CONTENT_AIR, rogue).unwrap();

    let mut blob = Vec::new();
    source.serialize(&mut blob).unwrap();

    let mut reloaded = ContentRegistry::new();
    reloaded.deserialize(&mut &blob[..], &GameContext).unwrap();

    let pristine = ContentRegistry::new();
    for id in [CONTENT_AIR, CONTENT_IGNORE] {
        assert_eq!(reloaded.get(id).unwrap(), pristine.get(id).unwrap());
    }
    assert!(!reloaded.get(CONTENT_AIR).unwrap().walkable);
}

#[test]
fn out_of_range_entry_is_skipped_and_the_rest_load() {
    // Hand-build a table blob: a valid entry, a poisoned one, then
    // another valid one, all inside a single length-framed payload.
    let mut entries = Vec::new();

    wire::write_u16(&mut entries, 5).unwrap();
    stone().serialize(&mut entries).unwrap();

    let mut bad = FeatureDescriptor::default();
    bad.name = "from_the_future".to_string();
    wire::write_u16(&mut entries, MAX_CONTENT + 1).unwrap();
    bad.serialize(&mut entries).unwrap();

    wire::write_u16(&mut entries, 9).unwrap();
    torch().serialize(&mut entries).unwrap();

    let mut blob = Vec::new();
    wire::write_u16(&mut blob, 3).unwrap();
    wire::write_bytes32(&mut blob, &entries).unwrap();

    let mut registry = ContentRegistry::new();
    registry.deserialize(&mut &blob[..], &GameContext).unwrap();

    assert_eq!(registry.get(5).unwrap().name, "stone");
    assert_eq!(registry.get(9).unwrap().name, "torch");
    assert_eq!(registry.get_id_by_name("from_the_future"), None);
}

#[test]
fn version_mismatch_inside_an_entry_aborts_the_load() {
    let mut entries = Vec::new();
    wire::write_u16(&mut entries, 5).unwrap();
    let mut descriptor_bytes = Vec::new();
    stone().serialize(&mut descriptor_bytes).unwrap();
    descriptor_bytes[0] = 7; // unsupported descriptor version
    entries.extend_from_slice(&descriptor_bytes);

    let mut blob = Vec::new();
    wire::write_u16(&mut blob, 1).unwrap();
    wire::write_bytes32(&mut blob, &entries).unwrap();

    let mut registry = ContentRegistry::new();
    let result = registry.deserialize(&mut &blob[..], &GameContext);
    assert!(matches!(result, Err(DefError::UnsupportedVersion(7))));
}

#[test]
fn serialize_counts_only_named_non_reserved_slots() {
    let mut registry = ContentRegistry::new();
    registry.set_by_name("stone", stone()).unwrap();
    registry.set_by_name("torch", torch()).unwrap();

    let mut blob = Vec::new();
    registry.serialize(&mut blob).unwrap();

    // Leading u16 is the entry count: the two registered descriptors,
    // with air/ignore and the 4000-odd empty slots excluded.
    assert_eq!(&blob[..2], [0, 2]);
}

#[test]
fn roundtrip_after_a_clone_matches_the_snapshot() {
    let mut registry = ContentRegistry::new();
    registry.set_by_name("stone", stone()).unwrap();
    let snapshot = registry.clone();
    registry.set_by_name("chest", chest()).unwrap();

    let mut blob = Vec::new();
    snapshot.serialize(&mut blob).unwrap();

    let mut reloaded = ContentRegistry::new();
    reloaded.deserialize(&mut &blob[..], &GameContext).unwrap();

    assert_eq!(reloaded.get_id_by_name("chest"), None);
    let stone_id = reloaded.get_id_by_name("stone").unwrap();
    assert_eq!(reloaded.get(stone_id).unwrap(), snapshot.get(stone_id).unwrap());
}
