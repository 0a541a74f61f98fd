//! Fuzz-style property tests for the definition codecs.
//!
//! These validate that the decoders handle arbitrary input gracefully
//! and that generated descriptors survive the wire byte-for-byte.

use proptest::prelude::*;
use voxdef_registry::{
    BoxGeometry, ContentRegistry, FeatureDescriptor, GameContext, LiquidKind, MetadataTemplate,
    SurfaceSpec,
};

/// Values exactly representable in the thousandths fixed-point encoding.
fn fixed_point() -> impl Strategy<Value = f32> {
    (-1_000_000i32..1_000_000).prop_map(|v| v as f32 / 1000.0)
}

fn texture_name() -> impl Strategy<Value = String> {
    "[a-z0-9_.]{0,16}"
}

proptest! {
    /// Property: arbitrary bytes never panic the descriptor decoder.
    #[test]
    fn arbitrary_bytes_dont_crash_descriptor_decoder(
        random_bytes in prop::collection::vec(any::<u8>(), 0..2000),
    ) {
        let _result = FeatureDescriptor::deserialize(&mut &random_bytes[..], &GameContext);
        // No panic = success
    }

    /// Property: arbitrary bytes never panic the table decoder.
    #[test]
    fn arbitrary_bytes_dont_crash_table_decoder(
        random_bytes in prop::collection::vec(any::<u8>(), 0..4000),
    ) {
        let mut registry = ContentRegistry::new();
        let _result = registry.deserialize(&mut &random_bytes[..], &GameContext);
        // No panic = success
    }

    /// Property: arbitrary bytes never panic the geometry decoder.
    #[test]
    fn arbitrary_bytes_dont_crash_geometry_decoder(
        random_bytes in prop::collection::vec(any::<u8>(), 0..200),
    ) {
        let _result = BoxGeometry::deserialize(&mut &random_bytes[..]);
        // No panic = success
    }

    /// Property: generated descriptors roundtrip field-for-field.
    #[test]
    fn descriptors_roundtrip(
        name in texture_name(),
        tile in texture_name(),
        special_tex in texture_name(),
        culling in any::<bool>(),
        visual_scale in fixed_point(),
        alpha in any::<u8>(),
        flags in prop::collection::vec(any::<bool>(), 11),
        rarity in any::<i32>(),
        metadata in prop::option::of((any::<u16>(), prop::collection::vec(any::<u8>(), 0..64))),
        alt_flowing in any::<u16>(),
        alt_source in any::<u16>(),
        viscosity in any::<u8>(),
        light_source in any::<u8>(),
        damage in any::<u32>(),
        cook_time in fixed_point(),
        burn_time in fixed_point(),
    ) {
        let mut f = FeatureDescriptor::default();
        f.name = name;
        f.visual_scale = visual_scale;
        f.set_all_textures(&tile);
        f.set_special_surface(1, SurfaceSpec::new(special_tex, culling)).unwrap();
        f.alpha = alpha;
        f.is_ground_content = flags[0];
        f.light_propagates = flags[1];
        f.sunlight_propagates = flags[2];
        f.walkable = flags[3];
        f.pointable = flags[4];
        f.diggable = flags[5];
        f.climbable = flags[6];
        f.buildable_to = flags[7];
        f.wall_mounted = flags[8];
        f.air_equivalent = flags[9];
        f.often_contains_mineral = flags[10];
        f.extra_dug_item_rarity = rarity;
        f.initial_metadata = metadata.map(|(type_id, body)| MetadataTemplate::new(type_id, body));
        f.liquid_kind = LiquidKind::Source;
        f.liquid_alternative_flowing = alt_flowing;
        f.liquid_alternative_source = alt_source;
        f.liquid_viscosity = viscosity;
        f.light_source = light_source;
        f.damage_per_second = damage;
        f.cook_time = cook_time;
        f.burn_time = burn_time;

        let mut buf = Vec::new();
        f.serialize(&mut buf).unwrap();
        let decoded = FeatureDescriptor::deserialize(&mut &buf[..], &GameContext).unwrap();
        prop_assert_eq!(decoded, f);
    }

    /// Property: the second serialization of a reloaded descriptor is
    /// byte-identical to the first (the format has one canonical form).
    #[test]
    fn reserialization_is_byte_stable(
        name in texture_name(),
        tile in texture_name(),
        alpha in any::<u8>(),
    ) {
        let mut f = FeatureDescriptor::default();
        f.name = name;
        f.set_all_textures(&tile);
        f.alpha = alpha;

        let mut first = Vec::new();
        f.serialize(&mut first).unwrap();
        let decoded = FeatureDescriptor::deserialize(&mut &first[..], &GameContext).unwrap();
        let mut second = Vec::new();
        decoded.serialize(&mut second).unwrap();
        prop_assert_eq!(first, second);
    }
}
