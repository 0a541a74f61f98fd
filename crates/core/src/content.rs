//! The content identifier space.
//!
//! Identifiers are dense `u16` keys into the definition registry. Two of
//! them are reserved and always present; the rest are handed out from two
//! disjoint pools depending on how much of the auxiliary per-voxel
//! parameter byte a descriptor needs.

use std::ops::RangeInclusive;

/// Content identifier referencing the registry.
pub type ContentId = u16;

/// Highest representable content identifier.
pub const MAX_CONTENT: ContentId = 0x0fff;

/// Reserved identifier for the always-present "air" descriptor.
pub const CONTENT_AIR: ContentId = 126;

/// Reserved identifier for the always-present "ignore" descriptor.
///
/// Doubles as the allocator's "no free identifier" sentinel and as the
/// fallback slot for unresolved name lookups.
pub const CONTENT_IGNORE: ContentId = 127;

/// Allocation pool whose members keep the full auxiliary parameter byte.
pub const FULL_PARAM_POOL: RangeInclusive<ContentId> = 0..=125;

/// Allocation pool whose members only get part of the auxiliary
/// parameter byte.
pub const PARTIAL_PARAM_POOL: RangeInclusive<ContentId> = 0x800..=0x0fff;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_ids_outside_both_pools() {
        for reserved in [CONTENT_AIR, CONTENT_IGNORE] {
            assert!(!FULL_PARAM_POOL.contains(&reserved));
            assert!(!PARTIAL_PARAM_POOL.contains(&reserved));
            assert!(reserved <= MAX_CONTENT);
        }
    }

    #[test]
    fn pools_are_disjoint() {
        assert!(FULL_PARAM_POOL.end() < PARTIAL_PARAM_POOL.start());
        assert_eq!(*PARTIAL_PARAM_POOL.end(), MAX_CONTENT);
    }
}
