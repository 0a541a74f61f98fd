//! Bidirectional name ↔ content identifier mapping.

use crate::content::ContentId;
use std::collections::{BTreeMap, HashMap};

/// Bidirectional lookup table between descriptor names and identifiers.
///
/// The registry owns one of these and decides when entries are added; the
/// table itself only guarantees that the name → id direction stays the
/// unique reverse of the id → name direction.
/// Uses BTreeMap for deterministic id iteration order.
#[derive(Debug, Clone, Default)]
pub struct NameIdTable {
    id_to_name: BTreeMap<ContentId, String>,
    name_to_id: HashMap<String, ContentId>,
}

impl NameIdTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `id`, overwriting any prior binding for that id.
    ///
    /// A name displaced from the id loses its reverse entry so the
    /// name → id map never points at a slot holding a different name.
    pub fn set(&mut self, id: ContentId, name: &str) {
        if let Some(old) = self.id_to_name.insert(id, name.to_string()) {
            if old != name {
                self.name_to_id.remove(&old);
            }
        }
        self.name_to_id.insert(name.to_string(), id);
    }

    /// Resolve a name to its identifier.
    pub fn get_id(&self, name: &str) -> Option<ContentId> {
        self.name_to_id.get(name).copied()
    }

    /// Resolve an identifier to its name.
    pub fn get_name(&self, id: ContentId) -> Option<&str> {
        self.id_to_name.get(&id).map(String::as_str)
    }

    /// Remove all bindings.
    pub fn clear(&mut self) {
        self.id_to_name.clear();
        self.name_to_id.clear();
    }

    /// Number of bound identifiers.
    pub fn len(&self) -> usize {
        self.id_to_name.len()
    }

    /// Returns true when no identifier is bound.
    pub fn is_empty(&self) -> bool {
        self.id_to_name.is_empty()
    }

    /// Iterate bindings in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (ContentId, &str)> {
        self.id_to_name.iter().map(|(id, name)| (*id, name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_lookup_both_directions() {
        let mut table = NameIdTable::new();
        table.set(5, "stone");
        table.set(9, "dirt");

        assert_eq!(table.get_id("stone"), Some(5));
        assert_eq!(table.get_id("dirt"), Some(9));
        assert_eq!(table.get_name(5), Some("stone"));
        assert_eq!(table.get_name(9), Some("dirt"));
        assert_eq!(table.get_id("gravel"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn rebinding_an_id_drops_the_stale_name() {
        let mut table = NameIdTable::new();
        table.set(5, "stone");
        table.set(5, "cobble");

        assert_eq!(table.get_name(5), Some("cobble"));
        assert_eq!(table.get_id("cobble"), Some(5));
        assert_eq!(table.get_id("stone"), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn clear_removes_everything() {
        let mut table = NameIdTable::new();
        table.set(1, "a");
        table.set(2, "b");
        table.clear();

        assert!(table.is_empty());
        assert_eq!(table.get_id("a"), None);
        assert_eq!(table.get_name(1), None);
    }

    #[test]
    fn iteration_is_id_ordered() {
        let mut table = NameIdTable::new();
        table.set(9, "c");
        table.set(1, "a");
        table.set(4, "b");

        let ids: Vec<ContentId> = table.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, [1, 4, 9]);
    }
}
