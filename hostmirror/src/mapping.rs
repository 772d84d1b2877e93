use serde::{Deserialize, Serialize};

use crate::{is_valid_domain, StoreError, ValidationError};

/// One mirror rule: requests for `proxy` are served with the content of
/// `source`. Immutable once created; edits are modeled as remove + add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainMapping {
    pub source: String,
    pub proxy: String,
}

/// An ordered list of mappings, unique by source domain. Insertion order is
/// display and render order, so consumers can compose the generated blocks
/// into a configuration file in the sequence they want.
///
/// The store also carries the selection cursor used by single-mapping
/// previews. The cursor is runtime-only state and follows the selected
/// mapping through removals and reorderings.
#[derive(Debug, Default)]
pub struct MappingStore {
    mappings: Vec<DomainMapping>,
    selected: Option<usize>,
}

impl MappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from an untrusted list, for example one a consumer
    /// loaded from disk. Validation is replayed per entry, so file contents
    /// obey the same rules as interactive input.
    pub fn from_mappings(mappings: Vec<DomainMapping>) -> Result<Self, ValidationError> {
        let mut store = Self::new();
        for mapping in &mappings {
            store.add(&mapping.source, &mapping.proxy)?;
        }

        Ok(store)
    }

    /// Validates and appends a new mapping. On any error the store is left
    /// exactly as it was.
    pub fn add(&mut self, source: &str, proxy: &str) -> Result<&DomainMapping, ValidationError> {
        let source = source.trim();
        let proxy = proxy.trim();

        if source.is_empty() || proxy.is_empty() {
            return Err(ValidationError::MissingInput);
        }
        if !is_valid_domain(source) {
            return Err(ValidationError::MalformedSource(source.to_string()));
        }
        if !is_valid_domain(proxy) {
            return Err(ValidationError::MalformedProxy(proxy.to_string()));
        }
        // Proxy duplicates are fine: several sources may be mirrored through
        // the same proxy host.
        if self.mappings.iter().any(|m| m.source == source) {
            return Err(ValidationError::DuplicateSource(source.to_string()));
        }

        self.mappings.push(DomainMapping {
            source: source.to_string(),
            proxy: proxy.to_string(),
        });

        Ok(self.mappings.last().expect("mapping was just appended"))
    }

    /// Removes and returns the mapping at `position`. Later entries shift
    /// one position left; the selection is cleared if it pointed at the
    /// removed entry and shifted if it pointed past it.
    pub fn remove(&mut self, position: usize) -> Result<DomainMapping, StoreError> {
        if position >= self.mappings.len() {
            return Err(StoreError::OutOfRange {
                position,
                len: self.mappings.len(),
            });
        }

        let removed = self.mappings.remove(position);

        self.selected = match self.selected {
            Some(selected) if selected == position => None,
            Some(selected) if selected > position => Some(selected - 1),
            other => other,
        };

        Ok(removed)
    }

    /// Swaps the mapping at `position` with its predecessor. No-op for the
    /// first entry and for positions outside the list.
    pub fn move_up(&mut self, position: usize) {
        if position == 0 || position >= self.mappings.len() {
            return;
        }

        self.mappings.swap(position - 1, position);

        self.selected = match self.selected {
            Some(selected) if selected == position => Some(position - 1),
            Some(selected) if selected == position - 1 => Some(position),
            other => other,
        };
    }

    /// Swaps the mapping at `position` with its successor. No-op for the
    /// last entry and for positions outside the list.
    pub fn move_down(&mut self, position: usize) {
        if position + 1 >= self.mappings.len() {
            return;
        }

        self.mappings.swap(position, position + 1);

        self.selected = match self.selected {
            Some(selected) if selected == position => Some(position + 1),
            Some(selected) if selected == position + 1 => Some(position),
            other => other,
        };
    }

    pub fn select(&mut self, position: usize) -> Result<(), StoreError> {
        if position >= self.mappings.len() {
            return Err(StoreError::OutOfRange {
                position,
                len: self.mappings.len(),
            });
        }

        self.selected = Some(position);

        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&DomainMapping> {
        self.selected.map(|position| &self.mappings[position])
    }

    pub fn selected_position(&self) -> Option<usize> {
        self.selected
    }

    pub fn mappings(&self) -> &[DomainMapping] {
        &self.mappings
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(entries: &[(&str, &str)]) -> MappingStore {
        let mut store = MappingStore::new();
        for (source, proxy) in entries {
            store.add(source, proxy).unwrap();
        }
        store
    }

    #[test]
    fn add_appends_in_insertion_order() {
        let store = store_with(&[("a.com", "x.com"), ("b.com", "y.com")]);

        let sources: Vec<&str> = store.mappings().iter().map(|m| m.source.as_str()).collect();
        assert_eq!(sources, vec!["a.com", "b.com"]);
    }

    #[test]
    fn add_trims_surrounding_whitespace() {
        let mut store = MappingStore::new();
        store.add("  claude.ai  ", " claude.hubp.de ").unwrap();

        assert_eq!(store.mappings()[0].source, "claude.ai");
        assert_eq!(store.mappings()[0].proxy, "claude.hubp.de");
    }

    #[test]
    fn add_rejects_empty_fields() {
        let mut store = MappingStore::new();

        assert_eq!(store.add("", "x.com"), Err(ValidationError::MissingInput));
        assert_eq!(store.add("a.com", "   "), Err(ValidationError::MissingInput));
        assert!(store.is_empty());
    }

    #[test]
    fn add_rejects_malformed_domains() {
        let mut store = MappingStore::new();

        assert_eq!(
            store.add("bad_domain!", "x.com"),
            Err(ValidationError::MalformedSource("bad_domain!".to_string()))
        );
        assert_eq!(
            store.add("a.com", "-leading.com"),
            Err(ValidationError::MalformedProxy("-leading.com".to_string()))
        );
        assert!(store.is_empty());
    }

    #[test]
    fn duplicate_sources_rejected_duplicate_proxies_allowed() {
        let mut store = store_with(&[("a.com", "x.com")]);

        assert_eq!(
            store.add("a.com", "y.com"),
            Err(ValidationError::DuplicateSource("a.com".to_string()))
        );

        store.add("b.com", "x.com").unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn remove_shifts_later_entries_left() {
        let mut store = store_with(&[("a.com", "x.com"), ("b.com", "y.com"), ("c.com", "z.com")]);

        let removed = store.remove(1).unwrap();

        assert_eq!(removed.source, "b.com");
        assert_eq!(store.len(), 2);
        assert_eq!(store.mappings()[1].source, "c.com");
    }

    #[test]
    fn remove_out_of_range_is_an_error() {
        let mut store = store_with(&[("a.com", "x.com")]);

        assert_eq!(
            store.remove(3),
            Err(StoreError::OutOfRange { position: 3, len: 1 })
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn moves_at_the_boundaries_are_noops() {
        let mut store = store_with(&[("a.com", "x.com"), ("b.com", "y.com")]);

        store.move_up(0);
        store.move_down(1);
        store.move_up(10);
        store.move_down(10);

        assert_eq!(store.mappings()[0].source, "a.com");
        assert_eq!(store.mappings()[1].source, "b.com");
    }

    #[test]
    fn moves_swap_adjacent_entries() {
        let mut store = store_with(&[("a.com", "x.com"), ("b.com", "y.com"), ("c.com", "z.com")]);

        store.move_up(2);
        let sources: Vec<&str> = store.mappings().iter().map(|m| m.source.as_str()).collect();
        assert_eq!(sources, vec!["a.com", "c.com", "b.com"]);

        store.move_down(0);
        let sources: Vec<&str> = store.mappings().iter().map(|m| m.source.as_str()).collect();
        assert_eq!(sources, vec!["c.com", "a.com", "b.com"]);
    }

    #[test]
    fn selection_follows_the_selected_mapping_through_swaps() {
        let mut store = store_with(&[("a.com", "x.com"), ("b.com", "y.com"), ("c.com", "z.com")]);
        store.select(1).unwrap();

        store.move_up(1);
        assert_eq!(store.selected_position(), Some(0));
        assert_eq!(store.selected().unwrap().source, "b.com");

        store.move_down(0);
        assert_eq!(store.selected_position(), Some(1));

        // A neighbour swapped over the selection displaces it too.
        store.move_up(2);
        assert_eq!(store.selected_position(), Some(2));
        assert_eq!(store.selected().unwrap().source, "b.com");
    }

    #[test]
    fn removing_before_the_selection_shifts_it() {
        let mut store = store_with(&[("a.com", "x.com"), ("b.com", "y.com"), ("c.com", "z.com")]);
        store.select(2).unwrap();

        store.remove(0).unwrap();

        assert_eq!(store.selected_position(), Some(1));
        assert_eq!(store.selected().unwrap().source, "c.com");
    }

    #[test]
    fn removing_the_selected_mapping_clears_the_selection() {
        let mut store = store_with(&[("a.com", "x.com"), ("b.com", "y.com")]);
        store.select(1).unwrap();

        store.remove(1).unwrap();

        assert_eq!(store.selected_position(), None);
        assert!(store.selected().is_none());
    }

    #[test]
    fn removing_after_the_selection_leaves_it_alone() {
        let mut store = store_with(&[("a.com", "x.com"), ("b.com", "y.com")]);
        store.select(0).unwrap();

        store.remove(1).unwrap();

        assert_eq!(store.selected_position(), Some(0));
    }

    #[test]
    fn select_out_of_range_is_an_error() {
        let mut store = store_with(&[("a.com", "x.com")]);

        assert_eq!(
            store.select(1),
            Err(StoreError::OutOfRange { position: 1, len: 1 })
        );
        assert_eq!(store.selected_position(), None);
    }

    #[test]
    fn from_mappings_replays_validation() {
        let store = MappingStore::from_mappings(vec![
            DomainMapping {
                source: "a.com".to_string(),
                proxy: "x.com".to_string(),
            },
            DomainMapping {
                source: "b.com".to_string(),
                proxy: "x.com".to_string(),
            },
        ])
        .unwrap();
        assert_eq!(store.len(), 2);

        let duplicated = MappingStore::from_mappings(vec![
            DomainMapping {
                source: "a.com".to_string(),
                proxy: "x.com".to_string(),
            },
            DomainMapping {
                source: "a.com".to_string(),
                proxy: "y.com".to_string(),
            },
        ]);
        assert_eq!(
            duplicated.err(),
            Some(ValidationError::DuplicateSource("a.com".to_string()))
        );
    }
}
