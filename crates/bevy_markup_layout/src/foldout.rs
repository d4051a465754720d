//! Persistent open/closed state of foldout sections.

use bevy::prelude::*;
use indexmap::IndexMap;

/// Identifies a foldout header in draw calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoldoutId {
    /// 1-based encounter order of a `#` heading within one pass.
    Section(u32),
    /// The trailing block of material-level options.
    Advanced,
}

/// Key a section's toggle is persisted under.
///
/// Keyed by heading text rather than position so reordering properties
/// does not hand one section's state to another. `occurrence` separates
/// headings that repeat the same text within one list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FoldoutKey {
    pub label: String,
    pub occurrence: u32,
}

impl FoldoutKey {
    pub fn new(label: impl Into<String>, occurrence: u32) -> Self {
        Self {
            label: label.into(),
            occurrence,
        }
    }
}

/// Session-scoped foldout toggles. Sections default to open.
#[derive(Resource, Debug, Clone)]
pub struct FoldoutState {
    sections: IndexMap<FoldoutKey, bool>,
    advanced_open: bool,
}

impl Default for FoldoutState {
    fn default() -> Self {
        Self {
            sections: IndexMap::new(),
            advanced_open: true,
        }
    }
}

impl FoldoutState {
    pub fn is_open(&self, key: &FoldoutKey) -> bool {
        self.sections.get(key).copied().unwrap_or(true)
    }

    pub fn set_open(&mut self, key: FoldoutKey, open: bool) {
        self.sections.insert(key, open);
    }

    pub fn advanced_open(&self) -> bool {
        self.advanced_open
    }

    pub fn set_advanced_open(&mut self, open: bool) {
        self.advanced_open = open;
    }

    /// Sections seen so far, in first-encounter order.
    pub fn sections(&self) -> impl Iterator<Item = (&FoldoutKey, bool)> {
        self.sections.iter().map(|(key, open)| (key, *open))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_sections_default_open() {
        let state = FoldoutState::default();
        assert!(state.is_open(&FoldoutKey::new("Surface", 0)));
        assert!(state.advanced_open());
        assert!(state.is_empty());
    }

    #[test]
    fn sections_keep_first_encounter_order() {
        let mut state = FoldoutState::default();
        state.set_open(FoldoutKey::new("B", 0), false);
        state.set_open(FoldoutKey::new("A", 0), true);
        state.set_open(FoldoutKey::new("B", 0), true);

        let labels: Vec<_> = state.sections().map(|(key, _)| key.label.as_str()).collect();
        assert_eq!(labels, ["B", "A"]);
    }

    #[test]
    fn repeated_headings_are_distinct() {
        let mut state = FoldoutState::default();
        state.set_open(FoldoutKey::new("Detail", 1), false);
        assert!(state.is_open(&FoldoutKey::new("Detail", 0)));
        assert!(!state.is_open(&FoldoutKey::new("Detail", 1)));
    }
}
