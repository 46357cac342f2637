//! Selection state management.
//!
//! Selection uses [`RowId`]s for stability across data refreshes: a row is
//! selected iff its computed id is in the set, whatever row instance the
//! host passes in.

use std::collections::HashSet;

use crate::row::RowId;

/// ID-based selection state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: HashSet<RowId>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all selected IDs (sorted for deterministic ordering).
    pub fn ids(&self) -> Vec<RowId> {
        let mut ids: Vec<_> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Check if an ID is selected.
    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selected.contains(id)
    }

    /// Get the number of selected items.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Add an ID. Returns `true` if it was not selected before.
    pub fn insert(&mut self, id: RowId) -> bool {
        self.selected.insert(id)
    }

    /// Remove an ID. Returns `true` if it was selected.
    pub fn remove(&mut self, id: &RowId) -> bool {
        self.selected.remove(id)
    }

    /// Clear all selection.
    /// Returns the IDs that were deselected.
    pub fn clear(&mut self) -> Vec<RowId> {
        self.selected.drain().collect()
    }

    /// Toggle selection of an ID.
    /// Returns (added, removed) IDs.
    pub fn toggle(&mut self, id: &RowId) -> (Vec<RowId>, Vec<RowId>) {
        if self.selected.remove(id) {
            (vec![], vec![id.clone()])
        } else {
            self.selected.insert(id.clone());
            (vec![id.clone()], vec![])
        }
    }

    /// Whether every id in `ids` is selected. False for an empty slice.
    pub fn contains_all(&self, ids: &[RowId]) -> bool {
        !ids.is_empty() && ids.iter().all(|id| self.selected.contains(id))
    }

    /// Select all items from the provided list of IDs.
    /// Returns the IDs that were newly selected.
    pub fn select_all(&mut self, ids: &[RowId]) -> Vec<RowId> {
        let mut added = Vec::new();
        for id in ids {
            if self.selected.insert(id.clone()) {
                added.push(id.clone());
            }
        }
        added
    }

    /// Deselect exactly the provided IDs.
    /// Returns the IDs that were deselected.
    pub fn deselect_all(&mut self, ids: &[RowId]) -> Vec<RowId> {
        ids.iter()
            .filter(|id| self.selected.remove(*id))
            .cloned()
            .collect()
    }

    /// Select-all toggle scoped to `ids`.
    ///
    /// If every id is already selected, exactly those ids are deselected.
    /// Otherwise the missing ones are added. Ids outside `ids` are never
    /// touched. Returns (added, removed) IDs.
    pub fn toggle_all(&mut self, ids: &[RowId]) -> (Vec<RowId>, Vec<RowId>) {
        if self.contains_all(ids) {
            (vec![], self.deselect_all(ids))
        } else {
            (self.select_all(ids), vec![])
        }
    }

    /// Iterate over the selected IDs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &RowId> {
        self.selected.iter()
    }
}

impl FromIterator<RowId> for Selection {
    fn from_iter<I: IntoIterator<Item = RowId>>(iter: I) -> Self {
        Self {
            selected: iter.into_iter().collect(),
        }
    }
}
