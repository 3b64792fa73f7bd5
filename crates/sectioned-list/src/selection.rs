//! Selection tracking across reloads.
//!
//! Two cooperating pieces keep selection correct while positions shift:
//!
//! - [`SelectionTracker`] remembers *which raw items* are selected, by
//!   value equality, independent of any position.
//! - [`SelectionModel`] holds the host viewport's *positional* selection,
//!   which is invalidated by every reload and re-projected from the
//!   tracker afterwards.

use crate::flatten::FlattenedSequence;

/// An identity-based set of selected raw items.
///
/// Membership uses the raw item's `PartialEq`, not positional identity,
/// so a selection survives reloads that reorder or reshuffle sections.
/// The set never contains header markers. Items that vanish from the
/// data are deliberately *not* pruned: they stay logically selected and
/// re-appear highlighted if later reloads bring them back. Callers that
/// drop items for good should call [`clear`](Self::clear) (or toggle the
/// items off) when semantically appropriate.
#[derive(Clone, Debug, Default)]
pub struct SelectionTracker<T> {
    selected: Vec<T>,
}

impl<T: PartialEq + Clone> SelectionTracker<T> {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            selected: Vec::new(),
        }
    }

    /// Toggles membership of an item.
    ///
    /// Removes the first equal item if present, otherwise appends a
    /// clone. Returns `true` if the item is selected afterwards.
    pub fn toggle(&mut self, item: &T) -> bool {
        if let Some(position) = self.selected.iter().position(|selected| selected == item) {
            self.selected.remove(position);
            false
        } else {
            self.selected.push(item.clone());
            true
        }
    }

    /// Returns `true` if an equal item is currently selected.
    pub fn is_selected(&self, item: &T) -> bool {
        self.selected.contains(item)
    }

    /// Returns the selected raw items in selection order.
    pub fn selected_items(&self) -> &[T] {
        &self.selected
    }

    /// Returns every row raw item of `sequence` that is not selected,
    /// in sequence order.
    pub fn non_selected_items(&self, sequence: &FlattenedSequence<T>) -> Vec<T> {
        sequence
            .rows()
            .filter(|&(_, raw)| !self.is_selected(raw))
            .map(|(_, raw)| (*raw).clone())
            .collect()
    }

    /// Finds the position of each selected item in a freshly flattened
    /// sequence, in selection order.
    ///
    /// For each selected item the first row with an equal raw value is
    /// matched; items absent from the sequence contribute nothing. This
    /// scan is O(selected × sequence length), acceptable because
    /// selections are small relative to list length.
    pub fn matched_positions(&self, sequence: &FlattenedSequence<T>) -> Vec<usize> {
        self.selected
            .iter()
            .filter_map(|selected| {
                sequence
                    .rows()
                    .find(|(_, raw)| *raw == selected)
                    .map(|(position, _)| position)
            })
            .collect()
    }

    /// Returns the number of selected items.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Deselects everything.
    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

/// The host viewport's positional selection.
///
/// Tracks which positions of the currently installed sequence are marked
/// selected, in selection order, with a sorted lookup vector for cheap
/// membership tests. Positions mean nothing across reloads; the
/// orchestrator clears and re-fills this model during resync.
#[derive(Clone, Debug, Default)]
pub struct SelectionModel {
    order: Vec<usize>,
    lookup: Vec<usize>,
}

impl SelectionModel {
    /// Creates an empty selection model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a position selected. Duplicate selects are no-ops.
    ///
    /// Returns `true` if the position was newly selected.
    pub fn select(&mut self, position: usize) -> bool {
        match self.lookup.binary_search(&position) {
            Ok(_) => false,
            Err(slot) => {
                self.lookup.insert(slot, position);
                self.order.push(position);
                true
            }
        }
    }

    /// Unmarks a position. Returns `true` if it was selected.
    pub fn deselect(&mut self, position: usize) -> bool {
        match self.lookup.binary_search(&position) {
            Ok(slot) => {
                self.lookup.remove(slot);
                self.order.retain(|&selected| selected != position);
                true
            }
            Err(_) => false,
        }
    }

    /// Returns `true` if the position is marked selected.
    pub fn is_selected(&self, position: usize) -> bool {
        self.lookup.binary_search(&position).is_ok()
    }

    /// Returns the selected positions in selection order.
    pub fn selected_positions(&self) -> &[usize] {
        &self.order
    }

    /// Returns `true` if any position is selected.
    pub fn has_selection(&self) -> bool {
        !self.order.is_empty()
    }

    /// Returns the number of selected positions.
    pub fn selected_count(&self) -> usize {
        self.order.len()
    }

    /// Unmarks every position, returning the previously selected ones.
    pub fn clear(&mut self) -> Vec<usize> {
        self.lookup.clear();
        std::mem::take(&mut self.order)
    }
}
