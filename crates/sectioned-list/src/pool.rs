//! The view-recycling pool.
//!
//! Cells are expensive to build relative to re-binding, so the engine
//! keeps every cell it has ever produced and hands detached ones back out
//! instead of constructing new ones on each scroll step. Freedom is
//! decided by probing the cell's [`AttachmentLink`] at acquisition time,
//! so the pool never needs its own bookkeeping of what is on screen.

use std::collections::HashMap;
use std::sync::Arc;

use crate::cell::{CellKind, HeaderCell, RowCell};

/// A keyed cache of reusable visual cells.
///
/// Row cells are kept per [`CellKind`]; header cells live under the fixed
/// [`CellKind::HEADER`] kind in their own collection. Cells are never
/// evicted individually; the whole pool is discarded when the cell
/// factory changes.
pub struct ViewPool<T> {
    rows: HashMap<CellKind, Vec<Arc<dyn RowCell<T>>>>,
    headers: Vec<Arc<dyn HeaderCell>>,
}

impl<T> Default for ViewPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ViewPool<T> {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self {
            rows: HashMap::new(),
            headers: Vec::new(),
        }
    }

    /// Hands out a free row cell of the given kind.
    ///
    /// Returns the first pooled cell of that kind whose attachment link
    /// is currently empty, or `None` when every pooled cell is on screen
    /// (the caller then builds a new one and registers it with
    /// [`release_row`](Self::release_row)). Never returns an attached
    /// cell.
    pub fn acquire_row(&self, kind: CellKind) -> Option<Arc<dyn RowCell<T>>> {
        self.rows
            .get(&kind)?
            .iter()
            .find(|cell| !cell.attachment().is_attached())
            .cloned()
    }

    /// Hands out a free header cell, if one is detached.
    pub fn acquire_header(&self) -> Option<Arc<dyn HeaderCell>> {
        self.headers
            .iter()
            .find(|cell| !cell.attachment().is_attached())
            .cloned()
    }

    /// Registers a row cell for later reuse.
    ///
    /// Appends unconditionally; callers release a cell exactly once, on
    /// first construction, to avoid duplicate entries.
    pub fn release_row(&mut self, kind: CellKind, cell: Arc<dyn RowCell<T>>) {
        self.rows.entry(kind).or_default().push(cell);
    }

    /// Registers a header cell for later reuse.
    pub fn release_header(&mut self, cell: Arc<dyn HeaderCell>) {
        self.headers.push(cell);
    }

    /// Returns how many row cells of the given kind are pooled,
    /// attached or not.
    pub fn row_count(&self, kind: CellKind) -> usize {
        self.rows.get(&kind).map_or(0, Vec::len)
    }

    /// Returns how many header cells are pooled, attached or not.
    pub fn header_count(&self) -> usize {
        self.headers.len()
    }

    /// Discards every pooled cell.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.headers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{ContainerId, LabelCell, ViewCell};

    const STRING: CellKind = CellKind("string");

    fn row_cell(text: &str) -> Arc<dyn RowCell<String>> {
        Arc::new(LabelCell::new(text, ""))
    }

    #[test]
    fn test_acquire_from_empty_pool() {
        let pool: ViewPool<String> = ViewPool::new();
        assert!(pool.acquire_row(STRING).is_none());
        assert!(pool.acquire_header().is_none());
    }

    #[test]
    fn test_release_then_acquire_returns_same_instance() {
        let mut pool: ViewPool<String> = ViewPool::new();
        let cell = row_cell("a1");
        pool.release_row(STRING, cell.clone());

        let acquired = pool.acquire_row(STRING).unwrap();
        assert!(Arc::ptr_eq(&cell, &acquired));
    }

    #[test]
    fn test_acquire_never_returns_attached_cell() {
        let mut pool: ViewPool<String> = ViewPool::new();
        let attached = row_cell("a1");
        attached.attachment().attach(ContainerId::next());
        pool.release_row(STRING, attached.clone());

        assert!(pool.acquire_row(STRING).is_none());

        let free = row_cell("a2");
        pool.release_row(STRING, free.clone());
        let acquired = pool.acquire_row(STRING).unwrap();
        assert!(Arc::ptr_eq(&free, &acquired));
        assert!(!acquired.attachment().is_attached());
    }

    #[test]
    fn test_detaching_makes_cell_available_again() {
        let mut pool: ViewPool<String> = ViewPool::new();
        let cell = row_cell("a1");
        cell.attachment().attach(ContainerId::next());
        pool.release_row(STRING, cell.clone());
        assert!(pool.acquire_row(STRING).is_none());

        cell.attachment().detach();
        let acquired = pool.acquire_row(STRING).unwrap();
        assert!(Arc::ptr_eq(&cell, &acquired));
    }

    #[test]
    fn test_kinds_are_isolated() {
        let mut pool: ViewPool<String> = ViewPool::new();
        pool.release_row(STRING, row_cell("a1"));

        assert!(pool.acquire_row(CellKind("badge")).is_none());
        assert_eq!(pool.row_count(STRING), 1);
        assert_eq!(pool.row_count(CellKind("badge")), 0);
    }

    #[test]
    fn test_clear_discards_everything() {
        let mut pool: ViewPool<String> = ViewPool::new();
        pool.release_row(STRING, row_cell("a1"));
        pool.release_header(Arc::new(LabelCell::new("A", "")));

        pool.clear();
        assert_eq!(pool.row_count(STRING), 0);
        assert_eq!(pool.header_count(), 0);
        assert!(pool.acquire_row(STRING).is_none());
        assert!(pool.acquire_header().is_none());
    }
}
