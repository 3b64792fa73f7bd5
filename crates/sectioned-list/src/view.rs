//! The sectioned list orchestrator.
//!
//! [`SectionedListView`] owns the pieces the rest of the crate provides:
//! the data source reference, the cell factory, the installed
//! [`FlattenedSequence`], the [`ViewPool`], and both selection halves.
//! Assigning a data source or factory triggers a full reload; the hosting
//! viewport drives rendering through containers created by
//! [`create_container`](SectionedListView::create_container).

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::cell::{CellKind, DefaultCellFactory, HeaderCell, RowCell, SectionItem,
    SectionedCellFactory};
use crate::container::CellContainer;
use crate::data_source::SectionDataSource;
use crate::error::Result;
use crate::flatten::{DisplayItem, FlattenedSequence, flatten};
use crate::index_path::IndexPath;
use crate::pool::ViewPool;
use crate::selection::{SelectionModel, SelectionTracker};
use crate::signal::Signal;

struct ListState<T: SectionItem> {
    data_source: Option<Arc<dyn SectionDataSource<T>>>,
    factory: Option<Arc<dyn SectionedCellFactory<T>>>,
    fallback_factory: Arc<dyn SectionedCellFactory<T>>,
    sequence: FlattenedSequence<T>,
    pool: ViewPool<T>,
    tracker: SelectionTracker<T>,
    selection: SelectionModel,
    outer_cell_style: Option<String>,
}

/// Shared core between the view handle and its containers.
///
/// Containers hold the `Weak` side so a torn-down view degrades their
/// binds to no-ops instead of dangling.
pub(crate) struct ListCore<T: SectionItem> {
    state: Mutex<ListState<T>>,
    reloaded: Signal<usize>,
    clicked: Signal<IndexPath>,
    selection_changed: Signal<(Vec<usize>, Vec<usize>)>,
}

impl<T: SectionItem> ListCore<T> {
    pub(crate) fn display_item(&self, position: usize) -> Option<DisplayItem<T>> {
        self.state.lock().sequence.get(position).cloned()
    }

    /// Resolves a header title live from the data source.
    ///
    /// The source is queried outside the state lock so a (forbidden but
    /// possible) reentrant call does not deadlock.
    pub(crate) fn section_title(&self, section: usize) -> Option<String> {
        let source = self.state.lock().data_source.clone()?;
        Some(source.section_title(section))
    }

    pub(crate) fn factory(&self) -> Arc<dyn SectionedCellFactory<T>> {
        let state = self.state.lock();
        state
            .factory
            .clone()
            .unwrap_or_else(|| state.fallback_factory.clone())
    }

    pub(crate) fn acquire_header(&self) -> Option<Arc<dyn HeaderCell>> {
        self.state.lock().pool.acquire_header()
    }

    pub(crate) fn acquire_row(&self, kind: CellKind) -> Option<Arc<dyn RowCell<T>>> {
        self.state.lock().pool.acquire_row(kind)
    }

    pub(crate) fn release_header(&self, cell: Arc<dyn HeaderCell>) {
        self.state.lock().pool.release_header(cell);
    }

    pub(crate) fn release_row(&self, kind: CellKind, cell: Arc<dyn RowCell<T>>) {
        self.state.lock().pool.release_row(kind, cell);
    }

    /// Toggles selection of a bound row, keeping the identity tracker
    /// and the positional model in step, then notifies listeners.
    pub(crate) fn toggle_selection(&self, position: usize, path: IndexPath, raw: T) {
        let (selected, deselected) = {
            let mut state = self.state.lock();
            if state.tracker.toggle(&raw) {
                state.selection.select(position);
                (vec![position], Vec::new())
            } else {
                state.selection.deselect(position);
                (Vec::new(), vec![position])
            }
        };
        self.clicked.emit(path);
        self.selection_changed.emit((selected, deselected));
    }
}

/// A sectioned list presentation engine.
///
/// Maps a [`SectionDataSource`] into a flat, position-addressable display
/// sequence, recycles visual cells through a kind-keyed pool, and keeps
/// an identity-based selection alive across reloads.
///
/// Dropping every `SectionedListView` handle tears the engine down;
/// containers still held by the host then bind as no-ops.
///
/// # Example
///
/// ```
/// use sectioned_list::{IndexPath, SectionDataSource, SectionedListView};
/// use std::sync::Arc;
///
/// struct Single;
///
/// impl SectionDataSource<String> for Single {
///     fn section_count(&self) -> usize {
///         1
///     }
///     fn has_section_header(&self, _section: usize) -> bool {
///         true
///     }
///     fn section_title(&self, _section: usize) -> String {
///         "Fruit".into()
///     }
///     fn row_count(&self, _section: usize) -> usize {
///         1
///     }
///     fn item(&self, _path: IndexPath) -> Option<String> {
///         Some("apple".into())
///     }
/// }
///
/// let view = SectionedListView::with_data_source(Arc::new(Single)).unwrap();
/// assert_eq!(view.item_count(), 2); // header + row
///
/// let slot = view.create_container();
/// slot.bind(1);
/// slot.handle_click();
/// assert_eq!(view.selected_raw_items(), vec!["apple".to_string()]);
/// ```
pub struct SectionedListView<T: SectionItem> {
    core: Arc<ListCore<T>>,
}

impl<T: SectionItem> Clone for SectionedListView<T> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

impl<T: SectionItem + fmt::Display> Default for SectionedListView<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SectionItem + fmt::Display> SectionedListView<T> {
    /// Creates an empty view using the built-in label cell factory.
    pub fn new() -> Self {
        Self::with_cell_factory(Arc::new(DefaultCellFactory))
    }

    /// Creates a view over the given data source, reloading immediately.
    pub fn with_data_source(source: Arc<dyn SectionDataSource<T>>) -> Result<Self> {
        let view = Self::new();
        view.set_data_source(Some(source))?;
        Ok(view)
    }
}

impl<T: SectionItem> SectionedListView<T> {
    /// Creates an empty view whose fallback factory is `factory`.
    ///
    /// Use this instead of [`new`](Self::new) when the raw item type does
    /// not implement `Display` and the built-in label factory therefore
    /// cannot serve as the fallback.
    pub fn with_cell_factory(factory: Arc<dyn SectionedCellFactory<T>>) -> Self {
        Self {
            core: Arc::new(ListCore {
                state: Mutex::new(ListState {
                    data_source: None,
                    factory: None,
                    fallback_factory: factory,
                    sequence: FlattenedSequence::default(),
                    pool: ViewPool::new(),
                    tracker: SelectionTracker::new(),
                    selection: SelectionModel::new(),
                    outer_cell_style: None,
                }),
                reloaded: Signal::new(),
                clicked: Signal::new(),
                selection_changed: Signal::new(),
            }),
        }
    }

    // =========================================================================
    // Reloading
    // =========================================================================

    /// Rebuilds the display sequence from the data source.
    ///
    /// The new sequence is flattened in full before it replaces the old
    /// one, so a failing data source leaves the previous sequence
    /// installed. Without a data source an empty sequence is installed.
    /// Ends by re-projecting the tracked selection onto the new sequence.
    /// Idempotent; redundant calls only cost the re-query.
    pub fn reload(&self) -> Result<()> {
        let source = self.core.state.lock().data_source.clone();
        let sequence = match source {
            Some(source) => flatten(source.as_ref())?,
            None => FlattenedSequence::default(),
        };
        let count = sequence.len();

        let (selected, deselected) = {
            let mut state = self.core.state.lock();
            state.sequence = sequence;
            let deselected = state.selection.clear();
            let matched = state.tracker.matched_positions(&state.sequence);
            for &position in &matched {
                state.selection.select(position);
            }
            (matched, deselected)
        };

        debug!(items = count, "reloaded sectioned list");
        self.core.reloaded.emit(count);
        if !selected.is_empty() || !deselected.is_empty() {
            self.core.selection_changed.emit((selected, deselected));
        }
        Ok(())
    }

    /// Installs a new data source and reloads.
    pub fn set_data_source(&self, source: Option<Arc<dyn SectionDataSource<T>>>) -> Result<()> {
        self.core.state.lock().data_source = source;
        self.reload()
    }

    /// Installs a new cell factory and reloads.
    ///
    /// `None` falls back to the factory the view was created with. The
    /// pool is discarded, since cells built by the previous factory may
    /// not match the new factory's output.
    pub fn set_cell_factory(&self, factory: Option<Arc<dyn SectionedCellFactory<T>>>) -> Result<()> {
        {
            let mut state = self.core.state.lock();
            state.factory = factory;
            state.pool.clear();
        }
        self.reload()
    }

    /// Sets the style applied to every container created afterwards.
    ///
    /// Triggers a reload only when the style is non-blank, matching how
    /// restyling is expected to refresh visible cells.
    pub fn set_outer_cell_style(&self, style: impl Into<String>) -> Result<()> {
        let style = style.into();
        let blank = style.trim().is_empty();
        self.core.state.lock().outer_cell_style = Some(style);
        if blank { Ok(()) } else { self.reload() }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the number of sections, 0 without a data source.
    pub fn section_count(&self) -> usize {
        let source = self.core.state.lock().data_source.clone();
        source.map_or(0, |source| source.section_count())
    }

    /// Returns the number of rows in a section, 0 without a data source.
    pub fn row_count(&self, section: usize) -> usize {
        let source = self.core.state.lock().data_source.clone();
        source.map_or(0, |source| source.row_count(section))
    }

    /// Returns the length of the installed display sequence.
    pub fn item_count(&self) -> usize {
        self.core.state.lock().sequence.len()
    }

    /// Returns the display item at a position of the installed sequence.
    pub fn display_item(&self, position: usize) -> Option<DisplayItem<T>> {
        self.core.display_item(position)
    }

    /// Returns the selected raw items, in selection order.
    ///
    /// Items that vanished from the data in the meantime are still
    /// reported; see [`SelectionTracker`] for the rationale.
    pub fn selected_raw_items(&self) -> Vec<T> {
        self.core.state.lock().tracker.selected_items().to_vec()
    }

    /// Returns every row item of the installed sequence that is not
    /// selected, in sequence order.
    pub fn non_selected_raw_items(&self) -> Vec<T> {
        let state = self.core.state.lock();
        state.tracker.non_selected_items(&state.sequence)
    }

    /// Returns the host-selected positions of the installed sequence.
    pub fn selected_positions(&self) -> Vec<usize> {
        self.core.state.lock().selection.selected_positions().to_vec()
    }

    /// Returns whether a position is host-selected.
    pub fn is_position_selected(&self, position: usize) -> bool {
        self.core.state.lock().selection.is_selected(position)
    }

    // =========================================================================
    // Host integration
    // =========================================================================

    /// Creates a new outer slot for the hosting viewport.
    ///
    /// The slot captures the current outer-cell style and a weak
    /// reference back to this view.
    pub fn create_container(&self) -> CellContainer<T> {
        let style = self.core.state.lock().outer_cell_style.clone();
        CellContainer::new(Arc::downgrade(&self.core), style)
    }

    /// Emitted after every successful reload with the new item count.
    pub fn reloaded(&self) -> &Signal<usize> {
        &self.core.reloaded
    }

    /// Emitted when a row slot is clicked. Header clicks are ignored.
    pub fn clicked(&self) -> &Signal<IndexPath> {
        &self.core.clicked
    }

    /// Emitted when positional selection changes, with the
    /// `(selected, deselected)` positions.
    pub fn selection_changed(&self) -> &Signal<(Vec<usize>, Vec<usize>)> {
        &self.core.selection_changed
    }
}
