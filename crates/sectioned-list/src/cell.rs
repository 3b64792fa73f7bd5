//! Cell abstractions: kinds, attachment links, view traits, factories.
//!
//! Visual cells are supplied by a [`SectionedCellFactory`] and pooled by
//! kind for reuse. Whether a pooled cell may be handed out again is
//! decided by probing its [`AttachmentLink`] live, never by a separately
//! tracked visible set that could fall out of sync.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::container::CellContainer;
use crate::error::Result;
use crate::index_path::IndexPath;

/// A global counter for generating unique container IDs.
static CONTAINER_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// The pooling key for a visual cell.
///
/// Every raw item names the kind of cell that displays it via
/// [`SectionItem::cell_kind`]; the pool keeps one free-list per kind.
/// Kinds are explicit tags rather than runtime type lookups so that two
/// items of the same Rust type can still use different cell layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellKind(pub &'static str);

impl CellKind {
    /// The fixed kind under which section-header cells are pooled.
    pub const HEADER: CellKind = CellKind("header");
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The bound on raw items displayed by a sectioned list.
///
/// Selection membership uses `PartialEq` value equality, which is what
/// lets a selection survive a reload even though every position changes.
pub trait SectionItem: Clone + PartialEq + Send + Sync + 'static {
    /// Returns the kind of cell that displays this item.
    fn cell_kind(&self) -> CellKind;
}

impl SectionItem for String {
    fn cell_kind(&self) -> CellKind {
        CellKind("string")
    }
}

impl SectionItem for &'static str {
    fn cell_kind(&self) -> CellKind {
        CellKind("string")
    }
}

/// Identifies one outer recyclable slot (a [`CellContainer`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContainerId(u64);

impl ContainerId {
    /// Allocates the next unique container ID.
    pub(crate) fn next() -> Self {
        Self(CONTAINER_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// The live parent/host link carried by every cell.
///
/// A cell is free for reuse exactly while its link is empty. Containers
/// attach the link when they show the cell and detach it when the cell is
/// replaced or cleared; the pool only ever reads it.
#[derive(Debug, Default)]
pub struct AttachmentLink {
    slot: Mutex<Option<ContainerId>>,
}

impl AttachmentLink {
    /// Creates a detached link.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that the cell is now shown by the given container.
    pub fn attach(&self, container: ContainerId) {
        *self.slot.lock() = Some(container);
    }

    /// Clears the link, making the cell eligible for reuse.
    pub fn detach(&self) {
        *self.slot.lock() = None;
    }

    /// Returns `true` if the cell is currently shown by a container.
    pub fn is_attached(&self) -> bool {
        self.slot.lock().is_some()
    }

    /// Returns the container currently showing the cell, if any.
    pub fn container(&self) -> Option<ContainerId> {
        *self.slot.lock()
    }
}

/// Base trait for every visual cell managed by the engine.
///
/// A cell that never reports attachment through its link will be treated
/// as perpetually free by the pool; wiring the link correctly is part of
/// the cell contract.
pub trait ViewCell: Send + Sync {
    /// Returns the cell's live attachment link.
    fn attachment(&self) -> &AttachmentLink;
}

/// A visual cell that displays one raw item.
pub trait RowCell<T>: ViewCell {
    /// Re-binds the cell to a new raw item.
    fn update_item(&self, item: &T);
}

/// A visual cell that displays one section title.
pub trait HeaderCell: ViewCell {
    /// Re-binds the cell to a new section title.
    fn update_title(&self, title: &str);
}

/// Builds visual cells for rows and section headers.
///
/// The factory may return a fresh cell on every call; the engine takes
/// ownership of pooling it afterwards, so a cell is only built once per
/// kind per simultaneously visible slot.
pub trait SectionedCellFactory<T: SectionItem>: Send + Sync {
    /// Builds the cell displaying `item` at `path`.
    ///
    /// `slot` is the outer container the cell will be shown in; factories
    /// may inspect it (for example its style) when building the cell.
    fn row_cell(
        &self,
        slot: &CellContainer<T>,
        path: IndexPath,
        item: &T,
    ) -> Result<Arc<dyn RowCell<T>>>;

    /// Builds the header cell for `section` showing `title`.
    fn header_cell(
        &self,
        slot: &CellContainer<T>,
        section: usize,
        title: &str,
    ) -> Result<Arc<dyn HeaderCell>>;
}

/// A label-backed cell used by the default factory.
///
/// Renders rows through their `Display` impl and headers through their
/// title, the same way for both; only the background style differs.
pub struct LabelCell {
    text: Mutex<String>,
    style: String,
    attachment: AttachmentLink,
}

impl LabelCell {
    /// Creates a label cell with initial text and a background style.
    pub fn new(text: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            text: Mutex::new(text.into()),
            style: style.into(),
            attachment: AttachmentLink::new(),
        }
    }

    /// Returns the currently displayed text.
    pub fn text(&self) -> String {
        self.text.lock().clone()
    }

    /// Returns the cell's background style.
    pub fn style(&self) -> &str {
        &self.style
    }
}

impl ViewCell for LabelCell {
    fn attachment(&self) -> &AttachmentLink {
        &self.attachment
    }
}

impl<T: fmt::Display> RowCell<T> for LabelCell {
    fn update_item(&self, item: &T) {
        *self.text.lock() = item.to_string();
    }
}

impl HeaderCell for LabelCell {
    fn update_title(&self, title: &str) {
        *self.text.lock() = title.to_owned();
    }
}

/// The built-in label-based cell factory.
///
/// Used whenever no custom factory is installed. Row cells get a white
/// background, header cells a grey one.
#[derive(Debug, Default)]
pub struct DefaultCellFactory;

impl DefaultCellFactory {
    const ROW_STYLE: &'static str = "background-color: #ffffff";
    const HEADER_STYLE: &'static str = "background-color: #999999";
}

impl<T: SectionItem + fmt::Display> SectionedCellFactory<T> for DefaultCellFactory {
    fn row_cell(
        &self,
        _slot: &CellContainer<T>,
        _path: IndexPath,
        item: &T,
    ) -> Result<Arc<dyn RowCell<T>>> {
        Ok(Arc::new(LabelCell::new(item.to_string(), Self::ROW_STYLE)))
    }

    fn header_cell(
        &self,
        _slot: &CellContainer<T>,
        _section: usize,
        title: &str,
    ) -> Result<Arc<dyn HeaderCell>> {
        Ok(Arc::new(LabelCell::new(title, Self::HEADER_STYLE)))
    }
}
