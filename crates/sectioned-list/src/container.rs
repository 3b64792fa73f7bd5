//! The recyclable outer cell container.
//!
//! The hosting viewport owns a small set of physical slots and re-binds
//! each of them to whatever position scrolls into view. A
//! [`CellContainer`] is one such slot: on every bind it resolves the
//! display item at its position and fills itself with a header or row
//! cell obtained through the view pool, falling back to the cell factory
//! when nothing reusable is free.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::warn;

use crate::cell::{ContainerId, HeaderCell, RowCell, SectionItem};
use crate::error::Result;
use crate::flatten::DisplayItem;
use crate::index_path::IndexPath;
use crate::view::ListCore;

/// What a container currently shows.
pub enum CellContent<T> {
    /// Nothing; the slot renders empty.
    Empty,
    /// A section-header cell.
    Header(Arc<dyn HeaderCell>),
    /// A row cell.
    Row(Arc<dyn RowCell<T>>),
}

impl<T> CellContent<T> {
    /// Returns `true` if the slot renders nothing.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the header cell, if that is what is shown.
    pub fn as_header(&self) -> Option<&Arc<dyn HeaderCell>> {
        match self {
            Self::Header(cell) => Some(cell),
            _ => None,
        }
    }

    /// Returns the row cell, if that is what is shown.
    pub fn as_row(&self) -> Option<&Arc<dyn RowCell<T>>> {
        match self {
            Self::Row(cell) => Some(cell),
            _ => None,
        }
    }

    fn detach(&self) {
        match self {
            Self::Empty => {}
            Self::Header(cell) => cell.attachment().detach(),
            Self::Row(cell) => cell.attachment().detach(),
        }
    }

    fn attach(&self, container: ContainerId) {
        match self {
            Self::Empty => {}
            Self::Header(cell) => cell.attachment().attach(container),
            Self::Row(cell) => cell.attachment().attach(container),
        }
    }
}

impl<T> Clone for CellContent<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Header(cell) => Self::Header(cell.clone()),
            Self::Row(cell) => Self::Row(cell.clone()),
        }
    }
}

struct BoundState<T> {
    position: Option<usize>,
    item: Option<DisplayItem<T>>,
    content: CellContent<T>,
}

/// One recyclable outer slot of the hosting viewport.
///
/// Holds a weak back-reference to the view core; if the view has been
/// torn down, [`bind`](Self::bind) becomes a no-op instead of touching a
/// dangling orchestrator. Containers are created through
/// [`SectionedListView::create_container`](crate::SectionedListView::create_container).
pub struct CellContainer<T: SectionItem> {
    id: ContainerId,
    core: Weak<ListCore<T>>,
    style: Option<String>,
    state: Mutex<BoundState<T>>,
}

impl<T: SectionItem> CellContainer<T> {
    pub(crate) fn new(core: Weak<ListCore<T>>, style: Option<String>) -> Self {
        Self {
            id: ContainerId::next(),
            core,
            style,
            state: Mutex::new(BoundState {
                position: None,
                item: None,
                content: CellContent::Empty,
            }),
        }
    }

    /// Returns this slot's unique id.
    pub fn id(&self) -> ContainerId {
        self.id
    }

    /// Returns the outer-cell style captured when the slot was created.
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// Returns the currently bound position, if any.
    pub fn position(&self) -> Option<usize> {
        self.state.lock().position
    }

    /// Returns the locator of the bound display item, if any.
    pub fn index_path(&self) -> Option<IndexPath> {
        self.state.lock().item.as_ref().map(DisplayItem::index_path)
    }

    /// Returns the raw item shown by this slot, `None` for headers and
    /// empty slots.
    pub fn raw_item(&self) -> Option<T> {
        self.state
            .lock()
            .item
            .as_ref()
            .and_then(|item| item.raw_item().cloned())
    }

    /// Returns what the slot currently shows.
    pub fn content(&self) -> CellContent<T> {
        self.state.lock().content.clone()
    }

    /// Binds this slot to a position of the flattened sequence.
    ///
    /// Out-of-range positions clear the slot. Header items re-resolve
    /// their title from the data source on every bind, so title changes
    /// are shown without a reload; row items display the raw item cached
    /// in the sequence. A factory failure degrades this one slot to empty
    /// content and leaves the rest of the list untouched.
    pub fn bind(&self, position: usize) {
        let Some(core) = self.core.upgrade() else {
            return;
        };
        let Some(item) = core.display_item(position) else {
            self.clear();
            return;
        };
        let bound = match &item {
            DisplayItem::Header { section } => self.bind_header(&core, *section),
            DisplayItem::Row { section, row, raw } => {
                self.bind_row(&core, IndexPath::new(*section, *row), raw)
            }
        };
        match bound {
            Ok(content) => self.install(Some(position), Some(item), content),
            Err(error) => {
                warn!(position, %error, "failed to bind cell, clearing slot");
                self.install(Some(position), None, CellContent::Empty);
            }
        }
    }

    /// Clears the slot; it renders nothing until the next bind.
    pub fn clear(&self) {
        self.install(None, None, CellContent::Empty);
    }

    /// Forwards a tap/click on this slot to selection tracking.
    ///
    /// Toggles the bound raw item's selection. Header and empty slots
    /// ignore clicks.
    pub fn handle_click(&self) {
        let Some(core) = self.core.upgrade() else {
            return;
        };
        let target = {
            let state = self.state.lock();
            match (state.position, &state.item) {
                (Some(position), Some(DisplayItem::Row { section, row, raw })) => {
                    Some((position, IndexPath::new(*section, *row), raw.clone()))
                }
                _ => None,
            }
        };
        if let Some((position, path, raw)) = target {
            core.toggle_selection(position, path, raw);
        }
    }

    fn bind_header(&self, core: &Arc<ListCore<T>>, section: usize) -> Result<CellContent<T>> {
        let title = core.section_title(section).unwrap_or_default();
        if let Some(cell) = core.acquire_header() {
            cell.update_title(&title);
            return Ok(CellContent::Header(cell));
        }
        let cell = core.factory().header_cell(self, section, &title)?;
        core.release_header(cell.clone());
        Ok(CellContent::Header(cell))
    }

    fn bind_row(&self, core: &Arc<ListCore<T>>, path: IndexPath, raw: &T) -> Result<CellContent<T>> {
        let kind = raw.cell_kind();
        if let Some(cell) = core.acquire_row(kind) {
            cell.update_item(raw);
            return Ok(CellContent::Row(cell));
        }
        let cell = core.factory().row_cell(self, path, raw)?;
        core.release_row(kind, cell.clone());
        Ok(CellContent::Row(cell))
    }

    fn install(
        &self,
        position: Option<usize>,
        item: Option<DisplayItem<T>>,
        content: CellContent<T>,
    ) {
        let mut state = self.state.lock();
        state.content.detach();
        content.attach(self.id);
        state.position = position;
        state.item = item;
        state.content = content;
    }
}
