//! A sectioned list presentation engine.
//!
//! This crate turns hierarchical section/row data into a flat,
//! position-addressable display sequence and manages the machinery a
//! hosting viewport needs around it:
//!
//! - **Data Source**: The [`SectionDataSource`] trait describing sections,
//!   optional headers, and rows
//! - **Flattening**: Interleaving headers and rows into a [`FlattenedSequence`]
//!   of [`DisplayItem`]s
//! - **Cells**: The [`RowCell`]/[`HeaderCell`] traits, the kind tag system,
//!   and the fallible [`SectionedCellFactory`]
//! - **Recycling**: A kind-keyed [`ViewPool`] that reuses detached cells
//!   instead of rebuilding them
//! - **Containers**: [`CellContainer`] slots the host binds to positions
//! - **Selection**: An identity-based [`SelectionTracker`] that survives
//!   reloads, mirrored into a positional [`SelectionModel`]
//! - **Signal/Slot System**: Type-safe change notification via [`Signal`]
//!
//! # Example
//!
//! ```
//! use sectioned_list::{IndexPath, SectionDataSource, SectionedListView};
//! use std::sync::Arc;
//!
//! struct Groceries;
//!
//! impl SectionDataSource<String> for Groceries {
//!     fn section_count(&self) -> usize {
//!         1
//!     }
//!     fn has_section_header(&self, _section: usize) -> bool {
//!         true
//!     }
//!     fn section_title(&self, _section: usize) -> String {
//!         "Fruit".into()
//!     }
//!     fn row_count(&self, _section: usize) -> usize {
//!         2
//!     }
//!     fn item(&self, path: IndexPath) -> Option<String> {
//!         ["apple", "banana"].get(path.row_index()?).map(|s| s.to_string())
//!     }
//! }
//!
//! let view = SectionedListView::with_data_source(Arc::new(Groceries))?;
//! assert_eq!(view.item_count(), 3); // one header, two rows
//!
//! // The host binds container slots to display positions.
//! let slot = view.create_container();
//! slot.bind(1);
//! slot.handle_click();
//! assert_eq!(view.selected_raw_items(), vec!["apple".to_string()]);
//! # Ok::<(), sectioned_list::Error>(())
//! ```

pub mod cell;
pub mod container;
pub mod data_source;
mod error;
pub mod flatten;
mod index_path;
pub mod pool;
pub mod selection;
pub mod signal;
pub mod view;

pub use cell::{
    AttachmentLink, CellKind, ContainerId, DefaultCellFactory, HeaderCell, LabelCell, RowCell,
    SectionItem, SectionedCellFactory, ViewCell,
};
pub use container::{CellContainer, CellContent};
pub use data_source::SectionDataSource;
pub use error::{Error, Result};
pub use flatten::{flatten, DisplayItem, FlattenedSequence};
pub use index_path::IndexPath;
pub use pool::ViewPool;
pub use selection::{SelectionModel, SelectionTracker};
pub use signal::{ConnectionId, Signal};
pub use view::SectionedListView;
