//! Error types for the sectioned list engine.

use crate::cell::CellKind;
use crate::index_path::IndexPath;

/// The main error type for sectioned list operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The data source reported a row count that it then failed to honor.
    ///
    /// Raised during a reload when `item` returns `None` for a path that
    /// lies inside the reported counts. The reload is aborted and the
    /// previously installed sequence stays in place.
    #[error("data source returned no item for section {section} row {row}")]
    MissingItem { section: usize, row: usize },

    /// The cell factory failed to produce a usable cell.
    ///
    /// Raised at bind time; the affected position degrades to empty
    /// content without disturbing the rest of the list.
    #[error("cell factory could not build a '{kind}' cell for {path}")]
    CellFactory { kind: CellKind, path: IndexPath },
}

/// A specialized `Result` type for sectioned list operations.
pub type Result<T> = std::result::Result<T, Error>;
