//! Index paths for addressing items in a sectioned list.
//!
//! An [`IndexPath`] locates an item inside the two-level (section, row)
//! coordinate space of a sectioned data source. A reserved row sentinel
//! marks locators that address a section header rather than a row.

/// A `(section, row)` locator for items in a sectioned list.
///
/// Rows are counted from 0 within their section. A row equal to
/// [`IndexPath::HEADER_ROW`] means the path addresses the section header
/// itself, not a row.
///
/// Paths order lexicographically by `(section, row)`, which matches the
/// order items appear in the flattened display sequence: a section's
/// header sorts before every row of that section, and all of a section's
/// items sort before the next section.
///
/// # Example
///
/// ```
/// use sectioned_list::IndexPath;
///
/// let header = IndexPath::header(2);
/// let row = IndexPath::new(2, 0);
///
/// assert!(header.is_header());
/// assert!(header < row);
/// assert_eq!(row.row_index(), Some(0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexPath {
    section: usize,
    row: isize,
}

impl IndexPath {
    /// The row value that marks a section-header locator.
    pub const HEADER_ROW: isize = -1;

    /// Creates a path addressing the given row of the given section.
    #[inline]
    pub fn new(section: usize, row: usize) -> Self {
        Self {
            section,
            row: row as isize,
        }
    }

    /// Creates a path addressing the header of the given section.
    #[inline]
    pub const fn header(section: usize) -> Self {
        Self {
            section,
            row: Self::HEADER_ROW,
        }
    }

    /// Returns the section index.
    #[inline]
    pub fn section(&self) -> usize {
        self.section
    }

    /// Returns the raw row value, [`Self::HEADER_ROW`] for headers.
    #[inline]
    pub fn row(&self) -> isize {
        self.row
    }

    /// Returns the row index, or `None` if this path addresses a header.
    #[inline]
    pub fn row_index(&self) -> Option<usize> {
        (self.row >= 0).then_some(self.row as usize)
    }

    /// Returns `true` if this path addresses a section header.
    #[inline]
    pub fn is_header(&self) -> bool {
        self.row == Self::HEADER_ROW
    }
}

impl std::fmt::Display for IndexPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_header() {
            write!(f, "section {} header", self.section)
        } else {
            write!(f, "section {} row {}", self.section, self.row)
        }
    }
}
