//! The data source contract.
//!
//! A [`SectionDataSource`] supplies the hierarchical shape of the list:
//! how many sections, which sections carry a header, how many rows per
//! section, and the raw item at each locator. The engine re-queries the
//! source in full on every reload; a source that mutates without a reload
//! produces stale rendering, which is the caller's responsibility.

use crate::index_path::IndexPath;

/// Supplies sectioned data to a [`SectionedListView`](crate::SectionedListView).
///
/// All query methods must be stable between the start and end of a single
/// reload pass. `item` returning `None` for a path inside the reported
/// counts is a contract violation that fails the reload.
///
/// # Example
///
/// ```
/// use sectioned_list::{IndexPath, SectionDataSource};
///
/// struct Groceries {
///     fruit: Vec<String>,
///     dairy: Vec<String>,
/// }
///
/// impl Groceries {
///     fn section(&self, index: usize) -> &[String] {
///         if index == 0 { &self.fruit } else { &self.dairy }
///     }
/// }
///
/// impl SectionDataSource<String> for Groceries {
///     fn section_count(&self) -> usize {
///         2
///     }
///
///     fn has_section_header(&self, _section: usize) -> bool {
///         true
///     }
///
///     fn section_title(&self, section: usize) -> String {
///         if section == 0 { "Fruit".into() } else { "Dairy".into() }
///     }
///
///     fn row_count(&self, section: usize) -> usize {
///         self.section(section).len()
///     }
///
///     fn item(&self, path: IndexPath) -> Option<String> {
///         self.section(path.section()).get(path.row_index()?).cloned()
///     }
/// }
/// ```
pub trait SectionDataSource<T>: Send + Sync {
    /// Returns the number of sections in the list.
    fn section_count(&self) -> usize;

    /// Returns whether the given section is preceded by a header.
    fn has_section_header(&self, section: usize) -> bool;

    /// Returns the title shown in the given section's header.
    ///
    /// Only called for sections where [`has_section_header`] returned
    /// `true`. Resolved again on every header bind, so title changes are
    /// picked up without a reload.
    ///
    /// [`has_section_header`]: SectionDataSource::has_section_header
    fn section_title(&self, section: usize) -> String;

    /// Returns the number of rows in the given section.
    fn row_count(&self, section: usize) -> usize;

    /// Returns the raw item at the given locator.
    ///
    /// Return `None` only for paths outside the reported counts.
    fn item(&self, path: IndexPath) -> Option<T>;
}
