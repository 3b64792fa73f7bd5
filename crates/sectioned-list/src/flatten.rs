//! Flattening sectioned data into a display sequence.
//!
//! The hosting viewport addresses items by a single position, while the
//! data source speaks `(section, row)`. [`flatten`] bridges the two: it
//! walks the source in section order and produces a [`FlattenedSequence`]
//! of [`DisplayItem`]s, headers and rows interleaved. The sequence is
//! rebuilt wholesale on every reload and never mutated in place.

use crate::data_source::SectionDataSource;
use crate::error::{Error, Result};
use crate::index_path::IndexPath;

/// One renderable unit of the flattened sequence.
///
/// Either a section-header marker or a row wrapping one raw item. The
/// position of a display item in its sequence is consistent with
/// `(section, row)` ordering: a section's header comes first, then its
/// rows, then the next section.
#[derive(Clone, Debug, PartialEq)]
pub enum DisplayItem<T> {
    /// Marks the header of `section`. The title is deliberately not
    /// cached here; it is re-resolved from the data source at bind time
    /// so title changes show up without a reload.
    Header {
        /// The section this header introduces.
        section: usize,
    },
    /// One row of a section, wrapping the raw item it displays.
    Row {
        /// The section the row belongs to.
        section: usize,
        /// The row index within the section.
        row: usize,
        /// The raw item supplied by the data source.
        raw: T,
    },
}

impl<T> DisplayItem<T> {
    /// Returns the locator this item resolves to.
    pub fn index_path(&self) -> IndexPath {
        match self {
            Self::Header { section } => IndexPath::header(*section),
            Self::Row { section, row, .. } => IndexPath::new(*section, *row),
        }
    }

    /// Returns the section this item belongs to.
    pub fn section(&self) -> usize {
        match self {
            Self::Header { section } | Self::Row { section, .. } => *section,
        }
    }

    /// Returns `true` for header markers.
    pub fn is_header(&self) -> bool {
        matches!(self, Self::Header { .. })
    }

    /// Returns the wrapped raw item, `None` for header markers.
    pub fn raw_item(&self) -> Option<&T> {
        match self {
            Self::Header { .. } => None,
            Self::Row { raw, .. } => Some(raw),
        }
    }
}

/// An ordered, position-addressable sequence of display items.
#[derive(Clone, Debug)]
pub struct FlattenedSequence<T> {
    items: Vec<DisplayItem<T>>,
}

impl<T> Default for FlattenedSequence<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> FlattenedSequence<T> {
    /// Returns the number of display items (headers plus rows).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the sequence holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the display item at `position`, if in range.
    pub fn get(&self, position: usize) -> Option<&DisplayItem<T>> {
        self.items.get(position)
    }

    /// Iterates over all display items in position order.
    pub fn iter(&self) -> std::slice::Iter<'_, DisplayItem<T>> {
        self.items.iter()
    }

    /// Iterates over `(position, raw item)` for row items only.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &T)> {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(position, item)| item.raw_item().map(|raw| (position, raw)))
    }
}

/// Builds the display sequence for one snapshot of the data source.
///
/// Every reload re-queries the source in full; there is no memoization.
/// Fails with [`Error::MissingItem`] if the source returns no item for a
/// path inside its own reported counts, in which case no sequence is
/// produced at all.
pub fn flatten<T>(source: &dyn SectionDataSource<T>) -> Result<FlattenedSequence<T>> {
    let sections = source.section_count();
    let mut items = Vec::new();
    for section in 0..sections {
        if source.has_section_header(section) {
            items.push(DisplayItem::Header { section });
        }
        for row in 0..source.row_count(section) {
            let path = IndexPath::new(section, row);
            let raw = source.item(path).ok_or(Error::MissingItem { section, row })?;
            items.push(DisplayItem::Row { section, row, raw });
        }
    }
    tracing::trace!(sections, items = items.len(), "flattened data source");
    Ok(FlattenedSequence { items })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A data source over owned section vectors, headers optional.
    struct VecSource {
        sections: Vec<(Option<String>, Vec<String>)>,
    }

    impl VecSource {
        fn new(sections: Vec<(Option<&str>, Vec<&str>)>) -> Self {
            Self {
                sections: sections
                    .into_iter()
                    .map(|(title, rows)| {
                        (
                            title.map(String::from),
                            rows.into_iter().map(String::from).collect(),
                        )
                    })
                    .collect(),
            }
        }
    }

    impl SectionDataSource<String> for VecSource {
        fn section_count(&self) -> usize {
            self.sections.len()
        }

        fn has_section_header(&self, section: usize) -> bool {
            self.sections[section].0.is_some()
        }

        fn section_title(&self, section: usize) -> String {
            self.sections[section].0.clone().unwrap_or_default()
        }

        fn row_count(&self, section: usize) -> usize {
            self.sections[section].1.len()
        }

        fn item(&self, path: IndexPath) -> Option<String> {
            self.sections[path.section()].1.get(path.row_index()?).cloned()
        }
    }

    /// Reports one row but never returns an item for it.
    struct LyingSource;

    impl SectionDataSource<String> for LyingSource {
        fn section_count(&self) -> usize {
            1
        }

        fn has_section_header(&self, _section: usize) -> bool {
            false
        }

        fn section_title(&self, _section: usize) -> String {
            String::new()
        }

        fn row_count(&self, _section: usize) -> usize {
            1
        }

        fn item(&self, _path: IndexPath) -> Option<String> {
            None
        }
    }

    #[test]
    fn test_flatten_interleaves_headers_and_rows() {
        let source = VecSource::new(vec![
            (Some("A"), vec!["a1", "a2"]),
            (None, vec!["b1"]),
        ]);
        let sequence = flatten(&source).unwrap();

        assert_eq!(sequence.len(), 4);
        assert_eq!(sequence.get(0), Some(&DisplayItem::Header { section: 0 }));
        assert_eq!(
            sequence.get(1),
            Some(&DisplayItem::Row {
                section: 0,
                row: 0,
                raw: "a1".to_string()
            })
        );
        assert_eq!(
            sequence.get(2),
            Some(&DisplayItem::Row {
                section: 0,
                row: 1,
                raw: "a2".to_string()
            })
        );
        assert_eq!(
            sequence.get(3),
            Some(&DisplayItem::Row {
                section: 1,
                row: 0,
                raw: "b1".to_string()
            })
        );
    }

    #[test]
    fn test_flatten_length_formula() {
        let source = VecSource::new(vec![
            (Some("A"), vec!["a1", "a2", "a3"]),
            (None, vec![]),
            (Some("C"), vec![]),
            (None, vec!["d1", "d2"]),
        ]);
        let sequence = flatten(&source).unwrap();

        let expected: usize = (0..source.section_count())
            .map(|s| usize::from(source.has_section_header(s)) + source.row_count(s))
            .sum();
        assert_eq!(sequence.len(), expected);
        assert_eq!(sequence.len(), 7);
    }

    #[test]
    fn test_flatten_keeps_sections_contiguous() {
        let source = VecSource::new(vec![
            (Some("A"), vec!["a1", "a2"]),
            (Some("B"), vec!["b1", "b2", "b3"]),
            (None, vec!["c1"]),
        ]);
        let sequence = flatten(&source).unwrap();

        let sections: Vec<usize> = sequence.iter().map(DisplayItem::section).collect();
        let mut sorted = sections.clone();
        sorted.sort_unstable();
        assert_eq!(sections, sorted);
    }

    #[test]
    fn test_flatten_empty_source() {
        let source = VecSource::new(vec![]);
        let sequence = flatten(&source).unwrap();
        assert!(sequence.is_empty());
    }

    #[test]
    fn test_flatten_skips_headerless_empty_section() {
        let source = VecSource::new(vec![(None, vec![]), (None, vec!["b1"])]);
        let sequence = flatten(&source).unwrap();
        assert_eq!(sequence.len(), 1);
        assert_eq!(sequence.get(0).unwrap().index_path(), IndexPath::new(1, 0));
    }

    #[test]
    fn test_flatten_fails_on_missing_item() {
        let err = flatten(&LyingSource).unwrap_err();
        assert!(matches!(err, Error::MissingItem { section: 0, row: 0 }));
    }

    #[test]
    fn test_rows_iterator_skips_headers() {
        let source = VecSource::new(vec![(Some("A"), vec!["a1"]), (None, vec!["b1"])]);
        let sequence = flatten(&source).unwrap();

        let rows: Vec<(usize, String)> = sequence
            .rows()
            .map(|(position, raw)| (position, raw.clone()))
            .collect();
        assert_eq!(rows, vec![(1, "a1".to_string()), (2, "b1".to_string())]);
    }
}
