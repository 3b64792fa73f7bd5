//! A minimal headless walkthrough of the sectioned list engine.
//!
//! Builds a two-section grocery list, binds container slots to every
//! display position, toggles a selection, then reorders the sections and
//! reloads to show the selection following the item.
//!
//! Run with `cargo run --example groceries`.

use std::sync::Arc;

use parking_lot::Mutex;
use sectioned_list::{IndexPath, SectionDataSource, SectionedListView};

struct Groceries {
    sections: Mutex<Vec<(String, Vec<String>)>>,
}

impl Groceries {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            sections: Mutex::new(vec![
                (
                    "Fruit".to_string(),
                    vec!["apple".to_string(), "banana".to_string()],
                ),
                ("Dairy".to_string(), vec!["milk".to_string()]),
            ]),
        })
    }

    fn reverse_sections(&self) {
        self.sections.lock().reverse();
    }
}

impl SectionDataSource<String> for Groceries {
    fn section_count(&self) -> usize {
        self.sections.lock().len()
    }

    fn has_section_header(&self, _section: usize) -> bool {
        true
    }

    fn section_title(&self, section: usize) -> String {
        self.sections.lock()[section].0.clone()
    }

    fn row_count(&self, section: usize) -> usize {
        self.sections.lock()[section].1.len()
    }

    fn item(&self, path: IndexPath) -> Option<String> {
        self.sections.lock()[path.section()]
            .1
            .get(path.row_index()?)
            .cloned()
    }
}

fn print_list(view: &SectionedListView<String>) {
    for position in 0..view.item_count() {
        let item = view.display_item(position).unwrap();
        let marker = if view.is_position_selected(position) {
            "*"
        } else {
            " "
        };
        match item.raw_item() {
            Some(raw) => println!("  {marker} {position}: {raw}"),
            None => println!("    {position}: == {} ==", item.index_path()),
        }
    }
}

fn main() -> Result<(), sectioned_list::Error> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let groceries = Groceries::new();
    let view = SectionedListView::with_data_source(groceries.clone())?;

    view.clicked().connect(|path| {
        println!("clicked {path}");
    });

    // One slot per position, the way a non-scrolling host would do it.
    let slots: Vec<_> = (0..view.item_count())
        .map(|position| {
            let slot = view.create_container();
            slot.bind(position);
            slot
        })
        .collect();

    println!("initial list:");
    print_list(&view);

    // Select "banana" (header at 0, apple at 1, banana at 2).
    slots[2].handle_click();
    println!("after selecting banana:");
    print_list(&view);

    // Reorder the data and reload: the selection follows the item.
    groceries.reverse_sections();
    view.reload()?;
    for (position, slot) in slots.iter().enumerate() {
        slot.bind(position);
    }
    println!("after reversing sections:");
    print_list(&view);
    println!("still selected: {:?}", view.selected_raw_items());

    Ok(())
}
