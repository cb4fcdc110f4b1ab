//! Generic list view-model: one filter → sort → paginate pipeline shared
//! by every register screen instead of a per-screen copy.

pub mod criteria;
pub mod page;
pub mod sort;

pub use criteria::FilterCriteria;
pub use page::PageState;
pub use sort::{SortDir, SortSpec};

/// A single field as seen by the filter and sort layers.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    /// Raw timestamp string; parsed by the comparator, unparseable sorts oldest.
    Date(String),
    /// Null/absent on the wire. Never matches a categorical filter.
    Missing,
}

impl FieldValue {
    /// Plain-text rendering, used for search containment and CSV export;
    /// missing fields act as empty.
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Text(s) | FieldValue::Date(s) => s.clone(),
            FieldValue::Number(n) => sort::fmt_number(*n),
            FieldValue::Missing => String::new(),
        }
    }
}

/// Field access seam each register record implements, the client-side
/// analog of a per-table column map.
pub trait Record {
    /// Value of a named field, for categorical filters, sorting, and export.
    fn field(&self, key: &str) -> FieldValue;

    /// Fields matched by the free-text search (title, code, description).
    fn search_fields(&self) -> Vec<FieldValue>;
}

/// View state for one list screen: the raw collection plus filter, sort,
/// and page state. The visible slice is re-derived on every read; the
/// source collection is never mutated by the pipeline.
#[derive(Debug, Clone)]
pub struct ListView<T> {
    items: Vec<T>,
    criteria: FilterCriteria,
    sort: SortSpec,
    page: PageState,
}

impl<T: Record> ListView<T> {
    pub fn new(per_page: usize) -> Self {
        ListView {
            items: Vec::new(),
            criteria: FilterCriteria::default(),
            sort: SortSpec::default(),
            page: PageState::new(per_page),
        }
    }

    /// Wholesale replacement after a fetch; no incremental patching.
    pub fn replace_items(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// The unfiltered collection, for the aggregator.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn set_search(&mut self, term: &str) {
        self.criteria.set_search(term);
        self.page.reset();
    }

    pub fn set_filter(&mut self, name: &str, value: &str) {
        self.criteria.select(name, value);
        self.page.reset();
    }

    /// Toggling the active column flips direction; a new column starts ascending.
    pub fn toggle_sort(&mut self, field: &str) {
        self.sort.toggle(field);
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page.set_page(page);
    }

    pub fn set_per_page(&mut self, per_page: usize) {
        self.page.set_per_page(per_page);
    }

    /// Filtered and sorted rows, all pages.
    pub fn filtered(&self) -> Vec<&T> {
        let mut rows: Vec<&T> = self
            .items
            .iter()
            .filter(|item| self.criteria.matches(*item))
            .collect();
        sort::sort_records(&mut rows, &self.sort);
        rows
    }

    pub fn filtered_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| self.criteria.matches(*item))
            .count()
    }

    pub fn total_pages(&self) -> usize {
        self.page.total_pages(self.filtered_count())
    }

    /// The rows for the current page.
    pub fn visible(&self) -> Vec<&T> {
        let rows = self.filtered();
        self.page.slice_owned(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Row {
        title: String,
        status: String,
        score: f64,
    }

    impl Record for Row {
        fn field(&self, key: &str) -> FieldValue {
            match key {
                "title" => FieldValue::Text(self.title.clone()),
                "status" => FieldValue::Text(self.status.clone()),
                "score" => FieldValue::Number(self.score),
                _ => FieldValue::Missing,
            }
        }

        fn search_fields(&self) -> Vec<FieldValue> {
            vec![FieldValue::Text(self.title.clone())]
        }
    }

    fn row(title: &str, status: &str, score: f64) -> Row {
        Row { title: title.into(), status: status.into(), score }
    }

    #[test]
    fn unconstrained_view_shows_everything() {
        let mut view = ListView::new(10);
        view.replace_items(vec![row("a", "open", 1.0), row("b", "closed", 2.0)]);
        assert_eq!(view.filtered_count(), 2);
        assert_eq!(view.visible().len(), 2);
    }

    #[test]
    fn filter_change_resets_page() {
        let mut view = ListView::new(1);
        view.replace_items(vec![row("a", "open", 1.0), row("b", "open", 2.0)]);
        view.set_page(2);
        assert_eq!(view.page().page(), 2);
        view.set_filter("status", "open");
        assert_eq!(view.page().page(), 1);
        view.set_page(2);
        view.set_search("a");
        assert_eq!(view.page().page(), 1);
    }

    #[test]
    fn visible_is_filtered_sorted_slice() {
        let mut view = ListView::new(2);
        view.replace_items(vec![
            row("c", "open", 3.0),
            row("a", "open", 1.0),
            row("d", "closed", 4.0),
            row("b", "open", 2.0),
        ]);
        view.set_filter("status", "open");
        view.toggle_sort("score");
        let titles: Vec<&str> = view.visible().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b"]);
        view.set_page(2);
        let titles: Vec<&str> = view.visible().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["c"]);
    }

    #[test]
    fn toggle_sort_flips_direction() {
        let mut view = ListView::new(10);
        view.replace_items(vec![row("a", "open", 1.0), row("b", "open", 2.0)]);
        view.toggle_sort("score");
        assert_eq!(view.sort().dir, SortDir::Asc);
        view.toggle_sort("score");
        assert_eq!(view.sort().dir, SortDir::Desc);
        let titles: Vec<&str> = view.visible().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "a"]);
        // New column resets to ascending
        view.toggle_sort("title");
        assert_eq!(view.sort().dir, SortDir::Asc);
    }
}
