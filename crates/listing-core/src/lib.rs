//! Record Listing Core
//!
//! Pure filtering and pagination over a bulk-fetched record snapshot.
//! List pages keep the snapshot as the source of truth and run every
//! filter/page change through these functions without a server round-trip.

use std::collections::BTreeMap;

/// Reserved filter key carrying the free-text search value.
pub const SEARCH_KEY: &str = "search";

/// Records that can be matched against a [`FilterState`].
pub trait Filterable {
    /// Value of the exact-match field stored under `key`, if the record
    /// has one. `None` means the record cannot satisfy that constraint.
    fn field(&self, key: &str) -> Option<String>;

    /// Haystack searched by the free-text filter.
    fn search_text(&self) -> String;
}

/// The current set of user-chosen filter values.
///
/// Keys map to the raw input value; setting an empty value removes the
/// constraint. All active constraints must hold at once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    values: BTreeMap<String, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear one filter. An empty (or whitespace) value removes the key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if value.trim().is_empty() {
            self.values.remove(&key);
        } else {
            self.values.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Drop every constraint.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Active `(key, value)` pairs, e.g. for building a server query.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Compare a filter value against a record field.
///
/// When both sides parse as integers the comparison is numeric (so "07"
/// matches id 7); otherwise it is case-insensitive string equality.
pub fn values_match(filter: &str, field: &str) -> bool {
    if let (Ok(a), Ok(b)) = (filter.trim().parse::<i64>(), field.trim().parse::<i64>()) {
        return a == b;
    }
    filter.to_lowercase() == field.to_lowercase()
}

/// Keep the records satisfying every active filter, preserving order.
///
/// The [`SEARCH_KEY`] entry is a case-insensitive substring test against
/// [`Filterable::search_text`]; every other key is matched against
/// [`Filterable::field`] with [`values_match`]. A record lacking a
/// constrained field is excluded.
pub fn apply_filters<R: Filterable + Clone>(snapshot: &[R], filters: &FilterState) -> Vec<R> {
    snapshot
        .iter()
        .filter(|record| {
            filters.active().all(|(key, value)| {
                if key == SEARCH_KEY {
                    record
                        .search_text()
                        .to_lowercase()
                        .contains(&value.trim().to_lowercase())
                } else {
                    match record.field(key) {
                        Some(field) => values_match(value, &field),
                        None => false,
                    }
                }
            })
        })
        .cloned()
        .collect()
}

/// Current page number and page size used to slice a filtered list.
///
/// Pages are 1-based. Whenever the filtered set changes size the cursor is
/// clamped into `[1, max(total_pages, 1)]`; an out-of-range page resets to
/// the first page rather than snapping to the last.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageCursor {
    pub page: usize,
    pub page_size: usize,
}

impl PageCursor {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// `ceil(total / page_size)`; zero when the filtered set is empty.
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.page_size.max(1))
    }

    /// The page that would actually be rendered for a set of `total` records.
    pub fn clamped(&self, total: usize) -> usize {
        clamp_page(self.page, self.total_pages(total))
    }
}

fn clamp_page(page: usize, total_pages: usize) -> usize {
    if total_pages == 0 || page == 0 || page > total_pages {
        1
    } else {
        page
    }
}

/// One rendered page of a filtered list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// The clamped page number actually shown.
    pub page: usize,
    pub total_pages: usize,
    /// Filtered record count across all pages.
    pub total: usize,
}

/// Slice one page out of the filtered sequence.
///
/// Out-of-range pages reset to 1; an empty input yields an empty page with
/// `total_pages == 0`.
pub fn paginate<T: Clone>(filtered: &[T], page: usize, page_size: usize) -> Page<T> {
    let size = page_size.max(1);
    let total = filtered.len();
    let total_pages = total.div_ceil(size);
    let page = clamp_page(page, total_pages);
    let start = (page - 1) * size;
    let end = (start + size).min(total);
    let items = if start >= total {
        Vec::new()
    } else {
        filtered[start..end].to_vec()
    };
    Page {
        items,
        page,
        total_pages,
        total,
    }
}

/// Entry in the bounded pagination control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageLink {
    /// A numbered page link.
    Page(usize),
    /// An elided run of pages, rendered as an ellipsis.
    Gap,
}

/// Bounded window of page links: first, last, current ± 2, with a single
/// [`PageLink::Gap`] covering each elided run.
pub fn page_window(total_pages: usize, current: usize) -> Vec<PageLink> {
    let mut links = Vec::new();
    let mut in_gap = false;
    for n in 1..=total_pages {
        let near = (n as i64 - current as i64).abs() <= 2;
        if n == 1 || n == total_pages || near {
            links.push(PageLink::Page(n));
            in_gap = false;
        } else if !in_gap {
            links.push(PageLink::Gap);
            in_gap = true;
        }
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        id: u32,
        status: String,
        employee_id: u32,
        title: String,
    }

    fn make_row(id: u32, status: &str, employee_id: u32, title: &str) -> Row {
        Row {
            id,
            status: status.to_string(),
            employee_id,
            title: title.to_string(),
        }
    }

    impl Filterable for Row {
        fn field(&self, key: &str) -> Option<String> {
            match key {
                "status" => Some(self.status.clone()),
                "employee" => Some(self.employee_id.to_string()),
                _ => None,
            }
        }

        fn search_text(&self) -> String {
            format!("{} {}", self.title, self.status)
        }
    }

    fn sample() -> Vec<Row> {
        vec![
            make_row(1, "pending", 7, "Survey plot A"),
            make_row(2, "pending_approval", 7, "Fencing plot B"),
            make_row(3, "in_progress", 8, "Registry visit"),
            make_row(4, "pending_approval", 9, "Soil report"),
            make_row(5, "complete", 8, "Survey plot C"),
        ]
    }

    #[test]
    fn empty_filters_return_snapshot_in_order() {
        let rows = sample();
        let out = apply_filters(&rows, &FilterState::new());
        assert_eq!(out, rows);
    }

    #[test]
    fn single_filter_selects_matching_subset() {
        let rows = sample();
        let mut filters = FilterState::new();
        filters.set("status", "pending_approval");
        let out = apply_filters(&rows, &filters);
        assert_eq!(out.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 4]);
    }

    #[test]
    fn combined_filters_intersect() {
        let rows = sample();
        let mut filters = FilterState::new();
        filters.set("status", "pending_approval");
        filters.set("employee", "7");
        let out = apply_filters(&rows, &filters);
        assert_eq!(out.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn status_match_is_case_insensitive() {
        let rows = sample();
        let mut filters = FilterState::new();
        filters.set("status", "PENDING_APPROVAL");
        assert_eq!(apply_filters(&rows, &filters).len(), 2);
    }

    #[test]
    fn id_filter_coerces_to_integer() {
        let rows = sample();
        let mut filters = FilterState::new();
        filters.set("employee", "07");
        let out = apply_filters(&rows, &filters);
        assert_eq!(out.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let rows = sample();
        let mut filters = FilterState::new();
        filters.set(SEARCH_KEY, "survey");
        let out = apply_filters(&rows, &filters);
        assert_eq!(out.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 5]);
    }

    #[test]
    fn unknown_field_excludes_record() {
        let rows = sample();
        let mut filters = FilterState::new();
        filters.set("village", "12");
        assert!(apply_filters(&rows, &filters).is_empty());
    }

    #[test]
    fn empty_value_clears_constraint() {
        let mut filters = FilterState::new();
        filters.set("status", "pending");
        filters.set("status", "");
        assert!(filters.is_empty());
        assert_eq!(filters.get("status"), None);
    }

    #[test]
    fn clear_resets_every_filter() {
        let mut filters = FilterState::new();
        filters.set("status", "pending");
        filters.set(SEARCH_KEY, "plot");
        filters.clear();
        assert!(filters.is_empty());
        let rows = sample();
        assert_eq!(apply_filters(&rows, &filters), rows);
    }

    #[test]
    fn twelve_records_page_size_ten() {
        let rows: Vec<u32> = (1..=12).collect();
        let first = paginate(&rows, 1, 10);
        assert_eq!(first.items, (1..=10).collect::<Vec<_>>());
        assert_eq!(first.total_pages, 2);
        let second = paginate(&rows, 2, 10);
        assert_eq!(second.items, vec![11, 12]);
        assert_eq!(second.total, 12);
    }

    #[test]
    fn pages_partition_the_filtered_set() {
        let rows: Vec<u32> = (1..=12).collect();
        let total_pages = paginate(&rows, 1, 5).total_pages;
        let mut seen = Vec::new();
        for page in 1..=total_pages {
            seen.extend(paginate(&rows, page, 5).items);
        }
        assert_eq!(seen.len(), rows.len());
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen, rows);
    }

    #[test]
    fn out_of_range_page_resets_to_first() {
        let rows: Vec<u32> = (1..=12).collect();
        let page = paginate(&rows, 9, 10);
        assert_eq!(page.page, 1);
        assert_eq!(page.items, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn empty_input_yields_empty_page() {
        let rows: Vec<u32> = Vec::new();
        let page = paginate(&rows, 3, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total, 0);
    }

    #[test]
    fn zero_page_size_is_treated_as_one() {
        let rows: Vec<u32> = (1..=3).collect();
        let page = paginate(&rows, 2, 0);
        assert_eq!(page.items, vec![2]);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn cursor_clamps_after_shrink() {
        let cursor = PageCursor {
            page: 4,
            page_size: 10,
        };
        assert_eq!(cursor.total_pages(12), 2);
        assert_eq!(cursor.clamped(12), 1);
        assert_eq!(cursor.clamped(0), 1);
        let cursor = PageCursor::new(10);
        assert_eq!(cursor.clamped(12), 1);
    }

    #[test]
    fn window_centers_on_current_page() {
        use PageLink::{Gap, Page};
        assert_eq!(
            page_window(10, 5),
            vec![
                Page(1),
                Gap,
                Page(3),
                Page(4),
                Page(5),
                Page(6),
                Page(7),
                Gap,
                Page(10)
            ]
        );
    }

    #[test]
    fn window_lists_everything_when_small() {
        use PageLink::Page;
        assert_eq!(
            page_window(5, 2),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5)]
        );
        assert!(page_window(0, 1).is_empty());
    }

    #[test]
    fn window_at_the_edges() {
        use PageLink::{Gap, Page};
        assert_eq!(
            page_window(10, 1),
            vec![Page(1), Page(2), Page(3), Gap, Page(10)]
        );
        assert_eq!(
            page_window(10, 10),
            vec![Page(1), Gap, Page(8), Page(9), Page(10)]
        );
    }
}
