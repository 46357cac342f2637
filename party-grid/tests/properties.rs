//! Behavioural properties of the processing pipeline and the table.

use party_grid::filter::ColumnFilters;
use party_grid::pipeline::process;
use party_grid::{Body, CellValue, Column, DataTable, Pagination, RowId};

#[derive(Debug, Clone, PartialEq)]
struct Guest {
    id: u32,
    name: String,
    age: u32,
}

fn guest(id: u32, name: &str, age: u32) -> Guest {
    Guest {
        id,
        name: name.to_string(),
        age,
    }
}

fn columns() -> Vec<Column<Guest>> {
    vec![
        Column::<Guest>::new("name", "Name")
            .accessor(|g| g.name.as_str().into())
            .sortable()
            .filterable(),
        Column::<Guest>::new("age", "Age")
            .accessor(|g| g.age.into())
            .sortable()
            .filterable(),
    ]
}

fn scenario() -> Vec<Guest> {
    vec![guest(1, "Bob", 30), guest(2, "Amy", 25), guest(3, "Cid", 40)]
}

fn crowd() -> Vec<Guest> {
    let names = [
        "Amy", "Bob", "Cid", "Dana", "Eve", "Finn", "Gail", "Hank", "Ivy", "Jo", "Kai", "Lena",
        "Mo", "Nia", "Otto", "Pam", "Quin", "Rae", "Sam", "Tia", "Uma", "Vic", "Wes",
    ];
    names
        .iter()
        .enumerate()
        .map(|(i, name)| guest(i as u32 + 1, name, 18 + (i as u32 * 7) % 40))
        .collect()
}

fn table(data: Vec<Guest>) -> DataTable<Guest> {
    DataTable::new(columns())
        .unwrap()
        .with_data(data)
        .with_row_id(|g, _| RowId::from(g.id))
        .selectable(true)
}

fn names(rows: &[&Guest]) -> Vec<String> {
    rows.iter().map(|g| g.name.clone()).collect()
}

// =============================================================================
// Filtering
// =============================================================================

#[test]
fn test_global_filter_is_idempotent() {
    let data = crowd();
    let columns = columns();
    let filters = ColumnFilters::new();

    for needle in ["a", "an", "2", "e", "zz"] {
        let once: Vec<Guest> = process(&data, &columns, needle, &filters, None)
            .into_iter()
            .map(|i| data[i].clone())
            .collect();
        let twice: Vec<Guest> = process(&once, &columns, needle, &filters, None)
            .into_iter()
            .map(|i| once[i].clone())
            .collect();
        assert_eq!(once, twice, "filtering twice by {:?} changed the result", needle);
    }
}

#[test]
fn test_global_filter_is_monotonic() {
    let data = crowd();
    let columns = columns();
    let filters = ColumnFilters::new();

    for (shorter, longer) in [("a", "am"), ("i", "iv"), ("2", "25"), ("", "o")] {
        let wide = process(&data, &columns, shorter, &filters, None);
        let narrow = process(&data, &columns, longer, &filters, None);
        assert!(
            narrow.iter().all(|i| wide.contains(i)),
            "{:?} matched rows that {:?} did not",
            longer,
            shorter
        );
    }
}

#[test]
fn test_column_filter_narrows_global_filter() {
    let data = crowd();
    let columns = columns();
    let mut filters = ColumnFilters::new();

    let global_only = process(&data, &columns, "o", &filters, None);
    filters.insert("age".into(), CellValue::Int(25));
    let both = process(&data, &columns, "o", &filters, None);

    assert!(both.iter().all(|i| global_only.contains(i)));
    assert_eq!(both.iter().map(|&i| data[i].name.as_str()).collect::<Vec<_>>(), vec!["Bob"]);
}

// =============================================================================
// Sorting
// =============================================================================

#[test]
fn test_header_clicks_cycle_sort() {
    let mut table = table(crowd());
    let original = names(&table.processed_rows());

    table.click_header("age").unwrap();
    let ascending: Vec<u32> = table.processed_rows().iter().map(|g| g.age).collect();
    assert!(ascending.windows(2).all(|w| w[0] <= w[1]), "not ascending: {:?}", ascending);

    table.click_header("age").unwrap();
    let descending: Vec<u32> = table.processed_rows().iter().map(|g| g.age).collect();
    assert!(descending.windows(2).all(|w| w[0] >= w[1]), "not descending: {:?}", descending);

    table.click_header("age").unwrap();
    assert_eq!(table.sort(), None);
    assert_eq!(names(&table.processed_rows()), original);
}

#[test]
fn test_sort_cycle_restores_filtered_order() {
    let mut table = table(crowd());
    table.set_global_filter("a");
    let filtered = names(&table.processed_rows());

    for _ in 0..3 {
        table.click_header("name").unwrap();
    }
    assert_eq!(names(&table.processed_rows()), filtered);
}

// =============================================================================
// Pagination
// =============================================================================

#[test]
fn test_pages_cover_processed_rows_exactly_once() {
    let data = crowd();
    let n = data.len();

    for page_size in 1..=n {
        let mut table = table(data.clone())
            .with_pagination(Pagination::new(page_size).unwrap())
            .unwrap();
        table.click_header("age").unwrap();
        let expected = names(&table.processed_rows());

        let total_pages = table.pagination().map(|p| p.total_pages()).unwrap_or(0);
        assert_eq!(total_pages, n.div_ceil(page_size));

        let mut seen = Vec::new();
        for page in 1..=total_pages {
            table.set_page(page);
            let rows = table.page_rows();
            assert!(!rows.is_empty(), "page {} of size {} is empty", page, page_size);
            seen.extend(names(&rows));
        }
        assert_eq!(seen, expected, "page size {}", page_size);
    }
}

// =============================================================================
// Selection
// =============================================================================

#[test]
fn test_select_all_is_confined_to_current_page() {
    let mut table = table(crowd())
        .with_pagination(Pagination::new(10).unwrap())
        .unwrap();

    let first_page = table.page_row_ids();
    table.toggle_row(&first_page[0]);

    table.set_page(2);
    let second_page = table.page_row_ids();
    table.toggle_all_visible();

    assert!(table.selection().is_selected(&first_page[0]));
    for id in &first_page[1..] {
        assert!(!table.selection().is_selected(id), "{} leaked into selection", id);
    }
    for id in &second_page {
        assert!(table.selection().is_selected(id));
    }

    // toggling again only clears page two
    table.toggle_all_visible();
    assert_eq!(table.selection().ids(), vec![first_page[0].clone()]);
}

#[test]
fn test_selection_survives_new_row_instances() {
    let mut table = table(scenario());
    table.toggle_row(&RowId::from(2u32));
    assert_eq!(names(&table.selected_rows()), vec!["Amy"]);

    // same ids, new allocations, different order
    let mut fresh = scenario();
    fresh.reverse();
    table.set_data(fresh);

    assert!(table.selection().is_selected(&RowId::from(2u32)));
    assert_eq!(names(&table.selected_rows()), vec!["Amy"]);

    let view = table.view();
    let selected: Vec<usize> = view.rows.iter().filter(|r| r.selected).map(|r| r.data_index).collect();
    assert_eq!(selected, vec![1]);
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_guest_list_scenario() {
    let mut table = table(scenario());

    table.click_header("age").unwrap();
    assert_eq!(names(&table.processed_rows()), vec!["Amy", "Bob", "Cid"]);

    table.set_global_filter("b");
    assert_eq!(names(&table.processed_rows()), vec!["Bob"]);
    table.set_global_filter("");

    let mut table = table
        .with_pagination(Pagination::new(2).unwrap())
        .unwrap();
    assert_eq!(names(&table.page_rows()), vec!["Amy", "Bob"]);
    table.set_page(2);
    assert_eq!(names(&table.page_rows()), vec!["Cid"]);
}

#[test]
fn test_empty_data_renders_empty_state_once() {
    let mut table = table(Vec::new());
    let view = table.view();

    assert_eq!(view.body, Body::Empty("No data available".into()));
    assert_eq!(view.row_count(), 0);

    let out = party_grid::TextRenderer::new().render(&view);
    assert_eq!(out.matches("No data available").count(), 1);
}

#[test]
fn test_loading_hides_rows() {
    let mut table = table(crowd());
    table.set_loading(true);
    let view = table.view();

    assert_eq!(view.body, Body::Loading("Loading...".into()));
    assert_eq!(view.row_count(), 0);
}
