//! Body states, column visibility and pagination modes.

use party_grid::{
    Body, Column, DataTable, Error, Pagination, PaginationMode, RowId, TableConfig, TextRenderer,
};

type Row = (u32, &'static str, &'static str);

fn columns() -> Vec<Column<Row>> {
    vec![
        Column::<Row>::new("id", "#").accessor(|r| r.0.into()),
        Column::<Row>::new("title", "Title")
            .accessor(|r| r.1.into())
            .sortable()
            .filterable(),
        Column::<Row>::new("host", "Host")
            .accessor(|r| r.2.into())
            .filterable()
            .hidden(),
    ]
}

fn rows() -> Vec<Row> {
    vec![
        (1, "Movie night", "amy"),
        (2, "Anime marathon", "bob"),
        (3, "Horror double feature", "cid"),
    ]
}

fn table() -> DataTable<Row> {
    DataTable::new(columns()).unwrap().with_data(rows())
}

// =============================================================================
// Body states
// =============================================================================

#[test]
fn test_body_precedence() {
    let mut table = table();
    table.set_global_filter("nothing matches");
    table.set_error(Some("connection lost".into()));
    table.set_loading(true);

    assert_eq!(table.view().body, Body::Loading("Loading...".into()));

    table.set_loading(false);
    let view = table.view();
    assert_eq!(view.body, Body::Error("connection lost".into()));
    assert_eq!(view.row_count(), 0);

    table.set_error(None);
    assert_eq!(table.view().body, Body::Empty("No data available".into()));

    table.set_global_filter("");
    let view = table.view();
    assert_eq!(view.body, Body::Rows);
    assert_eq!(view.row_count(), 3);
    assert_eq!(view.body.message(), None);
}

#[test]
fn test_configured_messages() {
    let config = TableConfig::default()
        .with_empty_message("No watch parties yet")
        .with_loading_message("Fetching parties");
    let mut table = DataTable::new(columns()).unwrap().with_config(config);

    assert_eq!(table.view().body.message(), Some("No watch parties yet"));
    table.set_loading(true);
    assert_eq!(table.view().body.message(), Some("Fetching parties"));
}

#[test]
fn test_loading_with_data_renders_indicator_only() {
    let mut table = table();
    table.set_loading(true);
    let out = TextRenderer::new().render(&table.view());
    assert!(out.ends_with("Loading..."));
    assert!(!out.contains("Movie night"));
}

// =============================================================================
// Column visibility
// =============================================================================

#[test]
fn test_hidden_column_still_filters() {
    let mut table = table();
    assert!(!table.is_column_visible("host"));

    table.set_global_filter("bob");
    let view = table.view();
    assert_eq!(view.texts(), vec![vec!["2", "Anime marathon"]]);
}

#[test]
fn test_toggle_column_visibility() {
    let mut table = table();

    assert_eq!(table.toggle_column_visibility("host"), Ok(true));
    assert_eq!(table.toggle_column_visibility("id"), Ok(false));
    let ids: Vec<&str> = table.visible_columns().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["title", "host"]);

    let view = table.view();
    assert_eq!(view.texts()[0], vec!["Movie night", "amy"]);

    assert_eq!(
        table.set_column_visible("nope", true),
        Err(Error::UnknownColumn("nope".into()))
    );
}

// =============================================================================
// Columns
// =============================================================================

#[test]
fn test_duplicate_columns_are_rejected() {
    let mut columns = columns();
    columns.push(Column::<Row>::new("title", "Again"));
    assert_eq!(
        DataTable::new(columns).err(),
        Some(Error::DuplicateColumn("title".into()))
    );

    let mut table = table();
    let mut replacement = self::columns();
    replacement.push(Column::<Row>::new("id", "Again"));
    assert!(table.set_columns(replacement).is_err());
    assert_eq!(table.columns().len(), 3, "columns unchanged after rejection");
}

#[test]
fn test_sort_on_unknown_column_is_rejected() {
    let mut table = table();
    assert_eq!(
        table.set_sort(Some(party_grid::Sort::asc("nope"))),
        Err(Error::UnknownColumn("nope".into()))
    );
    assert_eq!(table.sort(), None);
}

// =============================================================================
// Pagination modes
// =============================================================================

#[test]
fn test_server_mode_renders_rows_as_given() {
    // host already sliced page 2 of a 7 row result
    let page: Vec<Row> = vec![(4, "Sitcom rewatch", "dan"), (5, "Trivia", "eve")];
    let mut table = DataTable::new(columns())
        .unwrap()
        .with_data(page)
        .pagination_mode(PaginationMode::Server)
        .with_pagination(Pagination::new(2).unwrap().with_total(7).with_page(2))
        .unwrap();

    let view = table.view();
    assert_eq!(view.row_count(), 2);
    let pagination = view.pagination.unwrap();
    assert_eq!((pagination.page, pagination.total), (2, 7));
    assert_eq!(pagination.last_page(), 4);
    assert_eq!((pagination.start_row(), pagination.end_row()), (3, 4));
}

#[test]
fn test_client_mode_ignores_host_total() {
    let mut table = table()
        .with_pagination(Pagination::new(2).unwrap().with_total(100))
        .unwrap();
    assert_eq!(table.pagination().map(|p| p.total), Some(3));
    assert_eq!(table.view().row_count(), 2);
}

// =============================================================================
// Selection header
// =============================================================================

#[test]
fn test_all_visible_selected_tracks_current_page() {
    let mut table = table()
        .selectable(true)
        .with_pagination(Pagination::new(2).unwrap())
        .unwrap();

    assert!(!table.view().all_visible_selected);
    table.toggle_all_visible();
    assert!(table.view().all_visible_selected);

    table.next_page();
    assert!(!table.view().all_visible_selected);
    table.toggle_row(&RowId::from(2usize));
    assert!(table.view().all_visible_selected);
    assert_eq!(table.view().selected_count, 3);
}
