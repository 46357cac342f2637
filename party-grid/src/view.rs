//! Renderable snapshot of a table.

use crate::actions::ActionState;
use crate::column::{Cell, Column};
use crate::pagination::Pagination;
use crate::row::RowId;
use crate::sort::Sort;

/// What the table body shows.
///
/// Precedence is fixed: loading, then error, then empty, then rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Loading(String),
    Error(String),
    Empty(String),
    Rows,
}

impl Body {
    /// The status message shown instead of rows, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Body::Loading(msg) | Body::Error(msg) | Body::Empty(msg) => Some(msg),
            Body::Rows => None,
        }
    }
}

/// One visible row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRow {
    /// Index into the host's data collection.
    pub data_index: usize,
    pub row_id: RowId,
    pub selected: bool,
    pub class_name: Option<String>,
    /// One cell per visible column.
    pub cells: Vec<Cell>,
}

/// Everything needed to draw the table once.
#[derive(Debug)]
pub struct TableView<'a, T> {
    pub body: Body,
    /// Visible columns in declaration order.
    pub columns: Vec<&'a Column<T>>,
    /// Rows of the current page. Empty unless `body` is [`Body::Rows`].
    pub rows: Vec<ViewRow>,
    pub sort: Option<&'a Sort>,
    pub global_filter: &'a str,
    /// Effective pagination, with `total` and `page` already resolved.
    pub pagination: Option<Pagination>,
    pub page_size_options: &'a [usize],
    /// Row count after filtering, before pagination.
    pub processed_count: usize,
    pub selected_count: usize,
    /// Whether every row on the current page is selected.
    pub all_visible_selected: bool,
    pub bulk_actions: Vec<ActionState>,
    pub selectable: bool,
    pub sortable: bool,
    pub filterable: bool,
    pub exportable: bool,
    pub refreshable: bool,
}

impl<T> TableView<'_, T> {
    /// Number of data rows in the body.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Sort direction for a column, if it is the sorted one.
    pub fn sort_for(&self, column_id: &str) -> Option<&Sort> {
        self.sort.filter(|s| s.column_id == column_id)
    }

    /// Cell texts of the visible rows, one `Vec` per row.
    pub fn texts(&self) -> Vec<Vec<&str>> {
        self.rows
            .iter()
            .map(|r| r.cells.iter().map(|c| c.text.as_str()).collect())
            .collect()
    }
}
