//! The row processing pipeline.
//!
//! Stages run in a fixed order, each on the previous stage's output:
//! global filter, column filters, sort. Pagination is applied on top by
//! the table because it depends on the pagination mode.

use crate::column::{self, Column};
use crate::filter::{self, ColumnFilters};
use crate::sort::{self, Sort};

/// Run filter and sort stages and return the surviving data indices in
/// display order.
///
/// Filtering never reorders. Without a sort (or when the sort column has
/// no accessor) the result keeps the original data order.
pub fn process<T>(
    data: &[T],
    columns: &[Column<T>],
    global_filter: &str,
    column_filters: &ColumnFilters,
    sort: Option<&Sort>,
) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..data.len()).collect();

    filter::apply_global(&mut indices, data, columns, global_filter);
    filter::apply_columns(&mut indices, data, columns, column_filters);

    if let Some(sort) = sort {
        match column::find(columns, &sort.column_id) {
            Some(col) if col.has_accessor() => {
                sort::sort_indices(&mut indices, data, col, sort.direction);
            }
            Some(_) => log::debug!("Sort column {:?} has no accessor, skipping", sort.column_id),
            None => log::warn!("Sort references unknown column {:?}", sort.column_id),
        }
    }

    indices
}
