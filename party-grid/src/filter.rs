//! Global and per-column filtering.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::column::Column;
use crate::value::CellValue;

/// Column id to filter value.
///
/// A [`CellValue::Text`] filter matches by case-insensitive substring on
/// the cell's string form. Every other value matches by equality. Null
/// and empty text filters are inactive.
pub type ColumnFilters = BTreeMap<String, CellValue>;

/// Whether a column filter value takes part in filtering.
pub fn is_active(filter: &CellValue) -> bool {
    match filter {
        CellValue::Null => false,
        CellValue::Text(s) => !s.is_empty(),
        _ => true,
    }
}

/// Case-insensitive substring test.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Whether a cell value satisfies a column filter value.
pub fn matches(value: &CellValue, filter: &CellValue) -> bool {
    match filter {
        CellValue::Text(needle) => contains_ignore_case(&value.to_string(), needle),
        _ => value.kind_rank() == filter.kind_rank() && value.compare(filter) == Ordering::Equal,
    }
}

/// Keep rows where at least one filterable column contains `needle`.
pub(crate) fn apply_global<T>(
    indices: &mut Vec<usize>,
    data: &[T],
    columns: &[Column<T>],
    needle: &str,
) {
    if needle.is_empty() {
        return;
    }

    let needle = needle.to_lowercase();
    let filterable: Vec<&Column<T>> = columns.iter().filter(|c| c.filterable).collect();

    indices.retain(|&i| {
        let row = &data[i];
        filterable
            .iter()
            .any(|c| c.value(row).to_string().to_lowercase().contains(&needle))
    });
}

/// Keep rows that satisfy every active column filter.
pub(crate) fn apply_columns<T>(
    indices: &mut Vec<usize>,
    data: &[T],
    columns: &[Column<T>],
    filters: &ColumnFilters,
) {
    for (column_id, filter) in filters.iter().filter(|(_, f)| is_active(f)) {
        let Some(column) = crate::column::find(columns, column_id) else {
            log::warn!("Ignoring filter on unknown column {:?}", column_id);
            continue;
        };
        indices.retain(|&i| matches(&column.value(&data[i]), filter));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_filters() {
        assert!(!is_active(&CellValue::Null));
        assert!(!is_active(&CellValue::Text(String::new())));
        assert!(is_active(&CellValue::Bool(false)));
        assert!(is_active(&CellValue::Int(0)));
    }

    #[test]
    fn test_text_filter_is_substring_case_insensitive() {
        let value = CellValue::from("Friday Movie Night");
        assert!(matches(&value, &CellValue::from("movie")));
        assert!(matches(&value, &CellValue::from("NIGHT")));
        assert!(!matches(&value, &CellValue::from("matinee")));
    }

    #[test]
    fn test_text_filter_on_number_uses_string_form() {
        assert!(matches(&CellValue::Int(2024), &CellValue::from("02")));
    }

    #[test]
    fn test_non_text_filter_is_exact() {
        assert!(matches(&CellValue::Int(25), &CellValue::Int(25)));
        assert!(matches(&CellValue::Float(25.0), &CellValue::Int(25)));
        assert!(!matches(&CellValue::Int(250), &CellValue::Int(25)));
        assert!(!matches(&CellValue::from("true"), &CellValue::Bool(true)));
        assert!(matches(&CellValue::Bool(true), &CellValue::Bool(true)));
    }
}
