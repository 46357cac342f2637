//! Single-column sort state.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::value::CellValue;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Apply this direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }

    /// Header marker for this direction.
    pub fn marker(self) -> &'static str {
        match self {
            Direction::Asc => "▲",
            Direction::Desc => "▼",
        }
    }
}

/// The active sort: one column, one direction.
///
/// There is no multi-column tie-breaking. Rows that compare equal keep
/// their relative order from the filter stage.
///
/// # Example
///
/// ```
/// use party_grid::{Direction, Sort};
///
/// let sort = Sort::desc("viewers");
/// assert_eq!(sort.direction, Direction::Desc);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub column_id: String,
    pub direction: Direction,
}

impl Sort {
    /// Ascending sort on a column.
    pub fn asc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: Direction::Asc,
        }
    }

    /// Descending sort on a column.
    pub fn desc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: Direction::Desc,
        }
    }
}

/// Next sort state after a header click on `column_id`.
///
/// Cycles `none -> asc -> desc -> none` on the same column. Clicking a
/// different column always starts it at ascending.
pub fn cycle(current: Option<&Sort>, column_id: &str) -> Option<Sort> {
    match current {
        Some(sort) if sort.column_id == column_id => match sort.direction {
            Direction::Asc => Some(Sort::desc(column_id)),
            Direction::Desc => None,
        },
        _ => Some(Sort::asc(column_id)),
    }
}

/// Stable sort of data indices by one column's values.
pub(crate) fn sort_indices<T>(
    indices: &mut Vec<usize>,
    data: &[T],
    column: &Column<T>,
    direction: Direction,
) {
    let mut keyed: Vec<(usize, CellValue)> = indices
        .iter()
        .map(|&i| (i, column.value(&data[i])))
        .collect();

    // slice::sort_by is stable
    keyed.sort_by(|(_, a), (_, b)| direction.apply(a.compare(b)));

    indices.clear();
    indices.extend(keyed.into_iter().map(|(i, _)| i));
}
