//! Column descriptors and rendered cells.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::value::CellValue;

/// Extracts the value of one field from a row.
pub type Accessor<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;

/// Renders a cell from the row, the accessor value, and the row's data index.
pub type CellRenderer<T> = Arc<dyn Fn(&T, &CellValue, usize) -> Cell + Send + Sync>;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Column width specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnWidth {
    /// Fixed width in characters.
    Fixed(u16),
    /// Flexible width with weight.
    Flex(u16),
    /// Size to content.
    #[default]
    Auto,
}

/// One rendered cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub text: String,
    pub align: Alignment,
}

impl Cell {
    /// Create a left-aligned cell.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            align: Alignment::Left,
        }
    }

    /// Set the cell alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }
}

/// A table column definition.
///
/// Columns describe how to extract, render, sort and filter one field of
/// a row. A column without an accessor yields [`CellValue::Null`] for
/// every row, which is useful for cells that are purely rendered (such as
/// an actions column).
///
/// # Example
///
/// ```
/// use party_grid::{Alignment, Column};
///
/// struct Party {
///     title: String,
///     viewers: u32,
/// }
///
/// let columns: Vec<Column<Party>> = vec![
///     Column::new("title", "Title")
///         .accessor(|p: &Party| p.title.clone().into())
///         .sortable()
///         .filterable(),
///     Column::new("viewers", "Viewers")
///         .accessor(|p: &Party| p.viewers.into())
///         .sortable()
///         .align(Alignment::Right),
/// ];
/// assert_eq!(columns[1].id, "viewers");
/// ```
pub struct Column<T> {
    /// Unique identifier for this column.
    pub id: String,
    /// Header text displayed at the top.
    pub header: String,
    /// Width specification.
    pub width: ColumnWidth,
    /// Horizontal alignment of the default cell rendering.
    pub align: Alignment,
    /// Whether clicking the header cycles the sort.
    pub sortable: bool,
    /// Whether the global filter looks at this column.
    pub filterable: bool,
    /// Whether the column stays in place when scrolling horizontally.
    pub sticky: bool,
    /// Statically hidden. Hidden columns still filter and sort.
    pub hidden: bool,
    accessor: Option<Accessor<T>>,
    renderer: Option<CellRenderer<T>>,
}

impl<T> Column<T> {
    /// Create a new column with the given id and header.
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            width: ColumnWidth::default(),
            align: Alignment::default(),
            sortable: false,
            filterable: false,
            sticky: false,
            hidden: false,
            accessor: None,
            renderer: None,
        }
    }

    /// Set the value accessor.
    pub fn accessor<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> CellValue + Send + Sync + 'static,
    {
        self.accessor = Some(Arc::new(f));
        self
    }

    /// Set a custom cell renderer.
    pub fn cell<F>(mut self, f: F) -> Self
    where
        F: Fn(&T, &CellValue, usize) -> Cell + Send + Sync + 'static,
    {
        self.renderer = Some(Arc::new(f));
        self
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Include the column in the global filter.
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Set the width specification.
    pub fn width(mut self, width: ColumnWidth) -> Self {
        self.width = width;
        self
    }

    /// Set a fixed width for this column.
    pub fn fixed(self, width: u16) -> Self {
        self.width(ColumnWidth::Fixed(width))
    }

    /// Set a flex width for this column.
    pub fn flex(self, weight: u16) -> Self {
        self.width(ColumnWidth::Flex(weight))
    }

    /// Pin the column.
    pub fn sticky(mut self) -> Self {
        self.sticky = true;
        self
    }

    /// Hide the column by default.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Whether this column can produce values.
    pub fn has_accessor(&self) -> bool {
        self.accessor.is_some()
    }

    /// Extract this column's value from a row.
    pub fn value(&self, row: &T) -> CellValue {
        match &self.accessor {
            Some(accessor) => accessor(row),
            None => CellValue::Null,
        }
    }

    /// Render this column's cell for a row.
    pub fn render(&self, row: &T, index: usize) -> Cell {
        let value = self.value(row);
        match &self.renderer {
            Some(renderer) => renderer(row, &value, index),
            None => Cell::new(value.to_string()).align(self.align),
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            width: self.width,
            align: self.align,
            sortable: self.sortable,
            filterable: self.filterable,
            sticky: self.sticky,
            hidden: self.hidden,
            accessor: self.accessor.clone(),
            renderer: self.renderer.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("width", &self.width)
            .field("align", &self.align)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("sticky", &self.sticky)
            .field("hidden", &self.hidden)
            .field("accessor", &self.accessor.is_some())
            .field("renderer", &self.renderer.is_some())
            .finish()
    }
}

/// Find a column by id. The first match wins.
pub(crate) fn find<'a, T>(columns: &'a [Column<T>], id: &str) -> Option<&'a Column<T>> {
    columns.iter().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_without_accessor_yields_null() {
        let col = Column::<u32>::new("actions", "");
        assert!(!col.has_accessor());
        assert!(col.value(&7).is_null());
        assert_eq!(col.render(&7, 0).text, "");
    }

    #[test]
    fn test_custom_renderer_overrides_default() {
        let col = Column::<u32>::new("n", "N")
            .accessor(|n| (*n).into())
            .align(Alignment::Right)
            .cell(|_, value, index| Cell::new(format!("#{index}: {value}")));
        assert_eq!(col.render(&5, 2), Cell::new("#2: 5"));
    }

    #[test]
    fn test_default_render_uses_column_alignment() {
        let col = Column::<u32>::new("n", "N")
            .accessor(|n| (*n).into())
            .align(Alignment::Right);
        let cell = col.render(&12, 0);
        assert_eq!(cell.text, "12");
        assert_eq!(cell.align, Alignment::Right);
    }
}
