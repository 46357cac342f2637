//! Generic client-side data table engine.
//!
//! `party-grid` turns a collection of rows and a set of column descriptors
//! into a renderable table view. It filters (one free-text filter across
//! filterable columns plus per-column filters), sorts by a single column,
//! paginates, and tracks row selection by stable row id. Rendering is left
//! to the host; [`TextRenderer`] draws a plain-text grid and the
//! [`export`] helpers produce CSV or JSON.
//!
//! Each piece of interactive state can be owned by the table or delegated
//! to the host, see [`Control`].

pub mod actions;
pub mod column;
pub mod config;
pub mod control;
pub mod error;
pub mod export;
pub mod filter;
pub mod pagination;
pub mod pipeline;
pub mod record;
pub mod render;
pub mod row;
pub mod selection;
pub mod sort;
pub mod table;
pub mod text;
pub mod value;
pub mod view;

pub use actions::{ActionState, BulkAction, TableAction};
pub use column::{Alignment, Cell, Column, ColumnWidth};
pub use config::TableConfig;
pub use control::Control;
pub use error::{Error, Result};
pub use filter::ColumnFilters;
pub use pagination::{Pagination, PaginationChange, PaginationMode};
pub use render::TextRenderer;
pub use row::RowId;
pub use selection::Selection;
pub use sort::{Direction, Sort};
pub use table::DataTable;
pub use value::CellValue;
pub use view::{Body, TableView, ViewRow};

pub mod prelude {
    pub use crate::actions::{BulkAction, TableAction};
    pub use crate::column::{Alignment, Cell, Column, ColumnWidth};
    pub use crate::config::TableConfig;
    pub use crate::pagination::{Pagination, PaginationChange, PaginationMode};
    pub use crate::render::TextRenderer;
    pub use crate::row::RowId;
    pub use crate::selection::Selection;
    pub use crate::sort::{Direction, Sort};
    pub use crate::table::DataTable;
    pub use crate::value::CellValue;
    pub use crate::view::{Body, TableView};
}
