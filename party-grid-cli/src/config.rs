//! View configuration loaded from JSON.

use std::fs;
use std::path::Path;

use party_grid::record::{self, JsonRow};
use party_grid::{Alignment, Column, ColumnFilters, ColumnWidth, Sort, TableConfig};
use serde::Deserialize;

use crate::error::CliError;

/// Output format for `export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

/// How to present a set of rows.
///
/// Every field is optional. An empty `columns` list infers one column per
/// key of the first row.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub columns: Vec<ColumnSpec>,
    /// Field holding the row id. Rows without it are keyed by position.
    pub id_field: Option<String>,
    pub sort: Option<Sort>,
    pub global_filter: String,
    pub column_filters: ColumnFilters,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub export: Option<ExportFormat>,
    pub table: TableConfig,
}

impl ViewConfig {
    /// Load a view from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| CliError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Whether the view asks for pagination.
    pub fn is_paginated(&self) -> bool {
        self.page.is_some() || self.page_size.is_some()
    }

    /// Build the columns for `rows`.
    pub fn columns(&self, rows: &[JsonRow]) -> Vec<Column<JsonRow>> {
        if self.columns.is_empty() {
            return record::infer_columns(rows);
        }
        self.columns.iter().map(ColumnSpec::to_column).collect()
    }
}

/// One column of a [`ViewConfig`].
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnSpec {
    /// Field key, also used as the column id.
    pub id: String,
    /// Defaults to the humanized key.
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default = "enabled")]
    pub sortable: bool,
    #[serde(default = "enabled")]
    pub filterable: bool,
    #[serde(default)]
    pub width: ColumnWidth,
    #[serde(default)]
    pub align: Alignment,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub sticky: bool,
}

fn enabled() -> bool {
    true
}

impl ColumnSpec {
    pub fn to_column(&self) -> Column<JsonRow> {
        let header = self
            .header
            .clone()
            .unwrap_or_else(|| record::humanize(&self.id));

        let mut column = record::field(self.id.clone(), header)
            .width(self.width)
            .align(self.align);
        column.sortable = self.sortable;
        column.filterable = self.filterable;
        column.hidden = self.hidden;
        column.sticky = self.sticky;
        column
    }
}
