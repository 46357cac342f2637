//! Builds a table from JSON rows and a view, and produces the output text.

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use log::{debug, info};
use party_grid::record::{self, JsonRow};
use party_grid::{Column, DataTable, Pagination, TextRenderer, export};

use crate::config::{ExportFormat, ViewConfig};
use crate::error::CliError;

/// Read a JSON array of objects.
pub fn load_rows(path: &Path) -> Result<Vec<JsonRow>, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let rows: Vec<JsonRow> = serde_json::from_str(&text).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Render `rows` through `view`: the text grid, or the export when the
/// view asks for one.
pub fn run_view(rows: Vec<JsonRow>, view: &ViewConfig) -> Result<String, CliError> {
    let columns = view.columns(&rows);
    debug!("Using {} columns", columns.len());

    let mut table = DataTable::new(columns)?
        .with_config(view.table.clone())
        .with_data(rows)
        .with_row_id(record::id_field(view.id_field.as_deref().unwrap_or("id")));

    if let Some(sort) = &view.sort {
        table.set_sort(Some(sort.clone()))?;
    }
    table.set_global_filter(view.global_filter.as_str());
    for (column_id, value) in &view.column_filters {
        table.set_column_filter(column_id, value.clone())?;
    }

    if let Some(format) = view.export {
        return export_rows(table, format);
    }

    if view.is_paginated() {
        let page_size = view.page_size.unwrap_or(view.table.page_size);
        let pagination = Pagination::new(page_size)?.with_page(view.page.unwrap_or(1));
        table = table.with_pagination(pagination)?;
    }

    let renderer = TextRenderer::from_config(&view.table);
    Ok(renderer.render(&table.view()))
}

fn export_rows(table: DataTable<JsonRow>, format: ExportFormat) -> Result<String, CliError> {
    let columns: Vec<Column<JsonRow>> = table
        .visible_columns()
        .into_iter()
        .cloned()
        .collect();
    let output: Rc<RefCell<Option<Result<String, serde_json::Error>>>> = Rc::default();
    let sink = output.clone();

    let mut table = table
        .exportable(true)
        .on_export(move |rows: &[&JsonRow]| {
            let refs: Vec<&Column<JsonRow>> = columns.iter().collect();
            let text = match format {
                ExportFormat::Csv => Ok(export::to_csv(&refs, rows)),
                ExportFormat::Json => export::to_json(&refs, rows),
            };
            *sink.borrow_mut() = Some(text);
        });

    table.export();
    let result = output.borrow_mut().take();
    match result {
        Some(text) => Ok(text?),
        None => Err(CliError::NothingExported),
    }
}
