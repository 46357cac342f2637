//! Plain-text rendering of a [`TableView`].

use crate::column::{Alignment, Column, ColumnWidth};
use crate::config::TableConfig;
use crate::text;
use crate::view::{Body, TableView};

const SEPARATOR: &str = " | ";
const CHECKED: &str = "■";
const UNCHECKED: &str = "□";

/// Draws a table view as a fixed-width text grid.
///
/// Sticky columns are drawn first. `Auto` and `Flex` columns size to their
/// content up to `max_column_width`; a plain text grid has no container
/// width to distribute.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    max_column_width: usize,
    show_footer: bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::from_config(&TableConfig::default())
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &TableConfig) -> Self {
        Self {
            max_column_width: config.max_column_width.max(1),
            show_footer: config.show_footer,
        }
    }

    /// Upper bound for auto-sized columns.
    pub fn max_column_width(mut self, width: usize) -> Self {
        self.max_column_width = width.max(1);
        self
    }

    pub fn show_footer(mut self, show: bool) -> Self {
        self.show_footer = show;
        self
    }

    /// Render the view. Lines are joined with `\n`, without a trailing
    /// newline.
    pub fn render<T>(&self, view: &TableView<'_, T>) -> String {
        let order = column_order(&view.columns);
        let headers: Vec<String> = order
            .iter()
            .map(|&c| header_text(view, view.columns[c]))
            .collect();
        let widths: Vec<usize> = order
            .iter()
            .zip(&headers)
            .map(|(&c, header)| self.column_width(view, c, header))
            .collect();

        let mut lines = Vec::new();

        if !view.global_filter.is_empty() {
            lines.push(format!("Filter: {}", view.global_filter));
        }

        // Header
        let mut header_cells = Vec::new();
        if view.selectable {
            header_cells.push(checkbox(view.all_visible_selected).to_string());
        }
        for ((&c, header), &width) in order.iter().zip(&headers).zip(&widths) {
            header_cells.push(text::fit(header, width, view.columns[c].align));
        }
        lines.push(trim_end(header_cells.join(SEPARATOR)));

        let mut rule = Vec::new();
        if view.selectable {
            rule.push("-".to_string());
        }
        rule.extend(widths.iter().map(|&w| "-".repeat(w)));
        lines.push(rule.join("-+-"));

        // Body
        match &view.body {
            Body::Rows => {
                for row in &view.rows {
                    let mut cells = Vec::new();
                    if view.selectable {
                        cells.push(checkbox(row.selected).to_string());
                    }
                    for (&c, &width) in order.iter().zip(&widths) {
                        match row.cells.get(c) {
                            Some(cell) => cells.push(text::fit(&cell.text, width, cell.align)),
                            None => cells.push(" ".repeat(width)),
                        }
                    }
                    lines.push(trim_end(cells.join(SEPARATOR)));
                }
            }
            status => {
                lines.push(status.message().unwrap_or_default().to_string());
            }
        }

        // Footer
        if self.show_footer {
            if let Some(footer) = footer(view) {
                lines.push(footer);
            }
        }

        lines.join("\n")
    }

    fn column_width<T>(&self, view: &TableView<'_, T>, index: usize, header: &str) -> usize {
        if let ColumnWidth::Fixed(width) = view.columns[index].width {
            return usize::from(width).max(1);
        }

        let content = view
            .rows
            .iter()
            .filter_map(|r| r.cells.get(index))
            .map(|cell| text::display_width(&cell.text))
            .max()
            .unwrap_or(0);

        content
            .max(text::display_width(header))
            .clamp(1, self.max_column_width)
    }
}

/// Sticky columns first, then the rest, each group in declaration order.
fn column_order<T>(columns: &[&Column<T>]) -> Vec<usize> {
    let (mut sticky, rest): (Vec<usize>, Vec<usize>) =
        (0..columns.len()).partition(|&i| columns[i].sticky);
    sticky.extend(rest);
    sticky
}

fn header_text<T>(view: &TableView<'_, T>, column: &Column<T>) -> String {
    match view.sort_for(&column.id) {
        Some(sort) => format!("{} {}", column.header, sort.direction.marker()),
        None => column.header.clone(),
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked { CHECKED } else { UNCHECKED }
}

fn footer<T>(view: &TableView<'_, T>) -> Option<String> {
    let mut parts = Vec::new();

    match view.pagination {
        Some(p) => {
            parts.push(format!(
                "Showing {} to {} of {}",
                p.start_row(),
                p.end_row(),
                p.total
            ));
            parts.push(format!("Page {}/{}", p.page, p.last_page()));
        }
        None if view.body == Body::Rows => {
            parts.push(format!("{} rows", view.processed_count));
        }
        None => {}
    }

    if view.selected_count > 0 {
        parts.push(format!("{} selected", view.selected_count));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" · "))
    }
}

fn trim_end(line: String) -> String {
    line.trim_end().to_string()
}
