//! Table configuration

use serde::{Deserialize, Serialize};

use crate::pagination::DEFAULT_PAGE_SIZE_OPTIONS;

/// Presentation defaults for a table.
///
/// # Example
///
/// ```
/// use party_grid::TableConfig;
///
/// let config = TableConfig::default()
///     .with_page_size(25)
///     .with_empty_message("No watch parties yet");
/// assert_eq!(config.page_size, 25);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Page size used when pagination is enabled without an explicit size.
    ///
    /// Default: 10
    pub page_size: usize,

    /// Sizes offered by the page size picker.
    ///
    /// Default: 10, 20, 50, 100
    pub page_size_options: Vec<usize>,

    /// Shown when no rows survive filtering.
    ///
    /// Default: "No data available"
    pub empty_message: String,

    /// Shown while the host is loading data.
    ///
    /// Default: "Loading..."
    pub loading_message: String,

    /// Upper bound for auto-sized columns in the text renderer.
    ///
    /// Default: 40
    pub max_column_width: usize,

    /// Whether the text renderer prints the pagination footer.
    ///
    /// Default: true
    pub show_footer: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            empty_message: "No data available".to_string(),
            loading_message: "Loading...".to_string(),
            max_column_width: 40,
            show_footer: true,
        }
    }
}

impl TableConfig {
    /// Creates a new table config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the page size options.
    pub fn with_page_size_options(mut self, options: Vec<usize>) -> Self {
        self.page_size_options = options;
        self
    }

    /// Sets the empty-state message.
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Sets the loading message.
    pub fn with_loading_message(mut self, message: impl Into<String>) -> Self {
        self.loading_message = message.into();
        self
    }

    /// Sets the maximum auto column width.
    pub fn with_max_column_width(mut self, width: usize) -> Self {
        self.max_column_width = width;
        self
    }

    /// Sets whether the footer is rendered.
    pub fn with_footer(mut self, show: bool) -> Self {
        self.show_footer = show;
        self
    }
}
