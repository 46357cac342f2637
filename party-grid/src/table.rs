//! The table engine.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use log::{debug, trace, warn};

use crate::actions::{ActionState, BulkAction, TableAction};
use crate::column::{self, Column};
use crate::config::TableConfig;
use crate::control::{Callback, Control};
use crate::error::{Error, Result};
use crate::filter::{self, ColumnFilters};
use crate::pagination::{Pagination, PaginationChange, PaginationMode};
use crate::pipeline;
use crate::row::{self, RowId, RowIdFn};
use crate::selection::Selection;
use crate::sort::{self, Sort};
use crate::value::CellValue;
use crate::view::{Body, TableView, ViewRow};

/// Receives the proposed pagination change.
pub type PaginationCallback = Box<dyn FnMut(&PaginationChange)>;

/// Receives the proposed selection and the rows it covers, in data order.
pub type SelectionCallback<T> = Box<dyn FnMut(&Selection, &[&T])>;

/// Receives the processed (filtered and sorted, not paginated) rows.
pub type ExportCallback<T> = Box<dyn FnMut(&[&T])>;

/// Receives a clicked row and its data index.
pub type RowCallback<T> = Box<dyn FnMut(&T, usize)>;

/// Computes an optional style class for a row.
pub type RowClassFn<T> = Box<dyn Fn(&T, usize) -> Option<String>>;

/// A generic, declarative data table.
///
/// `DataTable<T>` takes a row collection and column descriptors and derives
/// the visible page: global filter, then column filters, then single-column
/// sort, then pagination. It manages selection by [`RowId`] and column
/// visibility, and reports user intents through callbacks.
///
/// Sort, global filter, column filters, pagination and selection are each
/// owned by the table unless a change handler is registered for that
/// concern (`on_sort_change` and friends), in which case the host owns it
/// and reflects accepted changes back with the matching `sync_*` method.
///
/// # Example
///
/// ```
/// use party_grid::{Column, DataTable, Sort};
///
/// #[derive(Clone)]
/// struct Guest {
///     name: &'static str,
///     age: u32,
/// }
///
/// let columns = vec![
///     Column::new("name", "Name")
///         .accessor(|g: &Guest| g.name.into())
///         .filterable(),
///     Column::new("age", "Age")
///         .accessor(|g: &Guest| g.age.into())
///         .sortable(),
/// ];
///
/// let mut table = DataTable::new(columns)
///     .unwrap()
///     .with_data(vec![
///         Guest { name: "Bob", age: 30 },
///         Guest { name: "Amy", age: 25 },
///     ]);
///
/// table.click_header("age").unwrap();
/// assert_eq!(table.sort(), Some(&Sort::asc("age")));
///
/// let view = table.view();
/// assert_eq!(view.texts(), vec![vec!["Amy", "25"], vec!["Bob", "30"]]);
/// ```
pub struct DataTable<T> {
    data: Vec<T>,
    columns: Vec<Column<T>>,
    config: TableConfig,
    row_id: RowIdFn<T>,

    sort: Control<Option<Sort>>,
    global_filter: Control<String>,
    column_filters: Control<ColumnFilters>,
    pagination: Option<Control<Pagination, PaginationCallback>>,
    pagination_mode: PaginationMode,
    selection: Control<Selection, SelectionCallback<T>>,

    /// Dynamic visibility overrides, keyed by column id.
    visibility: HashMap<String, bool>,

    selectable: bool,
    sortable: bool,
    filterable: bool,
    exportable: bool,
    refreshable: bool,

    loading: bool,
    error: Option<String>,

    actions: Vec<TableAction<T>>,
    bulk_actions: Vec<BulkAction<T>>,
    on_export: Option<ExportCallback<T>>,
    on_refresh: Option<Box<dyn FnMut()>>,
    on_row_click: Option<RowCallback<T>>,
    row_class_name: Option<RowClassFn<T>>,

    /// Bumped whenever data, columns, filters or sort change.
    revision: u64,
    /// Revision the processed indices were computed at.
    processed_at: Option<u64>,
    /// Filtered and sorted data indices.
    processed: Vec<usize>,
}

impl<T> DataTable<T> {
    /// Create a table with the given columns.
    ///
    /// Column ids must be unique.
    pub fn new(columns: Vec<Column<T>>) -> Result<Self> {
        validate_columns(&columns)?;

        Ok(Self {
            data: Vec::new(),
            columns,
            config: TableConfig::default(),
            row_id: row::index_row_id(),
            sort: Control::default(),
            global_filter: Control::default(),
            column_filters: Control::default(),
            pagination: None,
            pagination_mode: PaginationMode::default(),
            selection: Control::default(),
            visibility: HashMap::new(),
            selectable: false,
            sortable: true,
            filterable: true,
            exportable: false,
            refreshable: false,
            loading: false,
            error: None,
            actions: Vec::new(),
            bulk_actions: Vec::new(),
            on_export: None,
            on_refresh: None,
            on_row_click: None,
            row_class_name: None,
            revision: 0,
            processed_at: None,
            processed: Vec::new(),
        })
    }

    // =========================================================================
    // Builder
    // =========================================================================

    /// Set presentation defaults.
    pub fn with_config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the initial rows.
    pub fn with_data(mut self, data: Vec<T>) -> Self {
        self.set_data(data);
        self
    }

    /// Set how row ids are computed. Defaults to the row's index.
    pub fn with_row_id<F>(mut self, f: F) -> Self
    where
        F: Fn(&T, usize) -> RowId + Send + Sync + 'static,
    {
        self.row_id = Arc::new(f);
        self
    }

    /// Enable or disable row selection.
    pub fn selectable(mut self, enabled: bool) -> Self {
        self.selectable = enabled;
        self
    }

    /// Enable or disable header-click sorting.
    pub fn sortable(mut self, enabled: bool) -> Self {
        self.sortable = enabled;
        self
    }

    /// Show or hide the filter inputs.
    pub fn filterable(mut self, enabled: bool) -> Self {
        self.filterable = enabled;
        self
    }

    /// Enable or disable export.
    pub fn exportable(mut self, enabled: bool) -> Self {
        self.exportable = enabled;
        self
    }

    /// Enable or disable refresh.
    pub fn refreshable(mut self, enabled: bool) -> Self {
        self.refreshable = enabled;
        self
    }

    /// Initial sort.
    pub fn default_sort(mut self, sort: Sort) -> Self {
        self.sort.sync(Some(sort));
        self.invalidate();
        self
    }

    /// Enable pagination with the configured default page size.
    pub fn paginated(mut self) -> Self {
        let page_size = self.config.page_size.max(1);
        self.pagination = Some(Control::Owned(Pagination {
            page: 1,
            page_size,
            total: 0,
        }));
        self
    }

    /// Enable pagination starting from the given position.
    pub fn with_pagination(mut self, pagination: Pagination) -> Result<Self> {
        if pagination.page_size == 0 {
            return Err(Error::InvalidPageSize(0));
        }
        self.pagination = Some(Control::Owned(pagination));
        Ok(self)
    }

    /// Choose who slices the data into pages.
    pub fn pagination_mode(mut self, mode: PaginationMode) -> Self {
        self.pagination_mode = mode;
        self
    }

    /// Set the per-row action menu.
    pub fn with_actions(mut self, actions: Vec<TableAction<T>>) -> Self {
        self.actions = actions;
        self
    }

    /// Set the actions offered for the current selection.
    pub fn with_bulk_actions(mut self, actions: Vec<BulkAction<T>>) -> Self {
        self.bulk_actions = actions;
        self
    }

    /// Delegate the sort to the host.
    pub fn on_sort_change<F>(mut self, f: F) -> Self
    where
        F: FnMut(&Option<Sort>) + 'static,
    {
        let on_change: Callback<Option<Sort>> = Box::new(f);
        self.sort = self.sort.delegate(on_change);
        self
    }

    /// Delegate the global filter to the host.
    pub fn on_global_filter_change<F>(mut self, f: F) -> Self
    where
        F: FnMut(&String) + 'static,
    {
        let on_change: Callback<String> = Box::new(f);
        self.global_filter = self.global_filter.delegate(on_change);
        self
    }

    /// Delegate the column filters to the host.
    pub fn on_column_filters_change<F>(mut self, f: F) -> Self
    where
        F: FnMut(&ColumnFilters) + 'static,
    {
        let on_change: Callback<ColumnFilters> = Box::new(f);
        self.column_filters = self.column_filters.delegate(on_change);
        self
    }

    /// Delegate pagination to the host. Enables pagination if needed.
    pub fn on_pagination_change<F>(self, f: F) -> Self
    where
        F: FnMut(&PaginationChange) + 'static,
    {
        let mut this = if self.pagination.is_some() {
            self
        } else {
            self.paginated()
        };
        let on_change: PaginationCallback = Box::new(f);
        this.pagination = this.pagination.map(|p| p.delegate(on_change));
        this
    }

    /// Delegate selection to the host.
    pub fn on_selection_change<F>(mut self, f: F) -> Self
    where
        F: FnMut(&Selection, &[&T]) + 'static,
    {
        let on_change: SelectionCallback<T> = Box::new(f);
        self.selection = self.selection.delegate(on_change);
        self
    }

    /// Called by [`export`](Self::export) with the processed rows.
    pub fn on_export<F>(mut self, f: F) -> Self
    where
        F: FnMut(&[&T]) + 'static,
    {
        self.on_export = Some(Box::new(f));
        self
    }

    /// Called by [`refresh`](Self::refresh).
    pub fn on_refresh<F>(mut self, f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on_refresh = Some(Box::new(f));
        self
    }

    /// Called by [`click_row`](Self::click_row).
    pub fn on_row_click<F>(mut self, f: F) -> Self
    where
        F: FnMut(&T, usize) + 'static,
    {
        self.on_row_click = Some(Box::new(f));
        self
    }

    /// Compute a style class per row.
    pub fn row_class_name<F>(mut self, f: F) -> Self
    where
        F: Fn(&T, usize) -> Option<String> + 'static,
    {
        self.row_class_name = Some(Box::new(f));
        self
    }

    // =========================================================================
    // Data and display state
    // =========================================================================

    /// Replace the rows. Selection is kept by id.
    pub fn set_data(&mut self, data: Vec<T>) {
        debug!("Table data replaced: {} rows", data.len());
        self.data = data;
        self.invalidate();
    }

    /// The full, unprocessed rows.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Replace the columns.
    pub fn set_columns(&mut self, columns: Vec<Column<T>>) -> Result<()> {
        validate_columns(&columns)?;
        self.columns = columns;
        self.invalidate();
        Ok(())
    }

    /// All columns, hidden ones included.
    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    /// Id of the row at a data index.
    pub fn row_id(&self, index: usize) -> Option<RowId> {
        self.data.get(index).map(|row| (self.row_id)(row, index))
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Current sort.
    pub fn sort(&self) -> Option<&Sort> {
        self.sort.value().as_ref()
    }

    /// Header click: cycles `none -> asc -> desc -> none` on the column.
    ///
    /// Ignored for non-sortable columns or when sorting is disabled.
    pub fn click_header(&mut self, column_id: &str) -> Result<()> {
        let column = column::find(&self.columns, column_id)
            .ok_or_else(|| Error::UnknownColumn(column_id.to_string()))?;

        if !self.sortable || !column.sortable {
            debug!("Header click on non-sortable column {:?}", column_id);
            return Ok(());
        }

        let next = sort::cycle(self.sort(), column_id);
        self.change_sort(next);
        Ok(())
    }

    /// Set the sort directly.
    pub fn set_sort(&mut self, sort: Option<Sort>) -> Result<()> {
        if let Some(s) = &sort {
            if column::find(&self.columns, &s.column_id).is_none() {
                return Err(Error::UnknownColumn(s.column_id.clone()));
            }
        }
        if self.sort.value() != &sort {
            self.change_sort(sort);
        }
        Ok(())
    }

    /// Reflect a host-owned sort.
    pub fn sync_sort(&mut self, sort: Option<Sort>) {
        self.sort.sync(sort);
        self.invalidate();
    }

    fn change_sort(&mut self, next: Option<Sort>) {
        debug!("Sort change: {:?}", next);
        match self.sort.propose(next) {
            Some((on_change, next)) => on_change(&next),
            None => self.invalidate(),
        }
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    /// Current global filter.
    pub fn global_filter(&self) -> &str {
        self.global_filter.value()
    }

    /// Current column filters.
    pub fn column_filters(&self) -> &ColumnFilters {
        self.column_filters.value()
    }

    /// Set the global free-text filter. Returns to the first page.
    pub fn set_global_filter(&mut self, value: impl Into<String>) {
        let value = value.into();
        if self.global_filter.value() == &value {
            return;
        }

        debug!("Global filter change: {:?}", value);
        match self.global_filter.propose(value) {
            Some((on_change, next)) => on_change(&next),
            None => self.invalidate(),
        }
        self.reset_page();
    }

    /// Reflect a host-owned global filter.
    pub fn sync_global_filter(&mut self, value: impl Into<String>) {
        self.global_filter.sync(value.into());
        self.invalidate();
    }

    /// Set or replace the filter on one column. Null and empty text values
    /// remove it. Returns to the first page.
    pub fn set_column_filter(&mut self, column_id: &str, value: impl Into<CellValue>) -> Result<()> {
        if column::find(&self.columns, column_id).is_none() {
            return Err(Error::UnknownColumn(column_id.to_string()));
        }

        let value = value.into();
        let mut next = self.column_filters.value().clone();
        if filter::is_active(&value) {
            next.insert(column_id.to_string(), value);
        } else {
            next.remove(column_id);
        }

        self.change_column_filters(next);
        Ok(())
    }

    /// Remove the filter on one column.
    pub fn clear_column_filter(&mut self, column_id: &str) -> Result<()> {
        self.set_column_filter(column_id, CellValue::Null)
    }

    /// Remove the global filter and every column filter.
    pub fn clear_filters(&mut self) {
        self.set_global_filter(String::new());
        self.change_column_filters(ColumnFilters::new());
    }

    /// Reflect host-owned column filters.
    pub fn sync_column_filters(&mut self, filters: ColumnFilters) {
        self.column_filters.sync(filters);
        self.invalidate();
    }

    fn change_column_filters(&mut self, next: ColumnFilters) {
        if self.column_filters.value() == &next {
            return;
        }

        debug!("Column filters change: {:?}", next);
        match self.column_filters.propose(next) {
            Some((on_change, next)) => on_change(&next),
            None => self.invalidate(),
        }
        self.reset_page();
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Effective pagination: `total` resolved for the pagination mode and
    /// `page` clamped into range. `None` when the table is not paginated.
    pub fn pagination(&mut self) -> Option<Pagination> {
        self.ensure_processed();
        self.effective_pagination()
    }

    /// Go to a page. Out-of-range pages are clamped.
    pub fn set_page(&mut self, page: usize) {
        self.ensure_processed();
        let Some(current) = self.effective_pagination() else {
            warn!("set_page({}) on a table without pagination", page);
            return;
        };
        let page = page.clamp(1, current.last_page());
        self.change_pagination(PaginationChange {
            page: Some(page),
            page_size: None,
        });
    }

    pub fn next_page(&mut self) {
        if let Some(p) = self.pagination() {
            if p.has_next() {
                self.set_page(p.page + 1);
            }
        }
    }

    pub fn prev_page(&mut self) {
        if let Some(p) = self.pagination() {
            if p.has_previous() {
                self.set_page(p.page - 1);
            }
        }
    }

    pub fn first_page(&mut self) {
        self.set_page(1);
    }

    pub fn last_page(&mut self) {
        if let Some(p) = self.pagination() {
            self.set_page(p.last_page());
        }
    }

    /// Change the page size. Returns to the first page.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        if page_size == 0 {
            return Err(Error::InvalidPageSize(page_size));
        }
        self.change_pagination(PaginationChange {
            page: Some(1),
            page_size: Some(page_size),
        });
        Ok(())
    }

    /// Reflect host-owned pagination.
    pub fn sync_pagination(&mut self, pagination: Pagination) {
        match self.pagination.as_mut() {
            Some(control) => control.sync(pagination),
            None => self.pagination = Some(Control::Owned(pagination)),
        }
    }

    /// Return to page 1 after the processed rows changed.
    ///
    /// Compares against the stored page, not the clamped one: a page that
    /// only looks like page 1 because the rows shrank must still be reset.
    fn reset_page(&mut self) {
        let Some(control) = self.pagination.as_mut() else {
            return;
        };
        let stored = *control.value();
        if stored.page == 1 {
            return;
        }

        let change = PaginationChange {
            page: Some(1),
            page_size: None,
        };
        debug!("Pagination reset to page 1 (was {})", stored.page);
        if let Some((on_change, _)) = control.propose(stored.apply(change)) {
            on_change(&change);
        }
    }

    fn change_pagination(&mut self, change: PaginationChange) {
        self.ensure_processed();
        let Some(current) = self.effective_pagination() else {
            warn!("Pagination change on a table without pagination");
            return;
        };

        let next = current.apply(change);
        if next == current {
            return;
        }

        debug!("Pagination change: {:?}", change);
        if let Some(control) = self.pagination.as_mut() {
            if let Some((on_change, _)) = control.propose(next) {
                on_change(&change);
            }
        }
    }

    fn effective_pagination(&self) -> Option<Pagination> {
        let control = self.pagination.as_ref()?;
        let pagination = match self.pagination_mode {
            PaginationMode::Client => control.value().with_total(self.processed.len()),
            PaginationMode::Server => *control.value(),
        };
        Some(pagination.clamped())
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Current selection.
    pub fn selection(&self) -> &Selection {
        self.selection.value()
    }

    /// Whether the row at a data index is selected.
    pub fn is_selected(&self, index: usize) -> bool {
        self.row_id(index)
            .is_some_and(|id| self.selection.value().is_selected(&id))
    }

    /// Selected rows in data order.
    pub fn selected_rows(&self) -> Vec<&T> {
        rows_for(&self.data, &self.row_id, self.selection.value())
    }

    /// Toggle one row's selection.
    pub fn toggle_row(&mut self, id: &RowId) {
        if !self.selectable {
            warn!("toggle_row on a non-selectable table");
            return;
        }
        let mut next = self.selection.value().clone();
        next.toggle(id);
        self.change_selection(next);
    }

    /// Select-all toggle over the rows of the current page only.
    pub fn toggle_all_visible(&mut self) {
        if !self.selectable {
            warn!("toggle_all_visible on a non-selectable table");
            return;
        }
        self.ensure_processed();
        let ids = self.visible_row_ids();
        let mut next = self.selection.value().clone();
        let (added, removed) = next.toggle_all(&ids);
        if added.is_empty() && removed.is_empty() {
            return;
        }
        self.change_selection(next);
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) {
        if self.selection.value().is_empty() {
            return;
        }
        self.change_selection(Selection::new());
    }

    /// Reflect a host-owned selection.
    pub fn sync_selection(&mut self, selection: Selection) {
        self.selection.sync(selection);
    }

    /// Ids of the rows on the current page, in display order.
    pub fn page_row_ids(&mut self) -> Vec<RowId> {
        self.ensure_processed();
        self.visible_row_ids()
    }

    fn change_selection(&mut self, next: Selection) {
        debug!("Selection change: {} rows", next.len());
        if let Some((on_change, next)) = self.selection.propose(next) {
            let rows = rows_for(&self.data, &self.row_id, &next);
            on_change(&next, &rows);
        }
    }

    fn visible_row_ids(&self) -> Vec<RowId> {
        self.page_indices()
            .iter()
            .map(|&i| (self.row_id)(&self.data[i], i))
            .collect()
    }

    // =========================================================================
    // Column visibility
    // =========================================================================

    /// Whether a column is shown.
    pub fn is_column_visible(&self, column_id: &str) -> bool {
        column::find(&self.columns, column_id).is_some_and(|c| self.column_shown(c))
    }

    /// Show or hide a column.
    pub fn set_column_visible(&mut self, column_id: &str, visible: bool) -> Result<()> {
        if column::find(&self.columns, column_id).is_none() {
            return Err(Error::UnknownColumn(column_id.to_string()));
        }
        debug!("Column {:?} visible: {}", column_id, visible);
        self.visibility.insert(column_id.to_string(), visible);
        Ok(())
    }

    /// Flip a column's visibility. Returns the new visibility.
    pub fn toggle_column_visibility(&mut self, column_id: &str) -> Result<bool> {
        let visible = !self.is_column_visible(column_id);
        self.set_column_visible(column_id, visible)?;
        Ok(visible)
    }

    /// Columns that render, in declaration order.
    pub fn visible_columns(&self) -> Vec<&Column<T>> {
        self.columns.iter().filter(|c| self.column_shown(c)).collect()
    }

    fn column_shown(&self, column: &Column<T>) -> bool {
        self.visibility
            .get(&column.id)
            .copied()
            .unwrap_or(!column.hidden)
    }

    // =========================================================================
    // Actions and hooks
    // =========================================================================

    /// Actions offered for a row, hidden ones removed.
    pub fn row_actions(&self, index: usize) -> Result<Vec<ActionState>> {
        let row = self.data.get(index).ok_or(Error::RowOutOfRange(index))?;
        Ok(self
            .actions
            .iter()
            .filter(|a| !a.is_hidden(row))
            .map(|a| ActionState {
                id: a.id.clone(),
                label: a.label.clone(),
                disabled: a.is_disabled(row),
                destructive: a.destructive,
            })
            .collect())
    }

    /// Run a row action. Returns `false` if it is hidden or disabled for
    /// the row.
    pub fn run_action(&mut self, action_id: &str, index: usize) -> Result<bool> {
        let row = self.data.get(index).ok_or(Error::RowOutOfRange(index))?;
        let action = self
            .actions
            .iter_mut()
            .find(|a| a.id == action_id)
            .ok_or_else(|| Error::UnknownAction(action_id.to_string()))?;

        if action.is_hidden(row) || action.is_disabled(row) {
            debug!("Action {:?} unavailable for row {}", action_id, index);
            return Ok(false);
        }

        debug!("Running action {:?} on row {}", action_id, index);
        action.invoke(row, index);
        Ok(true)
    }

    /// Run a bulk action over the selected rows. Returns `false` when
    /// nothing is selected.
    pub fn run_bulk_action(&mut self, action_id: &str) -> Result<bool> {
        let action = self
            .bulk_actions
            .iter_mut()
            .find(|a| a.id == action_id)
            .ok_or_else(|| Error::UnknownAction(action_id.to_string()))?;

        let rows = rows_for(&self.data, &self.row_id, self.selection.value());
        if rows.is_empty() {
            debug!("Bulk action {:?} with empty selection", action_id);
            return Ok(false);
        }

        debug!("Running bulk action {:?} on {} rows", action_id, rows.len());
        action.invoke(&rows);
        Ok(true)
    }

    /// Hand the processed rows (filtered and sorted, all pages) to the
    /// export handler. Returns `false` if export is disabled or unhandled.
    pub fn export(&mut self) -> bool {
        if !self.exportable {
            warn!("export on a non-exportable table");
            return false;
        }
        self.ensure_processed();

        let Some(on_export) = self.on_export.as_mut() else {
            return false;
        };
        let data = &self.data;
        let rows: Vec<&T> = self.processed.iter().map(|&i| &data[i]).collect();
        debug!("Exporting {} rows", rows.len());
        on_export(&rows);
        true
    }

    /// Ask the host to reload. Returns `false` if refresh is disabled or
    /// unhandled.
    pub fn refresh(&mut self) -> bool {
        if !self.refreshable {
            warn!("refresh on a non-refreshable table");
            return false;
        }
        match self.on_refresh.as_mut() {
            Some(on_refresh) => {
                on_refresh();
                true
            }
            None => false,
        }
    }

    /// Report a click on the row at a data index.
    pub fn click_row(&mut self, index: usize) -> Result<()> {
        let row = self.data.get(index).ok_or(Error::RowOutOfRange(index))?;
        if let Some(on_row_click) = self.on_row_click.as_mut() {
            on_row_click(row, index);
        }
        Ok(())
    }

    /// Style class for the row at a data index.
    pub fn row_class(&self, index: usize) -> Option<String> {
        let row = self.data.get(index)?;
        self.row_class_name.as_ref().and_then(|f| f(row, index))
    }

    // =========================================================================
    // Processing and view
    // =========================================================================

    /// Processed rows: filtered and sorted, before pagination.
    pub fn processed_rows(&mut self) -> Vec<&T> {
        self.ensure_processed();
        self.processed.iter().map(|&i| &self.data[i]).collect()
    }

    /// Rows of the current page, in display order.
    pub fn page_rows(&mut self) -> Vec<&T> {
        self.ensure_processed();
        self.page_indices().iter().map(|&i| &self.data[i]).collect()
    }

    /// Build a renderable snapshot.
    pub fn view(&mut self) -> TableView<'_, T> {
        self.ensure_processed();

        let pagination = self.effective_pagination();
        if let (Some(effective), Some(Control::Owned(stored))) = (pagination, self.pagination.as_mut()) {
            // keep the owned page inside its bounds
            *stored = effective;
        }

        let this = &*self;
        let page = this.page_indices();

        let body = if this.loading {
            Body::Loading(this.config.loading_message.clone())
        } else if let Some(error) = &this.error {
            Body::Error(error.clone())
        } else if page.is_empty() {
            Body::Empty(this.config.empty_message.clone())
        } else {
            Body::Rows
        };

        let columns = this.visible_columns();
        let selection = this.selection.value();

        let rows = if body == Body::Rows {
            page.iter()
                .map(|&i| {
                    let row = &this.data[i];
                    let row_id = (this.row_id)(row, i);
                    ViewRow {
                        data_index: i,
                        selected: selection.is_selected(&row_id),
                        row_id,
                        class_name: this.row_class(i),
                        cells: columns.iter().map(|c| c.render(row, i)).collect(),
                    }
                })
                .collect()
        } else {
            Vec::new()
        };

        let all_visible_selected = selection.contains_all(&this.visible_row_ids());
        let bulk_actions = if selection.is_empty() {
            Vec::new()
        } else {
            this.bulk_actions
                .iter()
                .map(|a| ActionState {
                    id: a.id.clone(),
                    label: a.label.clone(),
                    disabled: false,
                    destructive: a.destructive,
                })
                .collect()
        };

        TableView {
            body,
            columns,
            rows,
            sort: this.sort(),
            global_filter: this.global_filter(),
            pagination,
            page_size_options: &this.config.page_size_options,
            processed_count: this.processed.len(),
            selected_count: this.selected_rows().len(),
            all_visible_selected,
            bulk_actions,
            selectable: this.selectable,
            sortable: this.sortable,
            filterable: this.filterable,
            exportable: this.exportable,
            refreshable: this.refreshable,
        }
    }

    fn invalidate(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    fn ensure_processed(&mut self) {
        if self.processed_at == Some(self.revision) {
            return;
        }

        self.processed = pipeline::process(
            &self.data,
            &self.columns,
            self.global_filter.value(),
            self.column_filters.value(),
            self.sort.value().as_ref(),
        );
        self.processed_at = Some(self.revision);
        trace!(
            "Processed {} of {} rows (revision {})",
            self.processed.len(),
            self.data.len(),
            self.revision
        );
    }

    /// Data indices of the current page. Requires `ensure_processed`.
    fn page_indices(&self) -> &[usize] {
        match (self.effective_pagination(), self.pagination_mode) {
            (Some(p), PaginationMode::Client) => &self.processed[p.range()],
            _ => &self.processed,
        }
    }
}

impl<T> fmt::Debug for DataTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("rows", &self.data.len())
            .field("columns", &self.columns)
            .field("sort", &self.sort)
            .field("global_filter", &self.global_filter)
            .field("column_filters", &self.column_filters)
            .field("pagination", &self.pagination)
            .field("selection", &self.selection)
            .field("loading", &self.loading)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

/// Reject duplicate column ids.
fn validate_columns<T>(columns: &[Column<T>]) -> Result<()> {
    let mut seen = HashSet::new();
    for column in columns {
        if !seen.insert(column.id.as_str()) {
            return Err(Error::DuplicateColumn(column.id.clone()));
        }
    }
    Ok(())
}

/// Rows whose id is in the selection, in data order.
fn rows_for<'a, T>(data: &'a [T], row_id: &RowIdFn<T>, selection: &Selection) -> Vec<&'a T> {
    if selection.is_empty() {
        return Vec::new();
    }
    data.iter()
        .enumerate()
        .filter(|(i, row)| selection.is_selected(&row_id(*row, *i)))
        .map(|(_, row)| row)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn numbers(n: u32) -> DataTable<u32> {
        let columns = vec![Column::<u32>::new("n", "N").accessor(|n| (*n).into()).sortable()];
        DataTable::new(columns).unwrap().with_data((1..=n).collect())
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let columns = vec![Column::<u32>::new("a", "A"), Column::<u32>::new("a", "B")];
        assert_eq!(
            DataTable::new(columns).err(),
            Some(Error::DuplicateColumn("a".into()))
        );
    }

    #[test]
    fn test_owned_page_is_clamped_on_view() {
        let mut table = numbers(5)
            .with_pagination(Pagination::new(2).unwrap().with_page(9))
            .unwrap();
        let view = table.view();
        assert_eq!(view.pagination.map(|p| p.page), Some(3));
        assert_eq!(view.texts(), vec![vec!["5"]]);
    }

    #[test]
    fn test_processing_is_memoized() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let columns = vec![
            Column::<u32>::new("n", "N").accessor(|n| (*n).into()),
            Column::<u32>::new("counted", "Counted")
                .accessor(move |n| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    (*n).into()
                })
                .filterable()
                .hidden(),
        ];
        let mut table = DataTable::new(columns)
            .unwrap()
            .with_data(vec![1, 2, 3])
            .selectable(true);

        table.set_global_filter("2");
        let _ = table.view();
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        let _ = table.view();
        table.toggle_row(&RowId::from(1usize));
        let _ = table.view();
        assert_eq!(calls.load(Ordering::SeqCst), 3, "no recompute without input change");

        table.set_global_filter("3");
        let _ = table.view();
        assert_eq!(calls.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn test_filter_change_returns_to_first_page() {
        let mut table = numbers(30).paginated();
        table.set_page(3);
        assert_eq!(table.pagination().map(|p| p.page), Some(3));

        table.set_global_filter("1");
        assert_eq!(table.pagination().map(|p| p.page), Some(1));
    }

    #[test]
    fn test_set_page_without_pagination_is_ignored() {
        let mut table = numbers(3);
        table.set_page(2);
        assert_eq!(table.pagination(), None);
        assert_eq!(table.page_rows().len(), 3);
    }
}
