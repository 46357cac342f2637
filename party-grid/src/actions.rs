//! Row and bulk actions.

use std::fmt;

/// Predicate over a row.
pub type RowPredicate<T> = Box<dyn Fn(&T) -> bool>;

/// An entry in a row's action menu.
///
/// # Example
///
/// ```
/// use party_grid::TableAction;
///
/// struct Member {
///     name: String,
///     banned: bool,
/// }
///
/// let ban = TableAction::new("ban", "Ban", |m: &Member, _index| {
///     println!("banning {}", m.name);
/// })
/// .disabled_when(|m| m.banned);
/// assert_eq!(ban.id, "ban");
/// ```
pub struct TableAction<T> {
    pub id: String,
    pub label: String,
    /// Marks actions the host renders with a warning style.
    pub destructive: bool,
    on_click: Box<dyn FnMut(&T, usize)>,
    disabled: Option<RowPredicate<T>>,
    hidden: Option<RowPredicate<T>>,
}

impl<T> TableAction<T> {
    /// Create an action. `on_click` receives the row and its data index.
    pub fn new<F>(id: impl Into<String>, label: impl Into<String>, on_click: F) -> Self
    where
        F: FnMut(&T, usize) + 'static,
    {
        Self {
            id: id.into(),
            label: label.into(),
            destructive: false,
            on_click: Box::new(on_click),
            disabled: None,
            hidden: None,
        }
    }

    /// Disable the action for rows matching the predicate.
    pub fn disabled_when<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        self.disabled = Some(Box::new(f));
        self
    }

    /// Hide the action for rows matching the predicate.
    pub fn hidden_when<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        self.hidden = Some(Box::new(f));
        self
    }

    /// Mark the action as destructive.
    pub fn destructive(mut self) -> Self {
        self.destructive = true;
        self
    }

    pub fn is_disabled(&self, row: &T) -> bool {
        self.disabled.as_ref().is_some_and(|f| f(row))
    }

    pub fn is_hidden(&self, row: &T) -> bool {
        self.hidden.as_ref().is_some_and(|f| f(row))
    }

    pub(crate) fn invoke(&mut self, row: &T, index: usize) {
        (self.on_click)(row, index)
    }
}

impl<T> fmt::Debug for TableAction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableAction")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("destructive", &self.destructive)
            .finish_non_exhaustive()
    }
}

/// An action over the whole current selection.
pub struct BulkAction<T> {
    pub id: String,
    pub label: String,
    pub destructive: bool,
    on_click: Box<dyn FnMut(&[&T])>,
}

impl<T> BulkAction<T> {
    /// Create a bulk action. `on_click` receives the selected rows in data order.
    pub fn new<F>(id: impl Into<String>, label: impl Into<String>, on_click: F) -> Self
    where
        F: FnMut(&[&T]) + 'static,
    {
        Self {
            id: id.into(),
            label: label.into(),
            destructive: false,
            on_click: Box::new(on_click),
        }
    }

    /// Mark the action as destructive.
    pub fn destructive(mut self) -> Self {
        self.destructive = true;
        self
    }

    pub(crate) fn invoke(&mut self, rows: &[&T]) {
        (self.on_click)(rows)
    }
}

impl<T> fmt::Debug for BulkAction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BulkAction")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("destructive", &self.destructive)
            .finish_non_exhaustive()
    }
}

/// Resolved state of a row action, for menus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionState {
    pub id: String,
    pub label: String,
    pub disabled: bool,
    pub destructive: bool,
}
