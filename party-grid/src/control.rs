//! Per-concern ownership of table state.
//!
//! Every stateful concern of a [`DataTable`](crate::DataTable) (sort,
//! global filter, column filters, pagination, selection) is either owned
//! by the table or delegated to the host. The choice is made per concern:
//! registering a change handler delegates that concern, leaving it out
//! keeps the state internal.

use std::fmt;

/// Change handler for a delegated value.
pub type Callback<V> = Box<dyn FnMut(&V)>;

/// State that is either owned by the table or reflected from the host.
pub enum Control<V, H = Callback<V>> {
    /// The table mutates the value itself.
    Owned(V),
    /// The host owns the value. The table only proposes changes through
    /// `on_change` and waits for the host to sync the new value back.
    Delegated { value: V, on_change: H },
}

impl<V, H> Control<V, H> {
    /// Current value.
    pub fn value(&self) -> &V {
        match self {
            Control::Owned(value) => value,
            Control::Delegated { value, .. } => value,
        }
    }

    /// Whether the host owns this value.
    pub fn is_delegated(&self) -> bool {
        matches!(self, Control::Delegated { .. })
    }

    /// Hand the value to the host, keeping the current value as the
    /// starting point.
    pub fn delegate(self, on_change: H) -> Self {
        let value = match self {
            Control::Owned(value) => value,
            Control::Delegated { value, .. } => value,
        };
        Control::Delegated { value, on_change }
    }

    /// Propose a new value.
    ///
    /// Owned values are replaced and `None` is returned. Delegated values
    /// stay untouched; the handler is returned with the proposal so the
    /// caller can notify the host.
    pub fn propose(&mut self, next: V) -> Option<(&mut H, V)> {
        match self {
            Control::Owned(value) => {
                *value = next;
                None
            }
            Control::Delegated { on_change, .. } => Some((on_change, next)),
        }
    }

    /// Replace the value outright. This is how the host reflects a
    /// delegated value back into the table.
    pub fn sync(&mut self, next: V) {
        match self {
            Control::Owned(value) => *value = next,
            Control::Delegated { value, .. } => *value = next,
        }
    }
}

impl<V: Default, H> Default for Control<V, H> {
    fn default() -> Self {
        Control::Owned(V::default())
    }
}

impl<V: fmt::Debug, H> fmt::Debug for Control<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Control::Owned(value) => f.debug_tuple("Owned").field(value).finish(),
            Control::Delegated { value, .. } => f
                .debug_struct("Delegated")
                .field("value", value)
                .finish_non_exhaustive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_owned_applies_proposal() {
        let mut control: Control<u32> = Control::Owned(1);
        assert!(control.propose(2).is_none());
        assert_eq!(*control.value(), 2);
    }

    #[test]
    fn test_delegated_forwards_proposal() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut control: Control<u32> = Control::Owned(1);
        control = control.delegate(Box::new(move |v: &u32| sink.borrow_mut().push(*v)));

        if let Some((on_change, next)) = control.propose(5) {
            on_change(&next);
        }

        assert_eq!(*control.value(), 1, "delegated value waits for sync");
        assert_eq!(*seen.borrow(), vec![5]);

        control.sync(5);
        assert_eq!(*control.value(), 5);
        assert!(control.is_delegated());
    }
}
