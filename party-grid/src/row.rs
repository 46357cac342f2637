//! Row identity.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Stable, caller-defined identifier for a row.
///
/// Selection is tracked by `RowId`, never by row position or reference, so
/// a row stays selected when the host hands over a fresh collection whose
/// rows map to the same ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    /// Create a row id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RowId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

macro_rules! row_id_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for RowId {
                fn from(id: $ty) -> Self {
                    Self(id.to_string())
                }
            }
        )*
    };
}

row_id_from_int!(u32, u64, usize, i32, i64);

/// Computes the id of a row from the row and its index in the data.
pub type RowIdFn<T> = Arc<dyn Fn(&T, usize) -> RowId + Send + Sync>;

/// The default row id: the row's position in the data collection.
pub fn index_row_id<T>() -> RowIdFn<T> {
    Arc::new(|_, index| RowId::from(index))
}
