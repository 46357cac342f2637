//! Tables over schemaless JSON records.
//!
//! Hosts that load rows from JSON (such as the command line viewer) do not
//! have a Rust type per row. These helpers build columns and row ids that
//! read fields out of a [`JsonRow`] by key.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::column::Column;
use crate::row::RowId;
use crate::value::CellValue;

/// One JSON object.
pub type JsonRow = Map<String, Value>;

/// Read a field as a cell value. Missing fields are `Null`; strings in
/// RFC 3339 form become timestamps so they sort chronologically.
pub fn field_value(row: &JsonRow, key: &str) -> CellValue {
    match row.get(key) {
        None => CellValue::Null,
        Some(Value::String(s)) => match DateTime::parse_from_rfc3339(s) {
            Ok(dt) => CellValue::DateTime(dt.with_timezone(&Utc)),
            Err(_) => CellValue::Text(s.clone()),
        },
        Some(value) => CellValue::from(value),
    }
}

/// A sortable, filterable column reading `key`.
pub fn field(key: impl Into<String>, header: impl Into<String>) -> Column<JsonRow> {
    let key = key.into();
    Column::new(key.clone(), header)
        .accessor(move |row: &JsonRow| field_value(row, &key))
        .sortable()
        .filterable()
}

/// One column per key of the first row, in the order the keys appear.
pub fn infer_columns(rows: &[JsonRow]) -> Vec<Column<JsonRow>> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    first.keys().map(|key| field(key.clone(), humanize(key))).collect()
}

/// Row ids taken from `key`, falling back to the row index when the field
/// is missing or null.
pub fn id_field(key: impl Into<String>) -> impl Fn(&JsonRow, usize) -> RowId + Send + Sync + 'static {
    let key = key.into();
    move |row, index| match row.get(&key) {
        None | Some(Value::Null) => RowId::from(index),
        Some(Value::String(s)) => RowId::new(s.as_str()),
        Some(other) => RowId::new(other.to_string()),
    }
}

/// `created_at` -> `Created At`
pub fn humanize(key: &str) -> String {
    key.split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn row(value: Value) -> JsonRow {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_field_value_kinds() {
        let r = row(json!({
            "title": "Movie night",
            "viewers": 12,
            "starts_at": "2026-03-01T20:00:00Z",
            "tags": ["horror"],
        }));

        assert_eq!(field_value(&r, "title"), CellValue::from("Movie night"));
        assert_eq!(field_value(&r, "viewers"), CellValue::Int(12));
        assert_eq!(field_value(&r, "starts_at").type_name(), "datetime");
        assert_eq!(field_value(&r, "tags"), CellValue::Json(json!(["horror"])));
        assert!(field_value(&r, "missing").is_null());
    }

    #[test]
    fn test_infer_columns_from_first_row() {
        let rows = vec![row(json!({ "host_name": "amy", "viewers": 3 }))];
        let columns = infer_columns(&rows);
        let headers: Vec<&str> = columns.iter().map(|c| c.header.as_str()).collect();
        assert_eq!(headers, vec!["Host Name", "Viewers"]);
        assert!(columns.iter().all(|c| c.sortable && c.filterable));
        assert!(infer_columns(&[]).is_empty());
    }

    #[test]
    fn test_id_field_falls_back_to_index() {
        let id = id_field("id");
        assert_eq!(id(&row(json!({ "id": "p-1" })), 0), RowId::from("p-1"));
        assert_eq!(id(&row(json!({ "id": 7 })), 0), RowId::from("7"));
        assert_eq!(id(&row(json!({ "name": "x" })), 4), RowId::from("4"));
    }
}
