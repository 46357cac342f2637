//! CSV and JSON export of processed rows.
//!
//! These are the helpers a host calls from its `on_export` handler.

use serde_json::{Map, Value};

use crate::column::Column;
use crate::value::CellValue;

/// Render rows as CSV with a header line of column headers.
///
/// Fields containing a comma, quote, or line break are quoted and inner
/// quotes doubled. Lines end in `\r\n`.
pub fn to_csv<T>(columns: &[&Column<T>], rows: &[&T]) -> String {
    let mut out = String::new();

    let header: Vec<String> = columns.iter().map(|c| escape_csv(&c.header)).collect();
    out.push_str(&header.join(","));
    out.push_str("\r\n");

    for row in rows {
        let fields: Vec<String> = columns
            .iter()
            .map(|c| escape_csv(&c.value(row).to_string()))
            .collect();
        out.push_str(&fields.join(","));
        out.push_str("\r\n");
    }

    out
}

/// Render rows as a JSON array of objects keyed by column id.
pub fn to_json<T>(columns: &[&Column<T>], rows: &[&T]) -> serde_json::Result<String> {
    let records = rows
        .iter()
        .map(|row| {
            let record = columns
                .iter()
                .map(|c| Ok((c.id.clone(), to_json_value(c.value(row))?)))
                .collect::<serde_json::Result<Map<String, Value>>>()?;
            Ok(Value::Object(record))
        })
        .collect::<serde_json::Result<Vec<Value>>>()?;

    serde_json::to_string_pretty(&records)
}

fn to_json_value(value: CellValue) -> serde_json::Result<Value> {
    match value {
        CellValue::Json(v) => Ok(v),
        other => serde_json::to_value(&other),
    }
}

fn escape_csv(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Row = (&'static str, i64);

    fn columns() -> Vec<Column<Row>> {
        vec![
            Column::<Row>::new("title", "Title").accessor(|r| r.0.into()),
            Column::<Row>::new("viewers", "Viewers").accessor(|r| r.1.into()),
        ]
    }

    #[test]
    fn test_csv_quotes_special_fields() {
        let columns = columns();
        let refs: Vec<&Column<Row>> = columns.iter().collect();
        let data = [("Plain", 1), ("Comma, here", 2), ("Say \"hi\"", 3)];
        let rows: Vec<&Row> = data.iter().collect();

        let csv = to_csv(&refs, &rows);
        assert_eq!(
            csv,
            "Title,Viewers\r\nPlain,1\r\n\"Comma, here\",2\r\n\"Say \"\"hi\"\"\",3\r\n"
        );
    }

    #[test]
    fn test_json_keys_by_column_id() {
        let columns = columns();
        let refs: Vec<&Column<Row>> = columns.iter().collect();
        let data = [("Movie night", 12)];
        let rows: Vec<&Row> = data.iter().collect();

        let json = to_json(&refs, &rows).unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, serde_json::json!([{ "title": "Movie night", "viewers": 12 }]));
    }

    #[test]
    fn test_json_keeps_typed_cells() {
        type Reading = (f64, bool, Option<&'static str>);
        let columns = vec![
            Column::<Reading>::new("level", "Level").accessor(|r| r.0.into()),
            Column::<Reading>::new("live", "Live").accessor(|r| r.1.into()),
            Column::<Reading>::new("note", "Note").accessor(|r| match r.2 {
                Some(note) => note.into(),
                None => CellValue::Null,
            }),
        ];
        let refs: Vec<&Column<Reading>> = columns.iter().collect();
        let data = [(0.5, true, Some("ok")), (f64::NAN, false, None)];
        let rows: Vec<&Reading> = data.iter().collect();

        let json = to_json(&refs, &rows).unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();
        // non-finite floats have no JSON form
        assert_eq!(
            parsed,
            serde_json::json!([
                { "level": 0.5, "live": true, "note": "ok" },
                { "level": null, "live": false, "note": null }
            ])
        );
    }
}
