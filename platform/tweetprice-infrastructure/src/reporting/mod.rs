use std::fs;
use std::path::Path;
use tweetprice_domain::value_objects::joined::JoinedTable;

/// Writes the joined table as CSV; the header row is the column labels.
pub fn write_joined_csv(path: &Path, table: &JoinedTable) -> Result<(), String> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|err| format!("failed to create joined csv {}: {}", path.display(), err))?;
    writer
        .write_record(table.headers())
        .map_err(|err| format!("failed to write joined csv header: {err}"))?;
    for record in table.records() {
        writer
            .write_record(&record)
            .map_err(|err| format!("failed to write joined csv row: {err}"))?;
    }
    writer
        .flush()
        .map_err(|err| format!("failed to flush joined csv {}: {}", path.display(), err))
}

/// Renders every row as an object keyed by column label. Post cells stay
/// strings, price cells are numbers and missing prices are `null`.
pub fn joined_rows_json(table: &JoinedTable) -> serde_json::Value {
    let rows = table
        .rows
        .iter()
        .map(|row| {
            let mut object = serde_json::Map::new();
            for (header, cell) in table.post_headers.iter().zip(row.post.cells()) {
                object.insert(header.clone(), serde_json::Value::from(cell));
            }
            for (header, value) in table.price_headers.iter().zip(row.price_values()) {
                let value = value
                    .and_then(serde_json::Number::from_f64)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null);
                object.insert(header.clone(), value);
            }
            serde_json::Value::Object(object)
        })
        .collect();
    serde_json::Value::Array(rows)
}

pub fn write_joined_json(path: &Path, table: &JoinedTable) -> Result<(), String> {
    let json = serde_json::to_string_pretty(&joined_rows_json(table))
        .map_err(|err| format!("failed to serialize joined json: {err}"))?;
    fs::write(path, json)
        .map_err(|err| format!("failed to write joined json {}: {}", path.display(), err))
}

pub fn write_summary_json(path: &Path, summary: &serde_json::Value) -> Result<(), String> {
    let json = serde_json::to_string_pretty(summary)
        .map_err(|err| format!("failed to serialize summary: {err}"))?;
    fs::write(path, json)
        .map_err(|err| format!("failed to write summary {}: {}", path.display(), err))
}
