use std::fs::File;
use std::path::Path;
use std::time::Instant;
use tweetprice_domain::repositories::tables::{TableQuery, TableSource};
use tweetprice_domain::value_objects::raw_table::RawTable;

#[derive(Debug, Default, Clone, Copy)]
pub struct CsvTableSource;

impl TableSource for CsvTableSource {
    fn load_table(&self, query: &TableQuery) -> Result<RawTable, String> {
        let start = Instant::now();
        let result = load_csv_table(&query.path, query.has_headers);
        let result_label = if result.is_ok() { "ok" } else { "err" };
        metrics::counter!("tweetprice.infra.tables.load.calls_total", "result" => result_label)
            .increment(1);
        metrics::histogram!("tweetprice.infra.tables.load_ms", "result" => result_label)
            .record(start.elapsed().as_millis() as f64);
        result
    }
}

/// Reads a delimited file into a raw table. Without a header row, columns are
/// named by position (`"0"`, `"1"`, ...) using the widest record.
pub fn load_csv_table(path: &Path, has_headers: bool) -> Result<RawTable, String> {
    let file = File::open(path)
        .map_err(|err| format!("failed to open CSV {}: {}", path.display(), err))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .from_reader(file);

    let mut headers: Vec<String> = if has_headers {
        reader
            .headers()
            .map_err(|err| format!("failed to read CSV headers {}: {}", path.display(), err))?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect()
    } else {
        Vec::new()
    };

    let mut rows = Vec::new();
    let mut width = headers.len();
    for result in reader.records() {
        let record =
            result.map_err(|err| format!("failed to parse CSV row in {}: {}", path.display(), err))?;
        width = width.max(record.len());
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    if !has_headers {
        headers = (0..width).map(|idx| idx.to_string()).collect();
    }

    tracing::debug!(
        path = %path.display(),
        rows = rows.len(),
        columns = headers.len(),
        "csv table loaded"
    );
    Ok(RawTable::new(headers, rows))
}
