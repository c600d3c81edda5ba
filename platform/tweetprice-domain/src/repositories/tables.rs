use crate::value_objects::raw_table::RawTable;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct TableQuery {
    pub path: PathBuf,
    /// Exchange kline dumps are usually written without a header row.
    pub has_headers: bool,
}

pub trait TableSource {
    fn load_table(&self, query: &TableQuery) -> Result<RawTable, String>;
}
