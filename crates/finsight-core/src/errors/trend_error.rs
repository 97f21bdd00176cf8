/// Trend engine errors. "No matching columns" and "no numeric data" are
/// statuses, not errors — only genuine load failures land here.
#[derive(Debug, thiserror::Error)]
pub enum TrendError {
    #[error("no CSV extracts found in {dir}; run ingestion first")]
    NoTables { dir: String },

    #[error("all CSV extracts in {dir} failed to load")]
    AllTablesUnreadable { dir: String },
}
