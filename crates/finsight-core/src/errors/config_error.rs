/// Configuration errors. Fatal: abort startup, never caught per-request.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("embedding dimension mismatch: index expects {expected}, provider produces {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid configuration: {reason}")]
    Invalid { reason: String },

    #[error("failed to read config file {path}: {reason}")]
    Unreadable { path: String, reason: String },
}
