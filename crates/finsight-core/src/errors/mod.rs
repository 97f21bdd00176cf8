//! Unified error taxonomy for the workspace.
//!
//! Each subsystem defines its own `thiserror` enum; `FinsightError` wraps
//! them for propagation across crate boundaries. Stage code catches its
//! own external-call failures and translates them into `QueryState`
//! status fields — a raw error must never escape a pipeline stage.

mod config_error;
mod index_error;
mod remote_error;
mod trend_error;

pub use config_error::ConfigError;
pub use index_error::IndexError;
pub use remote_error::RemoteError;
pub use trend_error::TrendError;

/// Top-level error type wrapping all subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum FinsightError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Trend(#[from] TrendError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Convenience alias used throughout the workspace.
pub type FinsightResult<T> = Result<T, FinsightError>;

impl FinsightError {
    /// Whether this error indicates a fatal misconfiguration that should
    /// abort startup rather than be handled per-request.
    pub fn is_fatal(&self) -> bool {
        matches!(self, FinsightError::Config(_))
    }
}
