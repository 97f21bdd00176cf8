/// Remote capability errors (embedding, LLM). Caught at the stage
/// boundary and converted into the shared state's error field.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("{service} request failed: {reason}")]
    Http { service: String, reason: String },

    #[error("{service} returned an unusable response: {reason}")]
    BadResponse { service: String, reason: String },
}

impl RemoteError {
    /// Transport-level failure for the named service.
    pub fn http(service: &str, reason: impl std::fmt::Display) -> Self {
        RemoteError::Http {
            service: service.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Well-formed HTTP exchange, unusable body.
    pub fn bad_response(service: &str, reason: impl std::fmt::Display) -> Self {
        RemoteError::BadResponse {
            service: service.to_string(),
            reason: reason.to_string(),
        }
    }
}
