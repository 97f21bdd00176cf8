use crate::errors::FinsightResult;

/// Sampling and length bounds for one generation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

/// Generated text plus the provider's token-usage counters.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
}

/// Hosted language model capability.
///
/// One attempt per call; callers catch failures at their own stage
/// boundary. The remote service's timeout bounds the call.
pub trait ILanguageModel: Send + Sync {
    fn generate(
        &self,
        system: &str,
        user: &str,
        options: &GenerationOptions,
    ) -> FinsightResult<Completion>;

    /// Model identifier, for logging.
    fn name(&self) -> &str;
}
