//! # finsight-llm
//!
//! `ILanguageModel` provider over an Ollama-compatible `/api/chat`
//! endpoint. Non-streaming, one attempt per call; failures surface as
//! `RemoteError` for the calling stage to absorb.

mod chat;

pub use chat::ChatModel;
