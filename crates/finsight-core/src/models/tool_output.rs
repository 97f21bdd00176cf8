//! The dispatcher's common result envelope.
//!
//! One closed enum tagged by `status`; each variant carries only the
//! fields valid for that status. The synthesizer serializes the whole
//! envelope into its prompt, so everything here is part of the contract
//! with the language model — including the optional fallback `note`.

use serde::{Deserialize, Serialize};

use super::passage::Passage;
use super::trend::TrendResult;

/// Engine output wrapped for the synthesizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolOutput {
    /// The invoked engine produced a usable result.
    Ok {
        #[serde(flatten)]
        payload: ToolPayload,
        /// In-band note for the synthesizer to surface politely, set
        /// when the query was redirected off a disabled tool.
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },
    /// Search ran but matched nothing.
    Empty {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },
    /// No columns matched the requested metric.
    NoData {
        message: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        available_columns: Vec<String>,
    },
    /// Columns matched but nothing numeric could be parsed from them.
    NoNumericData {
        message: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        matching_columns: Vec<String>,
    },
    /// The engine invocation failed.
    Error { message: String },
}

/// Per-engine payload inside a successful envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolPayload {
    Retrieval {
        chunk_count: usize,
        chunks: Vec<Passage>,
    },
    Trend(TrendResult),
    Chart {
        metric: String,
        years_plotted: Vec<u16>,
        image_path: Option<String>,
    },
}

impl ToolOutput {
    pub fn ok(payload: ToolPayload) -> Self {
        ToolOutput::Ok {
            payload,
            note: None,
        }
    }

    pub fn empty(message: impl Into<String>) -> Self {
        ToolOutput::Empty {
            message: message.into(),
            note: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ToolOutput::Error {
            message: message.into(),
        }
    }

    /// Attach a fallback note where the variant supports one.
    ///
    /// `NoData`/`NoNumericData`/`Error` never carry a note: they are
    /// already self-describing diagnostics.
    pub fn with_note(self, note: impl Into<String>) -> Self {
        match self {
            ToolOutput::Ok { payload, .. } => ToolOutput::Ok {
                payload,
                note: Some(note.into()),
            },
            ToolOutput::Empty { message, .. } => ToolOutput::Empty {
                message,
                note: Some(note.into()),
            },
            other => other,
        }
    }

    /// The attached fallback note, if any.
    pub fn note(&self) -> Option<&str> {
        match self {
            ToolOutput::Ok { note, .. } | ToolOutput::Empty { note, .. } => note.as_deref(),
            _ => None,
        }
    }

    /// Stable status label, mirroring the serialized `status` tag.
    pub fn status(&self) -> &'static str {
        match self {
            ToolOutput::Ok { .. } => "ok",
            ToolOutput::Empty { .. } => "empty",
            ToolOutput::NoData { .. } => "no_data",
            ToolOutput::NoNumericData { .. } => "no_numeric_data",
            ToolOutput::Error { .. } => "error",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ToolOutput::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::passage::{Passage, PassageMetadata};
    use std::collections::BTreeMap;

    fn retrieval_output() -> ToolOutput {
        ToolOutput::ok(ToolPayload::Retrieval {
            chunk_count: 1,
            chunks: vec![Passage {
                id: "a".into(),
                score: 0.8,
                text: "body".into(),
                metadata: PassageMetadata::default(),
            }],
        })
    }

    #[test]
    fn status_tag_is_snake_case() {
        let value = serde_json::to_value(retrieval_output()).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["chunk_count"], 1);

        let value = serde_json::to_value(ToolOutput::NoNumericData {
            message: "nothing parsed".into(),
            matching_columns: vec!["Total Revenue".into()],
        })
        .unwrap();
        assert_eq!(value["status"], "no_numeric_data");
    }

    #[test]
    fn note_survives_serialization_verbatim() {
        let note = "Structured trend analysis is currently disabled. \
                    Searching the report text instead.";
        let output = retrieval_output().with_note(note);
        let json = serde_json::to_string(&output).unwrap();
        assert!(json.contains(note));

        let parsed: ToolOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.note(), Some(note));
    }

    #[test]
    fn note_absent_is_omitted_from_json() {
        let json = serde_json::to_string(&retrieval_output()).unwrap();
        assert!(!json.contains("note"));
    }

    #[test]
    fn trend_payload_round_trips() {
        let trend = TrendResult::from_values(
            "Revenue",
            BTreeMap::from([(2023u16, 100.0), (2024u16, 150.0)]),
            vec!["Total Revenue".into()],
        );
        let output = ToolOutput::ok(ToolPayload::Trend(trend.clone()));
        let json = serde_json::to_string(&output).unwrap();
        let parsed: ToolOutput = serde_json::from_str(&json).unwrap();
        match parsed {
            ToolOutput::Ok {
                payload: ToolPayload::Trend(t),
                ..
            } => assert_eq!(t, trend),
            other => panic!("expected trend payload, got {other:?}"),
        }
    }

    #[test]
    fn error_variant_refuses_note() {
        let output = ToolOutput::error("boom").with_note("ignored");
        assert_eq!(output.note(), None);
        assert!(output.is_error());
    }
}
