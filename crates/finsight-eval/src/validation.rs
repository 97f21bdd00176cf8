//! Built-in validation query set.
//!
//! Ten disclosure-analysis questions covering the narrative, trend, and
//! risk surfaces of an annual filing corpus. Expected themes are hints
//! for reviewing results, not assertions.

/// One validation query with the themes a good answer should touch.
#[derive(Debug, Clone, Copy)]
pub struct ValidationSample {
    pub query: &'static str,
    pub expected_themes: &'static [&'static str],
}

pub const VALIDATION_SET: &[ValidationSample] = &[
    ValidationSample {
        query: "What are the key risks highlighted in the latest fiscal year?",
        expected_themes: &["cybersecurity", "regulation", "competition", "supply chain"],
    },
    ValidationSample {
        query: "What is the company's cloud strategy?",
        expected_themes: &["cloud", "infrastructure", "AI", "data center"],
    },
    ValidationSample {
        query: "How does the company describe its AI investments?",
        expected_themes: &["AI", "models", "investment", "platform"],
    },
    ValidationSample {
        query: "What are the main competition risks it faces?",
        expected_themes: &["competition", "market share", "pricing"],
    },
    ValidationSample {
        query: "How has revenue changed across the reported fiscal years?",
        expected_themes: &["revenue", "growth", "segments"],
    },
    ValidationSample {
        query: "What does the filing say about cybersecurity risks?",
        expected_themes: &["cybersecurity", "ransomware", "data breach"],
    },
    ValidationSample {
        query: "What is the strategy for generative AI products?",
        expected_themes: &["generative AI", "copilots", "integration"],
    },
    ValidationSample {
        query: "Which regulatory risks does the filing highlight?",
        expected_themes: &["regulation", "antitrust", "privacy", "compliance"],
    },
    ValidationSample {
        query: "How is the gaming business described?",
        expected_themes: &["gaming", "content", "subscriptions"],
    },
    ValidationSample {
        query: "What are the sustainability and ESG commitments?",
        expected_themes: &["carbon", "sustainability", "emissions", "renewable"],
    },
];
