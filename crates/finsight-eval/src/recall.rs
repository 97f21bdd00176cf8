//! Context recall: a pure numeric heuristic, no LLM cost.

/// Fraction of evidence scores at or above the threshold, rounded to 3
/// decimals. Zero evidence is defined as 0.0 recall, never an error.
pub fn context_recall(scores: &[f32], threshold: f32) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let recalled = scores.iter().filter(|&&s| s >= threshold).count();
    let fraction = recalled as f64 / scores.len() as f64;
    (fraction * 1000.0).round() / 1000.0
}
