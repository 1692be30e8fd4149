//! Result of a single AI analysis round trip.

/// Text returned by the AI endpoint for one log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    /// Generated analysis, verbatim.
    pub text: String,

    /// Model that produced the text.
    pub model: String,

    /// Wall-clock duration of the request in milliseconds.
    pub duration_ms: u64,
}

impl AnalysisResult {
    pub fn new(text: impl Into<String>, model: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            text: text.into(),
            model: model.into(),
            duration_ms,
        }
    }
}
