use serde::{Deserialize, Serialize};

/// Outcome of scoring one tab-switch event.
///
/// `reasons` is append-only in rule-evaluation order and never empty; a
/// neutral entry is inserted when no rule fired. `suspicion_score` is
/// already clamped to the configured cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuspicionResult {
    pub document_id: String,
    pub username: String,
    pub problem_id: String,
    pub platform: String,
    /// ISO-8601, or `"N/A"` when the record carried no usable timestamp.
    pub timestamp: String,
    pub suspicion_score: u32,
    pub reasons: Vec<String>,
    pub details: NavigationDetails,
}

/// Raw echo of the navigation fields, kept unmodified for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationDetails {
    pub from: PageSnapshot,
    pub to: PageSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub url: String,
    pub title: String,
}
