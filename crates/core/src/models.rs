use serde::{Deserialize, Serialize};

/// One successfully categorized resume: a row in the CSV report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorizationRecord {
    pub filename: String,
    pub category: String,
}
