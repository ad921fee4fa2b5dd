//! Turns extracted resume text into a category label.

use crate::artifacts::Artifacts;

/// Vectorize a single document and predict its category. The caller filters
/// out empty text before this point; classifying it anyway is an error.
pub fn classify(text: &str, artifacts: &Artifacts) -> anyhow::Result<String> {
    let trimmed = text.trim();
    anyhow::ensure!(!trimmed.is_empty(), "cannot classify empty text");
    let features = artifacts.vectorizer.transform(trimmed);
    let label = artifacts.classifier.predict(&features)?;
    Ok(label.to_string())
}
