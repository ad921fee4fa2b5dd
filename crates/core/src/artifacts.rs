//! Loads the pre-trained classifier and vectorizer artifacts.
//!
//! Both artifacts are JSON files produced by an external training step. They
//! are loaded once at startup and held for the duration of the run; any load
//! or validation failure is fatal.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Schema version both artifact files must carry.
pub const ARTIFACT_SCHEMA: u32 = 1;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read artifact {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse artifact {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("artifact {path} has schema version {found}, expected {expected}")]
    Schema {
        path: String,
        found: u32,
        expected: u32,
    },
    #[error("artifact {path} is inconsistent: {reason}")]
    Invalid { path: String, reason: String },
}

/// Pre-fitted text-to-vector transformer with a fixed vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vectorizer {
    pub schema: u32,
    /// Term -> feature index.
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature index.
    pub idf: Vec<f64>,
}

impl Vectorizer {
    /// Transform a document into a TF-IDF feature vector over the fixed
    /// vocabulary. Terms not in the vocabulary are dropped.
    pub fn transform(&self, text: &str) -> Vec<f64> {
        let tokens = tokenize(text);
        let mut tf = vec![0.0; self.vocabulary.len()];
        for token in &tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                tf[idx] += 1.0;
            }
        }
        let doc_length = tokens.len() as f64;
        if doc_length > 0.0 {
            for count in &mut tf {
                *count /= doc_length;
            }
        }
        for (idx, count) in tf.iter_mut().enumerate() {
            *count *= self.idf[idx];
        }
        tf
    }

    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    fn validate(&self, path: &Path) -> Result<(), ArtifactError> {
        if self.schema != ARTIFACT_SCHEMA {
            return Err(ArtifactError::Schema {
                path: path.display().to_string(),
                found: self.schema,
                expected: ARTIFACT_SCHEMA,
            });
        }
        if self.idf.len() != self.vocabulary.len() {
            return Err(invalid(
                path,
                format!(
                    "idf has {} entries but vocabulary has {} terms",
                    self.idf.len(),
                    self.vocabulary.len()
                ),
            ));
        }
        for (term, &idx) in &self.vocabulary {
            if idx >= self.vocabulary.len() {
                return Err(invalid(
                    path,
                    format!("term '{}' maps to out-of-range index {}", term, idx),
                ));
            }
        }
        Ok(())
    }
}

/// Pre-trained linear classifier: one weight row and bias per class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classifier {
    pub schema: u32,
    pub classes: Vec<String>,
    pub weights: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
}

impl Classifier {
    /// Predict the class label for a feature vector (argmax of `w.x + b`).
    pub fn predict(&self, features: &[f64]) -> anyhow::Result<&str> {
        let expected = self.n_features();
        anyhow::ensure!(
            features.len() == expected,
            "feature vector has length {}, classifier expects {}",
            features.len(),
            expected
        );
        let mut best = 0usize;
        let mut best_score = f64::NEG_INFINITY;
        for (idx, (row, bias)) in self.weights.iter().zip(&self.bias).enumerate() {
            let score: f64 = row.iter().zip(features).map(|(w, x)| w * x).sum::<f64>() + bias;
            if score > best_score {
                best_score = score;
                best = idx;
            }
        }
        Ok(&self.classes[best])
    }

    pub fn n_features(&self) -> usize {
        self.weights.first().map(|row| row.len()).unwrap_or(0)
    }

    fn validate(&self, path: &Path) -> Result<(), ArtifactError> {
        if self.schema != ARTIFACT_SCHEMA {
            return Err(ArtifactError::Schema {
                path: path.display().to_string(),
                found: self.schema,
                expected: ARTIFACT_SCHEMA,
            });
        }
        if self.classes.is_empty() {
            return Err(invalid(path, "classifier has no classes".to_string()));
        }
        if self.weights.len() != self.classes.len() {
            return Err(invalid(
                path,
                format!(
                    "{} weight rows for {} classes",
                    self.weights.len(),
                    self.classes.len()
                ),
            ));
        }
        if self.bias.len() != self.classes.len() {
            return Err(invalid(
                path,
                format!(
                    "{} bias entries for {} classes",
                    self.bias.len(),
                    self.classes.len()
                ),
            ));
        }
        let width = self.n_features();
        if let Some(row) = self.weights.iter().find(|row| row.len() != width) {
            return Err(invalid(
                path,
                format!(
                    "weight rows have mixed widths ({} vs {})",
                    row.len(),
                    width
                ),
            ));
        }
        Ok(())
    }
}

/// The two artifacts a run needs, loaded together and cross-checked.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub classifier: Classifier,
    pub vectorizer: Vectorizer,
}

impl Artifacts {
    pub fn load(classifier_path: &Path, vectorizer_path: &Path) -> Result<Self, ArtifactError> {
        info!("loading classifier from {}", classifier_path.display());
        let classifier: Classifier = load_json(classifier_path)?;
        classifier.validate(classifier_path)?;

        info!("loading vectorizer from {}", vectorizer_path.display());
        let vectorizer: Vectorizer = load_json(vectorizer_path)?;
        vectorizer.validate(vectorizer_path)?;

        if classifier.n_features() != vectorizer.n_features() {
            return Err(invalid(
                classifier_path,
                format!(
                    "classifier expects {} features but vectorizer produces {}",
                    classifier.n_features(),
                    vectorizer.n_features()
                ),
            ));
        }
        Ok(Artifacts {
            classifier,
            vectorizer,
        })
    }
}

fn load_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, ArtifactError> {
    let content = std::fs::read_to_string(path).map_err(|source| ArtifactError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ArtifactError::Parse {
        path: path.display().to_string(),
        source,
    })
}

fn invalid(path: &Path, reason: String) -> ArtifactError {
    ArtifactError::Invalid {
        path: path.display().to_string(),
        reason,
    }
}

/// Lowercased alphanumeric tokens, matching how the artifacts were trained.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample_vectorizer() -> Vectorizer {
        let mut vocabulary = HashMap::new();
        vocabulary.insert("rust".to_string(), 0);
        vocabulary.insert("sales".to_string(), 1);
        Vectorizer {
            schema: ARTIFACT_SCHEMA,
            vocabulary,
            idf: vec![1.0, 1.0],
        }
    }

    fn sample_classifier() -> Classifier {
        Classifier {
            schema: ARTIFACT_SCHEMA,
            classes: vec!["Engineering".to_string(), "Sales".to_string()],
            weights: vec![vec![1.0, 0.0], vec![0.0, 1.0]],
            bias: vec![0.0, 0.0],
        }
    }

    #[test]
    fn transform_drops_unseen_terms() {
        let vectorizer = sample_vectorizer();
        let features = vectorizer.transform("Rust and embedded rust work");
        // "rust" appears twice out of five tokens; "sales" never.
        assert!((features[0] - 0.4).abs() < 1e-9);
        assert_eq!(features[1], 0.0);
    }

    #[test]
    fn predict_picks_highest_scoring_class() {
        let classifier = sample_classifier();
        assert_eq!(classifier.predict(&[0.8, 0.1]).unwrap(), "Engineering");
        assert_eq!(classifier.predict(&[0.1, 0.8]).unwrap(), "Sales");
    }

    #[test]
    fn predict_rejects_wrong_width() {
        let classifier = sample_classifier();
        assert!(classifier.predict(&[0.5]).is_err());
    }

    #[test]
    fn load_round_trips_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let classifier_path = dir.path().join("classifier.json");
        let vectorizer_path = dir.path().join("vectorizer.json");
        fs::write(
            &classifier_path,
            serde_json::to_string(&sample_classifier()).unwrap(),
        )
        .unwrap();
        fs::write(
            &vectorizer_path,
            serde_json::to_string(&sample_vectorizer()).unwrap(),
        )
        .unwrap();

        let artifacts = Artifacts::load(&classifier_path, &vectorizer_path).unwrap();
        assert_eq!(artifacts.classifier.classes.len(), 2);
        assert_eq!(artifacts.vectorizer.n_features(), 2);
    }

    #[test]
    fn load_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let vectorizer_path = dir.path().join("vectorizer.json");
        fs::write(
            &vectorizer_path,
            serde_json::to_string(&sample_vectorizer()).unwrap(),
        )
        .unwrap();
        let err = Artifacts::load(&dir.path().join("missing.json"), &vectorizer_path)
            .unwrap_err();
        assert!(matches!(err, ArtifactError::Read { .. }));
    }

    #[test]
    fn load_fails_on_corrupt_json() {
        let dir = tempfile::tempdir().unwrap();
        let classifier_path = dir.path().join("classifier.json");
        fs::write(&classifier_path, "not json").unwrap();
        let vectorizer_path = dir.path().join("vectorizer.json");
        fs::write(
            &vectorizer_path,
            serde_json::to_string(&sample_vectorizer()).unwrap(),
        )
        .unwrap();
        let err = Artifacts::load(&classifier_path, &vectorizer_path).unwrap_err();
        assert!(matches!(err, ArtifactError::Parse { .. }));
    }

    #[test]
    fn load_fails_on_schema_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let mut classifier = sample_classifier();
        classifier.schema = 99;
        let classifier_path = dir.path().join("classifier.json");
        fs::write(
            &classifier_path,
            serde_json::to_string(&classifier).unwrap(),
        )
        .unwrap();
        let vectorizer_path = dir.path().join("vectorizer.json");
        fs::write(
            &vectorizer_path,
            serde_json::to_string(&sample_vectorizer()).unwrap(),
        )
        .unwrap();
        let err = Artifacts::load(&classifier_path, &vectorizer_path).unwrap_err();
        assert!(matches!(err, ArtifactError::Schema { found: 99, .. }));
    }

    #[test]
    fn load_fails_on_feature_width_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let mut classifier = sample_classifier();
        classifier.weights = vec![vec![1.0], vec![0.0]];
        let classifier_path = dir.path().join("classifier.json");
        fs::write(
            &classifier_path,
            serde_json::to_string(&classifier).unwrap(),
        )
        .unwrap();
        let vectorizer_path = dir.path().join("vectorizer.json");
        fs::write(
            &vectorizer_path,
            serde_json::to_string(&sample_vectorizer()).unwrap(),
        )
        .unwrap();
        let err = Artifacts::load(&classifier_path, &vectorizer_path).unwrap_err();
        assert!(matches!(err, ArtifactError::Invalid { .. }));
    }
}
