use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub artifacts: ArtifactPaths,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Where the pre-trained artifacts live. Overridable from the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactPaths {
    #[serde(default = "default_classifier")]
    pub classifier: String,
    #[serde(default = "default_vectorizer")]
    pub vectorizer: String,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            classifier: default_classifier(),
            vectorizer: default_vectorizer(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_report")]
    pub path: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            path: default_report(),
        }
    }
}

fn default_classifier() -> String {
    "models/classifier.json".to_string()
}

fn default_vectorizer() -> String {
    "models/vectorizer.json".to_string()
}

fn default_report() -> String {
    "categorized_resumes.csv".to_string()
}

pub fn load(path: Option<&str>) -> anyhow::Result<AppConfig> {
    let mut settings = config::Config::builder();
    if let Some(p) = path {
        settings = settings.add_source(config::File::with_name(p));
    } else {
        settings = settings.add_source(config::File::with_name("config/default").required(false));
    }
    let cfg = settings.build()?;
    Ok(cfg.try_deserialize()?)
}
