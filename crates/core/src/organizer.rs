//! Moves categorized resumes into per-category folders.

use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const RESERVED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Make a predicted label safe to use as a directory name. Reserved and
/// control characters become underscores; a label with nothing else left is
/// rejected rather than silently producing a broken path.
pub fn sanitize_label(label: &str) -> anyhow::Result<String> {
    let cleaned: String = label
        .chars()
        .map(|c| {
            if RESERVED.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    let cleaned = cleaned
        .trim_matches(|c: char| c.is_whitespace() || c == '.')
        .to_string();
    anyhow::ensure!(
        !cleaned.is_empty() && !cleaned.chars().all(|c| c == '_'),
        "category label '{}' does not yield a usable directory name",
        label
    );
    Ok(cleaned)
}

/// Move a file into `dir/<label>/`, creating the category folder if needed.
/// Filename is preserved; an existing destination is a collision error, not
/// an overwrite.
pub fn file_into_category(dir: &Path, file_path: &Path, label: &str) -> anyhow::Result<PathBuf> {
    let folder = dir.join(sanitize_label(label)?);
    fs::create_dir_all(&folder)
        .with_context(|| format!("creating category folder {}", folder.display()))?;
    let file_name = file_path
        .file_name()
        .with_context(|| format!("source path {} has no file name", file_path.display()))?;
    let dest = folder.join(file_name);
    anyhow::ensure!(
        !dest.exists(),
        "destination {} already exists",
        dest.display()
    );
    fs::rename(file_path, &dest).with_context(|| {
        format!(
            "moving {} to {}",
            file_path.display(),
            dest.display()
        )
    })?;
    debug!("moved {} to {}", file_path.display(), dest.display());
    Ok(dest)
}
