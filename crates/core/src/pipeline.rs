//! Run driver: snapshots the input directory once and processes each resume
//! in turn, isolating per-file failures from the run.

use crate::artifacts::Artifacts;
use crate::classify;
use crate::extractor::{extract_or_empty, TextExtractor};
use crate::models::CategorizationRecord;
use crate::organizer;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

const PREVIEW_CHARS: usize = 500;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Classify and report what would happen without moving any files.
    pub dry_run: bool,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub discovered: usize,
    pub categorized: usize,
    pub skipped_empty: usize,
    pub failed: usize,
    pub records: Vec<CategorizationRecord>,
}

/// Outcome of processing one candidate file.
enum FileOutcome {
    Categorized(CategorizationRecord),
    NoText,
    Failed(anyhow::Error),
}

pub fn run(
    dir: &Path,
    artifacts: &Artifacts,
    extractor: &dyn TextExtractor,
    options: &RunOptions,
) -> anyhow::Result<RunSummary> {
    let candidates = snapshot_pdfs(dir)?;
    info!(
        "found {} candidate resume(s) in {}",
        candidates.len(),
        dir.display()
    );

    let mut summary = RunSummary {
        discovered: candidates.len(),
        ..Default::default()
    };
    for path in &candidates {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!("processing {}", file_name);
        match process_file(dir, path, artifacts, extractor, options) {
            FileOutcome::Categorized(record) => {
                info!("{} categorized as {}", file_name, record.category);
                summary.categorized += 1;
                summary.records.push(record);
            }
            FileOutcome::NoText => {
                warn!("no text found in {}", file_name);
                summary.skipped_empty += 1;
            }
            FileOutcome::Failed(err) => {
                error!("error processing {}: {:#}", file_name, err);
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}

/// List PDF files directly inside the directory, once, sorted by file name.
/// Files that show up mid-run are not seen; files already moved into category
/// subfolders are below the depth cutoff and never re-processed.
fn snapshot_pdfs(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    anyhow::ensure!(
        dir.is_dir(),
        "{} is not a readable directory",
        dir.display()
    );
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_pdf(p))
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

fn process_file(
    dir: &Path,
    path: &Path,
    artifacts: &Artifacts,
    extractor: &dyn TextExtractor,
    options: &RunOptions,
) -> FileOutcome {
    let text = extract_or_empty(extractor, path);
    if text.trim().is_empty() {
        return FileOutcome::NoText;
    }
    debug!(
        "extracted text (first {} chars): {}",
        PREVIEW_CHARS,
        text.chars().take(PREVIEW_CHARS).collect::<String>()
    );

    let category = match classify::classify(&text, artifacts) {
        Ok(category) => category,
        Err(err) => return FileOutcome::Failed(err.context("classification failed")),
    };

    if options.dry_run {
        debug!("dry run, leaving {} in place", path.display());
    } else if let Err(err) = organizer::file_into_category(dir, path, &category) {
        return FileOutcome::Failed(err.context("move failed"));
    }

    let filename = match path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .context("candidate path has no file name")
    {
        Ok(name) => name,
        Err(err) => return FileOutcome::Failed(err),
    };
    FileOutcome::Categorized(CategorizationRecord {
        filename,
        category,
    })
}
