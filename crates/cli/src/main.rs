use anyhow::Result;
use clap::Parser;
use sorter_core::artifacts::Artifacts;
use sorter_core::config;
use sorter_core::extractor::PdfExtractor;
use sorter_core::pipeline::{self, RunOptions};
use sorter_core::report;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-sorter")]
#[command(
    about = "Sorts resume PDFs into category folders using a pre-trained classifier",
    long_about = None
)]
struct Cli {
    /// Directory containing resume PDFs (non-recursive)
    directory: PathBuf,

    /// Path to config TOML
    #[arg(short, long)]
    config: Option<String>,

    /// Override the classifier artifact path
    #[arg(long)]
    classifier: Option<PathBuf>,

    /// Override the vectorizer artifact path
    #[arg(long)]
    vectorizer: Option<PathBuf>,

    /// Override the CSV report path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Classify without moving files or writing the report
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Output JSON summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref())?;

    let classifier_path = cli
        .classifier
        .unwrap_or_else(|| PathBuf::from(&cfg.artifacts.classifier));
    let vectorizer_path = cli
        .vectorizer
        .unwrap_or_else(|| PathBuf::from(&cfg.artifacts.vectorizer));
    let report_path = cli
        .report
        .unwrap_or_else(|| PathBuf::from(&cfg.report.path));

    let artifacts = Artifacts::load(&classifier_path, &vectorizer_path)?;
    if cli.dry_run {
        tracing::info!("dry run: no files will be moved and no report written");
    }
    let options = RunOptions {
        dry_run: cli.dry_run,
    };
    let summary = pipeline::run(&cli.directory, &artifacts, &PdfExtractor, &options)?;

    let report_written = !summary.records.is_empty() && !cli.dry_run;
    if report_written {
        report::write_report(&report_path, &summary.records)?;
    }

    if cli.json {
        let out = serde_json::json!({
            "status": "ok",
            "directory": cli.directory,
            "discovered": summary.discovered,
            "categorized": summary.categorized,
            "skipped_empty": summary.skipped_empty,
            "failed": summary.failed,
            "dry_run": cli.dry_run,
            "report": report_written.then_some(&report_path),
            "records": summary.records,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if summary.records.is_empty() {
        println!(
            "Already categorized or no resumes found in {}",
            cli.directory.display()
        );
    } else {
        println!(
            "categorized {} of {} resume(s), skipped {} without text, {} failed",
            summary.categorized, summary.discovered, summary.skipped_empty, summary.failed
        );
        if cli.dry_run {
            for record in &summary.records {
                println!("would move {} -> {}", record.filename, record.category);
            }
        } else {
            println!("report saved to {}", report_path.display());
        }
    }
    Ok(())
}
