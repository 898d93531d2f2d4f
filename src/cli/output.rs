//! Colored output helpers for the CLI.

use crate::rag::IngestReport;
use owo_colors::OwoColorize;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    pub fn new() -> Self {
        Self { colored: true }
    }

    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the Pitchside banner
    pub fn banner(&self) {
        if self.colored {
            println!(
                "\n{} {}\n",
                "⚽ Pitchside".bright_green().bold(),
                format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
            );
        } else {
            println!("\nPitchside v{}\n", env!("CARGO_PKG_VERSION"));
        }
    }

    pub fn status(&self, message: &str) {
        if self.colored {
            println!("{} {}", "•".bright_blue(), message);
        } else {
            println!("• {}", message);
        }
    }

    pub fn success(&self, message: &str) {
        if self.colored {
            println!("{} {}", "✓".bright_green().bold(), message);
        } else {
            println!("✓ {}", message);
        }
    }

    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("{} {}", "✗".bright_red().bold(), message);
        } else {
            eprintln!("✗ {}", message);
        }
    }

    /// Print the summary of an ingestion run.
    pub fn ingest_summary(&self, report: &IngestReport) {
        self.success(&format!(
            "Ingestion complete: {} sources ingested, {} skipped",
            report.sources_ingested, report.sources_skipped
        ));
        self.status(&format!(
            "{} chunks inserted, {} failed",
            report.chunks_inserted, report.chunks_failed
        ));
    }
}
