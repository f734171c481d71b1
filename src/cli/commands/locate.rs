//! Locate command implementation
//!
//! Detects PII on every page of a layout document, places each match on its
//! page and optionally paints the regions over.

use super::{build_engine, load_or_report, EXIT_CONFIG};
use crate::adapters::{LayoutDocument, LayoutLoader};
use crate::redaction::paged::redact_pages;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Arguments for the locate command
#[derive(Args, Debug)]
pub struct LocateArgs {
    /// Layout document (JSON pages with word boxes)
    pub file: PathBuf,

    /// Extra phrase to locate on every page (repeatable)
    #[arg(long = "literal", value_name = "TEXT")]
    pub literals: Vec<String>,

    /// Write the blacked-out layout document here
    #[arg(long, value_name = "PATH")]
    pub redact_out: Option<PathBuf>,
}

impl LocateArgs {
    /// Execute the locate command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(file = %self.file.display(), "Starting locate command");

        let Some(config) = load_or_report(config_path) else {
            return Ok(EXIT_CONFIG);
        };
        let color = match config.redaction.blackout_rgb() {
            Ok(color) => color,
            Err(e) => {
                eprintln!("❌ Configuration error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };
        let engine = Arc::new(build_engine(&config)?);

        let bytes = tokio::fs::read(&self.file)
            .await
            .with_context(|| format!("Failed to read {}", self.file.display()))?;

        let literals = self.literals.clone();
        let redact = self.redact_out.is_some();
        let worker = Arc::clone(&engine);
        let (detection, outcome, elapsed) = tokio::task::spawn_blocking(move || {
            let start = Instant::now();
            let document = LayoutDocument::from_json(&bytes)?;
            let detection = worker.detect_surfaces(&document.surfaces(), &literals);
            let outcome = if redact {
                Some(redact_pages(&LayoutLoader, &bytes, &detection.regions(), color)?)
            } else {
                None
            };
            Ok::<_, crate::domain::RedlineError>((detection, outcome, start.elapsed()))
        })
        .await
        .context("Locate task failed")??;

        println!("{}", serde_json::to_string_pretty(&detection)?);

        for failure in &detection.failures {
            eprintln!("⚠️  {}: {}", failure.surface, failure.message);
        }
        for miss in &detection.soft_misses {
            tracing::debug!(surface = %miss.surface, "Phrase not placed");
        }

        if let (Some(path), Some(outcome)) = (&self.redact_out, outcome) {
            tokio::fs::write(path, &outcome.bytes)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "✅ {} region(s) filled, {} skipped → {}",
                outcome.applied,
                outcome.skipped.len(),
                path.display()
            );
            for skipped in &outcome.skipped {
                eprintln!("⚠️  Skipped {skipped}");
            }
        }

        let source = self.file.display().to_string();
        if let Some(request_id) = engine.audit(&source, &detection, elapsed)? {
            tracing::info!(request_id = %request_id, "Audit entry written");
        }

        Ok(0)
    }
}
