//! Mask command implementation
//!
//! Masks detected PII (and any literals) in a text file line by line.

use super::{build_engine, load_or_report, EXIT_CONFIG};
use crate::adapters::LineDocument;
use crate::detection::PhraseSet;
use crate::redaction::text::redact_text_container;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the mask command
#[derive(Args, Debug)]
pub struct MaskArgs {
    /// UTF-8 text file to mask
    pub file: PathBuf,

    /// Output file (default: print to stdout)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Extra phrase to mask wherever it occurs (repeatable)
    #[arg(long = "literal", value_name = "TEXT")]
    pub literals: Vec<String>,
}

impl MaskArgs {
    /// Execute the mask command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(file = %self.file.display(), "Starting mask command");

        let Some(config) = load_or_report(config_path) else {
            return Ok(EXIT_CONFIG);
        };
        let engine = build_engine(&config)?;
        let mask_char = config.redaction.mask_char;

        let bytes = tokio::fs::read(&self.file)
            .await
            .with_context(|| format!("Failed to read {}", self.file.display()))?;

        let literals = self.literals.clone();
        let outcome = tokio::task::spawn_blocking(move || {
            let mut document = LineDocument::from_bytes(&bytes)?;
            let matches = engine.scan(&document.text());
            let mut phrases = PhraseSet::from_matches(&matches);
            phrases.extend_literals(literals);
            redact_text_container(&bytes, &mut document, &phrases, mask_char)
        })
        .await
        .context("Mask task failed")??;

        match &self.output {
            Some(path) => {
                tokio::fs::write(path, &outcome.bytes)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!(
                    "✅ Masked {} occurrence(s) → {}",
                    outcome.applied,
                    path.display()
                );
            }
            None => print!("{}", String::from_utf8_lossy(&outcome.bytes)),
        }

        tracing::info!(applied = outcome.applied, "Mask finished");
        Ok(0)
    }
}
