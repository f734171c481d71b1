//! Cells command implementation
//!
//! Replaces listed cells and whole columns of a workbook, and optionally
//! masks detected PII inside the remaining cells.

use super::{build_engine, load_or_report, EXIT_CONFIG};
use crate::adapters::traits::CellGrid;
use crate::adapters::MemoryGrid;
use crate::detection::PhraseSet;
use crate::domain::CellRef;
use crate::redaction::grid::{mask_grid_phrases, redact_cells};
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the cells command
#[derive(Args, Debug)]
pub struct CellsArgs {
    /// Workbook as JSON (`{"sheets": [{"name": "...", "rows": [[...]]}]}`)
    pub file: PathBuf,

    /// Cell to replace on every sheet, e.g. B7 (repeatable)
    #[arg(long = "cell", value_name = "REF")]
    pub cells: Vec<String>,

    /// Column to replace on every sheet, by letter or 1-based index (repeatable)
    #[arg(long = "column", value_name = "COL")]
    pub columns: Vec<String>,

    /// Also mask detected PII inside the other cells
    #[arg(long)]
    pub scan: bool,

    /// Output file
    #[arg(short, long, value_name = "PATH")]
    pub output: PathBuf,
}

impl CellsArgs {
    /// Execute the cells command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(file = %self.file.display(), "Starting cells command");

        let Some(config) = load_or_report(config_path) else {
            return Ok(EXIT_CONFIG);
        };
        let engine = if self.scan {
            Some(build_engine(&config)?)
        } else {
            None
        };
        let replacement = config.redaction.cell_replacement.clone();
        let mask_char = config.redaction.mask_char;

        let bytes = tokio::fs::read(&self.file)
            .await
            .with_context(|| format!("Failed to read {}", self.file.display()))?;

        let cells = self.cells.clone();
        let columns = self.columns.clone();
        let (applied, skipped, output) = tokio::task::spawn_blocking(move || {
            let mut grid = MemoryGrid::from_json(&bytes)?;
            let outcome = redact_cells(&bytes, &mut grid, &cells, &columns, &replacement)?;
            let mut applied = outcome.applied;
            let skipped = outcome.skipped;
            let mut output = outcome.bytes;

            if let Some(engine) = engine {
                let matches: Vec<_> = grid_texts(&grid)
                    .iter()
                    .flat_map(|text| engine.scan(text))
                    .collect();
                let phrases = PhraseSet::from_matches(&matches);
                let masked = mask_grid_phrases(&output, &mut grid, &phrases, mask_char)?;
                applied += masked.applied;
                output = masked.bytes;
            }
            Ok::<_, crate::domain::RedlineError>((applied, skipped, output))
        })
        .await
        .context("Cells task failed")??;

        tokio::fs::write(&self.output, &output)
            .await
            .with_context(|| format!("Failed to write {}", self.output.display()))?;

        for s in &skipped {
            eprintln!("⚠️  Skipped {s}");
        }
        println!(
            "✅ {} cell(s) redacted, {} skipped → {}",
            applied,
            skipped.len(),
            self.output.display()
        );
        Ok(0)
    }
}

/// Text of every non-empty cell, sheet by sheet
fn grid_texts(grid: &MemoryGrid) -> Vec<String> {
    let mut texts = Vec::new();
    for sheet in 0..grid.sheet_count() {
        let Some((columns, rows)) = grid.dimensions(sheet) else {
            continue;
        };
        for row in 0..rows {
            for column in 0..columns {
                if let Some(text) = grid.cell_text(sheet, CellRef::new(column, row)) {
                    texts.push(text);
                }
            }
        }
    }
    texts
}
