//! Scan command implementation
//!
//! This module implements the `scan` command, which runs the detector over
//! a plain-text file and prints the matches as JSON.

use super::{build_engine, load_or_report, EXIT_CONFIG};
use crate::detection::{DetectionReport, DocumentDetection, PageDetection};
use crate::domain::SurfaceId;
use anyhow::Context;
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Report rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
}

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// UTF-8 text file to scan
    pub file: PathBuf,

    /// Print a summary report after the matches
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub report: Option<ReportFormat>,

    /// Write the JSON report to this file
    #[arg(long, value_name = "PATH")]
    pub report_file: Option<PathBuf>,
}

impl ScanArgs {
    /// Execute the scan command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(file = %self.file.display(), "Starting scan command");

        let Some(config) = load_or_report(config_path) else {
            return Ok(EXIT_CONFIG);
        };
        let engine = Arc::new(build_engine(&config)?);

        let text = tokio::fs::read_to_string(&self.file)
            .await
            .with_context(|| format!("Failed to read {}", self.file.display()))?;

        let scanner = Arc::clone(&engine);
        let (matches, elapsed) = tokio::task::spawn_blocking(move || {
            let start = Instant::now();
            let matches = scanner.scan(&text);
            (matches, start.elapsed())
        })
        .await
        .context("Scan task failed")?;

        println!("{}", serde_json::to_string_pretty(&matches)?);

        let detection = DocumentDetection {
            pages: vec![PageDetection {
                surface: SurfaceId::Block(0),
                matches,
                regions: Vec::new(),
            }],
            ..Default::default()
        };

        let source = self.file.display().to_string();
        if let Some(request_id) = engine.audit(&source, &detection, elapsed)? {
            tracing::info!(request_id = %request_id, "Audit entry written");
        }

        if self.report.is_some() || self.report_file.is_some() {
            let mut report = DetectionReport::new();
            report.add_detection(&detection);

            match self.report {
                Some(ReportFormat::Console) => print!("{}", report.format_console()),
                Some(ReportFormat::Json) => println!("{}", report.format_json()?),
                None => {}
            }
            if let Some(path) = &self.report_file {
                report
                    .write_to_file(path)
                    .with_context(|| format!("Failed to write report to {}", path.display()))?;
            }
        }

        tracing::info!(
            matches = detection.match_count(),
            duration_ms = elapsed.as_millis() as u64,
            "Scan finished"
        );
        Ok(0)
    }
}
