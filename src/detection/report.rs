//! Detection reporting
//!
//! This module provides formatted reports for detection jobs, showing match
//! statistics, masked samples, soft misses and skipped regions.

use crate::detection::engine::DocumentDetection;
use crate::detection::models::{PiiCategory, PiiMatch};
use crate::redaction::outcome::SkippedRegion;
use crate::redaction::text::{mask_phrase, mask_style};
use crate::spatial::SoftMiss;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Samples kept per report
const MAX_SAMPLES: usize = 20;
/// Samples taken from any one surface
const SAMPLES_PER_SURFACE: usize = 3;
/// Masked samples longer than this are truncated
const SAMPLE_CHARS: usize = 40;

/// Report over one or more documents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionReport {
    /// Total surfaces analyzed (including failed ones)
    pub total_surfaces: usize,

    /// Total matches
    pub total_matches: usize,

    /// Total regions located
    pub total_regions: usize,

    /// Matches by category
    pub matches_by_category: BTreeMap<PiiCategory, usize>,

    /// Masked examples of what was found
    pub samples: Vec<DetectionSample>,

    /// Phrases that could not be placed
    pub soft_misses: Vec<SoftMiss>,

    /// Regions that could not be applied
    pub skipped: Vec<SkippedRegion>,

    /// Surfaces whose text could not be extracted
    pub failures: Vec<String>,

    pub warnings: Vec<String>,
}

/// One masked example
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionSample {
    pub category: PiiCategory,
    pub surface: String,
    /// Masked, and truncated to a fixed length
    pub masked: String,
    pub start: usize,
    pub end: usize,
}

fn masked_sample(m: &PiiMatch) -> String {
    let masked = mask_phrase(&m.text, mask_style(Some(m.category)), '*');
    if masked.chars().count() > SAMPLE_CHARS {
        let head: String = masked.chars().take(SAMPLE_CHARS - 3).collect();
        format!("{head}...")
    } else {
        masked
    }
}

impl DetectionReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the results of one document
    pub fn add_detection(&mut self, detection: &DocumentDetection) {
        self.total_surfaces += detection.pages.len() + detection.failures.len();

        for page in &detection.pages {
            self.total_matches += page.matches.len();
            self.total_regions += page.regions.len();

            for m in &page.matches {
                *self.matches_by_category.entry(m.category).or_insert(0) += 1;
            }

            for m in page.matches.iter().take(SAMPLES_PER_SURFACE) {
                if self.samples.len() >= MAX_SAMPLES {
                    break;
                }
                self.samples.push(DetectionSample {
                    category: m.category,
                    surface: page.surface.to_string(),
                    masked: masked_sample(m),
                    start: m.start,
                    end: m.end,
                });
            }
        }

        self.soft_misses
            .extend(detection.soft_misses.iter().map(|miss| SoftMiss {
                phrase: mask_phrase(&miss.phrase, mask_style(miss.category), '*'),
                ..miss.clone()
            }));
        self.failures.extend(
            detection
                .failures
                .iter()
                .map(|f| format!("{}: {}", f.surface, f.message)),
        );
    }

    /// Adds regions skipped by a redaction pass
    pub fn add_skipped(&mut self, skipped: &[SkippedRegion]) {
        self.skipped.extend_from_slice(skipped);
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str("                    PII DETECTION REPORT                       \n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output.push_str("📊 SUMMARY\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!("  Surfaces Analyzed:    {}\n", self.total_surfaces));
        output.push_str(&format!("  Matches Detected:     {}\n", self.total_matches));
        output.push_str(&format!("  Regions Located:      {}\n", self.total_regions));
        output.push_str(&format!("  Unplaced Phrases:     {}\n", self.soft_misses.len()));
        output.push_str(&format!("  Skipped Regions:      {}\n", self.skipped.len()));
        output.push('\n');

        if !self.matches_by_category.is_empty() {
            output.push_str("🔍 MATCHES BY CATEGORY\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");

            let mut categories: Vec<_> = self.matches_by_category.iter().collect();
            categories.sort_by(|a, b| b.1.cmp(a.1));

            for (category, count) in categories {
                output.push_str(&format!("  {:30} {:>5}\n", category.label(), count));
            }
            output.push('\n');
        }

        if !self.samples.is_empty() {
            output.push_str("📝 SAMPLES\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for sample in self.samples.iter().take(10) {
                output.push_str(&format!(
                    "  {:16} {:10} [{}..{}] \"{}\"\n",
                    sample.category.label(),
                    sample.surface,
                    sample.start,
                    sample.end,
                    sample.masked
                ));
            }
            output.push('\n');
        }

        if !self.failures.is_empty() || !self.skipped.is_empty() || !self.warnings.is_empty() {
            output.push_str("⚠️  WARNINGS\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for failure in &self.failures {
                output.push_str(&format!("  • Extraction failed on {failure}\n"));
            }
            for skipped in &self.skipped {
                output.push_str(&format!("  • Skipped {skipped}\n"));
            }
            for warning in &self.warnings {
                output.push_str(&format!("  • {warning}\n"));
            }
            output.push('\n');
        }

        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output
    }

    /// Format report as JSON
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write report to file
    pub fn write_to_file(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = self.format_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}
