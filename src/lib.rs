// Redline - PII detection and document redaction engine
// Copyright (c) 2025 Redline Contributors
// Licensed under the MIT License

//! # Redline - PII detection and document redaction
//!
//! Redline finds personally identifiable information in extracted document
//! text, maps each finding to rectangles on the document surface, and
//! produces redacted copies of the document.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Detecting** PII with a catalog of regex, keyword, checksum and entropy rules
//! - **Locating** each finding on a page or image, exactly or by fuzzy word-box windows
//! - **Mapping** rectangles drawn on stacked multi-page previews back to pages
//! - **Redacting** pages, rasters, text containers, cell grids and package media
//!
//! ## Architecture
//!
//! Redline follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`detection`] - Pattern catalog, scanner, engine, report and audit
//! - [`spatial`] - Text normalization, phrase location and preview mapping
//! - [`redaction`] - Applicators for every document kind
//! - [`adapters`] - Collaborator traits and the built-in JSON/text backends
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use redline::detection::config::DetectionConfig;
//! use redline::detection::DetectionEngine;
//!
//! # fn main() -> anyhow::Result<()> {
//! let engine = DetectionEngine::new(&DetectionConfig::default(), 6)?;
//!
//! for m in engine.scan("Contact: alice@example.com") {
//!     println!("{} at {}..{}", m.category, m.start, m.end);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Locating and redacting
//!
//! Backends implement [`adapters::traits::Surface`] and
//! [`adapters::traits::DocumentLoader`]. The engine places every match on
//! its surface and the paged applicator paints the regions over:
//!
//! ```rust,no_run
//! use redline::adapters::{LayoutDocument, LayoutLoader};
//! use redline::detection::{config::DetectionConfig, DetectionEngine};
//! use redline::redaction::{paged::redact_pages, Rgb};
//!
//! # fn example(bytes: &[u8]) -> anyhow::Result<()> {
//! let engine = DetectionEngine::new(&DetectionConfig::default(), 6)?;
//! let document = LayoutDocument::from_json(bytes)?;
//! let detection = engine.detect_surfaces(&document.surfaces(), &[]);
//!
//! let outcome = redact_pages(&LayoutLoader, bytes, &detection.regions(), Rgb::BLACK)?;
//! println!("{} regions filled, {} skipped", outcome.applied, outcome.skipped.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`domain::RedlineError`]. Failures on one
//! surface, region or media entry are isolated and reported next to the
//! result instead of aborting the job.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod detection;
pub mod domain;
pub mod logging;
pub mod redaction;
pub mod spatial;
