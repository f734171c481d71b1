//! PII detection
//!
//! This module finds sensitive values in extracted text and places them on
//! document surfaces.
//!
//! # Architecture
//!
//! - **Pattern catalog** ([`detector::patterns`]): rules loaded from TOML
//! - **Scanner** ([`detector::scanner`]): regex, line-keyword and entropy rules
//!   gated by checksums ([`checksum`]) and context keywords
//! - **Engine** ([`engine`]): per-surface detection and location in parallel
//! - **Report** ([`report`]) and **audit** ([`audit`]): what was found, with
//!   matched values masked or hashed

pub mod audit;
pub mod checksum;
pub mod config;
pub mod detector;
pub mod engine;
pub mod models;
pub mod report;

pub use engine::{DetectionEngine, DocumentDetection, PageDetection, SurfaceFailure};
pub use models::{Phrase, PhraseSet, PiiCategory, PiiMatch};
pub use report::DetectionReport;
