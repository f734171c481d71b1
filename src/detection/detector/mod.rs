//! PII detection module
//!
//! Provides the trait-based detection interface and the context-aware
//! scanner that evaluates the pattern catalog against extracted text.

pub mod context;
pub mod entropy;
pub mod patterns;
pub mod scanner;

use crate::detection::models::{PiiCategory, PiiMatch};
use std::collections::BTreeSet;

/// Trait for PII detection implementations
pub trait PiiDetector: Send + Sync {
    /// Finds validated matches in `text`, in catalog order then left to right
    fn scan(&self, text: &str) -> Vec<PiiMatch>;

    /// Categories this detector can emit
    fn categories(&self) -> BTreeSet<PiiCategory>;
}
