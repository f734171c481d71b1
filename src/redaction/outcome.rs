//! Result of a redaction pass

use serde::{Deserialize, Serialize};
use std::fmt;

/// A region, cell or media entry that could not be redacted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRegion {
    /// What was targeted ("page 3 (10,10)-(50,20)", "cell ZZ", "word/media/image1.png")
    pub target: String,
    pub reason: String,
}

impl SkippedRegion {
    /// Records the skip and logs it at warn level
    pub fn new(target: impl Into<String>, reason: impl Into<String>) -> Self {
        let skipped = Self {
            target: target.into(),
            reason: reason.into(),
        };
        crate::log_region_skipped!(skipped.target, skipped.reason);
        skipped
    }
}

impl fmt::Display for SkippedRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.target, self.reason)
    }
}

/// Output bytes plus what was and was not applied
#[derive(Debug, Clone, Default)]
pub struct RedactionOutcome {
    pub bytes: Vec<u8>,
    /// Number of regions, occurrences or cells applied
    pub applied: usize,
    pub skipped: Vec<SkippedRegion>,
}

impl RedactionOutcome {
    /// The input passed through untouched
    pub fn unchanged(original: &[u8], skipped: Vec<SkippedRegion>) -> Self {
        Self {
            bytes: original.to_vec(),
            applied: 0,
            skipped,
        }
    }

    pub fn changed(bytes: Vec<u8>, applied: usize, skipped: Vec<SkippedRegion>) -> Self {
        Self {
            bytes,
            applied,
            skipped,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        self.applied == 0
    }
}
