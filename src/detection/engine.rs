//! Detection engine
//!
//! The [`DetectionEngine`] ties the scanner, the spatial locator and the
//! audit logger together for whole documents.
//!
//! # Architecture
//!
//! For every surface the engine:
//! - extracts its text (a failure is isolated to that surface)
//! - scans it with the injected [`PiiDetector`]
//! - locates each distinct matched phrase, plus any caller literals
//!
//! Surfaces are processed in parallel with `rayon`. Results always come
//! back in surface order.
//!
//! # Examples
//!
//! ```
//! use redline::detection::{DetectionEngine, config::DetectionConfig};
//!
//! let engine = DetectionEngine::new(&DetectionConfig::default(), 6)?;
//! let matches = engine.scan("Contact: alice@example.com");
//! assert_eq!(matches[0].text, "alice@example.com");
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::adapters::traits::Surface;
use crate::detection::{
    audit::{logger::AuditJob, AuditLogger},
    config::{AuditConfig, DetectionConfig},
    detector::{patterns::PatternRegistry, scanner::ContextScanner, PiiDetector},
    models::{PhraseSet, PiiCategory, PiiMatch},
};
use crate::domain::{Region, SurfaceId};
use crate::spatial::{LocateTarget, SoftMiss, SpatialLocator};
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Matches and regions for one surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageDetection {
    pub surface: SurfaceId,
    pub matches: Vec<PiiMatch>,
    pub regions: Vec<Region>,
}

/// A surface whose text could not be extracted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceFailure {
    pub surface: SurfaceId,
    pub message: String,
}

/// Detection results for a whole document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentDetection {
    pub pages: Vec<PageDetection>,
    pub failures: Vec<SurfaceFailure>,
    pub soft_misses: Vec<SoftMiss>,
}

impl DocumentDetection {
    /// Every match, in surface order
    pub fn matches(&self) -> impl Iterator<Item = &PiiMatch> {
        self.pages.iter().flat_map(|p| p.matches.iter())
    }

    pub fn match_count(&self) -> usize {
        self.pages.iter().map(|p| p.matches.len()).sum()
    }

    /// Every region, in surface order
    pub fn regions(&self) -> Vec<Region> {
        self.pages
            .iter()
            .flat_map(|p| p.regions.iter().cloned())
            .collect()
    }

    /// Distinct phrases across the document, for text masking
    pub fn phrases(&self) -> PhraseSet {
        PhraseSet::from_matches(self.matches())
    }
}

enum SurfaceResult {
    Detected(PageDetection, Vec<SoftMiss>),
    Failed(SurfaceFailure),
}

/// Main detection engine
///
/// # Thread Safety
///
/// The engine is `Send + Sync` and can be shared across tasks using `Arc`.
/// The detector is held as `Arc<dyn PiiDetector>`.
pub struct DetectionEngine {
    detector: Arc<dyn PiiDetector>,
    locator: SpatialLocator,
    audit_logger: Option<AuditLogger>,
}

impl DetectionEngine {
    /// Create a new engine from detection settings
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the pattern
    /// library cannot be loaded or compiled.
    pub fn new(config: &DetectionConfig, window_slack: usize) -> Result<Self> {
        config
            .validate()
            .context("Invalid detection configuration")?;

        let registry = PatternRegistry::from_config(config)?;
        tracing::debug!(rules = registry.len(), "Pattern catalog compiled");

        Ok(Self::with_detector(
            Arc::new(ContextScanner::with_registry(Arc::new(registry))),
            SpatialLocator::new(window_slack),
        ))
    }

    /// Create an engine around an existing detector
    pub fn with_detector(detector: Arc<dyn PiiDetector>, locator: SpatialLocator) -> Self {
        Self {
            detector,
            locator,
            audit_logger: None,
        }
    }

    /// Enables audit logging when the configuration asks for it
    pub fn with_audit(mut self, config: &AuditConfig) -> Result<Self> {
        config.validate().context("Invalid audit configuration")?;
        self.audit_logger = if config.enabled {
            Some(AuditLogger::new(config.log_path.clone(), config.json_format)?)
        } else {
            None
        };
        Ok(self)
    }

    pub fn locator(&self) -> &SpatialLocator {
        &self.locator
    }

    pub fn categories(&self) -> BTreeSet<PiiCategory> {
        self.detector.categories()
    }

    pub fn is_audited(&self) -> bool {
        self.audit_logger.is_some()
    }

    /// Scans one text blob
    pub fn scan(&self, text: &str) -> Vec<PiiMatch> {
        self.detector.scan(text)
    }

    /// Places a match or literal on a surface
    pub fn locate<S>(&self, target: LocateTarget<'_>, surface: &S) -> Vec<Region>
    where
        S: Surface + ?Sized,
    {
        self.locator.locate(target, surface)
    }

    /// Detects and locates PII on every surface
    ///
    /// `literals` are extra phrases to locate on every surface. A surface
    /// that fails to extract text is listed in `failures`.
    pub fn detect_surfaces<S>(&self, surfaces: &[S], literals: &[String]) -> DocumentDetection
    where
        S: Surface,
    {
        let results: Vec<SurfaceResult> = surfaces
            .par_iter()
            .map(|surface| self.detect_surface(surface, literals))
            .collect();

        let mut detection = DocumentDetection::default();
        for result in results {
            match result {
                SurfaceResult::Detected(page, misses) => {
                    detection.pages.push(page);
                    detection.soft_misses.extend(misses);
                }
                SurfaceResult::Failed(failure) => detection.failures.push(failure),
            }
        }
        detection
    }

    fn detect_surface<S>(&self, surface: &S, literals: &[String]) -> SurfaceResult
    where
        S: Surface + ?Sized,
    {
        let start = Instant::now();
        let text = match surface.extract_text() {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(surface = %surface.id(), error = %e, "Text extraction failed");
                return SurfaceResult::Failed(SurfaceFailure {
                    surface: surface.id(),
                    message: e.to_string(),
                });
            }
        };

        let matches = self.detector.scan(&text);

        let mut regions = Vec::new();
        let mut misses = Vec::new();
        let mut seen: HashSet<(&str, PiiCategory)> = HashSet::new();
        for m in &matches {
            if seen.insert((m.text.as_str(), m.category)) {
                regions.extend(self.locator.locate_or_record(m.into(), surface, &mut misses));
            }
        }
        for literal in literals.iter().filter(|l| !l.trim().is_empty()) {
            regions.extend(self.locator.locate_or_record(
                literal.as_str().into(),
                surface,
                &mut misses,
            ));
        }

        crate::log_scan_complete!(surface.id(), matches.len(), text.len(), start.elapsed());

        SurfaceResult::Detected(
            PageDetection {
                surface: surface.id(),
                matches,
                regions,
            },
            misses,
        )
    }

    /// Writes an audit entry for a finished job, when auditing is enabled
    pub fn audit(
        &self,
        source: &str,
        detection: &DocumentDetection,
        elapsed: Duration,
    ) -> Result<Option<uuid::Uuid>> {
        let Some(logger) = &self.audit_logger else {
            return Ok(None);
        };
        let matches: Vec<PiiMatch> = detection.matches().cloned().collect();
        let id = logger.log_detection(&AuditJob {
            source,
            surfaces: detection.pages.len() + detection.failures.len(),
            matches: &matches,
            processing_time_ms: elapsed.as_millis() as u64,
        })?;
        Ok(Some(id))
    }
}
