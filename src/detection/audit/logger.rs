//! Audit logger for detection jobs

use crate::detection::models::PiiMatch;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry {
    request_id: String,
    timestamp: String,
    source: String,
    surfaces: usize,
    detections_count: usize,
    processing_time_ms: u64,
    by_category: BTreeMap<String, usize>,
    detections: Vec<AuditDetection>,
}

/// Audit detection entry (with hashed value)
#[derive(Debug, Serialize)]
struct AuditDetection {
    category: String,
    start: usize,
    end: usize,
    /// SHA-256 hash of the matched text (never log plaintext PII)
    value_hash: String,
}

/// Summary of one detection job
#[derive(Debug, Clone, Copy)]
pub struct AuditJob<'a> {
    /// File name or other label of the input
    pub source: &'a str,
    pub surfaces: usize,
    pub matches: &'a [PiiMatch],
    pub processing_time_ms: u64,
}

/// Appends one line per detection job
#[derive(Debug)]
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
}

impl AuditLogger {
    /// Create a new audit logger, creating the log directory if needed
    pub fn new(log_path: PathBuf, json_format: bool) -> Result<Self> {
        if let Some(parent) = log_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create audit log directory: {}", parent.display())
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
        })
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Records a job and returns its request id
    pub fn log_detection(&self, job: &AuditJob<'_>) -> Result<Uuid> {
        let request_id = Uuid::new_v4();

        let mut by_category = BTreeMap::new();
        for m in job.matches {
            *by_category.entry(m.category.as_str().to_string()).or_insert(0) += 1;
        }

        let entry = AuditLogEntry {
            request_id: request_id.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            source: job.source.to_string(),
            surfaces: job.surfaces,
            detections_count: job.matches.len(),
            processing_time_ms: job.processing_time_ms,
            by_category,
            detections: job
                .matches
                .iter()
                .map(|m| AuditDetection {
                    category: m.category.as_str().to_string(),
                    start: m.start,
                    end: m.end,
                    value_hash: hash_value(&m.text),
                })
                .collect(),
        };

        self.write_entry(&entry)?;
        Ok(request_id)
    }

    fn write_entry(&self, entry: &AuditLogEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open audit log: {}", self.log_path.display()))?;

        if self.json_format {
            let json_line =
                serde_json::to_string(entry).context("Failed to serialize audit entry")?;
            writeln!(file, "{json_line}").context("Failed to write audit entry")?;
        } else {
            let categories = entry
                .by_category
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join(",");
            writeln!(
                file,
                "[{}] Request: {} | Source: {} | Surfaces: {} | Detections: {} | Categories: {} | Time: {}ms",
                entry.timestamp,
                entry.request_id,
                entry.source,
                entry.surfaces,
                entry.detections_count,
                categories,
                entry.processing_time_ms
            )
            .context("Failed to write audit entry")?;
        }

        Ok(())
    }
}

/// Hash a matched value using SHA-256
pub fn hash_value(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::models::PiiCategory;
    use tempfile::tempdir;

    fn matches() -> Vec<PiiMatch> {
        vec![
            PiiMatch::new(PiiCategory::Email, "test@example.com", 0, 16),
            PiiMatch::new(PiiCategory::Email, "other@example.com", 20, 37),
        ]
    }

    #[test]
    fn test_hash_value() {
        assert_eq!(hash_value("test@example.com"), hash_value("test@example.com"));
        assert_ne!(hash_value("test@example.com"), hash_value("different@example.com"));
        assert_eq!(hash_value("").len(), 64);
    }

    #[test]
    fn test_json_entry_has_no_plaintext() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("nested").join("audit.log");
        let logger = AuditLogger::new(log_path.clone(), true).unwrap();

        let matches = matches();
        let id = logger
            .log_detection(&AuditJob {
                source: "letter.pdf",
                surfaces: 2,
                matches: &matches,
                processing_time_ms: 12,
            })
            .unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        let entry: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(entry["request_id"], id.to_string());
        assert_eq!(entry["by_category"]["email"], 2);
        assert_eq!(entry["detections"][0]["value_hash"], hash_value("test@example.com"));
        assert!(!content.contains("test@example.com"));
    }

    #[test]
    fn test_plain_entries_append() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.log");
        let logger = AuditLogger::new(log_path.clone(), false).unwrap();
        let matches = matches();
        let job = AuditJob {
            source: "a.txt",
            surfaces: 1,
            matches: &matches,
            processing_time_ms: 1,
        };
        logger.log_detection(&job).unwrap();
        logger.log_detection(&job).unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("Categories: email=2"));
    }
}
