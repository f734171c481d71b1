//! Integration tests for detection audit logging and reports

use redline::adapters::{LayoutDocument, LayoutPage};
use redline::detection::audit::hash_value;
use redline::detection::config::{AuditConfig, DetectionConfig};
use redline::detection::{DetectionEngine, DetectionReport};
use redline::domain::WordBox;
use std::time::Duration;
use tempfile::tempdir;

fn document() -> LayoutDocument {
    LayoutDocument::new(vec![
        LayoutPage::new(
            612.0,
            792.0,
            vec![
                WordBox::new("Contact:", 72.0, 100.0, 48.0, 12.0),
                WordBox::new("alice@example.com", 124.0, 100.0, 102.0, 12.0),
            ],
        ),
        LayoutPage::new(
            612.0,
            792.0,
            vec![
                WordBox::new("SSN", 72.0, 100.0, 18.0, 12.0),
                WordBox::new("123-45-6789", 94.0, 100.0, 66.0, 12.0),
            ],
        ),
    ])
}

fn audited_engine(config: &AuditConfig) -> DetectionEngine {
    DetectionEngine::new(&DetectionConfig::default(), 6)
        .unwrap()
        .with_audit(config)
        .unwrap()
}

#[test]
fn test_audit_entry_hashes_values() {
    let dir = tempdir().unwrap();
    let config = AuditConfig {
        enabled: true,
        log_path: dir.path().join("nested/detections.log"),
        json_format: true,
    };
    let engine = audited_engine(&config);
    assert!(engine.is_audited());

    let doc = document();
    let detection = engine.detect_surfaces(&doc.surfaces(), &[]);
    let request_id = engine
        .audit("contract.pdf", &detection, Duration::from_millis(12))
        .unwrap()
        .unwrap();

    let content = std::fs::read_to_string(&config.log_path).unwrap();
    assert!(!content.contains("alice@example.com"));
    assert!(!content.contains("123-45-6789"));

    let entry: serde_json::Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();
    assert_eq!(entry["request_id"], request_id.to_string());
    assert_eq!(entry["source"], "contract.pdf");
    assert_eq!(entry["surfaces"], 2);
    assert_eq!(entry["detections_count"], 2);
    assert_eq!(entry["by_category"]["email"], 1);
    assert_eq!(entry["by_category"]["ssn"], 1);
    assert_eq!(entry["processing_time_ms"], 12);
    assert_eq!(
        entry["detections"][0]["value_hash"],
        hash_value("alice@example.com")
    );
}

#[test]
fn test_audit_plain_format_appends() {
    let dir = tempdir().unwrap();
    let config = AuditConfig {
        enabled: true,
        log_path: dir.path().join("detections.log"),
        json_format: false,
    };
    let engine = audited_engine(&config);
    let doc = document();
    let detection = engine.detect_surfaces(&doc.surfaces(), &[]);

    engine.audit("a.pdf", &detection, Duration::ZERO).unwrap();
    engine.audit("b.pdf", &detection, Duration::ZERO).unwrap();

    let content = std::fs::read_to_string(&config.log_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("Source: a.pdf"));
    assert!(lines[1].contains("Categories: email=1,ssn=1"));
}

#[test]
fn test_disabled_audit_writes_nothing() {
    let engine = audited_engine(&AuditConfig::default());
    assert!(!engine.is_audited());
    let doc = document();
    let detection = engine.detect_surfaces(&doc.surfaces(), &[]);
    assert!(engine.audit("x.pdf", &detection, Duration::ZERO).unwrap().is_none());
}

#[test]
fn test_report_masks_samples() {
    let engine = DetectionEngine::new(&DetectionConfig::default(), 6).unwrap();
    let doc = document();
    let detection = engine.detect_surfaces(&doc.surfaces(), &[]);

    let mut report = DetectionReport::new();
    report.add_detection(&detection);
    assert_eq!(report.total_surfaces, 2);
    assert_eq!(report.total_matches, 2);
    assert_eq!(report.total_regions, 2);

    let json = report.format_json().unwrap();
    assert!(!json.contains("alice@example.com"));
    assert!(!json.contains("123-45-6789"));

    let console = report.format_console();
    assert!(console.contains("PII DETECTION REPORT"));
    assert!(!console.contains("alice@example.com"));
}
