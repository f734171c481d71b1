//! Audit logging module
//!
//! Provides an append-only record of detection jobs with hashed values.

pub mod logger;

pub use logger::{hash_value, AuditJob, AuditLogger};
