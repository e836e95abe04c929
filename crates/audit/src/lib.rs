//! # Orgscope Audit
//!
//! Audit trail of visibility decisions and graph mutations.

mod audit_logger;

pub use audit_logger::{AuditEntry, AuditEventType, AuditLogger, AuditStats};
