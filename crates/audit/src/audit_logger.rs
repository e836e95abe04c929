//! AuditLogger - Audit trail for visibility decisions and mutations

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    /// Correlation id
    pub id: String,
    pub timestamp: String,
    pub event_type: AuditEventType,
    /// Matricule of the acting agent
    pub actor: String,
    /// Entity the event was about, when there is one
    pub target: Option<String>,
    pub allowed: bool,
    pub detail: Option<String>,
}

/// Types of audit events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
    VisibilityChecked,
    VisibilityDenied,
    RelationshipCreated,
    OverrideRecorded,
    UnitsSearched,
}

/// Audit logger
#[derive(Debug)]
pub struct AuditLogger {
    entries: VecDeque<AuditEntry>,
    max_entries: usize,
}

impl AuditLogger {
    /// Create a new AuditLogger
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries),
            max_entries,
        }
    }

    /// Log an audit entry
    pub fn log(&mut self, entry: AuditEntry) {
        if self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Log the outcome of a visibility decision
    pub fn log_decision(&mut self, actor: &str, target: &str, allowed: bool, detail: Option<&str>) {
        self.log(AuditEntry {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            event_type: if allowed {
                AuditEventType::VisibilityChecked
            } else {
                AuditEventType::VisibilityDenied
            },
            actor: actor.to_string(),
            target: Some(target.to_string()),
            allowed,
            detail: detail.map(|s| s.to_string()),
        });
    }

    /// Log a BELONGS_TO edge creation
    pub fn log_relationship(&mut self, actor: &str, unit_id: &str, rang: i32) {
        self.log(AuditEntry {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            event_type: AuditEventType::RelationshipCreated,
            actor: actor.to_string(),
            target: Some(unit_id.to_string()),
            allowed: true,
            detail: Some(format!("rang={}", rang)),
        });
    }

    /// Log a visibility override
    pub fn log_override(&mut self, actor: &str, entity_id: &str, level: &str) {
        self.log(AuditEntry {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            event_type: AuditEventType::OverrideRecorded,
            actor: actor.to_string(),
            target: Some(entity_id.to_string()),
            allowed: true,
            detail: Some(format!("level={}", level)),
        });
    }

    /// Log a ministry search
    pub fn log_search(&mut self, actor: &str, ministere: &str, visible_count: usize) {
        self.log(AuditEntry {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            event_type: AuditEventType::UnitsSearched,
            actor: actor.to_string(),
            target: Some(ministere.to_string()),
            allowed: true,
            detail: Some(format!("{} visible", visible_count)),
        });
    }

    /// Get recent entries
    pub fn get_recent(&self, limit: usize) -> Vec<&AuditEntry> {
        self.entries.iter().rev().take(limit).collect()
    }

    /// Get recent denials
    pub fn get_recent_denials(&self, limit: usize) -> Vec<&AuditEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| !e.allowed)
            .take(limit)
            .collect()
    }

    /// Get statistics
    pub fn get_stats(&self) -> AuditStats {
        let total = self.entries.len();
        let denials = self.entries.iter().filter(|e| !e.allowed).count();

        AuditStats {
            total_entries: total,
            denial_count: denials,
        }
    }

    /// Export as JSON
    pub fn export_json(&self) -> serde_json::Value {
        serde_json::to_value(self.entries.iter().collect::<Vec<_>>()).unwrap_or_default()
    }
}

/// Audit statistics
#[derive(Debug, Clone)]
pub struct AuditStats {
    pub total_entries: usize,
    pub denial_count: usize,
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self::new(10000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_decision() {
        let mut logger = AuditLogger::new(100);

        logger.log_decision("123456A", "654321B", true, None);

        let stats = logger.get_stats();
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.denial_count, 0);
    }

    #[test]
    fn test_log_denied_decision() {
        let mut logger = AuditLogger::new(100);

        logger.log_decision("654321B", "A", false, Some("outside_scope"));

        let stats = logger.get_stats();
        assert_eq!(stats.denial_count, 1);

        let denials = logger.get_recent_denials(10);
        assert_eq!(denials.len(), 1);
        assert_eq!(denials[0].target, Some("A".to_string()));
        assert!(matches!(
            denials[0].event_type,
            AuditEventType::VisibilityDenied
        ));
    }

    #[test]
    fn test_log_relationship_and_override() {
        let mut logger = AuditLogger::new(100);

        logger.log_relationship("123456A", "B", 2);
        logger.log_override("123456A", "654321B", "private");

        let recent = logger.get_recent(2);
        assert!(matches!(
            recent[0].event_type,
            AuditEventType::OverrideRecorded
        ));
        assert!(matches!(
            recent[1].event_type,
            AuditEventType::RelationshipCreated
        ));
        assert_eq!(recent[1].detail, Some("rang=2".to_string()));
    }

    #[test]
    fn test_max_entries_limit() {
        let mut logger = AuditLogger::new(3);

        logger.log_decision("123456A", "t1", true, None);
        logger.log_decision("123456A", "t2", true, None);
        logger.log_decision("123456A", "t3", true, None);
        logger.log_decision("123456A", "t4", true, None);

        let stats = logger.get_stats();
        assert_eq!(stats.total_entries, 3);

        // Oldest entry should be removed
        let targets: Vec<_> = logger
            .get_recent(10)
            .iter()
            .filter_map(|e| e.target.as_ref())
            .cloned()
            .collect();
        assert!(!targets.contains(&"t1".to_string()));
    }

    #[test]
    fn test_get_recent_orders_newest_first() {
        let mut logger = AuditLogger::new(100);

        logger.log_decision("123456A", "t1", true, None);
        logger.log_decision("123456A", "t2", true, None);
        logger.log_decision("123456A", "t3", true, None);

        let recent = logger.get_recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].target, Some("t3".to_string()));
        assert_eq!(recent[1].target, Some("t2".to_string()));
    }

    #[test]
    fn test_export_json() {
        let mut logger = AuditLogger::new(100);

        logger.log_decision("123456A", "654321B", true, None);
        logger.log_search("123456A", "Finance", 2);

        let json = logger.export_json();
        assert!(json.is_array());
        assert_eq!(json.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_entries_have_distinct_ids() {
        let mut logger = AuditLogger::new(100);

        logger.log_decision("123456A", "t1", true, None);
        logger.log_decision("123456A", "t1", true, None);

        let recent = logger.get_recent(2);
        assert_ne!(recent[0].id, recent[1].id);
    }

    #[test]
    fn test_default_max_entries() {
        let logger = AuditLogger::default();
        assert_eq!(logger.max_entries, 10000);
    }
}
