//! Configuration types for orgscope

use crate::agent::Matricule;
use crate::visibility::VisibilityLevel;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

fn default_ttl() -> u64 {
    300
}

/// Role-hierarchy configuration.
///
/// Supplied to the engine at construction; there is no process-wide role
/// table. `roles` maps canonical role names to ranks (higher = more
/// privileged), `equivalences` maps a canonical role name to its accepted
/// alias names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyConfig {
    /// Canonical role name -> rank
    pub roles: HashMap<String, i32>,

    /// Canonical role name -> alias names resolving to the same rank
    #[serde(default)]
    pub equivalences: HashMap<String, Vec<String>>,

    /// Rank at or above which an actor sees everything
    pub global_visibility_rank: i32,

    /// TTL for cached single-entity decisions, in seconds (0 = no cache)
    #[serde(default = "default_ttl")]
    pub decision_ttl_seconds: u64,

    /// TTL for cached ministry search results, in seconds
    #[serde(default = "default_ttl")]
    pub search_ttl_seconds: u64,
}

impl HierarchyConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }
}

/// One unit in an organization snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitEntry {
    pub id: String,
    pub ministere: String,
    pub name: String,

    /// Parent unit id; absent means the unit hangs directly under its ministry
    #[serde(default)]
    pub parent: Option<String>,
}

/// One agent in an organization snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentEntry {
    pub matricule: Matricule,
    pub role: String,
}

/// One BELONGS_TO edge in an organization snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipEntry {
    pub matricule: Matricule,
    pub unit_id: String,
    pub rang: i32,
}

/// One visibility override in an organization snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideEntry {
    pub entity_id: String,
    pub entity_type: String,
    pub level: VisibilityLevel,
    pub updated_by: String,
}

/// Organization snapshot used to provision the in-memory graph store.
///
/// Agents and units are created by administrative operations upstream of
/// the engine; this is the serialized form those operations produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgConfig {
    #[serde(default)]
    pub ministeres: Vec<String>,

    #[serde(default)]
    pub units: Vec<UnitEntry>,

    #[serde(default)]
    pub agents: Vec<AgentEntry>,

    #[serde(default)]
    pub memberships: Vec<MembershipEntry>,

    #[serde(default)]
    pub overrides: Vec<OverrideEntry>,
}

impl OrgConfig {
    /// Load an organization snapshot from a JSON file
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }
}

/// Logger interface for dependency injection
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str, meta: Option<&HashMap<String, String>>);
    fn info(&self, message: &str, meta: Option<&HashMap<String, String>>);
    fn warn(&self, message: &str, meta: Option<&HashMap<String, String>>);
    fn error(&self, message: &str, meta: Option<&HashMap<String, String>>);
}

/// Simple console logger implementation
#[derive(Debug, Clone, Default)]
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn debug(&self, message: &str, _meta: Option<&HashMap<String, String>>) {
        eprintln!("[DEBUG] {}", message);
    }

    fn info(&self, message: &str, _meta: Option<&HashMap<String, String>>) {
        eprintln!("[INFO] {}", message);
    }

    fn warn(&self, message: &str, _meta: Option<&HashMap<String, String>>) {
        eprintln!("[WARN] {}", message);
    }

    fn error(&self, message: &str, _meta: Option<&HashMap<String, String>>) {
        eprintln!("[ERROR] {}", message);
    }
}

/// No-op logger for testing
#[derive(Debug, Clone, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn debug(&self, _message: &str, _meta: Option<&HashMap<String, String>>) {}
    fn info(&self, _message: &str, _meta: Option<&HashMap<String, String>>) {}
    fn warn(&self, _message: &str, _meta: Option<&HashMap<String, String>>) {}
    fn error(&self, _message: &str, _meta: Option<&HashMap<String, String>>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_hierarchy_config_parse() {
        let json = r#"{
            "roles": {
                "directeur": 80,
                "inspecteur": 40,
                "agent": 10
            },
            "equivalences": {
                "directeur": ["dir", "directrice"]
            },
            "globalVisibilityRank": 90
        }"#;

        let config: HierarchyConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.roles["directeur"], 80);
        assert_eq!(config.equivalences["directeur"].len(), 2);
        assert_eq!(config.global_visibility_rank, 90);
        // TTLs fall back to the 300 second default
        assert_eq!(config.decision_ttl_seconds, 300);
        assert_eq!(config.search_ttl_seconds, 300);
    }

    #[test]
    fn test_hierarchy_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"roles": {{"agent": 10}}, "globalVisibilityRank": 90, "decisionTtlSeconds": 60}}"#
        )
        .unwrap();

        let config = HierarchyConfig::from_file(file.path()).unwrap();
        assert_eq!(config.roles["agent"], 10);
        assert_eq!(config.decision_ttl_seconds, 60);
    }

    #[test]
    fn test_org_config_parse() {
        let json = r#"{
            "ministeres": ["Finance"],
            "units": [
                {"id": "A", "ministere": "Finance", "name": "Budget"},
                {"id": "B", "ministere": "Finance", "name": "Tresorerie", "parent": "A"}
            ],
            "agents": [
                {"matricule": "123456A", "role": "inspecteur"}
            ],
            "memberships": [
                {"matricule": "123456A", "unitId": "A", "rang": 2}
            ]
        }"#;

        let config: OrgConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.units.len(), 2);
        assert_eq!(config.units[1].parent.as_deref(), Some("A"));
        assert_eq!(config.memberships[0].rang, 2);
        assert!(config.overrides.is_empty());
    }
}
