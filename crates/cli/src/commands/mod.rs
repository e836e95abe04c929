//! CLI Commands

pub mod check;
pub mod override_cmd;
pub mod relate;
pub mod search;

pub use check::CheckCommand;
pub use override_cmd::OverrideCommand;
pub use relate::RelateCommand;
pub use search::SearchCommand;

use audit::AuditLogger;
use cache::MemoryCacheStore;
use engine::{EngineConfig, VisibilityEngine};
use hierarchy::RoleRankResolver;
use orggraph::MemoryGraphStore;
use shared::{ConsoleLogger, HierarchyConfig, OrgConfig};
use std::path::Path;
use std::sync::Arc;

/// Everything a command needs: the engine, its backing store and the audit
/// trail the invocation layer keeps around engine calls
pub struct EngineContext {
    pub engine: VisibilityEngine,
    pub store: MemoryGraphStore,
    pub audit: AuditLogger,
}

impl EngineContext {
    /// Load configuration files and assemble the engine
    pub fn load(hierarchy_path: &Path, org_path: &Path) -> anyhow::Result<Self> {
        let hierarchy_config = HierarchyConfig::from_file(hierarchy_path)?;
        let org_config = OrgConfig::from_file(org_path)?;
        tracing::debug!(
            units = org_config.units.len(),
            agents = org_config.agents.len(),
            "organization snapshot loaded"
        );

        let resolver = RoleRankResolver::new(&hierarchy_config)?;
        let store = MemoryGraphStore::from_config(&org_config)?;
        let engine = VisibilityEngine::new(
            resolver,
            Arc::new(store.clone()),
            Arc::new(MemoryCacheStore::new()),
            Arc::new(ConsoleLogger),
            EngineConfig::from_hierarchy(&hierarchy_config),
        );

        Ok(Self {
            engine,
            store,
            audit: AuditLogger::default(),
        })
    }
}
