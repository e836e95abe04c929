//! RoleRankResolver - Role name to rank resolution

use shared::{HierarchyConfig, InvalidRoleError, VisibilityError};
use std::collections::HashMap;

/// Resolves role names to their canonical numeric rank.
///
/// Higher rank = more privileged. Synonym role names collapse onto the
/// canonical role's rank through an alias index built once at construction,
/// so lookups never scan the equivalency lists.
///
/// Pure lookup over configuration data; no interior mutability, safe to
/// share across threads.
#[derive(Debug, Clone)]
pub struct RoleRankResolver {
    /// Canonical role name -> rank
    ranks: HashMap<String, i32>,
    /// Alias name -> canonical role name
    aliases: HashMap<String, String>,
    /// Rank at or above which an actor sees everything
    global_visibility_rank: i32,
}

impl RoleRankResolver {
    /// Build a resolver from hierarchy configuration.
    ///
    /// Fails when the configuration is internally inconsistent: two
    /// distinct canonical roles sharing a rank, an equivalence entry whose
    /// canonical role has no rank, an alias shadowing a canonical role, or
    /// one alias claimed by two canonical roles.
    pub fn new(config: &HierarchyConfig) -> Result<Self, VisibilityError> {
        let mut rank_owners: HashMap<i32, &str> = HashMap::new();
        for (name, rank) in &config.roles {
            if let Some(other) = rank_owners.insert(*rank, name.as_str()) {
                return Err(VisibilityError::Config(format!(
                    "roles '{}' and '{}' both map to rank {}",
                    other, name, rank
                )));
            }
        }

        let mut aliases: HashMap<String, String> = HashMap::new();
        for (canonical, names) in &config.equivalences {
            if !config.roles.contains_key(canonical) {
                return Err(VisibilityError::Config(format!(
                    "equivalence entry '{}' does not exist in the role hierarchy",
                    canonical
                )));
            }

            for alias in names {
                if config.roles.contains_key(alias) {
                    return Err(VisibilityError::Config(format!(
                        "alias '{}' shadows a canonical role name",
                        alias
                    )));
                }
                if let Some(previous) = aliases.insert(alias.clone(), canonical.clone()) {
                    if previous != *canonical {
                        return Err(VisibilityError::Config(format!(
                            "alias '{}' is claimed by both '{}' and '{}'",
                            alias, previous, canonical
                        )));
                    }
                }
            }
        }

        Ok(Self {
            ranks: config.roles.clone(),
            aliases,
            global_visibility_rank: config.global_visibility_rank,
        })
    }

    /// Resolve a role name to its rank.
    ///
    /// Direct hierarchy lookup first, then the alias index. Names present
    /// in neither are rejected.
    pub fn resolve(&self, role_name: &str) -> Result<i32, InvalidRoleError> {
        if let Some(rank) = self.ranks.get(role_name) {
            return Ok(*rank);
        }

        if let Some(canonical) = self.aliases.get(role_name) {
            if let Some(rank) = self.ranks.get(canonical) {
                return Ok(*rank);
            }
        }

        Err(InvalidRoleError {
            role_name: role_name.to_string(),
        })
    }

    /// The configured oversight threshold
    pub fn global_visibility_rank(&self) -> i32 {
        self.global_visibility_rank
    }

    /// All canonical role names
    pub fn role_names(&self) -> Vec<&str> {
        self.ranks.keys().map(|s| s.as_str()).collect()
    }
}
