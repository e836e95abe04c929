//! VisibilityEngine - The visibility decision algorithm

use crate::cache_key;
use cache::CacheStore;
use hierarchy::RoleRankResolver;
use orggraph::GraphStore;
use serde::{Deserialize, Serialize};
use shared::{
    ActorIdentity, EntityRef, HierarchyConfig, Logger, Matricule, Membership, Result, Unit,
    VisibilityLevel, VisibilityRecord,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// VisibilityEngine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// TTL for cached single-entity decisions, in seconds (0 = no caching)
    pub decision_ttl_seconds: u64,
    /// TTL for cached ministry search results, in seconds (0 = no caching)
    pub search_ttl_seconds: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            decision_ttl_seconds: 300,
            search_ttl_seconds: 300,
        }
    }
}

impl EngineConfig {
    pub fn from_hierarchy(config: &HierarchyConfig) -> Self {
        Self {
            decision_ttl_seconds: config.decision_ttl_seconds,
            search_ttl_seconds: config.search_ttl_seconds,
        }
    }
}

/// Why a decision came out the way it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    /// Actor rank at or above the global visibility threshold
    GlobalOversight,
    /// Target unit inside one of the actor's unit subtrees, rank gate passed
    WithinSubtree,
    /// Target in scope but its classification outranks the actor
    RankTooLow,
    /// Target unit outside every subtree the actor belongs to
    OutsideScope,
    /// Actor has no unit membership at all
    NoMembership,
    /// Target could not be anchored to any unit
    UnknownTarget,
}

impl core::fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            Self::GlobalOversight => "global_oversight",
            Self::WithinSubtree => "within_subtree",
            Self::RankTooLow => "rank_too_low",
            Self::OutsideScope => "outside_scope",
            Self::NoMembership => "no_membership",
            Self::UnknownTarget => "unknown_target",
        };
        write!(f, "{}", s)
    }
}

/// An uncached decision together with its reason and the hierarchy
/// distance between actor and target units
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub allowed: bool,
    pub reason: DecisionReason,
    /// PART_OF hops between the actor's unit and the target's unit through
    /// their nearest common ancestor; absent when they share no root
    pub hierarchy_distance: Option<usize>,
}

/// The visibility policy engine.
///
/// Holds no mutable state beyond configuration: a single instance is shared
/// across concurrent callers without locking. Every operation may block on
/// the graph or cache backends; cache failures degrade to recomputation and
/// are never surfaced.
pub struct VisibilityEngine {
    resolver: RoleRankResolver,
    graph: Arc<dyn GraphStore>,
    cache: Arc<dyn CacheStore>,
    logger: Arc<dyn Logger>,
    config: EngineConfig,
}

impl VisibilityEngine {
    pub fn new(
        resolver: RoleRankResolver,
        graph: Arc<dyn GraphStore>,
        cache: Arc<dyn CacheStore>,
        logger: Arc<dyn Logger>,
        config: EngineConfig,
    ) -> Self {
        Self {
            resolver,
            graph,
            cache,
            logger,
            config,
        }
    }

    /// Can `actor` see `target`?
    ///
    /// Cache-checked; a decision may be up to `decision_ttl_seconds` stale
    /// relative to graph mutations. Callers needing immediate consistency
    /// use [`can_view_uncached`](Self::can_view_uncached).
    pub fn can_view(&self, actor: &ActorIdentity, target: &EntityRef) -> Result<bool> {
        let rank = self.resolver.resolve(&actor.role_name)?;
        let key = cache_key::decision_key(&actor.matricule, rank, target);

        if let Some(hit) = self.cache_get(&key) {
            if let Ok(cached) = serde_json::from_str::<bool>(&hit) {
                return Ok(cached);
            }
        }

        let (allowed, _) = self.decide(actor, rank, target)?;
        self.cache_put(&key, if allowed { "true" } else { "false" }, self.config.decision_ttl_seconds);
        Ok(allowed)
    }

    /// Same decision as [`can_view`](Self::can_view), bypassing the cache
    /// in both directions
    pub fn can_view_uncached(&self, actor: &ActorIdentity, target: &EntityRef) -> Result<bool> {
        let rank = self.resolver.resolve(&actor.role_name)?;
        let (allowed, _) = self.decide(actor, rank, target)?;
        Ok(allowed)
    }

    /// Uncached decision with its reason and hierarchy distance
    pub fn explain(&self, actor: &ActorIdentity, target: &EntityRef) -> Result<Explanation> {
        let rank = self.resolver.resolve(&actor.role_name)?;
        let (allowed, reason) = self.decide(actor, rank, target)?;
        let hierarchy_distance = self.hierarchy_distance(actor, target)?;
        Ok(Explanation {
            allowed,
            reason,
            hierarchy_distance,
        })
    }

    /// Units of a ministry the actor is allowed to see.
    ///
    /// The raw ministry search is cache-checked (a serialized unit-id
    /// sequence); the per-unit filter goes through [`can_view`](Self::can_view)
    /// and so hits the decision cache.
    pub fn search_visible_units(&self, actor: &ActorIdentity, ministere: &str) -> Result<Vec<Unit>> {
        let units = self.search_units(ministere)?;

        let mut visible = Vec::new();
        for unit in units {
            if self.can_view(actor, &EntityRef::unit(&unit.id))? {
                visible.push(unit);
            }
        }
        Ok(visible)
    }

    /// Persist a visibility override.
    ///
    /// Already-cached decisions about this entity stay valid until their
    /// TTL runs out; the uncached path observes the override immediately.
    pub fn record_override(&self, record: VisibilityRecord) -> Result<()> {
        self.graph.record_visibility(record)?;
        Ok(())
    }

    // ---- decision internals ----

    fn decide(
        &self,
        actor: &ActorIdentity,
        actor_rank: i32,
        target: &EntityRef,
    ) -> Result<(bool, DecisionReason)> {
        if actor_rank >= self.resolver.global_visibility_rank() {
            return Ok((true, DecisionReason::GlobalOversight));
        }

        let actor_memberships = self.graph.memberships_of(&actor.matricule)?;
        if actor_memberships.is_empty() {
            // Fail closed: missing data never grants visibility
            return Ok((false, DecisionReason::NoMembership));
        }

        let target_anchors = self.target_anchors(target)?;
        if target_anchors.is_empty() {
            return Ok((false, DecisionReason::UnknownTarget));
        }

        let level = self
            .graph
            .visibility_of(&target.entity_id)?
            .map(|record| record.visibility_level)
            .unwrap_or_default();

        let mut in_scope = false;
        for membership in &actor_memberships {
            let mut scope: HashSet<String> = HashSet::from([membership.unit_id.clone()]);
            for unit in self.graph.find_units_under(&membership.unit_id)? {
                scope.insert(unit.id);
            }

            for anchor in &target_anchors {
                if !scope.contains(&anchor.unit_id) {
                    continue;
                }
                in_scope = true;
                match level {
                    VisibilityLevel::Public => return Ok((true, DecisionReason::WithinSubtree)),
                    // Inclusive boundary: a tie on rank stays visible
                    VisibilityLevel::Private | VisibilityLevel::Restricted => {
                        if actor_rank >= anchor.rang {
                            return Ok((true, DecisionReason::WithinSubtree));
                        }
                    }
                }
            }
        }

        if in_scope {
            Ok((false, DecisionReason::RankTooLow))
        } else {
            Ok((false, DecisionReason::OutsideScope))
        }
    }

    /// The unit(s) a target hangs from, with the rang gating access to it.
    ///
    /// An agent target is anchored by its memberships; a unit target by
    /// itself with rang 0 (subtree containment is its only gate). Other
    /// entity types have no owning unit in the graph.
    fn target_anchors(&self, target: &EntityRef) -> Result<Vec<Membership>> {
        match target.entity_type.as_str() {
            "unit" => Ok(self
                .graph
                .unit_by_id(&target.entity_id)?
                .map(|unit| vec![Membership::new(unit.id, 0)])
                .unwrap_or_default()),
            "agent" => match Matricule::parse(target.entity_id.as_str()) {
                Ok(matricule) => Ok(self.graph.memberships_of(&matricule)?),
                Err(_) => Ok(Vec::new()),
            },
            _ => Ok(Vec::new()),
        }
    }

    /// PART_OF hops between the actor's and the target's units through
    /// their nearest common ancestor, minimized over all unit pairs
    fn hierarchy_distance(
        &self,
        actor: &ActorIdentity,
        target: &EntityRef,
    ) -> Result<Option<usize>> {
        let actor_memberships = self.graph.memberships_of(&actor.matricule)?;
        let target_anchors = self.target_anchors(target)?;

        let mut best: Option<usize> = None;
        for membership in &actor_memberships {
            let actor_path = self.graph.find_ancestor_path(&membership.unit_id)?;
            let positions: HashMap<&str, usize> = actor_path
                .iter()
                .enumerate()
                .map(|(pos, unit)| (unit.id.as_str(), pos))
                .collect();

            for anchor in &target_anchors {
                let target_path = self.graph.find_ancestor_path(&anchor.unit_id)?;
                for (hops, unit) in target_path.iter().enumerate() {
                    if let Some(&pos) = positions.get(unit.id.as_str()) {
                        let distance = hops + pos;
                        if best.map_or(true, |b| distance < b) {
                            best = Some(distance);
                        }
                        break;
                    }
                }
            }
        }
        Ok(best)
    }

    // ---- cache plumbing: failures are logged and treated as a miss ----

    fn cache_get(&self, key: &str) -> Option<String> {
        match self.cache.get(key) {
            Ok(value) => value,
            Err(err) => {
                self.logger
                    .warn(&format!("Cache read failed for '{}': {}", key, err), None);
                None
            }
        }
    }

    fn cache_put(&self, key: &str, value: &str, ttl_seconds: u64) {
        if ttl_seconds == 0 {
            return;
        }
        if let Err(err) = self.cache.set(key, value, ttl_seconds) {
            self.logger
                .warn(&format!("Cache write failed for '{}': {}", key, err), None);
        }
    }

    fn search_units(&self, ministere: &str) -> Result<Vec<Unit>> {
        let key = cache_key::search_key(ministere);

        if let Some(hit) = self.cache_get(&key) {
            if let Ok(ids) = serde_json::from_str::<Vec<String>>(&hit) {
                if let Some(units) = self.rehydrate(&ids)? {
                    return Ok(units);
                }
            }
        }

        let units = self.graph.search_units_by_ministere(ministere)?;
        let ids: Vec<&str> = units.iter().map(|unit| unit.id.as_str()).collect();
        if let Ok(payload) = serde_json::to_string(&ids) {
            self.cache_put(&key, &payload, self.config.search_ttl_seconds);
        }
        Ok(units)
    }

    /// Turn a cached unit-id sequence back into units; any dangling id
    /// forces recomputation
    fn rehydrate(&self, ids: &[String]) -> Result<Option<Vec<Unit>>> {
        let mut units = Vec::with_capacity(ids.len());
        for id in ids {
            match self.graph.unit_by_id(id)? {
                Some(unit) => units.push(unit),
                None => return Ok(None),
            }
        }
        Ok(Some(units))
    }
}
