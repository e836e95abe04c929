//! MemoryGraphStore - In-memory GraphStore implementation
//!
//! Adjacency-list graph over typed node and edge weights. Provisioning from
//! an [`OrgConfig`] snapshot runs two passes: nodes first, then PART_OF
//! edges, so snapshot order never matters.

use crate::store::GraphStore;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use shared::{
    Agent, AgentNotFoundError, GraphError, Matricule, Membership, OrgConfig, Unit,
    UnitNotFoundError, VisibilityRecord,
};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, RwLock};

/// Weight stored on each graph node
#[derive(Debug, Clone)]
enum NodeWeight {
    Ministere { name: String },
    Unit(Unit),
    Agent(Agent),
}

/// Weight stored on each graph edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeWeight {
    /// Agent -> unit; carries the agent's rang within that unit
    BelongsTo { rang: i32 },
    /// Child -> parent; the chain terminates at the root ministry node
    PartOf,
}

#[derive(Debug)]
struct GraphInner {
    graph: StableDiGraph<NodeWeight, EdgeWeight>,
    /// Unit id -> node
    units: HashMap<String, NodeIndex>,
    /// Matricule -> node
    agents: HashMap<String, NodeIndex>,
    /// Ministry name -> node
    ministeres: HashMap<String, NodeIndex>,
    /// Entity id -> stored visibility override
    visibility: HashMap<String, VisibilityRecord>,
}

impl GraphInner {
    fn new() -> Self {
        Self {
            graph: StableDiGraph::new(),
            units: HashMap::new(),
            agents: HashMap::new(),
            ministeres: HashMap::new(),
            visibility: HashMap::new(),
        }
    }

    fn ensure_ministere(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.ministeres.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(NodeWeight::Ministere {
            name: name.to_string(),
        });
        self.ministeres.insert(name.to_string(), idx);
        idx
    }

    /// Parent of a unit following its outgoing PART_OF edge, if any
    fn part_of_target(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .find(|edge| matches!(edge.weight(), EdgeWeight::PartOf))
            .map(|edge| edge.target())
    }
}

/// Thread-safe in-memory organization graph.
///
/// Mutations hold the write lock for their full duration, so a reader never
/// observes a partial upsert.
#[derive(Debug, Clone)]
pub struct MemoryGraphStore {
    inner: Arc<RwLock<GraphInner>>,
}

impl Default for MemoryGraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryGraphStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(GraphInner::new())),
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, GraphInner>, GraphError> {
        self.inner.read().map_err(|_| GraphError::Unavailable {
            reason: "graph read lock poisoned".to_string(),
        })
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, GraphInner>, GraphError> {
        self.inner.write().map_err(|_| GraphError::Unavailable {
            reason: "graph write lock poisoned".to_string(),
        })
    }

    /// Register a ministry node (upsert)
    pub fn add_ministere(&self, name: &str) -> Result<(), GraphError> {
        let mut inner = self.write()?;
        inner.ensure_ministere(name);
        Ok(())
    }

    /// Register a unit node under a parent unit, or directly under its
    /// ministry when `parent` is absent. Re-adding an existing unit id is a
    /// no-op.
    pub fn add_unit(&self, unit: Unit, parent: Option<&str>) -> Result<(), GraphError> {
        let mut inner = self.write()?;
        if inner.units.contains_key(&unit.id) {
            return Ok(());
        }

        let parent_idx = match parent {
            Some(parent_id) => match inner.units.get(parent_id) {
                Some(&idx) => idx,
                None => {
                    return Err(UnitNotFoundError {
                        unit_id: parent_id.to_string(),
                    }
                    .into())
                }
            },
            None => inner.ensure_ministere(&unit.ministere),
        };

        let id = unit.id.clone();
        let idx = inner.graph.add_node(NodeWeight::Unit(unit));
        inner.units.insert(id, idx);
        inner.graph.add_edge(idx, parent_idx, EdgeWeight::PartOf);
        Ok(())
    }

    /// Register an agent node (upsert)
    pub fn add_agent(&self, agent: Agent) -> Result<(), GraphError> {
        let mut inner = self.write()?;
        if let Some(&idx) = inner.agents.get(agent.matricule.as_str()) {
            if let Some(weight) = inner.graph.node_weight_mut(idx) {
                *weight = NodeWeight::Agent(agent);
            }
            return Ok(());
        }

        let key = agent.matricule.as_str().to_string();
        let idx = inner.graph.add_node(NodeWeight::Agent(agent));
        inner.agents.insert(key, idx);
        Ok(())
    }

    /// Provision a store from an organization snapshot
    pub fn from_config(config: &OrgConfig) -> shared::Result<Self> {
        let store = Self::new();
        {
            let mut inner = store.write()?;

            for ministere in &config.ministeres {
                inner.ensure_ministere(ministere);
            }

            // Node pass
            for entry in &config.units {
                if inner.units.contains_key(&entry.id) {
                    continue;
                }
                let unit = Unit::new(&entry.id, &entry.ministere, &entry.name);
                let idx = inner.graph.add_node(NodeWeight::Unit(unit));
                inner.units.insert(entry.id.clone(), idx);
            }

            // Edge pass
            for entry in &config.units {
                let parent_idx = match &entry.parent {
                    Some(parent_id) => match inner.units.get(parent_id) {
                        Some(&idx) => idx,
                        None => {
                            return Err(GraphError::from(UnitNotFoundError {
                                unit_id: parent_id.clone(),
                            })
                            .into())
                        }
                    },
                    None => inner.ensure_ministere(&entry.ministere),
                };
                if let Some(&child_idx) = inner.units.get(&entry.id) {
                    inner.graph.add_edge(child_idx, parent_idx, EdgeWeight::PartOf);
                }
            }

            for entry in &config.agents {
                if inner.agents.contains_key(entry.matricule.as_str()) {
                    continue;
                }
                let agent = Agent::new(entry.matricule.clone(), &entry.role);
                let key = entry.matricule.as_str().to_string();
                let idx = inner.graph.add_node(NodeWeight::Agent(agent));
                inner.agents.insert(key, idx);
            }
        }

        for entry in &config.memberships {
            store.create_agent_unit_relationship(&entry.matricule, &entry.unit_id, entry.rang)?;
        }

        for entry in &config.overrides {
            let record = VisibilityRecord::new(
                &entry.entity_id,
                &entry.entity_type,
                entry.level,
                &entry.updated_by,
            )?;
            store.record_visibility(record)?;
        }

        Ok(store)
    }
}

impl GraphStore for MemoryGraphStore {
    fn create_agent_unit_relationship(
        &self,
        matricule: &Matricule,
        unit_id: &str,
        rang: i32,
    ) -> Result<(), GraphError> {
        let mut inner = self.write()?;

        let agent_idx = match inner.agents.get(matricule.as_str()) {
            Some(&idx) => idx,
            None => {
                return Err(AgentNotFoundError {
                    matricule: matricule.as_str().to_string(),
                }
                .into())
            }
        };
        let unit_idx = match inner.units.get(unit_id) {
            Some(&idx) => idx,
            None => {
                return Err(UnitNotFoundError {
                    unit_id: unit_id.to_string(),
                }
                .into())
            }
        };

        match inner.graph.find_edge(agent_idx, unit_idx) {
            Some(edge_idx) => {
                if let Some(weight) = inner.graph.edge_weight_mut(edge_idx) {
                    *weight = EdgeWeight::BelongsTo { rang };
                }
            }
            None => {
                inner
                    .graph
                    .add_edge(agent_idx, unit_idx, EdgeWeight::BelongsTo { rang });
            }
        }
        Ok(())
    }

    fn search_units_by_ministere(&self, ministere: &str) -> Result<Vec<Unit>, GraphError> {
        let inner = self.read()?;
        let mut units: Vec<Unit> = inner
            .graph
            .node_indices()
            .filter_map(|idx| match inner.graph.node_weight(idx) {
                Some(NodeWeight::Unit(unit)) if unit.ministere == ministere => Some(unit.clone()),
                _ => None,
            })
            .collect();

        units.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(units)
    }

    fn find_ancestor_path(&self, unit_id: &str) -> Result<Vec<Unit>, GraphError> {
        let inner = self.read()?;
        let Some(&start) = inner.units.get(unit_id) else {
            return Ok(Vec::new());
        };

        let mut path = Vec::new();
        let mut visited = HashSet::new();
        let mut current = start;

        loop {
            if !visited.insert(current) {
                break;
            }
            let Some(NodeWeight::Unit(unit)) = inner.graph.node_weight(current) else {
                // Reached the root ministry node
                break;
            };
            path.push(unit.clone());

            match inner.part_of_target(current) {
                Some(parent) => current = parent,
                // An empty parent link marks the root
                None => break,
            }
        }

        Ok(path)
    }

    fn find_units_under(&self, unit_id: &str) -> Result<Vec<Unit>, GraphError> {
        let inner = self.read()?;
        let Some(&start) = inner.units.get(unit_id) else {
            return Ok(Vec::new());
        };

        let mut result = Vec::new();
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);

        while let Some(idx) = queue.pop_front() {
            for edge in inner.graph.edges_directed(idx, Direction::Incoming) {
                if !matches!(edge.weight(), EdgeWeight::PartOf) {
                    continue;
                }
                let child = edge.source();
                if !seen.insert(child) {
                    continue;
                }
                if let Some(NodeWeight::Unit(unit)) = inner.graph.node_weight(child) {
                    result.push(unit.clone());
                    queue.push_back(child);
                }
            }
        }

        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    fn unit_by_id(&self, unit_id: &str) -> Result<Option<Unit>, GraphError> {
        let inner = self.read()?;
        Ok(inner.units.get(unit_id).and_then(|&idx| {
            match inner.graph.node_weight(idx) {
                Some(NodeWeight::Unit(unit)) => Some(unit.clone()),
                _ => None,
            }
        }))
    }

    fn memberships_of(&self, matricule: &Matricule) -> Result<Vec<Membership>, GraphError> {
        let inner = self.read()?;
        let Some(&agent_idx) = inner.agents.get(matricule.as_str()) else {
            return Ok(Vec::new());
        };

        let mut memberships: Vec<Membership> = inner
            .graph
            .edges_directed(agent_idx, Direction::Outgoing)
            .filter_map(|edge| match edge.weight() {
                EdgeWeight::BelongsTo { rang } => match inner.graph.node_weight(edge.target()) {
                    Some(NodeWeight::Unit(unit)) => Some(Membership::new(&unit.id, *rang)),
                    _ => None,
                },
                EdgeWeight::PartOf => None,
            })
            .collect();

        memberships.sort_by(|a, b| a.unit_id.cmp(&b.unit_id));
        Ok(memberships)
    }

    fn visibility_of(&self, entity_id: &str) -> Result<Option<VisibilityRecord>, GraphError> {
        let inner = self.read()?;
        Ok(inner.visibility.get(entity_id).cloned())
    }

    fn record_visibility(&self, record: VisibilityRecord) -> Result<(), GraphError> {
        let mut inner = self.write()?;
        inner.visibility.insert(record.entity_id.clone(), record);
        Ok(())
    }
}
