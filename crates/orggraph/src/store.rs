//! GraphStore - Abstract organization graph port

use shared::{GraphError, Matricule, Membership, Unit, VisibilityRecord};

/// Organization graph port.
///
/// BELONGS_TO edges connect agents to units and carry a `rang` attribute;
/// PART_OF edges are directed child -> parent and terminate at the root
/// ministry. Every operation executes as one transactional traversal:
/// partial writes are never observable.
///
/// Reads on unknown identifiers are lenient (`None` / empty) so decision
/// paths can fail closed; `UnitNotFound` / `AgentNotFound` are reserved for
/// mutations, where a dangling reference is a rejected write.
pub trait GraphStore: Send + Sync {
    /// Create or upsert a BELONGS_TO edge.
    ///
    /// Idempotent: repeating the same `(matricule, unit_id, rang)` triple
    /// leaves the graph in the same state.
    fn create_agent_unit_relationship(
        &self,
        matricule: &Matricule,
        unit_id: &str,
        rang: i32,
    ) -> Result<(), GraphError>;

    /// Every unit of a ministry, ordered by unit name.
    ///
    /// No matches (including an unknown ministry) is an empty sequence,
    /// not an error.
    fn search_units_by_ministere(&self, ministere: &str) -> Result<Vec<Unit>, GraphError>;

    /// The unit followed by its PART_OF ancestors, up to (excluding) the
    /// root ministry node.
    fn find_ancestor_path(&self, unit_id: &str) -> Result<Vec<Unit>, GraphError>;

    /// All units transitively nested under a unit, ordered by name
    fn find_units_under(&self, unit_id: &str) -> Result<Vec<Unit>, GraphError>;

    /// Node lookup by unit id
    fn unit_by_id(&self, unit_id: &str) -> Result<Option<Unit>, GraphError>;

    /// BELONGS_TO edges of an agent, ordered by unit id.
    ///
    /// An agent absent from the graph has no memberships; that is an empty
    /// sequence, not an error.
    fn memberships_of(&self, matricule: &Matricule) -> Result<Vec<Membership>, GraphError>;

    /// Stored visibility override for an entity, if any.
    ///
    /// Absent means the default `public` classification applies.
    fn visibility_of(&self, entity_id: &str) -> Result<Option<VisibilityRecord>, GraphError>;

    /// Create or replace a visibility override record
    fn record_visibility(&self, record: VisibilityRecord) -> Result<(), GraphError>;
}
