//! Error types for orgscope

use thiserror::Error;

/// Error thrown when a role name resolves to no rank
#[derive(Debug, Error)]
#[error("Role '{role_name}' cannot be resolved to a rank")]
pub struct InvalidRoleError {
    pub role_name: String,
}

/// Error thrown when a unit id does not exist in the organization graph
#[derive(Debug, Error)]
#[error("Unit '{unit_id}' not found")]
pub struct UnitNotFoundError {
    pub unit_id: String,
}

/// Error thrown when an agent matricule does not exist in the organization graph
#[derive(Debug, Error)]
#[error("Agent '{matricule}' not found")]
pub struct AgentNotFoundError {
    pub matricule: String,
}

/// Validation failure on a single field
#[derive(Debug, Error)]
#[error("Invalid value for field '{field}': {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

/// Errors surfaced by the graph backend
#[derive(Debug, Error)]
pub enum GraphError {
    #[error(transparent)]
    UnitNotFound(#[from] UnitNotFoundError),

    #[error(transparent)]
    AgentNotFound(#[from] AgentNotFoundError),

    /// Backend connectivity or timeout. The reason stays generic: backend
    /// detail must not leak to callers.
    #[error("Graph backend unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Error raised by a cache backend.
///
/// Never surfaced past the policy engine; every cache failure degrades to
/// recomputation from the graph.
#[derive(Debug, Error)]
#[error("Cache backend error: {reason}")]
pub struct CacheError {
    pub reason: String,
}

/// General orgscope error type
#[derive(Debug, Error)]
pub enum VisibilityError {
    #[error(transparent)]
    InvalidRole(#[from] InvalidRoleError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VisibilityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_error_messages_name_the_identifier() {
        let err = GraphError::from(UnitNotFoundError {
            unit_id: "U-042".to_string(),
        });
        assert!(err.to_string().contains("U-042"));

        let err = GraphError::from(AgentNotFoundError {
            matricule: "123456A".to_string(),
        });
        assert!(err.to_string().contains("123456A"));
    }

    #[test]
    fn test_validation_error_names_the_field() {
        let err = ValidationError {
            field: "entityId",
            reason: "must not be empty".to_string(),
        };
        assert!(err.to_string().contains("entityId"));
    }

    #[test]
    fn test_unavailable_reason_stays_generic() {
        let err = GraphError::Unavailable {
            reason: "connection timed out".to_string(),
        };
        assert!(err.to_string().starts_with("Graph backend unavailable"));
    }
}
