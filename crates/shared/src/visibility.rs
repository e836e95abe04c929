//! Visibility classification types

use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Maximum length accepted for an entity id
pub const MAX_ENTITY_ID_LEN: usize = 100;

/// Maximum length accepted for an entity type
pub const MAX_ENTITY_TYPE_LEN: usize = 50;

/// Access classification attached to an entity.
///
/// Modulates the base hierarchy-distance rule: `public` is visible to the
/// whole subtree, `private` and `restricted` additionally gate on the
/// actor's rank against the target's unit-level rang.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityLevel {
    #[default]
    Public,
    Private,
    Restricted,
}

impl FromStr for VisibilityLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            "restricted" => Ok(Self::Restricted),
            other => Err(ValidationError {
                field: "visibilityLevel",
                reason: format!("'{}' is not one of public, private, restricted", other),
            }),
        }
    }
}

impl core::fmt::Display for VisibilityLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Restricted => "restricted",
        };
        write!(f, "{}", s)
    }
}

/// Reference to the entity a visibility decision is about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRef {
    pub entity_id: String,
    pub entity_type: String,
}

impl EntityRef {
    pub fn new(entity_id: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            entity_type: entity_type.into(),
        }
    }

    /// Reference to a unit node
    pub fn unit(unit_id: impl Into<String>) -> Self {
        Self::new(unit_id, "unit")
    }

    /// Reference to an agent node
    pub fn agent(matricule: impl Into<String>) -> Self {
        Self::new(matricule, "agent")
    }
}

/// A computed or manually overridden access classification for one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityRecord {
    pub entity_id: String,
    pub entity_type: String,
    pub visibility_level: VisibilityLevel,
    pub updated_by: String,
    pub updated_at: DateTime<Utc>,
}

impl VisibilityRecord {
    /// Build a validated record.
    ///
    /// `entity_id` and `entity_type` must be non-empty and within their
    /// length bounds; violations name the offending field.
    pub fn new(
        entity_id: impl Into<String>,
        entity_type: impl Into<String>,
        visibility_level: VisibilityLevel,
        updated_by: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let entity_id = entity_id.into();
        let entity_type = entity_type.into();

        if entity_id.is_empty() {
            return Err(ValidationError {
                field: "entityId",
                reason: "must not be empty".to_string(),
            });
        }
        if entity_id.len() > MAX_ENTITY_ID_LEN {
            return Err(ValidationError {
                field: "entityId",
                reason: format!("must be at most {} characters", MAX_ENTITY_ID_LEN),
            });
        }
        if entity_type.is_empty() {
            return Err(ValidationError {
                field: "entityType",
                reason: "must not be empty".to_string(),
            });
        }
        if entity_type.len() > MAX_ENTITY_TYPE_LEN {
            return Err(ValidationError {
                field: "entityType",
                reason: format!("must be at most {} characters", MAX_ENTITY_TYPE_LEN),
            });
        }

        Ok(Self {
            entity_id,
            entity_type,
            visibility_level,
            updated_by: updated_by.into(),
            updated_at: Utc::now(),
        })
    }
}
