//! Organizational unit types

use crate::agent::Matricule;
use serde::{Deserialize, Serialize};

/// A unit node in the organization graph.
///
/// A unit hangs either under a parent unit (PART_OF edge) or directly under
/// its ministry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    /// Unique unit identifier
    pub id: String,

    /// Ministry this unit ultimately belongs to
    pub ministere: String,

    /// Human-readable unit name
    pub name: String,
}

impl Unit {
    pub fn new(
        id: impl Into<String>,
        ministere: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            ministere: ministere.into(),
            name: name.into(),
        }
    }
}

/// One BELONGS_TO edge seen from the agent side.
///
/// `rang` scopes the agent's seniority within this one unit; it is
/// independent of the agent's global role rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub unit_id: String,
    pub rang: i32,
}

impl Membership {
    pub fn new(unit_id: impl Into<String>, rang: i32) -> Self {
        Self {
            unit_id: unit_id.into(),
            rang,
        }
    }
}

/// A membership request: which agent joins which unit at which rang
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipRequest {
    pub matricule: Matricule,
    pub unit_id: String,
    pub rang: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_creation() {
        let unit = Unit::new("U-001", "Finance", "Direction du budget");
        assert_eq!(unit.id, "U-001");
        assert_eq!(unit.ministere, "Finance");
    }

    #[test]
    fn test_unit_serde_camel_case() {
        let m = Membership::new("U-001", 2);
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("unitId"));
        assert!(json.contains("rang"));
    }
}
