//! Agent identity types

use crate::error::ValidationError;
use serde::{Deserialize, Deserializer, Serialize};

/// Expected matricule shape: 6 digits followed by 1 uppercase letter
const MATRICULE_PATTERN: &str = r"^[0-9]{6}[A-Z]$";

/// Unique agent identifier (6 digits + 1 letter, e.g. `123456A`)
///
/// The matricule is the agent's identity across the whole system; it is
/// immutable once created. Deserialization runs the same format check as
/// [`Matricule::parse`], so malformed identifiers cannot enter through a
/// snapshot file either.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Matricule(String);

impl<'de> Deserialize<'de> for Matricule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Matricule::parse(value).map_err(serde::de::Error::custom)
    }
}

impl Matricule {
    /// Parse and validate a matricule string
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let valid = regex::Regex::new(MATRICULE_PATTERN)
            .map(|r| r.is_match(&value))
            .unwrap_or(false);

        if !valid {
            return Err(ValidationError {
                field: "matricule",
                reason: format!("'{}' does not match 6 digits + 1 uppercase letter", value),
            });
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Matricule {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An agent node in the organization graph
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Unique identifier
    pub matricule: Matricule,

    /// Global role name; the numeric rank is derived, never stored
    pub role_name: String,
}

impl Agent {
    pub fn new(matricule: Matricule, role_name: impl Into<String>) -> Self {
        Self {
            matricule,
            role_name: role_name.into(),
        }
    }
}

/// The already-authenticated actor identity handed to the engine.
///
/// Credential verification happens upstream; the engine only ever sees the
/// resolved `{matricule, roleName}` pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorIdentity {
    pub matricule: Matricule,
    pub role_name: String,
}

impl ActorIdentity {
    pub fn new(matricule: Matricule, role_name: impl Into<String>) -> Self {
        Self {
            matricule,
            role_name: role_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matricule_parse_valid() {
        let m = Matricule::parse("123456A").unwrap();
        assert_eq!(m.as_str(), "123456A");
        assert_eq!(m.to_string(), "123456A");
    }

    #[test]
    fn test_matricule_rejects_bad_shapes() {
        for bad in ["", "12345A", "1234567", "123456a", "A123456", "123456AB"] {
            let err = Matricule::parse(bad).unwrap_err();
            assert_eq!(err.field, "matricule");
        }
    }

    #[test]
    fn test_matricule_serde_is_transparent() {
        let m = Matricule::parse("654321Z").unwrap();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "\"654321Z\"");

        let back: Matricule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_matricule_deserialization_validates_format() {
        assert!(serde_json::from_str::<Matricule>("\"12345\"").is_err());
        assert!(serde_json::from_str::<Matricule>("\"123456a\"").is_err());
    }

    #[test]
    fn test_agent_creation() {
        let agent = Agent::new(Matricule::parse("123456A").unwrap(), "inspecteur");
        assert_eq!(agent.role_name, "inspecteur");
        assert_eq!(agent.matricule.as_str(), "123456A");
    }
}
