//! Deterministic cache key construction
//!
//! Key construction belongs to the engine; the cache is opaque storage.

use shared::{EntityRef, Matricule};

/// Key for a single-entity visibility decision
pub fn decision_key(matricule: &Matricule, rank: i32, target: &EntityRef) -> String {
    format!(
        "decision:{}:{}:{}:{}",
        matricule, rank, target.entity_id, target.entity_type
    )
}

/// Key for a ministry search result
pub fn search_key(ministere: &str) -> String {
    format!("units:{}", ministere)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_key_is_deterministic() {
        let m = Matricule::parse("123456A").unwrap();
        let target = EntityRef::unit("U-001");
        assert_eq!(decision_key(&m, 40, &target), decision_key(&m, 40, &target));
        assert_eq!(decision_key(&m, 40, &target), "decision:123456A:40:U-001:unit");
    }

    #[test]
    fn test_distinct_actors_get_distinct_keys() {
        let target = EntityRef::agent("654321B");
        let a = Matricule::parse("123456A").unwrap();
        let b = Matricule::parse("111111A").unwrap();
        assert_ne!(decision_key(&a, 40, &target), decision_key(&b, 40, &target));
        assert_ne!(decision_key(&a, 40, &target), decision_key(&a, 80, &target));
    }

    #[test]
    fn test_search_key() {
        assert_eq!(search_key("Finance"), "units:Finance");
    }
}
