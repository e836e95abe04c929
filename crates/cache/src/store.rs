//! CacheStore - Abstract key/value storage with TTL

use shared::CacheError;

/// Key/value-with-TTL port.
///
/// This is opaque storage: key construction belongs to callers, values are
/// serialized decisions or unit-id sequences. Entries are best-effort; a
/// caller must survive any [`CacheError`] by recomputing from the graph,
/// never by failing the overall decision.
pub trait CacheStore: Send + Sync {
    /// Return the stored value if it has not expired.
    ///
    /// Expired entries behave as absent; whether they are physically
    /// removed is the backing store's concern.
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store a value with an explicit expiry
    fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), CacheError>;
}
