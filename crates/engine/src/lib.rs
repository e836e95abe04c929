//! # Orgscope Engine
//!
//! The visibility policy engine: orchestrates rank resolution, graph
//! traversal and result caching into a single decision surface.
//!
//! ## Components
//!
//! - `VisibilityEngine` - cache-checked visibility decisions and searches
//! - `cache_key` - deterministic cache key construction

pub mod cache_key;
pub mod visibility_engine;

pub use visibility_engine::{DecisionReason, EngineConfig, Explanation, VisibilityEngine};
