//! Triplet knowledge graph for relationships between generated entities.
//!
//! The graph answers "what is this object related to": it stores
//! (subject, predicate, object) records with optional metadata and keeps
//! three derived indexes for amortized O(1) lookup by subject, object, or
//! predicate. Entities are opaque [`EntityReference`] keys: the graph
//! never dereferences them; external storage owns the entity records.

/// The triplet store and its query operations.
pub mod graph;
/// Triplet records, entity references, and relationship metadata.
pub mod triplet;

/// Re-export the graph and its query types.
pub use graph::{Direction, GraphStats, KnowledgeGraph};
/// Re-export triplet record types.
pub use triplet::{EntityReference, RelationMetadata, Triplet, TripletId};
