use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Surrogate key for a stored triplet, assigned at insertion.
///
/// Sequence numbers make removal unambiguous even when several triplets
/// carry identical subject/predicate/object values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TripletId(pub u64);

impl fmt::Display for TripletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// A lightweight pointer into external entity storage.
///
/// Purely a key; the graph never dereferences it. Serialized with the
/// field name `type` to match the stored record shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityReference {
    /// Entity type tag ("Quest", "NPC", "Item", ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Entity id, unique within its type.
    pub id: String,
}

impl EntityReference {
    /// Create a reference from a type tag and id.
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// The `"type:id"` string used as an index key.
    pub fn key(&self) -> String {
        format!("{}:{}", self.kind, self.id)
    }
}

impl fmt::Display for EntityReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Optional typed hints on a relationship.
///
/// Every field is optional; absence means "not specified", not zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RelationMetadata {
    /// Whether the relationship is optional for the consumer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    /// Probability of the relationship applying, 0 to 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chance: Option<f64>,
    /// Minimum character level for the relationship to apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_required: Option<u32>,
    /// Weight for weighted selection among sibling relationships.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Ordering priority among sibling relationships.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    /// Named spatial coordinates attached to the relationship.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<HashMap<String, f64>>,
    /// Spatial distance associated with the relationship.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Cron-like or free-form schedule expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    /// Start of the relationship's validity window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// End of the relationship's validity window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Free-form custom annotations.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub custom: HashMap<String, Value>,
}

/// A (subject, predicate, object) relationship record.
///
/// Immutable once added to a graph; edits are remove and re-add. The
/// store is a multiset: identical triplets may coexist, each under its
/// own [`TripletId`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triplet {
    /// The entity the relationship originates from.
    pub subject: EntityReference,
    /// The relationship type ("requires", "located_in", "drops", ...).
    pub predicate: String,
    /// The entity the relationship points to.
    pub object: EntityReference,
    /// Optional typed hints on the relationship.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RelationMetadata>,
}

impl Triplet {
    /// Create a triplet without metadata.
    pub fn new(subject: EntityReference, predicate: impl Into<String>, object: EntityReference) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
            metadata: None,
        }
    }

    /// Attach metadata to this triplet.
    pub fn with_metadata(mut self, metadata: RelationMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

impl fmt::Display for Triplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.subject, self.predicate, self.object)
    }
}
