use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::triplet::{EntityReference, Triplet, TripletId};

/// Which side of the stored triplets to follow from an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Follow triplets where the entity is the subject; yields objects.
    Outgoing,
    /// Follow triplets where the entity is the object; yields subjects.
    Incoming,
    /// Both, outgoing results first.
    Both,
}

/// Read-only summary of graph contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    /// Number of stored triplets.
    pub triplets: usize,
    /// Number of distinct entities appearing as subject or object.
    pub entities: usize,
    /// Number of distinct entity type tags.
    pub entity_kinds: usize,
    /// Number of distinct predicates.
    pub relationship_kinds: usize,
    /// The distinct predicates, sorted.
    pub predicates: Vec<String>,
}

/// A triplet store with derived indexes by subject, object, and predicate.
///
/// Indexes are strictly derived state, exactly reconstructable from the
/// triplet list, and are kept consistent on every mutation. Insertion
/// order is preserved and drives result ordering throughout.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeGraph {
    triplets: HashMap<TripletId, Triplet>,
    order: Vec<TripletId>,
    next_id: u64,
    subject_index: HashMap<String, Vec<TripletId>>,
    object_index: HashMap<String, Vec<TripletId>>,
    predicate_index: HashMap<String, Vec<TripletId>>,
}

impl KnowledgeGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored triplets.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the graph holds no triplets.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Look up a triplet by its surrogate key.
    pub fn get(&self, id: TripletId) -> Option<&Triplet> {
        self.triplets.get(&id)
    }

    /// Add a triplet, updating all three indexes. Returns its surrogate key.
    ///
    /// Duplicate-valued triplets are permitted; avoiding them is the
    /// caller's responsibility.
    pub fn add_triplet(&mut self, triplet: Triplet) -> TripletId {
        let id = TripletId(self.next_id);
        self.next_id += 1;

        self.subject_index
            .entry(triplet.subject.key())
            .or_default()
            .push(id);
        self.object_index
            .entry(triplet.object.key())
            .or_default()
            .push(id);
        self.predicate_index
            .entry(triplet.predicate.clone())
            .or_default()
            .push(id);

        self.order.push(id);
        self.triplets.insert(id, triplet);
        id
    }

    /// Find triplets matching all the given criteria, in insertion order.
    ///
    /// Candidates come from the most selective available index (subject,
    /// then object, then predicate; full scan when nothing is given); every
    /// provided criterion is then applied as an exact-match post-filter, so
    /// combining criteria always narrows by conjunction.
    pub fn find(
        &self,
        subject: Option<&EntityReference>,
        predicate: Option<&str>,
        object: Option<&EntityReference>,
    ) -> Vec<&Triplet> {
        let candidates: &[TripletId] = if let Some(s) = subject {
            self.subject_index.get(&s.key()).map_or(&[], Vec::as_slice)
        } else if let Some(o) = object {
            self.object_index.get(&o.key()).map_or(&[], Vec::as_slice)
        } else if let Some(p) = predicate {
            self.predicate_index.get(p).map_or(&[], Vec::as_slice)
        } else {
            &self.order
        };

        candidates
            .iter()
            .filter_map(|id| self.triplets.get(id))
            .filter(|t| subject.is_none_or(|s| t.subject == *s))
            .filter(|t| predicate.is_none_or(|p| t.predicate == p))
            .filter(|t| object.is_none_or(|o| t.object == *o))
            .collect()
    }

    /// Entities related to `entity`, following the given direction and
    /// optionally restricted to one predicate.
    pub fn get_related(
        &self,
        entity: &EntityReference,
        predicate: Option<&str>,
        direction: Direction,
    ) -> Vec<EntityReference> {
        let outgoing = |g: &Self| {
            g.find(Some(entity), predicate, None)
                .into_iter()
                .map(|t| t.object.clone())
                .collect::<Vec<_>>()
        };
        let incoming = |g: &Self| {
            g.find(None, predicate, Some(entity))
                .into_iter()
                .map(|t| t.subject.clone())
                .collect::<Vec<_>>()
        };

        match direction {
            Direction::Outgoing => outgoing(self),
            Direction::Incoming => incoming(self),
            Direction::Both => {
                let mut related = outgoing(self);
                related.extend(incoming(self));
                related
            }
        }
    }

    /// The first triplet (by insertion) connecting `subject` to `object`.
    pub fn get_relationship(
        &self,
        subject: &EntityReference,
        object: &EntityReference,
    ) -> Option<&Triplet> {
        self.find(Some(subject), None, Some(object)).into_iter().next()
    }

    /// Remove every triplet in which `entity` appears as subject or object.
    ///
    /// Matching is structural, but removal goes through surrogate keys, so
    /// duplicate-valued triplets are each removed and counted. The three
    /// indexes are rebuilt from scratch afterwards, simpler and safer than
    /// incremental index surgery at orchestration-scale write volume.
    /// Returns the number of triplets removed.
    pub fn remove_entity(&mut self, entity: &EntityReference) -> usize {
        let doomed: Vec<TripletId> = self
            .order
            .iter()
            .copied()
            .filter(|id| {
                self.triplets
                    .get(id)
                    .is_some_and(|t| t.subject == *entity || t.object == *entity)
            })
            .collect();

        for id in &doomed {
            self.triplets.remove(id);
        }
        self.order.retain(|id| self.triplets.contains_key(id));
        self.rebuild_indexes();

        doomed.len()
    }

    /// Summary counts over triplets, entities, kinds, and predicates.
    pub fn stats(&self) -> GraphStats {
        let mut entities = HashSet::new();
        let mut kinds = HashSet::new();
        let mut predicates = HashSet::new();

        for triplet in self.iter() {
            entities.insert(triplet.subject.key());
            entities.insert(triplet.object.key());
            kinds.insert(triplet.subject.kind.as_str());
            kinds.insert(triplet.object.kind.as_str());
            predicates.insert(triplet.predicate.as_str());
        }

        let mut predicates: Vec<String> = predicates.into_iter().map(String::from).collect();
        predicates.sort_unstable();

        GraphStats {
            triplets: self.order.len(),
            entities: entities.len(),
            entity_kinds: kinds.len(),
            relationship_kinds: predicates.len(),
            predicates,
        }
    }

    /// Iterate over all triplets in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Triplet> {
        self.order.iter().filter_map(|id| self.triplets.get(id))
    }

    /// Clone the triplet list in insertion order.
    ///
    /// This is the persistence contract: the exported list round-trips
    /// through [`KnowledgeGraph::import_triplets`], and each record is
    /// `serde`-serializable for the storage layer.
    pub fn export(&self) -> Vec<Triplet> {
        self.iter().cloned().collect()
    }

    /// Append previously exported triplets, keeping indexes consistent by
    /// going through [`KnowledgeGraph::add_triplet`] for each record.
    pub fn import_triplets(&mut self, data: Vec<Triplet>) {
        for triplet in data {
            self.add_triplet(triplet);
        }
    }

    fn rebuild_indexes(&mut self) {
        self.subject_index.clear();
        self.object_index.clear();
        self.predicate_index.clear();

        for id in &self.order {
            let Some(triplet) = self.triplets.get(id) else {
                continue;
            };
            self.subject_index
                .entry(triplet.subject.key())
                .or_default()
                .push(*id);
            self.object_index
                .entry(triplet.object.key())
                .or_default()
                .push(*id);
            self.predicate_index
                .entry(triplet.predicate.clone())
                .or_default()
                .push(*id);
        }
    }
}
