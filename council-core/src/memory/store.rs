//! Per-advisor bounded memory store.

use super::record::{EventKind, Memory, MemoryId};
use crate::advisor::AgentId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A bounded, importance-ranked collection of one advisor's memories.
///
/// The store never exceeds its capacity: when an insert would overflow it,
/// the lowest-importance memories are silently evicted. Overflow is policy,
/// not failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentMemoryStore {
    /// The advisor this store belongs to.
    pub owner: AgentId,
    memories: Vec<Memory>,
    capacity: usize,
}

impl AgentMemoryStore {
    /// Create an empty store with the given capacity.
    pub fn new(owner: AgentId, capacity: usize) -> Self {
        Self {
            owner,
            memories: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Insert a memory, compressing if the store would exceed capacity.
    pub fn add_memory(&mut self, memory: Memory) {
        self.memories.push(memory);
        if self.memories.len() > self.capacity {
            self.compress();
        }
    }

    /// Keep only the top-capacity memories ranked by importance.
    ///
    /// Ties prefer the more recently created memory.
    fn compress(&mut self) {
        self.memories.sort_by(|a, b| {
            b.importance()
                .partial_cmp(&a.importance())
                .unwrap_or(Ordering::Equal)
                .then(b.created_turn.cmp(&a.created_turn))
        });
        self.memories.truncate(self.capacity);
    }

    /// Recall matching memories as owned copies.
    ///
    /// When `tags` is given, a memory matches only if it carries every
    /// requested tag; when `kind` is given, the kind must match exactly.
    /// Memories below `min_reliability` never surface.
    pub fn recall(
        &self,
        tags: Option<&[String]>,
        kind: Option<EventKind>,
        min_reliability: f32,
    ) -> Vec<Memory> {
        self.memories
            .iter()
            .filter(|m| m.reliability >= min_reliability)
            .filter(|m| kind.map_or(true, |k| m.kind == k))
            .filter(|m| tags.map_or(true, |t| m.has_tags(t)))
            .cloned()
            .collect()
    }

    /// Apply one decay step to every memory and drop the forgotten ones.
    ///
    /// Returns how many memories were forgotten.
    pub fn decay_all(&mut self, _current_turn: u32, forget_floor: f32) -> usize {
        for memory in &mut self.memories {
            memory.decay();
        }
        let before = self.memories.len();
        self.memories.retain(|m| !m.is_forgotten(forget_floor));
        before - self.memories.len()
    }

    /// Reinforce a memory by id. Returns false if the memory is unknown.
    pub fn access(&mut self, id: MemoryId, current_turn: u32, reinforcement: f32) -> bool {
        match self.memories.iter_mut().find(|m| m.id == id) {
            Some(memory) => {
                memory.access(current_turn, reinforcement);
                true
            }
            None => false,
        }
    }

    /// Look up a memory by id.
    pub fn get(&self, id: MemoryId) -> Option<&Memory> {
        self.memories.iter().find(|m| m.id == id)
    }

    /// Iterate over all stored memories.
    pub fn iter(&self) -> impl Iterator<Item = &Memory> {
        self.memories.iter()
    }

    /// Number of stored memories.
    pub fn len(&self) -> usize {
        self.memories.len()
    }

    /// Whether the store holds no memories.
    pub fn is_empty(&self) -> bool {
        self.memories.is_empty()
    }

    /// The store's capacity bound.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
