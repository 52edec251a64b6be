//! Civilization-wide memory bank.

use super::record::{EventKind, Memory, MemoryId, SECRET_TAG};
use super::store::AgentMemoryStore;
use crate::advisor::AgentId;
use crate::error::CouncilError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Aggregates one memory store per advisor plus the shared-memory list.
///
/// Stores are created lazily on first access. Shared memories are
/// broadcast as copies into every store that exists at the moment of
/// sharing; advisors who join later do not receive them retroactively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryBank {
    stores: HashMap<AgentId, AgentMemoryStore>,
    shared: Vec<Memory>,
    capacity: usize,
}

impl MemoryBank {
    /// Create an empty bank; new stores use the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            stores: HashMap::new(),
            shared: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Ensure a store exists for the advisor, creating one if needed.
    pub fn ensure_store(&mut self, agent: AgentId) -> &mut AgentMemoryStore {
        let capacity = self.capacity;
        self.stores
            .entry(agent)
            .or_insert_with(|| AgentMemoryStore::new(agent, capacity))
    }

    /// Route a memory into the owning advisor's store.
    pub fn store(&mut self, agent: AgentId, memory: Memory) {
        self.ensure_store(agent).add_memory(memory);
    }

    /// Recall from an advisor's store.
    ///
    /// An advisor with no store yet simply recalls nothing.
    pub fn recall(
        &self,
        agent: AgentId,
        tags: Option<&[String]>,
        kind: Option<EventKind>,
        min_reliability: f32,
    ) -> Vec<Memory> {
        match self.stores.get(&agent) {
            Some(store) => store.recall(tags, kind, min_reliability),
            None => Vec::new(),
        }
    }

    /// Broadcast a memory to every current advisor.
    ///
    /// The original is kept in the shared list; each store receives a copy
    /// owned by that store's advisor.
    pub fn share(&mut self, memory: Memory) {
        for store in self.stores.values_mut() {
            let mut copy = memory.clone();
            copy.id = MemoryId::new();
            copy.owner = store.owner;
            store.add_memory(copy);
        }
        self.shared.push(memory);
    }

    /// Copy matching memories from one advisor to another.
    ///
    /// Copies arrive degraded (reliability scaled by `degradation`), carry
    /// `source_agent = from`, and gain the secret tag when `mark_secret` is
    /// set. Returns how many memories were transferred; a filter that
    /// matches nothing is `Ok(0)`. Fails only when the source advisor is
    /// entirely unknown to the bank.
    pub fn transfer(
        &mut self,
        from: AgentId,
        to: AgentId,
        filter_tags: Option<&[String]>,
        degradation: f32,
        mark_secret: bool,
    ) -> Result<usize, CouncilError> {
        let matching: Vec<Memory> = match self.stores.get(&from) {
            Some(store) => store
                .iter()
                .filter(|m| filter_tags.map_or(true, |t| m.has_tags(t)))
                .cloned()
                .collect(),
            None => return Err(CouncilError::NotFound { id: from }),
        };

        let count = matching.len();
        let target = self.ensure_store(to);
        for mut copy in matching {
            copy.id = MemoryId::new();
            copy.owner = to;
            copy.reliability = (copy.reliability * degradation).clamp(0.0, 1.0);
            copy.source_agent = Some(from);
            if mark_secret {
                copy.tags.insert(SECRET_TAG.to_string());
            }
            target.add_memory(copy);
        }
        Ok(count)
    }

    /// Apply one decay step across every store.
    ///
    /// Returns the total number of memories forgotten this turn.
    pub fn decay_all(&mut self, current_turn: u32, forget_floor: f32) -> usize {
        self.stores
            .values_mut()
            .map(|s| s.decay_all(current_turn, forget_floor))
            .sum()
    }

    /// Look up an advisor's store without creating it.
    pub fn get_store(&self, agent: AgentId) -> Option<&AgentMemoryStore> {
        self.stores.get(&agent)
    }

    /// Look up a mutable store without creating it.
    pub fn get_store_mut(&mut self, agent: AgentId) -> Option<&mut AgentMemoryStore> {
        self.stores.get_mut(&agent)
    }

    /// Ids of every advisor holding a store.
    pub fn agent_ids(&self) -> Vec<AgentId> {
        let mut ids: Vec<AgentId> = self.stores.keys().copied().collect();
        ids.sort();
        ids
    }

    /// The civilization-wide shared memories.
    pub fn shared_memories(&self) -> &[Memory] {
        &self.shared
    }

    /// Total memories held across all stores (excluding the shared list).
    pub fn memory_count(&self) -> usize {
        self.stores.values().map(|s| s.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lazy_store_creation() {
        let mut bank = MemoryBank::new(100);
        let advisor = AgentId::new();

        assert!(bank.get_store(advisor).is_none());
        assert!(bank.recall(advisor, None, None, 0.1).is_empty());

        bank.store(
            advisor,
            Memory::new(advisor, EventKind::Decision, "First edict", 0.3, 1),
        );
        assert_eq!(bank.get_store(advisor).unwrap().len(), 1);
    }

    #[test]
    fn test_share_reaches_current_advisors_only() {
        let mut bank = MemoryBank::new(100);
        let early = AgentId::new();
        let late = AgentId::new();

        bank.ensure_store(early);
        bank.share(Memory::new(early, EventKind::Crisis, "Border raid", -0.7, 2));

        // Joins after the broadcast.
        bank.ensure_store(late);

        assert_eq!(bank.recall(early, None, None, 0.1).len(), 1);
        assert!(bank.recall(late, None, None, 0.1).is_empty());
        assert_eq!(bank.shared_memories().len(), 1);
    }

    #[test]
    fn test_broadcast_copies_are_owned_by_recipient() {
        let mut bank = MemoryBank::new(100);
        let a = AgentId::new();
        let b = AgentId::new();
        bank.ensure_store(a);
        bank.ensure_store(b);

        bank.share(Memory::new(a, EventKind::Policy, "New census", 0.2, 1));

        let b_copy = &bank.recall(b, None, None, 0.1)[0];
        assert_eq!(b_copy.owner, b);
    }

    #[test]
    fn test_transfer_degrades_and_marks_source() {
        let mut bank = MemoryBank::new(100);
        let spy = AgentId::new();
        let handler = AgentId::new();

        bank.store(
            spy,
            Memory::new(spy, EventKind::Intelligence, "Troop movements", 0.8, 3)
                .with_tag("military"),
        );

        let moved = bank
            .transfer(spy, handler, Some(&["military".to_string()]), 0.8, true)
            .unwrap();
        assert_eq!(moved, 1);

        let received = &bank.recall(handler, None, None, 0.1)[0];
        assert_eq!(received.source_agent, Some(spy));
        assert!(received.reliability < 1.0);
        assert!(received.tags.contains(SECRET_TAG));
        assert!(received.tags.contains("military"));

        // Original is untouched.
        let original = &bank.recall(spy, None, None, 0.1)[0];
        assert_eq!(original.reliability, 1.0);
        assert!(original.source_agent.is_none());
    }

    #[test]
    fn test_transfer_unknown_source_fails() {
        let mut bank = MemoryBank::new(100);
        let ghost = AgentId::new();
        let target = AgentId::new();

        let result = bank.transfer(ghost, target, None, 0.8, false);
        assert!(matches!(result, Err(CouncilError::NotFound { .. })));
    }

    #[test]
    fn test_transfer_empty_match_is_ok_zero() {
        let mut bank = MemoryBank::new(100);
        let from = AgentId::new();
        let to = AgentId::new();
        bank.store(
            from,
            Memory::new(from, EventKind::Ceremony, "Coronation", 0.5, 0),
        );

        let moved = bank
            .transfer(from, to, Some(&["no-such-tag".to_string()]), 0.8, false)
            .unwrap();
        assert_eq!(moved, 0);
    }

    #[test]
    fn test_bank_decay_counts_all_stores() {
        let mut bank = MemoryBank::new(100);
        let a = AgentId::new();
        let b = AgentId::new();

        bank.store(
            a,
            Memory::new(a, EventKind::Decision, "Fading edict", 0.2, 0).with_reliability(0.02),
        );
        bank.store(
            b,
            Memory::new(b, EventKind::Decision, "Fading rumor", 0.2, 0).with_reliability(0.02),
        );
        bank.store(b, Memory::new(b, EventKind::Crisis, "Fresh crisis", -0.9, 0));

        let forgotten = bank.decay_all(1, 0.01);
        assert_eq!(forgotten, 2);
        assert_eq!(bank.memory_count(), 1);
    }
}
