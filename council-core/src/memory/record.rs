//! Individual advisor memories.

use crate::advisor::AgentId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Tag applied to memories that arrived through secret-sharing.
pub const SECRET_TAG: &str = "secret";

/// Unique identifier for a memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemoryId(Uuid);

impl MemoryId {
    /// Create a new unique memory ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MemoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MemoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kinds of events an advisor can remember.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A ruling or policy decision.
    Decision,
    /// A crisis the council faced.
    Crisis,
    /// Plotting, rumored or witnessed.
    Conspiracy,
    /// Information gathered about another advisor.
    Intelligence,
    /// A dealing between two advisors.
    Relationship,
    /// An appointment, promotion, or demotion.
    Appointment,
    /// A broken oath or betrayal.
    Betrayal,
    /// A court ceremony or public occasion.
    Ceremony,
    /// An edict or law enacted.
    Policy,
}

impl EventKind {
    /// Get the display name for this event kind.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Decision => "Decision",
            EventKind::Crisis => "Crisis",
            EventKind::Conspiracy => "Conspiracy",
            EventKind::Intelligence => "Intelligence",
            EventKind::Relationship => "Relationship",
            EventKind::Appointment => "Appointment",
            EventKind::Betrayal => "Betrayal",
            EventKind::Ceremony => "Ceremony",
            EventKind::Policy => "Policy",
        }
    }

    /// Whether memories of this kind count toward threat assessment.
    pub fn is_threat_signal(&self) -> bool {
        matches!(
            self,
            EventKind::Conspiracy | EventKind::Intelligence | EventKind::Crisis
        )
    }
}

/// A single memory held by one advisor.
///
/// Reliability decays every turn and is reinforced by access; emotional
/// impact magnitude determines how memorable the record is. Both stay
/// clamped to their ranges for the life of the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Memory {
    /// Unique identifier.
    pub id: MemoryId,
    /// The advisor holding this memory.
    pub owner: AgentId,
    /// What kind of event this records.
    pub kind: EventKind,
    /// Free-text description of the event.
    pub content: String,
    /// Emotional weight in `[-1, 1]`; magnitude is how memorable it is.
    pub emotional_impact: f32,
    /// Confidence the memory is accurate, in `[0, 1]`.
    pub reliability: f32,
    /// Turn the memory was formed.
    pub created_turn: u32,
    /// Turn the memory was last recalled.
    pub last_accessed_turn: u32,
    /// Per-turn reliability loss.
    pub decay_rate: f32,
    /// Topical tags, including ids of advisors the event concerns.
    pub tags: HashSet<String>,
    /// Set only when the memory arrived secondhand from another advisor.
    pub source_agent: Option<AgentId>,
}

impl Memory {
    /// Create a new firsthand memory at full reliability.
    ///
    /// Emotional impact is clamped to `[-1, 1]`.
    pub fn new(
        owner: AgentId,
        kind: EventKind,
        content: impl Into<String>,
        emotional_impact: f32,
        current_turn: u32,
    ) -> Self {
        Self {
            id: MemoryId::new(),
            owner,
            kind,
            content: content.into(),
            emotional_impact: emotional_impact.clamp(-1.0, 1.0),
            reliability: 1.0,
            created_turn: current_turn,
            last_accessed_turn: current_turn,
            decay_rate: 0.02,
            tags: HashSet::new(),
            source_agent: None,
        }
    }

    /// Add a topical tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Add several topical tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Set the per-turn decay rate (clamped to `[0, 1]`).
    pub fn with_decay_rate(mut self, rate: f32) -> Self {
        self.decay_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Start the memory degraded rather than at full reliability.
    pub fn with_reliability(mut self, reliability: f32) -> Self {
        self.reliability = reliability.clamp(0.0, 1.0);
        self
    }

    /// Mark the memory as received secondhand from another advisor.
    pub fn with_source(mut self, source: AgentId) -> Self {
        self.source_agent = Some(source);
        self
    }

    /// Ranking score used for compression: `|impact| × reliability`.
    pub fn importance(&self) -> f32 {
        self.emotional_impact.abs() * self.reliability
    }

    /// Apply one decay step; reliability floors at 0.
    pub fn decay(&mut self) {
        self.reliability = (self.reliability - self.decay_rate).max(0.0);
    }

    /// Whether the memory has faded past the forget floor.
    pub fn is_forgotten(&self, forget_floor: f32) -> bool {
        self.reliability <= forget_floor
    }

    /// Recall the memory: reinforce reliability and note the access turn.
    pub fn access(&mut self, current_turn: u32, reinforcement: f32) {
        self.last_accessed_turn = current_turn;
        self.reliability = (self.reliability + reinforcement).min(1.0);
    }

    /// Whether the memory carries every one of the requested tags.
    pub fn has_tags(&self, tags: &[String]) -> bool {
        tags.iter().all(|t| self.tags.contains(t))
    }

    /// Whether the memory's tags reference the given advisor.
    pub fn references(&self, agent: AgentId) -> bool {
        self.tags.contains(&agent.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_creation_clamps_impact() {
        let owner = AgentId::new();
        let memory = Memory::new(owner, EventKind::Crisis, "The granary burned", -3.0, 4);

        assert_eq!(memory.emotional_impact, -1.0);
        assert_eq!(memory.reliability, 1.0);
        assert_eq!(memory.created_turn, 4);
        assert!(memory.source_agent.is_none());
    }

    #[test]
    fn test_importance() {
        let owner = AgentId::new();
        let memory = Memory::new(owner, EventKind::Decision, "Taxes raised", -0.5, 0)
            .with_reliability(0.8);

        assert!((memory.importance() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_decay_floors_at_zero() {
        let owner = AgentId::new();
        let mut memory = Memory::new(owner, EventKind::Ceremony, "Harvest festival", 0.2, 0)
            .with_decay_rate(0.6);

        memory.decay();
        memory.decay();
        assert_eq!(memory.reliability, 0.0);
        assert!(memory.is_forgotten(0.01));
    }

    #[test]
    fn test_access_reinforces_and_caps() {
        let owner = AgentId::new();
        let mut memory = Memory::new(owner, EventKind::Intelligence, "Spy report", 0.7, 1)
            .with_reliability(0.99);

        memory.access(6, 0.05);
        assert_eq!(memory.reliability, 1.0);
        assert_eq!(memory.last_accessed_turn, 6);

        // Repeated access cannot exceed the cap.
        memory.access(7, 0.05);
        assert_eq!(memory.reliability, 1.0);
    }

    #[test]
    fn test_tag_matching() {
        let owner = AgentId::new();
        let subject = AgentId::new();
        let memory = Memory::new(owner, EventKind::Conspiracy, "Whispers at court", 0.4, 2)
            .with_tag(subject.to_string())
            .with_tag("court");

        assert!(memory.references(subject));
        assert!(memory.has_tags(&["court".to_string()]));
        assert!(memory.has_tags(&["court".to_string(), subject.to_string()]));
        assert!(!memory.has_tags(&["granary".to_string()]));
    }

    #[test]
    fn test_threat_signal_kinds() {
        assert!(EventKind::Conspiracy.is_threat_signal());
        assert!(EventKind::Intelligence.is_threat_signal());
        assert!(EventKind::Crisis.is_threat_signal());
        assert!(!EventKind::Ceremony.is_threat_signal());
        assert!(!EventKind::Decision.is_threat_signal());
    }
}
