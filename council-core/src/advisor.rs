//! Council advisors and their registry.
//!
//! An advisor is tracked by [`AgentId`]; its personality traits (ambition,
//! loyalty, paranoia, influence) feed coup-motivation scoring. The
//! [`Council`] owns the registry and answers loyalty queries.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a council advisor.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct AgentId(pub Uuid);

impl AgentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AgentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A council member's political profile.
///
/// All trait values are in `[0, 1]` and are clamped on construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorProfile {
    /// Unique identifier.
    pub id: AgentId,
    /// Display name.
    pub name: String,
    /// Drive to seize power.
    pub ambition: f32,
    /// Loyalty to the current leader.
    pub loyalty: f32,
    /// Tendency to read threats into events.
    pub paranoia: f32,
    /// Sway over the rest of the council.
    pub influence: f32,
    /// Whether the advisor currently sits on the council.
    pub is_active: bool,
}

impl AdvisorProfile {
    /// Create a new advisor with neutral traits.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: AgentId::new(),
            name: name.into(),
            ambition: 0.5,
            loyalty: 0.5,
            paranoia: 0.5,
            influence: 0.5,
            is_active: true,
        }
    }

    /// Set ambition (clamped to `[0, 1]`).
    pub fn with_ambition(mut self, ambition: f32) -> Self {
        self.ambition = ambition.clamp(0.0, 1.0);
        self
    }

    /// Set loyalty (clamped to `[0, 1]`).
    pub fn with_loyalty(mut self, loyalty: f32) -> Self {
        self.loyalty = loyalty.clamp(0.0, 1.0);
        self
    }

    /// Set paranoia (clamped to `[0, 1]`).
    pub fn with_paranoia(mut self, paranoia: f32) -> Self {
        self.paranoia = paranoia.clamp(0.0, 1.0);
        self
    }

    /// Set influence (clamped to `[0, 1]`).
    pub fn with_influence(mut self, influence: f32) -> Self {
        self.influence = influence.clamp(0.0, 1.0);
        self
    }

    /// Adjust loyalty by a delta, clamped to `[0, 1]`.
    pub fn adjust_loyalty(&mut self, delta: f32) {
        self.loyalty = (self.loyalty + delta).clamp(0.0, 1.0);
    }

    /// Remove the advisor from active council business.
    pub fn retire(&mut self) {
        self.is_active = false;
    }
}

/// Registry of all advisors in one civilization's council.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Council {
    advisors: HashMap<AgentId, AdvisorProfile>,
}

impl Council {
    /// Create an empty council.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an advisor, returning its id.
    pub fn register(&mut self, profile: AdvisorProfile) -> AgentId {
        let id = profile.id;
        self.advisors.insert(id, profile);
        id
    }

    /// Look up an advisor by id.
    pub fn get(&self, id: AgentId) -> Option<&AdvisorProfile> {
        self.advisors.get(&id)
    }

    /// Look up a mutable advisor by id.
    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut AdvisorProfile> {
        self.advisors.get_mut(&id)
    }

    /// Whether an advisor is registered (active or not).
    pub fn contains(&self, id: AgentId) -> bool {
        self.advisors.contains_key(&id)
    }

    /// All currently active advisors.
    pub fn active(&self) -> Vec<&AdvisorProfile> {
        self.advisors.values().filter(|a| a.is_active).collect()
    }

    /// Ids of all currently active advisors, sorted for determinism.
    pub fn active_ids(&self) -> Vec<AgentId> {
        let mut ids: Vec<AgentId> = self
            .advisors
            .values()
            .filter(|a| a.is_active)
            .map(|a| a.id)
            .collect();
        ids.sort();
        ids
    }

    /// Loyalty of every active advisor.
    pub fn loyalty_report(&self) -> HashMap<AgentId, f32> {
        self.advisors
            .values()
            .filter(|a| a.is_active)
            .map(|a| (a.id, a.loyalty))
            .collect()
    }

    /// Total number of registered advisors.
    pub fn len(&self) -> usize {
        self.advisors.len()
    }

    /// Whether no advisors are registered.
    pub fn is_empty(&self) -> bool {
        self.advisors.is_empty()
    }
}
