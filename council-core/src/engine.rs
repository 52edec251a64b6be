//! CouncilEngine - the primary public API for one civilization.
//!
//! Wraps the advisor registry, memory bank, relationship graph, and risk
//! scoring into a single facade the turn driver calls. A turn advances
//! through fixed phases: decay, then relationship updates, then scoring;
//! scoring always reads the fully updated state from the same turn.

use crate::advisor::{AdvisorProfile, AgentId, Council};
use crate::config::TuningConfig;
use crate::error::{ensure_finite, CouncilError};
use crate::memory::{EventKind, Memory, MemoryBank, MemoryId, SECRET_TAG};
use crate::relationship::{Relationship, RelationshipGraph};
use crate::risk::{self, CoupRiskReport};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Where the engine sits inside a turn.
///
/// Phases are strictly sequential; a turn never loops back. Between turns
/// the engine rests at `Idle` (before the first turn) or `Reported`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    Idle,
    Decaying,
    UpdatingRelationships,
    Scoring,
    Reported,
}

impl TurnPhase {
    /// Get the display name for this phase.
    pub fn name(&self) -> &'static str {
        match self {
            TurnPhase::Idle => "Idle",
            TurnPhase::Decaying => "Decaying",
            TurnPhase::UpdatingRelationships => "Updating-Relationships",
            TurnPhase::Scoring => "Scoring",
            TurnPhase::Reported => "Reported",
        }
    }
}

impl fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The council politics engine for one civilization.
///
/// Single-threaded by design: all mutating calls for one civilization go
/// through one engine instance, and independent civilizations each own an
/// engine with no shared state. See [`crate::shared::SharedCouncil`] for
/// serving concurrent external callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouncilEngine {
    config: TuningConfig,
    council: Council,
    bank: MemoryBank,
    graph: RelationshipGraph,
    current_turn: u32,
    phase: TurnPhase,
    /// Memories created at or after this turn have not yet driven
    /// relationship updates.
    relationship_cursor: u32,
}

impl CouncilEngine {
    /// Create an engine with the default calibration.
    pub fn new() -> Self {
        let config = TuningConfig::default();
        let capacity = config.memory_capacity;
        Self {
            config,
            council: Council::new(),
            bank: MemoryBank::new(capacity),
            graph: RelationshipGraph::new(),
            current_turn: 0,
            phase: TurnPhase::Idle,
            relationship_cursor: 0,
        }
    }

    /// Create an engine with a custom calibration.
    ///
    /// Fails with `InvalidRange` if any parameter is outside its legal
    /// range; a bad calibration surfaces here, never turns later.
    pub fn with_config(config: TuningConfig) -> Result<Self, CouncilError> {
        config.validate()?;
        let capacity = config.memory_capacity;
        Ok(Self {
            config,
            council: Council::new(),
            bank: MemoryBank::new(capacity),
            graph: RelationshipGraph::new(),
            current_turn: 0,
            phase: TurnPhase::Idle,
            relationship_cursor: 0,
        })
    }

    // =========================================================================
    // Registry
    // =========================================================================

    /// Register an advisor and open its memory store.
    ///
    /// The store is opened eagerly so broadcasts reach every registered
    /// advisor from this moment on.
    pub fn register_advisor(&mut self, profile: AdvisorProfile) -> AgentId {
        let id = self.council.register(profile);
        self.bank.ensure_store(id);
        id
    }

    /// Look up an advisor's profile.
    pub fn advisor(&self, id: AgentId) -> Option<&AdvisorProfile> {
        self.council.get(id)
    }

    /// Look up a mutable advisor profile.
    pub fn advisor_mut(&mut self, id: AgentId) -> Option<&mut AdvisorProfile> {
        self.council.get_mut(id)
    }

    /// The advisor registry.
    pub fn council(&self) -> &Council {
        &self.council
    }

    fn require_agent(&self, id: AgentId) -> Result<(), CouncilError> {
        if self.council.contains(id) {
            Ok(())
        } else {
            Err(CouncilError::NotFound { id })
        }
    }

    // =========================================================================
    // Inbound events
    // =========================================================================

    /// Record an event into one advisor's memory.
    ///
    /// Emotional impact must be finite (it is clamped to `[-1, 1]`); the
    /// advisor must be registered. Returns the new memory's id.
    pub fn remember(
        &mut self,
        agent: AgentId,
        kind: EventKind,
        content: impl Into<String>,
        emotional_impact: f32,
        turn: u32,
        tags: Vec<String>,
    ) -> Result<MemoryId, CouncilError> {
        self.require_agent(agent)?;
        let impact = ensure_finite("emotional_impact", emotional_impact)?;

        let memory = Memory::new(agent, kind, content, impact, turn)
            .with_decay_rate(self.config.default_decay_rate)
            .with_tags(tags);
        let id = memory.id;
        self.bank.store(agent, memory);
        Ok(id)
    }

    /// Share a secret between two advisors.
    ///
    /// The teller keeps a firsthand conspiracy memory; the listener gets a
    /// degraded secondhand copy sourced from the teller. The pair's trust
    /// and conspiracy level both rise. Returns the teller's memory id.
    pub fn share_secret(
        &mut self,
        teller: AgentId,
        listener: AgentId,
        content: impl Into<String>,
        turn: u32,
    ) -> Result<MemoryId, CouncilError> {
        self.require_agent(teller)?;
        self.require_agent(listener)?;
        let content = content.into();

        let told = Memory::new(
            teller,
            EventKind::Conspiracy,
            content.clone(),
            self.config.secret_emotional_impact,
            turn,
        )
        .with_decay_rate(self.config.default_decay_rate)
        .with_tag(SECRET_TAG)
        .with_tag(listener.to_string());
        let id = told.id;

        let heard = Memory::new(
            listener,
            EventKind::Conspiracy,
            content,
            self.config.secret_emotional_impact,
            turn,
        )
        .with_decay_rate(self.config.default_decay_rate)
        .with_reliability(self.config.transfer_degradation)
        .with_source(teller)
        .with_tag(SECRET_TAG)
        .with_tag(teller.to_string());

        self.bank.store(teller, told);
        self.bank.store(listener, heard);
        self.graph
            .record_secret_share(teller, listener, id.to_string(), turn, &self.config);
        Ok(id)
    }

    /// Record an interaction between two advisors.
    ///
    /// `outcome` is in `[-1, 1]` (clamped; must be finite): positive for
    /// cooperative dealings, negative for clashes.
    pub fn record_interaction(
        &mut self,
        a: AgentId,
        b: AgentId,
        outcome: f32,
        turn: u32,
    ) -> Result<(), CouncilError> {
        self.require_agent(a)?;
        self.require_agent(b)?;
        let outcome = ensure_finite("interaction_outcome", outcome)?;
        self.graph.record_interaction(a, b, outcome, turn, &self.config);
        Ok(())
    }

    /// Broadcast an event to every current advisor.
    ///
    /// The originator must be registered; each advisor receives their own
    /// copy of the memory.
    pub fn broadcast(
        &mut self,
        origin: AgentId,
        kind: EventKind,
        content: impl Into<String>,
        emotional_impact: f32,
        turn: u32,
        tags: Vec<String>,
    ) -> Result<(), CouncilError> {
        self.require_agent(origin)?;
        let impact = ensure_finite("emotional_impact", emotional_impact)?;

        let memory = Memory::new(origin, kind, content, impact, turn)
            .with_decay_rate(self.config.default_decay_rate)
            .with_tags(tags);
        self.bank.share(memory);
        Ok(())
    }

    /// Copy matching memories from one advisor to another, degraded.
    ///
    /// Returns the number of memories transferred; a filter matching
    /// nothing transfers zero without error.
    pub fn transfer_memories(
        &mut self,
        from: AgentId,
        to: AgentId,
        filter_tags: Option<&[String]>,
    ) -> Result<usize, CouncilError> {
        self.require_agent(from)?;
        self.require_agent(to)?;
        self.bank.transfer(
            from,
            to,
            filter_tags,
            self.config.transfer_degradation,
            false,
        )
    }

    /// Reinforce one memory by recalling it explicitly.
    pub fn access_memory(
        &mut self,
        agent: AgentId,
        memory: MemoryId,
        turn: u32,
    ) -> Result<bool, CouncilError> {
        self.require_agent(agent)?;
        let reinforcement = self.config.access_reinforcement;
        Ok(self
            .bank
            .get_store_mut(agent)
            .map(|s| s.access(memory, turn, reinforcement))
            .unwrap_or(false))
    }

    // =========================================================================
    // Turn processing
    // =========================================================================

    /// Advance the civilization to `turn` and score coup risk.
    ///
    /// Runs the full phase sequence: decay every store, fold new memories
    /// into the relationship graph, then compute the risk report. The turn
    /// number must not move backwards. All validation happens before any
    /// mutation, so a failed call leaves the engine untouched.
    pub fn advance_turn(&mut self, turn: u32) -> Result<CoupRiskReport, CouncilError> {
        if turn < self.current_turn {
            return Err(CouncilError::invalid_range("turn", turn as f64));
        }
        self.current_turn = turn;

        self.phase = TurnPhase::Decaying;
        self.bank.decay_all(turn, self.config.forget_floor);

        self.phase = TurnPhase::UpdatingRelationships;
        let known = self.council.active_ids();
        let cursor = self.relationship_cursor;
        for agent in self.bank.agent_ids() {
            let fresh: Vec<Memory> = match self.bank.get_store(agent) {
                Some(store) => store
                    .iter()
                    .filter(|m| m.created_turn >= cursor && m.created_turn <= turn)
                    .cloned()
                    .collect(),
                None => Vec::new(),
            };
            for memory in &fresh {
                self.graph
                    .update_from_memory(agent, memory, &known, turn, &self.config);
            }
        }
        self.relationship_cursor = turn + 1;

        self.phase = TurnPhase::Scoring;
        let report = risk::detect_coup_risk(
            &self.council,
            &self.bank,
            &self.graph,
            turn,
            &self.config,
        );

        self.phase = TurnPhase::Reported;
        Ok(report)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Recall an advisor's matching memories.
    pub fn recall(
        &self,
        agent: AgentId,
        tags: Option<&[String]>,
        kind: Option<EventKind>,
    ) -> Vec<Memory> {
        self.bank
            .recall(agent, tags, kind, self.config.min_recall_reliability)
    }

    /// The relationship record for a pair, if any interaction has occurred.
    pub fn get_relationship(&self, a: AgentId, b: AgentId) -> Option<&Relationship> {
        self.graph.get(a, b)
    }

    /// Compute a fresh risk report from current state without advancing.
    pub fn detect_coup_risk(&self) -> CoupRiskReport {
        risk::detect_coup_risk(
            &self.council,
            &self.bank,
            &self.graph,
            self.current_turn,
            &self.config,
        )
    }

    /// Loyalty of every active advisor.
    pub fn loyalty_report(&self) -> HashMap<AgentId, f32> {
        self.council.loyalty_report()
    }

    /// The most recently processed turn.
    pub fn current_turn(&self) -> u32 {
        self.current_turn
    }

    /// Where the engine sits in the turn cycle.
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// The active calibration.
    pub fn config(&self) -> &TuningConfig {
        &self.config
    }

    /// Total memories held across all advisors.
    pub fn memory_count(&self) -> usize {
        self.bank.memory_count()
    }

    /// Number of relationship records.
    pub fn relationship_count(&self) -> usize {
        self.graph.len()
    }

    /// The memory bank (read-only).
    pub fn bank(&self) -> &MemoryBank {
        &self.bank
    }

    /// The relationship graph (read-only).
    pub fn graph(&self) -> &RelationshipGraph {
        &self.graph
    }
}

impl Default for CouncilEngine {
    fn default() -> Self {
        Self::new()
    }
}
