//! Testing utilities for council scenarios.
//!
//! This module provides tools for integration testing:
//! - `CouncilHarness` for scripted political scenarios
//! - Assertion helpers for verifying risk reports
//!
//! Harness methods panic on engine errors; they are meant for tests where
//! a failed setup call is itself a test failure.

use crate::advisor::{AdvisorProfile, AgentId};
use crate::engine::CouncilEngine;
use crate::memory::EventKind;
use crate::risk::{CoupRiskReport, RiskLevel};

/// A scripted council scenario driven turn by turn.
pub struct CouncilHarness {
    /// The engine under test.
    pub engine: CouncilEngine,
    /// The harness's turn clock.
    turn: u32,
}

impl CouncilHarness {
    /// Create a harness with a fresh engine at turn zero.
    pub fn new() -> Self {
        Self {
            engine: CouncilEngine::new(),
            turn: 0,
        }
    }

    /// Create a harness around a preconfigured engine.
    pub fn with_engine(engine: CouncilEngine) -> Self {
        Self { engine, turn: 0 }
    }

    /// Register an advisor with explicit traits.
    pub fn add_advisor(
        &mut self,
        name: &str,
        ambition: f32,
        loyalty: f32,
        paranoia: f32,
        influence: f32,
    ) -> AgentId {
        self.engine.register_advisor(
            AdvisorProfile::new(name)
                .with_ambition(ambition)
                .with_loyalty(loyalty)
                .with_paranoia(paranoia)
                .with_influence(influence),
        )
    }

    /// Record an event at the current turn.
    pub fn remember(
        &mut self,
        agent: AgentId,
        kind: EventKind,
        content: &str,
        emotional_impact: f32,
        tags: &[&str],
    ) {
        self.engine
            .remember(
                agent,
                kind,
                content,
                emotional_impact,
                self.turn,
                tags.iter().map(|t| t.to_string()).collect(),
            )
            .expect("harness remember failed");
    }

    /// Share a secret at the current turn.
    pub fn share_secret(&mut self, teller: AgentId, listener: AgentId, content: &str) {
        self.engine
            .share_secret(teller, listener, content, self.turn)
            .expect("harness share_secret failed");
    }

    /// Record an interaction at the current turn.
    pub fn interact(&mut self, a: AgentId, b: AgentId, outcome: f32) {
        self.engine
            .record_interaction(a, b, outcome, self.turn)
            .expect("harness interaction failed");
    }

    /// Advance one turn and return the risk report.
    pub fn run_turn(&mut self) -> CoupRiskReport {
        self.turn += 1;
        self.engine
            .advance_turn(self.turn)
            .expect("harness advance_turn failed")
    }

    /// Advance several turns, returning the last report.
    pub fn run_turns(&mut self, count: u32) -> CoupRiskReport {
        let mut report = self.run_turn();
        for _ in 1..count {
            report = self.run_turn();
        }
        report
    }

    /// The harness's current turn.
    pub fn turn(&self) -> u32 {
        self.turn
    }
}

impl Default for CouncilHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Assert that a report flags the given advisor as a potential conspirator.
pub fn assert_flagged(report: &CoupRiskReport, agent: AgentId) {
    assert!(
        report.is_flagged(agent),
        "Expected advisor {agent} to be flagged as a conspirator"
    );
}

/// Assert that a report does NOT flag the given advisor.
pub fn assert_not_flagged(report: &CoupRiskReport, agent: AgentId) {
    assert!(
        !report.is_flagged(agent),
        "Expected advisor {agent} to NOT be flagged as a conspirator"
    );
}

/// Assert the report's overall risk level.
pub fn assert_risk_level(report: &CoupRiskReport, expected: RiskLevel) {
    assert_eq!(
        report.risk_level,
        expected,
        "Expected risk level {}, got {}",
        expected.name(),
        report.risk_level.name()
    );
}

/// Assert that some conspiracy network contains all the given advisors.
pub fn assert_network_containing(report: &CoupRiskReport, members: &[AgentId]) {
    assert!(
        report
            .networks
            .iter()
            .any(|n| members.iter().all(|m| n.contains(*m))),
        "Expected a conspiracy network containing all of {members:?}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_advances_clock() {
        let mut harness = CouncilHarness::new();
        harness.add_advisor("Minister Chen", 0.3, 0.8, 0.2, 0.4);

        let report = harness.run_turns(3);
        assert_eq!(harness.turn(), 3);
        assert_eq!(report.turn, 3);
    }

    #[test]
    fn test_harness_scenario_helpers() {
        let mut harness = CouncilHarness::new();
        let a = harness.add_advisor("General Zhao", 0.9, 0.1, 0.5, 0.6);
        let b = harness.add_advisor("Minister Qin", 0.8, 0.2, 0.5, 0.55);

        harness.share_secret(a, b, "The armory is unguarded");
        harness.interact(a, b, 0.9);
        let report = harness.run_turn();

        assert_flagged(&report, a);
        assert_flagged(&report, b);
    }
}
