//! Shared handle for serving concurrent callers.
//!
//! One civilization's engine is single-threaded by contract: all mutating
//! calls must be serialized. `SharedCouncil` enforces that boundary with a
//! read-write lock, so a game server can hand clones of the handle to
//! simultaneous tasks: mutations queue behind the write lock while
//! read-only report queries between turns run concurrently.

use crate::advisor::{AdvisorProfile, AgentId};
use crate::engine::CouncilEngine;
use crate::error::CouncilError;
use crate::memory::{EventKind, Memory, MemoryId};
use crate::risk::CoupRiskReport;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Cloneable, task-safe handle to one civilization's engine.
#[derive(Debug, Clone)]
pub struct SharedCouncil {
    inner: Arc<RwLock<CouncilEngine>>,
}

impl SharedCouncil {
    /// Wrap an engine in a shared handle.
    pub fn new(engine: CouncilEngine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    /// Register an advisor.
    pub async fn register_advisor(&self, profile: AdvisorProfile) -> AgentId {
        self.inner.write().await.register_advisor(profile)
    }

    /// Record an event into one advisor's memory.
    pub async fn remember(
        &self,
        agent: AgentId,
        kind: EventKind,
        content: impl Into<String>,
        emotional_impact: f32,
        turn: u32,
        tags: Vec<String>,
    ) -> Result<MemoryId, CouncilError> {
        self.inner
            .write()
            .await
            .remember(agent, kind, content.into(), emotional_impact, turn, tags)
    }

    /// Share a secret between two advisors.
    pub async fn share_secret(
        &self,
        teller: AgentId,
        listener: AgentId,
        content: impl Into<String>,
        turn: u32,
    ) -> Result<MemoryId, CouncilError> {
        self.inner
            .write()
            .await
            .share_secret(teller, listener, content.into(), turn)
    }

    /// Record an interaction between two advisors.
    pub async fn record_interaction(
        &self,
        a: AgentId,
        b: AgentId,
        outcome: f32,
        turn: u32,
    ) -> Result<(), CouncilError> {
        self.inner.write().await.record_interaction(a, b, outcome, turn)
    }

    /// Advance the civilization one turn and score coup risk.
    pub async fn advance_turn(&self, turn: u32) -> Result<CoupRiskReport, CouncilError> {
        self.inner.write().await.advance_turn(turn)
    }

    /// Recall an advisor's matching memories.
    pub async fn recall(
        &self,
        agent: AgentId,
        tags: Option<&[String]>,
        kind: Option<EventKind>,
    ) -> Vec<Memory> {
        self.inner.read().await.recall(agent, tags, kind)
    }

    /// Compute a fresh risk report from current state.
    pub async fn detect_coup_risk(&self) -> CoupRiskReport {
        self.inner.read().await.detect_coup_risk()
    }

    /// Loyalty of every active advisor.
    pub async fn loyalty_report(&self) -> HashMap<AgentId, f32> {
        self.inner.read().await.loyalty_report()
    }

    /// The most recently processed turn.
    pub async fn current_turn(&self) -> u32 {
        self.inner.read().await.current_turn()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shared_roundtrip() {
        let shared = SharedCouncil::new(CouncilEngine::new());
        let advisor = shared
            .register_advisor(AdvisorProfile::new("Minister Chen"))
            .await;

        shared
            .remember(
                advisor,
                EventKind::Decision,
                "Grain stores opened",
                0.4,
                1,
                vec!["famine".to_string()],
            )
            .await
            .unwrap();

        let report = shared.advance_turn(1).await.unwrap();
        assert_eq!(report.turn, 1);
        assert_eq!(shared.current_turn().await, 1);

        let recalled = shared.recall(advisor, None, None).await;
        assert_eq!(recalled.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_reads() {
        let shared = SharedCouncil::new(CouncilEngine::new());
        shared
            .register_advisor(AdvisorProfile::new("Minister Chen"))
            .await;
        shared.advance_turn(1).await.unwrap();

        let a = shared.clone();
        let b = shared.clone();
        let (first, second) = tokio::join!(a.detect_coup_risk(), b.detect_coup_risk());
        assert_eq!(first.risk_level, second.risk_level);
    }
}
