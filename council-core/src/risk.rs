//! Coup-risk scoring.
//!
//! Combines per-advisor motivation (ambition, disloyalty, paranoia,
//! influence, recalled threat) with conspiracy-network detection over the
//! relationship graph into a categorical per-turn risk report. Every
//! function here is a pure read over current state.

use crate::advisor::{AdvisorProfile, AgentId, Council};
use crate::config::{MotivationWeights, TuningConfig};
use crate::memory::{AgentMemoryStore, MemoryBank};
use crate::relationship::{ConspiracyNetwork, RelationshipGraph};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Categorical council-wide coup danger for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Get the display name for this risk level.
    pub fn name(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

/// Point-in-time coup risk assessment, recomputed fresh every turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoupRiskReport {
    /// Turn the report was computed for.
    pub turn: u32,
    /// Coup motivation per active advisor, in `[0, 1]`.
    pub motivations: HashMap<AgentId, f32>,
    /// Advisors flagged as potential conspirators, sorted.
    pub conspirators: Vec<AgentId>,
    /// Detected conspiracy cells among the flagged advisors.
    pub networks: Vec<ConspiracyNetwork>,
    /// Sum of flagged advisors' influence.
    pub total_conspirator_influence: f32,
    /// Mean loyalty across all active advisors (1.0 for an empty council).
    pub average_loyalty: f32,
    /// Overall risk category.
    pub risk_level: RiskLevel,
}

impl CoupRiskReport {
    /// Whether the given advisor was flagged as a potential conspirator.
    pub fn is_flagged(&self, agent: AgentId) -> bool {
        self.conspirators.contains(&agent)
    }

    /// The motivation computed for an advisor, if it was active this turn.
    pub fn motivation(&self, agent: AgentId) -> Option<f32> {
        self.motivations.get(&agent).copied()
    }
}

/// Weighted coup-motivation score for one advisor, clamped to `[0, 1]`.
///
/// `threat_level` is the aggregate personal threat recalled from memory,
/// already clamped to `[0, 1]` by the caller.
pub fn coup_motivation(
    advisor: &AdvisorProfile,
    threat_level: f32,
    weights: &MotivationWeights,
) -> f32 {
    let score = weights.ambition * advisor.ambition
        + weights.disloyalty * (1.0 - advisor.loyalty)
        + weights.paranoia * advisor.paranoia
        + weights.influence * advisor.influence
        + weights.threat * threat_level;
    score.clamp(0.0, 1.0)
}

/// Per-source threat scores recalled from one advisor's memory.
///
/// Scans memories whose kind is a threat signal (conspiracy, intelligence,
/// crisis) and whose tags name another known advisor; each contributes
/// `|impact| × reliability × recency_weight` against the advisor it names.
/// The result is sorted by score, highest threat first.
pub fn assess_threat(
    advisor: AgentId,
    store: Option<&AgentMemoryStore>,
    known_agents: &[AgentId],
    current_turn: u32,
    config: &TuningConfig,
) -> Vec<(AgentId, f32)> {
    let store = match store {
        Some(store) => store,
        None => return Vec::new(),
    };

    let mut scores: HashMap<AgentId, f32> = HashMap::new();
    for memory in store.iter() {
        if !memory.kind.is_threat_signal() {
            continue;
        }
        let age = current_turn.saturating_sub(memory.created_turn);
        let recency = 1.0 / (1.0 + config.threat_recency_falloff * age as f32);
        let contribution = memory.emotional_impact.abs() * memory.reliability * recency;
        if contribution <= 0.0 {
            continue;
        }
        for &other in known_agents {
            if other != advisor && memory.references(other) {
                *scores.entry(other).or_insert(0.0) += contribution;
            }
        }
    }

    let mut ranked: Vec<(AgentId, f32)> = scores.into_iter().collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    ranked
}

/// Compute the full coup risk report for the council's current state.
///
/// Never mutates anything; an empty council yields `Low` with empty sets.
pub fn detect_coup_risk(
    council: &Council,
    bank: &MemoryBank,
    graph: &RelationshipGraph,
    current_turn: u32,
    config: &TuningConfig,
) -> CoupRiskReport {
    let active = council.active();
    let known: Vec<AgentId> = active.iter().map(|a| a.id).collect();

    let mut motivations: HashMap<AgentId, f32> = HashMap::new();
    let mut flagged: HashSet<AgentId> = HashSet::new();

    for advisor in &active {
        let threats = assess_threat(
            advisor.id,
            bank.get_store(advisor.id),
            &known,
            current_turn,
            config,
        );
        let threat_level = threats.iter().map(|(_, s)| s).sum::<f32>().min(1.0);
        let motivation = coup_motivation(advisor, threat_level, &config.weights);
        motivations.insert(advisor.id, motivation);

        if motivation >= config.motivation_threshold || advisor.influence >= config.influence_floor
        {
            flagged.insert(advisor.id);
        }
    }

    let networks = graph.conspiracy_components(
        config.trust_threshold,
        config.conspiracy_threshold,
        Some(&flagged),
    );

    let total_conspirator_influence: f32 = active
        .iter()
        .filter(|a| flagged.contains(&a.id))
        .map(|a| a.influence)
        .sum();

    let average_loyalty = if active.is_empty() {
        1.0
    } else {
        active.iter().map(|a| a.loyalty).sum::<f32>() / active.len() as f32
    };

    let has_cell = networks.iter().any(|n| n.size() >= 2);
    let escalated = total_conspirator_influence > config.influence_high_water
        || average_loyalty < config.loyalty_low_water;

    let risk_level = if escalated && has_cell {
        RiskLevel::High
    } else if !flagged.is_empty() {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    let mut conspirators: Vec<AgentId> = flagged.into_iter().collect();
    conspirators.sort();

    CoupRiskReport {
        turn: current_turn,
        motivations,
        conspirators,
        networks,
        total_conspirator_influence,
        average_loyalty,
        risk_level,
    }
}
