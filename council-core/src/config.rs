//! Tuning configuration for the council engine.
//!
//! Every threshold and increment the scoring model uses lives here rather
//! than as a hard-coded constant, so callers can recalibrate the simulation
//! without touching engine code. The defaults carry the calibration the
//! engine was tuned against.

use crate::error::{ensure_in_range, CouncilError};
use serde::{Deserialize, Serialize};

/// Weights for the coup-motivation score.
///
/// Motivation is the weighted sum of ambition, disloyalty (`1 - loyalty`),
/// paranoia, influence, and recalled threat, clamped to `[0, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotivationWeights {
    pub ambition: f32,
    pub disloyalty: f32,
    pub paranoia: f32,
    pub influence: f32,
    pub threat: f32,
}

impl Default for MotivationWeights {
    fn default() -> Self {
        Self {
            ambition: 0.3,
            disloyalty: 0.3,
            paranoia: 0.15,
            influence: 0.1,
            threat: 0.15,
        }
    }
}

impl MotivationWeights {
    fn validate(&self) -> Result<(), CouncilError> {
        ensure_in_range("weights.ambition", self.ambition, 0.0, 1.0)?;
        ensure_in_range("weights.disloyalty", self.disloyalty, 0.0, 1.0)?;
        ensure_in_range("weights.paranoia", self.paranoia, 0.0, 1.0)?;
        ensure_in_range("weights.influence", self.influence, 0.0, 1.0)?;
        ensure_in_range("weights.threat", self.threat, 0.0, 1.0)?;
        Ok(())
    }
}

/// All tunable parameters of the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuningConfig {
    /// Maximum memories one advisor retains before compression.
    pub memory_capacity: usize,
    /// Per-turn reliability loss applied to new memories.
    pub default_decay_rate: f32,
    /// Memories at or below this reliability are forgotten.
    pub forget_floor: f32,
    /// Reliability gained each time a memory is accessed.
    pub access_reinforcement: f32,
    /// Minimum reliability for a memory to surface in recall.
    pub min_recall_reliability: f32,
    /// Reliability multiplier for secondhand (transferred) memories.
    pub transfer_degradation: f32,
    /// Emotional impact attached to shared secrets.
    pub secret_emotional_impact: f32,
    /// Scale on memory-driven trust nudges.
    pub memory_trust_scale: f32,
    /// Scale on interaction-outcome trust changes.
    pub interaction_trust_scale: f32,
    /// Influence gained per unit of interaction intensity.
    pub interaction_influence_gain: f32,
    /// Trust gained when a secret is shared.
    pub secret_trust_bonus: f32,
    /// Conspiracy level gained when a secret is shared.
    pub secret_conspiracy_bonus: f32,
    /// Minimum trust for a conspiracy edge.
    pub trust_threshold: f32,
    /// Minimum conspiracy level for a conspiracy edge.
    pub conspiracy_threshold: f32,
    /// Motivation at or above which an advisor is flagged.
    pub motivation_threshold: f32,
    /// Influence at or above which an advisor is watched regardless of motivation.
    pub influence_floor: f32,
    /// Total conspirator influence past which risk escalates to HIGH.
    pub influence_high_water: f32,
    /// Average council loyalty below which risk escalates to HIGH.
    pub loyalty_low_water: f32,
    /// How quickly old memories stop counting toward threat scores.
    pub threat_recency_falloff: f32,
    /// Coup-motivation weights.
    pub weights: MotivationWeights,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            memory_capacity: 1000,
            default_decay_rate: 0.02,
            forget_floor: 0.01,
            access_reinforcement: 0.01,
            min_recall_reliability: 0.1,
            transfer_degradation: 0.8,
            secret_emotional_impact: 0.6,
            memory_trust_scale: 0.3,
            interaction_trust_scale: 0.2,
            interaction_influence_gain: 0.05,
            secret_trust_bonus: 0.1,
            secret_conspiracy_bonus: 0.15,
            trust_threshold: 0.5,
            conspiracy_threshold: 0.5,
            motivation_threshold: 0.6,
            influence_floor: 0.8,
            influence_high_water: 1.5,
            loyalty_low_water: 0.3,
            threat_recency_falloff: 0.1,
            weights: MotivationWeights::default(),
        }
    }
}

impl TuningConfig {
    /// Check every parameter against its legal range.
    ///
    /// Called once at engine construction so a bad calibration surfaces
    /// immediately instead of corrupting invariants turns later.
    pub fn validate(&self) -> Result<(), CouncilError> {
        if self.memory_capacity == 0 {
            return Err(CouncilError::invalid_range("memory_capacity", 0.0));
        }
        ensure_in_range("default_decay_rate", self.default_decay_rate, 0.0, 1.0)?;
        ensure_in_range("forget_floor", self.forget_floor, 0.0, 1.0)?;
        ensure_in_range("access_reinforcement", self.access_reinforcement, 0.0, 1.0)?;
        ensure_in_range(
            "min_recall_reliability",
            self.min_recall_reliability,
            0.0,
            1.0,
        )?;
        ensure_in_range("transfer_degradation", self.transfer_degradation, 0.0, 1.0)?;
        ensure_in_range(
            "secret_emotional_impact",
            self.secret_emotional_impact,
            -1.0,
            1.0,
        )?;
        ensure_in_range("memory_trust_scale", self.memory_trust_scale, 0.0, 1.0)?;
        ensure_in_range(
            "interaction_trust_scale",
            self.interaction_trust_scale,
            0.0,
            1.0,
        )?;
        ensure_in_range(
            "interaction_influence_gain",
            self.interaction_influence_gain,
            0.0,
            1.0,
        )?;
        ensure_in_range("secret_trust_bonus", self.secret_trust_bonus, 0.0, 1.0)?;
        ensure_in_range(
            "secret_conspiracy_bonus",
            self.secret_conspiracy_bonus,
            0.0,
            1.0,
        )?;
        ensure_in_range("trust_threshold", self.trust_threshold, -1.0, 1.0)?;
        ensure_in_range("conspiracy_threshold", self.conspiracy_threshold, 0.0, 1.0)?;
        ensure_in_range("motivation_threshold", self.motivation_threshold, 0.0, 1.0)?;
        ensure_in_range("influence_floor", self.influence_floor, 0.0, 1.0)?;
        if !self.influence_high_water.is_finite() || self.influence_high_water < 0.0 {
            return Err(CouncilError::invalid_range(
                "influence_high_water",
                self.influence_high_water as f64,
            ));
        }
        ensure_in_range("loyalty_low_water", self.loyalty_low_water, 0.0, 1.0)?;
        if !self.threat_recency_falloff.is_finite() || self.threat_recency_falloff < 0.0 {
            return Err(CouncilError::invalid_range(
                "threat_recency_falloff",
                self.threat_recency_falloff as f64,
            ));
        }
        self.weights.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(TuningConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = TuningConfig {
            memory_capacity: 0,
            ..TuningConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let config = TuningConfig {
            motivation_threshold: f32::NAN,
            ..TuningConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_decay_rejected() {
        let config = TuningConfig {
            default_decay_rate: -0.1,
            ..TuningConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
