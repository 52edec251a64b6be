//! Council politics engine.
//!
//! This crate provides:
//! - Per-advisor bounded memory stores with decay and importance ranking
//! - A relationship graph evolving from memories and interactions
//! - Conspiracy-network detection and per-turn coup-risk reports
//! - A turn-driven engine facade with a fixed phase sequence
//!
//! # Quick Start
//!
//! ```
//! use council_core::{AdvisorProfile, CouncilEngine, EventKind};
//!
//! # fn main() -> Result<(), council_core::CouncilError> {
//! let mut engine = CouncilEngine::new();
//!
//! let zhao = engine.register_advisor(
//!     AdvisorProfile::new("General Zhao")
//!         .with_ambition(0.9)
//!         .with_loyalty(0.1),
//! );
//! let qin = engine.register_advisor(AdvisorProfile::new("Minister Qin"));
//!
//! engine.share_secret(zhao, qin, "The palace guard can be bought", 1)?;
//! engine.record_interaction(zhao, qin, 0.8, 1)?;
//!
//! let report = engine.advance_turn(1)?;
//! println!("coup risk: {}", report.risk_level.name());
//! # Ok(())
//! # }
//! ```

pub mod advisor;
pub mod config;
pub mod engine;
pub mod error;
pub mod memory;
pub mod relationship;
pub mod risk;
pub mod shared;
pub mod testing;

// Primary public API
pub use advisor::{AdvisorProfile, AgentId, Council};
pub use config::{MotivationWeights, TuningConfig};
pub use engine::{CouncilEngine, TurnPhase};
pub use error::CouncilError;
pub use memory::{AgentMemoryStore, EventKind, Memory, MemoryBank, MemoryId, SECRET_TAG};
pub use relationship::{ConspiracyNetwork, Relationship, RelationshipGraph};
pub use risk::{CoupRiskReport, RiskLevel};
pub use shared::SharedCouncil;
pub use testing::CouncilHarness;
