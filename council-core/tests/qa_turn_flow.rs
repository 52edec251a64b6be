//! QA tests for the turn-driven memory lifecycle.
//!
//! These tests verify the per-turn flow works correctly:
//! - Decay and forgetting across many turns
//! - Access reinforcement keeping memories alive
//! - Capacity compression under pressure
//! - Secondhand transfer degradation

use council_core::{
    AdvisorProfile, CouncilEngine, EventKind, TuningConfig, TurnPhase,
};

fn engine_with(config: TuningConfig) -> CouncilEngine {
    CouncilEngine::with_config(config).expect("test config must be valid")
}

// =============================================================================
// DECAY AND FORGETTING
// =============================================================================

#[test]
fn test_memory_fully_decays_after_ten_turns() {
    let mut engine = engine_with(TuningConfig {
        default_decay_rate: 0.1,
        ..TuningConfig::default()
    });
    let advisor = engine.register_advisor(AdvisorProfile::new("Scribe Han"));

    engine
        .remember(advisor, EventKind::Decision, "A minor ruling", 0.5, 0, vec![])
        .unwrap();

    for turn in 1..=10 {
        engine.advance_turn(turn).unwrap();
    }

    // Ten decay steps at 0.1 exhaust the memory; recall no longer sees it.
    assert!(engine.recall(advisor, None, None).is_empty());
}

#[test]
fn test_reliability_non_increasing_without_access() {
    let mut engine = CouncilEngine::new();
    let advisor = engine.register_advisor(AdvisorProfile::new("Scribe Han"));
    engine
        .remember(advisor, EventKind::Crisis, "Bandit raid", -0.7, 0, vec![])
        .unwrap();

    let mut last = f32::INFINITY;
    for turn in 1..=5 {
        engine.advance_turn(turn).unwrap();
        let memories = engine.recall(advisor, None, None);
        assert_eq!(memories.len(), 1);
        assert!(memories[0].reliability <= last);
        last = memories[0].reliability;
    }
}

#[test]
fn test_access_reinforcement_slows_forgetting() {
    let config = TuningConfig {
        default_decay_rate: 0.1,
        access_reinforcement: 0.1,
        ..TuningConfig::default()
    };

    // One engine where the memory is rehearsed every turn, one where it is not.
    let mut rehearsed = engine_with(config.clone());
    let advisor_a = rehearsed.register_advisor(AdvisorProfile::new("Minister Chen"));
    let id = rehearsed
        .remember(advisor_a, EventKind::Betrayal, "Qin broke his oath", -0.9, 0, vec![])
        .unwrap();

    let mut neglected = engine_with(config);
    let advisor_b = neglected.register_advisor(AdvisorProfile::new("Minister Chen"));
    neglected
        .remember(advisor_b, EventKind::Betrayal, "Qin broke his oath", -0.9, 0, vec![])
        .unwrap();

    for turn in 1..=10 {
        rehearsed.advance_turn(turn).unwrap();
        rehearsed.access_memory(advisor_a, id, turn).unwrap();
        neglected.advance_turn(turn).unwrap();
    }

    assert_eq!(rehearsed.recall(advisor_a, None, None).len(), 1);
    assert!(neglected.recall(advisor_b, None, None).is_empty());
}

// =============================================================================
// CAPACITY COMPRESSION
// =============================================================================

#[test]
fn test_store_compression_keeps_most_important() {
    let mut engine = engine_with(TuningConfig {
        memory_capacity: 3,
        default_decay_rate: 0.0,
        ..TuningConfig::default()
    });
    let advisor = engine.register_advisor(AdvisorProfile::new("Chancellor Liu"));

    for (turn, impact) in [0.1, 0.9, 0.5, 0.2, 0.8].iter().enumerate() {
        engine
            .remember(
                advisor,
                EventKind::Decision,
                format!("Event {turn}"),
                *impact,
                turn as u32,
                vec![],
            )
            .unwrap();
    }

    let mut impacts: Vec<f32> = engine
        .recall(advisor, None, None)
        .iter()
        .map(|m| m.emotional_impact)
        .collect();
    impacts.sort_by(|a, b| b.partial_cmp(a).unwrap());

    assert_eq!(impacts.len(), 3);
    assert!((impacts[0] - 0.9).abs() < 1e-6);
    assert!((impacts[1] - 0.8).abs() < 1e-6);
    assert!((impacts[2] - 0.5).abs() < 1e-6);
}

// =============================================================================
// TRANSFER
// =============================================================================

#[test]
fn test_transfer_round_trip_properties() {
    let mut engine = CouncilEngine::new();
    let spy = engine.register_advisor(AdvisorProfile::new("Spymaster"));
    let handler = engine.register_advisor(AdvisorProfile::new("General Zhao"));

    engine
        .remember(
            spy,
            EventKind::Intelligence,
            "Troop counts at the border",
            0.8,
            1,
            vec!["military".to_string(), "border".to_string()],
        )
        .unwrap();
    engine
        .remember(spy, EventKind::Ceremony, "A dull banquet", 0.1, 1, vec![])
        .unwrap();

    let filter = vec!["military".to_string()];
    let moved = engine.transfer_memories(spy, handler, Some(&filter)).unwrap();
    assert_eq!(moved, 1);

    let received = engine.recall(handler, Some(&filter), None);
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].source_agent, Some(spy));
    assert!(received[0].reliability < 1.0);
    assert!(received[0].tags.contains("military"));
    assert!(received[0].tags.contains("border"));
}

// =============================================================================
// TURN SEQUENCING
// =============================================================================

#[test]
fn test_phase_visible_between_turns() {
    let mut engine = CouncilEngine::new();
    assert_eq!(engine.phase(), TurnPhase::Idle);

    engine.advance_turn(1).unwrap();
    assert_eq!(engine.phase(), TurnPhase::Reported);
    assert_eq!(engine.current_turn(), 1);

    engine.advance_turn(2).unwrap();
    assert_eq!(engine.phase(), TurnPhase::Reported);
    assert_eq!(engine.current_turn(), 2);
}

#[test]
fn test_loyalty_report_tracks_active_advisors() {
    let mut engine = CouncilEngine::new();
    let loyal = engine.register_advisor(AdvisorProfile::new("Minister Chen").with_loyalty(0.9));
    let wavering = engine.register_advisor(AdvisorProfile::new("General Zhao").with_loyalty(0.2));

    let report = engine.loyalty_report();
    assert!((report[&loyal] - 0.9).abs() < 1e-6);
    assert!((report[&wavering] - 0.2).abs() < 1e-6);

    engine.advisor_mut(wavering).unwrap().retire();
    let report = engine.loyalty_report();
    assert!(report.get(&wavering).is_none());
    assert_eq!(report.len(), 1);
}
