//! Pairwise advisor relationships and the conspiracy graph.
//!
//! Each unordered pair of advisors maps to exactly one owned record; both
//! sides query through the graph rather than holding private references,
//! so there is no aliasing between an advisor's view and its partner's.

use crate::advisor::AgentId;
use crate::config::TuningConfig;
use crate::memory::Memory;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

lazy_static! {
    /// Tags that read as hostile regardless of emotional tone.
    static ref HOSTILE_TAGS: HashSet<&'static str> =
        ["betrayal", "treachery", "threat", "sabotage", "plot"]
            .into_iter()
            .collect();

    /// Tags that read as cooperative regardless of emotional tone.
    static ref COOPERATIVE_TAGS: HashSet<&'static str> =
        ["alliance", "cooperation", "support", "friendship", "aid"]
            .into_iter()
            .collect();
}

/// The relationship state between one unordered pair of advisors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    /// The pair, stored in canonical (sorted) order.
    agents: [AgentId; 2],
    /// Mutual trust in `[-1, 1]`; negative is adversarial.
    pub trust: f32,
    /// How much sway the pair holds over each other, in `[0, 1]`.
    pub influence: f32,
    /// How actively the pair is plotting together, in `[0, 1]`.
    pub conspiracy_level: f32,
    /// References to secrets the pair shares.
    pub shared_secrets: Vec<String>,
    /// Turn the relationship formed.
    pub established_turn: u32,
    /// Turn the relationship last changed.
    pub last_updated_turn: u32,
}

impl Relationship {
    /// Create a neutral relationship for the pair.
    pub fn new(a: AgentId, b: AgentId, current_turn: u32) -> Self {
        let agents = if a <= b { [a, b] } else { [b, a] };
        Self {
            agents,
            trust: 0.0,
            influence: 0.0,
            conspiracy_level: 0.0,
            shared_secrets: Vec::new(),
            established_turn: current_turn,
            last_updated_turn: current_turn,
        }
    }

    /// The pair in canonical order.
    pub fn pair(&self) -> (AgentId, AgentId) {
        (self.agents[0], self.agents[1])
    }

    /// Whether this relationship involves the given advisor.
    pub fn involves(&self, agent: AgentId) -> bool {
        self.agents[0] == agent || self.agents[1] == agent
    }

    /// Whether this is the record for the given unordered pair.
    pub fn is_pair(&self, a: AgentId, b: AgentId) -> bool {
        (self.agents[0] == a && self.agents[1] == b)
            || (self.agents[0] == b && self.agents[1] == a)
    }

    /// The other advisor in the pair.
    pub fn other(&self, agent: AgentId) -> Option<AgentId> {
        if self.agents[0] == agent {
            Some(self.agents[1])
        } else if self.agents[1] == agent {
            Some(self.agents[0])
        } else {
            None
        }
    }

    /// Adjust trust, clamped to `[-1, 1]`.
    pub fn adjust_trust(&mut self, delta: f32) {
        self.trust = (self.trust + delta).clamp(-1.0, 1.0);
    }

    /// Adjust influence, clamped to `[0, 1]`.
    pub fn adjust_influence(&mut self, delta: f32) {
        self.influence = (self.influence + delta).clamp(0.0, 1.0);
    }

    /// Adjust conspiracy level, clamped to `[0, 1]`.
    pub fn adjust_conspiracy(&mut self, delta: f32) {
        self.conspiracy_level = (self.conspiracy_level + delta).clamp(0.0, 1.0);
    }

    /// Whether this edge qualifies for the conspiracy graph.
    pub fn is_conspiratorial(&self, trust_threshold: f32, conspiracy_threshold: f32) -> bool {
        self.trust >= trust_threshold && self.conspiracy_level >= conspiracy_threshold
    }
}

/// A detected conspiracy cell: advisors connected by conspiratorial edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConspiracyNetwork {
    /// Member advisors, sorted for determinism.
    pub members: Vec<AgentId>,
    /// Influence-weighted mean conspiracy level over the cell's edges.
    pub strength: f32,
}

impl ConspiracyNetwork {
    /// Whether the given advisor belongs to this cell.
    pub fn contains(&self, agent: AgentId) -> bool {
        self.members.contains(&agent)
    }

    /// Number of advisors in the cell.
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

/// All pairwise relationships within one civilization's council.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelationshipGraph {
    relationships: Vec<Relationship>,
}

impl RelationshipGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// The canonical record for an unordered pair, if one exists.
    ///
    /// Lookup is symmetric: `get(a, b)` and `get(b, a)` return the same
    /// record.
    pub fn get(&self, a: AgentId, b: AgentId) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.is_pair(a, b))
    }

    /// Mutable lookup for an unordered pair.
    pub fn get_mut(&mut self, a: AgentId, b: AgentId) -> Option<&mut Relationship> {
        self.relationships.iter_mut().find(|r| r.is_pair(a, b))
    }

    /// The canonical record for the pair, created neutral if absent.
    pub fn get_or_create(&mut self, a: AgentId, b: AgentId, current_turn: u32) -> &mut Relationship {
        let pos = match self.relationships.iter().position(|r| r.is_pair(a, b)) {
            Some(pos) => pos,
            None => {
                self.relationships.push(Relationship::new(a, b, current_turn));
                self.relationships.len() - 1
            }
        };
        &mut self.relationships[pos]
    }

    /// All relationships involving one advisor.
    pub fn relationships_of(&self, agent: AgentId) -> Vec<&Relationship> {
        self.relationships
            .iter()
            .filter(|r| r.involves(agent))
            .collect()
    }

    /// Number of relationship records.
    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    /// Whether the graph holds no records.
    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    /// Iterate over every relationship record.
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter()
    }

    /// Nudge the owner's relationships based on a new memory.
    ///
    /// For each other known advisor the memory's tags reference, trust moves
    /// by `|impact| × reliability × scale`, signed by the memory's tone:
    /// betrayal kinds and hostile tags push down, cooperative tags push up,
    /// otherwise the emotional impact's sign decides.
    pub fn update_from_memory(
        &mut self,
        owner: AgentId,
        memory: &Memory,
        known_agents: &[AgentId],
        current_turn: u32,
        config: &TuningConfig,
    ) {
        let magnitude =
            memory.emotional_impact.abs() * memory.reliability * config.memory_trust_scale;
        if magnitude <= 0.0 {
            return;
        }
        let sign = memory_tone(memory);

        for &other in known_agents {
            if other == owner || !memory.references(other) {
                continue;
            }
            let relationship = self.get_or_create(owner, other, current_turn);
            relationship.adjust_trust(sign * magnitude);
            relationship.last_updated_turn = current_turn;
        }
    }

    /// Record an interaction outcome between two advisors.
    ///
    /// Outcome is in `[-1, 1]`; trust follows its sign, and influence creeps
    /// up with interaction intensity regardless of tone.
    pub fn record_interaction(
        &mut self,
        a: AgentId,
        b: AgentId,
        outcome: f32,
        current_turn: u32,
        config: &TuningConfig,
    ) {
        let outcome = outcome.clamp(-1.0, 1.0);
        let trust_delta = outcome * config.interaction_trust_scale;
        let influence_delta = outcome.abs() * config.interaction_influence_gain;

        let relationship = self.get_or_create(a, b, current_turn);
        relationship.adjust_trust(trust_delta);
        relationship.adjust_influence(influence_delta);
        relationship.last_updated_turn = current_turn;
    }

    /// Record that two advisors now share a secret.
    ///
    /// Secret-sharing is inherently conspiratorial: both trust and
    /// conspiracy level rise by fixed increments.
    pub fn record_secret_share(
        &mut self,
        a: AgentId,
        b: AgentId,
        secret_ref: impl Into<String>,
        current_turn: u32,
        config: &TuningConfig,
    ) {
        let trust_bonus = config.secret_trust_bonus;
        let conspiracy_bonus = config.secret_conspiracy_bonus;

        let relationship = self.get_or_create(a, b, current_turn);
        relationship.shared_secrets.push(secret_ref.into());
        relationship.adjust_trust(trust_bonus);
        relationship.adjust_conspiracy(conspiracy_bonus);
        relationship.last_updated_turn = current_turn;
    }

    /// Find connected conspiracy cells.
    ///
    /// An edge qualifies when trust and conspiracy level both clear their
    /// thresholds; when `restrict` is given, both endpoints must belong to
    /// it. Components are found with a breadth-first sweep over a fresh
    /// edge list, so the result depends only on current graph state.
    pub fn conspiracy_components(
        &self,
        trust_threshold: f32,
        conspiracy_threshold: f32,
        restrict: Option<&HashSet<AgentId>>,
    ) -> Vec<ConspiracyNetwork> {
        let edges: Vec<&Relationship> = self
            .relationships
            .iter()
            .filter(|r| r.is_conspiratorial(trust_threshold, conspiracy_threshold))
            .filter(|r| {
                restrict.map_or(true, |set| {
                    let (a, b) = r.pair();
                    set.contains(&a) && set.contains(&b)
                })
            })
            .collect();

        let mut adjacency: HashMap<AgentId, Vec<AgentId>> = HashMap::new();
        for edge in &edges {
            let (a, b) = edge.pair();
            adjacency.entry(a).or_default().push(b);
            adjacency.entry(b).or_default().push(a);
        }

        let mut nodes: Vec<AgentId> = adjacency.keys().copied().collect();
        nodes.sort();

        let mut visited: HashSet<AgentId> = HashSet::new();
        let mut networks = Vec::new();

        for &start in &nodes {
            if visited.contains(&start) {
                continue;
            }
            let mut members = Vec::new();
            let mut queue = VecDeque::from([start]);
            visited.insert(start);

            while let Some(node) = queue.pop_front() {
                members.push(node);
                if let Some(neighbors) = adjacency.get(&node) {
                    for &next in neighbors {
                        if visited.insert(next) {
                            queue.push_back(next);
                        }
                    }
                }
            }

            members.sort();
            let strength = network_strength(&edges, &members);
            networks.push(ConspiracyNetwork { members, strength });
        }

        networks
    }
}

/// Influence-weighted mean conspiracy level over a component's edges.
///
/// Falls back to the unweighted mean when no edge carries influence.
fn network_strength(edges: &[&Relationship], members: &[AgentId]) -> f32 {
    let component_edges: Vec<&&Relationship> = edges
        .iter()
        .filter(|r| {
            let (a, b) = r.pair();
            members.contains(&a) && members.contains(&b)
        })
        .collect();

    if component_edges.is_empty() {
        return 0.0;
    }

    let weight_sum: f32 = component_edges.iter().map(|r| r.influence).sum();
    if weight_sum > f32::EPSILON {
        component_edges
            .iter()
            .map(|r| r.influence * r.conspiracy_level)
            .sum::<f32>()
            / weight_sum
    } else {
        component_edges
            .iter()
            .map(|r| r.conspiracy_level)
            .sum::<f32>()
            / component_edges.len() as f32
    }
}

/// Sign of a memory's effect on trust.
fn memory_tone(memory: &Memory) -> f32 {
    let hostile = memory.kind == crate::memory::EventKind::Betrayal
        || memory.tags.iter().any(|t| HOSTILE_TAGS.contains(t.as_str()));
    if hostile {
        return -1.0;
    }
    let cooperative = memory
        .tags
        .iter()
        .any(|t| COOPERATIVE_TAGS.contains(t.as_str()));
    if cooperative {
        return 1.0;
    }
    if memory.emotional_impact < 0.0 {
        -1.0
    } else {
        1.0
    }
}
