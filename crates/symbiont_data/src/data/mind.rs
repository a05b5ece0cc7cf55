use super::actions::ActionKind;
use super::environment::{SignalKind, SignalMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One processed perception: the raw signal map, the attention weights
/// computed for it, and the working subset that passed the attention
/// threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Perception {
    pub tick: u64,
    pub raw: SignalMap,
    pub weights: BTreeMap<SignalKind, f64>,
    /// Signals whose attention weight exceeded the threshold.
    pub working: SignalMap,
}

/// One decision, recorded when made and annotated later by learning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// Monotonic per-organism sequence number; the reference `learn` uses.
    pub id: u64,
    /// Tick of the perception this decision was made against; the full
    /// record lives in perception memory.
    pub perception_tick: u64,
    pub options: Vec<ActionKind>,
    pub scores: Vec<(ActionKind, f64)>,
    pub chosen: ActionKind,
    /// True when the choice came from the exploration branch.
    pub explored: bool,
    /// Outcome in [0, 1] attached by `learn`; absent until then.
    pub outcome: Option<f64>,
}

/// Append-only learning buffer entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningEntry {
    pub decision_id: u64,
    pub outcome: f64,
}
