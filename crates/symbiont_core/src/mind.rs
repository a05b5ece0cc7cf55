//! Perception, decision-making, and learning.
//!
//! A pure perceive→decide→learn request/response unit driven by the
//! organism's tick; there is no internal state machine. Attention weights
//! derive from genome traits, and decisions blend trait-weighted base
//! scores with reinforcement from recent outcomes.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use symbiont_data::{
    ActionKind, DecisionRecord, Genome, LearningEntry, Perception, SignalClass, SignalMap,
};

/// Signals with attention weight above this make the working set.
pub const ATTENTION_THRESHOLD: f64 = 0.3;

/// Base attention before trait amplification.
const BASE_ATTENTION: f64 = 0.5;

/// Base score of an action before trait affinity and reinforcement.
const BASE_SCORE: f64 = 0.5;

/// Exploitation blend: `0.7 * base + 0.3 * recent outcome average`.
const REINFORCEMENT_BLEND: f64 = 0.3;

/// How many recent selections of an option feed its reinforcement average.
const REINFORCEMENT_WINDOW: usize = 5;

/// Perception memory capacity at full memory retention.
const MEMORY_CAPACITY_BASE: f64 = 100.0;

/// The perception-decision unit owned by one organism.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mind {
    /// Bounded ring of full perception records, newest last.
    pub perception_memory: VecDeque<Perception>,
    /// Append-only record of every decision made.
    pub decision_history: Vec<DecisionRecord>,
    /// Append-only log of outcomes fed back through `learn`.
    pub learning_buffer: Vec<LearningEntry>,
    next_decision_id: u64,
}

impl Mind {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes attention weights for the signal map, keeps the working
    /// subset above the threshold, and appends the full record to
    /// perception memory.
    pub fn perceive(&mut self, tick: u64, signals: &SignalMap, genome: &Genome) -> Perception {
        let mut weights = BTreeMap::new();
        let mut working = SignalMap::new();

        for (&kind, &value) in signals {
            let weight = match kind.class() {
                SignalClass::Hazard => BASE_ATTENTION * (1.0 + genome.mutable.risk_tolerance),
                SignalClass::Learning => BASE_ATTENTION * (1.0 + genome.mutable.learning_rate),
                SignalClass::Neutral => BASE_ATTENTION,
            }
            .min(1.0);
            weights.insert(kind, weight);
            if weight > ATTENTION_THRESHOLD {
                working.insert(kind, value);
            }
        }

        let perception = Perception {
            tick,
            raw: signals.clone(),
            weights,
            working,
        };

        let capacity =
            ((genome.mutable.memory_retention * MEMORY_CAPACITY_BASE) as usize).max(1);
        self.perception_memory.push_back(perception.clone());
        while self.perception_memory.len() > capacity {
            self.perception_memory.pop_front();
        }

        perception
    }

    /// Chooses one of `options` against the given perception and records
    /// the decision.
    ///
    /// With probability equal to the genome's exploration factor the pick
    /// is uniform random; otherwise the highest-scored option wins, ties
    /// breaking on first-seen order. Returns the decision id alongside the
    /// chosen action.
    pub fn decide<R: Rng>(
        &mut self,
        options: &[ActionKind],
        context: &Perception,
        genome: &Genome,
        rng: &mut R,
    ) -> (u64, ActionKind) {
        debug_assert!(!options.is_empty(), "decide requires at least one option");

        let scores: Vec<(ActionKind, f64)> = options
            .iter()
            .map(|&option| (option, self.score_option(option, genome)))
            .collect();

        let explored = rng.gen::<f64>() < genome.mutable.exploration_factor;
        let chosen = if explored {
            options[rng.gen_range(0..options.len())]
        } else {
            let mut best = scores[0];
            for &candidate in &scores[1..] {
                if candidate.1 > best.1 {
                    best = candidate;
                }
            }
            best.0
        };

        let id = self.next_decision_id;
        self.next_decision_id += 1;
        self.decision_history.push(DecisionRecord {
            id,
            perception_tick: context.tick,
            options: options.to_vec(),
            scores,
            chosen,
            explored,
            outcome: None,
        });

        (id, chosen)
    }

    /// Attaches an outcome to a past decision and logs it in the learning
    /// buffer. Unknown ids still log; they just have nothing to annotate.
    pub fn learn(&mut self, decision_id: u64, outcome: f64) {
        let outcome = outcome.clamp(0.0, 1.0);
        if let Some(record) = self
            .decision_history
            .iter_mut()
            .rev()
            .find(|r| r.id == decision_id)
        {
            record.outcome = Some(outcome);
        }
        self.learning_buffer.push(LearningEntry {
            decision_id,
            outcome,
        });
    }

    /// Trait-weighted base value blended with the average outcome of this
    /// option's most recent selections.
    fn score_option(&self, option: ActionKind, genome: &Genome) -> f64 {
        let affinity = match option {
            ActionKind::Learn => genome.mutable.learning_rate,
            ActionKind::Cooperate => genome.mutable.cooperation_tendency,
            _ => 0.0,
        };
        let base = BASE_SCORE + affinity;

        let recent: Vec<f64> = self
            .decision_history
            .iter()
            .rev()
            .filter(|r| r.chosen == option)
            .take(REINFORCEMENT_WINDOW)
            .map(|r| r.outcome.unwrap_or(0.5))
            .collect();

        if recent.is_empty() {
            base
        } else {
            let average = recent.iter().sum::<f64>() / recent.len() as f64;
            base * (1.0 - REINFORCEMENT_BLEND) + average * REINFORCEMENT_BLEND
        }
    }
}
