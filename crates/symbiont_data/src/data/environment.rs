use super::organism::OrganismReport;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Environment signal channels an organism can perceive.
///
/// Ordered map keys (`BTreeMap`) so perception iterates deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SignalKind {
    /// The organism's own resource health, folded in by the engine.
    ResourceAvailability,
    /// Ambient load on the substrate.
    SystemLoad,
    /// Ambient communication activity.
    NetworkActivity,
    /// Normalized count of the organism's social relations.
    PeerCount,
    /// Learning opportunities visible this tick.
    LearningOpportunity,
    /// Ambient stress level.
    EnvironmentalStress,
}

/// Attention class of a signal; genome traits amplify attention per class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalClass {
    /// Amplified by risk tolerance.
    Hazard,
    /// Amplified by learning rate.
    Learning,
    Neutral,
}

impl SignalKind {
    #[must_use]
    pub fn class(&self) -> SignalClass {
        match self {
            SignalKind::SystemLoad | SignalKind::EnvironmentalStress => SignalClass::Hazard,
            SignalKind::LearningOpportunity => SignalClass::Learning,
            SignalKind::ResourceAvailability | SignalKind::NetworkActivity | SignalKind::PeerCount => {
                SignalClass::Neutral
            }
        }
    }
}

/// Per-tick environment input, keyed deterministically.
pub type SignalMap = BTreeMap<SignalKind, f64>;

/// Global environment parameter set threaded through every tick.
///
/// Plain state, not a singleton: multiple ecosystems can coexist with
/// independent parameter sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentParams {
    pub resource_abundance: f64,
    pub mutation_pressure: f64,
    pub cooperation_benefits: f64,
    pub competition_intensity: f64,
    pub environmental_stress: f64,
}

impl Default for EnvironmentParams {
    fn default() -> Self {
        Self {
            resource_abundance: 1.0,
            mutation_pressure: 0.1,
            cooperation_benefits: 0.5,
            competition_intensity: 0.3,
            environmental_stress: 0.1,
        }
    }
}

/// Population-wide perturbation, triggered at most once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GlobalEventKind {
    /// Every living organism's channel balances shrink.
    ResourceScarcity,
    /// A fraction of the population undergoes genome self-modification.
    MutationBurst,
    /// Connected organisms gain bonus knowledge.
    CooperationBoost,
}

impl GlobalEventKind {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            GlobalEventKind::ResourceScarcity => "resource_scarcity",
            GlobalEventKind::MutationBurst => "mutation_burst",
            GlobalEventKind::CooperationBoost => "cooperation_boost",
        }
    }
}

/// Aggregated population statistics captured on a fixed tick cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub tick: u64,
    /// Every organism still registered, dead included.
    pub total: usize,
    pub living: usize,
    pub dead: usize,
    /// Mean health across living organisms; 0 when none live.
    pub average_health: f64,
    /// Mean age across living organisms; 0 when none live.
    pub average_age: f64,
    /// Highest generation among living organisms.
    pub max_generation: u32,
}

/// Tagged union of all simulation events emitted during a tick.
///
/// Serialized with `#[serde(tag = "event")]` for streaming JSONL output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum LiveEvent {
    /// A new organism joined the population (seeded or harvested offspring).
    Birth {
        id: Uuid,
        parent_id: Option<Uuid>,
        generation: u32,
        tick: u64,
        timestamp: String,
    },
    /// An organism's health reached zero.
    Death {
        id: Uuid,
        age: f64,
        tick: u64,
        timestamp: String,
        cause: String,
    },
    /// A symmetric relation was established.
    Connection {
        a: Uuid,
        b: Uuid,
        strength: f64,
        tick: u64,
        timestamp: String,
    },
    /// A population-wide environmental event fired.
    Environmental {
        kind: GlobalEventKind,
        tick: u64,
        timestamp: String,
    },
    /// Periodic statistics snapshot.
    Snapshot {
        tick: u64,
        stats: StatsSnapshot,
        timestamp: String,
    },
}

/// Read-only summary of the ecosystem, for display or persistence by
/// external callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EcosystemReport {
    pub name: String,
    pub tick: u64,
    pub total: usize,
    pub living: usize,
    pub dead: usize,
    pub average_health: f64,
    pub average_age: f64,
    pub environment: EnvironmentParams,
    pub organisms: Vec<OrganismReport>,
    /// Bounded trailing history, oldest first.
    pub history: Vec<StatsSnapshot>,
}
