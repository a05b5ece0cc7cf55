use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Identifies a single mutable trait for mutation logs and debugging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraitId {
    LearningRate,
    ExplorationFactor,
    MemoryRetention,
    AdaptationSpeed,
    CooperationTendency,
    ResourceEfficiency,
    ComplexityPreference,
    RiskTolerance,
    ConnectionVitality,
    ServiceAffinity,
}

impl TraitId {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            TraitId::LearningRate => "learning_rate",
            TraitId::ExplorationFactor => "exploration_factor",
            TraitId::MemoryRetention => "memory_retention",
            TraitId::AdaptationSpeed => "adaptation_speed",
            TraitId::CooperationTendency => "cooperation_tendency",
            TraitId::ResourceEfficiency => "resource_efficiency",
            TraitId::ComplexityPreference => "complexity_preference",
            TraitId::RiskTolerance => "risk_tolerance",
            TraitId::ConnectionVitality => "connection_vitality",
            TraitId::ServiceAffinity => "service_affinity",
        }
    }
}

/// The mutable half of the trait vector.
///
/// Every field is subject to mutation and crossover. Valid ranges are the
/// initialization ranges exposed through [`MutableTraits::slots`]; mutation
/// clamps perturbed values back into them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutableTraits {
    /// Gain applied to knowledge acquired through the learn action.
    pub learning_rate: f64,
    /// Probability of picking a random action instead of the best-scored one.
    pub exploration_factor: f64,
    /// Scales how much perception history the organism retains.
    pub memory_retention: f64,
    /// Fitness feedback weight for reacting to environmental change.
    pub adaptation_speed: f64,
    /// Bias toward cooperation and sexual reproduction.
    pub cooperation_tendency: f64,
    /// Efficiency multiplier reported in fitness feedback.
    pub resource_efficiency: f64,
    /// Preference for complex environment links over simple ones.
    pub complexity_preference: f64,
    /// Dampens healing and amplifies attention to hazard signals.
    pub risk_tolerance: f64,
    /// Converts social interaction into health (connection bonus scale).
    pub connection_vitality: f64,
    /// Weight of service-like feedback in fitness calculation.
    pub service_affinity: f64,
}

/// The immutable half of the trait vector.
///
/// These values are fixed constants for an entire lineage. Mutation operates
/// on [`MutableTraits`] alone, so nothing here can drift; crossover copies
/// the whole block verbatim from one parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImmutableTraits {
    /// Weight of the symbiosis requirement in survival terms.
    pub dependency_weight: f64,
    /// Whether the organism requires social connection to persist.
    pub symbiosis_required: bool,
    /// Health penalty scale applied under severe isolation.
    pub isolation_mortality: f64,
    /// Cohesion constant of the lineage.
    pub cohesion: f64,
}

impl Default for ImmutableTraits {
    fn default() -> Self {
        Self {
            dependency_weight: 1.0,
            symbiosis_required: true,
            isolation_mortality: 0.99,
            cohesion: 1.0,
        }
    }
}

/// One applied mutation, recorded append-only on the offspring genome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationRecord {
    pub trait_id: TraitId,
    pub from: f64,
    pub to: f64,
}

/// Inheritable trait vector governing organism behavior.
///
/// Partitioned structurally into a mutable and an immutable subset so that
/// mutation cannot reach lineage constants even in principle. The mutation
/// log and fitness history are append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    pub mutable: MutableTraits,
    pub immutable: ImmutableTraits,
    /// Lineage depth, incremented by mutation and crossover.
    pub generation: u32,
    pub created_at: DateTime<Utc>,
    pub mutation_log: Vec<MutationRecord>,
    pub fitness_history: Vec<f64>,
}

impl MutableTraits {
    /// Mutable view over every trait slot with its id and valid range.
    ///
    /// The mutation operator iterates this instead of naming fields, so a
    /// new trait only has to be added here and in the struct.
    pub fn slots(&mut self) -> [(TraitId, &mut f64, RangeInclusive<f64>); 10] {
        [
            (TraitId::LearningRate, &mut self.learning_rate, 0.001..=0.1),
            (
                TraitId::ExplorationFactor,
                &mut self.exploration_factor,
                0.1..=0.9,
            ),
            (
                TraitId::MemoryRetention,
                &mut self.memory_retention,
                0.7..=0.99,
            ),
            (
                TraitId::AdaptationSpeed,
                &mut self.adaptation_speed,
                0.1..=0.5,
            ),
            (
                TraitId::CooperationTendency,
                &mut self.cooperation_tendency,
                0.0..=1.0,
            ),
            (
                TraitId::ResourceEfficiency,
                &mut self.resource_efficiency,
                0.5..=1.0,
            ),
            (
                TraitId::ComplexityPreference,
                &mut self.complexity_preference,
                0.2..=0.8,
            ),
            (TraitId::RiskTolerance, &mut self.risk_tolerance, 0.1..=0.9),
            (
                TraitId::ConnectionVitality,
                &mut self.connection_vitality,
                0.8..=1.0,
            ),
            (
                TraitId::ServiceAffinity,
                &mut self.service_affinity,
                0.7..=1.0,
            ),
        ]
    }

    /// Read-only values in slot order, for crossover and fingerprinting.
    #[must_use]
    pub fn values(&self) -> [(TraitId, f64); 10] {
        [
            (TraitId::LearningRate, self.learning_rate),
            (TraitId::ExplorationFactor, self.exploration_factor),
            (TraitId::MemoryRetention, self.memory_retention),
            (TraitId::AdaptationSpeed, self.adaptation_speed),
            (TraitId::CooperationTendency, self.cooperation_tendency),
            (TraitId::ResourceEfficiency, self.resource_efficiency),
            (TraitId::ComplexityPreference, self.complexity_preference),
            (TraitId::RiskTolerance, self.risk_tolerance),
            (TraitId::ConnectionVitality, self.connection_vitality),
            (TraitId::ServiceAffinity, self.service_affinity),
        ]
    }

    pub fn set(&mut self, id: TraitId, value: f64) {
        match id {
            TraitId::LearningRate => self.learning_rate = value,
            TraitId::ExplorationFactor => self.exploration_factor = value,
            TraitId::MemoryRetention => self.memory_retention = value,
            TraitId::AdaptationSpeed => self.adaptation_speed = value,
            TraitId::CooperationTendency => self.cooperation_tendency = value,
            TraitId::ResourceEfficiency => self.resource_efficiency = value,
            TraitId::ComplexityPreference => self.complexity_preference = value,
            TraitId::RiskTolerance => self.risk_tolerance = value,
            TraitId::ConnectionVitality => self.connection_vitality = value,
            TraitId::ServiceAffinity => self.service_affinity = value,
        }
    }

    #[must_use]
    pub fn get(&self, id: TraitId) -> f64 {
        match id {
            TraitId::LearningRate => self.learning_rate,
            TraitId::ExplorationFactor => self.exploration_factor,
            TraitId::MemoryRetention => self.memory_retention,
            TraitId::AdaptationSpeed => self.adaptation_speed,
            TraitId::CooperationTendency => self.cooperation_tendency,
            TraitId::ResourceEfficiency => self.resource_efficiency,
            TraitId::ComplexityPreference => self.complexity_preference,
            TraitId::RiskTolerance => self.risk_tolerance,
            TraitId::ConnectionVitality => self.connection_vitality,
            TraitId::ServiceAffinity => self.service_affinity,
        }
    }
}
