//! Genetic operators over the inheritable trait vector.
//!
//! Mutation only ever walks the mutable trait slots, so the immutable
//! subset is out of reach structurally rather than guarded by a check.
//! Crossover copies the immutable block verbatim from one parent.

use chrono::Utc;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use symbiont_data::{Genome, ImmutableTraits, MutableTraits, MutationRecord};

/// Fitness feedback weights. They sum to 1.0.
const W_TASK_SUCCESS: f64 = 0.30;
const W_RESOURCE_EFFICIENCY: f64 = 0.20;
const W_ADAPTATION_SPEED: f64 = 0.20;
const W_COLLABORATION: f64 = 0.15;
const W_INNOVATION: f64 = 0.15;

/// Named fitness signals, each expected in [0, 1].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FitnessFeedback {
    pub task_success: f64,
    pub resource_efficiency: f64,
    pub adaptation_speed: f64,
    pub collaboration: f64,
    pub innovation: f64,
}

/// Trait defining the genetic interface for organism genomes.
pub trait GenomeLogic {
    fn random() -> Self;
    fn random_with_rng<R: Rng>(rng: &mut R) -> Self;
    /// Returns a mutated copy with generation incremented and one mutation
    /// record appended per changed trait.
    #[must_use]
    fn mutate_with_rng<R: Rng>(&self, rate: f64, sigma: f64, rng: &mut R) -> Genome;
    /// Returns an offspring picking each trait from one parent or the
    /// other, never blending.
    #[must_use]
    fn crossover_with_rng<R: Rng>(&self, other: &Genome, rng: &mut R) -> Genome;
    /// Weighted fitness of the given feedback, appended to the history.
    fn calculate_fitness(&mut self, feedback: &FitnessFeedback) -> f64;
    /// Short stable digest of the trait vector, for deduplication and
    /// debugging only.
    fn fingerprint(&self) -> String;
}

impl GenomeLogic for Genome {
    fn random() -> Self {
        let mut rng = rand::thread_rng();
        Self::random_with_rng(&mut rng)
    }

    fn random_with_rng<R: Rng>(rng: &mut R) -> Self {
        let mutable = MutableTraits {
            learning_rate: rng.gen_range(0.001..=0.1),
            exploration_factor: rng.gen_range(0.1..=0.9),
            memory_retention: rng.gen_range(0.7..=0.99),
            adaptation_speed: rng.gen_range(0.1..=0.5),
            cooperation_tendency: rng.gen_range(0.0..=1.0),
            resource_efficiency: rng.gen_range(0.5..=1.0),
            complexity_preference: rng.gen_range(0.2..=0.8),
            risk_tolerance: rng.gen_range(0.1..=0.9),
            connection_vitality: rng.gen_range(0.8..=1.0),
            service_affinity: rng.gen_range(0.7..=1.0),
        };
        Genome {
            mutable,
            immutable: ImmutableTraits::default(),
            generation: 0,
            created_at: Utc::now(),
            mutation_log: Vec::new(),
            fitness_history: Vec::new(),
        }
    }

    fn mutate_with_rng<R: Rng>(&self, rate: f64, sigma: f64, rng: &mut R) -> Genome {
        let mut mutable = self.mutable.clone();
        let mut records = Vec::new();
        let noise = Normal::new(0.0, sigma).ok();

        for (trait_id, value, range) in mutable.slots() {
            if rng.gen::<f64>() >= rate {
                continue;
            }
            let Some(noise) = noise else { continue };
            let perturbed = (*value + noise.sample(rng)).clamp(*range.start(), *range.end());
            if perturbed != *value {
                records.push(MutationRecord {
                    trait_id,
                    from: *value,
                    to: perturbed,
                });
                *value = perturbed;
            }
        }

        let mut mutation_log = self.mutation_log.clone();
        mutation_log.extend(records);

        Genome {
            mutable,
            immutable: self.immutable.clone(),
            generation: self.generation + 1,
            created_at: Utc::now(),
            mutation_log,
            fitness_history: Vec::new(),
        }
    }

    fn crossover_with_rng<R: Rng>(&self, other: &Genome, rng: &mut R) -> Genome {
        let mut mutable = self.mutable.clone();
        for (trait_id, value) in other.mutable.values() {
            if rng.gen_bool(0.5) {
                mutable.set(trait_id, value);
            }
        }
        // The immutable block is inherited whole from one parent, verbatim.
        let immutable = if rng.gen_bool(0.5) {
            self.immutable.clone()
        } else {
            other.immutable.clone()
        };

        Genome {
            mutable,
            immutable,
            generation: self.generation.max(other.generation) + 1,
            created_at: Utc::now(),
            mutation_log: Vec::new(),
            fitness_history: Vec::new(),
        }
    }

    fn calculate_fitness(&mut self, feedback: &FitnessFeedback) -> f64 {
        let fitness = feedback.task_success * W_TASK_SUCCESS
            + feedback.resource_efficiency * W_RESOURCE_EFFICIENCY
            + feedback.adaptation_speed * W_ADAPTATION_SPEED
            + feedback.collaboration * W_COLLABORATION
            + feedback.innovation * W_INNOVATION;
        self.fitness_history.push(fitness);
        fitness
    }

    fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let bytes = serde_json::to_vec(&(&self.mutable, &self.immutable)).unwrap_or_default();
        let digest = Sha256::digest(&bytes);
        hex::encode(digest)[..12].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_mutate_preserves_immutable_traits() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let genome = Genome::random_with_rng(&mut rng);
        // Maximum rate so every mutable trait is perturbed.
        let child = genome.mutate_with_rng(1.0, 0.5, &mut rng);
        assert_eq!(child.immutable, genome.immutable);
        assert_eq!(child.generation, genome.generation + 1);
        assert!(!child.mutation_log.is_empty());
    }

    #[test]
    fn test_mutate_zero_rate_changes_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let genome = Genome::random_with_rng(&mut rng);
        let child = genome.mutate_with_rng(0.0, 0.1, &mut rng);
        assert_eq!(child.mutable, genome.mutable);
        assert_eq!(child.mutation_log.len(), genome.mutation_log.len());
    }

    #[test]
    fn test_mutated_traits_stay_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let genome = Genome::random_with_rng(&mut rng);
        let mut child = genome.mutate_with_rng(1.0, 10.0, &mut rng);
        for (_, value, range) in child.mutable.slots() {
            assert!(range.contains(value));
        }
    }

    #[test]
    fn test_crossover_picks_parent_values() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let a = Genome::random_with_rng(&mut rng);
        let b = Genome::random_with_rng(&mut rng);
        let child = a.crossover_with_rng(&b, &mut rng);
        for (trait_id, value) in child.mutable.values() {
            assert!(
                value == a.mutable.get(trait_id) || value == b.mutable.get(trait_id),
                "{:?} was interpolated",
                trait_id
            );
        }
        assert!(child.immutable == a.immutable || child.immutable == b.immutable);
        assert_eq!(child.generation, a.generation.max(b.generation) + 1);
    }

    #[test]
    fn test_fitness_appends_history() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut genome = Genome::random_with_rng(&mut rng);
        let feedback = FitnessFeedback {
            task_success: 1.0,
            resource_efficiency: 1.0,
            adaptation_speed: 1.0,
            collaboration: 1.0,
            innovation: 1.0,
        };
        let fitness = genome.calculate_fitness(&feedback);
        assert!((fitness - 1.0).abs() < 1e-12);
        assert_eq!(genome.fitness_history, vec![fitness]);

        genome.calculate_fitness(&FitnessFeedback::default());
        assert_eq!(genome.fitness_history.len(), 2);
        assert_eq!(genome.fitness_history[1], 0.0);
    }

    #[test]
    fn test_fingerprint_tracks_traits() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let genome = Genome::random_with_rng(&mut rng);
        assert_eq!(genome.fingerprint(), genome.clone().fingerprint());

        let mutated = genome.mutate_with_rng(1.0, 0.5, &mut rng);
        assert_ne!(genome.fingerprint(), mutated.fingerprint());
    }
}
