pub mod macros;

use symbiont_core::config::EngineConfig;
use symbiont_core::ecosystem::Ecosystem;
use symbiont_core::genome::GenomeLogic;
use symbiont_core::organism::Organism;
use symbiont_data::Genome;
use uuid::Uuid;

type GenomeMod = Box<dyn Fn(&mut Genome)>;

/// Builds seeded ecosystems for tests without repeating setup noise.
#[allow(dead_code)]
pub struct EcosystemBuilder {
    config: EngineConfig,
    population: usize,
    genome_mods: Vec<GenomeMod>,
}

#[allow(dead_code)]
impl EcosystemBuilder {
    pub fn new() -> Self {
        let mut config = EngineConfig::default();
        config.ecosystem.seed = Some(0);
        Self {
            config,
            population: 0,
            genome_mods: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.ecosystem.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut EngineConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_population(mut self, population: usize) -> Self {
        self.population = population;
        self
    }

    /// Applied to every spawned organism's genome, e.g. to pin the
    /// exploration factor for a scenario.
    pub fn with_genome_mod<F>(mut self, modifier: F) -> Self
    where
        F: Fn(&mut Genome) + 'static,
    {
        self.genome_mods.push(Box::new(modifier));
        self
    }

    pub fn build(self) -> (Ecosystem, Vec<Uuid>) {
        let mut eco = Ecosystem::new("test", self.config).expect("valid test config");
        let mut ids = Vec::new();
        for _ in 0..self.population {
            let mut genome = Genome::random_with_rng(eco.rng_mut());
            for modifier in &self.genome_mods {
                modifier(&mut genome);
            }
            let organism = Organism::with_genome_rng(genome, eco.rng_mut());
            ids.push(organism.id);
            eco.add(organism).expect("fresh RNG ids never collide");
        }
        (eco, ids)
    }
}
