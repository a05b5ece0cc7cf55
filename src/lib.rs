//! Symbiont: an agent-based digital-life simulation engine.
//!
//! This facade re-exports the engine crates and bundles a convenience
//! driver for embedding the simulation. See `symbiont_core` for the
//! component documentation.

pub use symbiont_core as engine;
pub use symbiont_data as data;

pub use symbiont_core::config::EngineConfig;
pub use symbiont_core::ecosystem::{Ecosystem, TickHook};
pub use symbiont_core::error::EngineError;
pub use symbiont_core::genome::{FitnessFeedback, GenomeLogic};
pub use symbiont_core::metabolism::MetabolismLogic;
pub use symbiont_core::metrics::init_logging;
pub use symbiont_core::organism::Organism;
pub use symbiont_data::{LiveEvent, SignalMap, StatsSnapshot};

/// Owns an ecosystem and drives it tick by tick.
///
/// Thin wrapper for embedders that just want a seeded population and a
/// `run` loop; everything it does is available on [`Ecosystem`] directly.
pub struct Simulation {
    ecosystem: Ecosystem,
}

impl Simulation {
    /// Creates a simulation with `population` freshly spawned organisms.
    pub fn new(name: &str, population: usize, config: EngineConfig) -> anyhow::Result<Self> {
        let mut ecosystem = Ecosystem::new(name, config)?;
        for _ in 0..population {
            let organism = Organism::spawn_with_rng(ecosystem.rng_mut());
            ecosystem.add(organism)?;
        }
        Ok(Self { ecosystem })
    }

    /// Advances the simulation by `ticks` steps of one time unit each,
    /// returning every live event in order.
    pub fn run(&mut self, ticks: u64) -> Vec<LiveEvent> {
        let mut events = Vec::new();
        for _ in 0..ticks {
            events.extend(self.ecosystem.step(1.0));
        }
        events
    }

    #[must_use]
    pub fn ecosystem(&self) -> &Ecosystem {
        &self.ecosystem
    }

    pub fn ecosystem_mut(&mut self) -> &mut Ecosystem {
        &mut self.ecosystem
    }
}
