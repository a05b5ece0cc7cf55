//! Ecosystem: population ownership, tick loop, pressure, and statistics.
//!
//! The ecosystem is the sole owner of organism lifetime. Social relations
//! are stored as ids and resolved through the population map, so no
//! ownership cycles can form. One seeded RNG feeds every stochastic site
//! in sorted-id order, which makes whole runs reproducible.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::genome::GenomeLogic;
use crate::metabolism::MetabolismLogic;
use crate::metrics::Metrics;
use crate::organism::{Organism, TickContext, TickOutcome};
use chrono::Utc;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::{HashMap, VecDeque};
use std::time::Instant;
use symbiont_data::{
    ActionKind, EcosystemReport, EnvironmentParams, Genome, GlobalEventKind, LiveEvent, SignalKind,
    SignalMap, StatsSnapshot,
};
use uuid::Uuid;

/// Advisory per-tick observer. Purely informational: simulation
/// correctness never depends on what a hook does.
pub trait TickHook {
    fn on_tick(&mut self, tick: u64, stats: &StatsSnapshot);
}

impl<F: FnMut(u64, &StatsSnapshot)> TickHook for F {
    fn on_tick(&mut self, tick: u64, stats: &StatsSnapshot) {
        self(tick, stats);
    }
}

/// Owns the population and drives the discrete tick cycle.
pub struct Ecosystem {
    name: String,
    config: EngineConfig,
    organisms: HashMap<Uuid, Organism>,
    tick: u64,
    history: VecDeque<StatsSnapshot>,
    rng: ChaCha8Rng,
    metrics: Metrics,
    hook: Option<Box<dyn TickHook>>,
}

impl Ecosystem {
    /// Creates an ecosystem with a validated configuration. The RNG is
    /// seeded from `config.ecosystem.seed`, or from entropy when absent.
    pub fn new(name: &str, config: EngineConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let rng = if let Some(seed) = config.ecosystem.seed {
            ChaCha8Rng::seed_from_u64(seed)
        } else {
            ChaCha8Rng::from_entropy()
        };
        tracing::info!(name, fingerprint = %config.fingerprint(), "ecosystem created");
        Ok(Self {
            name: name.to_string(),
            config,
            organisms: HashMap::new(),
            tick: 0,
            history: VecDeque::new(),
            rng,
            metrics: Metrics::new(),
            hook: None,
        })
    }

    /// Registers an organism by id. Fails with
    /// [`EngineError::DuplicateEntity`] when the id already exists; the
    /// existing entry is left untouched.
    pub fn add(&mut self, organism: Organism) -> Result<(), EngineError> {
        if self.organisms.contains_key(&organism.id) {
            return Err(EngineError::DuplicateEntity(organism.id));
        }
        tracing::info!(name = %organism.name, id = %organism.id, "organism added");
        self.metrics.increment_counter("organisms_added");
        self.organisms.insert(organism.id, organism);
        Ok(())
    }

    /// The connection-establishing operation: sets both edges to
    /// `strength`, keeping the relation symmetric.
    pub fn connect(&mut self, a: Uuid, b: Uuid, strength: f64) -> Result<(), EngineError> {
        if a == b {
            return Err(EngineError::SelfConnection(a));
        }
        if !self.organisms.contains_key(&a) {
            return Err(EngineError::UnknownEntity(a));
        }
        if !self.organisms.contains_key(&b) {
            return Err(EngineError::UnknownEntity(b));
        }
        let strength = strength.clamp(0.0, 1.0);
        if let Some(org) = self.organisms.get_mut(&a) {
            org.relations.insert(b, strength);
        }
        if let Some(org) = self.organisms.get_mut(&b) {
            org.relations.insert(a, strength);
        }
        self.metrics.increment_counter("connections");
        Ok(())
    }

    /// Advances the simulation by one tick with internally generated
    /// ambient signals.
    pub fn step(&mut self, delta_time: f64) -> Vec<LiveEvent> {
        self.step_with_signals(delta_time, None)
    }

    /// Advances the simulation by one tick.
    ///
    /// `base_signals` replaces the internally generated ambient signal map
    /// (replayed traces, sensors); per-organism entries
    /// (`ResourceAvailability`, `PeerCount`) are filled in either way.
    ///
    /// Returns the live events of this tick (births, deaths, connections,
    /// environmental events, snapshots).
    pub fn step_with_signals(
        &mut self,
        delta_time: f64,
        base_signals: Option<&SignalMap>,
    ) -> Vec<LiveEvent> {
        let started = Instant::now();
        self.tick += 1;
        let mut events = Vec::new();

        // Advisory notification; the hook observes, never steers.
        if self.hook.is_some() {
            let stats = self.compute_stats();
            if let Some(hook) = self.hook.as_mut() {
                hook.on_tick(self.tick, &stats);
            }
        }

        self.run_live_cycles(delta_time, base_signals, &mut events);
        self.harvest_offspring(&mut events);
        self.apply_pressure(&mut events);
        self.evict_dead();
        self.record_snapshot(&mut events);

        self.metrics.record_tick(started.elapsed(), self.living_count());
        events
    }

    /// Runs `live_cycle` on every currently-alive organism in sorted-id
    /// order and applies each outcome back onto the shared map.
    fn run_live_cycles(
        &mut self,
        delta_time: f64,
        base_signals: Option<&SignalMap>,
        events: &mut Vec<LiveEvent>,
    ) {
        let mut ids: Vec<Uuid> = self
            .organisms
            .iter()
            .filter(|(_, o)| o.is_alive())
            .map(|(id, _)| *id)
            .collect();
        ids.sort();

        for id in ids {
            let Some(mut organism) = self.organisms.remove(&id) else {
                continue;
            };

            let mut signals = match base_signals {
                Some(base) => base.clone(),
                None => ambient_signals(&self.config.environment, &mut self.rng),
            };
            signals.insert(
                SignalKind::ResourceAvailability,
                organism.pool.health_contribution(),
            );
            signals.insert(
                SignalKind::PeerCount,
                organism.relations.len() as f64
                    / self.config.health.interaction_normalization,
            );

            let mut candidates: Vec<Uuid> = self
                .organisms
                .iter()
                .filter(|(pid, p)| p.is_alive() && !organism.relations.contains_key(pid))
                .map(|(pid, _)| *pid)
                .collect();
            candidates.sort();

            let mut partners: Vec<(Uuid, &Genome)> = self
                .organisms
                .iter()
                .filter(|(pid, p)| p.is_alive() && organism.relations.contains_key(pid))
                .map(|(pid, p)| (*pid, &p.genome))
                .collect();
            partners.sort_by_key(|(pid, _)| *pid);

            let ctx = TickContext {
                tick: self.tick,
                config: &self.config,
                candidates: &candidates,
                partners: &partners,
            };
            let outcome = organism.live_cycle(delta_time, &signals, &ctx, &mut self.rng);

            self.apply_outcome(&organism, &outcome, events);
            self.organisms.insert(id, organism);
        }
    }

    /// Mirrors one organism's tick outcome onto the shared population map:
    /// reciprocal relation edges, mirrored strength boosts, and the death
    /// event. Keeps the symmetry invariant at tick boundaries.
    fn apply_outcome(
        &mut self,
        organism: &Organism,
        outcome: &TickOutcome,
        events: &mut Vec<LiveEvent>,
    ) {
        let id = organism.id;
        if let Some((peer, strength)) = outcome.new_relation {
            if let Some(other) = self.organisms.get_mut(&peer) {
                other.relations.insert(id, strength);
            }
            self.metrics.increment_counter("connections");
            events.push(LiveEvent::Connection {
                a: id,
                b: peer,
                strength,
                tick: self.tick,
                timestamp: Utc::now().to_rfc3339(),
            });
        }
        for (peer, delta) in &outcome.relation_deltas {
            if let Some(other) = self.organisms.get_mut(peer) {
                if let Some(strength) = other.relations.get_mut(&id) {
                    *strength = (*strength + delta).min(1.0);
                }
            }
        }
        if outcome.died {
            let isolated = (organism.relations.len() as f64
                / self.config.health.interaction_normalization)
                < self.config.health.isolation_threshold;
            self.metrics.increment_counter("deaths");
            events.push(LiveEvent::Death {
                id,
                age: organism.age,
                tick: self.tick,
                timestamp: Utc::now().to_rfc3339(),
                cause: if isolated { "isolation" } else { "natural_causes" }.to_string(),
            });
        }
    }

    /// Drives a single named action on one organism, outside the regular
    /// tick cycle. Fails fast with [`EngineError::ActionUnavailable`] when
    /// the action is not currently available, and returns `Ok(false)` when
    /// the metabolism cannot cover it. Outcome side effects (reciprocal
    /// edges, mirrored boosts) are applied exactly as during a tick.
    pub fn perform(&mut self, id: Uuid, action: ActionKind) -> Result<bool, EngineError> {
        let Some(mut organism) = self.organisms.remove(&id) else {
            return Err(EngineError::UnknownEntity(id));
        };

        let mut candidates: Vec<Uuid> = self
            .organisms
            .iter()
            .filter(|(pid, p)| p.is_alive() && !organism.relations.contains_key(pid))
            .map(|(pid, _)| *pid)
            .collect();
        candidates.sort();

        let mut partners: Vec<(Uuid, &Genome)> = self
            .organisms
            .iter()
            .filter(|(pid, p)| p.is_alive() && organism.relations.contains_key(pid))
            .map(|(pid, p)| (*pid, &p.genome))
            .collect();
        partners.sort_by_key(|(pid, _)| *pid);

        let ctx = TickContext {
            tick: self.tick,
            config: &self.config,
            candidates: &candidates,
            partners: &partners,
        };
        let mut outcome = TickOutcome::default();
        let result = organism.act(action, &ctx, &mut self.rng, &mut outcome);

        let mut events = Vec::new();
        self.apply_outcome(&organism, &outcome, &mut events);
        self.organisms.insert(id, organism);
        result
    }

    /// Harvests every pending offspring exactly once per tick.
    fn harvest_offspring(&mut self, events: &mut Vec<LiveEvent>) {
        let mut parent_ids: Vec<Uuid> = self
            .organisms
            .iter()
            .filter(|(_, o)| !o.pending_offspring.is_empty())
            .map(|(id, _)| *id)
            .collect();
        parent_ids.sort();

        for parent_id in parent_ids {
            let pending = match self.organisms.get_mut(&parent_id) {
                Some(parent) => std::mem::take(&mut parent.pending_offspring),
                None => continue,
            };
            for child in pending {
                let child_id = child.id;
                let generation = child.genome.generation;
                match self.add(child) {
                    Ok(()) => {
                        self.metrics.increment_counter("births");
                        events.push(LiveEvent::Birth {
                            id: child_id,
                            parent_id: Some(parent_id),
                            generation,
                            tick: self.tick,
                            timestamp: Utc::now().to_rfc3339(),
                        });
                    }
                    Err(err) => {
                        // Ids come from the RNG stream; a collision here
                        // means the offspring is dropped, never a panic.
                        tracing::warn!(%err, "offspring could not be registered");
                    }
                }
            }
        }
    }

    /// Overpopulation competition plus at most one global event per tick.
    fn apply_pressure(&mut self, events: &mut Vec<LiveEvent>) {
        let eco = self.config.ecosystem.clone();

        let mut living: Vec<(Uuid, f64)> = self
            .organisms
            .iter()
            .filter(|(_, o)| o.is_alive())
            .map(|(id, o)| (*id, o.health))
            .collect();

        if living.len() > eco.overpopulation_threshold {
            living.sort_by(|a, b| {
                a.1.partial_cmp(&b.1)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.0.cmp(&b.0))
            });
            for (id, _) in living.iter().take(eco.pressure_victims) {
                if let Some(org) = self.organisms.get_mut(id) {
                    org.health *= eco.pressure_factor;
                }
            }
            tracing::debug!(
                population = living.len(),
                victims = eco.pressure_victims,
                "overpopulation pressure applied"
            );
        }

        if self.rng.gen::<f64>() < eco.event_chance {
            let kind = match self.rng.gen_range(0..3u8) {
                0 => GlobalEventKind::ResourceScarcity,
                1 => GlobalEventKind::MutationBurst,
                _ => GlobalEventKind::CooperationBoost,
            };
            self.trigger_global_event(kind);
            self.metrics.increment_counter("global_events");
            events.push(LiveEvent::Environmental {
                kind,
                tick: self.tick,
                timestamp: Utc::now().to_rfc3339(),
            });
        }
    }

    /// Applies one global event across the population.
    fn trigger_global_event(&mut self, kind: GlobalEventKind) {
        let mut living: Vec<Uuid> = self
            .organisms
            .iter()
            .filter(|(_, o)| o.is_alive())
            .map(|(id, _)| *id)
            .collect();
        living.sort();
        tracing::info!(event = kind.label(), affected = living.len(), "environmental event");

        match kind {
            GlobalEventKind::ResourceScarcity => {
                for id in living {
                    if let Some(org) = self.organisms.get_mut(&id) {
                        org.pool.scale_all(self.config.ecosystem.scarcity_factor);
                    }
                }
            }
            GlobalEventKind::MutationBurst => {
                for id in living {
                    if self.rng.gen::<f64>() < self.config.ecosystem.mutation_burst_chance {
                        if let Some(org) = self.organisms.get_mut(&id) {
                            org.genome = org.genome.mutate_with_rng(
                                self.config.genome.genome_mod_rate,
                                self.config.genome.mutation_sigma,
                                &mut self.rng,
                            );
                        }
                    }
                }
            }
            GlobalEventKind::CooperationBoost => {
                for id in living {
                    if let Some(org) = self.organisms.get_mut(&id) {
                        if !org.relations.is_empty() {
                            org.pool
                                .credit_knowledge(self.config.ecosystem.cooperation_boost_amount);
                        }
                    }
                }
            }
        }
    }

    /// Occasionally drops dead organisms from the map. Bookkeeping only:
    /// no observable behavior depends on whether a corpse is still stored.
    fn evict_dead(&mut self) {
        if self.rng.gen::<f64>() >= self.config.ecosystem.evict_chance {
            return;
        }
        let before = self.organisms.len();
        self.organisms.retain(|_, o| o.is_alive());
        let evicted = before - self.organisms.len();
        if evicted > 0 {
            self.metrics.increment_counter("evictions");
            tracing::debug!(evicted, "dead organisms evicted");
        }
    }

    fn record_snapshot(&mut self, events: &mut Vec<LiveEvent>) {
        if self.tick % self.config.ecosystem.stats_interval != 0 {
            return;
        }
        let stats = self.compute_stats();
        events.push(LiveEvent::Snapshot {
            tick: self.tick,
            stats: stats.clone(),
            timestamp: Utc::now().to_rfc3339(),
        });
        self.history.push_back(stats);
        while self.history.len() > self.config.ecosystem.history_cap {
            self.history.pop_front();
        }
    }

    fn compute_stats(&self) -> StatsSnapshot {
        let total = self.organisms.len();
        let mut living: Vec<&Organism> = self.organisms.values().filter(|o| o.is_alive()).collect();
        // Sorted-id order keeps the floating-point sums reproducible.
        living.sort_by_key(|o| o.id);
        let living_count = living.len();
        let (average_health, average_age, max_generation) = if living.is_empty() {
            (0.0, 0.0, 0)
        } else {
            (
                living.iter().map(|o| o.health).sum::<f64>() / living_count as f64,
                living.iter().map(|o| o.age).sum::<f64>() / living_count as f64,
                living
                    .iter()
                    .map(|o| o.genome.generation)
                    .max()
                    .unwrap_or(0),
            )
        };
        StatsSnapshot {
            tick: self.tick,
            total,
            living: living_count,
            dead: total - living_count,
            average_health,
            average_age,
            max_generation,
        }
    }

    /// Read-only summary of current counts, averages, and history.
    #[must_use]
    pub fn report(&self) -> EcosystemReport {
        let stats = self.compute_stats();
        let mut organisms: Vec<&Organism> = self.organisms.values().collect();
        organisms.sort_by_key(|o| o.id);
        EcosystemReport {
            name: self.name.clone(),
            tick: self.tick,
            total: stats.total,
            living: stats.living,
            dead: stats.dead,
            average_health: stats.average_health,
            average_age: stats.average_age,
            environment: self.config.environment.clone(),
            organisms: organisms.iter().map(|o| o.report()).collect(),
            history: self.history.iter().cloned().collect(),
        }
    }

    /// Installs the advisory per-tick hook.
    pub fn set_hook(&mut self, hook: Box<dyn TickHook>) {
        self.hook = Some(hook);
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&Organism> {
        self.organisms.get(&id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut Organism> {
        self.organisms.get_mut(&id)
    }

    #[must_use]
    pub fn population_count(&self) -> usize {
        self.organisms.len()
    }

    #[must_use]
    pub fn living_count(&self) -> usize {
        self.organisms.values().filter(|o| o.is_alive()).count()
    }

    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    #[must_use]
    pub fn history(&self) -> &VecDeque<StatsSnapshot> {
        &self.history
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// The ecosystem's RNG, exposed so drivers can spawn organisms from
    /// the same deterministic stream.
    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }
}

/// Ambient signal map drawn from the environment parameters, mirroring
/// what an external sensor feed would supply.
fn ambient_signals<R: Rng>(env: &EnvironmentParams, rng: &mut R) -> SignalMap {
    let mut signals = SignalMap::new();
    signals.insert(SignalKind::SystemLoad, rng.gen_range(0.1..0.9));
    signals.insert(SignalKind::NetworkActivity, rng.gen_range(0.0..1.0));
    signals.insert(
        SignalKind::LearningOpportunity,
        f64::from(rng.gen_range(0..=5u8)) / 5.0,
    );
    // Scaled so the default parameter (0.1) reproduces the U(0, 0.5) range.
    signals.insert(
        SignalKind::EnvironmentalStress,
        rng.gen_range(0.0..0.5) * (env.environmental_stress / 0.1),
    );
    signals
}
