//! Organism lifecycle state machine.
//!
//! An organism integrates its genome, resource pool, and mind into one
//! per-tick cycle: regenerate, perceive, decide, act, update health,
//! re-derive the lifecycle stage, and occasionally self-modify. Death is
//! absorbing; a dead organism's `live_cycle` is a safe no-op.
//!
//! Anything that must touch *other* organisms (reciprocal relation edges,
//! mirrored strength changes) is returned in a [`TickOutcome`] and applied
//! by the ecosystem against the shared population map, so the organism
//! itself never holds references to its peers.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::genome::GenomeLogic;
use crate::metabolism::MetabolismLogic;
use crate::mind::Mind;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use symbiont_data::{
    ActionKind, EnvironmentLink, Genome, ModificationKind, ModificationRecord, OrganismReport,
    ResourcePool, SignalMap, Stage, Status,
};
use uuid::Uuid;

/// Weight of the previous health value in the per-tick health update.
const HEALTH_RETENTION: f64 = 0.9;
/// Weight of the resource-pool contribution in the health update.
const RESOURCE_WEIGHT: f64 = 0.1;

/// Read-only view of the population an organism may interact with during
/// one tick. Built by the ecosystem; peers appear as ids and borrowed
/// genomes only, never as owned references.
pub struct TickContext<'a> {
    pub tick: u64,
    pub config: &'a EngineConfig,
    /// Living peers this organism is not yet connected to, sorted by id.
    pub candidates: &'a [Uuid],
    /// Living connected peers and their genomes, for sexual reproduction.
    pub partners: &'a [(Uuid, &'a Genome)],
}

/// What one `live_cycle` asks the ecosystem to apply against the shared
/// population map.
#[derive(Debug, Default)]
pub struct TickOutcome {
    /// Action that executed this tick, if any.
    pub action: Option<ActionKind>,
    /// Action that was chosen but skipped for lack of resources.
    pub skipped: Option<ActionKind>,
    /// Freshly established relation to mirror on the peer.
    pub new_relation: Option<(Uuid, f64)>,
    /// Strength increases to mirror on each peer's edge back to us.
    pub relation_deltas: Vec<(Uuid, f64)>,
    /// True when health reached zero this tick.
    pub died: bool,
}

/// A single autonomous digital organism.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organism {
    pub id: Uuid,
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub genome: Genome,
    pub pool: ResourcePool,
    pub mind: Mind,
    /// Simulated age; monotone while alive, frozen at death.
    pub age: f64,
    /// Always within [0, 1].
    pub health: f64,
    pub stage: Stage,
    pub status: Status,
    /// Peer id → relation strength. Symmetric across the population; the
    /// ecosystem mirrors every change.
    pub relations: HashMap<Uuid, f64>,
    /// Non-social links discovered through exploration.
    pub environment_links: Vec<EnvironmentLink>,
    /// Offspring owned until the ecosystem harvests them.
    pub pending_offspring: Vec<Organism>,
    pub offspring_count: u32,
    pub behavior_log: Vec<ModificationRecord>,
    pub structure_log: Vec<ModificationRecord>,
}

fn compose_name(id: &Uuid, generation: u32) -> String {
    let id_str = id.to_string();
    let bytes = id_str.as_bytes();
    let syllables = [
        "ae", "ba", "co", "da", "el", "fa", "go", "ha", "id", "jo", "ka", "lu", "ma", "na", "os",
        "pe", "qu", "ri", "sa", "tu", "vi", "wu", "xi", "yo", "ze",
    ];
    let prefix = [
        "Aethel", "Bel", "Cor", "Dag", "Eld", "Fin", "Grom", "Had", "Ith", "Jor", "Kael", "Luv",
        "Mor", "Nar", "Oth", "Pyr", "Quas", "Rhun", "Syl", "Tor", "Val", "Wun", "Xer", "Yor",
        "Zan",
    ];
    let p_idx = (bytes[0] as usize) % prefix.len();
    let s1_idx = (bytes[1] as usize) % syllables.len();
    let s2_idx = (bytes[2] as usize) % syllables.len();
    format!(
        "{}{}{}-Gen{}",
        prefix[p_idx], syllables[s1_idx], syllables[s2_idx], generation
    )
}

impl Organism {
    /// Creates an organism with a freshly drawn random genome.
    pub fn spawn_with_rng<R: Rng>(rng: &mut R) -> Self {
        let genome = Genome::random_with_rng(rng);
        Self::with_genome_rng(genome, rng)
    }

    /// Creates an organism around an existing genome. The id comes from the
    /// injected RNG so whole runs replay deterministically.
    pub fn with_genome_rng<R: Rng>(genome: Genome, rng: &mut R) -> Self {
        let id = Uuid::from_u128(rng.gen::<u128>());
        let name = compose_name(&id, genome.generation);
        Self {
            id,
            name,
            parent_id: None,
            genome,
            pool: ResourcePool::default(),
            mind: Mind::new(),
            age: 0.0,
            health: 1.0,
            stage: Stage::Infant,
            status: Status::Alive,
            relations: HashMap::new(),
            environment_links: Vec::new(),
            pending_offspring: Vec::new(),
            offspring_count: 0,
            behavior_log: Vec::new(),
            structure_log: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.status == Status::Alive
    }

    /// Stage derived purely from age against the configured thresholds.
    #[must_use]
    pub fn stage_for_age(age: f64, config: &EngineConfig) -> Stage {
        if age < config.organism.infant_age {
            Stage::Infant
        } else if age < config.organism.juvenile_age {
            Stage::Juvenile
        } else if age < config.organism.adult_age {
            Stage::Adult
        } else {
            Stage::Elder
        }
    }

    /// The actions this organism may take right now, in fixed order.
    ///
    /// The order is part of the decision contract: ties in scoring break on
    /// first-seen position. A dead organism has no available actions.
    #[must_use]
    pub fn available_actions(&self, config: &EngineConfig) -> Vec<ActionKind> {
        if !self.is_alive() {
            return Vec::new();
        }
        let mut actions = vec![ActionKind::Rest, ActionKind::Explore, ActionKind::Learn];

        if self.relations.len() < config.organism.min_connections {
            actions.push(ActionKind::SeekConnection);
        }
        if self.pool.knowledge.current > config.organism.teach_threshold {
            actions.push(ActionKind::Teach);
        }
        if matches!(self.stage, Stage::Adult | Stage::Elder)
            && self.offspring_count < config.organism.max_offspring
        {
            actions.push(ActionKind::Reproduce);
        }
        if !self.relations.is_empty() {
            actions.push(ActionKind::Cooperate);
        }
        if self.health < config.organism.heal_threshold {
            actions.push(ActionKind::Heal);
        }

        actions
    }

    /// Executes one lifecycle iteration. A no-op once dead.
    pub fn live_cycle<R: Rng>(
        &mut self,
        delta_time: f64,
        signals: &SignalMap,
        ctx: &TickContext<'_>,
        rng: &mut R,
    ) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if !self.is_alive() {
            return outcome;
        }

        self.age += delta_time;
        self.pool.regenerate(delta_time);

        let perception = self.mind.perceive(ctx.tick, signals, &self.genome);

        let available = self.available_actions(ctx.config);
        let (decision_id, action) = self.mind.decide(&available, &perception, &self.genome, rng);
        match self.act(action, ctx, rng, &mut outcome) {
            Ok(true) => {
                self.mind.learn(decision_id, 1.0);
                outcome.action = Some(action);
            }
            Ok(false) => {
                tracing::debug!(organism = %self.name, action = action.label(), "insufficient resources, action skipped");
                outcome.skipped = Some(action);
            }
            Err(err) => {
                // Unreachable: the action came from the available set.
                tracing::error!(organism = %self.name, %err, "rejected own decision");
            }
        }

        self.update_health(ctx.config, rng, &mut outcome);
        self.stage = Self::stage_for_age(self.age, ctx.config);

        if rng.gen::<f64>() < ctx.config.organism.self_mod_chance {
            self.attempt_self_modification(ctx.config, rng);
        }

        outcome
    }

    /// Validates, pays for, and applies one action.
    ///
    /// Returns `Ok(false)` when the metabolism cannot cover the cost (the
    /// action is skipped, nothing is debited) and
    /// [`EngineError::ActionUnavailable`] when the action is outside the
    /// currently available set.
    pub fn act<R: Rng>(
        &mut self,
        action: ActionKind,
        ctx: &TickContext<'_>,
        rng: &mut R,
        outcome: &mut TickOutcome,
    ) -> Result<bool, EngineError> {
        if !self.available_actions(ctx.config).contains(&action) {
            return Err(EngineError::ActionUnavailable(action));
        }
        if !self.pool.consume(action, 1.0) {
            return Ok(false);
        }
        self.apply_effect(action, ctx, rng, outcome);
        Ok(true)
    }

    fn apply_effect<R: Rng>(
        &mut self,
        action: ActionKind,
        ctx: &TickContext<'_>,
        rng: &mut R,
        outcome: &mut TickOutcome,
    ) {
        let config = ctx.config;
        match action {
            ActionKind::Rest => {
                self.health = (self.health + config.organism.rest_recovery).min(1.0);
                self.pool.regenerate(config.organism.rest_regen_bonus);
            }
            ActionKind::Explore => {
                let gain = self.genome.mutable.exploration_factor * rng.gen_range(0.5..1.0);
                self.pool.credit_knowledge(gain);
                if rng.gen::<f64>() < config.organism.explore_link_chance {
                    self.environment_links.push(EnvironmentLink {
                        index: self.environment_links.len(),
                        strength: rng.gen_range(0.1..0.5),
                    });
                }
            }
            ActionKind::Learn => {
                let gain = self.genome.mutable.learning_rate * rng.gen_range(0.5..1.5);
                self.pool.credit_knowledge(gain);
                if rng.gen::<f64>() < config.organism.learn_behavior_chance {
                    self.record_modification(
                        ModificationKind::Behavior,
                        "learning_enhancement",
                    );
                }
            }
            ActionKind::Teach => {
                let share = self.pool.knowledge.current * 0.1;
                self.pool
                    .debit_knowledge(share.min(config.organism.teach_cap));
                self.boost_relations(config.organism.teach_relation_boost, outcome);
            }
            ActionKind::Cooperate => {
                self.pool
                    .credit_knowledge(self.genome.mutable.cooperation_tendency * 0.5);
                self.boost_relations(config.organism.cooperate_relation_boost, outcome);
            }
            ActionKind::Heal => {
                let amount = 0.1 + (1.0 - self.genome.mutable.risk_tolerance) * 0.2;
                self.health = (self.health + amount).min(1.0);
            }
            ActionKind::SeekConnection => {
                let roll = rng.gen_range(0.3..0.9);
                if roll > config.organism.connection_success_threshold
                    && !ctx.candidates.is_empty()
                {
                    let peer = ctx.candidates[rng.gen_range(0..ctx.candidates.len())];
                    self.relations.insert(peer, roll);
                    let boost =
                        self.genome.mutable.connection_vitality * config.organism.connection_vitality_scale;
                    self.health = (self.health + boost).min(1.0);
                    outcome.new_relation = Some((peer, roll));
                    tracing::debug!(organism = %self.name, %peer, strength = roll, "connection established");
                }
                // On failure only the consumed resources are spent.
            }
            ActionKind::Reproduce => {
                self.reproduce(ctx, rng);
            }
        }
    }

    fn boost_relations(&mut self, boost: f64, outcome: &mut TickOutcome) {
        for (&peer, strength) in &mut self.relations {
            *strength = (*strength + boost).min(1.0);
            outcome.relation_deltas.push((peer, boost));
        }
    }

    /// Produces exactly one pending offspring: crossover with a connected
    /// partner when cooperation wins the roll, otherwise a self-mutated
    /// copy.
    fn reproduce<R: Rng>(&mut self, ctx: &TickContext<'_>, rng: &mut R) {
        let config = ctx.config;
        let sexual = !ctx.partners.is_empty()
            && rng.gen::<f64>() < self.genome.mutable.cooperation_tendency;

        let child_genome = if sexual {
            let (_, partner_genome) = ctx.partners[rng.gen_range(0..ctx.partners.len())];
            self.genome.crossover_with_rng(partner_genome, rng)
        } else {
            self.genome.mutate_with_rng(
                config.genome.mutation_rate,
                config.genome.mutation_sigma,
                rng,
            )
        };

        let mut child = Organism::with_genome_rng(child_genome, rng);
        child.parent_id = Some(self.id);
        tracing::debug!(parent = %self.name, child = %child.name, sexual, "offspring produced");
        self.pending_offspring.push(child);
        self.offspring_count += 1;
    }

    fn update_health<R: Rng>(
        &mut self,
        config: &EngineConfig,
        rng: &mut R,
        outcome: &mut TickOutcome,
    ) {
        let health_cfg = &config.health;
        let interaction = self.relations.len() as f64 / health_cfg.interaction_normalization;
        let aging = health_cfg.aging_scale * (self.age / health_cfg.aging_normalization);
        let stress = if health_cfg.stress_max > 0.0 {
            rng.gen_range(0.0..health_cfg.stress_max)
        } else {
            0.0
        };
        let isolation_penalty = if interaction < health_cfg.isolation_threshold {
            self.genome.immutable.isolation_mortality * health_cfg.isolation_scale
        } else {
            0.0
        };
        let connection_bonus = interaction
            * self.genome.mutable.connection_vitality
            * health_cfg.connection_bonus_scale;

        self.health = (HEALTH_RETENTION * self.health
            + RESOURCE_WEIGHT * self.pool.health_contribution()
            - aging
            - stress
            - isolation_penalty
            + connection_bonus)
            .clamp(0.0, 1.0);

        // Severe isolation halves whatever health is left.
        if interaction < health_cfg.critical_isolation_threshold && self.health > 0.0 {
            self.health *= 0.5;
        }

        if self.health <= 0.0 && self.is_alive() {
            self.status = Status::Dead;
            outcome.died = true;
            tracing::info!(organism = %self.name, age = self.age, "organism died");
        }
    }

    /// Rare runtime self-modification. Behavior and structure changes only
    /// append audit records; a genome change swaps the owned genome for a
    /// lightly mutated copy, which carries its own mutation log.
    fn attempt_self_modification<R: Rng>(&mut self, config: &EngineConfig, rng: &mut R) {
        match rng.gen_range(0..3u8) {
            0 => self.record_modification(ModificationKind::Behavior, "random_adaptation"),
            1 => self.record_modification(ModificationKind::Structure, "random_enhancement"),
            _ => {
                if rng.gen::<f64>() < config.genome.genome_mod_chance {
                    let old = self.genome.fingerprint();
                    self.genome = self.genome.mutate_with_rng(
                        config.genome.genome_mod_rate,
                        config.genome.mutation_sigma,
                        rng,
                    );
                    tracing::debug!(organism = %self.name, from = %old, to = %self.genome.fingerprint(), "genome self-modification");
                }
            }
        }
    }

    fn record_modification(&mut self, kind: ModificationKind, details: &str) {
        let record = ModificationRecord {
            kind,
            tick_age: self.age,
            details: details.to_string(),
        };
        match kind {
            ModificationKind::Behavior => self.behavior_log.push(record),
            ModificationKind::Structure => self.structure_log.push(record),
        }
    }

    /// Read-only status summary.
    #[must_use]
    pub fn report(&self) -> OrganismReport {
        let mut resources = BTreeMap::new();
        for resource in symbiont_data::Resource::ALL {
            resources.insert(
                resource.label().to_string(),
                self.pool.channel(resource).current,
            );
        }
        OrganismReport {
            id: self.id,
            name: self.name.clone(),
            age: self.age,
            health: self.health,
            stage: self.stage,
            status: self.status,
            generation: self.genome.generation,
            genome_fingerprint: self.genome.fingerprint(),
            resources,
            relation_count: self.relations.len(),
            environment_link_count: self.environment_links.len(),
            offspring_count: self.offspring_count,
            behavior_modifications: self.behavior_log.len(),
            structure_modifications: self.structure_log.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn context(config: &EngineConfig) -> TickContext<'_> {
        TickContext {
            tick: 0,
            config,
            candidates: &[],
            partners: &[],
        }
    }

    #[test]
    fn test_base_actions_always_available() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let config = EngineConfig::default();
        let organism = Organism::spawn_with_rng(&mut rng);
        let actions = organism.available_actions(&config);
        assert!(actions.starts_with(&[
            ActionKind::Rest,
            ActionKind::Explore,
            ActionKind::Learn
        ]));
        // A fresh organism has no relations, so it seeks connection and
        // cannot cooperate, teach, or reproduce.
        assert!(actions.contains(&ActionKind::SeekConnection));
        assert!(!actions.contains(&ActionKind::Cooperate));
        assert!(!actions.contains(&ActionKind::Teach));
        assert!(!actions.contains(&ActionKind::Reproduce));
        assert!(!actions.contains(&ActionKind::Heal));
    }

    #[test]
    fn test_act_rejects_unavailable_action() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let config = EngineConfig::default();
        let mut organism = Organism::spawn_with_rng(&mut rng);
        let ctx = context(&config);
        let mut outcome = TickOutcome::default();

        // An infant with no relations can neither cooperate nor reproduce.
        let result = organism.act(ActionKind::Cooperate, &ctx, &mut rng, &mut outcome);
        assert_eq!(
            result,
            Err(EngineError::ActionUnavailable(ActionKind::Cooperate))
        );
    }

    #[test]
    fn test_consume_failure_skips_without_effect() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let config = EngineConfig::default();
        let mut organism = Organism::spawn_with_rng(&mut rng);
        organism.pool.compute.current = 0.0;
        let ctx = context(&config);
        let mut outcome = TickOutcome::default();

        let health_before = organism.health;
        let result = organism.act(ActionKind::Rest, &ctx, &mut rng, &mut outcome);
        assert_eq!(result, Ok(false));
        assert_eq!(organism.health, health_before);
    }

    #[test]
    fn test_dead_live_cycle_is_noop() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let config = EngineConfig::default();
        let mut organism = Organism::spawn_with_rng(&mut rng);
        organism.status = Status::Dead;
        organism.age = 12.0;
        let signals = SignalMap::new();
        let ctx = context(&config);

        let outcome = organism.live_cycle(1.0, &signals, &ctx, &mut rng);
        assert_eq!(organism.age, 12.0);
        assert_eq!(organism.status, Status::Dead);
        assert!(outcome.action.is_none());
        assert!(!outcome.died);
    }

    #[test]
    fn test_stage_derivation() {
        let config = EngineConfig::default();
        assert_eq!(Organism::stage_for_age(0.0, &config), Stage::Infant);
        assert_eq!(Organism::stage_for_age(10.0, &config), Stage::Juvenile);
        assert_eq!(Organism::stage_for_age(50.0, &config), Stage::Adult);
        assert_eq!(Organism::stage_for_age(250.0, &config), Stage::Elder);
    }

    #[test]
    fn test_reproduce_appends_one_pending_offspring() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let config = EngineConfig::default();
        let mut organism = Organism::spawn_with_rng(&mut rng);
        organism.age = 60.0;
        organism.stage = Stage::Adult;
        organism.pool.knowledge.current = 50.0;
        let ctx = context(&config);
        let mut outcome = TickOutcome::default();

        let result = organism.act(ActionKind::Reproduce, &ctx, &mut rng, &mut outcome);
        assert_eq!(result, Ok(true));
        assert_eq!(organism.pending_offspring.len(), 1);
        assert_eq!(organism.offspring_count, 1);

        let child = &organism.pending_offspring[0];
        assert_eq!(child.parent_id, Some(organism.id));
        // Asexual path: the child is a mutated copy, one generation on.
        assert_eq!(child.genome.generation, organism.genome.generation + 1);
        assert_eq!(child.genome.immutable, organism.genome.immutable);
    }

    #[test]
    fn test_reproduction_caps_at_max_offspring() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let config = EngineConfig::default();
        let mut organism = Organism::spawn_with_rng(&mut rng);
        organism.age = 60.0;
        organism.stage = Stage::Adult;
        organism.pool.knowledge.current = 1000.0;
        organism.offspring_count = config.organism.max_offspring;

        let actions = organism.available_actions(&config);
        assert!(!actions.contains(&ActionKind::Reproduce));
    }

    #[test]
    fn test_teach_spends_knowledge_and_boosts_relations() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let config = EngineConfig::default();
        let mut organism = Organism::spawn_with_rng(&mut rng);
        organism.pool.knowledge.current = 40.0;
        let peer = Uuid::from_u128(42);
        organism.relations.insert(peer, 0.5);
        let ctx = context(&config);
        let mut outcome = TickOutcome::default();

        let result = organism.act(ActionKind::Teach, &ctx, &mut rng, &mut outcome);
        assert_eq!(result, Ok(true));
        // 10% of 40 is capped at teach_cap = 5.
        assert!((organism.pool.knowledge.current - 36.0).abs() < 1e-9);
        assert!((organism.relations[&peer] - 0.55).abs() < 1e-9);
        assert_eq!(outcome.relation_deltas, vec![(peer, 0.05)]);
    }

    #[test]
    fn test_heal_scales_inversely_with_risk_tolerance() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let config = EngineConfig::default();
        let mut organism = Organism::spawn_with_rng(&mut rng);
        organism.health = 0.3;
        organism.genome.mutable.risk_tolerance = 0.1;
        let ctx = context(&config);
        let mut outcome = TickOutcome::default();

        organism
            .act(ActionKind::Heal, &ctx, &mut rng, &mut outcome)
            .unwrap();
        assert!((organism.health - (0.3 + 0.1 + 0.9 * 0.2)).abs() < 1e-9);
    }

    #[test]
    fn test_isolated_organism_health_collapses() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let config = EngineConfig::default();
        let mut organism = Organism::spawn_with_rng(&mut rng);
        let mut outcome = TickOutcome::default();

        // No relations: the catastrophic halving applies every update.
        let before = organism.health;
        organism.update_health(&config, &mut rng, &mut outcome);
        assert!(organism.health < before * 0.6);
    }
}
