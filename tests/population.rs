mod common;

use common::EcosystemBuilder;
use symbiont_core::error::EngineError;
use symbiont_data::LiveEvent;
use uuid::Uuid;

/// Scenario: population never exceeds the seeded count plus cumulative
/// successful reproductions at any harvested tick boundary.
#[test]
fn test_population_bounded_by_births() {
    let (mut eco, _) = EcosystemBuilder::new().with_seed(30).with_population(30).build();

    let mut cumulative_births = 0;
    for _ in 0..20 {
        let events = eco.step(1.0);
        cumulative_births += events
            .iter()
            .filter(|e| matches!(e, LiveEvent::Birth { .. }))
            .count();
        assert!(
            eco.population_count() <= 30 + cumulative_births,
            "population {} exceeded 30 + {} births",
            eco.population_count(),
            cumulative_births
        );
    }
}

#[test]
fn test_duplicate_add_leaves_existing_entry_untouched() {
    let (mut eco, ids) = EcosystemBuilder::new().with_seed(31).with_population(1).build();
    let id = ids[0];

    let mut impostor = eco.get(id).unwrap().clone();
    impostor.health = 0.25;
    impostor.age = 99.0;

    assert_eq!(eco.add(impostor), Err(EngineError::DuplicateEntity(id)));
    assert_population!(eco, 1);
    let original = eco.get(id).unwrap();
    assert_eq!(original.health, 1.0);
    assert_eq!(original.age, 0.0);
}

#[test]
fn test_dead_organisms_are_eventually_evicted() {
    // A population of one can never connect, dies of isolation, and the
    // periodic eviction then clears the corpse from the map.
    let (mut eco, ids) = EcosystemBuilder::new().with_seed(32).with_population(1).build();

    for _ in 0..150 {
        eco.step(1.0);
    }

    assert_eq!(eco.living_count(), 0);
    assert_population!(eco, 0);
    for id in ids {
        assert_dead!(eco, id);
    }
}

#[test]
fn test_eviction_is_bookkeeping_only() {
    let (mut eco, ids) = EcosystemBuilder::new()
        .with_seed(33)
        .with_population(3)
        .with_config(|config| {
            config.ecosystem.evict_chance = 0.0;
            // No seek-connection: every organism stays isolated and dies.
            config.organism.min_connections = 0;
        })
        .build();

    for _ in 0..80 {
        eco.step(1.0);
    }

    // Without eviction the corpses stay registered but inert.
    assert_population!(eco, 3);
    assert_eq!(eco.living_count(), 0);
    for id in ids {
        let organism = eco.get(id).unwrap();
        assert!(!organism.is_alive());
        assert_eq!(organism.health, 0.0);
    }
}

/// Two identical seeded runs, one with the overpopulation threshold in
/// reach and one with it out of reach: they only differ by the pressure
/// factor applied to the weakest organisms.
#[test]
fn test_overpopulation_pressure_hits_weakest() {
    fn run(threshold: usize) -> Vec<(Uuid, f64)> {
        let (mut eco, ids) = EcosystemBuilder::new()
            .with_seed(34)
            .with_population(12)
            .with_config(move |config| {
                config.ecosystem.overpopulation_threshold = threshold;
                config.ecosystem.event_chance = 0.0;
                config.ecosystem.evict_chance = 0.0;
            })
            .build();
        eco.step(1.0);
        ids.iter()
            .map(|id| (*id, eco.get(*id).unwrap().health))
            .collect()
    }

    let pressured = run(10);
    let unpressured = run(100);

    let mut squeezed = 0;
    for ((id_a, health_a), (id_b, health_b)) in pressured.iter().zip(&unpressured) {
        assert_eq!(id_a, id_b, "seeded runs spawn identical organisms");
        if health_a == health_b {
            continue;
        }
        // The only divergence allowed is the 0.9 pressure factor.
        assert!(
            (health_a - health_b * 0.9).abs() < 1e-12,
            "unexpected health divergence: {} vs {}",
            health_a,
            health_b
        );
        assert!(health_a < health_b);
        squeezed += 1;
    }
    assert_eq!(squeezed, 2, "exactly the configured victim count is hit");
}

#[test]
fn test_spawned_organisms_get_unique_ids() {
    let (eco, ids) = EcosystemBuilder::new().with_seed(35).with_population(50).build();
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
    assert_population!(eco, 50);
}
