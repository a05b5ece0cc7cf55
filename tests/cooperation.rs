mod common;

use common::EcosystemBuilder;
use symbiont_data::ActionKind;

/// Scenario: two organisms are connected through the connection operation,
/// then one cooperates. Both relation strengths rise and stay symmetric.
#[test]
fn test_cooperate_strengthens_both_sides_symmetrically() {
    let (mut eco, ids) = EcosystemBuilder::new().with_seed(5).with_population(2).build();
    let (a, b) = (ids[0], ids[1]);

    eco.connect(a, b, 0.5).unwrap();

    let executed = eco.perform(a, ActionKind::Cooperate).unwrap();
    assert!(executed, "a fresh organism can afford cooperation");

    let forward = eco.get(a).unwrap().relations[&b];
    let backward = eco.get(b).unwrap().relations[&a];
    assert!(forward > 0.5, "cooperating raised the initiator's edge");
    assert_eq!(forward, backward, "relation stayed symmetric");
}

#[test]
fn test_teach_strengthens_relations_and_spends_knowledge() {
    let (mut eco, ids) = EcosystemBuilder::new().with_seed(6).with_population(2).build();
    let (a, b) = (ids[0], ids[1]);
    eco.connect(a, b, 0.4).unwrap();
    eco.get_mut(a).unwrap().pool.knowledge.current = 30.0;

    let executed = eco.perform(a, ActionKind::Teach).unwrap();
    assert!(executed);

    let knowledge = eco.get(a).unwrap().pool.knowledge.current;
    assert!(knowledge < 30.0, "teaching spends knowledge");

    let forward = eco.get(a).unwrap().relations[&b];
    let backward = eco.get(b).unwrap().relations[&a];
    assert_eq!(forward, backward);
    assert!(forward > 0.4);
}

/// Relation strengths stay symmetric across whole simulated runs, not just
/// after a single hand-driven action.
#[test]
fn test_relations_remain_symmetric_across_ticks() {
    let (mut eco, ids) = EcosystemBuilder::new().with_seed(7).with_population(6).build();

    for window in ids.windows(2) {
        eco.connect(window[0], window[1], 0.5).unwrap();
    }

    for _ in 0..60 {
        eco.step(1.0);

        let report = eco.report();
        for organism in &report.organisms {
            let Some(me) = eco.get(organism.id) else { continue };
            for (&peer, &strength) in &me.relations {
                let Some(other) = eco.get(peer) else { continue };
                let mirrored = other.relations.get(&me.id);
                assert_eq!(
                    mirrored,
                    Some(&strength),
                    "asymmetric edge between {} and {}",
                    me.id,
                    peer
                );
            }
        }
    }
}
