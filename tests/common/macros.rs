/// Asserts that the total population count matches the expected value.
#[macro_export]
macro_rules! assert_population {
    ($eco:expr, $count:expr) => {
        assert_eq!(
            $eco.population_count(),
            $count,
            "Population count mismatch"
        );
    };
}

/// Asserts that the organism with the given ID is registered and alive.
#[macro_export]
macro_rules! assert_alive {
    ($eco:expr, $id:expr) => {
        let organism = $eco.get($id).expect("Organism not found in ecosystem");
        assert!(
            organism.is_alive(),
            "Organism {} should be alive but is dead",
            $id
        );
    };
}

/// Asserts that the organism with the given ID is dead (or already evicted).
#[macro_export]
macro_rules! assert_dead {
    ($eco:expr, $id:expr) => {
        if let Some(organism) = $eco.get($id) {
            assert!(
                !organism.is_alive(),
                "Organism {} should be dead but was found alive",
                $id
            );
        }
    };
}
