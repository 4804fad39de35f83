/// Asserts that the organism with the given id has exactly this much food.
#[macro_export]
macro_rules! assert_food {
    ($world:expr, $id:expr, $food:expr) => {
        let org = $world.organism($id).expect("Organism not found in world");
        assert_eq!(org.food, $food, "Organism {} food mismatch", $id);
    };
}

/// Asserts that the slot of the given id is empty.
#[macro_export]
macro_rules! assert_organism_dead {
    ($world:expr, $id:expr) => {
        assert!(
            $world.organism($id).is_none(),
            "Organism {} should be dead but was found alive",
            $id
        );
    };
}

/// Asserts the live population count.
#[macro_export]
macro_rules! assert_population {
    ($world:expr, $count:expr) => {
        assert_eq!(
            $world.population().len(),
            $count,
            "Population count mismatch"
        );
    };
}
