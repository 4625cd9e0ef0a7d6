//! Property-based tests for the coherence rules and attribute generator
//!
//! Tests invariants:
//! - Age category never decreases as age increases
//! - Untagged records are never filtered out
//! - Conflict resolution is idempotent
//! - Generated ages stay within the race's range

use npc_forge::core::attributes::generate_age;
use npc_forge::core::coherence::{age_category, filter_by_compatibility, resolve_trait_conflicts};
use npc_forge::schema::attribute::Attribute;
use npc_forge::schema::race::{AgeRange, CharacterClass, Race};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ============================================================================
// Strategies
// ============================================================================

fn arb_race() -> impl Strategy<Value = Race> {
    (0u32..500, 1u32..1000).prop_map(|(min, span)| Race {
        id: "arb".to_string(),
        name: "Arbitrary".to_string(),
        age_ranges: Some(AgeRange {
            min,
            max: min + span,
        }),
    })
}

fn arb_optional_race() -> impl Strategy<Value = Option<Race>> {
    prop_oneof![Just(None), arb_race().prop_map(Some)]
}

fn arb_optional_class() -> impl Strategy<Value = Option<CharacterClass>> {
    prop::option::of("[a-z]{3,8}".prop_map(|id| CharacterClass {
        name: id.clone(),
        id,
    }))
}

/// Records drawn from a small id space so conflicts actually collide.
fn arb_attribute() -> impl Strategy<Value = Attribute> {
    (
        "[a-f]",
        prop::collection::vec("[a-f]", 0..3),
    )
        .prop_map(|(id, conflicts)| {
            let conflicts: Vec<&str> = conflicts.iter().map(String::as_str).collect();
            Attribute::new(id.clone(), id.clone()).with_conflicts(&conflicts)
        })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn age_category_is_monotonic(race in arb_optional_race(), age in 0u32..2000, step in 0u32..200) {
        let earlier = age_category(age, race.as_ref());
        let later = age_category(age + step, race.as_ref());
        prop_assert!(earlier <= later);
    }

    #[test]
    fn untagged_records_are_never_filtered(
        race in arb_optional_race(),
        class in arb_optional_class(),
        age in 0u32..2000,
        ids in prop::collection::vec("[a-z]{1,6}", 0..10),
    ) {
        let items: Vec<Attribute> = ids.iter().map(|id| Attribute::new(id.clone(), "")).collect();
        let kept = filter_by_compatibility(&items, race.as_ref(), class.as_ref(), age);
        prop_assert_eq!(kept, items);
    }

    #[test]
    fn conflict_resolution_is_idempotent(items in prop::collection::vec(arb_attribute(), 0..8)) {
        let once = resolve_trait_conflicts(&items);
        let twice = resolve_trait_conflicts(&once);
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.len() <= items.len());
    }

    #[test]
    fn generated_age_within_race_range(race in arb_race(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let age = generate_age(Some(&race), &mut rng);
        let range = race.age_ranges.unwrap();
        prop_assert!(range.contains(age), "{} outside {:?}", age, range);
    }
}
