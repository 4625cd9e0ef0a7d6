/// Attribute generation: age, gender, and tag-filtered quirks, traits
/// and flaws for a subject.
use rand::Rng;

use crate::core::catalog::{CatalogLoadError, CatalogProvider};
use crate::core::coherence::{age_range_for_race, filter_by_compatibility, resolve_trait_conflicts};
use crate::core::random::{int_in, pick_many};
use crate::schema::attribute::{Attribute, AttributeKind};
use crate::schema::character::Gender;
use crate::schema::race::{CharacterClass, Race};

/// Gender draw weights, scanned cumulatively in this order.
pub const GENDER_WEIGHTS: [(Gender, f64); 3] = [
    (Gender::Male, 0.48),
    (Gender::Female, 0.48),
    (Gender::Nonbinary, 0.04),
];

/// Draw an age within the race's range (18-80 when unknown).
///
/// Averages three uniform draws, which favours the middle of the range
/// over its ends.
pub fn generate_age<R: Rng + ?Sized>(race: Option<&Race>, rng: &mut R) -> u32 {
    let range = age_range_for_race(race);
    let (min, max) = (range.min as i64, range.max as i64);

    let total: i64 = (0..3).map(|_| int_in(min, max, rng)).sum();
    (total / 3) as u32
}

/// Draw a gender from [`GENDER_WEIGHTS`].
pub fn generate_gender<R: Rng + ?Sized>(rng: &mut R) -> Gender {
    gender_for_roll(rng.gen::<f64>())
}

/// Map a roll in `[0, 1)` onto [`GENDER_WEIGHTS`]. Rolls past the last
/// cumulative bound (float rounding) land on nonbinary.
pub fn gender_for_roll(roll: f64) -> Gender {
    let mut cumulative = 0.0;
    for (gender, weight) in GENDER_WEIGHTS {
        cumulative += weight;
        if roll < cumulative {
            return gender;
        }
    }
    Gender::Nonbinary
}

/// Draw `count` compatible attributes of `kind` for the subject.
///
/// Traits are additionally pruned of conflicting pairs, so fewer than
/// `count` may come back.
pub fn generate_attributes<P, R>(
    provider: &P,
    kind: AttributeKind,
    race: Option<&Race>,
    class: Option<&CharacterClass>,
    age: u32,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Attribute>, CatalogLoadError>
where
    P: CatalogProvider + ?Sized,
    R: Rng + ?Sized,
{
    let all = provider.attributes(kind)?;
    let compatible = filter_by_compatibility(&all, race, class, age);
    log::debug!(
        "{} compatible {} of {} for race {:?}, age {}",
        compatible.len(),
        kind.catalog_name(),
        all.len(),
        race.map(|r| &r.id),
        age
    );

    let selected = pick_many(&compatible, count, rng);
    Ok(match kind {
        AttributeKind::Trait => resolve_trait_conflicts(&selected),
        AttributeKind::Quirk | AttributeKind::Flaw => selected,
    })
}

pub fn generate_quirks<P, R>(
    provider: &P,
    race: Option<&Race>,
    class: Option<&CharacterClass>,
    age: u32,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Attribute>, CatalogLoadError>
where
    P: CatalogProvider + ?Sized,
    R: Rng + ?Sized,
{
    generate_attributes(provider, AttributeKind::Quirk, race, class, age, count, rng)
}

pub fn generate_traits<P, R>(
    provider: &P,
    race: Option<&Race>,
    class: Option<&CharacterClass>,
    age: u32,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Attribute>, CatalogLoadError>
where
    P: CatalogProvider + ?Sized,
    R: Rng + ?Sized,
{
    generate_attributes(provider, AttributeKind::Trait, race, class, age, count, rng)
}

pub fn generate_flaws<P, R>(
    provider: &P,
    race: Option<&Race>,
    class: Option<&CharacterClass>,
    age: u32,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Attribute>, CatalogLoadError>
where
    P: CatalogProvider + ?Sized,
    R: Rng + ?Sized,
{
    generate_attributes(provider, AttributeKind::Flaw, race, class, age, count, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;
    use crate::schema::race::AgeRange;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn race(id: &str, min: u32, max: u32) -> Race {
        Race {
            id: id.to_string(),
            name: id.to_string(),
            age_ranges: Some(AgeRange { min, max }),
        }
    }

    fn catalog() -> Catalog {
        Catalog {
            traits: vec![
                Attribute::new("brave", "").with_conflicts(&["cowardly"]),
                Attribute::new("cowardly", "").with_conflicts(&["brave"]),
                Attribute::new("curious", ""),
                Attribute::new("stoic", "").with_race_tags(&["dwarf"]),
            ],
            quirks: vec![
                Attribute::new("hums", ""),
                Attribute::new("collects-spoons", ""),
                Attribute::new("braids-beard", "").with_race_tags(&["dwarf"]),
            ],
            flaws: vec![
                Attribute::new("greedy", "").with_age_tags(&["adult"]),
                Attribute::new("reckless", "").with_age_tags(&["young"]),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn age_stays_in_range() {
        let elf = race("elf", 20, 750);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let age = generate_age(Some(&elf), &mut rng);
            assert!((20..=750).contains(&age));
        }
        for _ in 0..1000 {
            let age = generate_age(None, &mut rng);
            assert!((18..=80).contains(&age));
        }
    }

    #[test]
    fn age_clusters_toward_middle() {
        let r = race("test", 0, 99);
        let mut rng = StdRng::seed_from_u64(2);
        let middle = (0..3000)
            .map(|_| generate_age(Some(&r), &mut rng))
            .filter(|age| (25..75).contains(age))
            .count();
        // A single uniform draw lands in the middle half about 50% of the time.
        assert!(middle > 2000, "middle count {}", middle);
    }

    #[test]
    fn age_for_single_year_range() {
        let r = race("test", 42, 42);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(generate_age(Some(&r), &mut rng), 42);
    }

    #[test]
    fn gender_roll_boundaries() {
        assert_eq!(gender_for_roll(0.0), Gender::Male);
        assert_eq!(gender_for_roll(0.4799), Gender::Male);
        assert_eq!(gender_for_roll(0.48), Gender::Female);
        assert_eq!(gender_for_roll(0.95), Gender::Female);
        assert_eq!(gender_for_roll(0.96), Gender::Nonbinary);
        assert_eq!(gender_for_roll(0.99999), Gender::Nonbinary);
        assert_eq!(gender_for_roll(1.0), Gender::Nonbinary);
    }

    #[test]
    fn gender_distribution() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0usize; 3];
        for _ in 0..10_000 {
            match generate_gender(&mut rng) {
                Gender::Male => counts[0] += 1,
                Gender::Female => counts[1] += 1,
                Gender::Nonbinary => counts[2] += 1,
            }
        }
        assert!((4500..5100).contains(&counts[0]), "{:?}", counts);
        assert!((4500..5100).contains(&counts[1]), "{:?}", counts);
        assert!((250..550).contains(&counts[2]), "{:?}", counts);
    }

    #[test]
    fn traits_never_contain_both_sides_of_a_conflict() {
        let catalog = catalog();
        let human = race("human", 18, 80);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let traits = generate_traits(&catalog, Some(&human), None, 30, 3, &mut rng).unwrap();
            let has = |id: &str| traits.iter().any(|t| t.id == id);
            assert!(!(has("brave") && has("cowardly")));
            assert!(!has("stoic"));
            assert!(traits.len() >= 2);
        }
    }

    #[test]
    fn quirks_respect_race_tags() {
        let catalog = catalog();
        let dwarf = race("dwarf", 50, 350);
        let mut rng = StdRng::seed_from_u64(6);
        let quirks = generate_quirks(&catalog, Some(&dwarf), None, 100, 10, &mut rng).unwrap();
        assert_eq!(quirks.len(), 3);

        let human = race("human", 18, 80);
        let quirks = generate_quirks(&catalog, Some(&human), None, 30, 10, &mut rng).unwrap();
        assert_eq!(quirks.len(), 2);
        assert!(quirks.iter().all(|q| q.id != "braids-beard"));
    }

    #[test]
    fn flaws_respect_age_tags() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(7);
        // No race: fixed breakpoints, 30 is adult.
        let flaws = generate_flaws(&catalog, None, None, 30, 1, &mut rng).unwrap();
        assert_eq!(flaws.len(), 1);
        assert_eq!(flaws[0].id, "greedy");

        let flaws = generate_flaws(&catalog, None, None, 15, 3, &mut rng).unwrap();
        assert_eq!(flaws.len(), 1);
        assert_eq!(flaws[0].id, "reckless");
    }

    #[test]
    fn zero_count_yields_nothing() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(8);
        assert!(generate_quirks(&catalog, None, None, 30, 0, &mut rng)
            .unwrap()
            .is_empty());
    }
}
