/// Name synthesis: display names and family surnames from race pools.
use rand::Rng;

use crate::core::catalog::{NameCatalog, NamePool};
use crate::core::random::{chance, pick};
use crate::schema::character::Gender;
use crate::schema::race::Race;

/// Pool used for unknown races.
pub const FALLBACK_POOL: &str = "human";
/// Name given when no first names are available.
pub const PLACEHOLDER_NAME: &str = "Unknown";

const SURNAME_CHANCE: f64 = 0.8;
const TITLE_CHANCE: f64 = 0.1;

/// Find the name pool for a race, falling back to the human pool.
pub fn resolve_pool<'a>(names: &'a NameCatalog, race: Option<&Race>) -> Option<&'a NamePool> {
    let race_id = race.map(|r| r.id.as_str()).unwrap_or(FALLBACK_POOL);
    names.get(race_id).or_else(|| names.get(FALLBACK_POOL))
}

/// Generate a display name: a first name, usually a surname, and
/// occasionally a leading title.
pub fn generate_name<R: Rng + ?Sized>(
    names: &NameCatalog,
    race: Option<&Race>,
    gender: Gender,
    rng: &mut R,
) -> String {
    let Some(pool) = resolve_pool(names, race) else {
        log::debug!("no name pool for race {:?}", race.map(|r| &r.id));
        return PLACEHOLDER_NAME.to_string();
    };

    let mut full_name = pick(pool.first_names(gender), rng)
        .cloned()
        .unwrap_or_else(|| PLACEHOLDER_NAME.to_string());

    let surnames = pool.surnames();
    if !surnames.is_empty() && chance(SURNAME_CHANCE, rng) {
        if let Some(surname) = pick(surnames, rng) {
            full_name = format!("{} {}", full_name, surname);
        }
    }

    let titles = pool.titles();
    if !titles.is_empty() && chance(TITLE_CHANCE, rng) {
        if let Some(title) = pick(titles, rng) {
            full_name = format!("{} {}", title, full_name);
        }
    }

    full_name
}

/// Draw a bare surname for a whole family. Empty when the pool has none.
pub fn generate_family_name<R: Rng + ?Sized>(
    names: &NameCatalog,
    race: Option<&Race>,
    rng: &mut R,
) -> String {
    resolve_pool(names, race)
        .and_then(|pool| pick(pool.surnames(), rng))
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn strings(items: &[&str]) -> Option<Vec<String>> {
        Some(items.iter().map(|s| s.to_string()).collect())
    }

    fn names() -> NameCatalog {
        let mut catalog = NameCatalog::default();
        catalog.insert(
            "human".to_string(),
            NamePool {
                male: strings(&["Aldric", "Bram"]),
                female: strings(&["Wren", "Mira"]),
                surnames: strings(&["Stone", "Hale"]),
                ..Default::default()
            },
        );
        catalog.insert(
            "elf".to_string(),
            NamePool {
                all: strings(&["Ilyra"]),
                surnames: strings(&["Moonwhisper"]),
                titles: strings(&["Lady"]),
                ..Default::default()
            },
        );
        catalog.insert(
            "orc".to_string(),
            NamePool {
                male: strings(&["Grak"]),
                ..Default::default()
            },
        );
        catalog
    }

    fn race(id: &str) -> Race {
        Race {
            id: id.to_string(),
            name: id.to_string(),
            age_ranges: None,
        }
    }

    #[test]
    fn unknown_race_uses_human_pool() {
        let names = names();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let name = generate_name(&names, Some(&race("kobold")), Gender::Male, &mut rng);
            let first = name.split(' ').next().unwrap();
            assert!(first == "Aldric" || first == "Bram", "got {}", name);
        }
        let name = generate_name(&names, None, Gender::Female, &mut rng);
        assert!(name.starts_with("Wren") || name.starts_with("Mira"));
    }

    #[test]
    fn surname_appears_most_of_the_time() {
        let names = names();
        let mut rng = StdRng::seed_from_u64(2);
        let with_surname = (0..1000)
            .filter(|_| generate_name(&names, None, Gender::Male, &mut rng).contains(' '))
            .count();
        assert!(with_surname > 740 && with_surname < 860, "{}", with_surname);
    }

    #[test]
    fn titles_are_rare_and_leading() {
        let names = names();
        let elf = race("elf");
        let mut rng = StdRng::seed_from_u64(3);
        let mut titled = 0;
        for _ in 0..1000 {
            let name = generate_name(&names, Some(&elf), Gender::Nonbinary, &mut rng);
            if name.starts_with("Lady ") {
                titled += 1;
                assert!(name.contains("Ilyra"));
            } else {
                assert!(name.starts_with("Ilyra"));
            }
        }
        assert!(titled > 60 && titled < 140, "{}", titled);
    }

    #[test]
    fn pool_without_surnames_gives_bare_names() {
        let names = names();
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..20 {
            assert_eq!(generate_name(&names, Some(&race("orc")), Gender::Female, &mut rng), "Grak");
        }
        assert_eq!(generate_family_name(&names, Some(&race("orc")), &mut rng), "");
    }

    #[test]
    fn empty_catalog_gives_placeholder() {
        let empty = NameCatalog::default();
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(generate_name(&empty, None, Gender::Male, &mut rng), PLACEHOLDER_NAME);
        assert_eq!(generate_family_name(&empty, None, &mut rng), "");
    }

    #[test]
    fn family_name_comes_from_surnames() {
        let names = names();
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..20 {
            let surname = generate_family_name(&names, Some(&race("human")), &mut rng);
            assert!(surname == "Stone" || surname == "Hale");
        }
    }
}
