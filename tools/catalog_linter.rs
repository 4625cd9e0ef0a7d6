/// Catalog Linter: validates catalog cross-references and coverage.
///
/// Usage: catalog_linter <catalog_dir>
use npc_forge::core::catalog::Catalog;
use npc_forge::core::coherence::is_compatible;
use npc_forge::core::names::FALLBACK_POOL;
use npc_forge::schema::attribute::AttributeKind;
use npc_forge::schema::character::AgeCategory;
use rustc_hash::FxHashSet;
use std::path::Path;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: catalog_linter <catalog_dir>");
        process::exit(0);
    }

    let catalog_dir = Path::new(&args[1]);
    if !catalog_dir.is_dir() {
        eprintln!("ERROR: Path '{}' is not a directory", catalog_dir.display());
        process::exit(1);
    }

    let catalog = match Catalog::load_from_dir(catalog_dir) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    println!(
        "Loaded {} races, {} classes, {} name pools, {} quirks, {} traits, {} flaws, {} family templates",
        catalog.races.len(),
        catalog.classes.len(),
        catalog.names.len(),
        catalog.quirks.len(),
        catalog.traits.len(),
        catalog.flaws.len(),
        catalog.family_templates.len()
    );

    let (errors, warnings) = lint_catalog(&catalog);

    println!("\n=== Catalog Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn lint_catalog(catalog: &Catalog) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let race_ids: FxHashSet<&str> = catalog.races.iter().map(|r| r.id.as_str()).collect();
    let class_ids: FxHashSet<&str> = catalog.classes.iter().map(|c| c.id.as_str()).collect();
    let age_tags: FxHashSet<&str> = AgeCategory::all().iter().map(|c| c.tag()).collect();

    // Lifespans
    for race in &catalog.races {
        match race.age_ranges {
            None => errors.push(format!("race '{}' has no age range", race.id)),
            Some(range) if range.min > range.max => errors.push(format!(
                "race '{}' has inverted age range {}-{}",
                race.id, range.min, range.max
            )),
            Some(_) => {}
        }
    }

    // Tags and conflicts
    for kind in AttributeKind::all() {
        let items = catalog.attributes_of(*kind);
        let ids: FxHashSet<&str> = items.iter().map(|a| a.id.as_str()).collect();
        let label = kind.catalog_name();

        for item in items {
            for tag in &item.race_tags {
                if !race_ids.contains(tag.as_str()) {
                    errors.push(format!("{} '{}' has unknown race tag '{}'", label, item.id, tag));
                }
            }
            for tag in &item.class_tags {
                if !class_ids.contains(tag.as_str()) {
                    errors.push(format!("{} '{}' has unknown class tag '{}'", label, item.id, tag));
                }
            }
            for tag in &item.age_tags {
                if !age_tags.contains(tag.as_str()) {
                    errors.push(format!("{} '{}' has unknown age tag '{}'", label, item.id, tag));
                }
            }
            for other in &item.conflicts_with {
                if !ids.contains(other.as_str()) {
                    errors.push(format!(
                        "{} '{}' conflicts with unknown id '{}'",
                        label, item.id, other
                    ));
                }
            }
        }

        // Coverage: every race and life stage should have something to draw
        // even without a class.
        if items.is_empty() {
            warnings.push(format!("{} catalog is empty", label));
            continue;
        }
        for race in &catalog.races {
            for category in AgeCategory::all() {
                let any = items
                    .iter()
                    .any(|item| is_compatible(item, Some(race), None, *category));
                if !any {
                    warnings.push(format!(
                        "no {} available for a classless {} {}",
                        label,
                        category.tag(),
                        race.id
                    ));
                }
            }
        }
    }

    // Name pools
    if !catalog.names.contains_key(FALLBACK_POOL) {
        errors.push(format!("no '{}' name pool to fall back on", FALLBACK_POOL));
    }
    for race in &catalog.races {
        if !catalog.names.contains_key(&race.id) {
            warnings.push(format!(
                "race '{}' has no name pool (uses '{}')",
                race.id, FALLBACK_POOL
            ));
        }
    }
    let mut pool_ids: Vec<&String> = catalog.names.keys().collect();
    pool_ids.sort();
    for id in pool_ids {
        if catalog.names[id].has_no_first_names() {
            warnings.push(format!("name pool '{}' has no first names", id));
        }
    }

    // Family templates
    if !catalog
        .family_templates
        .iter()
        .any(|t| t.has_extended_family)
    {
        warnings.push(
            "no family template has extended family; venerable characters always use the fallback"
                .to_string(),
        );
    }

    (errors, warnings)
}
