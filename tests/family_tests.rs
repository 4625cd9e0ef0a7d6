/// Family tree integration tests: relation rules and age guards.
use npc_forge::core::catalog::Catalog;
use npc_forge::core::family::{generate_family_tree, select_template};
use npc_forge::schema::character::{Gender, Npc};
use npc_forge::schema::family::{FamilyTemplate, Relation};
use npc_forge::schema::race::{AgeRange, Race};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

fn race(id: &str, min: u32, max: u32) -> Race {
    Race {
        id: id.to_string(),
        name: id.to_string(),
        age_ranges: Some(AgeRange { min, max }),
    }
}

fn subject(race: Race, name: &str, age: u32, gender: Gender) -> Npc {
    Npc {
        race: Some(race),
        class: None,
        age,
        gender,
        name: name.to_string(),
        quirks: Vec::new(),
        traits: Vec::new(),
        flaws: Vec::new(),
        family_tree: None,
    }
}

fn only_template(template: FamilyTemplate) -> Catalog {
    let mut catalog = Catalog::load_from_dir(Path::new("catalog_data")).unwrap();
    catalog.family_templates = vec![template];
    catalog
}

fn children_only() -> FamilyTemplate {
    FamilyTemplate {
        id: Some("children".to_string()),
        has_parents: false,
        has_siblings: false,
        has_spouse: false,
        has_children: true,
        has_extended_family: false,
    }
}

#[test]
fn aldric_stone_parents() {
    let catalog = only_template(FamilyTemplate {
        id: Some("parents".to_string()),
        has_parents: true,
        has_siblings: false,
        has_spouse: false,
        has_children: false,
        has_extended_family: false,
    });
    let aldric = subject(race("human", 18, 80), "Aldric Stone", 30, Gender::Male);

    for seed in 0..200 {
        let tree = generate_family_tree(&catalog, &aldric, 1, &mut StdRng::seed_from_u64(seed));
        assert_eq!(tree.parents.len(), 2);
        let father = tree
            .parents
            .iter()
            .find(|m| m.relation == Relation::Father)
            .unwrap();
        let mother = tree
            .parents
            .iter()
            .find(|m| m.relation == Relation::Mother)
            .unwrap();
        assert!((50..=70).contains(&father.age));
        assert!((50..=65).contains(&mother.age));
        assert!(father.name.contains("Stone"), "{}", father.name);
        assert!(mother.name.contains("Stone"), "{}", mother.name);
        assert!(tree.siblings.is_empty());
        assert!(tree.spouse.is_none());
        assert!(tree.children.is_empty());
        assert!(tree.extended_family.is_empty());
    }
}

#[test]
fn ten_year_old_never_has_children() {
    let catalog = only_template(children_only());
    let kid = subject(race("human", 0, 100), "Pip Underhill", 10, Gender::Female);
    for seed in 0..200 {
        let tree = generate_family_tree(&catalog, &kid, 2, &mut StdRng::seed_from_u64(seed));
        assert!(tree.children.is_empty());
    }
}

#[test]
fn seventeen_year_old_has_zero_children_even_when_requested() {
    // Range 0-100 puts 17 in the young band, where a children template is
    // valid from 16.
    let teen_race = race("test", 0, 100);
    let template = children_only();
    assert_eq!(
        select_template(
            std::slice::from_ref(&template),
            Some(&teen_race),
            17,
            &mut StdRng::seed_from_u64(0)
        ),
        template
    );

    let catalog = only_template(template);
    let teen = subject(teen_race, "Maren Hale", 17, Gender::Female);
    for seed in 0..200 {
        let tree = generate_family_tree(&catalog, &teen, 1, &mut StdRng::seed_from_u64(seed));
        assert_eq!(tree.template_id.as_deref(), Some("children"));
        assert!(tree.children.is_empty());
    }
}

#[test]
fn venerable_subjects_only_get_extended_templates() {
    let catalog = Catalog::load_from_dir(Path::new("catalog_data")).unwrap();
    let elder = subject(race("human", 18, 80), "Osric Marsh", 79, Gender::Male);
    for seed in 0..100 {
        let template = select_template(
            &catalog.family_templates,
            elder.race.as_ref(),
            elder.age,
            &mut StdRng::seed_from_u64(seed),
        );
        assert!(template.has_extended_family, "{:?}", template.id);
    }
}

#[test]
fn extended_family_counts_are_bounded() {
    let catalog = only_template(FamilyTemplate {
        id: Some("extended".to_string()),
        has_parents: false,
        has_siblings: false,
        has_spouse: false,
        has_children: false,
        has_extended_family: true,
    });
    let s = subject(race("elf", 100, 750), "Aerin Liadon", 300, Gender::Nonbinary);
    let mut kinds_seen = std::collections::BTreeSet::new();
    for seed in 0..200 {
        let tree = generate_family_tree(&catalog, &s, 3, &mut StdRng::seed_from_u64(seed));
        let extended: Vec<_> = tree.members().filter(|m| m.relation.is_extended()).collect();
        assert!((1..=6).contains(&extended.len()));
        for member in extended {
            kinds_seen.insert(member.relation.label());
        }
    }
    for label in ["grandparent", "uncle", "aunt", "cousin"] {
        assert!(kinds_seen.contains(label), "never generated {}", label);
    }
}

#[test]
fn survival_odds_look_right() {
    let catalog = only_template(FamilyTemplate {
        id: Some("parents".to_string()),
        has_parents: true,
        has_siblings: false,
        has_spouse: false,
        has_children: false,
        has_extended_family: false,
    });
    let s = subject(race("human", 18, 80), "Bram Cooper", 40, Gender::Male);
    let mut fathers_alive = 0;
    let mut mothers_alive = 0;
    let trials = 2000;
    for seed in 0..trials {
        let tree = generate_family_tree(&catalog, &s, 1, &mut StdRng::seed_from_u64(seed));
        fathers_alive += tree.parents[0].is_alive as u32;
        mothers_alive += tree.parents[1].is_alive as u32;
    }
    // 0.7 and 0.8 with generous tolerance
    assert!((1250..=1550).contains(&fathers_alive), "{}", fathers_alive);
    assert!((1450..=1750).contains(&mothers_alive), "{}", mothers_alive);
}
