/// Tavern Roster example: populates a village inn with regulars.
///
/// A landlord with a full family, a handful of patrons of assorted races,
/// and one patron who gets a second look after a round of regeneration.
///
/// Run with: cargo run --example tavern_roster
use npc_forge::core::generator::NpcGenerator;
use npc_forge::schema::attribute::Attribute;
use npc_forge::schema::character::{Gender, Npc};
use npc_forge::schema::request::{GenerationParams, RegenField};

fn main() {
    let mut forge = NpcGenerator::builder()
        .catalog_dir("catalog_data")
        .cache(true)
        .seed(1879)
        .build()
        .expect("Failed to build generator");

    // --- The landlord, with family ---
    let landlord = forge
        .generate(
            &GenerationParams::new()
                .race("dwarf")
                .gender(Gender::Female)
                .age(160)
                .with_family(2),
        )
        .expect("Failed to generate landlord");

    println!("=== The Copper Kettle ===\n");
    println!("Landlord:");
    describe(&landlord);

    if let Some(tree) = &landlord.family_tree {
        println!("  Family ({} relatives):", tree.member_count());
        for member in tree.members() {
            let status = if member.is_alive { "" } else { ", deceased" };
            println!(
                "    {:<16} {} ({}{})",
                member.relation.label(),
                member.name,
                member.age,
                status
            );
        }
    }

    // --- Regulars ---
    println!("\nRegulars:");
    let races = forge.provider().races().expect("Failed to read races");
    let mut regulars = Vec::new();
    for race in races.iter().take(5) {
        let npc = forge
            .generate(&GenerationParams::new().race(race.id.clone()))
            .expect("Failed to generate regular");
        describe(&npc);
        regulars.push(npc);
    }

    // --- A second look at the first regular ---
    if let Some(first) = regulars.first() {
        let revised = forge
            .regenerate(first, &[RegenField::Name, RegenField::Quirks])
            .expect("Failed to regenerate");
        println!("\nOn closer inspection, {} turns out to be:", first.name);
        describe(&revised);
    }
}

fn describe(npc: &Npc) {
    let race = npc.race.as_ref().map(|r| r.name.as_str()).unwrap_or("stranger");
    let class = npc.class.as_ref().map(|c| c.name.as_str()).unwrap_or("wanderer");
    println!("  {}: {} {} ({}, {})", npc.name, race, class, npc.age, npc.gender.label());

    let ids = |items: &[Attribute]| {
        items.iter().map(|a| a.id.as_str()).collect::<Vec<_>>().join(", ")
    };
    println!("    quirks: {}", ids(&npc.quirks));
    println!("    traits: {}", ids(&npc.traits));
    println!("    flaws:  {}", ids(&npc.flaws));
}
