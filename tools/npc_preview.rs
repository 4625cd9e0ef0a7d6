/// NPC Preview: interactive generation shell for testing catalogs.
///
/// Usage: npc_preview --catalog <dir> [--seed <n>]
///
/// Commands:
///   npc [race] [class]   generate an NPC (random race/class when omitted)
///   family <depth>       generate a family tree for the current NPC
///   regen <f1,f2,...>    regenerate fields of the current NPC
///   json                 print the current NPC as JSON
///   seed <n>             set RNG seed
///   help                 list commands
///   quit                 exit
use npc_forge::core::coherence::age_category;
use npc_forge::core::generator::NpcGenerator;
use npc_forge::schema::attribute::Attribute;
use npc_forge::schema::character::Npc;
use npc_forge::schema::family::{FamilyMember, FamilyTree};
use npc_forge::schema::request::{GenerationParams, RegenField};
use std::io::{self, BufRead, Write};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let mut catalog_path = None;
    let mut seed: u64 = 42;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--catalog" if i + 1 < args.len() => {
                i += 1;
                catalog_path = Some(args[i].clone());
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = args[i].parse().unwrap_or(42);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let Some(catalog_path) = catalog_path else {
        eprintln!("Missing --catalog <dir>");
        print_usage();
        std::process::exit(1);
    };

    let mut forge = match NpcGenerator::builder()
        .catalog_dir(&catalog_path)
        .cache(true)
        .seed(seed)
        .build()
    {
        Ok(forge) => forge,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    println!("Loaded catalogs from {}", catalog_path);
    println!("Seed: {}", seed);
    println!("Type 'help' for commands.\n");

    let mut current: Option<Npc> = None;
    let mut current_seed = seed;

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("npc> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => {
                print_help();
            }
            "npc" => {
                let mut params = GenerationParams::new();
                if let Some(race) = parts.get(1).filter(|r| **r != "-") {
                    params = params.race(*race);
                }
                if let Some(class) = parts.get(2) {
                    params = params.class(*class);
                }
                match forge.generate(&params) {
                    Ok(npc) => {
                        print_npc(&npc);
                        current = Some(npc);
                    }
                    Err(e) => println!("ERROR: {}", e),
                }
            }
            "family" => {
                let Some(npc) = current.as_ref() else {
                    println!("No current NPC. Use 'npc' first.");
                    continue;
                };
                let depth: u32 = match parts.get(1).map(|d| d.parse()) {
                    None => 1,
                    Some(Ok(d)) if d > 0 => d,
                    Some(_) => {
                        println!("Invalid depth: {}", parts[1]);
                        continue;
                    }
                };
                let tree = forge.family_tree(npc, depth);
                print_family(&tree);
                if let Some(npc) = current.as_mut() {
                    npc.family_tree = Some(tree);
                }
            }
            "regen" => {
                let Some(npc) = current.as_ref() else {
                    println!("No current NPC. Use 'npc' first.");
                    continue;
                };
                if parts.len() < 2 {
                    println!("Usage: regen <field1,field2,...>");
                    let names: Vec<String> =
                        RegenField::all().iter().map(|f| format!("{:?}", f)).collect();
                    println!("  Fields: {}", names.join(", "));
                    continue;
                }
                let fields: Vec<&str> = parts[1]
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect();
                match forge.regenerate_named(npc, &fields) {
                    Ok(updated) => {
                        print_npc(&updated);
                        current = Some(updated);
                    }
                    Err(e) => println!("ERROR: {}", e),
                }
            }
            "json" => match current.as_ref() {
                Some(npc) => match serde_json::to_string_pretty(npc) {
                    Ok(json) => println!("{}", json),
                    Err(e) => println!("ERROR: {}", e),
                },
                None => println!("No current NPC. Use 'npc' first."),
            },
            "seed" => {
                if parts.len() < 2 {
                    println!("Current seed: {}", current_seed);
                    continue;
                }
                match parts[1].parse::<u64>() {
                    Ok(s) => {
                        current_seed = s;
                        forge.reseed(current_seed);
                        println!("Seed set to {}", current_seed);
                    }
                    Err(_) => {
                        println!("Invalid seed: {}", parts[1]);
                    }
                }
            }
            _ => {
                println!("Unknown command: '{}'. Type 'help' for commands.", cmd);
            }
        }
    }
}

fn print_usage() {
    println!("NPC Preview: interactive generation shell for testing catalogs.");
    println!();
    println!("Usage: npc_preview --catalog <dir> [--seed <n>]");
    println!();
    println!("  --catalog <dir>  Directory holding races.ron, names.ron, ...");
    println!("  --seed <n>       Initial RNG seed (default: 42)");
}

fn print_help() {
    println!("Commands:");
    println!("  npc [race] [class]   Generate an NPC ('-' for a random race)");
    println!("  family <depth>       Generate a family tree for the current NPC");
    println!("  regen <fields>       Regenerate fields (comma-separated)");
    println!("  json                 Print the current NPC as JSON");
    println!("  seed <n>             Set RNG seed");
    println!("  help                 Show this help");
    println!("  quit                 Exit");
    println!();
    println!("Fields: name, race, class, age, gender, quirks, traits, flaws, familyTree");
}

fn print_npc(npc: &Npc) {
    let race = npc.race.as_ref().map(|r| r.name.as_str()).unwrap_or("(unknown race)");
    let class = npc.class.as_ref().map(|c| c.name.as_str()).unwrap_or("(no class)");
    let stage = age_category(npc.age, npc.race.as_ref());

    println!("\n--- {} ---", npc.name);
    println!("{} {}, {} ({}), {}", race, class, npc.age, stage.tag(), npc.gender.label());
    print_attributes("Quirks", &npc.quirks);
    print_attributes("Traits", &npc.traits);
    print_attributes("Flaws", &npc.flaws);
    if let Some(tree) = &npc.family_tree {
        print_family(tree);
    }
    println!();
}

fn print_attributes(heading: &str, items: &[Attribute]) {
    if items.is_empty() {
        println!("{}: none", heading);
        return;
    }
    println!("{}:", heading);
    for item in items {
        println!("  - {}: {}", item.id, item.description);
    }
}

fn print_family(tree: &FamilyTree) {
    let template = tree.template_id.as_deref().unwrap_or("fallback");
    println!(
        "Family of {} ({} members, template {}):",
        tree.subject.name,
        tree.member_count(),
        template
    );
    if tree.is_empty() {
        println!("  (no relatives)");
        return;
    }
    for member in tree.members() {
        print_member(member);
    }
}

fn print_member(member: &FamilyMember) {
    let status = if member.is_alive { "" } else { " (deceased)" };
    println!(
        "  {:<16} {} ({}, {}){}",
        member.relation.label(),
        member.name,
        member.age,
        member.gender.label(),
        status
    );
}
