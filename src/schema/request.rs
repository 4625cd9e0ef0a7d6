use serde::{Deserialize, Serialize};

use super::character::Gender;

/// Parameters for generating one NPC. Every key is optional; absent keys
/// are drawn at random or fall back to the generator's defaults.
///
/// Range validation (e.g. trait counts 1-5) belongs to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationParams {
    pub race: Option<String>,
    pub class: Option<String>,
    pub gender: Option<Gender>,
    pub age: Option<u32>,
    pub trait_count: Option<usize>,
    pub quirk_count: Option<usize>,
    pub flaw_count: Option<usize>,
    pub generate_family: bool,
    pub family_depth: Option<u32>,
}

impl GenerationParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn race(mut self, id: impl Into<String>) -> Self {
        self.race = Some(id.into());
        self
    }

    pub fn class(mut self, id: impl Into<String>) -> Self {
        self.class = Some(id.into());
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_family(mut self, depth: u32) -> Self {
        self.generate_family = true;
        self.family_depth = Some(depth);
        self
    }
}

/// A field of an existing NPC that can be redrawn on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegenField {
    Name,
    Race,
    Class,
    Age,
    Gender,
    Quirks,
    Traits,
    Flaws,
    FamilyTree,
}

impl RegenField {
    pub fn all() -> &'static [RegenField] {
        &[
            RegenField::Name,
            RegenField::Race,
            RegenField::Class,
            RegenField::Age,
            RegenField::Gender,
            RegenField::Quirks,
            RegenField::Traits,
            RegenField::Flaws,
            RegenField::FamilyTree,
        ]
    }

    /// Parse a field name as sent by clients. Unknown names yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "name" => Some(Self::Name),
            "race" => Some(Self::Race),
            "class" => Some(Self::Class),
            "age" => Some(Self::Age),
            "gender" => Some(Self::Gender),
            "quirks" => Some(Self::Quirks),
            "traits" => Some(Self::Traits),
            "flaws" => Some(Self::Flaws),
            "familyTree" | "family_tree" => Some(Self::FamilyTree),
            _ => None,
        }
    }

    /// Parse a list of field names, dropping the ones not recognized.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Vec<Self> {
        names.iter().filter_map(|n| Self::parse(n.as_ref())).collect()
    }
}
