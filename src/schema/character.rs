use serde::{Deserialize, Serialize};

use super::attribute::Attribute;
use super::family::{FamilyTree, SubjectSnapshot};
use super::race::{CharacterClass, Race};

/// Gender of a generated character or family member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Nonbinary,
}

impl Gender {
    pub fn all() -> &'static [Gender] {
        &[Gender::Male, Gender::Female, Gender::Nonbinary]
    }

    /// Returns the wire label ("male", "female", "nonbinary").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Nonbinary => "nonbinary",
        }
    }

    /// Parse a gender label. Returns `None` for anything unrecognized.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Some(Self::Male),
            "female" | "f" => Some(Self::Female),
            "nonbinary" | "non-binary" | "nb" => Some(Self::Nonbinary),
            _ => None,
        }
    }
}

/// Life stage derived from age and race lifespan. Ordered youngest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeCategory {
    Child,
    Young,
    Adult,
    MiddleAged,
    Old,
    Venerable,
}

impl AgeCategory {
    pub fn all() -> &'static [AgeCategory] {
        &[
            AgeCategory::Child,
            AgeCategory::Young,
            AgeCategory::Adult,
            AgeCategory::MiddleAged,
            AgeCategory::Old,
            AgeCategory::Venerable,
        ]
    }

    /// Returns the tag string matched against `ageTags` (e.g., "middle-aged").
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Child => "child",
            Self::Young => "young",
            Self::Adult => "adult",
            Self::MiddleAged => "middle-aged",
            Self::Old => "old",
            Self::Venerable => "venerable",
        }
    }
}

/// A generated non-player character.
///
/// `race` and `class` are `None` when a requested identifier was not in the
/// catalog (or the catalog was empty); generators then fall back to
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Npc {
    pub race: Option<Race>,
    pub class: Option<CharacterClass>,
    pub age: u32,
    pub gender: Gender,
    pub name: String,
    pub quirks: Vec<Attribute>,
    pub traits: Vec<Attribute>,
    pub flaws: Vec<Attribute>,
    pub family_tree: Option<FamilyTree>,
}

impl Npc {
    pub fn race_id(&self) -> Option<&str> {
        self.race.as_ref().map(|r| r.id.as_str())
    }

    pub fn class_id(&self) -> Option<&str> {
        self.class.as_ref().map(|c| c.id.as_str())
    }

    /// Identity snapshot stored at the root of a family tree.
    pub fn snapshot(&self) -> SubjectSnapshot {
        SubjectSnapshot {
            name: self.name.clone(),
            race: self.race_id().map(str::to_string),
            age: self.age,
            gender: self.gender,
        }
    }
}
