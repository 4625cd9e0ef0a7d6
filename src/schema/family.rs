use serde::{Deserialize, Serialize};

use super::character::Gender;

/// How a family member relates to the subject character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    #[serde(rename = "father")]
    Father,
    #[serde(rename = "mother")]
    Mother,
    #[serde(rename = "older sibling")]
    OlderSibling,
    #[serde(rename = "younger sibling")]
    YoungerSibling,
    #[serde(rename = "spouse")]
    Spouse,
    #[serde(rename = "child")]
    Child,
    #[serde(rename = "grandparent")]
    Grandparent,
    #[serde(rename = "uncle")]
    Uncle,
    #[serde(rename = "aunt")]
    Aunt,
    #[serde(rename = "cousin")]
    Cousin,
}

impl Relation {
    /// Display label, identical to the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Father => "father",
            Self::Mother => "mother",
            Self::OlderSibling => "older sibling",
            Self::YoungerSibling => "younger sibling",
            Self::Spouse => "spouse",
            Self::Child => "child",
            Self::Grandparent => "grandparent",
            Self::Uncle => "uncle",
            Self::Aunt => "aunt",
            Self::Cousin => "cousin",
        }
    }

    /// Returns true for relations placed in the extended-family bucket.
    pub fn is_extended(&self) -> bool {
        matches!(self, Self::Grandparent | Self::Uncle | Self::Aunt | Self::Cousin)
    }
}

/// One relative in a family tree. Ages are absolute, never negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    pub relation: Relation,
    /// Race id; relatives share the subject's race.
    pub race: Option<String>,
    pub gender: Gender,
    pub age: u32,
    pub is_alive: bool,
    pub name: String,
}

/// Identity of the character a tree was generated for. A copy, not a
/// reference back to the character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectSnapshot {
    pub name: String,
    pub race: Option<String>,
    pub age: u32,
    pub gender: Gender,
}

/// Which relation groups a generated tree should populate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyTemplate {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, alias = "has_parents")]
    pub has_parents: bool,
    #[serde(default, alias = "has_siblings")]
    pub has_siblings: bool,
    #[serde(default, alias = "has_spouse")]
    pub has_spouse: bool,
    #[serde(default, alias = "has_children")]
    pub has_children: bool,
    #[serde(default, alias = "has_extended_family")]
    pub has_extended_family: bool,
}

impl FamilyTemplate {
    /// Parents and siblings only. Used when no catalog template is valid.
    pub fn fallback() -> Self {
        Self {
            id: None,
            has_parents: true,
            has_siblings: true,
            has_spouse: false,
            has_children: false,
            has_extended_family: false,
        }
    }
}

/// A generated family, created in one call and replaced wholesale on
/// regeneration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyTree {
    #[serde(rename = "characterInfo")]
    pub subject: SubjectSnapshot,
    #[serde(default)]
    pub template_id: Option<String>,
    pub parents: Vec<FamilyMember>,
    pub siblings: Vec<FamilyMember>,
    pub spouse: Option<FamilyMember>,
    pub children: Vec<FamilyMember>,
    pub extended_family: Vec<FamilyMember>,
}

impl FamilyTree {
    /// A tree holding only the subject, with every relation bucket empty.
    pub fn minimal(subject: SubjectSnapshot) -> Self {
        Self {
            subject,
            template_id: None,
            parents: Vec::new(),
            siblings: Vec::new(),
            spouse: None,
            children: Vec::new(),
            extended_family: Vec::new(),
        }
    }

    /// Every member in bucket order: parents, siblings, spouse, children,
    /// extended family.
    pub fn members(&self) -> impl Iterator<Item = &FamilyMember> {
        self.parents
            .iter()
            .chain(self.siblings.iter())
            .chain(self.spouse.iter())
            .chain(self.children.iter())
            .chain(self.extended_family.iter())
    }

    pub fn member_count(&self) -> usize {
        self.members().count()
    }

    pub fn is_empty(&self) -> bool {
        self.member_count() == 0
    }
}
