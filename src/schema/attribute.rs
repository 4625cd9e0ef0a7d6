use serde::{Deserialize, Serialize};

/// Which catalog an [`Attribute`] comes from. Quirks, traits and flaws
/// share one record shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Quirk,
    Trait,
    Flaw,
}

impl AttributeKind {
    pub fn all() -> &'static [AttributeKind] {
        &[AttributeKind::Quirk, AttributeKind::Trait, AttributeKind::Flaw]
    }

    /// Catalog file stem holding records of this kind.
    pub fn catalog_name(&self) -> &'static str {
        match self {
            Self::Quirk => "quirks",
            Self::Trait => "traits",
            Self::Flaw => "flaws",
        }
    }
}

/// A trait, quirk, or flaw.
///
/// Each tag list is an allow-list: an empty list places no restriction,
/// a non-empty one restricts the record to the listed race ids, class ids,
/// or age category labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub id: String,
    pub description: String,
    #[serde(default, alias = "race_tags", skip_serializing_if = "Vec::is_empty")]
    pub race_tags: Vec<String>,
    #[serde(default, alias = "class_tags", skip_serializing_if = "Vec::is_empty")]
    pub class_tags: Vec<String>,
    #[serde(default, alias = "age_tags", skip_serializing_if = "Vec::is_empty")]
    pub age_tags: Vec<String>,
    /// Ids of records that cannot appear alongside this one.
    #[serde(default, alias = "conflicts_with", skip_serializing_if = "Vec::is_empty")]
    pub conflicts_with: Vec<String>,
}

impl Attribute {
    /// An untagged, conflict-free record.
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            race_tags: Vec::new(),
            class_tags: Vec::new(),
            age_tags: Vec::new(),
            conflicts_with: Vec::new(),
        }
    }

    pub fn with_race_tags(mut self, tags: &[&str]) -> Self {
        self.race_tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_class_tags(mut self, tags: &[&str]) -> Self {
        self.class_tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_age_tags(mut self, tags: &[&str]) -> Self {
        self.age_tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_conflicts(mut self, ids: &[&str]) -> Self {
        self.conflicts_with = ids.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Returns true if this record lists `id` as mutually exclusive.
    pub fn conflicts_with_id(&self, id: &str) -> bool {
        self.conflicts_with.iter().any(|c| c == id)
    }

    /// Returns true if none of the tag lists restrict this record.
    pub fn is_unrestricted(&self) -> bool {
        self.race_tags.is_empty() && self.class_tags.is_empty() && self.age_tags.is_empty()
    }
}
