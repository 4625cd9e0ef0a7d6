/// Catalog providers: read-only reference data for every generator.
///
/// Catalogs live as RON files in a directory (`races.ron`, `classes.ron`,
/// `names.ron`, `quirks.ron`, `traits.ron`, `flaws.ron`,
/// `family_templates.ron`). A `.json` file with the same stem, or its
/// camelCase form (`familyTemplates.json`), is used when the `.ron` file is
/// absent.
use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::schema::attribute::{Attribute, AttributeKind};
use crate::schema::character::Gender;
use crate::schema::family::FamilyTemplate;
use crate::schema::race::{CharacterClass, Race};

pub const RACES: &str = "races";
pub const CLASSES: &str = "classes";
pub const NAMES: &str = "names";
pub const FAMILY_TEMPLATES: &str = "family_templates";

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed to read {catalog} catalog from {}: {source}", .path.display())]
    Io {
        catalog: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed {catalog} catalog: {source}")]
    Ron {
        catalog: &'static str,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("malformed {catalog} catalog: {source}")]
    Json {
        catalog: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("no {catalog} catalog in {}", .dir.display())]
    Missing { catalog: &'static str, dir: PathBuf },
}

impl CatalogLoadError {
    /// Name of the catalog that failed to load.
    pub fn catalog(&self) -> &'static str {
        match self {
            Self::Io { catalog, .. }
            | Self::Ron { catalog, .. }
            | Self::Json { catalog, .. }
            | Self::Missing { catalog, .. } => catalog,
        }
    }
}

/// First names, surnames and titles for one race.
///
/// A `None` list is absent; `Some(vec![])` is present but empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamePool {
    #[serde(default)]
    pub male: Option<Vec<String>>,
    #[serde(default)]
    pub female: Option<Vec<String>>,
    #[serde(default)]
    pub nonbinary: Option<Vec<String>>,
    #[serde(default)]
    pub all: Option<Vec<String>>,
    #[serde(default)]
    pub surnames: Option<Vec<String>>,
    #[serde(default)]
    pub titles: Option<Vec<String>>,
}

impl NamePool {
    /// First-name list for `gender`.
    ///
    /// Resolution order: the gender's own list (male/female), then the
    /// nonbinary list, then `all`, then whichever of male/female exists.
    pub fn first_names(&self, gender: Gender) -> &[String] {
        let own = match gender {
            Gender::Male => self.male.as_deref(),
            Gender::Female => self.female.as_deref(),
            Gender::Nonbinary => None,
        };
        own.or(self.nonbinary.as_deref())
            .or(self.all.as_deref())
            .or(self.male.as_deref())
            .or(self.female.as_deref())
            .unwrap_or(&[])
    }

    pub fn surnames(&self) -> &[String] {
        self.surnames.as_deref().unwrap_or(&[])
    }

    pub fn titles(&self) -> &[String] {
        self.titles.as_deref().unwrap_or(&[])
    }

    /// Returns true if no gender resolves to a non-empty first-name list.
    pub fn has_no_first_names(&self) -> bool {
        Gender::all().iter().all(|g| self.first_names(*g).is_empty())
    }
}

/// Race id → name pool.
pub type NameCatalog = FxHashMap<String, NamePool>;

/// Source of reference data. Implementations must not hand out shared
/// mutable state; every call returns an owned copy.
pub trait CatalogProvider {
    fn races(&self) -> Result<Vec<Race>, CatalogLoadError>;

    fn classes(&self) -> Result<Vec<CharacterClass>, CatalogLoadError>;

    fn names(&self) -> Result<NameCatalog, CatalogLoadError>;

    fn attributes(&self, kind: AttributeKind) -> Result<Vec<Attribute>, CatalogLoadError>;

    fn family_templates(&self) -> Result<Vec<FamilyTemplate>, CatalogLoadError>;

    fn quirks(&self) -> Result<Vec<Attribute>, CatalogLoadError> {
        self.attributes(AttributeKind::Quirk)
    }

    fn traits(&self) -> Result<Vec<Attribute>, CatalogLoadError> {
        self.attributes(AttributeKind::Trait)
    }

    fn flaws(&self) -> Result<Vec<Attribute>, CatalogLoadError> {
        self.attributes(AttributeKind::Flaw)
    }
}

/// All catalogs held in memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub races: Vec<Race>,
    #[serde(default)]
    pub classes: Vec<CharacterClass>,
    #[serde(default)]
    pub names: NameCatalog,
    #[serde(default)]
    pub quirks: Vec<Attribute>,
    #[serde(default)]
    pub traits: Vec<Attribute>,
    #[serde(default)]
    pub flaws: Vec<Attribute>,
    #[serde(default)]
    pub family_templates: Vec<FamilyTemplate>,
}

impl Catalog {
    /// Load every catalog from `dir` once.
    pub fn load_from_dir(dir: &Path) -> Result<Catalog, CatalogLoadError> {
        CatalogDir::new(dir).snapshot()
    }

    /// Parse a single catalog from a RON string.
    pub fn parse_ron<T: DeserializeOwned>(
        catalog: &'static str,
        input: &str,
    ) -> Result<T, CatalogLoadError> {
        ron::from_str(input).map_err(|source| CatalogLoadError::Ron { catalog, source })
    }

    /// Parse a single catalog from a JSON string.
    pub fn parse_json<T: DeserializeOwned>(
        catalog: &'static str,
        input: &str,
    ) -> Result<T, CatalogLoadError> {
        serde_json::from_str(input).map_err(|source| CatalogLoadError::Json { catalog, source })
    }

    pub fn attributes_of(&self, kind: AttributeKind) -> &[Attribute] {
        match kind {
            AttributeKind::Quirk => &self.quirks,
            AttributeKind::Trait => &self.traits,
            AttributeKind::Flaw => &self.flaws,
        }
    }

    pub fn find_race(&self, id: &str) -> Option<&Race> {
        self.races.iter().find(|r| r.id == id)
    }

    pub fn find_class(&self, id: &str) -> Option<&CharacterClass> {
        self.classes.iter().find(|c| c.id == id)
    }
}

impl CatalogProvider for Catalog {
    fn races(&self) -> Result<Vec<Race>, CatalogLoadError> {
        Ok(self.races.clone())
    }

    fn classes(&self) -> Result<Vec<CharacterClass>, CatalogLoadError> {
        Ok(self.classes.clone())
    }

    fn names(&self) -> Result<NameCatalog, CatalogLoadError> {
        Ok(self.names.clone())
    }

    fn attributes(&self, kind: AttributeKind) -> Result<Vec<Attribute>, CatalogLoadError> {
        Ok(self.attributes_of(kind).to_vec())
    }

    fn family_templates(&self) -> Result<Vec<FamilyTemplate>, CatalogLoadError> {
        Ok(self.family_templates.clone())
    }
}

/// Catalogs read from disk on every call.
#[derive(Debug, Clone)]
pub struct CatalogDir {
    dir: PathBuf,
}

impl CatalogDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Read every catalog into an in-memory [`Catalog`].
    pub fn snapshot(&self) -> Result<Catalog, CatalogLoadError> {
        Ok(Catalog {
            races: self.races()?,
            classes: self.classes()?,
            names: self.names()?,
            quirks: self.quirks()?,
            traits: self.traits()?,
            flaws: self.flaws()?,
            family_templates: self.family_templates()?,
        })
    }

    fn load<T: DeserializeOwned>(&self, catalog: &'static str) -> Result<T, CatalogLoadError> {
        let ron_path = self.dir.join(format!("{}.ron", catalog));
        if ron_path.is_file() {
            log::debug!("loading {} catalog from {}", catalog, ron_path.display());
            let contents = read_catalog_file(catalog, &ron_path)?;
            return Catalog::parse_ron(catalog, &contents);
        }

        for stem in [catalog.to_string(), camel_case(catalog)] {
            let json_path = self.dir.join(format!("{}.json", stem));
            if json_path.is_file() {
                log::debug!("loading {} catalog from {}", catalog, json_path.display());
                let contents = read_catalog_file(catalog, &json_path)?;
                return Catalog::parse_json(catalog, &contents);
            }
        }

        log::warn!("no {} catalog in {}", catalog, self.dir.display());
        Err(CatalogLoadError::Missing {
            catalog,
            dir: self.dir.clone(),
        })
    }
}

/// `family_templates` becomes `familyTemplates`.
fn camel_case(stem: &str) -> String {
    let mut parts = stem.split('_');
    let mut out = parts.next().unwrap_or_default().to_string();
    for part in parts {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

fn read_catalog_file(catalog: &'static str, path: &Path) -> Result<String, CatalogLoadError> {
    std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        catalog,
        path: path.to_path_buf(),
        source,
    })
}

impl CatalogProvider for CatalogDir {
    fn races(&self) -> Result<Vec<Race>, CatalogLoadError> {
        self.load(RACES)
    }

    fn classes(&self) -> Result<Vec<CharacterClass>, CatalogLoadError> {
        self.load(CLASSES)
    }

    fn names(&self) -> Result<NameCatalog, CatalogLoadError> {
        self.load(NAMES)
    }

    fn attributes(&self, kind: AttributeKind) -> Result<Vec<Attribute>, CatalogLoadError> {
        self.load(kind.catalog_name())
    }

    fn family_templates(&self) -> Result<Vec<FamilyTemplate>, CatalogLoadError> {
        self.load(FAMILY_TEMPLATES)
    }
}
