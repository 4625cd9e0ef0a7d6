/// The NPC orchestrator: parameters in, fully populated [`Npc`] out.
///
/// Wires together catalog lookup, attribute generation, name synthesis
/// and family tree generation, and redraws single fields of an existing
/// NPC on request.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::attributes::{generate_age, generate_attributes, generate_gender};
use crate::core::catalog::{Catalog, CatalogDir, CatalogLoadError, CatalogProvider};
use crate::core::family::generate_family_tree;
use crate::core::names::generate_name;
use crate::core::random::pick;
use crate::schema::attribute::AttributeKind;
use crate::schema::character::Npc;
use crate::schema::family::FamilyTree;
use crate::schema::request::{GenerationParams, RegenField};

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogLoadError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("no catalog source configured")]
    NoCatalog,
}

/// Counts and depth used when a request leaves them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationDefaults {
    pub quirk_count: usize,
    pub trait_count: usize,
    pub flaw_count: usize,
    pub family_depth: u32,
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            quirk_count: 2,
            trait_count: 3,
            flaw_count: 1,
            family_depth: 1,
        }
    }
}

impl GenerationDefaults {
    pub fn load_from_ron(path: &Path) -> Result<Self, GeneratorError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<Self, GeneratorError> {
        Ok(ron::from_str(input)?)
    }

    fn count_for(&self, kind: AttributeKind) -> usize {
        match kind {
            AttributeKind::Quirk => self.quirk_count,
            AttributeKind::Trait => self.trait_count,
            AttributeKind::Flaw => self.flaw_count,
        }
    }
}

/// Requested value, unless absent or zero.
fn nonzero<T: Default + PartialEq>(value: Option<T>) -> Option<T> {
    value.filter(|v| *v != T::default())
}

/// Generate one NPC.
///
/// An explicit race or class id that is not in the catalog resolves to
/// `None`; an absent one is drawn uniformly from the catalog. Any catalog
/// failure outside family generation is returned to the caller.
pub fn generate_npc<P, R>(
    provider: &P,
    params: &GenerationParams,
    defaults: &GenerationDefaults,
    rng: &mut R,
) -> Result<Npc, CatalogLoadError>
where
    P: CatalogProvider + ?Sized,
    R: Rng + ?Sized,
{
    let races = provider.races()?;
    let classes = provider.classes()?;

    let race = match params.race.as_deref() {
        Some(id) => races.iter().find(|r| r.id == id).cloned(),
        None => pick(&races, rng).cloned(),
    };
    if let (Some(id), None) = (params.race.as_deref(), race.as_ref()) {
        log::debug!("unknown race '{}', using defaults", id);
    }

    let class = match params.class.as_deref() {
        Some(id) => classes.iter().find(|c| c.id == id).cloned(),
        None => pick(&classes, rng).cloned(),
    };

    let gender = match params.gender {
        Some(gender) => gender,
        None => generate_gender(rng),
    };
    let age = match nonzero(params.age) {
        Some(age) => age,
        None => generate_age(race.as_ref(), rng),
    };

    let names = provider.names()?;
    let name = generate_name(&names, race.as_ref(), gender, rng);

    let mut npc = Npc {
        race,
        class,
        age,
        gender,
        name,
        quirks: Vec::new(),
        traits: Vec::new(),
        flaws: Vec::new(),
        family_tree: None,
    };

    let requested = |kind: AttributeKind| match kind {
        AttributeKind::Quirk => params.quirk_count,
        AttributeKind::Trait => params.trait_count,
        AttributeKind::Flaw => params.flaw_count,
    };
    for kind in AttributeKind::all() {
        let count = nonzero(requested(*kind)).unwrap_or_else(|| defaults.count_for(*kind));
        let drawn = generate_attributes(
            provider,
            *kind,
            npc.race.as_ref(),
            npc.class.as_ref(),
            npc.age,
            count,
            rng,
        )?;
        match kind {
            AttributeKind::Quirk => npc.quirks = drawn,
            AttributeKind::Trait => npc.traits = drawn,
            AttributeKind::Flaw => npc.flaws = drawn,
        }
    }

    if params.generate_family {
        let depth = nonzero(params.family_depth).unwrap_or(defaults.family_depth);
        npc.family_tree = Some(generate_family_tree(provider, &npc, depth, rng));
    }

    log::debug!(
        "generated '{}' ({:?}, {:?}, age {})",
        npc.name,
        npc.race_id(),
        npc.class_id(),
        npc.age
    );
    Ok(npc)
}

/// Redraw the listed fields of `npc`, leaving the rest untouched.
///
/// Every field is derived from the input NPC, not from fields replaced
/// earlier in the same call. A new race also redraws age; attribute lists
/// keep their current length; a new family tree has depth 1.
pub fn regenerate_attributes<P, R>(
    provider: &P,
    npc: &Npc,
    fields: &[RegenField],
    rng: &mut R,
) -> Result<Npc, CatalogLoadError>
where
    P: CatalogProvider + ?Sized,
    R: Rng + ?Sized,
{
    let mut updated = npc.clone();
    let race = npc.race.as_ref();
    let class = npc.class.as_ref();

    for field in fields {
        match field {
            RegenField::Name => {
                let names = provider.names()?;
                updated.name = generate_name(&names, race, npc.gender, rng);
            }
            RegenField::Race => {
                let races = provider.races()?;
                updated.race = pick(&races, rng).cloned();
                updated.age = generate_age(updated.race.as_ref(), rng);
            }
            RegenField::Class => {
                let classes = provider.classes()?;
                updated.class = pick(&classes, rng).cloned();
            }
            RegenField::Age => updated.age = generate_age(race, rng),
            RegenField::Gender => updated.gender = generate_gender(rng),
            RegenField::Quirks => {
                updated.quirks = generate_attributes(
                    provider,
                    AttributeKind::Quirk,
                    race,
                    class,
                    npc.age,
                    npc.quirks.len(),
                    rng,
                )?;
            }
            RegenField::Traits => {
                updated.traits = generate_attributes(
                    provider,
                    AttributeKind::Trait,
                    race,
                    class,
                    npc.age,
                    npc.traits.len(),
                    rng,
                )?;
            }
            RegenField::Flaws => {
                updated.flaws = generate_attributes(
                    provider,
                    AttributeKind::Flaw,
                    race,
                    class,
                    npc.age,
                    npc.flaws.len(),
                    rng,
                )?;
            }
            RegenField::FamilyTree => {
                updated.family_tree = Some(generate_family_tree(provider, npc, 1, rng));
            }
        }
    }

    Ok(updated)
}

/// NPC generator bound to a catalog source and its own random stream.
/// Built via `NpcGenerator::builder()`.
pub struct NpcGenerator {
    provider: Box<dyn CatalogProvider>,
    defaults: GenerationDefaults,
    rng: StdRng,
}

/// Builder for constructing an `NpcGenerator`.
pub struct NpcGeneratorBuilder {
    catalog_dir: Option<PathBuf>,
    defaults_path: Option<PathBuf>,
    seed: Option<u64>,
    cache: bool,
    defaults: Option<GenerationDefaults>,
    /// Directly provided catalogs (for testing without files).
    catalog: Option<Catalog>,
    provider: Option<Box<dyn CatalogProvider>>,
}

impl NpcGenerator {
    pub fn builder() -> NpcGeneratorBuilder {
        NpcGeneratorBuilder {
            catalog_dir: None,
            defaults_path: None,
            seed: None,
            cache: false,
            defaults: None,
            catalog: None,
            provider: None,
        }
    }

    pub fn generate(&mut self, params: &GenerationParams) -> Result<Npc, GeneratorError> {
        Ok(generate_npc(
            self.provider.as_ref(),
            params,
            &self.defaults,
            &mut self.rng,
        )?)
    }

    pub fn regenerate(&mut self, npc: &Npc, fields: &[RegenField]) -> Result<Npc, GeneratorError> {
        Ok(regenerate_attributes(
            self.provider.as_ref(),
            npc,
            fields,
            &mut self.rng,
        )?)
    }

    /// Regenerate by field name. Unknown names are ignored.
    pub fn regenerate_named<S: AsRef<str>>(
        &mut self,
        npc: &Npc,
        fields: &[S],
    ) -> Result<Npc, GeneratorError> {
        let parsed = RegenField::parse_list(fields);
        if parsed.len() < fields.len() {
            log::debug!("ignored {} unknown field name(s)", fields.len() - parsed.len());
        }
        self.regenerate(npc, &parsed)
    }

    /// Generate a family tree for an existing NPC without touching the NPC.
    pub fn family_tree(&mut self, npc: &Npc, depth: u32) -> FamilyTree {
        generate_family_tree(self.provider.as_ref(), npc, depth, &mut self.rng)
    }

    /// Reseed the generator's random stream.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn defaults(&self) -> &GenerationDefaults {
        &self.defaults
    }

    pub fn provider(&self) -> &dyn CatalogProvider {
        self.provider.as_ref()
    }
}

impl NpcGeneratorBuilder {
    /// Read catalogs from this directory on every call.
    pub fn catalog_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_dir = Some(path.into());
        self
    }

    /// Load the catalog directory once at build time instead of per call.
    pub fn cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn defaults(mut self, defaults: GenerationDefaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Read defaults from a RON file at build time.
    pub fn defaults_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.defaults_path = Some(path.into());
        self
    }

    /// Provide catalogs directly (for testing without files).
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_provider(mut self, provider: Box<dyn CatalogProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn build(self) -> Result<NpcGenerator, GeneratorError> {
        // An explicit provider wins over a catalog, which wins over a directory.
        let provider: Box<dyn CatalogProvider> = if let Some(provider) = self.provider {
            provider
        } else if let Some(catalog) = self.catalog {
            Box::new(catalog)
        } else if let Some(dir) = self.catalog_dir {
            let dir = CatalogDir::new(dir);
            if self.cache {
                Box::new(dir.snapshot()?)
            } else {
                Box::new(dir)
            }
        } else {
            return Err(GeneratorError::NoCatalog);
        };

        let defaults = match (self.defaults, self.defaults_path) {
            (Some(defaults), _) => defaults,
            (None, Some(path)) => GenerationDefaults::load_from_ron(&path)?,
            (None, None) => GenerationDefaults::default(),
        };

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(NpcGenerator {
            provider,
            defaults,
            rng,
        })
    }
}
