//! NPC Forge: procedural NPCs and family trees for tabletop games.
//!
//! Generates characters with race, class, age, gender, name, quirks,
//! traits, flaws and an optional family tree, drawing from read-only
//! catalogs and keeping the result internally consistent (age-appropriate
//! traits, no contradictory pairs, no spouses for children).

pub mod core;
pub mod schema;

pub use crate::core::catalog::{Catalog, CatalogDir, CatalogLoadError, CatalogProvider};
pub use crate::core::generator::{GenerationDefaults, GeneratorError, NpcGenerator};
pub use crate::schema::character::{Gender, Npc};
pub use crate::schema::request::{GenerationParams, RegenField};
