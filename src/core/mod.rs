pub mod attributes;
pub mod catalog;
pub mod coherence;
pub mod family;
pub mod generator;
pub mod names;
pub mod random;
