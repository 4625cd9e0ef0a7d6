//! Data types shared by every generator: catalog records, the generated
//! character, and its family tree.

pub mod attribute;
pub mod character;
pub mod family;
pub mod race;
pub mod request;
