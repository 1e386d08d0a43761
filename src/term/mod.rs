//! GO terms and the three ontological categories they belong to
//!
//! GO term ids are kept as plain strings. Snapshots of different ages can
//! use different id conventions and the crate never interprets them; it only
//! compares, collects and writes them.

mod category;
mod group;

pub use category::OntologyCategory;
pub use group::{TermGroup, TermIds};
