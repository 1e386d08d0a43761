//! Cross-snapshot state built before a diff pass
//!
//! A diff compares a later snapshot (t2) against what was known at an
//! earlier time point (t1). That earlier state comes in one of two shapes:
//!
//! - [`PriorTermMap`]: the mapping output of an earlier run, i.e. which
//!   terms were already known for every (target, accession) pair.
//! - [`NexpIndex`]: the accessions of all t1 records that had annotations
//!   in a category, but none of them with experimental evidence.
//!
//! Both are built once per diff run and only live for the t2 pass.

mod nexp;
mod prior;

pub use nexp::NexpIndex;
pub use prior::{PriorEntry, PriorTermMap};
