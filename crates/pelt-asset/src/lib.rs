//! Pelt Asset - Shot/character cache discovery and export versioning
//!
//! This crate provides the two pieces of real logic in the pipeline:
//! the resolver that finds the latest valid animation cache per character
//! across a set of shot directories, and the ledger that allocates the
//! next free export version on disk.

mod ledger;
mod resolver;
mod types;

pub use ledger::ExportLedger;
pub use resolver::resolve;
pub use types::{CharacterRegistry, ResolvedAsset, ResolvedShots, ShotAssets};
