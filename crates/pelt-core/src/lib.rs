//! Pelt Core - Foundational types for the Pelt fur-export pipeline
//!
//! This crate provides the types the other Pelt crates depend on:
//! - Error types and Result alias
//! - Version directory-name primitives (parse / zero-pad)

mod error;
pub mod version;

pub use error::{PeltError, Result};
