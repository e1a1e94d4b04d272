//! Trait seams between the Saarthi crates.

pub mod provider;

pub use provider::{GenerateParams, Provider};
