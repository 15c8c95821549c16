//! Subcommand implementations.

pub mod extensions;
pub mod hash;
pub mod pairs;
