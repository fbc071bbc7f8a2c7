//! Core types shared by every Sprout crate.
//!
//! This crate provides:
//! - The closed component grammar ([`ComponentKind`])
//! - Typed component trees produced by validation
//! - Error types for every pipeline stage

pub mod errors;
pub mod grammar;
pub mod tree;

pub use errors::*;
pub use grammar::*;
pub use tree::*;
