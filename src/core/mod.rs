//! Core types & traits: protocol-agnostic contracts for tools and results.

pub mod content;
pub mod error;
pub mod tool;
