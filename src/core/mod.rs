//! Core domain model: shared types and the fault taxonomy.

pub mod error;
pub mod types;
