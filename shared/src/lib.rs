//! Shared types and calculators for the AlignAI Coordination Platform
//!
//! This crate contains the domain models and the pure forecast, logistics,
//! and storage calculators shared between the backend and the WASM module.

pub mod engine;
pub mod error;
pub mod models;
pub mod types;
pub mod validation;

pub use engine::*;
pub use error::*;
pub use models::*;
pub use types::*;
pub use validation::*;
