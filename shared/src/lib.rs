//! Shared types and models for the Farm Market platform
//!
//! This crate contains the lot pricing engine and the types shared between
//! the backend, the browser form (via WASM), and other components.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
