//! Domain models for the Farm Market platform

mod lot;
mod market;
mod pricing;

pub use lot::*;
pub use market::*;
pub use pricing::*;
