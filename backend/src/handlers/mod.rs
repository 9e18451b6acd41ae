//! HTTP handlers for the Farm Market Platform

mod crop;
mod health;
mod lot;
mod pricing;

pub use crop::*;
pub use health::*;
pub use lot::*;
pub use pricing::*;
