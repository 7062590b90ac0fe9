//! Value types shared by the density pipeline.
//!
//! Everything in here is created fresh per aggregation call and never mutated
//! afterwards.

pub mod coordinate;
pub mod grid;
pub mod report;
pub mod tier;

pub use coordinate::*;
pub use grid::*;
pub use report::*;
pub use tier::*;
