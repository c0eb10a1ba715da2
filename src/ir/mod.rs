//! Resolved figure: what the plotting backend consumes.

pub mod types;

pub use types::*;
