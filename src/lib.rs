//! Figure specification resolution.
//!
//! A figure specification is a JSON or YAML document describing one or more
//! plots and their data series. This crate validates such a document, builds
//! the Specification → Plot → Series tree, resolves inherited attributes
//! through the parent fallback chain, locates input files on a search path,
//! and produces either a fully resolved figure for a plotting backend or a
//! `make` dependency rule.
//!
//! Phases, in order: [`parse`] → [`validate`] → [`tree`] (→
//! `Specification::locate_input_files`) → [`lower`] or [`emit`].

pub mod emit;
pub mod error;
pub mod ir;
pub mod lower;
pub mod parse;
pub mod scale;
pub mod search;
pub mod tree;
pub mod validate;

pub use error::{Result, SpecError};
pub use search::SearchPath;
pub use tree::Specification;
