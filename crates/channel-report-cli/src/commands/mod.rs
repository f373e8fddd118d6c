//! CLI command implementations.

pub mod columns;
pub mod normalize;
pub mod parse;
