//! Website assembly for slipway.
//!
//! Turns a pre-built game (HTML/JS/WASM artifacts) plus supporting assets
//! into a ready-to-serve website tree, resolving the `{{url}}` placeholder
//! in the HTML along the way.

pub mod assembler;
pub mod assets;
pub mod templates;

pub use assembler::{AssembleConfig, AssembleError, AssembleReport, Assembler, IndexSource};
pub use assets::AssetSource;
