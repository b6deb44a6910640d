//! tagmill-cli - Batch pipeline orchestration for the Tagmill tagger.
//!
//! Wires the pipeline crates together behind a flat configuration surface:
//! corpus loading, TF-IDF tag generation, simulated feedback, weight
//! learning, and the three JSON artifacts that form the contract with any
//! presentation layer.

pub mod artifacts;
pub mod config;
pub mod pipeline;
