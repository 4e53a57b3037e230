//! Causal loop diagram generator and benchmark utilities for loopfind.
//!
//! This crate provides deterministic generation of board exports for
//! benchmarking and property-based testing of `loopfind-core`.

pub mod correctness;
pub mod generator;

pub use generator::{GeneratorConfig, SizeTier, generate_board, generate_graph};
