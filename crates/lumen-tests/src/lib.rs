//! Integration tests for lumen crates.
//!
//! This crate contains end-to-end tests that verify the interaction
//! between topologies, palettes, the layer stack and the filter chain.
