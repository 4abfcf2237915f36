//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Node counts for move generation
//! - `draw.rs` - Draw detection (50-move, repetition)
//! - `make_unmake.rs` - Make/unmake move correctness
//! - `edge_cases.rs` - Special positions and edge cases
//! - `san.rs` - SAN formatting, disambiguation and parsing
//! - `proptest.rs` - Property-based tests

mod edge_cases;
mod proptest;
mod san;
