//! Board module tests, organized by category:
//! - `attacks.rs` - Attack tables and exhaustive magic verification
//! - `edge_cases.rs` - Move generation in special positions
//! - `make_unmake.rs` - Make/unmake and hash correctness
//! - `perft.rs` - Node-count oracles for move generation
//! - `proptest.rs` - Property-based tests

mod make_unmake;
