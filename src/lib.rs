//! Maximum clique search, P4/C4 detection and quasi-threshold recognition on labelled graphs

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::shadow_same)]
#![warn(clippy::shadow_reuse)]


/// labelled undirected graph and the index-level graph interface
pub mod graph;

/// maximum cardinality search and chordality test
pub mod chordal;

/// induced P4 and C4 finders
pub mod find;

/// predicates: cliques, patterns, modules, split / quasi-threshold / prime graphs
pub mod check;

/// search algorithms for the maximum clique problem
pub mod search;

/// edge niche centrality and diameter-2 partitioning
pub mod divanc;

/// random trivially perfect graphs
pub mod generate;

/// read DIMACS graphs
pub mod dimacs;

/// helper and utility methods for the executable
pub mod util;
