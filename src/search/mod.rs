//! Search module for the Gomoku AI
//!
//! Contains:
//! - Candidate generation restricted to the occupied frontier
//! - Fixed-depth minimax with alpha-beta pruning and an
//!   immediate-win pre-pass

pub mod minimax;
pub mod movegen;

pub use minimax::{SearchResult, Searcher};
pub use movegen::candidates;
