//! Implementation of chess rules: position representation, move generation
//! and perft.

pub mod attacks;
pub mod core;
pub mod position;
