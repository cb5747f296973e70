//! # Typemeld Bench
//!
//! Input documents for the typemeld benchmarks.

pub mod corpus;
