//! Core data types for the assignment problem.
//!
//! - [`CostMatrix`]: Dense row-major matrix of non-negative costs
//! - [`Assignment`]: One column per row, the solver's output
//! - [`sample_cost`]: The fixed 5x5 demonstration matrix
//!
//! [`CostMatrix`]: matrix::CostMatrix
//! [`Assignment`]: assignment::Assignment
//! [`sample_cost`]: sample::sample_cost

pub mod assignment;
pub mod matrix;
pub mod sample;
