//! Numerical primitives shared by the rating models and the quality evaluator.

pub mod gaussian;
