//! Template gate and per-row text substitution.

pub mod substitute;
pub mod validate;
pub mod wrap;
