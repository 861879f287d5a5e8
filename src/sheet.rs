//! Combined-sheet assembly from rendered items.

pub mod grid;
