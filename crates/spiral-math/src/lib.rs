//! Numerical primitives for disk spiral diagnostics.

pub mod edges;
pub mod fft;
pub mod histogram;
pub mod polar;
