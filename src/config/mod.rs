//! Configuration and parameters
//!
//! Default constants and per-step solver settings.

pub mod constants;
pub mod solver_params;

pub use constants::*;
pub use solver_params::*;
