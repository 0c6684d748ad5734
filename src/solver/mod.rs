//! Stencil operators of the stable-fluids step
//!
//! Each operator works on whole grids; `FluidState` composes them in
//! order: divergence, pressure solve, projection, advection, diffusion.

pub mod advection;
pub mod diffusion;
pub mod divergence;
pub mod pressure;
pub mod projection;

pub use advection::advect;
pub use diffusion::diffuse_pass;
pub use divergence::calc_divergence;
pub use pressure::solve_pressure;
pub use projection::apply_pressure;
