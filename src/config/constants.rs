// Defaults for one simulation tick
use crate::math::Real;

// Pressure solve
pub const PRESSURE_ITERATIONS: u32 = 20;
pub const PRESSURE_OMEGA: Real = 1.5;

// Advection
pub const ADVECTION_DT: Real = 0.5;

// Diffusion
pub const DIFFUSION_ITERATIONS: u32 = 1;
pub const DIFFUSION_K: Real = 0.03;

// Grid size used by the plugin when none is given
pub const GRID_RESOLUTION: usize = 128;
