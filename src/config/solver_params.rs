use bevy::prelude::*;

use super::constants::*;
use crate::math::Real;

/// Relaxation order used by the pressure solve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PressureScheme {
    /// Every sweep reads only the previous sweep's values.
    /// Stable for `0 < omega <= 1`.
    Jacobi,
    /// Two half-sweeps per iteration over the `(x + y)` even/odd checkerboard.
    /// Equivalent to in-place Gauss-Seidel in red-black order, stable for `0 < omega < 2`.
    #[default]
    RedBlack,
}

/// Parameters for one simulation tick (project, advect, diffuse)
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct FluidParams {
    /// Relaxation sweeps in the pressure solve. More sweeps give a less divergent field.
    pub pressure_iterations: u32,

    /// Over-relaxation factor. 1.0 is plain relaxation, above 1.0 over-relaxes.
    pub omega: Real,

    pub pressure_scheme: PressureScheme,

    /// Advection time step in cells per unit velocity
    pub dt: Real,

    /// Diffusion passes per tick
    pub diffusion_iterations: u32,

    /// Diffusion strength (0.0 = none)
    pub diffusion_k: Real,

    /// Skip stepping while set
    pub paused: bool,
}

impl Default for FluidParams {
    fn default() -> Self {
        Self {
            pressure_iterations: PRESSURE_ITERATIONS,
            omega: PRESSURE_OMEGA,
            pressure_scheme: PressureScheme::default(),
            dt: ADVECTION_DT,
            diffusion_iterations: DIFFUSION_ITERATIONS,
            diffusion_k: DIFFUSION_K,
            paused: false,
        }
    }
}

impl FluidParams {
    /// Set pressure iteration count and over-relaxation factor
    pub fn with_pressure(mut self, iterations: u32, omega: Real) -> Self {
        self.pressure_iterations = iterations;
        self.omega = omega;
        self
    }

    pub fn with_scheme(mut self, scheme: PressureScheme) -> Self {
        self.pressure_scheme = scheme;
        self
    }

    pub fn with_dt(mut self, dt: Real) -> Self {
        self.dt = dt;
        self
    }

    /// Set diffusion pass count and strength
    pub fn with_diffusion(mut self, iterations: u32, k: Real) -> Self {
        self.diffusion_iterations = iterations;
        self.diffusion_k = k;
        self
    }

    /// Parameters outside the range where the relaxations are known to converge.
    ///
    /// Nothing is clamped: a diverging field is the visible symptom of a bad value.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !(self.omega > 0.0 && self.omega < 2.0) {
            warnings.push(format!("omega {} is outside (0, 2), the pressure solve will diverge", self.omega));
        } else if self.omega > 1.0 && self.pressure_scheme == PressureScheme::Jacobi {
            warnings.push(format!("omega {} > 1 with Jacobi relaxation is unstable", self.omega));
        }
        if !(self.diffusion_k >= 0.0) {
            warnings.push(format!("diffusion k {} is negative", self.diffusion_k));
        }
        if !self.dt.is_finite() {
            warnings.push(format!("advection dt {} is not finite", self.dt));
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_stable() {
        let params = FluidParams::default();
        assert_eq!(params.pressure_iterations, 20);
        assert_eq!(params.omega, 1.5);
        assert_eq!(params.pressure_scheme, PressureScheme::RedBlack);
        assert!(params.warnings().is_empty());
    }

    #[test]
    fn builders_do_not_clamp() {
        let params = FluidParams::default()
            .with_pressure(3, 2.5)
            .with_diffusion(4, -1.0)
            .with_dt(0.1);
        assert_eq!(params.omega, 2.5);
        assert_eq!(params.diffusion_k, -1.0);
        assert_eq!(params.diffusion_iterations, 4);
        assert_eq!(params.warnings().len(), 2);
    }

    #[test]
    fn over_relaxed_jacobi_is_flagged() {
        let params = FluidParams::default().with_scheme(PressureScheme::Jacobi);
        assert_eq!(params.warnings().len(), 1);

        let params = params.with_pressure(20, 1.0);
        assert!(params.warnings().is_empty());
    }
}
