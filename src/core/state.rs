use std::mem;
use std::time::Instant;

use bevy::prelude::*;

use crate::config::{FluidParams, PressureScheme};
use crate::math::Real;
use crate::solver::{advect, apply_pressure, calc_divergence, diffuse_pass, solve_pressure};

use super::error::Result;
use super::field::Field;
use super::stencil::Executor;

/// Double-buffered simulation state.
///
/// `buffers[front]` is the authoritative field, the other one is scratch.
/// Stages that read neighbours while writing write into the scratch buffer
/// and then flip `front`; nothing is copied.
#[derive(Clone, Debug)]
pub struct FluidState {
    buffers: [Field; 2],
    front: usize,
    executor: Executor,
}

impl FluidState {
    /// The scratch buffer starts as a copy of `field`, so both share the same wall values.
    pub fn new(field: Field) -> Self {
        let back = field.clone();
        Self {
            buffers: [field, back],
            front: 0,
            executor: Executor::default(),
        }
    }

    /// Pair two fields of the same shape. `back` takes over `front`'s wall cells.
    pub fn from_fields(front: Field, mut back: Field) -> Result<Self> {
        back.copy_walls_from(&front)?;
        Ok(Self {
            buffers: [front, back],
            front: 0,
            executor: Executor::default(),
        })
    }

    pub fn with_executor(mut self, executor: Executor) -> Self {
        self.executor = executor;
        self
    }

    pub fn executor(&self) -> Executor {
        self.executor
    }

    pub fn set_executor(&mut self, executor: Executor) {
        self.executor = executor;
    }

    pub fn front(&self) -> &Field {
        &self.buffers[self.front]
    }

    /// Mutable access to the visible field, for paint strokes between steps.
    pub fn front_mut(&mut self) -> &mut Field {
        &mut self.buffers[self.front]
    }

    /// Which of the two buffers is currently the front (0 or 1).
    pub fn front_slot(&self) -> usize {
        self.front
    }

    /// Flip buffer roles. The solved pressure and divergence planes move
    /// with the front so readers see the values of the last projection.
    pub(crate) fn swap(&mut self) {
        let [first, second] = &mut self.buffers;
        mem::swap(&mut first.pressure, &mut second.pressure);
        mem::swap(&mut first.divergence, &mut second.divergence);
        self.front ^= 1;
    }

    /// `(buffers[source], buffers[1 - source])`, both mutable.
    fn pair_mut(&mut self, source: usize) -> (&mut Field, &mut Field) {
        let [first, second] = &mut self.buffers;
        if source == 0 {
            (first, second)
        } else {
            (second, first)
        }
    }

    /// Divergence, pressure solve and gradient subtraction on the front buffer.
    pub fn project(&mut self, iterations: u32, omega: Real) {
        self.project_with(iterations, omega, PressureScheme::default());
    }

    pub fn project_with(&mut self, iterations: u32, omega: Real, scheme: PressureScheme) {
        let executor = self.executor;
        let (front, scratch) = self.pair_mut(self.front);

        calc_divergence(front, &executor);
        solve_pressure(front, scratch, iterations, omega, scheme, &executor);
        apply_pressure(front, &executor);
    }

    /// Semi-Lagrangian transport of density and velocity, then flip buffers.
    pub fn advect(&mut self, dt: Real) {
        let executor = self.executor;
        let (front, back) = self.pair_mut(self.front);
        advect(front, back, dt, &executor);
        self.swap();
    }

    /// `iterations` Jacobi blur passes over density and velocity.
    ///
    /// Passes alternate between the two buffers; only an odd pass count
    /// leaves the result in the old back buffer and flips the roles.
    pub fn diffuse(&mut self, iterations: u32, k: Real) {
        let executor = self.executor;
        let mut source = self.front;

        for _ in 0..iterations {
            let (src, dst) = self.pair_mut(source);
            diffuse_pass(src, dst, k, &executor);
            source ^= 1;
        }

        if iterations % 2 == 1 {
            self.swap();
        }
    }

    /// One tick: project, advect, diffuse.
    pub fn step(&mut self, params: &FluidParams) {
        let start = Instant::now();
        self.project_with(params.pressure_iterations, params.omega, params.pressure_scheme);
        let projected = start.elapsed().as_secs_f32() * 1000.0;

        self.advect(params.dt);
        let advected = start.elapsed().as_secs_f32() * 1000.0;

        self.diffuse(params.diffusion_iterations, params.diffusion_k);
        let total = start.elapsed().as_secs_f32() * 1000.0;

        debug!(
            "fluid step: project {:.3}ms, advect {:.3}ms, diffuse {:.3}ms",
            projected,
            advected - projected,
            total - advected
        );
    }
}
