//! Lock-guarded access to the simulation state
//!
//! The step loop and interactive edits go through the same mutex, each
//! holding it for exactly one operation, so a paint stroke can never land
//! in the middle of a step.

use std::sync::Arc;

use bevy::prelude::*;
use parking_lot::{Mutex, MutexGuard};

use crate::config::FluidParams;
use crate::core::{Field, FluidState};
use crate::math::{Real, Vector};

#[derive(Resource, Clone)]
pub struct SharedFluid {
    state: Arc<Mutex<FluidState>>,
}

impl SharedFluid {
    pub fn new(state: FluidState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Scoped exclusive access. Drop the guard as soon as the operation is done.
    pub fn lock(&self) -> MutexGuard<'_, FluidState> {
        self.state.lock()
    }

    pub fn step(&self, params: &FluidParams) {
        self.lock().step(params);
    }

    pub fn paint(&self, coord: IVec2, density_delta: Real, velocity: Vector) -> bool {
        self.lock().front_mut().paint(coord, density_delta, velocity)
    }

    pub fn paint_disc(
        &self,
        center: IVec2,
        radius: Real,
        density_delta: Real,
        velocity: Vector,
    ) -> usize {
        self.lock()
            .front_mut()
            .paint_disc(center, radius, density_delta, velocity)
    }

    /// Read the front field while holding the lock.
    pub fn with_front<R>(&self, read: impl FnOnce(&Field) -> R) -> R {
        read(self.lock().front())
    }

    /// Copy of the front field, for readers that must not hold the lock.
    pub fn snapshot(&self) -> Field {
        self.with_front(Field::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn clones_share_one_state() {
        let fluid = SharedFluid::new(FluidState::new(Field::zeroed(8, 8).unwrap()));
        let other = fluid.clone();

        assert!(other.paint(IVec2::new(3, 3), 2.0, Vector::new(1.0, 0.0)));
        assert_eq!(fluid.with_front(Field::total_density), 2.0);
    }

    #[test]
    fn snapshot_is_detached() {
        let fluid = SharedFluid::new(FluidState::new(Field::zeroed(8, 8).unwrap()));
        let snapshot = fluid.snapshot();
        fluid.paint_disc(IVec2::new(4, 4), 1.5, 1.0, Vector::ZERO);

        assert_eq!(snapshot.total_density(), 0.0);
        assert_eq!(fluid.snapshot().total_density(), 9.0);
    }

    #[test]
    fn painting_and_stepping_interleave() {
        let fluid = SharedFluid::new(FluidState::new(Field::zeroed(32, 32).unwrap()));
        let params = FluidParams::default();

        let painter = {
            let fluid = fluid.clone();
            thread::spawn(move || {
                for i in 0..50 {
                    fluid.paint_disc(IVec2::new(8 + i % 16, 16), 2.0, 0.5, Vector::new(2.0, 0.5));
                }
            })
        };
        for _ in 0..20 {
            fluid.step(&params);
        }
        painter.join().unwrap();

        assert!(fluid.with_front(Field::is_finite));
    }
}
