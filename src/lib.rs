use bevy::prelude::*;

pub mod config;
pub mod core;
pub mod generators;
pub mod math;
pub mod shared;
pub mod simulation;
pub mod solver;

// Public re-exports for clean API
pub use crate::config::{FluidParams, GRID_RESOLUTION, PressureScheme};
pub use crate::core::{Cell, Executor, Field, FieldError, FluidState};
pub use shared::SharedFluid;

use crate::simulation::step_fluid;

/// Registers a shared fluid field and steps it every `Update`.
///
/// A [`SharedFluid`] or [`FluidParams`] inserted before the plugin is kept;
/// otherwise a zeroed `width x height` field and default parameters are used.
pub struct FluidPlugin {
    pub width: usize,
    pub height: usize,
}

impl Default for FluidPlugin {
    fn default() -> Self {
        Self {
            width: GRID_RESOLUTION,
            height: GRID_RESOLUTION,
        }
    }
}

impl Plugin for FluidPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FluidParams>();

        if !app.world().contains_resource::<SharedFluid>() {
            match Field::zeroed(self.width, self.height) {
                Ok(field) => {
                    app.insert_resource(SharedFluid::new(FluidState::new(field)));
                }
                Err(err) => {
                    error!("fluid plugin disabled: {err}");
                    return;
                }
            }
        }

        for warning in app.world().resource::<FluidParams>().warnings() {
            warn!("{warning}");
        }
        let (width, height) = app.world().resource::<SharedFluid>().with_front(Field::shape);
        info!("fluid plugin: {width}x{height} grid");

        app.add_systems(Update, step_fluid);
    }
}
