use bevy::prelude::*;

use crate::config::FluidParams;
use crate::shared::SharedFluid;

/// Advance the shared field by one tick unless paused.
pub fn step_fluid(params: Res<FluidParams>, fluid: Res<SharedFluid>) {
    if params.paused {
        return;
    }
    fluid.step(&params);
}
