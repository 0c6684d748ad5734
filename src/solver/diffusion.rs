use crate::core::{Executor, Field, Plane};
use crate::math::Real;

#[inline(always)]
fn blur(plane: &Plane<'_>, x: usize, y: usize, k: Real) -> Real {
    (plane.at(x, y) + k / 4.0 * plane.neighbour_sum(x, y)) / (1.0 + k)
}

/// One diffusion pass from `source` into the interior of `target`.
///
/// Density and both velocity components are blurred independently with
/// `(v + k/4 * sum(neighbours)) / (1 + k)`.
pub fn diffuse_pass(source: &Field, target: &mut Field, k: Real, executor: &Executor) {
    assert_eq!(source.shape(), target.shape(), "diffusion target has a different shape");

    let (width, height) = source.shape();
    let density = Plane::new(&source.density, width);
    let velocity_x = Plane::new(&source.velocity_x, width);
    let velocity_y = Plane::new(&source.velocity_y, width);

    executor.for_each_interior(
        [
            &mut target.density[..],
            &mut target.velocity_x[..],
            &mut target.velocity_y[..],
        ],
        width,
        height,
        |x, y, [new_density, new_velocity_x, new_velocity_y]| {
            *new_density = blur(&density, x, y, k);
            *new_velocity_x = blur(&velocity_x, x, y, k);
            *new_velocity_y = blur(&velocity_y, x, y, k);
        },
    );
}
