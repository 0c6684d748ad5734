//! Pressure Poisson solve
//!
//! Relaxes `4 p = sum(neighbour p) + divergence` for a fixed number of
//! sweeps, starting from zero pressure. There is no convergence check.
//!
//! Every sweep reads one pressure plane and writes the other (the scratch
//! field's plane), then the two planes are exchanged, so no sweep ever sees
//! a partially updated neighbourhood and the result is independent of how
//! rows are split across threads.

use std::mem;

use crate::config::PressureScheme;
use crate::core::{Executor, Field, Plane};
use crate::math::Real;

/// Solve for `field.pressure` from `field.divergence`, using `scratch.pressure` as the second plane.
///
/// Both pressure planes are cleared first, so wall pressure is zero (Dirichlet).
pub fn solve_pressure(
    field: &mut Field,
    scratch: &mut Field,
    iterations: u32,
    omega: Real,
    scheme: PressureScheme,
    executor: &Executor,
) {
    assert_eq!(field.shape(), scratch.shape(), "pressure scratch has a different shape");

    field.pressure.fill(0.0);
    scratch.pressure.fill(0.0);

    for _ in 0..iterations {
        match scheme {
            PressureScheme::Jacobi => relax(field, scratch, omega, None, executor),
            PressureScheme::RedBlack => {
                relax(field, scratch, omega, Some(0), executor);
                relax(field, scratch, omega, Some(1), executor);
            }
        }
    }
}

// One sweep from field.pressure into scratch.pressure, then exchange the planes.
// With a colour, only cells where (x + y) % 2 == colour move; the rest are copied.
fn relax(
    field: &mut Field,
    scratch: &mut Field,
    omega: Real,
    colour: Option<usize>,
    executor: &Executor,
) {
    let (width, height) = field.shape();
    let pressure = Plane::new(&field.pressure, width);
    let divergence = Plane::new(&field.divergence, width);

    executor.for_each_interior([&mut scratch.pressure[..]], width, height, |x, y, [next]| {
        let current = pressure.at(x, y);
        *next = match colour {
            Some(colour) if (x + y) % 2 != colour => current,
            _ => {
                let estimate = (pressure.neighbour_sum(x, y) + divergence.at(x, y)) / 4.0;
                current + omega * (estimate - current)
            }
        };
    });

    mem::swap(&mut field.pressure, &mut scratch.pressure);
}
