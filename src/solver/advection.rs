//! Semi-Lagrangian advection
//!
//! Each interior cell traces its own velocity backwards over `dt` and
//! resamples density and velocity there with one shared bilinear footprint.
//! Traces whose four source corners are not all inside the grid produce a
//! zero cell: mass leaving the box is lost, not reflected.

use crate::core::{Executor, Field, Plane};
use crate::math::{Real, bilerp};

/// Lower-left source corner of a back trace and the fractional offset inside it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    pub x0: usize,
    pub y0: usize,
    pub fx: Real,
    pub fy: Real,
}

impl Footprint {
    /// Trace `(x, y)` back along `(velocity_x, velocity_y) * dt`.
    ///
    /// `None` when any of the four corners falls outside a `width x height`
    /// grid, including non-finite positions.
    pub fn trace(
        x: usize,
        y: usize,
        velocity_x: Real,
        velocity_y: Real,
        dt: Real,
        width: usize,
        height: usize,
    ) -> Option<Self> {
        let px = x as Real - velocity_x * dt;
        let py = y as Real - velocity_y * dt;

        // x1 = x0 + 1 must stay inside, so px < width - 1
        if !(px >= 0.0 && py >= 0.0 && px < (width - 1) as Real && py < (height - 1) as Real) {
            return None;
        }

        let x0 = px.floor() as usize;
        let y0 = py.floor() as usize;
        Some(Self {
            x0,
            y0,
            fx: px - x0 as Real,
            fy: py - y0 as Real,
        })
    }

    #[inline(always)]
    pub fn sample(&self, plane: &Plane<'_>) -> Real {
        bilerp(
            plane.at(self.x0, self.y0),
            plane.at(self.x0 + 1, self.y0),
            plane.at(self.x0, self.y0 + 1),
            plane.at(self.x0 + 1, self.y0 + 1),
            self.fx,
            self.fy,
        )
    }
}

/// Advect `source` into the interior of `target`. Wall cells of `target` are not touched.
pub fn advect(source: &Field, target: &mut Field, dt: Real, executor: &Executor) {
    assert_eq!(source.shape(), target.shape(), "advection target has a different shape");

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
            let footprint = Footprint::trace(
                x,
                y,
                velocity_x.at(x, y),
                velocity_y.at(x, y),
                dt,
                width,
                height,
            );

            match footprint {
                Some(footprint) => {
                    *new_density = footprint.sample(&density);
                    *new_velocity_x = footprint.sample(&velocity_x);
                    *new_velocity_y = footprint.sample(&velocity_y);
                }
                None => {
                    *new_density = 0.0;
                    *new_velocity_x = 0.0;
                    *new_velocity_y = 0.0;
                }
            }
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Cell;

    fn advected(source: &Field, dt: Real) -> Field {
        let mut target = source.clone();
        advect(source, &mut target, dt, &Executor::Parallel);
        target
    }

    #[test]
    fn trace_splits_whole_and_fraction() {
        let footprint = Footprint::trace(5, 5, 1.0, -2.0, 0.25, 10, 10).unwrap();
        assert_eq!(footprint.x0, 4);
        assert_eq!(footprint.y0, 5);
        assert_eq!(footprint.fx, 0.75);
        assert_eq!(footprint.fy, 0.5);
    }

    #[test]
    fn trace_rejects_corners_outside_the_grid() {
        assert_eq!(Footprint::trace(1, 1, 2.0, 0.0, 1.0, 10, 10), None);
        assert_eq!(Footprint::trace(8, 4, -1.0, 0.0, 1.0, 10, 10), None);
        assert_eq!(Footprint::trace(4, 8, 0.0, -1.0, 1.0, 10, 10), None);
        assert_eq!(Footprint::trace(4, 4, Real::NAN, 0.0, 1.0, 10, 10), None);
        assert_eq!(Footprint::trace(4, 4, 1.0, 0.0, Real::INFINITY, 10, 10), None);
        assert!(Footprint::trace(8, 8, 0.0, 0.0, 1.0, 10, 10).is_some());
    }

    #[test]
    fn zero_velocity_is_identity() {
        let source = Field::new(8, 7, |x, y| Cell::new((x * 3 + y) as Real, 0.0, 0.0)).unwrap();
        for dt in [0.0, 0.1, 7.5, 1.0e6] {
            let target = advected(&source, dt);
            assert_eq!(target.density(), source.density(), "dt = {dt}");
            assert_eq!(target.velocity_x(), source.velocity_x());
            assert_eq!(target.velocity_y(), source.velocity_y());
        }
    }

    #[test]
    fn uniform_flow_shifts_density() {
        let source = Field::new(10, 10, |x, y| {
            let density = if x == 4 && y == 5 { 2.0 } else { 0.0 };
            Cell::new(density, 1.0, 0.0)
        })
        .unwrap();
        let target = advected(&source, 1.0);

        assert_eq!(target.cell(5, 5).unwrap().density, 2.0);
        assert_eq!(target.cell(5, 4).unwrap().density, 0.0);
        assert_eq!(target.cell(5, 5).unwrap().velocity_x, 1.0);
    }

    #[test]
    fn half_cell_trace_blends_neighbours() {
        let source = Field::new(6, 6, |x, _| Cell::new(x as Real, 0.5, 0.0)).unwrap();
        let target = advected(&source, 1.0);
        assert_eq!(target.cell(2, 3).unwrap().density, 2.5);
    }

    #[test]
    fn inflow_from_outside_is_lost() {
        let source = Field::new(6, 6, |_, _| Cell::new(1.0, 3.0, 0.0)).unwrap();
        let target = advected(&source, 1.0);

        // x = 1 and x = 2 trace to negative columns
        assert_eq!(target.cell(3, 1).unwrap(), Cell::new(0.0, 0.0, 0.0));
        assert_eq!(target.cell(3, 2).unwrap().density, 0.0);
        assert_eq!(target.cell(3, 3).unwrap().density, 1.0);
        // walls untouched
        assert_eq!(target.cell(3, 0).unwrap().density, 1.0);
    }
}
