use crate::core::{Executor, Field, Plane};

/// Subtract the pressure gradient from velocity on interior cells.
///
/// Reads only the pressure plane, so velocity is updated in place.
pub fn apply_pressure(field: &mut Field, executor: &Executor) {
    let (width, height) = field.shape();
    let pressure = Plane::new(&field.pressure, width);

    executor.for_each_interior(
        [&mut field.velocity_x[..], &mut field.velocity_y[..]],
        width,
        height,
        |x, y, [velocity_x, velocity_y]| {
            *velocity_x += (pressure.at(x - 1, y) - pressure.at(x + 1, y)) / 2.0;
            *velocity_y += (pressure.at(x, y - 1) - pressure.at(x, y + 1)) / 2.0;
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cell, FluidState};
    use crate::math::Real;

    #[test]
    fn gradient_is_subtracted() {
        let mut field = Field::new(5, 5, |x, y| Cell {
            velocity_x: 1.0,
            pressure: (x * x + 3 * y) as Real,
            ..Cell::zeroed()
        })
        .unwrap();
        apply_pressure(&mut field, &Executor::Sequential);

        let cell = field.cell(2, 2).unwrap();
        assert_eq!(cell.velocity_x, 1.0 + (1.0 - 9.0) / 2.0);
        assert_eq!(cell.velocity_y, (3.0 - 9.0) / 2.0);

        let wall = field.cell(0, 2).unwrap();
        assert_eq!(wall.velocity_x, 1.0);
        assert_eq!(wall.velocity_y, 0.0);
    }

    #[test]
    fn projection_reduces_divergence() {
        let bump = |x: usize, y: usize| {
            let dx = x as Real - 12.0;
            let dy = y as Real - 10.0;
            (-(dx * dx + dy * dy) / 8.0).exp()
        };
        let field = Field::new(24, 24, |x, y| Cell::new(0.0, bump(x, y), 0.5 * bump(y, x))).unwrap();

        let mut probe = field.clone();
        crate::solver::calc_divergence(&mut probe, &Executor::Sequential);
        let before = probe.divergence_l2();
        assert!(before > 0.0);

        let mut state = FluidState::new(field);
        state.project(100, 1.5);
        let mut after = state.front().clone();
        crate::solver::calc_divergence(&mut after, &Executor::Sequential);

        assert!(after.divergence_l2() < before);
    }
}
