//! Initial-condition generators for [`Field::new`](crate::core::Field::new)

use crate::core::Cell;
use crate::math::Real;

/// A disc of dense, fast fluid near the left wall, moving right.
///
/// Radius is a tenth of the height, centred at 10% of the width and half the height.
pub fn beam(width: usize, height: usize, density: Real, speed: Real) -> impl Fn(usize, usize) -> Cell {
    let center_x = 0.1 * width as Real;
    let center_y = 0.5 * height as Real;
    let radius = height as Real / 10.0;

    move |x, y| {
        let dx = x as Real - center_x;
        let dy = y as Real - center_y;
        if dx * dx + dy * dy < radius * radius {
            Cell::new(density, speed, 0.0)
        } else {
            Cell::zeroed()
        }
    }
}

/// One cell holding `density`, everything else at rest and empty.
pub fn point(x: usize, y: usize, density: Real) -> impl Fn(usize, usize) -> Cell {
    move |cx, cy| {
        if cx == x && cy == y {
            Cell::new(density, 0.0, 0.0)
        } else {
            Cell::zeroed()
        }
    }
}

pub fn still() -> impl Fn(usize, usize) -> Cell {
    |_, _| Cell::zeroed()
}
