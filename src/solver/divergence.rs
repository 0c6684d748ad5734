use crate::core::{Executor, Field, Plane};

/// Fill the divergence plane of `field` from its velocity.
///
/// `(vx[x-1] - vx[x+1] + vy[y-1] - vy[y+1]) / 2` on interior cells; wall
/// cells keep whatever they held.
pub fn calc_divergence(field: &mut Field, executor: &Executor) {
    let (width, height) = field.shape();
    let velocity_x = Plane::new(&field.velocity_x, width);
    let velocity_y = Plane::new(&field.velocity_y, width);

    executor.for_each_interior(
        [&mut field.divergence[..]],
        width,
        height,
        |x, y, [divergence]| {
            *divergence = (velocity_x.at(x - 1, y) - velocity_x.at(x + 1, y)
                + velocity_y.at(x, y - 1)
                - velocity_y.at(x, y + 1))
                / 2.0;
        },
    );
}
