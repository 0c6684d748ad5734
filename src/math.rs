use bevy::math::Vec2;

pub type Real = f32;

pub type Vector = Vec2;

#[inline(always)]
pub fn lerp(a: Real, b: Real, t: Real) -> Real {
    a * (1.0 - t) + b * t
}

/// Bilinear blend of four corner samples.
///
/// `c00`/`c01` are the lower row (left, right), `c10`/`c11` the upper row.
#[inline(always)]
pub fn bilerp(c00: Real, c01: Real, c10: Real, c11: Real, fx: Real, fy: Real) -> Real {
    lerp(lerp(c00, c01, fx), lerp(c10, c11, fx), fy)
}
