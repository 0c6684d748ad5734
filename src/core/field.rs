//! Per-cell state of the fluid grid
//!
//! Structure-of-arrays storage, row-major (`index = y * width + x`).
//! Cells on the outer ring are walls: no stencil pass and no paint stroke
//! ever writes their density or velocity, which gives the closed-box
//! boundary condition.

use bevy::prelude::*;

use super::error::{FieldError, Result};
use crate::math::{Real, Vector};

/// The five scalars stored for one grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cell {
    pub density: Real,
    pub velocity_x: Real,
    pub velocity_y: Real,
    pub pressure: Real,
    pub divergence: Real,
}

impl Cell {
    pub fn new(density: Real, velocity_x: Real, velocity_y: Real) -> Self {
        Self {
            density,
            velocity_x,
            velocity_y,
            ..Self::default()
        }
    }

    #[inline(always)]
    pub fn zeroed() -> Self {
        Self::default()
    }

    pub fn velocity(&self) -> Vector {
        Vector::new(self.velocity_x, self.velocity_y)
    }
}

impl From<(Real, Real, Real)> for Cell {
    fn from((density, velocity_x, velocity_y): (Real, Real, Real)) -> Self {
        Self::new(density, velocity_x, velocity_y)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) density: Vec<Real>,
    pub(crate) velocity_x: Vec<Real>,
    pub(crate) velocity_y: Vec<Real>,
    pub(crate) pressure: Vec<Real>,
    pub(crate) divergence: Vec<Real>,
}

impl Field {
    /// Build a field by calling `generator(x, y)` once per cell.
    pub fn new<F>(width: usize, height: usize, mut generator: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> Cell,
    {
        if width == 0 || height == 0 {
            return Err(FieldError::EmptyGrid { width, height });
        }

        let size = width * height;
        let mut field = Self {
            width,
            height,
            density: Vec::with_capacity(size),
            velocity_x: Vec::with_capacity(size),
            velocity_y: Vec::with_capacity(size),
            pressure: Vec::with_capacity(size),
            divergence: Vec::with_capacity(size),
        };

        for y in 0..height {
            for x in 0..width {
                let cell = generator(x, y);
                field.density.push(cell.density);
                field.velocity_x.push(cell.velocity_x);
                field.velocity_y.push(cell.velocity_y);
                field.pressure.push(cell.pressure);
                field.divergence.push(cell.divergence);
            }
        }

        Ok(field)
    }

    pub fn zeroed(width: usize, height: usize) -> Result<Self> {
        Self::new(width, height, |_, _| Cell::zeroed())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn check_shape(&self, other: &Field) -> Result<()> {
        if self.shape() == other.shape() {
            Ok(())
        } else {
            Err(FieldError::ShapeMismatch {
                expected: self.shape(),
                found: other.shape(),
            })
        }
    }

    /// Copy the wall ring of all five planes from `other`.
    pub fn copy_walls_from(&mut self, other: &Field) -> Result<()> {
        other.check_shape(self)?;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.is_interior(x, y) {
                    continue;
                }
                let i = self.idx(x, y);
                self.density[i] = other.density[i];
                self.velocity_x[i] = other.velocity_x[i];
                self.velocity_y[i] = other.velocity_y[i];
                self.pressure[i] = other.pressure[i];
                self.divergence[i] = other.divergence[i];
            }
        }
        Ok(())
    }

    #[inline(always)]
    pub(crate) fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Cell at `(row, col)`, or `None` outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.height || col >= self.width {
            return None;
        }
        let i = self.idx(col, row);
        Some(Cell {
            density: self.density[i],
            velocity_x: self.velocity_x[i],
            velocity_y: self.velocity_y[i],
            pressure: self.pressure[i],
            divergence: self.divergence[i],
        })
    }

    /// Cell at a signed coordinate (`x` = column, `y` = row), `None` outside the grid.
    pub fn cell_at(&self, coord: IVec2) -> Option<Cell> {
        let (x, y) = self.to_index(coord)?;
        self.cell(y, x)
    }

    pub fn is_interior(&self, x: usize, y: usize) -> bool {
        x >= 1 && y >= 1 && x + 1 < self.width && y + 1 < self.height
    }

    fn to_index(&self, coord: IVec2) -> Option<(usize, usize)> {
        let x = usize::try_from(coord.x).ok()?;
        let y = usize::try_from(coord.y).ok()?;
        (x < self.width && y < self.height).then_some((x, y))
    }

    pub fn density(&self) -> &[Real] {
        &self.density
    }

    pub fn velocity_x(&self) -> &[Real] {
        &self.velocity_x
    }

    pub fn velocity_y(&self) -> &[Real] {
        &self.velocity_y
    }

    /// Pressure from the most recent projection.
    pub fn pressure(&self) -> &[Real] {
        &self.pressure
    }

    /// Divergence measured by the most recent projection, before the gradient was subtracted.
    pub fn divergence(&self) -> &[Real] {
        &self.divergence
    }

    /// Add density and set velocity at one interior cell.
    ///
    /// Coordinates outside the grid or on the wall ring are ignored.
    /// Returns whether the cell was written.
    pub fn paint(&mut self, coord: IVec2, density_delta: Real, velocity: Vector) -> bool {
        let Some((x, y)) = self.to_index(coord) else {
            return false;
        };
        if !self.is_interior(x, y) {
            return false;
        }

        let i = self.idx(x, y);
        self.density[i] += density_delta;
        self.velocity_x[i] = velocity.x;
        self.velocity_y[i] = velocity.y;
        true
    }

    /// Paint every interior cell within `radius` of `center`. Returns the number of cells written.
    pub fn paint_disc(
        &mut self,
        center: IVec2,
        radius: Real,
        density_delta: Real,
        velocity: Vector,
    ) -> usize {
        if !(radius >= 0.0) {
            return 0;
        }

        let reach = (radius.ceil() as i32).min(self.width.max(self.height) as i32);
        let radius_sq = radius * radius;
        let mut painted = 0;

        for dy in -reach..=reach {
            for dx in -reach..=reach {
                if (dx * dx + dy * dy) as Real > radius_sq {
                    continue;
                }
                if self.paint(center.saturating_add(IVec2::new(dx, dy)), density_delta, velocity) {
                    painted += 1;
                }
            }
        }

        painted
    }

    pub fn total_density(&self) -> Real {
        self.density.iter().sum()
    }

    /// L2 norm of the divergence plane over interior cells.
    pub fn divergence_l2(&self) -> Real {
        self.interior_indices()
            .map(|i| self.divergence[i] * self.divergence[i])
            .sum::<Real>()
            .sqrt()
    }

    pub fn max_abs_divergence(&self) -> Real {
        self.interior_indices()
            .map(|i| self.divergence[i].abs())
            .fold(0.0, Real::max)
    }

    /// True when no plane holds a NaN or infinity.
    pub fn is_finite(&self) -> bool {
        [
            &self.density,
            &self.velocity_x,
            &self.velocity_y,
            &self.pressure,
            &self.divergence,
        ]
        .iter()
        .all(|plane| plane.iter().all(|value| value.is_finite()))
    }

    pub(crate) fn interior_indices(&self) -> impl Iterator<Item = usize> + '_ {
        let width = self.width;
        (1..self.height.saturating_sub(1))
            .flat_map(move |y| (1..width.saturating_sub(1)).map(move |x| y * width + x))
    }
}
