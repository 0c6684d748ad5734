//! Stencil execution over interior cells
//!
//! Every operator is expressed as a per-cell kernel that reads from
//! [`Plane`]s and writes only its own output cells. The [`Executor`] decides
//! how interior rows are split across threads; the kernels never know.

use rayon::prelude::*;

use crate::math::Real;

/// Grids at least this wide or tall run in parallel under [`Executor::Auto`].
pub const PARALLEL_THRESHOLD: usize = 256;

/// Read-only view of one scalar plane.
#[derive(Clone, Copy)]
pub struct Plane<'a> {
    data: &'a [Real],
    width: usize,
}

impl<'a> Plane<'a> {
    #[inline(always)]
    pub fn new(data: &'a [Real], width: usize) -> Self {
        Self { data, width }
    }

    #[inline(always)]
    pub fn at(&self, x: usize, y: usize) -> Real {
        self.data[y * self.width + x]
    }

    /// Sum of the four orthogonal neighbours (left, right, down, up).
    #[inline(always)]
    pub fn neighbour_sum(&self, x: usize, y: usize) -> Real {
        self.at(x - 1, y) + self.at(x + 1, y) + self.at(x, y - 1) + self.at(x, y + 1)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Executor {
    Sequential,
    Parallel,
    /// Parallel for large grids only
    #[default]
    Auto,
}

impl Executor {
    pub fn is_parallel(&self, width: usize, height: usize) -> bool {
        match self {
            Self::Sequential => false,
            Self::Parallel => true,
            Self::Auto => width.max(height) >= PARALLEL_THRESHOLD,
        }
    }

    /// Run `kernel(x, y, cells)` once for every interior cell, where `cells`
    /// holds that cell's slot in each of the `outputs` planes.
    ///
    /// Wall cells are never visited. Each output must cover the whole
    /// `width * height` grid; the kernel may only read planes that are not
    /// among `outputs`, so the result does not depend on the row partitioning.
    pub fn for_each_interior<const N: usize, F>(
        &self,
        outputs: [&mut [Real]; N],
        width: usize,
        height: usize,
        kernel: F,
    ) where
        F: Fn(usize, usize, [&mut Real; N]) + Sync,
    {
        for output in &outputs {
            assert_eq!(
                output.len(),
                width * height,
                "stencil output does not cover a {width}x{height} grid"
            );
        }
        if width < 3 || height < 3 {
            return;
        }

        let rows = interior_rows(outputs, width, height);
        let run_row = |(y, mut row): (usize, [&mut [Real]; N])| {
            for x in 1..width - 1 {
                kernel(x, y, row.each_mut().map(|lane| &mut lane[x]));
            }
        };

        if self.is_parallel(width, height) {
            rows.collect::<Vec<_>>().into_par_iter().for_each(run_row);
        } else {
            rows.for_each(run_row);
        }
    }
}

// Regroup N planes into per-row bundles, interior rows only.
fn interior_rows<'a, const N: usize>(
    outputs: [&'a mut [Real]; N],
    width: usize,
    height: usize,
) -> impl Iterator<Item = (usize, [&'a mut [Real]; N])> {
    let mut lanes = outputs.map(|output| output.chunks_mut(width).skip(1));
    (1..height - 1).map(move |y| {
        let row = lanes
            .each_mut()
            .map(|lane| lane.next().expect("output length checked against grid shape"));
        (y, row)
    })
}
