//! Point-Jacobi relaxation kernels.
//!
//! Every strategy runs the same two phases per iteration: compute the stencil
//! over the interior into WRK2 while P is shared read-only, then copy the
//! interior of WRK2 back into P. The residual is reduced per `i`-plane in
//! `f64` and the plane sums are combined in plane order, so all strategies
//! return bit-identical residuals regardless of worker count.

pub mod safe {
    pub mod parallel;
    pub mod single;
}

#[path = "unsafe"]
pub mod unsafe_impl {
    pub mod parallel_unsafe;
}

use crate::error::HimenoError;
use crate::grid::{Field, Shape};
use crate::init::PoissonFields;

/// 緩和係数
pub const OMEGA: f32 = 0.8;

/// Read-only inputs of the stencil (A, B, C, BND, WRK1), validated to share
/// one grid.
#[derive(Clone, Copy)]
pub struct Stencil<'a> {
    pub(crate) a: &'a [f32],
    pub(crate) b: &'a [f32],
    pub(crate) c: &'a [f32],
    pub(crate) bnd: &'a [f32],
    pub(crate) wrk1: &'a [f32],
    shape: Shape,
}

impl<'a> Stencil<'a> {
    /// Checks channel counts (A=4, B=3, C=3, BND=1, WRK1=1) and that all five
    /// fields share BND's grid.
    pub fn new(
        a: &'a Field,
        b: &'a Field,
        c: &'a Field,
        bnd: &'a Field,
        wrk1: &'a Field,
    ) -> Result<Self, HimenoError> {
        let (rows, cols, depths) = bnd.shape().grid();
        let grid = Shape::new(1, rows, cols, depths);

        expect_shape("A", a, 4, grid)?;
        expect_shape("B", b, 3, grid)?;
        expect_shape("C", c, 3, grid)?;
        expect_shape("BND", bnd, 1, grid)?;
        expect_shape("WRK1", wrk1, 1, grid)?;

        Ok(Stencil {
            a: a.as_slice(),
            b: b.as_slice(),
            c: c.as_slice(),
            bnd: bnd.as_slice(),
            wrk1: wrk1.as_slice(),
            shape: grid,
        })
    }

    /// Single-channel shape every pressure/scratch field must have.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Errors unless `field` is a single-channel field on this stencil's grid.
    pub fn check(&self, name: &'static str, field: &Field) -> Result<(), HimenoError> {
        expect_shape(name, field, 1, self.shape)
    }

    #[inline(always)]
    pub(crate) fn plane(&self) -> usize {
        self.shape.plane()
    }

    #[inline(always)]
    pub(crate) fn channel_len(&self) -> usize {
        self.shape.channel_len()
    }

    /// Masked relaxation step `ss` at flat offset `idx` of an interior cell.
    #[inline(always)]
    pub(crate) fn relax(&self, p: &[f32], idx: usize) -> f32 {
        let di = self.plane();
        let dj = self.shape.depths;
        let ch = self.channel_len();
        let (a, b, c) = (self.a, self.b, self.c);

        let s0 = a[idx] * p[idx + di]
            + a[ch + idx] * p[idx + dj]
            + a[2 * ch + idx] * p[idx + 1]
            + b[idx] * (p[idx + di + dj] - p[idx + di - dj] - p[idx - di + dj] + p[idx - di - dj])
            + b[ch + idx] * (p[idx + dj + 1] - p[idx - dj + 1] - p[idx + dj - 1] + p[idx - dj - 1])
            + b[2 * ch + idx] * (p[idx + di + 1] - p[idx - di + 1] - p[idx + di - 1] + p[idx - di - 1])
            + c[idx] * p[idx - di]
            + c[ch + idx] * p[idx - dj]
            + c[2 * ch + idx] * p[idx - 1]
            + self.wrk1[idx];

        (s0 * a[3 * ch + idx] - p[idx]) * self.bnd[idx]
    }
}

fn expect_shape(
    name: &'static str,
    field: &Field,
    channels: usize,
    grid: Shape,
) -> Result<(), HimenoError> {
    let expected = Shape::new(channels, grid.rows, grid.cols, grid.depths);
    if field.shape() == expected {
        Ok(())
    } else {
        Err(HimenoError::ShapeMismatch { name, expected, actual: field.shape() })
    }
}

/// Which kernel implementation to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Strategy {
    /// Sequential reference loop.
    Single,
    /// Rayon, one task per `i`-plane.
    #[default]
    Parallel,
    /// Rayon with unchecked indexing in the stencil loop.
    ParallelUnsafe,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Single, Strategy::Parallel, Strategy::ParallelUnsafe];

    pub const fn name(self) -> &'static str {
        match self {
            Strategy::Single => "single",
            Strategy::Parallel => "parallel",
            Strategy::ParallelUnsafe => "parallel-unsafe",
        }
    }
}

/// Runs `iterations` Jacobi sweeps and returns the residual of the last one.
///
/// `iterations == 0` returns 0 and leaves `p` untouched. Cells on the outer
/// shell of `p` are never written.
///
/// # Panics
///
/// If `p` or `wrk2` is not a single-channel field on the stencil's grid.
pub fn jacobi(
    strategy: Strategy,
    iterations: usize,
    stencil: &Stencil<'_>,
    p: &mut Field,
    wrk2: &mut Field,
) -> f64 {
    assert_eq!(p.shape(), stencil.shape(), "P does not match the stencil grid");
    assert_eq!(wrk2.shape(), stencil.shape(), "WRK2 does not match the stencil grid");

    match strategy {
        Strategy::Single => safe::single::jacobi_single(iterations, stencil, p, wrk2),
        Strategy::Parallel => safe::parallel::jacobi_parallel(iterations, stencil, p, wrk2),
        Strategy::ParallelUnsafe => {
            unsafe_impl::parallel_unsafe::jacobi_parallel_unsafe(iterations, stencil, p, wrk2)
        }
    }
}

impl PoissonFields {
    /// Validates every field against BND's grid, then runs [`jacobi`].
    pub fn jacobi(&mut self, strategy: Strategy, iterations: usize) -> Result<f64, HimenoError> {
        let PoissonFields { p, bnd, wrk1, wrk2, a, b, c } = self;
        let stencil = Stencil::new(a, b, c, bnd, wrk1)?;
        stencil.check("P", p)?;
        stencil.check("WRK2", wrk2)?;
        Ok(jacobi(strategy, iterations, &stencil, p, wrk2))
    }
}

/// Floating-point operations per interior cell per sweep.
pub const FLOP_PER_CELL: f64 = 34.0;

/// Operation count of one sweep over a full `mx x my x mz` grid.
pub fn flop(mx: usize, my: usize, mz: usize) -> f64 {
    (mz as f64 - 2.0) * (my as f64 - 2.0) * (mx as f64 - 2.0) * FLOP_PER_CELL
}
