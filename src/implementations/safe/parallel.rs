use rayon::prelude::*;

use crate::grid::{Field, Shape};
use crate::implementations::{Stencil, OMEGA};

/*
  Rayon-based parallel implementation

  1. Compute phase: WRK2's interior planes are split with par_chunks_mut,
     each task owns one `i`-plane of WRK2 and reads P through a shared slice.
  2. The collect() joins every task before P is touched (first barrier).
  3. Commit phase: P's interior planes are split the same way and zipped
     with WRK2's planes; the for_each join is the second barrier.
*/
pub fn jacobi_parallel(iterations: usize, stencil: &Stencil<'_>, p: &mut Field, wrk2: &mut Field) -> f64 {
    let shape = stencil.shape();
    if !shape.has_interior() {
        return 0.0;
    }
    let (_, cols, depths) = shape.grid();
    let plane = shape.plane();

    let mut gosa = 0.0;

    for _ in 0..iterations {
        let src = p.as_slice();
        let partials: Vec<f64> = interior_planes_mut(wrk2.as_mut_slice(), shape)
            .par_chunks_mut(plane)
            .enumerate()
            .map(|(r, dst_plane)| {
                // 実際のgrid上の行は r + 1
                let base = (r + 1) * plane;
                let mut acc = 0.0f64;
                for j in 1..cols - 1 {
                    for k in 1..depths - 1 {
                        let local = j * depths + k;
                        let ss = stencil.relax(src, base + local);
                        dst_plane[local] = src[base + local] + OMEGA * ss;
                        acc += f64::from(ss * ss);
                    }
                }
                acc
            })
            .collect();

        commit_parallel(p, wrk2, shape);

        gosa = partials.iter().fold(0.0, |total, s| total + s);
    }

    gosa
}

/// Copies the interior of `wrk2` into `p`, one task per `i`-plane.
pub(crate) fn commit_parallel(p: &mut Field, wrk2: &Field, shape: Shape) {
    let (_, cols, depths) = shape.grid();
    let plane = shape.plane();

    interior_planes_mut(p.as_mut_slice(), shape)
        .par_chunks_mut(plane)
        .zip(interior_planes(wrk2.as_slice(), shape).par_chunks(plane))
        .for_each(|(dst_plane, src_plane)| {
            for j in 1..cols - 1 {
                let row = j * depths;
                dst_plane[row + 1..row + depths - 1]
                    .copy_from_slice(&src_plane[row + 1..row + depths - 1]);
            }
        });
}

/// Planes `1..rows-1` of a single-channel buffer.
pub(crate) fn interior_planes(data: &[f32], shape: Shape) -> &[f32] {
    &data[shape.plane()..(shape.rows - 1) * shape.plane()]
}

pub(crate) fn interior_planes_mut(data: &mut [f32], shape: Shape) -> &mut [f32] {
    &mut data[shape.plane()..(shape.rows - 1) * shape.plane()]
}
