use rayon::prelude::*;

use crate::grid::Field;
use crate::implementations::safe::parallel::{commit_parallel, interior_planes_mut};
use crate::implementations::{Stencil, OMEGA};

/*
  Rayon Unsafe版

  Safe版との違い:
  - get_unchecked で境界チェックを回避（ステンシル計算のみ）
  - 分割方法・総和の順序はSafe版と同一なので残差もビット単位で一致する
*/
pub fn jacobi_parallel_unsafe(
    iterations: usize,
    stencil: &Stencil<'_>,
    p: &mut Field,
    wrk2: &mut Field,
) -> f64 {
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
                let base = (r + 1) * plane;
                let mut acc = 0.0f64;
                for j in 1..cols - 1 {
                    for k in 1..depths - 1 {
                        let local = j * depths + k;
                        // SAFETY: 1 <= i,j,k <= dim-2 なので全ての近傍は同じグリッド内。
                        // A/B/C の各チャネルも Stencil::new で形状確認済み。
                        unsafe {
                            let ss = relax_unchecked(stencil, src, base + local);
                            *dst_plane.get_unchecked_mut(local) = *src.get_unchecked(base + local) + OMEGA * ss;
                            acc += f64::from(ss * ss);
                        }
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

/// Same expression, same evaluation order as [`Stencil::relax`].
///
/// # Safety
///
/// `idx` must be the offset of an interior cell of the stencil's grid and `p`
/// must have the stencil's single-channel shape.
#[inline(always)]
unsafe fn relax_unchecked(st: &Stencil<'_>, p: &[f32], idx: usize) -> f32 {
    let di = st.plane();
    let dj = st.shape().depths;
    let ch = st.channel_len();
    let p = |o: usize| *p.get_unchecked(o);
    let a = |o: usize| *st.a.get_unchecked(o);
    let b = |o: usize| *st.b.get_unchecked(o);
    let c = |o: usize| *st.c.get_unchecked(o);

    let s0 = a(idx) * p(idx + di)
        + a(ch + idx) * p(idx + dj)
        + a(2 * ch + idx) * p(idx + 1)
        + b(idx) * (p(idx + di + dj) - p(idx + di - dj) - p(idx - di + dj) + p(idx - di - dj))
        + b(ch + idx) * (p(idx + dj + 1) - p(idx - dj + 1) - p(idx + dj - 1) + p(idx - dj - 1))
        + b(2 * ch + idx) * (p(idx + di + 1) - p(idx - di + 1) - p(idx + di - 1) + p(idx - di - 1))
        + c(idx) * p(idx - di)
        + c(ch + idx) * p(idx - dj)
        + c(2 * ch + idx) * p(idx - 1)
        + *st.wrk1.get_unchecked(idx);

    (s0 * a(3 * ch + idx) - p(idx)) * *st.bnd.get_unchecked(idx)
}
