use crate::grid::Field;
use crate::implementations::{Stencil, OMEGA};

pub fn jacobi_single(iterations: usize, stencil: &Stencil<'_>, p: &mut Field, wrk2: &mut Field) -> f64 {
    let shape = stencil.shape();
    if !shape.has_interior() {
        return 0.0;
    }
    let (rows, cols, depths) = shape.grid();
    let plane = shape.plane();

    let mut gosa = 0.0;

    for _ in 0..iterations {
        let src = p.as_slice();
        let dst = wrk2.as_mut_slice();

        let mut total = 0.0f64;
        for i in 1..rows - 1 {
            // 平面ごとの部分和（並列版と同じ順序で足し込む）
            let mut acc = 0.0f64;
            for j in 1..cols - 1 {
                for k in 1..depths - 1 {
                    let idx = i * plane + j * depths + k;
                    let ss = stencil.relax(src, idx);
                    dst[idx] = src[idx] + OMEGA * ss;
                    acc += f64::from(ss * ss);
                }
            }
            total += acc;
        }

        let dst = p.as_mut_slice();
        let src = wrk2.as_slice();
        for i in 1..rows - 1 {
            for j in 1..cols - 1 {
                let row = i * plane + j * depths;
                dst[row + 1..row + depths - 1].copy_from_slice(&src[row + 1..row + depths - 1]);
            }
        }

        gosa = total;
    }

    gosa
}
