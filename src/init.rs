use rayon::prelude::*;
use tracing::debug;

use crate::error::HimenoError;
use crate::grid::Field;

/// Sets every cell of channel `n`, boundary shell included, to `value`.
pub fn fill(field: &mut Field, n: usize, value: f32) {
    field.channel_mut(n).par_iter_mut().for_each(|x| *x = value);
}

/// Sets channel 0 to `i*i / (rows-1)^2`, a profile rising quadratically from 0
/// on the first row to 1 on the last and constant across `j` and `k`.
///
/// A single-row field is filled with 0.
pub fn fill_row_profile(field: &mut Field) {
    let shape = field.shape();
    let plane = shape.plane();
    if plane == 0 {
        return;
    }
    let last = shape.rows.saturating_sub(1) as f64;

    field
        .channel_mut(0)
        .par_chunks_mut(plane)
        .enumerate()
        .for_each(|(i, row)| {
            let value = if last == 0.0 {
                0.0
            } else {
                ((i * i) as f64 / (last * last)) as f32
            };
            row.fill(value);
        });
}

/// The seven fields of one benchmark problem, all on the same grid.
#[derive(Debug)]
pub struct PoissonFields {
    pub p: Field,
    pub bnd: Field,
    pub wrk1: Field,
    pub wrk2: Field,
    pub a: Field,
    pub b: Field,
    pub c: Field,
}

impl PoissonFields {
    /// Allocates every field for a `(mimax, mjmax, mkmax)` grid. Contents are
    /// unspecified until [`PoissonFields::initialize`].
    pub fn allocate((mimax, mjmax, mkmax): (usize, usize, usize)) -> Result<Self, HimenoError> {
        debug!(mimax, mjmax, mkmax, "allocating fields");
        Ok(PoissonFields {
            p: Field::allocate(1, mimax, mjmax, mkmax)?,
            bnd: Field::allocate(1, mimax, mjmax, mkmax)?,
            wrk1: Field::allocate(1, mimax, mjmax, mkmax)?,
            wrk2: Field::allocate(1, mimax, mjmax, mkmax)?,
            a: Field::allocate(4, mimax, mjmax, mkmax)?,
            b: Field::allocate(3, mimax, mjmax, mkmax)?,
            c: Field::allocate(3, mimax, mjmax, mkmax)?,
        })
    }

    /// Standard problem: P row profile, no obstacles, no source term,
    /// A=(1,1,1,1/6), B=0, C=(1,1,1).
    pub fn initialize(&mut self) {
        fill_row_profile(&mut self.p);
        fill(&mut self.bnd, 0, 1.0);
        fill(&mut self.wrk1, 0, 0.0);
        fill(&mut self.wrk2, 0, 0.0);
        fill(&mut self.a, 0, 1.0);
        fill(&mut self.a, 1, 1.0);
        fill(&mut self.a, 2, 1.0);
        fill(&mut self.a, 3, 1.0 / 6.0);
        fill(&mut self.b, 0, 0.0);
        fill(&mut self.b, 1, 0.0);
        fill(&mut self.b, 2, 0.0);
        fill(&mut self.c, 0, 1.0);
        fill(&mut self.c, 1, 1.0);
        fill(&mut self.c, 2, 1.0);
    }

    /// [`PoissonFields::allocate`] followed by [`PoissonFields::initialize`].
    pub fn standard(dims: (usize, usize, usize)) -> Result<Self, HimenoError> {
        let mut fields = PoissonFields::allocate(dims)?;
        fields.initialize();
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert_eq, proptest};

    #[test]
    fn row_profile_runs_from_zero_to_one() {
        let mut f = Field::allocate(1, 9, 4, 5).unwrap();
        fill_row_profile(&mut f);
        for j in 0..4 {
            for k in 0..5 {
                assert_eq!(f.get(0, 0, j, k), 0.0);
                assert_eq!(f.get(0, 8, j, k), 1.0);
                assert_eq!(f.get(0, 4, j, k), 0.25);
            }
        }
    }

    #[test]
    fn row_profile_single_row_is_zero() {
        let mut f = Field::allocate(1, 1, 3, 3).unwrap();
        fill_row_profile(&mut f);
        assert!(f.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn fill_only_touches_its_channel() {
        let mut f = Field::allocate(3, 4, 4, 4).unwrap();
        fill(&mut f, 0, -2.0);
        fill(&mut f, 1, 5.0);
        fill(&mut f, 2, -2.0);
        assert!(f.channel(1).iter().all(|&x| x == 5.0));
        assert!(f.channel(0).iter().all(|&x| x == -2.0));
    }

    #[test]
    fn standard_initialization_coefficients() {
        let fields = PoissonFields::standard((6, 6, 8)).unwrap();
        assert!(fields.a.channel(3).iter().all(|&x| x == 1.0 / 6.0));
        assert!(fields.b.as_slice().iter().all(|&x| x == 0.0));
        assert!(fields.c.as_slice().iter().all(|&x| x == 1.0));
        assert!(fields.bnd.as_slice().iter().all(|&x| x == 1.0));
        assert_eq!(fields.p.get(0, 5, 2, 3), 1.0);
    }

    proptest! {
        #[test]
        fn fill_sets_every_cell(
            channels in 1usize..4,
            rows in 1usize..7,
            cols in 1usize..7,
            depths in 1usize..7,
            value in -1.0e6f32..1.0e6,
        ) {
            let mut f = Field::allocate(channels, rows, cols, depths).unwrap();
            let ch = channels - 1;
            fill(&mut f, ch, value);
            for i in 0..rows {
                for j in 0..cols {
                    for k in 0..depths {
                        prop_assert_eq!(f.get(ch, i, j, k), value);
                    }
                }
            }
        }

        #[test]
        fn row_profile_depends_only_on_row(rows in 2usize..12, cols in 1usize..6, depths in 1usize..6) {
            let mut f = Field::allocate(1, rows, cols, depths).unwrap();
            fill_row_profile(&mut f);
            prop_assert_eq!(f.get(0, 0, 0, 0), 0.0);
            prop_assert_eq!(f.get(0, rows - 1, cols - 1, depths - 1), 1.0);
            for i in 0..rows {
                let expected = f.get(0, i, 0, 0);
                for j in 0..cols {
                    for k in 0..depths {
                        prop_assert_eq!(f.get(0, i, j, k), expected);
                    }
                }
            }
        }
    }
}
