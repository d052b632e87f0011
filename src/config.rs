use std::num::NonZeroUsize;

use tracing::info;

use crate::error::HimenoError;
use crate::implementations::Strategy;
use crate::preset::GridSize;

pub const REHEARSAL_STEPS: usize = 3; // 予備計測の反復回数
pub const TARGET_SECS: f64 = 60.0; // 本計測の目標時間（秒）

/// MFLOPS of the Pentium III 600MHz / Fortran 77 reference run used for the score.
pub const REFERENCE_MFLOPS: f64 = 82.84;

/// Settings for one benchmark run.
#[derive(Clone, Debug, PartialEq)]
pub struct BenchConfig {
    pub grid: GridSize,
    pub strategy: Strategy,
    /// Worker threads; `None` keeps rayon's default (one per logical CPU).
    pub threads: Option<NonZeroUsize>,
    pub target_secs: f64,
    pub rehearsal_iterations: NonZeroUsize,
}

impl BenchConfig {
    pub fn new(grid: GridSize) -> Self {
        BenchConfig {
            grid,
            strategy: Strategy::default(),
            threads: None,
            target_secs: TARGET_SECS,
            rehearsal_iterations: NonZeroUsize::new(REHEARSAL_STEPS).unwrap_or(NonZeroUsize::MIN),
        }
    }

    pub fn validate(&self) -> Result<(), HimenoError> {
        if self.target_secs.is_finite() && self.target_secs > 0.0 {
            Ok(())
        } else {
            Err(HimenoError::InvalidTarget(self.target_secs))
        }
    }

    /// Sizes rayon's global pool. Must run before any parallel work.
    pub fn install_thread_pool(&self) -> Result<(), HimenoError> {
        if let Some(n) = self.threads {
            rayon::ThreadPoolBuilder::new()
                .num_threads(n.get())
                .build_global()?;
        }
        info!(threads = rayon::current_num_threads(), strategy = self.strategy.name(), "worker pool ready");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_run() {
        let cfg = BenchConfig::new(GridSize::M);
        assert_eq!(cfg.rehearsal_iterations.get(), 3);
        assert_eq!(cfg.target_secs, 60.0);
        assert_eq!(cfg.strategy, Strategy::Parallel);
        assert!(cfg.threads.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn non_positive_target_is_rejected() {
        for target in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let cfg = BenchConfig { target_secs: target, ..BenchConfig::new(GridSize::XS) };
            assert!(matches!(cfg.validate(), Err(HimenoError::InvalidTarget(_))));
        }
    }
}
