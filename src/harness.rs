//! Self-calibrating timing loop: a short rehearsal sizes the real run so that
//! it lasts about `target_secs`.

use std::io::Write;

use tracing::{debug, info};

use crate::config::BenchConfig;
use crate::error::HimenoError;
use crate::implementations::flop;
use crate::init::PoissonFields;
use crate::report::{BenchReport, Final, Measurement, Plan, Rehearsal, RehearsalStart};
use crate::timer::Stopwatch;

/// Achieved MFLOPS for `iterations` sweeps of `flop` operations in `seconds`.
pub fn mflops(iterations: usize, seconds: f64, flop: f64) -> f64 {
    flop / seconds * 1.0e-6 * iterations as f64
}

/// Loop count that should take `target_secs` at the rehearsal's per-sweep time.
///
/// A rehearsal that measured no time at all cannot be extrapolated and is
/// reported as [`HimenoError::ClockResolution`].
pub fn extrapolate(target_secs: f64, rehearsal: &Measurement) -> Result<usize, HimenoError> {
    let per_sweep = rehearsal.seconds / rehearsal.iterations as f64;
    if !(per_sweep.is_finite() && per_sweep > 0.0) {
        return Err(HimenoError::ClockResolution {
            iterations: rehearsal.iterations,
            seconds: rehearsal.seconds,
        });
    }
    Ok((target_secs / per_sweep) as usize)
}

pub struct Harness<'a> {
    config: &'a BenchConfig,
    fields: &'a mut PoissonFields,
    flop: f64,
}

impl<'a> Harness<'a> {
    pub fn new(config: &'a BenchConfig, fields: &'a mut PoissonFields) -> Self {
        let (mx, my, mz) = config.grid.dims();
        Harness { config, fields, flop: flop(mx, my, mz) }
    }

    /// Times `iterations` sweeps. Pressure is carried over from earlier calls.
    pub fn measure(&mut self, iterations: usize) -> Result<Measurement, HimenoError> {
        let strategy = self.config.strategy;
        let (residual, seconds) = Stopwatch::time(|| self.fields.jacobi(strategy, iterations));
        let residual = residual?;

        let m = Measurement {
            iterations,
            seconds,
            residual,
            mflops: mflops(iterations, seconds, self.flop),
        };
        debug!(iterations, seconds, residual, mflops = m.mflops, "kernel run");
        Ok(m)
    }

    pub fn rehearse(&mut self) -> Result<Measurement, HimenoError> {
        self.measure(self.config.rehearsal_iterations.get())
    }

    /// Rehearsal, extrapolation, then the measured run. Progress is written to
    /// `out` as each phase completes.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<BenchReport, HimenoError> {
        let cfg = self.config;

        write!(out, "{}", RehearsalStart(cfg.rehearsal_iterations.get()))?;
        writeln!(out)?;
        let rehearsal = self.rehearse()?;
        writeln!(out, "{}", Rehearsal(&rehearsal))?;

        let iterations = extrapolate(cfg.target_secs, &rehearsal)?;
        info!(iterations, target_secs = cfg.target_secs, "extrapolated loop count");
        writeln!(out, "{}", Plan { iterations, target_secs: cfg.target_secs })?;
        out.flush()?;

        let measured = self.measure(iterations)?;
        writeln!(out, "{}", Final(&measured))?;

        Ok(BenchReport { grid: cfg.grid, rehearsal, measured })
    }
}
