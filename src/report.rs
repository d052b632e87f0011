use std::fmt;

use crate::config::REFERENCE_MFLOPS;
use crate::preset::GridSize;

/// One timed kernel run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    pub iterations: usize,
    pub seconds: f64,
    pub residual: f64,
    pub mflops: f64,
}

/// Outcome of a full calibrated run.
#[derive(Clone, Debug, PartialEq)]
pub struct BenchReport {
    pub grid: GridSize,
    pub rehearsal: Measurement,
    pub measured: Measurement,
}

impl BenchReport {
    /// Final throughput relative to the reference machine.
    pub fn score(&self) -> f64 {
        score(self.measured.mflops)
    }
}

pub fn score(mflops: f64) -> f64 {
    mflops / REFERENCE_MFLOPS
}

pub struct Dimensions(pub GridSize);

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (mimax, mjmax, mkmax) = self.0.dims();
        let (imax, jmax, kmax) = self.0.interior();
        writeln!(f, "mimax = {mimax} mjmax = {mjmax} mkmax = {mkmax}")?;
        write!(f, "imax = {imax} jmax = {jmax} kmax = {kmax}")
    }
}

pub struct RehearsalStart(pub usize);

impl fmt::Display for RehearsalStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " Start rehearsal measurement process.")?;
        writeln!(f, " Measure the performance in {} times.", self.0)
    }
}

pub struct Rehearsal<'a>(pub &'a Measurement);

impl fmt::Display for Rehearsal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.0;
        writeln!(f, " MFLOPS: {:.6} time(s): {:.6} {:.6e}", m.mflops, m.seconds, m.residual)
    }
}

pub struct Plan {
    pub iterations: usize,
    pub target_secs: f64,
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " Now, start the actual measurement process.")?;
        writeln!(f, " The loop will be executed in {} times", self.iterations)?;
        writeln!(f, " This will take about {} seconds.", self.target_secs)?;
        writeln!(f, " Wait for a while")
    }
}

pub struct Final<'a>(pub &'a Measurement);

impl fmt::Display for Final<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.0;
        writeln!(f, " Loop executed for {} times", m.iterations)?;
        writeln!(f, " Gosa : {:.6e}", m.residual)?;
        writeln!(f, " MFLOPS measured : {:.6}\tcpu : {:.6}", m.mflops, m.seconds)?;
        write!(
            f,
            " Score based on Pentium III 600MHz using Fortran 77: {:.6}",
            score(m.mflops)
        )
    }
}
