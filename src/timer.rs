use std::time::Instant;

/// Explicit wall-clock stopwatch. Each timed section owns its own value.
#[derive(Clone, Copy, Debug, Default)]
pub struct Stopwatch {
    started: Option<Instant>,
}

impl Stopwatch {
    /// A stopwatch that is already running.
    pub fn started() -> Self {
        Stopwatch { started: Some(Instant::now()) }
    }

    /// Seconds since the clock started; stops it. A stopwatch that was
    /// never started reads 0.
    pub fn stop(&mut self) -> f64 {
        self.started
            .take()
            .map_or(0.0, |t| t.elapsed().as_secs_f64())
    }

    /// Runs `f` and returns its result with the elapsed seconds.
    pub fn time<T>(f: impl FnOnce() -> T) -> (T, f64) {
        let mut watch = Stopwatch::started();
        let out = f();
        (out, watch.stop())
    }
}
