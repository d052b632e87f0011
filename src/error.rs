use crate::grid::Shape;

/// Everything that can stop a benchmark run. None of these are recoverable:
/// the binary reports the error and exits with [`HimenoError::exit_code`].
#[derive(Debug, thiserror::Error)]
pub enum HimenoError {
    #[error("Invalid input character !! unknown grid size {0:?} (expected XS, S, M, L or XL)")]
    UnknownGridSize(String),

    #[error("failed to allocate field {shape}: {reason}")]
    Allocation { shape: Shape, reason: String },

    #[error("field {name} has shape {actual}, expected {expected}")]
    ShapeMismatch {
        name: &'static str,
        expected: Shape,
        actual: Shape,
    },

    #[error("target duration must be a positive number of seconds, got {0}")]
    InvalidTarget(f64),

    #[error("rehearsal of {iterations} iterations took {seconds}s; clock too coarse to extrapolate a loop count")]
    ClockResolution { iterations: usize, seconds: f64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to build worker pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl HimenoError {
    /// Process exit status for this error. An unknown preset keeps the
    /// historical status 6.
    pub fn exit_code(&self) -> u8 {
        match self {
            HimenoError::UnknownGridSize(_) => 6,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_message_names_the_cause() {
        let err = HimenoError::from(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed"));
        assert_eq!(err.to_string(), "I/O error: stdout closed");
        assert_eq!(err.exit_code(), 1);
    }
}
