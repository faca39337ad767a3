use thiserror::Error;

/// Top-level error type for the coaster kinematics core.
#[derive(Debug, Error)]
pub enum CoasterError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Parameterization(#[from] ParameterizationError),
}

/// Errors related to curve construction and parameter validation.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid curve: {0}")]
    InvalidCurve(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to building an arc-length table.
#[derive(Debug, Error)]
pub enum ParameterizationError {
    #[error("invalid parameterization parameters: {0}")]
    InvalidParameters(String),
}

/// Convenience type alias for results using [`CoasterError`].
pub type Result<T> = std::result::Result<T, CoasterError>;

/// Recoverable conditions worth surfacing to the frame driver.
///
/// None of these stop the simulation; they are logged at `warn` level and
/// returned wherever the caller can react to them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Diagnostic {
    /// The parameter step was too coarse for the requested arc-length
    /// resolution. Halving `delta_u` and rebuilding usually fixes it.
    #[error(
        "arc-length table under-resolved: a parameter step of {delta_u} covered {step_length} \
         (resolution {delta_s}), or entries were not monotonic"
    )]
    DegenerateSampling {
        delta_u: f64,
        delta_s: f64,
        step_length: f64,
    },

    /// The look-ahead distance is large relative to local curvature.
    #[error(
        "unstable frame estimate: half chords {before} and {after} differ by more than 2x"
    )]
    UnstableFrameEstimate { before: f64, after: f64 },

    /// Pieces are spaced too far apart to read as a continuous track.
    #[error("sparse layout: spacing {spacing} exceeds 10% of track length {total_length}")]
    SparseLayout { spacing: f64, total_length: f64 },
}

impl GeometryError {
    /// Checks that `value` lies in `[min, max]` and is finite.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] otherwise.
    pub fn check_range(
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    ) -> std::result::Result<(), Self> {
        if value.is_finite() && value >= min && value <= max {
            Ok(())
        } else {
            Err(Self::ParameterOutOfRange {
                parameter,
                value,
                min,
                max,
            })
        }
    }
}
