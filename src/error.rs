use thiserror::Error;

/// Errors reported by [`compute_histogram`](crate::compute_histogram).
///
/// Only configuration-level problems surface here. Numerical edge cases
/// inside the binners (NaN block widths, unresolvable changepoints) are
/// handled locally and never become errors. Non-finite samples are dropped
/// silently, so they are not an error condition either.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HistogramError {
    /// A request parameter makes the computation undefined: non-positive
    /// bin width, false-positive rate outside `(0, 1)`, or `min > max`.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// There are too few finite samples to carry out the request, e.g.
    /// adaptive binning needs at least two, and a missing range endpoint
    /// cannot be defaulted from an empty sample set.
    #[error("not enough finite samples: need {required}, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// The requested column could not be resolved against the input table.
    /// Produced by column-extraction glue (such as the CLI), never by the
    /// binning engine itself.
    #[error("column {0:?} is not found in the input table")]
    ColumnNotFound(String),
}
