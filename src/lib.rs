mod adaptive;
mod bins;
mod config;
mod error;
mod fixed;
mod hist;
mod samples;
pub mod serde;

pub use self::adaptive::block_edges;
pub use self::bins::HistogramBin;
pub use self::config::{Algorithm, HistogramConfig};
pub use self::error::HistogramError;
pub use self::hist::compute_histogram;
pub use self::samples::SampleSet;

/// Check if a slice is sorted
fn is_sorted(slice: &[f64]) -> bool {
    slice.windows(2).all(|w| w[0] <= w[1])
}
