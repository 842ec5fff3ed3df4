use crate::bins::{assemble, HistogramBin};
use crate::config::{Algorithm, HistogramConfig};
use crate::error::HistogramError;
use crate::samples::SampleSet;
use crate::{adaptive, fixed};

/// Bin a column of numeric data into histogram rows.
///
/// The computation is pure and stateless: the input slice is never
/// mutated, nothing is retained between calls, and the same input always
/// produces the same rows. Non-finite samples (`NaN`, `±inf`) are dropped
/// silently; samples outside the configured `[min, max]` range are
/// excluded from every bin.
///
/// Rows come back in ascending bin order. The sum of their counts equals
/// the number of finite in-range samples, and an empty bin reports NaN
/// for both of its observed endpoints.
///
/// # Errors
///
/// Only configuration-level problems are reported:
///
/// * [`HistogramError::InvalidConfiguration`] for a non-positive bin
///   width, a width so small the bin count overflows, a false-positive
///   rate outside `(0, 1)`, or `min > max`;
/// * [`HistogramError::InsufficientData`] when a range endpoint has to be
///   defaulted from an empty sample set, or when adaptive binning is
///   asked for with fewer than two finite samples.
///
/// # Examples
///
/// ```
/// use colhist::{compute_histogram, HistogramConfig};
///
/// let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// let bins = compute_histogram(&data, &HistogramConfig::fixed_width(2.0)).unwrap();
///
/// let counts: Vec<u64> = bins.iter().map(|bin| bin.count).collect();
/// assert_eq!(counts, vec![2, 2, 2, 2, 2]);
/// ```
///
/// Adaptive binning instead derives the bin boundaries from the data:
///
/// ```
/// use colhist::{compute_histogram, HistogramConfig};
///
/// let data = [0.0, 1.0];
/// let bins = compute_histogram(&data, &HistogramConfig::adaptive(0.05)).unwrap();
/// assert_eq!(bins.len(), 2);
/// assert_eq!(bins[1].count, 2);
/// ```
pub fn compute_histogram(
    values: &[f64],
    config: &HistogramConfig,
) -> Result<Vec<HistogramBin>, HistogramError> {
    config.validate()?;
    let samples = SampleSet::new(values, config.min, config.max)?;
    let layout = match config.algorithm {
        Algorithm::FixedWidth { width } => fixed::uniform_layout(&samples, width)?,
        Algorithm::Adaptive {
            false_positive_rate,
        } => adaptive::adaptive_layout(&samples, false_positive_rate)?,
    };
    Ok(assemble(&samples, &layout))
}
