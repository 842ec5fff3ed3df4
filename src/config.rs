use crate::error::HistogramError;
use serde::{Deserialize, Serialize};

/// The binning strategy to use.
///
/// This is a closed set: a histogram request either carries a bin width
/// (fixed-width binning) or a false-positive tolerance (adaptive binning
/// via Bayesian Blocks). There is no open extension point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Algorithm {
    /// Uniform bins of the given `width`, which must be positive.
    FixedWidth { width: f64 },
    /// Variable-width blocks found by the Bayesian Blocks changepoint
    /// search. `false_positive_rate` is the tolerance for spuriously
    /// introduced changepoints and must lie strictly between 0 and 1.
    Adaptive { false_positive_rate: f64 },
}

/// Configuration of a single histogram request.
///
/// Constructed once per request, consumed by one
/// [`compute_histogram`](crate::compute_histogram) call, and discarded.
/// The optional `min`/`max` restrict which samples are binned; absent
/// endpoints default to the smallest and largest finite sample.
///
/// # Examples
///
/// ```
/// use colhist::{compute_histogram, HistogramConfig};
///
/// let config = HistogramConfig::fixed_width(2.0);
/// let bins = compute_histogram(&[1.0, 2.0, 3.0, 4.0, 5.0], &config).unwrap();
/// assert_eq!(bins.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramConfig {
    pub algorithm: Algorithm,
    /// Lower end of the binned range; defaults to the smallest finite sample.
    pub min: Option<f64>,
    /// Upper end of the binned range; defaults to the largest finite sample.
    pub max: Option<f64>,
}

impl HistogramConfig {
    /// Fixed-width binning over the full data range.
    pub fn fixed_width(width: f64) -> Self {
        HistogramConfig {
            algorithm: Algorithm::FixedWidth { width },
            min: None,
            max: None,
        }
    }

    /// Adaptive binning over the full data range.
    pub fn adaptive(false_positive_rate: f64) -> Self {
        HistogramConfig {
            algorithm: Algorithm::Adaptive {
                false_positive_rate,
            },
            min: None,
            max: None,
        }
    }

    /// Restrict binning to `[min, max]`. Samples outside the range are
    /// excluded from every bin.
    ///
    /// # Examples
    ///
    /// ```
    /// use colhist::{compute_histogram, HistogramConfig};
    ///
    /// let config = HistogramConfig::fixed_width(1.0).with_range(Some(2.0), Some(4.0));
    /// let bins = compute_histogram(&[1.0, 2.0, 3.0, 4.0, 5.0], &config).unwrap();
    /// let total: u64 = bins.iter().map(|bin| bin.count).sum();
    /// assert_eq!(total, 3); // 1.0 and 5.0 are out of range
    /// ```
    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Check the algorithm parameters before any data is touched.
    pub(crate) fn validate(&self) -> Result<(), HistogramError> {
        match self.algorithm {
            Algorithm::FixedWidth { width } => {
                // NaN fails the comparison and is rejected as well
                if !(width > 0.0) || width.is_infinite() {
                    return Err(HistogramError::InvalidConfiguration(format!(
                        "bin width must be a positive number, got {width}"
                    )));
                }
            }
            Algorithm::Adaptive {
                false_positive_rate,
            } => {
                if !(false_positive_rate > 0.0 && false_positive_rate < 1.0) {
                    return Err(HistogramError::InvalidConfiguration(format!(
                        "false-positive rate must be in (0, 1), got {false_positive_rate}"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Algorithm, HistogramConfig};
    use test_case::test_case;

    #[test_case(1.0 ; "unit width")]
    #[test_case(0.5 ; "fractional width")]
    #[test_case(1e12 ; "huge width")]
    fn valid_width(width: f64) {
        assert!(HistogramConfig::fixed_width(width).validate().is_ok());
    }

    #[test_case(0.0 ; "zero")]
    #[test_case(-1.0 ; "negative")]
    #[test_case(f64::NAN ; "NaN")]
    #[test_case(f64::INFINITY ; "infinity")]
    fn invalid_width(width: f64) {
        assert!(HistogramConfig::fixed_width(width).validate().is_err());
    }

    #[test_case(0.05 ; "typical")]
    #[test_case(1e-9 ; "tiny")]
    #[test_case(0.999 ; "near one")]
    fn valid_rate(rate: f64) {
        assert!(HistogramConfig::adaptive(rate).validate().is_ok());
    }

    #[test_case(0.0 ; "zero")]
    #[test_case(1.0 ; "one")]
    #[test_case(-0.1 ; "negative")]
    #[test_case(1.5 ; "above one")]
    #[test_case(f64::NAN ; "NaN")]
    fn invalid_rate(rate: f64) {
        assert!(HistogramConfig::adaptive(rate).validate().is_err());
    }

    #[test]
    fn config_json_round_trip() {
        let config = HistogramConfig::fixed_width(2.5).with_range(Some(0.0), None);
        let json = serde_json::to_string(&config).unwrap();
        let back: HistogramConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
        assert_eq!(back.algorithm, Algorithm::FixedWidth { width: 2.5 });
    }
}
