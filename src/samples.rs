use crate::error::HistogramError;
use crate::is_sorted;

/// The prepared input of one binning call: finite samples sorted in
/// ascending order, plus the resolved value range `[min, max]`.
///
/// Non-finite values (`f64::NAN`, `f64::INFINITY`, `f64::NEG_INFINITY`)
/// are dropped during construction. They are not an error, merely missing
/// data points, and they never participate in range defaulting or bin
/// assignment.
///
/// # Examples
///
/// ```
/// use colhist::SampleSet;
///
/// let samples = SampleSet::new(&[3.0, f64::NAN, 1.0, 2.0], None, None).unwrap();
/// assert_eq!(samples.values(), &[1.0, 2.0, 3.0]);
/// assert_eq!(samples.min(), 1.0);
/// assert_eq!(samples.max(), 3.0);
/// ```
#[derive(Debug, Clone)]
pub struct SampleSet {
    values: Vec<f64>,
    min: f64,
    max: f64,
}

impl SampleSet {
    /// Filter, sort and resolve the range of the raw column data.
    ///
    /// A caller-supplied endpoint that is not finite counts as absent.
    /// Absent endpoints default to the smallest and largest sample.
    ///
    /// # Errors
    ///
    /// * [`HistogramError::InsufficientData`] when an endpoint has to be
    ///   defaulted but no finite sample exists.
    /// * [`HistogramError::InvalidConfiguration`] when the resolved range
    ///   has `min > max`.
    pub fn new(
        values: &[f64],
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<Self, HistogramError> {
        let mut values: Vec<f64> = values.iter().copied().filter(|x| x.is_finite()).collect();
        values.sort_unstable_by(f64::total_cmp);

        let min = match min.filter(|x| x.is_finite()) {
            Some(min) => min,
            None => *values.first().ok_or(HistogramError::InsufficientData {
                required: 1,
                actual: 0,
            })?,
        };
        let max = match max.filter(|x| x.is_finite()) {
            Some(max) => max,
            None => *values.last().ok_or(HistogramError::InsufficientData {
                required: 1,
                actual: 0,
            })?,
        };
        if min > max {
            return Err(HistogramError::InvalidConfiguration(format!(
                "empty range: min {min} is larger than max {max}"
            )));
        }

        debug_assert!(is_sorted(&values));
        Ok(SampleSet { values, min, max })
    }

    /// The finite samples in ascending order.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The number of finite samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when no finite sample survived filtering.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Lower end of the binned range.
    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper end of the binned range.
    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Whether `value` takes part in binning.
    #[inline]
    pub fn in_range(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::SampleSet;
    use crate::error::HistogramError;
    use test_case::test_case;

    #[test]
    fn sorts_and_defaults_range() {
        let samples = SampleSet::new(&[5.0, 1.0, 3.0, 4.0, 2.0], None, None).unwrap();
        assert_eq!(samples.values(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(samples.len(), 5);
        assert_eq!((samples.min(), samples.max()), (1.0, 5.0));
    }

    #[test_case(f64::NAN ; "NaN")]
    #[test_case(f64::INFINITY ; "infinity")]
    #[test_case(f64::NEG_INFINITY ; "negative infinity")]
    fn drops_non_finite(value: f64) {
        let samples = SampleSet::new(&[1.0, value, 3.0], None, None).unwrap();
        assert_eq!(samples.values(), &[1.0, 3.0]);
        // non-finite values never drive range defaulting
        assert_eq!((samples.min(), samples.max()), (1.0, 3.0));
    }

    #[test]
    fn supplied_range_wins() {
        let samples = SampleSet::new(&[1.0, 2.0, 3.0], Some(0.0), Some(10.0)).unwrap();
        assert_eq!((samples.min(), samples.max()), (0.0, 10.0));
        assert!(samples.in_range(0.0));
        assert!(samples.in_range(10.0));
        assert!(!samples.in_range(10.1));
    }

    #[test]
    fn partial_range() {
        let samples = SampleSet::new(&[1.0, 2.0, 3.0], Some(2.0), None).unwrap();
        assert_eq!((samples.min(), samples.max()), (2.0, 3.0));
        assert!(!samples.in_range(1.0));
    }

    #[test]
    fn non_finite_endpoint_counts_as_absent() {
        let samples = SampleSet::new(&[1.0, 2.0, 3.0], Some(f64::NAN), Some(f64::INFINITY)).unwrap();
        assert_eq!((samples.min(), samples.max()), (1.0, 3.0));
    }

    #[test]
    fn empty_with_full_range_is_legal() {
        let samples = SampleSet::new(&[], Some(0.0), Some(1.0)).unwrap();
        assert!(samples.is_empty());
        assert_eq!((samples.min(), samples.max()), (0.0, 1.0));
    }

    #[test]
    fn empty_without_range_fails() {
        assert_eq!(
            SampleSet::new(&[], None, None).unwrap_err(),
            HistogramError::InsufficientData {
                required: 1,
                actual: 0
            }
        );
        // one endpoint is not enough, the other still has to be defaulted
        assert!(SampleSet::new(&[f64::NAN], Some(0.0), None).is_err());
    }

    #[test]
    fn inverted_range_fails() {
        assert!(matches!(
            SampleSet::new(&[1.0, 2.0], Some(5.0), Some(2.0)).unwrap_err(),
            HistogramError::InvalidConfiguration(_)
        ));
        // also when one endpoint comes from the data
        assert!(matches!(
            SampleSet::new(&[1.0, 2.0], Some(5.0), None).unwrap_err(),
            HistogramError::InvalidConfiguration(_)
        ));
    }
}
