use crate::bins::BinLayout;
use crate::error::HistogramError;
use crate::samples::SampleSet;

// Fixed-width binning. The width itself is validated before any data is
// touched; what remains to check here is that the width is not so small
// relative to the range that the bin count overflows.

/// Uniform bins of the given `width` covering `[min, max]`.
///
/// The bin count is `floor((max - min) / width) + 1`, so a degenerate
/// range (`min == max`) still yields a single bin that collects every
/// in-range sample. A sample's bin is `floor((x - min) / width)`, clamped
/// so that `x == max` lands in the last bin.
///
/// A width so small that the bin count does not fit in `usize` is
/// rejected as [`HistogramError::InvalidConfiguration`].
pub(crate) fn uniform_layout(
    samples: &SampleSet,
    width: f64,
) -> Result<BinLayout, HistogramError> {
    let bins = ((samples.max() - samples.min()) / width).floor();
    // the cast below saturates instead of wrapping, so reject while the
    // count is still a float
    if !(bins < usize::MAX as f64) {
        return Err(HistogramError::InvalidConfiguration(format!(
            "bin width {width} is too small for the range, the bin count overflows"
        )));
    }
    Ok(BinLayout::Uniform {
        origin: samples.min(),
        width,
        bins: bins as usize + 1,
    })
}

#[cfg(test)]
mod tests {
    use super::uniform_layout;
    use crate::bins::BinLayout;
    use crate::error::HistogramError;
    use crate::samples::SampleSet;
    use test_case::test_case;

    #[test_case(2.0, 5 ; "partial last bin")]
    #[test_case(3.0, 4 ; "exact multiple")]
    #[test_case(9.0, 2 ; "one split")]
    #[test_case(20.0, 1 ; "width larger than range")]
    fn bin_count(width: f64, expected: usize) {
        // range [1, 10]
        let samples = SampleSet::new(&[1.0, 4.0, 10.0], None, None).unwrap();
        let layout = uniform_layout(&samples, width).unwrap();
        assert_eq!(layout.bins(), expected);
    }

    #[test]
    fn degenerate_range_is_one_bin() {
        let samples = SampleSet::new(&[7.0, 7.0, 7.0], None, None).unwrap();
        assert_eq!(
            uniform_layout(&samples, 0.5).unwrap(),
            BinLayout::Uniform {
                origin: 7.0,
                width: 0.5,
                bins: 1,
            }
        );
    }

    #[test]
    fn origin_is_the_range_minimum() {
        let samples = SampleSet::new(&[3.0, 4.0], Some(0.0), Some(10.0)).unwrap();
        let layout = uniform_layout(&samples, 2.5).unwrap();
        assert_eq!(
            layout,
            BinLayout::Uniform {
                origin: 0.0,
                width: 2.5,
                bins: 5,
            }
        );
    }

    #[test]
    fn overflowing_bin_count_is_rejected() {
        // 1e20 bins do not fit in usize
        let samples = SampleSet::new(&[0.0, 1e10], None, None).unwrap();
        assert!(matches!(
            uniform_layout(&samples, 1e-10).unwrap_err(),
            HistogramError::InvalidConfiguration(_)
        ));
    }
}
