use crate::samples::SampleSet;
use serde::{Deserialize, Serialize};

/// One output row of a histogram: the bin position, the number of samples
/// that fell into the bin, and the smallest and largest sample observed
/// inside it.
///
/// Rows are emitted in ascending `index` order and their intervals
/// partition the binned range without gaps. An empty bin (`count == 0`)
/// reports `min` and `max` as `f64::NAN`, never a synthesized interval
/// boundary.
///
/// `PartialEq` treats two NaN endpoints as equal, so empty bins compare
/// equal to each other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Position of the bin, counted from the low end of the range.
    pub index: usize,
    /// How many in-range samples fell into the bin.
    pub count: u64,
    /// Smallest sample in the bin, NaN when the bin is empty.
    pub min: f64,
    /// Largest sample in the bin, NaN when the bin is empty.
    pub max: f64,
}

impl HistogramBin {
    /// A populated row.
    ///
    /// # Examples
    ///
    /// ```
    /// use colhist::HistogramBin;
    ///
    /// let bin = HistogramBin::new(0, 2, 1.0, 1.5);
    /// assert_eq!(bin.count, 2);
    /// assert!(bin.min <= bin.max);
    /// ```
    pub fn new(index: usize, count: u64, min: f64, max: f64) -> Self {
        HistogramBin {
            index,
            count,
            min,
            max,
        }
    }

    /// A row for a bin that no sample fell into.
    ///
    /// # Examples
    ///
    /// ```
    /// use colhist::HistogramBin;
    ///
    /// let bin = HistogramBin::empty(3);
    /// assert_eq!(bin.count, 0);
    /// assert!(bin.min.is_nan());
    /// assert!(bin.max.is_nan());
    /// ```
    pub fn empty(index: usize) -> Self {
        HistogramBin {
            index,
            count: 0,
            min: f64::NAN,
            max: f64::NAN,
        }
    }
}

impl PartialEq for HistogramBin {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
            && self.count == other.count
            && nan_or_eq(self.min, other.min)
            && nan_or_eq(self.max, other.max)
    }
}

/// Both values are either NaNs or are equal
#[inline]
fn nan_or_eq(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || (a == b)
}

/// The bin boundaries a binner hands to the assembly pass.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BinLayout {
    /// `bins` intervals of equal `width` starting at `origin`; each bin is
    /// left-closed/right-open except the last, which also takes the range
    /// maximum.
    Uniform {
        origin: f64,
        width: f64,
        bins: usize,
    },
    /// Interior boundaries in ascending order. Bin 0 is everything below
    /// the first boundary, bin `i` is `[edges[i-1], edges[i])`, and the
    /// final bin is everything at or above the last boundary. An empty
    /// boundary list means a single bin spanning the whole range.
    Edges(Vec<f64>),
}

impl BinLayout {
    /// Total number of bins.
    pub(crate) fn bins(&self) -> usize {
        match self {
            BinLayout::Uniform { bins, .. } => *bins,
            BinLayout::Edges(edges) => edges.len() + 1,
        }
    }

    /// Bin index of an in-range sample.
    fn index_of(&self, value: f64) -> usize {
        match self {
            BinLayout::Uniform {
                origin,
                width,
                bins,
            } => {
                // a sample exactly at the range maximum lands in the last bin
                (((value - origin) / width) as usize).min(bins - 1)
            }
            // the number of boundaries at or below the value is exactly the
            // left-closed/right-open bin index
            BinLayout::Edges(edges) => edges.partition_point(|&edge| edge <= value),
        }
    }
}

/// Walk the samples once and accumulate per-bin count, min and max.
///
/// Accumulators start at the `+inf`/`-inf` sentinels so that the first
/// assigned sample always replaces them; bins that stay empty have the
/// sentinels swapped for NaN before the rows are returned. Out-of-range
/// samples belong to no bin and are skipped.
pub(crate) fn assemble(samples: &SampleSet, layout: &BinLayout) -> Vec<HistogramBin> {
    let mut rows: Vec<HistogramBin> = (0..layout.bins())
        .map(|index| HistogramBin {
            index,
            count: 0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        })
        .collect();

    for &value in samples.values() {
        if !samples.in_range(value) {
            continue;
        }
        let row = &mut rows[layout.index_of(value)];
        row.count += 1;
        if value < row.min {
            row.min = value;
        }
        if value > row.max {
            row.max = value;
        }
    }

    for row in &mut rows {
        if row.count == 0 {
            row.min = f64::NAN;
            row.max = f64::NAN;
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::{assemble, BinLayout, HistogramBin};
    use crate::samples::SampleSet;
    use test_case::test_case;

    #[test]
    fn nan_aware_equality() {
        assert_eq!(HistogramBin::empty(0), HistogramBin::empty(0));
        assert_ne!(HistogramBin::empty(0), HistogramBin::empty(1));
        assert_ne!(HistogramBin::empty(0), HistogramBin::new(0, 1, 2.0, 2.0));
        assert_eq!(
            HistogramBin::new(1, 3, 0.5, 0.9),
            HistogramBin::new(1, 3, 0.5, 0.9)
        );
    }

    #[test_case(1.0, 0 ; "range minimum in first bin")]
    #[test_case(2.9, 0 ; "below first boundary")]
    #[test_case(3.0, 1 ; "boundary is left-closed")]
    #[test_case(8.9, 3 ; "inside a middle bin")]
    #[test_case(9.0, 4 ; "last boundary")]
    #[test_case(10.0, 4 ; "range maximum in last bin")]
    fn uniform_membership(value: f64, expected: usize) {
        let layout = BinLayout::Uniform {
            origin: 1.0,
            width: 2.0,
            bins: 5,
        };
        assert_eq!(layout.index_of(value), expected);
    }

    #[test_case(0.0, 0 ; "below first edge")]
    #[test_case(1.0, 1 ; "first edge is left-closed")]
    #[test_case(1.5, 1 ; "inside middle bin")]
    #[test_case(2.0, 2 ; "last edge starts final bin")]
    #[test_case(99.0, 2 ; "far above last edge")]
    fn edges_membership(value: f64, expected: usize) {
        let layout = BinLayout::Edges(vec![1.0, 2.0]);
        assert_eq!(layout.bins(), 3);
        assert_eq!(layout.index_of(value), expected);
    }

    #[test]
    fn no_edges_is_a_single_bin() {
        let layout = BinLayout::Edges(vec![]);
        assert_eq!(layout.bins(), 1);
        assert_eq!(layout.index_of(-1e300), 0);
        assert_eq!(layout.index_of(1e300), 0);
    }

    #[test]
    fn accumulates_count_min_max() {
        let samples = SampleSet::new(&[1.0, 1.5, 3.0, 9.5, 10.0], None, None).unwrap();
        let layout = BinLayout::Uniform {
            origin: 1.0,
            width: 3.0,
            bins: 4,
        };
        let rows = assemble(&samples, &layout);
        assert_eq!(
            rows,
            vec![
                HistogramBin::new(0, 3, 1.0, 3.0),
                HistogramBin::empty(1),
                HistogramBin::new(2, 1, 9.5, 9.5),
                HistogramBin::new(3, 1, 10.0, 10.0),
            ]
        );
    }

    #[test]
    fn skips_out_of_range() {
        let samples = SampleSet::new(&[0.0, 1.0, 2.0, 3.0, 4.0], Some(1.0), Some(3.0)).unwrap();
        let layout = BinLayout::Edges(vec![2.0]);
        let rows = assemble(&samples, &layout);
        assert_eq!(
            rows,
            vec![
                HistogramBin::new(0, 1, 1.0, 1.0),
                HistogramBin::new(1, 2, 2.0, 3.0),
            ]
        );
    }

    #[test]
    fn empty_sample_set_gives_all_empty_bins() {
        let samples = SampleSet::new(&[], Some(0.0), Some(10.0)).unwrap();
        let layout = BinLayout::Uniform {
            origin: 0.0,
            width: 5.0,
            bins: 3,
        };
        let rows = assemble(&samples, &layout);
        assert_eq!(
            rows,
            vec![
                HistogramBin::empty(0),
                HistogramBin::empty(1),
                HistogramBin::empty(2),
            ]
        );
    }
}
