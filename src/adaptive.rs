use crate::bins::BinLayout;
use crate::config::HistogramConfig;
use crate::error::HistogramError;
use crate::samples::SampleSet;

// Adaptive binning via Bayesian Blocks, following Scargle et al. (2013),
// "Studies in Astronomical Time Series Analysis VI" (arXiv:1304.2818):
// a dynamic program over changepoint positions maximizing a
// piecewise-constant log-likelihood, with a per-changepoint prior penalty
// derived from the caller's false-positive tolerance.

/// Outcome of one step of the changepoint search.
///
/// `Unresolved` marks a step where every candidate fitness was non-finite
/// (all candidate blocks had zero or negative width), so no changepoint
/// could be placed there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Changepoint {
    Found(usize),
    Unresolved,
}

/// Compute the Bayesian Blocks bin boundaries for a column of data.
///
/// Non-finite values are dropped and the rest is sorted, as in
/// [`compute_histogram`](crate::compute_histogram). The returned
/// boundaries are non-decreasing and partition the data into
/// `edges.len() + 1` variable-width blocks: everything below the first
/// boundary, the left-closed/right-open interior intervals, and
/// everything at or above the last boundary.
///
/// An empty result means the search degenerated to a single block
/// spanning the whole range, which happens for tightly repeated data
/// where no candidate block has positive width.
///
/// # Errors
///
/// * [`HistogramError::InvalidConfiguration`] when `false_positive_rate`
///   is outside `(0, 1)`.
/// * [`HistogramError::InsufficientData`] when fewer than two finite
///   samples are available; there is nothing to search between.
///
/// # Examples
///
/// ```
/// use colhist::block_edges;
///
/// let edges = block_edges(&[0.0, 1.0], 0.05).unwrap();
/// assert_eq!(edges, vec![0.0]);
/// ```
pub fn block_edges(values: &[f64], false_positive_rate: f64) -> Result<Vec<f64>, HistogramError> {
    HistogramConfig::adaptive(false_positive_rate).validate()?;
    let mut values: Vec<f64> = values.iter().copied().filter(|x| x.is_finite()).collect();
    values.sort_unstable_by(f64::total_cmp);
    edges_of_sorted(&values, false_positive_rate)
}

/// Variable-width bin boundaries for a prepared sample set.
///
/// The boundaries are derived from all finite samples; the `[min, max]`
/// range restriction only applies later, when samples are assigned to
/// bins.
pub(crate) fn adaptive_layout(
    samples: &SampleSet,
    false_positive_rate: f64,
) -> Result<BinLayout, HistogramError> {
    Ok(BinLayout::Edges(edges_of_sorted(
        samples.values(),
        false_positive_rate,
    )?))
}

fn edges_of_sorted(values: &[f64], false_positive_rate: f64) -> Result<Vec<f64>, HistogramError> {
    let n = values.len();
    if n < 2 {
        return Err(HistogramError::InsufficientData {
            required: 2,
            actual: n,
        });
    }

    let edges = cell_edges(values);
    // distance from each cell edge to the end of the data
    let block_length: Vec<f64> = edges.iter().map(|edge| values[n - 1] - edge).collect();
    let prior = ncp_prior(n, false_positive_rate);

    let mut best = vec![0.0; n];
    let mut last = vec![Changepoint::Unresolved; n];
    // scratch buffers reused across the k loop
    let mut width = vec![0.0; n];
    let mut cumulative = vec![0.0f64; n];

    // add one data cell per iteration; step k places the k-th changepoint
    for k in 0..n {
        // width of the candidate block starting at cell i and ending at
        // sample k; zero or negative widths are poisoned with NaN
        for i in 0..=k {
            let w = block_length[i] - block_length[k + 1];
            width[i] = if w > 0.0 { w } else { f64::NAN };
        }
        // reverse cumulative sum of unit weights over the window 0..=k,
        // i.e. how many samples the candidate block would hold
        let mut sum = 0.0;
        for i in (0..=k).rev() {
            sum += 1.0;
            cumulative[i] = sum;
        }

        // fitness of each candidate block, NaN widths stay NaN and are
        // ignored by the argmax below
        let mut max_fitness = f64::NEG_INFINITY;
        let mut argmax = Changepoint::Unresolved;
        for i in 0..=k {
            let mut fitness = cumulative[i] * (cumulative[i].ln() - width[i].ln()) - prior;
            if i > 0 {
                fitness += best[i - 1];
            }
            if fitness.is_finite() && fitness > max_fitness {
                max_fitness = fitness;
                argmax = Changepoint::Found(i);
            }
        }
        last[k] = argmax;
        // on an unresolved step best[k] keeps its default of zero
        if argmax != Changepoint::Unresolved {
            best[k] = max_fitness;
        }
    }

    // recover the changepoints by peeling off the last block; the walk
    // strictly descends, ending at index 0 or at the first unresolved step
    let mut recorded = Vec::new();
    let mut cursor = Changepoint::Found(n);
    while let Changepoint::Found(index) = cursor {
        recorded.push(index);
        if index == 0 {
            break;
        }
        cursor = last[index - 1];
    }
    recorded.reverse();

    // the final cell edge is the maximum sample itself and does not
    // separate anything, only changepoints below n contribute boundaries
    Ok(recorded
        .into_iter()
        .filter(|&changepoint| changepoint < n)
        .map(|changepoint| edges[changepoint])
        .collect())
}

/// The `n + 1` cell edges of the sorted samples: the first and last sample,
/// with the midpoints of neighboring samples in between.
fn cell_edges(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut edges = Vec::with_capacity(n + 1);
    edges.push(values[0]);
    for i in 1..n {
        edges.push((values[i - 1] + values[i]) / 2.0);
    }
    edges.push(values[n - 1]);
    edges
}

/// Per-changepoint penalty from the false-positive tolerance, eq. 21 of
/// Scargle et al. (2013). A looser tolerance gives a smaller penalty.
fn ncp_prior(n: usize, false_positive_rate: f64) -> f64 {
    4.0 - (false_positive_rate / (0.0136 * (n as f64).powf(0.478))).ln()
}
