//! Small descriptive-statistics kernels used by the summaries.
//!
//! Every function accepts empty input and answers with `None` or an empty
//! collection instead of failing.

/// Arithmetic mean, `None` for no values.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Sample standard deviation (`ddof = 1`), `None` for fewer than two values.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values.iter().copied())?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Pearson correlation coefficient of paired observations.
///
/// `None` when there are fewer than two pairs or either side is constant.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }
    let mx = mean(pairs.iter().map(|p| p.0))?;
    let my = mean(pairs.iter().map(|p| p.1))?;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for &(x, y) in pairs {
        let dx = x - mx;
        let dy = y - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

/// Quantile of already sorted data, linear interpolation between closest ranks.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(f64::total_cmp);
    v
}

// ---------------------------------------------------------------------------
// Box plot statistics
// ---------------------------------------------------------------------------

/// Five-number summary with Tukey whiskers (1.5 × IQR).
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    /// Points outside the whiskers, ascending.
    pub outliers: Vec<f64>,
}

impl BoxStats {
    pub fn from_values(values: &[f64]) -> Option<BoxStats> {
        let sorted = sorted(values);
        let q1 = quantile(&sorted, 0.25)?;
        let median = quantile(&sorted, 0.5)?;
        let q3 = quantile(&sorted, 0.75)?;
        let reach = 1.5 * (q3 - q1);
        let (lo_fence, hi_fence) = (q1 - reach, q3 + reach);

        let within = |v: &f64| (lo_fence..=hi_fence).contains(v);
        let lower_whisker = sorted.iter().copied().find(within).unwrap_or(q1);
        let upper_whisker = sorted.iter().copied().rev().find(within).unwrap_or(q3);
        let outliers = sorted.iter().copied().filter(|v| !within(v)).collect();

        Some(BoxStats {
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
            outliers,
        })
    }
}

// ---------------------------------------------------------------------------
// Histogram + kernel density
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl Bin {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Equal-width histogram over the data range. The last bin is closed on the right.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    pub bins: Vec<Bin>,
}

impl Histogram {
    pub fn from_values(values: &[f64], bins: usize) -> Histogram {
        if values.is_empty() || bins == 0 {
            return Histogram::default();
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let (lo, hi) = if max > min {
            (min, max)
        } else {
            (min - 0.5, max + 0.5)
        };
        let width = (hi - lo) / bins as f64;

        let mut counts = vec![0usize; bins];
        for &v in values {
            let slot = (((v - lo) / width) as usize).min(bins - 1);
            counts[slot] += 1;
        }

        Histogram {
            bins: counts
                .into_iter()
                .enumerate()
                .map(|(i, count)| Bin {
                    start: lo + width * i as f64,
                    end: lo + width * (i + 1) as f64,
                    count,
                })
                .collect(),
        }
    }

    pub fn bin_width(&self) -> Option<f64> {
        self.bins.first().map(Bin::width)
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

/// Gaussian kernel density estimate with Scott's rule bandwidth,
/// evaluated at `points` evenly spaced positions across the data range.
///
/// Returns `[x, density]` pairs; empty when the data has fewer than two
/// values or no spread.
pub fn gaussian_kde(values: &[f64], points: usize) -> Vec<[f64; 2]> {
    let Some(sd) = std_dev(values) else {
        return Vec::new();
    };
    if sd == 0.0 || points < 2 {
        return Vec::new();
    }
    let n = values.len() as f64;
    let bandwidth = sd * n.powf(-0.2);
    let norm = 1.0 / (n * bandwidth * (2.0 * std::f64::consts::PI).sqrt());

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let step = (max - min) / (points - 1) as f64;

    (0..points)
        .map(|i| {
            let x = min + step * i as f64;
            let density: f64 = values
                .iter()
                .map(|v| (-0.5 * ((x - v) / bandwidth).powi(2)).exp())
                .sum();
            [x, density * norm]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn mean_of_nothing_is_none() {
        assert_eq!(mean(std::iter::empty()), None);
        assert_eq!(mean([1.0, 2.0, 6.0]), Some(3.0));
    }

    #[test]
    fn pearson_detects_perfect_and_inverse_relations() {
        let up: Vec<(f64, f64)> = (0..5).map(|i| (i as f64, 2.0 * i as f64 + 1.0)).collect();
        let down: Vec<(f64, f64)> = (0..5).map(|i| (i as f64, -(i as f64))).collect();
        assert!(close(pearson(&up).unwrap(), 1.0));
        assert!(close(pearson(&down).unwrap(), -1.0));
    }

    #[test]
    fn pearson_is_undefined_for_constant_or_tiny_input() {
        assert_eq!(pearson(&[(1.0, 2.0)]), None);
        assert_eq!(pearson(&[(1.0, 2.0), (1.0, 3.0), (1.0, 4.0)]), None);
        assert_eq!(pearson(&[]), None);
    }

    #[test]
    fn quantile_interpolates_linearly() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert!(close(quantile(&data, 0.5).unwrap(), 2.5));
        assert!(close(quantile(&data, 0.25).unwrap(), 1.75));
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn box_stats_split_outliers_from_whiskers() {
        let stats = BoxStats::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
        assert!(close(stats.median, 3.5));
        assert_eq!(stats.lower_whisker, 1.0);
        assert_eq!(stats.upper_whisker, 5.0);
        assert_eq!(stats.outliers, vec![100.0]);
        assert!(BoxStats::from_values(&[]).is_none());
    }

    #[test]
    fn histogram_counts_every_value_once() {
        let values = [0.0, 1.0, 2.0, 3.0, 10.0];
        let hist = Histogram::from_values(&values, 5);
        assert_eq!(hist.bins.len(), 5);
        assert_eq!(hist.total(), 5);
        assert_eq!(hist.bins[0].count, 2);
        assert_eq!(hist.bins[1].count, 2);
        assert_eq!(hist.bins[4].count, 1);
        assert!(close(hist.bin_width().unwrap(), 2.0));
    }

    #[test]
    fn histogram_of_single_value_gets_unit_range() {
        let hist = Histogram::from_values(&[4.0, 4.0], 2);
        assert_eq!(hist.bins[0].start, 3.5);
        assert_eq!(hist.bins[1].end, 4.5);
        assert_eq!(hist.total(), 2);
        assert!(Histogram::from_values(&[], 30).is_empty());
    }

    #[test]
    fn kde_spans_data_range_and_needs_spread() {
        let curve = gaussian_kde(&[1.0, 2.0, 2.5, 4.0], 50);
        assert_eq!(curve.len(), 50);
        assert_eq!(curve[0][0], 1.0);
        assert!(close(curve[49][0], 4.0));
        assert!(curve.iter().all(|p| p[1] > 0.0));
        assert!(gaussian_kde(&[3.0, 3.0], 50).is_empty());
        assert!(gaussian_kde(&[3.0], 50).is_empty());
    }
}
