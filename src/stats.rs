//! Order statistics over a sample of observed values
//!
//! A [`Sample`] owns a sorted copy of its input and answers mean and
//! quantile queries. An empty sample is valid; every query on it returns
//! `None` instead of a numeric sentinel.

/// An immutable, sorted sample of real-valued observations.
///
/// [`Sample::new`] is the only place the order is established; the fields
/// stay private so every query can assume sorted values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    values: Vec<f64>,
}

impl Sample {
    /// Build a sample from any sequence of values convertible to `f64`.
    ///
    /// The values are copied and sorted in non-decreasing order using the
    /// IEEE total order, so NaN inputs never panic.
    pub fn new<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<f64>,
    {
        let mut values: Vec<f64> = values.into_iter().map(Into::into).collect();
        values.sort_by(f64::total_cmp);
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sorted view of the observations
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Arithmetic mean, or `None` for an empty sample
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        let sum: f64 = self.values.iter().sum();
        Some(sum / self.values.len() as f64)
    }

    /// Linear-interpolation quantile (R-7), or `None` for an empty sample.
    ///
    /// For `n` sorted values the fractional rank is `p * (n - 1)`; the result
    /// interpolates between the two order statistics around it. A single
    /// value is returned as-is whatever `p` is.
    ///
    /// `p` is expected in `[0, 1]` and is not checked. Values outside that
    /// range extrapolate from the first or last pair of order statistics.
    pub fn quantile(&self, p: f64) -> Option<f64> {
        let data = &self.values;
        debug_assert!(data.windows(2).all(|w| w[0].total_cmp(&w[1]).is_le()));

        match data.len() {
            0 => None,
            1 => Some(data[0]),
            n => {
                let pos = p * (n - 1) as f64;
                // `as` saturates negative ranks to 0
                let lower = (pos.floor() as usize).min(n - 2);
                let frac = pos - lower as f64;
                Some(data[lower] * (1.0 - frac) + data[lower + 1] * frac)
            }
        }
    }

    /// 50th percentile
    pub fn median(&self) -> Option<f64> {
        self.quantile(0.5)
    }
}

impl<T: Into<f64>> FromIterator<T> for Sample {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}
