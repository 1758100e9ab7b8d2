//! Per-cutout background statistics.

use std::cmp::Ordering;

use ndarray::{ArrayBase, DataMut, Ix2};

/// Median of the finite values in `values`.
///
/// NaN and infinite pixels are ignored. Even-length input yields the mean
/// of the two middle values. Returns `None` when no finite value remains.
pub fn median<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<f64> {
    let mut v: Vec<f64> = values.into_iter().copied().filter(|x| x.is_finite()).collect();
    if v.is_empty() {
        return None;
    }

    let n = v.len();
    let (lower, &mut upper, _) =
        v.select_nth_unstable_by(n / 2, |a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    if n % 2 == 1 {
        return Some(upper);
    }
    let below = lower.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some((below + upper) / 2.0)
}

/// Subtract the array's own finite median from every element in place.
///
/// Returns the median that was removed, or `None` (array untouched) when
/// the array holds no finite value.
pub fn subtract_median<S>(data: &mut ArrayBase<S, Ix2>) -> Option<f64>
where
    S: DataMut<Elem = f64>,
{
    let m = median(data.iter())?;
    data.mapv_inplace(|x| x - m);
    Some(m)
}
