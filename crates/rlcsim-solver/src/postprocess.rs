//! Derived quantities computed from sampled trajectories.
//!
//! Nothing here re-runs integration. Derivatives are finite-difference
//! estimates over the output samples, so they approximate rather than
//! reproduce the analytic derivative of the response.

/// Numerical derivative of `values` with respect to `times`.
///
/// Interior points use the second-order centered difference for non-uniform
/// spacing:
///
/// ```text
/// f'(t_i) ≈ (hd² f[i+1] - hs² f[i-1] + (hs² - hd²) f[i]) / (hd hs (hd + hs))
/// ```
///
/// with `hd = t_i - t_{i-1}` and `hs = t_{i+1} - t_i`, which reduces to
/// `(f[i+1] - f[i-1]) / 2h` on a uniform grid. The two boundary points use
/// first-order one-sided differences.
///
/// `values` and `times` must have the same length; fewer than two samples
/// yields all zeros.
pub fn gradient(values: &[f64], times: &[f64]) -> Vec<f64> {
    debug_assert_eq!(values.len(), times.len());
    let n = values.len().min(times.len());
    let mut out = vec![0.0; n];
    if n < 2 {
        return out;
    }

    out[0] = (values[1] - values[0]) / (times[1] - times[0]);
    out[n - 1] = (values[n - 1] - values[n - 2]) / (times[n - 1] - times[n - 2]);

    for i in 1..n - 1 {
        let hd = times[i] - times[i - 1];
        let hs = times[i + 1] - times[i];
        out[i] = (hd * hd * values[i + 1] - hs * hs * values[i - 1]
            + (hs * hs - hd * hd) * values[i])
            / (hd * hs * (hd + hs));
    }
    out
}

/// Multiply every sample by `factor`.
pub fn scale(values: &[f64], factor: f64) -> Vec<f64> {
    values.iter().map(|v| v * factor).collect()
}

/// Element-wise `a - b`.
pub fn difference(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| x - y).collect()
}

/// Element-wise sum of several equally long sequences.
pub fn sum(parts: &[&[f64]]) -> Vec<f64> {
    let n = parts.first().map_or(0, |p| p.len());
    (0..n).map(|i| parts.iter().map(|p| p[i]).sum()).collect()
}
