//! Validated sample times for a simulation run.

use std::ops::Deref;

use serde::Serialize;

use crate::error::{Error, Result};

/// An ordered, strictly increasing sequence of non-negative sample times (s).
///
/// The first and last samples define the integration span; every returned
/// waveform is evaluated at exactly these points.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TimeVector {
    samples: Vec<f64>,
}

impl TimeVector {
    /// Validate and wrap caller-supplied times.
    pub fn new(samples: Vec<f64>) -> Result<Self> {
        if samples.len() < 2 {
            return Err(Error::InvalidTimeVector(format!(
                "need at least 2 samples, got {}",
                samples.len()
            )));
        }
        for (i, &t) in samples.iter().enumerate() {
            if !t.is_finite() || t < 0.0 {
                return Err(Error::InvalidTimeVector(format!(
                    "sample {} is {} (must be finite and non-negative)",
                    i, t
                )));
            }
        }
        if let Some(i) = samples.windows(2).position(|w| w[1] <= w[0]) {
            return Err(Error::InvalidTimeVector(format!(
                "samples must be strictly increasing (t[{}] = {} >= t[{}] = {})",
                i,
                samples[i],
                i + 1,
                samples[i + 1]
            )));
        }
        Ok(Self { samples })
    }

    /// `samples` evenly spaced points from `start` to `end` inclusive.
    pub fn linspace(start: f64, end: f64, samples: usize) -> Result<Self> {
        if samples < 2 {
            return Err(Error::InvalidTimeVector(format!(
                "need at least 2 samples, got {}",
                samples
            )));
        }
        let step = (end - start) / (samples - 1) as f64;
        let mut times: Vec<f64> = (0..samples).map(|i| start + step * i as f64).collect();
        // Pin the endpoint so the span is exact
        times[samples - 1] = end;
        Self::new(times)
    }

    /// `samples` evenly spaced points over `[0, duration]`.
    pub fn uniform(duration: f64, samples: usize) -> Result<Self> {
        Self::linspace(0.0, duration, samples)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    /// First sample time.
    pub fn start(&self) -> f64 {
        self.samples[0]
    }

    /// Last sample time.
    pub fn end(&self) -> f64 {
        self.samples[self.samples.len() - 1]
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.samples
    }
}

impl Deref for TimeVector {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform() {
        let t = TimeVector::uniform(1.0, 5).unwrap();
        assert_eq!(t.len(), 5);
        assert_eq!(t.start(), 0.0);
        assert_eq!(t.end(), 1.0);
        assert!((t[2] - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_two_samples_is_valid() {
        let t = TimeVector::new(vec![0.0, 2.0]).unwrap();
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_rejects_short_vectors() {
        assert!(matches!(
            TimeVector::new(vec![0.0]),
            Err(Error::InvalidTimeVector(_))
        ));
        assert!(TimeVector::new(vec![]).is_err());
        assert!(TimeVector::uniform(1.0, 1).is_err());
    }

    #[test]
    fn test_rejects_non_increasing() {
        assert!(TimeVector::new(vec![0.0, 0.5, 0.5]).is_err());
        assert!(TimeVector::new(vec![0.0, 0.5, 0.4]).is_err());
        // Zero duration collapses to repeated samples
        assert!(TimeVector::uniform(0.0, 10).is_err());
    }

    #[test]
    fn test_rejects_negative_and_non_finite() {
        assert!(TimeVector::new(vec![-1.0, 0.0]).is_err());
        assert!(TimeVector::new(vec![0.0, f64::NAN]).is_err());
        assert!(TimeVector::new(vec![0.0, f64::INFINITY]).is_err());
    }

    #[test]
    fn test_non_uniform_is_accepted() {
        let t = TimeVector::new(vec![0.0, 0.001, 0.01, 0.1, 1.0]).unwrap();
        assert_eq!(t.as_slice().len(), 5);
        assert_eq!(t.end(), 1.0);
    }
}
