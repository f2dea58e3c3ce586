//! Dormand–Prince 5(4) integrator.
//!
//! Embedded explicit Runge–Kutta pair with FSAL (first same as last), local
//! error control on the 4th-order estimate and a 4th-order continuous
//! extension used to serve arbitrary output times without forcing steps onto
//! them.

use nalgebra::SVector;
use rlcsim_core::{Error, IntegrationFailureKind, Result};

use super::{IntegrationStats, StateEquation, Trajectory};
use crate::options::IntegratorParams;

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 10.0;
/// -1 / (error estimator order + 1)
const ERROR_EXPONENT: f64 = -1.0 / 5.0;

const STAGES: usize = 6;

const C: [f64; STAGES] = [0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0];

const A: [[f64; 5]; STAGES] = [
    [0.0, 0.0, 0.0, 0.0, 0.0],
    [1.0 / 5.0, 0.0, 0.0, 0.0, 0.0],
    [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0],
    [44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0, 0.0, 0.0],
    [
        19372.0 / 6561.0,
        -25360.0 / 2187.0,
        64448.0 / 6561.0,
        -212.0 / 729.0,
        0.0,
    ],
    [
        9017.0 / 3168.0,
        -355.0 / 33.0,
        46732.0 / 5247.0,
        49.0 / 176.0,
        -5103.0 / 18656.0,
    ],
];

const B: [f64; STAGES] = [
    35.0 / 384.0,
    0.0,
    500.0 / 1113.0,
    125.0 / 192.0,
    -2187.0 / 6784.0,
    11.0 / 84.0,
];

/// Difference between the 5th- and 4th-order weights, including the FSAL stage.
const E: [f64; STAGES + 1] = [
    -71.0 / 57600.0,
    0.0,
    71.0 / 16695.0,
    -71.0 / 1920.0,
    17253.0 / 339200.0,
    -22.0 / 525.0,
    1.0 / 40.0,
];

/// Dense-output polynomial coefficients: y(t + x h) = y + h Σ_k K_k Σ_j P[k][j] x^(j+1).
const P: [[f64; 4]; STAGES + 1] = [
    [
        1.0,
        -8048581381.0 / 2820520608.0,
        8663915743.0 / 2820520608.0,
        -12715105075.0 / 11282082432.0,
    ],
    [0.0, 0.0, 0.0, 0.0],
    [
        0.0,
        131558114200.0 / 32700410799.0,
        -68118460800.0 / 10900136933.0,
        87487479700.0 / 32700410799.0,
    ],
    [
        0.0,
        -1754552775.0 / 470086768.0,
        14199869525.0 / 1410260304.0,
        -10690763975.0 / 1880347072.0,
    ],
    [
        0.0,
        127303824393.0 / 49829197408.0,
        -318862633887.0 / 49829197408.0,
        701980252875.0 / 199316789632.0,
    ],
    [
        0.0,
        -282668133.0 / 205662961.0,
        2019193451.0 / 616988883.0,
        -1453857185.0 / 822651844.0,
    ],
    [
        0.0,
        40617522.0 / 29380423.0,
        -110615467.0 / 29380423.0,
        69997945.0 / 29380423.0,
    ],
];

/// One trial step and everything needed to accept it or interpolate inside it.
struct Step<const N: usize> {
    y_new: SVector<f64, N>,
    f_new: SVector<f64, N>,
    k: [SVector<f64, N>; STAGES + 1],
    error_norm: f64,
}

/// An accepted step available for dense output.
struct Accepted<'s, const N: usize> {
    t_old: f64,
    t_new: f64,
    y_old: &'s SVector<f64, N>,
    step: &'s Step<N>,
}

impl<const N: usize> Accepted<'_, N> {
    fn eval(&self, t: f64) -> SVector<f64, N> {
        if t == self.t_new {
            return self.step.y_new;
        }
        let h = self.t_new - self.t_old;
        let x = (t - self.t_old) / h;
        let powers = [x, x * x, x * x * x, x * x * x * x];
        let mut y = *self.y_old;
        for (k, row) in self.step.k.iter().zip(P.iter()) {
            let weight: f64 = row.iter().zip(powers.iter()).map(|(p, xp)| p * xp).sum();
            if weight != 0.0 {
                y += k * (h * weight);
            }
        }
        y
    }
}

fn rms<const N: usize>(v: &SVector<f64, N>) -> f64 {
    if N == 0 {
        return 0.0;
    }
    (v.norm_squared() / N as f64).sqrt()
}

fn failure(time: f64, reason: IntegrationFailureKind) -> Error {
    Error::IntegrationFailure { time, reason }
}

struct Integrator<'a, const N: usize, S: StateEquation<N> + ?Sized> {
    system: &'a S,
    params: &'a IntegratorParams,
    stats: IntegrationStats,
}

impl<'a, const N: usize, S: StateEquation<N> + ?Sized> Integrator<'a, N, S> {
    fn eval(&mut self, t: f64, y: &SVector<f64, N>) -> Result<SVector<f64, N>> {
        self.stats.evaluations += 1;
        let f = self.system.derivative(t, y);
        if f.iter().all(|v| v.is_finite()) {
            Ok(f)
        } else {
            Err(failure(t, IntegrationFailureKind::NonFiniteState))
        }
    }

    fn scale(&self, y: &SVector<f64, N>, y_new: &SVector<f64, N>) -> SVector<f64, N> {
        y.zip_map(y_new, |a, b| {
            self.params.atol + a.abs().max(b.abs()) * self.params.rtol
        })
    }

    /// Starting step estimate from the local derivative magnitudes.
    fn initial_step(
        &mut self,
        t0: f64,
        y0: &SVector<f64, N>,
        f0: &SVector<f64, N>,
        interval: f64,
    ) -> Result<f64> {
        let scale = self.scale(y0, y0);
        let d0 = rms(&y0.component_div(&scale));
        let d1 = rms(&f0.component_div(&scale));

        let h0 = if d0 < 1e-5 || d1 < 1e-5 {
            1e-6
        } else {
            0.01 * d0 / d1
        };
        let h0 = h0.min(interval);

        let y1 = y0 + f0 * h0;
        let f1 = self.eval(t0 + h0, &y1)?;
        let d2 = rms(&(f1 - f0).component_div(&scale)) / h0;

        let h1 = if d1 <= 1e-15 && d2 <= 1e-15 {
            (h0 * 1e-3).max(1e-6)
        } else {
            (0.01 / d1.max(d2)).powf(-ERROR_EXPONENT)
        };

        Ok((100.0 * h0).min(h1).min(interval))
    }

    fn step(
        &mut self,
        t: f64,
        y: &SVector<f64, N>,
        f: &SVector<f64, N>,
        h: f64,
    ) -> Result<Step<N>> {
        let mut k = [SVector::<f64, N>::zeros(); STAGES + 1];
        k[0] = *f;
        for s in 1..STAGES {
            let mut dy = SVector::<f64, N>::zeros();
            for (j, a) in A[s].iter().take(s).enumerate() {
                dy += k[j] * *a;
            }
            k[s] = self.eval(t + C[s] * h, &(y + dy * h))?;
        }

        let mut y_new = *y;
        for (ks, b) in k.iter().zip(B.iter()) {
            y_new += ks * (h * b);
        }
        let f_new = self.eval(t + h, &y_new)?;
        k[STAGES] = f_new;

        let mut error = SVector::<f64, N>::zeros();
        for (ks, e) in k.iter().zip(E.iter()) {
            error += ks * (h * e);
        }
        let scale = self.scale(y, &y_new);
        let error_norm = rms(&error.component_div(&scale));

        Ok(Step {
            y_new,
            f_new,
            k,
            error_norm,
        })
    }
}

/// Integrate `system` from the state `y0` at `times[0]` to the last
/// output time, returning the state at every entry of `times`.
///
/// `times` must be strictly increasing. The breakpoints reported by the
/// system that fall strictly inside the span split it into segments; each
/// segment restarts step-size selection so no step crosses a breakpoint.
///
/// # Errors
/// `IntegrationFailure` when a derivative turns non-finite, the step size
/// collapses, or the step budget in `params` is exhausted. No partial
/// trajectory is returned.
pub fn integrate<const N: usize, S: StateEquation<N> + ?Sized>(
    system: &S,
    y0: SVector<f64, N>,
    times: &[f64],
    params: &IntegratorParams,
) -> Result<Trajectory<N>> {
    params.validate()?;

    let mut integrator = Integrator {
        system,
        params,
        stats: IntegrationStats::default(),
    };

    let Some((&t0, _)) = times.split_first() else {
        return Ok(Trajectory {
            states: Vec::new(),
            stats: integrator.stats,
        });
    };
    let t_end = times[times.len() - 1];

    if !y0.iter().all(|v| v.is_finite()) {
        return Err(failure(t0, IntegrationFailureKind::NonFiniteState));
    }

    let mut states = Vec::with_capacity(times.len());
    let mut next = 0;
    while next < times.len() && times[next] <= t0 {
        states.push(y0);
        next += 1;
    }

    let mut stops: Vec<f64> = system
        .breakpoints()
        .into_iter()
        .filter(|&b| b > t0 && b < t_end)
        .collect();
    stops.sort_by(f64::total_cmp);
    stops.dedup();
    stops.push(t_end);

    let h_max = params.h_max.unwrap_or(f64::INFINITY);
    let mut t = t0;
    let mut y = y0;

    for seg_end in stops {
        if t >= seg_end {
            continue;
        }
        let mut f = integrator.eval(t, &y)?;
        let mut h_abs = match params.h_init {
            Some(h) => h,
            None => integrator.initial_step(t, &y, &f, seg_end - t)?,
        };

        while t < seg_end {
            let min_step = 10.0 * f64::EPSILON * t.abs().max(f64::MIN_POSITIVE);
            h_abs = h_abs.min(h_max).max(min_step);
            let mut rejected = false;

            let (t_new, step) = loop {
                if params
                    .max_steps
                    .is_some_and(|max| integrator.stats.total_steps() >= max)
                {
                    return Err(failure(t, IntegrationFailureKind::MaxStepsExceeded));
                }
                if h_abs < min_step {
                    return Err(failure(t, IntegrationFailureKind::StepSizeTooSmall));
                }

                let t_new = if t + h_abs >= seg_end { seg_end } else { t + h_abs };
                let h = t_new - t;
                let step = integrator.step(t, &y, &f, h)?;
                let err = step.error_norm;

                if err < 1.0 {
                    let mut factor = if err == 0.0 {
                        MAX_FACTOR
                    } else {
                        (SAFETY * err.powf(ERROR_EXPONENT)).min(MAX_FACTOR)
                    };
                    if rejected {
                        factor = factor.min(1.0);
                    }
                    integrator.stats.accepted_steps += 1;
                    integrator.stats.min_step_used = integrator.stats.min_step_used.min(h);
                    integrator.stats.max_step_used = integrator.stats.max_step_used.max(h);
                    h_abs = h * factor;
                    break (t_new, step);
                }

                integrator.stats.rejected_steps += 1;
                log::trace!("rejected step at t = {:e}, h = {:e}, err = {:.3}", t, h, err);
                h_abs = h * (SAFETY * err.powf(ERROR_EXPONENT)).max(MIN_FACTOR);
                rejected = true;
            };

            let accepted = Accepted {
                t_old: t,
                t_new,
                y_old: &y,
                step: &step,
            };
            while next < times.len() && times[next] <= t_new {
                states.push(accepted.eval(times[next]));
                next += 1;
            }

            t = t_new;
            y = step.y_new;
            f = step.f_new;
        }
    }

    if states.iter().any(|s| !s.iter().all(|v| v.is_finite())) {
        return Err(failure(t, IntegrationFailureKind::NonFiniteState));
    }

    Ok(Trajectory {
        states,
        stats: integrator.stats,
    })
}
