//! Top-level simulation entry points.

use rlcsim_core::{Circuit, Error, IntegrationFailureKind, Result, TimeVector};

use crate::formulation::Formulation;
use crate::options::SimulationOptions;
use crate::result::SimulationResult;

/// Ramp windows longer than this fraction of the fastest timescale are
/// reported as distorting the response.
const RAMP_WARN_RATIO: f64 = 0.1;

/// Run one transient simulation.
///
/// The source switches on at the first sample of `times` with every state
/// variable at zero. The result holds every quantity of the circuit's
/// topology sampled at `times`, or an error; a result never contains a
/// non-finite sample.
pub fn simulate(
    circuit: &Circuit,
    times: &TimeVector,
    options: &SimulationOptions,
) -> Result<SimulationResult> {
    options.validate()?;
    let formulation = Formulation::select(circuit, &options.ramp)?;
    log::debug!(
        "Selected {} formulation ({} samples over [{:e}, {:e}] s)",
        formulation.name(),
        times.len(),
        times.start(),
        times.end()
    );

    if let Formulation::ParallelRlc(_) = formulation {
        if let Some(fastest) = formulation.fastest_timescale() {
            if options.ramp.window > RAMP_WARN_RATIO * fastest {
                log::warn!(
                    "Ramp window {:e} s is not small against the fastest timescale {:e} s; \
                     the parallel RLC response will deviate from the ideal step response",
                    options.ramp.window,
                    fastest
                );
            }
        }
    }

    let result = formulation.solve(times, &options.integrator)?;

    if let Some(stats) = &result.stats {
        log::debug!(
            "Integration complete: {} accepted, {} rejected, {} evaluations, h in [{:e}, {:e}]",
            stats.accepted_steps,
            stats.rejected_steps,
            stats.evaluations,
            stats.min_step_used,
            stats.max_step_used
        );
    }

    if let Some(time) = first_non_finite(&result) {
        return Err(Error::IntegrationFailure {
            time,
            reason: IntegrationFailureKind::NonFiniteState,
        });
    }
    Ok(result)
}

/// Run independent simulations of several circuits over the same time vector.
///
/// Results come back in input order. With the `parallel` feature the runs are
/// spread over the rayon thread pool.
pub fn simulate_batch(
    circuits: &[Circuit],
    times: &TimeVector,
    options: &SimulationOptions,
) -> Vec<Result<SimulationResult>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        circuits
            .par_iter()
            .map(|circuit| simulate(circuit, times, options))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        circuits
            .iter()
            .map(|circuit| simulate(circuit, times, options))
            .collect()
    }
}

/// Time of the earliest non-finite sample in any quantity.
fn first_non_finite(result: &SimulationResult) -> Option<f64> {
    if result.is_finite() {
        return None;
    }
    result
        .quantities
        .values()
        .filter_map(|values| values.iter().position(|v| !v.is_finite()))
        .min()
        .map(|i| result.time[i])
}
