//! Isentropic temperature solver for the precise adiabatic path.
//!
//! Finds `T` such that `s(T, n·R·T/V) = s_target` at fixed volume and mole
//! count, using a Newton correction linearized on `ds/dT ≈ cp/T`. The iteration
//! count is capped; when the cap is hit the last iterate is returned as the
//! best estimate rather than an error.

use serde::{Deserialize, Serialize};
use tp_core::constants::R;
use tp_core::units::{k, pa};
use tp_fluids::ShomateCoeffs;
use tracing::debug;

/// Solver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdiabaticSolverConfig {
    /// Maximum Newton iterations
    pub max_iterations: usize,
    /// Absolute tolerance on molar entropy [J/(mol·K)]
    pub tolerance: f64,
}

impl Default for AdiabaticSolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 15,
            tolerance: 0.01,
        }
    }
}

/// Solver outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdiabaticSolution {
    /// Temperature estimate [K]
    pub t_k: f64,
    /// Entropy residual at `t_k` [J/(mol·K)]
    pub residual: f64,
    /// Newton corrections applied
    pub iterations: usize,
    /// Residual met tolerance
    pub converged: bool,
}

/// Molar entropy at `t_k` along the isochore `v_m3` holding `n_mol`.
fn entropy_at_volume(coeffs: &ShomateCoeffs, t_k: f64, v_m3: f64, n_mol: f64) -> f64 {
    let p = n_mol * R * t_k / v_m3;
    coeffs.entropy(k(t_k), pa(p))
}

/// A Newton step may at most halve or double the temperature.
fn step_accepted(t_k: f64, next_k: f64) -> bool {
    next_k.is_finite() && next_k > 0.5 * t_k && next_k < 2.0 * t_k
}

/// Solve for the temperature at volume `v_m3` whose entropy equals `s_target`.
///
/// `t_guess_k` seeds the iteration; along a path this is the previous step's
/// converged temperature. Where the correlation stops being usable (cp ≤ 0, or
/// a step that would leave `(T/2, 2T)`) the iteration ends early and the last
/// iterate is returned unconverged, so the estimate always stays a finite,
/// positive temperature.
pub fn solve_adiabatic_temperature(
    coeffs: &ShomateCoeffs,
    s_target: f64,
    v_m3: f64,
    n_mol: f64,
    t_guess_k: f64,
    config: &AdiabaticSolverConfig,
) -> AdiabaticSolution {
    let mut t = t_guess_k;
    let mut residual = entropy_at_volume(coeffs, t, v_m3, n_mol) - s_target;

    for iter in 0..config.max_iterations {
        if residual.abs() < config.tolerance {
            return AdiabaticSolution {
                t_k: t,
                residual,
                iterations: iter,
                converged: true,
            };
        }
        let cp = coeffs.cp(k(t));
        let next = t - residual * t / cp;
        if !(cp > 0.0 && residual.is_finite() && step_accepted(t, next)) {
            debug!(
                iterations = iter,
                t_k = t,
                cp,
                residual,
                "adiabatic solver stopped outside the correlation's usable range"
            );
            return AdiabaticSolution {
                t_k: t,
                residual,
                iterations: iter,
                converged: false,
            };
        }
        t = next;
        residual = entropy_at_volume(coeffs, t, v_m3, n_mol) - s_target;
    }

    let converged = residual.abs() < config.tolerance;
    if !converged {
        debug!(
            iterations = config.max_iterations,
            residual, t_k = t, "adiabatic solver hit iteration cap"
        );
    }
    AdiabaticSolution {
        t_k: t,
        residual,
        iterations: config.max_iterations,
        converged,
    }
}
