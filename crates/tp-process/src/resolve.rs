//! Inverse target resolution.
//!
//! Turns a P2 or T2 target into the final volume the path generator walks to,
//! using closed-form ideal-gas process relations. Isochoric processes keep
//! `V2 = V1` and carry the end temperature as an override instead.
//!
//! | Process    | P2 target            | T2 target                 |
//! |------------|----------------------|---------------------------|
//! | isothermal | P1·V1/P2             | -                         |
//! | isobaric   | -                    | V1·T2/T1                  |
//! | adiabatic  | V1·(P1/P2)^(1/γ)     | V1·(T1/T2)^(1/(γ−1))      |
//! | isochoric  | V1, T2 = T1·P2/P1    | V1, T2 given              |
//! | polytropic | V1·(P1/P2)^(1/n)     | V1·(T1/T2)^(1/(n−1))      |
//!
//! Free expansion and the cycle only accept volume targeting.

use crate::request::{ProcessKind, SimulationRequest, TargetMode};
use serde::Serialize;
use tracing::{debug, warn};

/// Exponents closer to zero than this are treated as singular.
const SINGULAR_EXPONENT: f64 = 1e-9;

/// Outcome of target resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedTarget {
    /// Target mode after normalization
    pub mode: TargetMode,
    /// Final volume the path walks to [m³]
    pub v2_m3: f64,
    /// End temperature for isochoric paths [K]
    pub t2_override_k: Option<f64>,
    /// Request's target mode was rewritten to volume targeting
    pub normalized: bool,
}

/// Rewrite target modes that make no sense for `process` to volume targeting.
pub fn normalize_mode(process: ProcessKind, mode: TargetMode) -> TargetMode {
    if process.accepts(mode) {
        mode
    } else {
        TargetMode::Volume
    }
}

fn positive(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite() && *x > 0.0)
}

fn usable_volume(v: f64) -> Option<f64> {
    (v.is_finite() && v > 0.0).then_some(v)
}

/// Resolve `req` into a final volume (and isochoric temperature override).
///
/// `gamma` is the species' constant heat-capacity ratio; real fluids pass
/// `None` and adiabatic targets then fall back to the supplied volume.
/// `polytropic_index` is the effective n for polytropic processes.
pub fn resolve_target(
    req: &SimulationRequest,
    gamma: Option<f64>,
    polytropic_index: f64,
) -> ResolvedTarget {
    let mode = normalize_mode(req.process, req.target_mode);
    let normalized = mode != req.target_mode;
    if normalized {
        warn!(
            process = %req.process,
            requested = %req.target_mode,
            "target mode not applicable to process; using final volume"
        );
    }

    let (p1, v1, t1) = (req.p1_pa, req.v1_m3, req.t1_k);
    let n = polytropic_index;
    let mut t2_override_k = None;

    let estimate = match (req.process, mode) {
        (ProcessKind::Isochoric, _) => {
            t2_override_k = match mode {
                TargetMode::Pressure => positive(req.p2_pa).map(|p2| t1 * (p2 / p1)),
                TargetMode::Temperature => positive(req.t2_k),
                TargetMode::Volume => None,
            };
            Some(v1)
        }
        (_, TargetMode::Volume) => None,
        (process, TargetMode::Pressure) => positive(req.p2_pa).and_then(|p2| match process {
            ProcessKind::Isothermal => Some(p1 * v1 / p2),
            ProcessKind::Adiabatic => gamma.map(|g| v1 * (p1 / p2).powf(1.0 / g)),
            ProcessKind::Polytropic if n.abs() > SINGULAR_EXPONENT => {
                Some(v1 * (p1 / p2).powf(1.0 / n))
            }
            _ => None,
        }),
        (process, TargetMode::Temperature) => positive(req.t2_k).and_then(|t2| match process {
            ProcessKind::Isobaric => Some(v1 * (t2 / t1)),
            ProcessKind::Adiabatic => gamma.map(|g| v1 * (t1 / t2).powf(1.0 / (g - 1.0))),
            ProcessKind::Polytropic if (n - 1.0).abs() > SINGULAR_EXPONENT => {
                Some(v1 * (t1 / t2).powf(1.0 / (n - 1.0)))
            }
            _ => None,
        }),
    };

    let v2_m3 = estimate.and_then(usable_volume).unwrap_or(req.v2_m3);
    let resolved = ResolvedTarget {
        mode,
        v2_m3,
        t2_override_k,
        normalized,
    };
    debug!(
        process = %req.process,
        mode = %resolved.mode,
        v2_m3 = resolved.v2_m3,
        t2_override_k = ?resolved.t2_override_k,
        "target resolved"
    );
    resolved
}
