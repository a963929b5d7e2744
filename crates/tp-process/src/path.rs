//! Path discretization and boundary-work integration.
//!
//! Each walk is a fold over the step sequence: the accumulator carries the
//! points so far and the running trapezoidal work, and each step sees the
//! previous point (the adiabatic solver seeds from its temperature).

use crate::law::ProcessLaw;
use crate::model::{PathModel, PathStep};
use crate::result::ProcessState;
use tp_core::numeric::lerp;

/// Accumulated path.
#[derive(Debug, Clone, PartialEq)]
pub struct Walk {
    pub points: Vec<ProcessState>,
    /// Trapezoidal boundary work [J]
    pub work_j: f64,
    integrate: bool,
}

impl Walk {
    fn start(first: ProcessState, capacity: usize, integrate: bool) -> Self {
        let mut points = Vec::with_capacity(capacity);
        points.push(first);
        Self {
            points,
            work_j: 0.0,
            integrate,
        }
    }

    fn push(mut self, next: ProcessState) -> Self {
        if let Some(prev) = self.points.last() {
            if self.integrate {
                self.work_j += 0.5 * (next.p_pa + prev.p_pa) * (next.v_m3 - prev.v_m3);
            }
        }
        self.points.push(next);
        self
    }

    pub fn last(&self) -> Option<&ProcessState> {
        self.points.last()
    }
}

/// Walk `steps` equal steps from the model's initial state toward `v2_m3`.
///
/// Fixed-volume laws keep every point at V1 and let the model step in
/// temperature by `frac`.
pub fn walk<M: PathModel + ?Sized>(
    model: &mut M,
    law: &ProcessLaw,
    steps: usize,
    v2_m3: f64,
) -> Walk {
    let first = model.initial_state();
    let v1 = first.v_m3;
    let init = Walk::start(first, steps + 1, law.integrates_work);

    (1..=steps).fold(init, |acc, index| {
        let frac = index as f64 / steps as f64;
        let v_m3 = if law.fixed_volume {
            v1
        } else {
            lerp(v1, v2_m3, frac)
        };
        let step = PathStep { index, frac, v_m3 };
        let prev = acc.last().copied().unwrap_or(first);
        let next = model.state_at(&step, &prev);
        acc.push(next)
    })
}

/// Closed rectangular loop between `P1` and `p_low_pa`:
/// (V1,P1) → (V2,P1) → (V2,P_low) → (V1,P_low) → (V1,P1).
pub fn walk_cycle<M: PathModel + ?Sized>(model: &mut M, p_low_pa: f64, v2_m3: f64) -> Walk {
    let first = model.initial_state();
    let (v1, p1) = (first.v_m3, first.p_pa);
    let corners = [(v2_m3, p1), (v2_m3, p_low_pa), (v1, p_low_pa)];

    let open = corners
        .into_iter()
        .fold(Walk::start(first, 5, true), |acc, (v, p)| {
            let next = model.corner(v, p);
            acc.push(next)
        });
    open.push(first)
}
