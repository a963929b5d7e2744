//! Path points and simulation outputs.

use serde::Serialize;
use tp_core::units::{Energy, Pressure, Temperature, Volume, joules, k, m3, pa};

/// One point along a process path (SI: m³, Pa, K).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProcessState {
    pub v_m3: f64,
    pub p_pa: f64,
    pub t_k: f64,
}

impl ProcessState {
    pub fn new(v_m3: f64, p_pa: f64, t_k: f64) -> Self {
        Self { v_m3, p_pa, t_k }
    }

    pub fn volume(&self) -> Volume {
        m3(self.v_m3)
    }

    pub fn pressure(&self) -> Pressure {
        pa(self.p_pa)
    }

    pub fn temperature(&self) -> Temperature {
        k(self.t_k)
    }
}

/// First-law quantities for the whole process, system sign convention:
/// `W` is work done by the gas, `Q` heat added to it, `ΔU = Q − W`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct EnergyBalance {
    pub work_j: f64,
    pub heat_j: f64,
    pub delta_u_j: f64,
    pub delta_h_j: f64,
    pub delta_s_j_per_k: f64,
}

impl EnergyBalance {
    /// `Q − W − ΔU`; zero for every reconciled balance.
    pub fn first_law_residual(&self) -> f64 {
        self.heat_j - self.work_j - self.delta_u_j
    }

    pub fn work(&self) -> Energy {
        joules(self.work_j)
    }

    pub fn heat(&self) -> Energy {
        joules(self.heat_j)
    }

    pub fn internal_energy_change(&self) -> Energy {
        joules(self.delta_u_j)
    }
}

/// Output of one simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    /// Ordered path points; `steps + 1` of them, or the closed 5-point cycle polygon
    pub path: Vec<ProcessState>,
    pub energy: EnergyBalance,
    pub t2_k: f64,
    pub p2_pa: f64,
    pub v2_m3: f64,
    /// Properties came from the real-fluid backend
    pub used_real_fluid: bool,
    /// End-state vapor fraction, when the real fluid finished inside the dome
    pub quality: Option<f64>,
    /// Real-fluid point lookups that failed and were substituted
    pub lookup_failures: usize,
}

impl SimulationResult {
    /// End state built from the reported `V2`, `P2` and `T2`.
    pub fn final_state(&self) -> ProcessState {
        ProcessState::new(self.v2_m3, self.p2_pa, self.t2_k)
    }
}
