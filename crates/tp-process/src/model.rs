//! PathModel trait for pluggable property models.

use crate::result::{EnergyBalance, ProcessState};

/// Position of one discretization step along the path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStep {
    /// Step index, 1..=steps
    pub index: usize,
    /// `index / steps`
    pub frac: f64,
    /// Volume at this step [m³]
    pub v_m3: f64,
}

/// What a model reports once the path is walked.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModelEnd {
    /// ΔU, ΔH and ΔS between the initial and end states; work and heat are left
    /// to the walker and the process law.
    pub balance: EnergyBalance,
    pub quality: Option<f64>,
}

/// A property model the engine can walk a process path through.
///
/// The engine owns the discretization and work integration; a model only maps
/// a step to a state and evaluates end-state property changes. Models may keep
/// per-walk bookkeeping (e.g. failed lookups), hence `&mut self`.
pub trait PathModel {
    /// State at the start of the path.
    fn initial_state(&self) -> ProcessState;

    /// State at `step`, given the previously computed point.
    fn state_at(&mut self, step: &PathStep, prev: &ProcessState) -> ProcessState;

    /// State at a cycle polygon corner with the given volume and pressure.
    fn corner(&mut self, v_m3: f64, p_pa: f64) -> ProcessState;

    /// Property changes between the initial state and `end`.
    fn finish(&mut self, end: &ProcessState) -> ModelEnd;

    /// Adiabatic paths hold entropy exactly rather than through constant γ.
    fn isentropic(&self) -> bool;

    fn uses_real_fluid(&self) -> bool {
        false
    }

    /// Lookups that failed and were substituted so far.
    fn lookup_failures(&self) -> usize {
        0
    }
}
