//! Ideal-gas path model.
//!
//! Pressure always follows `P = n·R·T/V`. In ideal mode heat capacities come
//! from the constant γ; in precise mode from the species correlation, with the
//! adiabatic path solved for constant entropy point by point.

use crate::adiabatic::{AdiabaticSolverConfig, solve_adiabatic_temperature};
use crate::model::{ModelEnd, PathModel, PathStep};
use crate::request::{ProcessKind, SimulationRequest};
use crate::result::{EnergyBalance, ProcessState};
use tp_core::constants::R;
use tp_core::numeric::lerp;
use tp_core::units::{k, pa};
use tp_fluids::IdealGas;

#[derive(Debug, Clone)]
pub struct IdealGasModel {
    kind: ProcessKind,
    gas: IdealGas,
    precise: bool,
    initial: ProcessState,
    n_mol: f64,
    /// Molar entropy at the initial state
    s1: f64,
    polytropic_index: f64,
    /// End temperature for the isochoric temperature sweep
    isochoric_t2_k: f64,
    solver: AdiabaticSolverConfig,
    /// The latest adiabatic point met the solver tolerance
    on_isentrope: bool,
}

impl IdealGasModel {
    pub fn new(
        req: &SimulationRequest,
        gas: IdealGas,
        t2_override_k: Option<f64>,
        polytropic_index: f64,
        solver: AdiabaticSolverConfig,
    ) -> Self {
        let initial = ProcessState::new(req.v1_m3, req.p1_pa, req.t1_k);
        let n_mol = req.p1_pa * req.v1_m3 / (R * req.t1_k);
        let s1 = gas.coeffs.entropy(k(req.t1_k), pa(req.p1_pa));
        Self {
            kind: req.process,
            gas,
            precise: req.precise,
            initial,
            n_mol,
            s1,
            polytropic_index,
            isochoric_t2_k: t2_override_k.unwrap_or(req.t1_k),
            solver,
            on_isentrope: true,
        }
    }

    /// Moles held, `n = P1·V1/(R·T1)`.
    pub fn moles(&self) -> f64 {
        self.n_mol
    }

    fn at(&self, v_m3: f64, t_k: f64) -> ProcessState {
        ProcessState::new(v_m3, self.n_mol * R * t_k / v_m3, t_k)
    }

    fn from_pressure(&self, v_m3: f64, p_pa: f64) -> ProcessState {
        ProcessState::new(v_m3, p_pa, p_pa * v_m3 / (self.n_mol * R))
    }
}

impl PathModel for IdealGasModel {
    fn initial_state(&self) -> ProcessState {
        self.initial
    }

    fn state_at(&mut self, step: &PathStep, prev: &ProcessState) -> ProcessState {
        let ProcessState {
            v_m3: v1,
            p_pa: p1,
            t_k: t1,
        } = self.initial;
        let v = step.v_m3;

        match self.kind {
            ProcessKind::Isothermal | ProcessKind::FreeExpansion => self.at(v, t1),
            ProcessKind::Isobaric | ProcessKind::Cycle => self.from_pressure(v, p1),
            ProcessKind::Isochoric => self.at(v1, lerp(t1, self.isochoric_t2_k, step.frac)),
            ProcessKind::Adiabatic if self.precise => {
                let solution = solve_adiabatic_temperature(
                    &self.gas.coeffs,
                    self.s1,
                    v,
                    self.n_mol,
                    prev.t_k,
                    &self.solver,
                );
                self.on_isentrope = solution.converged;
                self.at(v, solution.t_k)
            }
            ProcessKind::Adiabatic => self.at(v, t1 * (v1 / v).powf(self.gas.gamma - 1.0)),
            ProcessKind::Polytropic => {
                self.from_pressure(v, p1 * (v1 / v).powf(self.polytropic_index))
            }
        }
    }

    fn corner(&mut self, v_m3: f64, p_pa: f64) -> ProcessState {
        self.from_pressure(v_m3, p_pa)
    }

    fn finish(&mut self, end: &ProcessState) -> ModelEnd {
        let n = self.n_mol;
        let (t1, t2) = (self.initial.t_k, end.t_k);
        let (delta_u_j, delta_h_j) = if self.precise {
            let start = self.gas.coeffs.eval(k(t1));
            let stop = self.gas.coeffs.eval(k(t2));
            (n * (stop.u - start.u), n * (stop.h - start.h))
        } else {
            (
                n * self.gas.cv_molar() * (t2 - t1),
                n * self.gas.cp_molar() * (t2 - t1),
            )
        };
        let s2 = self.gas.coeffs.entropy(k(t2), pa(end.p_pa));

        ModelEnd {
            balance: EnergyBalance {
                delta_u_j,
                delta_h_j,
                delta_s_j_per_k: n * (s2 - self.s1),
                ..Default::default()
            },
            quality: None,
        }
    }

    /// Precise paths hold entropy only while the end point is on the isentrope;
    /// otherwise the evaluated ΔS is reported.
    fn isentropic(&self) -> bool {
        self.precise && self.on_isentrope
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tp_fluids::{SpeciesKind, lookup_species};

    fn nitrogen() -> IdealGas {
        match lookup_species("n2").map(|d| d.kind) {
            Ok(SpeciesKind::Ideal(gas)) => gas,
            other => panic!("n2 should be ideal, got {other:?}"),
        }
    }

    fn model(process: ProcessKind, precise: bool) -> IdealGasModel {
        let req = SimulationRequest::new("n2", process, 300.0, 100_000.0, 0.05, 0.10)
            .with_precise(precise);
        IdealGasModel::new(&req, nitrogen(), None, 1.3, AdiabaticSolverConfig::default())
    }

    fn step(v_m3: f64, frac: f64) -> PathStep {
        PathStep {
            index: 1,
            frac,
            v_m3,
        }
    }

    #[test]
    fn mole_count_from_initial_state() {
        let m = model(ProcessKind::Isothermal, false);
        assert!((m.moles() - 2.00465).abs() < 1e-4);
    }

    #[test]
    fn isothermal_halves_pressure_at_double_volume() {
        let mut m = model(ProcessKind::Isothermal, false);
        let start = m.initial_state();
        let s = m.state_at(&step(0.10, 1.0), &start);
        assert!((s.p_pa - 50_000.0).abs() < 1e-6);
        assert_eq!(s.t_k, 300.0);
    }

    #[test]
    fn ideal_adiabatic_temperature() {
        let mut m = model(ProcessKind::Adiabatic, false);
        let start = m.initial_state();
        let s = m.state_at(&step(0.10, 1.0), &start);
        assert!((s.t_k - 300.0 * 0.5_f64.powf(0.4)).abs() < 1e-9);
    }

    #[test]
    fn isochoric_defaults_to_constant_temperature() {
        let mut m = model(ProcessKind::Isochoric, true);
        let start = m.initial_state();
        let s = m.state_at(&step(0.05, 0.5), &start);
        assert_eq!(s.t_k, 300.0);
        assert!((s.p_pa - 100_000.0).abs() < 1e-6);
    }

    #[test]
    fn ideal_mode_energies_use_gamma() {
        let mut m = model(ProcessKind::Isobaric, false);
        let end = ProcessState::new(0.10, 100_000.0, 600.0);
        let out = m.finish(&end).balance;
        let n = m.moles();
        assert!((out.delta_u_j - n * R / 0.4 * 300.0).abs() < 1e-6);
        assert!((out.delta_h_j - n * 1.4 * R / 0.4 * 300.0).abs() < 1e-6);
    }
}
