//! Per-process rules shared by every property model.
//!
//! The path models decide how (V, P, T) evolve; this table decides how the path
//! is walked and how the end-state balance is reconciled with the First Law.

use crate::request::ProcessKind;
use crate::result::EnergyBalance;

/// Walking and bookkeeping rules for one process kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessLaw {
    pub kind: ProcessKind,
    /// Boundary work is integrated along the path (trapezoidal rule).
    pub integrates_work: bool,
    /// Path steps in temperature at fixed volume instead of in volume.
    pub fixed_volume: bool,
}

/// End-state facts the reconciliation needs besides the raw balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndContext {
    pub p1_pa: f64,
    pub v1_m3: f64,
    pub v2_m3: f64,
    /// The path held entropy exactly (precise or real-fluid adiabatic).
    pub isentropic_path: bool,
}

const fn law(kind: ProcessKind, integrates_work: bool, fixed_volume: bool) -> ProcessLaw {
    ProcessLaw {
        kind,
        integrates_work,
        fixed_volume,
    }
}

const LAWS: [ProcessLaw; 7] = [
    law(ProcessKind::Isothermal, true, false),
    law(ProcessKind::Isobaric, true, false),
    law(ProcessKind::Adiabatic, true, false),
    law(ProcessKind::Isochoric, false, true),
    law(ProcessKind::Polytropic, true, false),
    law(ProcessKind::FreeExpansion, false, false),
    law(ProcessKind::Cycle, true, false),
];

impl ProcessKind {
    pub fn law(self) -> &'static ProcessLaw {
        match self {
            ProcessKind::Isothermal => &LAWS[0],
            ProcessKind::Isobaric => &LAWS[1],
            ProcessKind::Adiabatic => &LAWS[2],
            ProcessKind::Isochoric => &LAWS[3],
            ProcessKind::Polytropic => &LAWS[4],
            ProcessKind::FreeExpansion => &LAWS[5],
            ProcessKind::Cycle => &LAWS[6],
        }
    }
}

impl ProcessLaw {
    /// Apply the process identities to a raw balance.
    ///
    /// `raw` carries the integrated work and the model's ΔU, ΔH, ΔS; `Q` is
    /// always derived here so that `Q − W − ΔU = 0` holds exactly.
    pub fn reconcile(&self, raw: EnergyBalance, end: &EndContext) -> EnergyBalance {
        let mut b = raw;
        if !self.integrates_work {
            b.work_j = 0.0;
        }
        match self.kind {
            ProcessKind::Isothermal => {
                b.delta_u_j = 0.0;
                b.heat_j = b.work_j;
            }
            ProcessKind::Isobaric => {
                // Exact boundary work; ΔU absorbs what the integration got wrong.
                b.work_j = end.p1_pa * (end.v2_m3 - end.v1_m3);
                b.heat_j = b.delta_h_j;
                b.delta_u_j = b.heat_j - b.work_j;
            }
            ProcessKind::Adiabatic => {
                b.heat_j = 0.0;
                b.work_j = -b.delta_u_j;
                if end.isentropic_path {
                    b.delta_s_j_per_k = 0.0;
                }
            }
            ProcessKind::Isochoric => {
                b.heat_j = b.delta_u_j;
            }
            ProcessKind::Polytropic | ProcessKind::FreeExpansion => {
                b.heat_j = b.delta_u_j + b.work_j;
            }
            ProcessKind::Cycle => {
                b.delta_u_j = 0.0;
                b.delta_h_j = 0.0;
                b.delta_s_j_per_k = 0.0;
                b.heat_j = b.work_j;
            }
        }
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn end() -> EndContext {
        EndContext {
            p1_pa: 100_000.0,
            v1_m3: 0.05,
            v2_m3: 0.10,
            isentropic_path: true,
        }
    }

    fn raw() -> EnergyBalance {
        EnergyBalance {
            work_j: 1234.0,
            heat_j: 0.0,
            delta_u_j: -800.0,
            delta_h_j: -1100.0,
            delta_s_j_per_k: 0.3,
        }
    }

    #[test]
    fn table_is_indexed_by_kind() {
        for kind in ProcessKind::ALL {
            assert_eq!(kind.law().kind, kind);
        }
        assert!(ProcessKind::Isochoric.law().fixed_volume);
        assert!(!ProcessKind::FreeExpansion.law().integrates_work);
    }

    #[test]
    fn every_rule_closes_the_first_law() {
        for kind in ProcessKind::ALL {
            let b = kind.law().reconcile(raw(), &end());
            assert!(b.first_law_residual().abs() < 1e-9, "{kind}: {b:?}");
        }
    }

    #[test]
    fn isobaric_uses_exact_work() {
        let b = ProcessKind::Isobaric.law().reconcile(raw(), &end());
        assert_eq!(b.work_j, 5000.0);
        assert_eq!(b.heat_j, -1100.0);
        assert_eq!(b.delta_u_j, -6100.0);
    }

    #[test]
    fn adiabatic_entropy_zeroed_only_for_isentropic_paths() {
        let b = ProcessKind::Adiabatic.law().reconcile(raw(), &end());
        assert_eq!(b.heat_j, 0.0);
        assert_eq!(b.work_j, 800.0);
        assert_eq!(b.delta_s_j_per_k, 0.0);

        let ideal = EndContext {
            isentropic_path: false,
            ..end()
        };
        let b = ProcessKind::Adiabatic.law().reconcile(raw(), &ideal);
        assert_eq!(b.delta_s_j_per_k, 0.3);
    }

    #[test]
    fn no_work_for_isochoric_or_free_expansion() {
        for kind in [ProcessKind::Isochoric, ProcessKind::FreeExpansion] {
            let b = kind.law().reconcile(raw(), &end());
            assert_eq!(b.work_j, 0.0);
            assert_eq!(b.heat_j, b.delta_u_j);
        }
    }
}
