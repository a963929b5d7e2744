//! Real-fluid path model.
//!
//! States come from a `PropertySource` on a mass basis with density `m/V`.
//! A failed point lookup never aborts the walk: the previous point's pressure
//! (and temperature) is carried forward and the failure is counted.

use crate::model::{ModelEnd, PathModel, PathStep};
use crate::request::{ProcessKind, SimulationRequest, TargetMode};
use crate::resolve::ResolvedTarget;
use crate::result::{EnergyBalance, ProcessState};
use tp_core::numeric::lerp;
use tp_core::units::{kg, m3};
use tp_fluids::{FluidResult, Property, PropertyInput, PropertySource, RealFluid};
use tracing::warn;

/// Specific properties at the initial state.
#[derive(Debug, Clone, Copy, PartialEq)]
struct InitialProps {
    u: f64,
    h: f64,
    s: f64,
}

pub struct RealFluidModel<'a> {
    source: &'a dyn PropertySource,
    code: &'static str,
    kind: ProcessKind,
    mass_kg: f64,
    initial: ProcessState,
    props: InitialProps,
    polytropic_index: f64,
    isochoric_t2_k: f64,
    failures: usize,
}

impl std::fmt::Debug for RealFluidModel<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealFluidModel")
            .field("source", &self.source.name())
            .field("code", &self.code)
            .field("kind", &self.kind)
            .field("mass_kg", &self.mass_kg)
            .field("initial", &self.initial)
            .field("failures", &self.failures)
            .finish()
    }
}

impl<'a> RealFluidModel<'a> {
    /// Look up the initial state.
    ///
    /// Fails when u, h or s cannot be evaluated at (T1, ρ1); the engine then
    /// returns a degenerate result. P1 is re-derived from (T1, ρ1) when the
    /// backend can, otherwise the request's P1 is kept.
    pub fn new(
        source: &'a dyn PropertySource,
        req: &SimulationRequest,
        fluid: RealFluid,
        t2_override_k: Option<f64>,
        polytropic_index: f64,
        isochoric_default_rise_k: f64,
    ) -> FluidResult<Self> {
        let mass_kg = req.mass_kg.unwrap_or(fluid.mass_kg);
        let rho1 = (kg(mass_kg) / m3(req.v1_m3)).value;
        let t1 = PropertyInput::temperature(req.t1_k);
        let d1 = PropertyInput::density(rho1);
        let get = |output| source.lookup(output, t1, d1, fluid.code);

        let props = InitialProps {
            u: get(Property::InternalEnergy)?,
            h: get(Property::Enthalpy)?,
            s: get(Property::Entropy)?,
        };
        let mut failures = 0;
        let p1 = match get(Property::Pressure) {
            Ok(p) => p,
            Err(err) => {
                warn!(fluid = fluid.code, error = %err, "initial pressure lookup failed; using requested P1");
                failures += 1;
                req.p1_pa
            }
        };

        let isochoric_t2_k = t2_override_k
            .or(req.t2_k.filter(|t| t.is_finite() && *t > 0.0))
            .unwrap_or(req.t1_k + isochoric_default_rise_k);

        Ok(Self {
            source,
            code: fluid.code,
            kind: req.process,
            mass_kg,
            initial: ProcessState::new(req.v1_m3, p1, req.t1_k),
            props,
            polytropic_index,
            isochoric_t2_k,
            failures,
        })
    }

    /// Mass density at `v_m3` [kg/m³].
    fn density(&self, v_m3: f64) -> f64 {
        (kg(self.mass_kg) / m3(v_m3)).value
    }

    fn lookup(&self, output: Property, first: PropertyInput, second: PropertyInput) -> FluidResult<f64> {
        self.source.lookup(output, first, second, self.code)
    }

    /// Refine a closed-form final volume where the target needs the fluid's own
    /// surface: T2 on isobaric or adiabatic, P2 on isothermal or adiabatic.
    ///
    /// A failed refinement keeps the estimate.
    pub fn refine_target(&mut self, req: &SimulationRequest, estimate: &ResolvedTarget) -> f64 {
        let p1 = self.initial.p_pa;
        let s1 = PropertyInput::entropy(self.props.s);
        let positive = |v: Option<f64>| v.filter(|x| x.is_finite() && *x > 0.0);

        let pair = match (req.process, estimate.mode) {
            (ProcessKind::Isobaric, TargetMode::Temperature) => positive(req.t2_k)
                .map(|t2| (PropertyInput::temperature(t2), PropertyInput::pressure(p1))),
            (ProcessKind::Adiabatic, TargetMode::Temperature) => {
                positive(req.t2_k).map(|t2| (PropertyInput::temperature(t2), s1))
            }
            (ProcessKind::Isothermal, TargetMode::Pressure) => positive(req.p2_pa).map(|p2| {
                (
                    PropertyInput::temperature(self.initial.t_k),
                    PropertyInput::pressure(p2),
                )
            }),
            (ProcessKind::Adiabatic, TargetMode::Pressure) => {
                positive(req.p2_pa).map(|p2| (PropertyInput::pressure(p2), s1))
            }
            _ => None,
        };
        let Some((first, second)) = pair else {
            return estimate.v2_m3;
        };

        match self.lookup(Property::Density, first, second) {
            Ok(rho2) if rho2.is_finite() && rho2 > 0.0 => self.mass_kg / rho2,
            Ok(rho2) => {
                warn!(fluid = self.code, rho2, "non-physical target density; keeping estimate");
                self.failures += 1;
                estimate.v2_m3
            }
            Err(err) => {
                warn!(fluid = self.code, %first, %second, error = %err, "target refinement failed; keeping estimate");
                self.failures += 1;
                estimate.v2_m3
            }
        }
    }

    fn point(&self, v: f64, frac: f64) -> FluidResult<(f64, f64)> {
        let ProcessState {
            v_m3: v1,
            p_pa: p1,
            t_k: t1,
        } = self.initial;
        let rho = PropertyInput::density(self.density(v));

        match self.kind {
            ProcessKind::Isothermal => {
                let p = self.lookup(Property::Pressure, PropertyInput::temperature(t1), rho)?;
                Ok((p, t1))
            }
            ProcessKind::Isobaric | ProcessKind::Cycle => {
                let t = self.lookup(Property::Temperature, PropertyInput::pressure(p1), rho)?;
                Ok((p1, t))
            }
            ProcessKind::Adiabatic => {
                let s1 = PropertyInput::entropy(self.props.s);
                let p = self.lookup(Property::Pressure, s1, rho)?;
                let t = self.lookup(Property::Temperature, s1, rho)?;
                Ok((p, t))
            }
            ProcessKind::Isochoric => {
                let t = lerp(t1, self.isochoric_t2_k, frac);
                let rho1 = PropertyInput::density(self.density(v1));
                let p = self.lookup(Property::Pressure, PropertyInput::temperature(t), rho1)?;
                Ok((p, t))
            }
            ProcessKind::Polytropic => {
                let p = p1 * (v1 / v).powf(self.polytropic_index);
                let t = self.lookup(Property::Temperature, PropertyInput::pressure(p), rho)?;
                Ok((p, t))
            }
            ProcessKind::FreeExpansion => {
                let u1 = PropertyInput::internal_energy(self.props.u);
                let p = self.lookup(Property::Pressure, u1, rho)?;
                let t = self.lookup(Property::Temperature, u1, rho)?;
                Ok((p, t))
            }
        }
    }
}

impl PathModel for RealFluidModel<'_> {
    fn initial_state(&self) -> ProcessState {
        self.initial
    }

    fn state_at(&mut self, step: &PathStep, prev: &ProcessState) -> ProcessState {
        match self.point(step.v_m3, step.frac) {
            Ok((p, t)) => ProcessState::new(step.v_m3, p, t),
            Err(err) => {
                warn!(
                    fluid = self.code,
                    step = step.index,
                    process = %self.kind,
                    error = %err,
                    "property lookup failed; carrying previous state"
                );
                self.failures += 1;
                ProcessState::new(step.v_m3, prev.p_pa, prev.t_k)
            }
        }
    }

    fn corner(&mut self, v_m3: f64, p_pa: f64) -> ProcessState {
        let rho = PropertyInput::density(self.density(v_m3));
        match self.lookup(Property::Temperature, PropertyInput::pressure(p_pa), rho) {
            Ok(t) => ProcessState::new(v_m3, p_pa, t),
            Err(err) => {
                warn!(fluid = self.code, v_m3, p_pa, error = %err, "cycle corner lookup failed");
                self.failures += 1;
                ProcessState::new(v_m3, p_pa, self.initial.t_k)
            }
        }
    }

    fn finish(&mut self, end: &ProcessState) -> ModelEnd {
        let t2 = PropertyInput::temperature(end.t_k);
        let d2 = PropertyInput::density(self.density(end.v_m3));
        let InitialProps { u, h, s } = self.props;

        let mut end_value = |output: Property, fallback: f64| match self.lookup(output, t2, d2) {
            Ok(value) => value,
            Err(err) => {
                warn!(fluid = self.code, property = %output, error = %err, "end-state lookup failed");
                self.failures += 1;
                fallback
            }
        };
        let u2 = end_value(Property::InternalEnergy, u);
        let h2 = end_value(Property::Enthalpy, h);
        let s2 = end_value(Property::Entropy, s);

        // Single-phase states report no quality; absence is not a failure.
        let quality = self
            .lookup(Property::Quality, t2, d2)
            .ok()
            .filter(|x| (0.0..=1.0).contains(x));

        let m = self.mass_kg;
        ModelEnd {
            balance: EnergyBalance {
                delta_u_j: m * (u2 - u),
                delta_h_j: m * (h2 - h),
                delta_s_j_per_k: m * (s2 - s),
                ..Default::default()
            },
            quality,
        }
    }

    fn isentropic(&self) -> bool {
        true
    }

    fn uses_real_fluid(&self) -> bool {
        true
    }

    fn lookup_failures(&self) -> usize {
        self.failures
    }
}
