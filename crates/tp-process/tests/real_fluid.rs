//! Integration test: real-fluid adapter against in-test property sources.
//!
//! `IdealMassSource` is an ideal gas on a mass basis (R_s = 287, cv = 718), so
//! every expected value has a closed form.

use tp_core::numeric::{Tolerances, nearly_equal};
use tp_fluids::{FluidError, FluidResult, Property, PropertyInput, PropertySource};
use tp_process::{Engine, ProcessKind, SimulationRequest, SimulationResult};

const R_S: f64 = 287.0;
const CV: f64 = 718.0;
const T1: f64 = 300.0;
const V1: f64 = 0.05;
const MASS: f64 = 1.0;

/// Density at V1 for a 1 kg charge, and the pressure the fluid reports there.
const RHO1: f64 = MASS / V1;
const P1: f64 = RHO1 * R_S * T1;

#[derive(Debug, Default)]
struct IdealMassSource {
    quality: Option<f64>,
    /// Pressure lookups fail inside this density band
    fail_band: Option<(f64, f64)>,
}

impl IdealMassSource {
    fn state(first: PropertyInput, second: PropertyInput) -> FluidResult<(f64, f64)> {
        use Property::*;
        let (a, b) = (first.value, second.value);
        match (first.property, second.property) {
            (Temperature, Density) => Ok((a, b)),
            (Pressure, Density) => Ok((a / (b * R_S), b)),
            (Entropy, Density) => Ok((((a + R_S * b.ln()) / CV).exp(), b)),
            (InternalEnergy, Density) => Ok((a / CV, b)),
            (Temperature, Pressure) => Ok((a, b / (R_S * a))),
            (Temperature, Entropy) => Ok((a, ((CV * a.ln() - b) / R_S).exp())),
            (Pressure, Entropy) => {
                let t = ((b + R_S * (a / R_S).ln()) / (CV + R_S)).exp();
                Ok((t, a / (R_S * t)))
            }
            _ => Err(FluidError::NotSupported {
                what: "input pair",
            }),
        }
    }
}

impl PropertySource for IdealMassSource {
    fn name(&self) -> &str {
        "ideal-mass"
    }

    fn lookup(
        &self,
        output: Property,
        first: PropertyInput,
        second: PropertyInput,
        _fluid: &str,
    ) -> FluidResult<f64> {
        let (t, rho) = Self::state(first, second)?;
        if let (Property::Pressure, Some((lo, hi))) = (output, self.fail_band) {
            if rho > lo && rho < hi {
                return Err(FluidError::Backend {
                    message: "out of range".into(),
                });
            }
        }
        match output {
            Property::Temperature => Ok(t),
            Property::Pressure => Ok(rho * R_S * t),
            Property::Density => Ok(rho),
            Property::InternalEnergy => Ok(CV * t),
            Property::Enthalpy => Ok((CV + R_S) * t),
            Property::Entropy => Ok(CV * t.ln() - R_S * rho.ln()),
            Property::Quality => self.quality.ok_or(FluidError::NotSupported {
                what: "quality outside the two-phase region",
            }),
        }
    }
}

struct FailingSource;

impl PropertySource for FailingSource {
    fn name(&self) -> &str {
        "failing"
    }

    fn lookup(&self, _: Property, _: PropertyInput, _: PropertyInput, _: &str) -> FluidResult<f64> {
        Err(FluidError::Backend {
            message: "backend not initialized".into(),
        })
    }
}

fn engine(source: IdealMassSource) -> Engine {
    Engine::default().with_source(Box::new(source))
}

fn request(process: ProcessKind, v2: f64) -> SimulationRequest {
    // P1 here is deliberately off; the adapter re-derives it from (T1, ρ1).
    SimulationRequest::new("r22", process, T1, 123_456.0, V1, v2).with_mass(MASS)
}

fn run(process: ProcessKind, v2: f64) -> SimulationResult {
    engine(IdealMassSource::default())
        .simulate(&request(process, v2))
        .unwrap()
}

fn assert_first_law(result: &SimulationResult) {
    let e = &result.energy;
    let scale = e.heat_j.abs().max(e.work_j.abs()).max(e.delta_u_j.abs()).max(1.0);
    assert!(e.first_law_residual().abs() <= 1e-9 * scale, "{e:?}");
}

fn close(a: f64, b: f64, rel: f64) -> bool {
    nearly_equal(a, b, Tolerances::relative(rel))
}

#[test]
fn initial_pressure_comes_from_the_fluid() {
    let result = run(ProcessKind::Isothermal, 0.10);
    assert!(result.used_real_fluid);
    assert!(close(result.path[0].p_pa, P1, 1e-12));
    assert_eq!(result.lookup_failures, 0);
}

#[test]
fn isothermal_work() {
    let result = run(ProcessKind::Isothermal, 0.10);
    let expected = MASS * R_S * T1 * 2.0_f64.ln();

    assert_eq!(result.path.len(), 101);
    assert!(close(result.energy.work_j, expected, 1e-3));
    assert_eq!(result.energy.delta_u_j, 0.0);
    assert!(close(result.p2_pa, P1 / 2.0, 1e-9));
    assert_first_law(&result);
}

#[test]
fn isobaric_temperature_target_is_refined() {
    let req = request(ProcessKind::Isobaric, 0.07).with_temperature_target(600.0);
    let engine = engine(IdealMassSource::default());

    let resolved = engine.resolve(&req).unwrap();
    assert!(close(resolved.v2_m3, 0.10, 1e-9));

    let result = engine.simulate(&req).unwrap();
    assert!(close(result.t2_k, 600.0, 1e-9));
    assert!(close(result.energy.work_j, P1 * 0.05, 1e-9));
    assert!(close(result.energy.heat_j, MASS * (CV + R_S) * 300.0, 1e-6));
    assert_first_law(&result);
}

#[test]
fn adiabatic_expansion_holds_entropy() {
    let result = run(ProcessKind::Adiabatic, 0.10);
    let t2 = T1 * 0.5_f64.powf(R_S / CV);

    assert!(close(result.t2_k, t2, 1e-9));
    assert_eq!(result.energy.heat_j, 0.0);
    assert_eq!(result.energy.delta_s_j_per_k, 0.0);
    assert!(close(result.energy.work_j, MASS * CV * (T1 - t2), 1e-6));
    assert_first_law(&result);
}

#[test]
fn adiabatic_pressure_target_is_refined() {
    let req = request(ProcessKind::Adiabatic, 0.07).with_pressure_target(P1 / 2.0);
    let resolved = engine(IdealMassSource::default()).resolve(&req).unwrap();
    let gamma = (CV + R_S) / CV;
    assert!(close(resolved.v2_m3, V1 * 2.0_f64.powf(1.0 / gamma), 1e-9));
}

#[test]
fn isochoric_default_rise() {
    let result = run(ProcessKind::Isochoric, 0.10);

    assert_eq!(result.v2_m3, V1);
    assert_eq!(result.t2_k, T1 + 10.0);
    assert!(close(result.p2_pa, RHO1 * R_S * (T1 + 10.0), 1e-12));
    assert_eq!(result.energy.work_j, 0.0);
    assert!(close(result.energy.heat_j, MASS * CV * 10.0, 1e-9));
}

#[test]
fn free_expansion_keeps_internal_energy() {
    let result = run(ProcessKind::FreeExpansion, 0.10);

    assert!(close(result.t2_k, T1, 1e-12));
    assert_eq!(result.energy.work_j, 0.0);
    assert!(result.energy.delta_u_j.abs() < 1e-6);
    assert!(close(result.energy.delta_s_j_per_k, MASS * R_S * 2.0_f64.ln(), 1e-9));
    assert_first_law(&result);
}

#[test]
fn polytropic_and_cycle_close_the_first_law() {
    for process in [ProcessKind::Polytropic, ProcessKind::Cycle] {
        let result = run(process, 0.10);
        assert_first_law(&result);
        assert_eq!(result.lookup_failures, 0, "{process}");
    }
    let cycle = run(ProcessKind::Cycle, 0.10);
    assert_eq!(cycle.path.len(), 5);
    assert!(close(cycle.energy.work_j, 0.4 * P1 * 0.05, 1e-9));
}

#[test]
fn mass_override_scales_extensive_results() {
    let engine = engine(IdealMassSource::default());
    let one = engine.simulate(&request(ProcessKind::Isothermal, 0.10)).unwrap();
    let two = engine
        .simulate(&request(ProcessKind::Isothermal, 0.10).with_mass(2.0))
        .unwrap();
    assert!(close(two.energy.work_j, 2.0 * one.energy.work_j, 1e-9));
}

#[test]
fn quality_reported_only_inside_the_dome() {
    let wet = engine(IdealMassSource {
        quality: Some(0.35),
        ..Default::default()
    })
    .simulate(&request(ProcessKind::Isobaric, 0.10))
    .unwrap();
    assert_eq!(wet.quality, Some(0.35));

    let superheated = engine(IdealMassSource {
        quality: Some(-1.0),
        ..Default::default()
    })
    .simulate(&request(ProcessKind::Isobaric, 0.10))
    .unwrap();
    assert_eq!(superheated.quality, None);
    assert_eq!(superheated.lookup_failures, 0);
}

#[test]
fn single_point_failure_carries_previous_pressure() {
    // Step 50 sits at V = 0.075 m³.
    let band = (MASS / 0.0752, MASS / 0.0748);
    let result = engine(IdealMassSource {
        fail_band: Some(band),
        ..Default::default()
    })
    .simulate(&request(ProcessKind::Isothermal, 0.10))
    .unwrap();

    assert_eq!(result.lookup_failures, 1);
    assert_eq!(result.path.len(), 101);
    assert_eq!(result.path[50].p_pa, result.path[49].p_pa);
    assert!(close(result.p2_pa, P1 / 2.0, 1e-9));
    assert_first_law(&result);
}

#[test]
fn initial_failure_returns_flat_path() {
    let engine = Engine::default().with_source(Box::new(FailingSource));
    let req = request(ProcessKind::Adiabatic, 0.10);
    let result = engine.simulate(&req).unwrap();

    assert!(result.used_real_fluid);
    assert_eq!(result.path.len(), 2);
    assert_eq!(result.path[0].p_pa, result.path[1].p_pa);
    assert_eq!(result.v2_m3, 0.10);
    assert_eq!(result.t2_k, T1);
    assert_eq!(result.energy.work_j, 0.0);
    assert_eq!(result.energy.heat_j, 0.0);
    assert!(result.lookup_failures >= 1);
}
