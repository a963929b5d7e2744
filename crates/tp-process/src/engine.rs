//! Process engine: one entry point for every species kind and process.

use crate::adiabatic::AdiabaticSolverConfig;
use crate::error::{ProcessError, ProcessResult};
use crate::ideal::IdealGasModel;
use crate::law::EndContext;
use crate::model::{ModelEnd, PathModel};
use crate::path::{walk, walk_cycle};
use crate::real::RealFluidModel;
use crate::request::{ProcessKind, SimulationRequest};
use crate::resolve::{ResolvedTarget, resolve_target};
use crate::result::{EnergyBalance, ProcessState, SimulationResult};
use serde::{Deserialize, Serialize};
use tp_fluids::{PropertySource, SpeciesKind, default_source, lookup_species};
use tracing::{debug, warn};

/// Engine tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Equal path steps between the initial and final state
    pub steps: usize,
    pub solver: AdiabaticSolverConfig,
    /// Lower cycle isobar as a fraction of P1
    pub cycle_low_pressure_ratio: f64,
    /// Polytropic index when the request leaves it out
    pub default_polytropic_index: f64,
    /// Real-fluid isochoric temperature rise when no target is given [K]
    pub isochoric_default_rise_k: f64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            steps: 100,
            solver: AdiabaticSolverConfig::default(),
            cycle_low_pressure_ratio: 0.6,
            default_polytropic_index: 1.3,
            isochoric_default_rise_k: 10.0,
        }
    }
}

impl EngineOptions {
    fn validate(&self) -> ProcessResult<()> {
        if self.steps == 0 {
            return Err(ProcessError::InvalidRequest {
                what: "steps must be at least 1",
            });
        }
        if !(self.cycle_low_pressure_ratio > 0.0 && self.cycle_low_pressure_ratio < 1.0) {
            return Err(ProcessError::InvalidRequest {
                what: "cycle low-pressure ratio must lie in (0, 1)",
            });
        }
        if !self.default_polytropic_index.is_finite() {
            return Err(ProcessError::InvalidRequest {
                what: "default polytropic index must be finite",
            });
        }
        Ok(())
    }
}

/// Simulation engine.
///
/// Stateless between calls: every `simulate` is a pure function of the request,
/// the options and the property source.
pub struct Engine {
    options: EngineOptions,
    source: Box<dyn PropertySource>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("options", &self.options)
            .field("source", &self.source.name())
            .finish()
    }
}

impl Engine {
    /// Engine backed by the best property source this build provides.
    pub fn new(options: EngineOptions) -> Self {
        Self {
            options,
            source: default_source(),
        }
    }

    pub fn with_source(mut self, source: Box<dyn PropertySource>) -> Self {
        self.source = source;
        self
    }

    fn polytropic_index(&self, req: &SimulationRequest) -> f64 {
        req.polytropic_index
            .unwrap_or(self.options.default_polytropic_index)
    }

    /// Resolve the request's target into the final volume the path walks to.
    ///
    /// Real fluids get the lookup-refined volume when the backend can provide it.
    pub fn resolve(&self, req: &SimulationRequest) -> ProcessResult<ResolvedTarget> {
        let species = lookup_species(&req.species)?;
        req.validate()?;
        let n = self.polytropic_index(req);

        match species.kind {
            SpeciesKind::Ideal(gas) => Ok(resolve_target(req, Some(gas.gamma), n)),
            SpeciesKind::Real(fluid) => {
                let estimate = resolve_target(req, None, n);
                let refined = RealFluidModel::new(
                    self.source.as_ref(),
                    req,
                    fluid,
                    estimate.t2_override_k,
                    n,
                    self.options.isochoric_default_rise_k,
                )
                .map(|mut model| model.refine_target(req, &estimate));
                Ok(ResolvedTarget {
                    v2_m3: refined.unwrap_or(estimate.v2_m3),
                    ..estimate
                })
            }
        }
    }

    /// Run one simulation.
    ///
    /// Fails only for unknown species and malformed requests.
    pub fn simulate(&self, req: &SimulationRequest) -> ProcessResult<SimulationResult> {
        let species = lookup_species(&req.species)?;
        req.validate()?;
        self.options.validate()?;
        let n = self.polytropic_index(req);

        debug!(
            species = species.key,
            process = %req.process,
            kind = species.kind.tag(),
            precise = req.precise,
            steps = self.options.steps,
            "simulation start"
        );

        match species.kind {
            SpeciesKind::Ideal(gas) => {
                let target = resolve_target(req, Some(gas.gamma), n);
                let mut model =
                    IdealGasModel::new(req, gas, target.t2_override_k, n, self.options.solver);
                Ok(self.run(&mut model, req.process, target.v2_m3))
            }
            SpeciesKind::Real(fluid) => {
                let estimate = resolve_target(req, None, n);
                match RealFluidModel::new(
                    self.source.as_ref(),
                    req,
                    fluid,
                    estimate.t2_override_k,
                    n,
                    self.options.isochoric_default_rise_k,
                ) {
                    Ok(mut model) => {
                        let v2_m3 = model.refine_target(req, &estimate);
                        Ok(self.run(&mut model, req.process, v2_m3))
                    }
                    Err(err) => {
                        warn!(
                            fluid = fluid.code,
                            source = self.source.name(),
                            error = %err,
                            "initial state lookup failed; returning flat path"
                        );
                        Ok(degenerate(req, estimate.v2_m3))
                    }
                }
            }
        }
    }

    fn run<M: PathModel + ?Sized>(
        &self,
        model: &mut M,
        kind: ProcessKind,
        v2_m3: f64,
    ) -> SimulationResult {
        let law = kind.law();
        let initial = model.initial_state();

        let (walked, end, model_end) = if kind == ProcessKind::Cycle {
            let p_low = initial.p_pa * self.options.cycle_low_pressure_ratio;
            (walk_cycle(model, p_low, v2_m3), initial, ModelEnd::default())
        } else {
            let walked = walk(model, law, self.options.steps, v2_m3);
            let end = walked.last().copied().unwrap_or(initial);
            let model_end = model.finish(&end);
            (walked, end, model_end)
        };

        let raw = EnergyBalance {
            work_j: walked.work_j,
            ..model_end.balance
        };
        let context = EndContext {
            p1_pa: initial.p_pa,
            v1_m3: initial.v_m3,
            v2_m3: end.v_m3,
            isentropic_path: model.isentropic(),
        };

        SimulationResult {
            path: walked.points,
            energy: law.reconcile(raw, &context),
            t2_k: end.t_k,
            p2_pa: end.p_pa,
            v2_m3: end.v_m3,
            used_real_fluid: model.uses_real_fluid(),
            quality: model_end.quality,
            lookup_failures: model.lookup_failures(),
        }
    }
}

/// Flat two-point result for a real fluid whose initial state could not be
/// evaluated.
fn degenerate(req: &SimulationRequest, v2_m3: f64) -> SimulationResult {
    let start = ProcessState::new(req.v1_m3, req.p1_pa, req.t1_k);
    let stop = ProcessState::new(v2_m3, req.p1_pa, req.t1_k);
    SimulationResult {
        path: vec![start, stop],
        energy: EnergyBalance::default(),
        t2_k: req.t1_k,
        p2_pa: req.p1_pa,
        v2_m3,
        used_real_fluid: true,
        quality: None,
        lookup_failures: 1,
    }
}

/// Simulate with default options and the default property source.
pub fn simulate(req: &SimulationRequest) -> ProcessResult<SimulationResult> {
    Engine::default().simulate(req)
}
