//! Simulation request model.
//!
//! Requests are plain SI values so they can be read straight from YAML or JSON.

use crate::error::ProcessResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tp_core::numeric::{ensure_finite, ensure_positive};

/// Quasi-static process families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessKind {
    /// Constant temperature
    Isothermal,
    /// Constant pressure
    Isobaric,
    /// No heat exchange (constant entropy)
    Adiabatic,
    /// Constant volume
    Isochoric,
    /// `P·Vⁿ = const`
    Polytropic,
    /// Unresisted expansion into vacuum; no boundary work
    FreeExpansion,
    /// Closed rectangular loop between two isobars
    Cycle,
}

impl ProcessKind {
    pub const ALL: [ProcessKind; 7] = [
        ProcessKind::Isothermal,
        ProcessKind::Isobaric,
        ProcessKind::Adiabatic,
        ProcessKind::Isochoric,
        ProcessKind::Polytropic,
        ProcessKind::FreeExpansion,
        ProcessKind::Cycle,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ProcessKind::Isothermal => "isothermal",
            ProcessKind::Isobaric => "isobaric",
            ProcessKind::Adiabatic => "adiabatic",
            ProcessKind::Isochoric => "isochoric",
            ProcessKind::Polytropic => "polytropic",
            ProcessKind::FreeExpansion => "free_expansion",
            ProcessKind::Cycle => "cycle",
        }
    }

    /// Whether `mode` is a meaningful control variable for this process.
    pub fn accepts(&self, mode: TargetMode) -> bool {
        match (self, mode) {
            (_, TargetMode::Volume) => true,
            (ProcessKind::Isothermal, TargetMode::Temperature) => false,
            (ProcessKind::Isobaric, TargetMode::Pressure) => false,
            (ProcessKind::FreeExpansion | ProcessKind::Cycle, _) => false,
            _ => true,
        }
    }
}

impl fmt::Display for ProcessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ProcessKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "isothermal" => Ok(ProcessKind::Isothermal),
            "isobaric" => Ok(ProcessKind::Isobaric),
            "adiabatic" | "isentropic" => Ok(ProcessKind::Adiabatic),
            "isochoric" | "isometric" => Ok(ProcessKind::Isochoric),
            "polytropic" => Ok(ProcessKind::Polytropic),
            "free_expansion" | "free" => Ok(ProcessKind::FreeExpansion),
            "cycle" => Ok(ProcessKind::Cycle),
            _ => Err("unknown process"),
        }
    }
}

/// Which end-state quantity the caller controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TargetMode {
    /// Final volume V2
    #[default]
    #[serde(rename = "v2")]
    Volume,
    /// Final pressure P2
    #[serde(rename = "p2")]
    Pressure,
    /// Final temperature T2
    #[serde(rename = "t2")]
    Temperature,
}

impl fmt::Display for TargetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TargetMode::Volume => "V2",
            TargetMode::Pressure => "P2",
            TargetMode::Temperature => "T2",
        })
    }
}

fn default_precise() -> bool {
    true
}

/// Everything needed to run one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Species registry key
    pub species: String,
    pub process: ProcessKind,
    /// Initial temperature [K]
    pub t1_k: f64,
    /// Initial pressure [Pa]
    pub p1_pa: f64,
    /// Initial volume [m³]
    pub v1_m3: f64,
    #[serde(default)]
    pub target_mode: TargetMode,
    /// Directly supplied final volume [m³]; also the fallback for P2/T2 targeting
    pub v2_m3: f64,
    /// Final pressure target [Pa]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p2_pa: Option<f64>,
    /// Final temperature target [K]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t2_k: Option<f64>,
    /// Correlation-based heat capacities instead of constant γ
    #[serde(default = "default_precise")]
    pub precise: bool,
    /// Polytropic index n
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polytropic_index: Option<f64>,
    /// System mass override for real fluids [kg]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass_kg: Option<f64>,
}

impl SimulationRequest {
    /// Volume-targeted request in precise mode.
    pub fn new(
        species: impl Into<String>,
        process: ProcessKind,
        t1_k: f64,
        p1_pa: f64,
        v1_m3: f64,
        v2_m3: f64,
    ) -> Self {
        Self {
            species: species.into(),
            process,
            t1_k,
            p1_pa,
            v1_m3,
            target_mode: TargetMode::Volume,
            v2_m3,
            p2_pa: None,
            t2_k: None,
            precise: true,
            polytropic_index: None,
            mass_kg: None,
        }
    }

    pub fn with_pressure_target(mut self, p2_pa: f64) -> Self {
        self.target_mode = TargetMode::Pressure;
        self.p2_pa = Some(p2_pa);
        self
    }

    pub fn with_temperature_target(mut self, t2_k: f64) -> Self {
        self.target_mode = TargetMode::Temperature;
        self.t2_k = Some(t2_k);
        self
    }

    pub fn with_precise(mut self, precise: bool) -> Self {
        self.precise = precise;
        self
    }

    pub fn with_polytropic_index(mut self, n: f64) -> Self {
        self.polytropic_index = Some(n);
        self
    }

    pub fn with_mass(mut self, mass_kg: f64) -> Self {
        self.mass_kg = Some(mass_kg);
        self
    }

    /// Reject structurally malformed requests.
    ///
    /// Target values are not checked here: a non-positive P2 or T2 makes the
    /// resolver fall back to the supplied final volume.
    pub fn validate(&self) -> ProcessResult<()> {
        ensure_positive(self.t1_k, "initial temperature must be positive")?;
        ensure_positive(self.p1_pa, "initial pressure must be positive")?;
        ensure_positive(self.v1_m3, "initial volume must be positive")?;
        ensure_positive(self.v2_m3, "final volume must be positive")?;
        if let Some(n) = self.polytropic_index {
            ensure_finite(n, "polytropic index must be finite")?;
        }
        if let Some(m) = self.mass_kg {
            ensure_positive(m, "system mass must be positive")?;
        }
        Ok(())
    }
}
