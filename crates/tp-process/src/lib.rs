//! Quasi-static thermodynamic process engine.
//!
//! Provides:
//! - Simulation requests loadable from YAML/JSON, with V2, P2 or T2 targeting
//! - Inverse target resolution to a final volume
//! - Ideal-gas paths in constant-γ or correlation-based (precise) mode
//! - Real-fluid paths through a pluggable property source, degrading per point
//! - First-law reconciliation per process kind
//!
//! ```
//! use tp_process::{ProcessKind, SimulationRequest, simulate};
//!
//! let req = SimulationRequest::new("n2", ProcessKind::Isobaric, 300.0, 100_000.0, 0.05, 0.10);
//! let result = simulate(&req).unwrap();
//! assert!((result.energy.work_j - 5000.0).abs() < 1e-9);
//! assert_eq!(result.path.len(), 101);
//! ```

pub mod adiabatic;
pub mod engine;
pub mod error;
pub mod ideal;
pub mod law;
pub mod model;
pub mod path;
pub mod real;
pub mod request;
pub mod resolve;
pub mod result;

pub use adiabatic::{AdiabaticSolution, AdiabaticSolverConfig, solve_adiabatic_temperature};
pub use engine::{Engine, EngineOptions, simulate};
pub use error::{ProcessError, ProcessResult};
pub use ideal::IdealGasModel;
pub use law::{EndContext, ProcessLaw};
pub use model::{ModelEnd, PathModel, PathStep};
pub use path::{Walk, walk, walk_cycle};
pub use real::RealFluidModel;
pub use request::{ProcessKind, SimulationRequest, TargetMode};
pub use resolve::{ResolvedTarget, normalize_mode, resolve_target};
pub use result::{EnergyBalance, ProcessState, SimulationResult};
