//! tp-fluids: gas and fluid property evaluation for the process simulator.
//!
//! Provides:
//! - The species registry (ideal-gas and real-fluid descriptors)
//! - Shomate heat-capacity correlation and the pressure-corrected entropy evaluator
//! - `PropertySource` trait for external equation-of-state lookups
//! - CoolProp backend for real-fluid properties (`coolprop` feature)
//!
//! # Architecture
//!
//! Ideal-gas species carry everything needed to evaluate them locally: a constant
//! heat-capacity ratio and seven correlation coefficients. Real-fluid species only
//! carry a substance code and a fixed system mass; their properties come from a
//! `PropertySource`, which isolates the rest of the workspace from backend
//! dependencies.
//!
//! # Example
//!
//! ```
//! use tp_core::units::{k, pa};
//! use tp_fluids::{SpeciesKind, lookup_species};
//!
//! let n2 = lookup_species("n2").unwrap();
//! let SpeciesKind::Ideal(gas) = n2.kind else { unreachable!() };
//! let s = gas.coeffs.entropy(k(300.0), pa(100_000.0));
//! assert!(s > 190.0 && s < 193.0);
//! ```

#[cfg(feature = "coolprop")]
pub mod coolprop;
pub mod error;
pub mod property;
pub mod shomate;
pub mod species;

// Re-exports for ergonomics
#[cfg(feature = "coolprop")]
pub use coolprop::CoolPropSource;
pub use error::{FluidError, FluidResult};
pub use property::{Property, PropertyInput, PropertySource, UnavailableSource, default_source};
pub use shomate::{ShomateCoeffs, ShomateProps};
pub use species::{
    IdealGas, RealFluid, SpeciesDescriptor, SpeciesKind, filter_species, lookup_species,
    species_table,
};
