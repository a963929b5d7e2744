//! Real-fluid property source trait and validation helpers.
//!
//! The process engine never talks to an equation-of-state library directly. It
//! asks a `PropertySource` for one output property given two independent input
//! properties and a substance code, mirroring the classic `PropsSI` call shape.

use crate::error::{FluidError, FluidResult};
use std::fmt;

/// Mass-specific thermodynamic properties, in SI units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// Temperature [K]
    Temperature,
    /// Pressure [Pa]
    Pressure,
    /// Mass density [kg/m³]
    Density,
    /// Specific internal energy [J/kg]
    InternalEnergy,
    /// Specific enthalpy [J/kg]
    Enthalpy,
    /// Specific entropy [J/(kg·K)]
    Entropy,
    /// Vapor mass fraction [-]; only meaningful inside the two-phase dome
    Quality,
}

impl Property {
    /// CoolProp-style single-letter symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Property::Temperature => "T",
            Property::Pressure => "P",
            Property::Density => "D",
            Property::InternalEnergy => "U",
            Property::Enthalpy => "H",
            Property::Entropy => "S",
            Property::Quality => "Q",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One independent input of a property lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyInput {
    pub property: Property,
    pub value: f64,
}

impl PropertyInput {
    pub fn new(property: Property, value: f64) -> Self {
        Self { property, value }
    }

    pub fn temperature(t_k: f64) -> Self {
        Self::new(Property::Temperature, t_k)
    }

    pub fn pressure(p_pa: f64) -> Self {
        Self::new(Property::Pressure, p_pa)
    }

    pub fn density(rho_kg_m3: f64) -> Self {
        Self::new(Property::Density, rho_kg_m3)
    }

    pub fn internal_energy(u_j_kg: f64) -> Self {
        Self::new(Property::InternalEnergy, u_j_kg)
    }

    pub fn entropy(s_j_kg_k: f64) -> Self {
        Self::new(Property::Entropy, s_j_kg_k)
    }
}

impl fmt::Display for PropertyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.property, self.value)
    }
}

/// Trait for external real-fluid property backends.
///
/// Implementations must be thread-safe (Send + Sync) so a single source can be
/// shared between independent simulations. Any lookup may fail: the backend may
/// be missing or uninitialized, or the input pair may fall outside its range.
pub trait PropertySource: Send + Sync {
    /// Backend name (for debugging/logging).
    fn name(&self) -> &str;

    /// Evaluate `output` at the state fixed by `first` and `second` for `fluid`.
    fn lookup(
        &self,
        output: Property,
        first: PropertyInput,
        second: PropertyInput,
        fluid: &str,
    ) -> FluidResult<f64>;
}

/// Source used when no real-fluid backend is compiled in. Every lookup fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableSource;

impl PropertySource for UnavailableSource {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn lookup(
        &self,
        output: Property,
        _first: PropertyInput,
        _second: PropertyInput,
        fluid: &str,
    ) -> FluidResult<f64> {
        Err(FluidError::Backend {
            message: format!(
                "no real-fluid property backend available (requested {output} for {fluid})"
            ),
        })
    }
}

/// The best backend this build provides.
pub fn default_source() -> Box<dyn PropertySource> {
    #[cfg(feature = "coolprop")]
    {
        Box::new(crate::coolprop::CoolPropSource::new())
    }
    #[cfg(not(feature = "coolprop"))]
    {
        Box::new(UnavailableSource)
    }
}

/// Validation helpers for lookup inputs and outputs.
pub(crate) mod validation {
    use super::*;

    /// Inputs must be finite; all but entropy and energies must also be positive.
    #[cfg_attr(not(feature = "coolprop"), allow(dead_code))]
    pub fn validate_input(input: PropertyInput) -> FluidResult<()> {
        if !input.value.is_finite() {
            return Err(FluidError::NonPhysical {
                what: "lookup input must be finite",
            });
        }
        let needs_positive = matches!(
            input.property,
            Property::Temperature | Property::Pressure | Property::Density
        );
        if needs_positive && input.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "temperature, pressure and density inputs must be positive",
            });
        }
        Ok(())
    }

    /// Outputs must be finite.
    #[cfg_attr(not(feature = "coolprop"), allow(dead_code))]
    pub fn validate_output(value: f64) -> FluidResult<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(FluidError::NonPhysical {
                what: "lookup output must be finite",
            })
        }
    }
}
