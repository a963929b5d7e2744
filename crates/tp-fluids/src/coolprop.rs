//! CoolProp-based property source.

use crate::error::{FluidError, FluidResult};
use crate::property::{Property, PropertyInput, PropertySource, validation};
use rfluids::prelude::*;

/// CoolProp backend for real-fluid properties.
///
/// Supports the pure substances registered as real fluids. Thread-safe: rfluids
/// Fluid instances are created per lookup and never shared.
pub struct CoolPropSource {}

impl CoolPropSource {
    /// Create a new CoolProp source.
    pub fn new() -> Self {
        Self {}
    }

    /// Map a substance code to the rfluids pure fluid.
    fn pure(code: &str) -> FluidResult<Pure> {
        match code {
            "Water" => Ok(Pure::Water),
            "R22" => Ok(Pure::R22),
            "R134a" => Ok(Pure::R134a),
            "Nitrogen" => Ok(Pure::Nitrogen),
            "CarbonDioxide" => Ok(Pure::CarbonDioxide),
            _ => Err(FluidError::NotSupported {
                what: "substance code not mapped to a CoolProp fluid",
            }),
        }
    }

    fn fluid_input(input: PropertyInput) -> FluidResult<FluidInput> {
        validation::validate_input(input)?;
        let value = input.value;
        match input.property {
            Property::Temperature => Ok(FluidInput::temperature(value)),
            Property::Pressure => Ok(FluidInput::pressure(value)),
            Property::Density => Ok(FluidInput::density(value)),
            Property::InternalEnergy => Ok(FluidInput::internal_energy(value)),
            Property::Enthalpy => Ok(FluidInput::enthalpy(value)),
            Property::Entropy => Ok(FluidInput::entropy(value)),
            Property::Quality => Ok(FluidInput::quality(value)),
        }
    }
}

impl Default for CoolPropSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertySource for CoolPropSource {
    fn name(&self) -> &str {
        "CoolProp"
    }

    fn lookup(
        &self,
        output: Property,
        first: PropertyInput,
        second: PropertyInput,
        fluid: &str,
    ) -> FluidResult<f64> {
        let pure = Self::pure(fluid)?;
        let mut state = Fluid::from(pure)
            .in_state(Self::fluid_input(first)?, Self::fluid_input(second)?)
            .map_err(|e| FluidError::Backend {
                message: format!("rfluids error at {first}, {second} for {fluid}: {e}"),
            })?;

        let value = match output {
            Property::Temperature => state.temperature(),
            Property::Pressure => state.pressure(),
            Property::Density => state.density(),
            Property::InternalEnergy => state.internal_energy(),
            Property::Enthalpy => state.enthalpy(),
            Property::Entropy => state.entropy(),
            Property::Quality => state.quality(),
        }
        .map_err(|e| FluidError::Backend {
            message: format!("rfluids error getting {output} for {fluid}: {e}"),
        })?;

        validation::validate_output(value)
    }
}
