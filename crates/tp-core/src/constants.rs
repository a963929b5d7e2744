//! Physical constants shared by the property models and the process engine.

/// Universal gas constant [J/(mol·K)].
///
/// Kept at the four significant figures the correlation tables were fitted with.
pub const R: f64 = 8.314;

/// Standard-state reference pressure for the correlation tables [Pa] (1 bar).
pub const P_REF_PA: f64 = 100_000.0;

/// Floor applied to pressures before taking a logarithm [Pa].
pub const P_FLOOR_PA: f64 = 1.0;
