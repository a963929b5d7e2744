//! Species registry.
//!
//! A static, read-only table of the gases and fluids the simulator knows about.
//! Each descriptor is either an ideal gas evaluated locally from its correlation
//! or a real fluid delegated to an external property source.

use crate::error::{FluidError, FluidResult};
use crate::shomate::ShomateCoeffs;
use tp_core::constants::R;

/// Ideal-gas species parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IdealGas {
    /// Constant heat-capacity ratio γ = cp/cv used in ideal mode.
    pub gamma: f64,
    /// Correlation coefficients used in precise mode.
    pub coeffs: ShomateCoeffs,
}

impl IdealGas {
    /// Molar cv from γ [J/(mol·K)].
    pub fn cv_molar(&self) -> f64 {
        R / (self.gamma - 1.0)
    }

    /// Molar cp from γ [J/(mol·K)].
    pub fn cp_molar(&self) -> f64 {
        self.gamma * R / (self.gamma - 1.0)
    }
}

/// Real-fluid species parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RealFluid {
    /// Substance code understood by the property backend (e.g. "Water").
    pub code: &'static str,
    /// Fixed system mass [kg].
    pub mass_kg: f64,
}

/// Which evaluation path a species takes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum SpeciesKind {
    Ideal(IdealGas),
    Real(RealFluid),
}

impl SpeciesKind {
    /// Short tag: `"ideal"` or `"real"`.
    pub fn tag(&self) -> &'static str {
        match self {
            SpeciesKind::Ideal(_) => "ideal",
            SpeciesKind::Real(_) => "real",
        }
    }

    /// γ for ideal species; real fluids have none.
    pub fn gamma(&self) -> Option<f64> {
        match self {
            SpeciesKind::Ideal(gas) => Some(gas.gamma),
            SpeciesKind::Real(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SpeciesDescriptor {
    pub key: &'static str,
    pub display_name: &'static str,
    pub aliases: &'static [&'static str],
    pub kind: SpeciesKind,
}

impl SpeciesDescriptor {
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }

        self.key.contains(&query)
            || self.display_name.to_ascii_lowercase().contains(&query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_ascii_lowercase().contains(&query))
    }
}

const fn ideal(gamma: f64, coeffs: ShomateCoeffs) -> SpeciesKind {
    SpeciesKind::Ideal(IdealGas { gamma, coeffs })
}

const SPECIES_TABLE: [SpeciesDescriptor; 8] = [
    SpeciesDescriptor {
        key: "air",
        display_name: "Atmospheric Air",
        aliases: &["atmospheric air"],
        kind: ideal(
            1.4,
            ShomateCoeffs::new(28.089, -0.0086, 0.000057, -2.7e-8, 0.0, -9.85, 22.67),
        ),
    },
    SpeciesDescriptor {
        key: "he",
        display_name: "Helium (monatomic)",
        aliases: &["helium"],
        kind: ideal(
            1.667,
            ShomateCoeffs::new(20.786, 4.85e-10, -1.58e-10, 1.52e-11, 3.19e-11, -6.197, 126.3),
        ),
    },
    SpeciesDescriptor {
        key: "n2",
        display_name: "Nitrogen (N2)",
        aliases: &["nitrogen"],
        kind: ideal(
            1.4,
            ShomateCoeffs::new(26.092, 8.2188, -1.976, 0.159, 0.044, -7.96, 220.9),
        ),
    },
    SpeciesDescriptor {
        key: "co2",
        display_name: "Carbon Dioxide",
        aliases: &["carbon dioxide"],
        kind: ideal(
            1.289,
            ShomateCoeffs::new(24.99, 55.18, -33.69, 7.94, -0.136, -393.5, 228.2),
        ),
    },
    SpeciesDescriptor {
        key: "h2o",
        display_name: "Water Vapor",
        aliases: &["steam", "water vapour"],
        kind: ideal(
            1.33,
            ShomateCoeffs::new(30.09, 6.83, 6.79, -2.53, 0.082, -243.2, 189.3),
        ),
    },
    SpeciesDescriptor {
        key: "o2",
        display_name: "Oxygen",
        aliases: &["oxygen"],
        kind: ideal(
            1.4,
            ShomateCoeffs::new(29.65, 6.137, -1.18, 0.095, -0.219, -9.86, 205.6),
        ),
    },
    SpeciesDescriptor {
        key: "r22",
        display_name: "R22 (real fluid)",
        aliases: &["chlorodifluoromethane"],
        kind: SpeciesKind::Real(RealFluid {
            code: "R22",
            mass_kg: 2.28626,
        }),
    },
    SpeciesDescriptor {
        key: "water",
        display_name: "Water (real fluid)",
        aliases: &["liquid water"],
        kind: SpeciesKind::Real(RealFluid {
            code: "Water",
            mass_kg: 5.0,
        }),
    },
];

/// All registered species, in display order.
pub fn species_table() -> &'static [SpeciesDescriptor] {
    &SPECIES_TABLE
}

/// Look up a species by key, falling back to an exact alias match.
///
/// Matching is case-insensitive and ignores surrounding whitespace. Keys win
/// over aliases.
pub fn lookup_species(key: &str) -> FluidResult<&'static SpeciesDescriptor> {
    let wanted = key.trim().to_ascii_lowercase();
    let table = species_table();
    table
        .iter()
        .find(|entry| entry.key == wanted)
        .or_else(|| {
            table.iter().find(|entry| {
                entry
                    .aliases
                    .iter()
                    .any(|alias| alias.eq_ignore_ascii_case(&wanted))
            })
        })
        .ok_or_else(|| FluidError::UnknownSpecies {
            key: key.to_string(),
        })
}

pub fn filter_species(query: &str) -> Vec<&'static SpeciesDescriptor> {
    species_table()
        .iter()
        .filter(|entry| entry.matches_query(query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keys_are_unique_and_lowercase() {
        let mut seen = HashSet::new();
        for entry in species_table() {
            assert!(seen.insert(entry.key), "duplicate key: {}", entry.key);
            assert_eq!(entry.key, entry.key.to_ascii_lowercase());
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup_species("N2").unwrap().key, "n2");
        assert_eq!(lookup_species("  co2 ").unwrap().key, "co2");
    }

    #[test]
    fn lookup_accepts_exact_aliases() {
        assert_eq!(lookup_species("Nitrogen").unwrap().key, "n2");
        assert_eq!(lookup_species("atmospheric air").unwrap().key, "air");
        assert_eq!(lookup_species("steam").unwrap().key, "h2o");
        assert!(lookup_species("nitro").is_err());
    }

    #[test]
    fn keys_never_collide_with_aliases() {
        for entry in species_table() {
            let owner = lookup_species(entry.key).unwrap();
            assert_eq!(owner.key, entry.key);
            for alias in entry.aliases {
                assert_eq!(lookup_species(alias).unwrap().key, entry.key, "alias {alias}");
            }
        }
    }

    #[test]
    fn unknown_key_is_an_error() {
        let err = lookup_species("xenon").unwrap_err();
        assert_eq!(
            err,
            FluidError::UnknownSpecies {
                key: "xenon".into()
            }
        );
    }

    #[test]
    fn real_water_does_not_shadow_vapor() {
        assert_eq!(lookup_species("h2o").unwrap().kind.tag(), "ideal");
        let water = lookup_species("water").unwrap();
        match water.kind {
            SpeciesKind::Real(fluid) => {
                assert_eq!(fluid.code, "Water");
                assert_eq!(fluid.mass_kg, 5.0);
            }
            SpeciesKind::Ideal(_) => panic!("water should be a real fluid"),
        }
    }

    #[test]
    fn ideal_heat_capacities_from_gamma() {
        let SpeciesKind::Ideal(air) = lookup_species("air").unwrap().kind else {
            panic!("air should be ideal");
        };
        assert!((air.cv_molar() - R / 0.4).abs() < 1e-12);
        assert!((air.cp_molar() - air.cv_molar() - R).abs() < 1e-9);
        assert_eq!(lookup_species("r22").unwrap().kind.gamma(), None);
    }

    #[test]
    fn search_by_alias() {
        let results = filter_species("nitrogen");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].key, "n2");
        assert_eq!(filter_species("").len(), species_table().len());
    }
}
