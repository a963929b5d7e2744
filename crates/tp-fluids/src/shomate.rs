//! Shomate heat-capacity correlation.
//!
//! Seven-coefficient fit of the standard-state molar properties of a gas as a
//! function of temperature, with `t = T / 1000`:
//!
//! ```text
//! cp = A + B·t + C·t² + D·t³ + E/t²                       [J/(mol·K)]
//! h  = 1000·(A·t + B·t²/2 + C·t³/3 + D·t⁴/4 − E/t + F)     [J/mol]
//! s° = A·ln t + B·t + C·t²/2 + D·t³/3 − E/(2t²) + G        [J/(mol·K)]
//! u  = h − R·T                                            [J/mol]
//! ```
//!
//! Every function here requires `T > 0`. The `E/t` and `ln t` terms diverge at
//! zero and no runtime check is made; callers validate temperatures before they
//! reach the correlation.

use tp_core::constants::{P_FLOOR_PA, P_REF_PA, R};
use tp_core::units::{MolarEnergy, MolarEntropy, Pressure, Temperature};

/// Shomate coefficients `A..G` for one species.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ShomateCoeffs {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
    pub g: f64,
}

/// Molar properties evaluated at a single temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShomateProps {
    /// Heat capacity at constant pressure [J/(mol·K)]
    pub cp: MolarEntropy,
    /// Enthalpy relative to the table reference [J/mol]
    pub h: MolarEnergy,
    /// Standard-state entropy at 1 bar [J/(mol·K)]
    pub s0: MolarEntropy,
    /// Internal energy [J/mol]
    pub u: MolarEnergy,
}

impl ShomateCoeffs {
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64, g: f64) -> Self {
        Self {
            a,
            b,
            c,
            d,
            e,
            f,
            g,
        }
    }

    /// Evaluate cp, h, s° and u at `t`.
    pub fn eval(&self, t: Temperature) -> ShomateProps {
        let t_k = t.value;
        let t = t_k / 1000.0;
        let (t2, t3, t4) = (t * t, t * t * t, t * t * t * t);
        let Self {
            a,
            b,
            c,
            d,
            e,
            f,
            g,
        } = *self;

        let cp = a + b * t + c * t2 + d * t3 + e / t2;
        let h = 1000.0 * (a * t + b * t2 / 2.0 + c * t3 / 3.0 + d * t4 / 4.0 - e / t + f);
        let s0 = a * t.ln() + b * t + c * t2 / 2.0 + d * t3 / 3.0 - e / (2.0 * t2) + g;

        ShomateProps {
            cp,
            h,
            s0,
            u: h - R * t_k,
        }
    }

    /// Heat capacity at constant pressure [J/(mol·K)].
    pub fn cp(&self, t: Temperature) -> MolarEntropy {
        self.eval(t).cp
    }

    /// Molar entropy at `(t, p)`, corrected from the 1 bar standard state.
    ///
    /// `s = s°(T) − R·ln(max(P, 1 Pa) / 1 bar)`
    pub fn entropy(&self, t: Temperature, p: Pressure) -> MolarEntropy {
        let p_safe = p.value.max(P_FLOOR_PA);
        self.eval(t).s0 - R * (p_safe / P_REF_PA).ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tp_core::units::{k, pa};

    const N2: ShomateCoeffs = ShomateCoeffs::new(26.092, 8.2188, -1.976, 0.159, 0.044, -7.96, 220.9);

    #[test]
    fn nitrogen_near_standard_state() {
        let props = N2.eval(k(298.15));
        assert!(props.cp > 28.0 && props.cp < 30.0, "cp = {}", props.cp);
        assert!(props.s0 > 190.0 && props.s0 < 193.0, "s0 = {}", props.s0);
        // Tables are referenced so that h(298.15 K) ≈ 0.
        assert!(props.h.abs() < 100.0, "h = {}", props.h);
        assert!((props.u - (props.h - R * 298.15)).abs() < 1e-9);
    }

    #[test]
    fn entropy_slope_matches_cp_over_t() {
        let t = 500.0;
        let dt = 1e-3;
        let ds = N2.eval(k(t + dt)).s0 - N2.eval(k(t - dt)).s0;
        let slope = ds / (2.0 * dt);
        let expected = N2.cp(k(t)) / t;
        assert!((slope - expected).abs() < 1e-6, "{slope} vs {expected}");
    }

    #[test]
    fn enthalpy_slope_matches_cp() {
        let t = 800.0;
        let dt = 1e-3;
        let dh = N2.eval(k(t + dt)).h - N2.eval(k(t - dt)).h;
        assert!((dh / (2.0 * dt) - N2.cp(k(t))).abs() < 1e-4);
    }

    #[test]
    fn entropy_at_reference_pressure_is_standard_entropy() {
        let t = k(400.0);
        assert_eq!(N2.entropy(t, pa(P_REF_PA)), N2.eval(t).s0);
    }

    #[test]
    fn entropy_drops_by_r_ln2_when_pressure_doubles() {
        let t = k(350.0);
        let s1 = N2.entropy(t, pa(100_000.0));
        let s2 = N2.entropy(t, pa(200_000.0));
        assert!(((s1 - s2) - R * 2.0_f64.ln()).abs() < 1e-9);
    }

    #[test]
    fn entropy_guards_non_positive_pressure() {
        let t = k(300.0);
        let at_floor = N2.entropy(t, pa(1.0));
        assert_eq!(N2.entropy(t, pa(0.0)), at_floor);
        assert_eq!(N2.entropy(t, pa(-50.0)), at_floor);
        assert!(at_floor.is_finite());
    }
}
