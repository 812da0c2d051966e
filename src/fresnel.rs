//! Fresnel equations for reflection at a planar interface.
//!
//! This module turns the incidence/transmission quantities of a
//! [`Refraction`] into complex amplitude reflection coefficients and the
//! corresponding power reflectances for both polarizations.
//!
//! - s (perpendicular): `r_s = (n1 cos_i - n2 cos_t) / (n1 cos_i + n2 cos_t)`
//! - p (parallel): `r_p = (n1 cos_t - n2 cos_i) / (n2 cos_i + n1 cos_t)`
//! - power: `R = |r|^2`
//!
//! # Sign convention
//!
//! The p coefficient carries the opposite sign of the form common in
//! textbooks, `(n2 cos_i - n1 cos_t) / (n2 cos_i + n1 cos_t)`. The two differ
//! only by a phase of pi, so the power reflectance `R_p` is the same under
//! either; only the phase of `r_p` depends on the choice.

use num_complex::Complex;

use crate::error::{OpticsError, OpticsResult};
use crate::snell::Refraction;

/// Complex amplitude reflection coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmplitudeCoefficients {
    pub r_s: Complex<f64>,
    pub r_p: Complex<f64>,
}

/// Power reflectances for s- and p-polarized light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reflectance {
    pub r_s: f64,
    pub r_p: f64,
}

impl AmplitudeCoefficients {
    /// Power reflectances `|r_s|^2` and `|r_p|^2`.
    pub fn reflectance(&self) -> Reflectance {
        Reflectance {
            r_s: self.r_s.norm_sqr(),
            r_p: self.r_p.norm_sqr(),
        }
    }
}

impl Reflectance {
    /// Reflectance for unpolarized light, the mean of both polarizations.
    pub fn unpolarized(&self) -> f64 {
        0.5 * (self.r_s + self.r_p)
    }

    /// Whether both values lie in `[0, 1]` within `tol`.
    pub fn is_physical(&self, tol: f64) -> bool {
        let range = -tol..=1.0 + tol;
        range.contains(&self.r_s) && range.contains(&self.r_p)
    }
}

/// Computes the complex Fresnel reflection coefficients.
///
/// **Context**: The reflected amplitude depends on polarization, on the
/// cosines of the incidence and transmission angles and on both refractive
/// indices, all of which may be complex for an absorbing medium.
///
/// **How it Works**: Evaluates the s and p formulas directly. A denominator
/// that is exactly zero (a lossless pair of media at a degenerate angle) or a
/// non-finite coefficient fails with `DomainError`.
pub fn refl(refraction: &Refraction) -> OpticsResult<AmplitudeCoefficients> {
    let Refraction {
        n1, n2, cos_i, cos_t, ..
    } = *refraction;
    let cti = Complex::new(cos_i, 0.0);
    let ctt = cos_t;

    let s_num = n1 * cti - n2 * ctt;
    let s_den = n1 * cti + n2 * ctt;
    let p_num = n1 * ctt - n2 * cti;
    let p_den = n2 * cti + n1 * ctt;

    let r_s = divide(s_num, s_den, "s")?;
    let r_p = divide(p_num, p_den, "p")?;

    Ok(AmplitudeCoefficients { r_s, r_p })
}

/// Power reflectances for both polarizations, see [`refl`].
pub fn reflectance(refraction: &Refraction) -> OpticsResult<Reflectance> {
    refl(refraction).map(|coeffs| coeffs.reflectance())
}

fn divide(num: Complex<f64>, den: Complex<f64>, pol: &str) -> OpticsResult<Complex<f64>> {
    if den.re == 0.0 && den.im == 0.0 {
        return Err(OpticsError::domain(format!(
            "{}-polarized Fresnel denominator is zero",
            pol
        )));
    }
    let r = num / den;
    if !r.is_finite() {
        return Err(OpticsError::domain(format!(
            "{}-polarized Fresnel coefficient is not finite",
            pol
        )));
    }
    Ok(r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snell::refractive_index;

    const VACUUM: Complex<f64> = Complex::new(1.0, 0.0);

    #[test]
    fn glass_normal_incidence() {
        let glass = Complex::new(1.5, 0.0);
        let coeffs = refl(&Refraction::solve(0.0, VACUUM, glass).unwrap()).unwrap();
        assert!((coeffs.r_s.re + 0.2).abs() < 1e-12);
        // same sign as r_s at normal incidence with this convention
        assert!((coeffs.r_p.re + 0.2).abs() < 1e-12);
        let r = coeffs.reflectance();
        assert!((r.r_s - 0.04).abs() < 1e-12);
        assert!((r.r_p - 0.04).abs() < 1e-12);
    }

    #[test]
    fn glass_brewster_angle() {
        let glass = Complex::new(1.5, 0.0);
        let brewster = 1.5_f64.atan().to_degrees();
        let r = reflectance(&Refraction::solve(brewster, VACUUM, glass).unwrap()).unwrap();
        assert!(r.r_p < 1e-12, "R_p: {}", r.r_p);
        assert!(r.r_s > 0.1, "R_s: {}", r.r_s);
    }

    #[test]
    fn textbook_p_has_same_power() {
        let glass = Complex::new(1.5, 0.0);
        let refraction = Refraction::solve(40.0, VACUUM, glass).unwrap();
        let coeffs = refl(&refraction).unwrap();
        let cti = Complex::new(refraction.cos_i, 0.0);
        let textbook = (glass * cti - VACUUM * refraction.cos_t)
            / (glass * cti + VACUUM * refraction.cos_t);
        assert!((coeffs.r_p + textbook).norm() < 1e-12);
        assert!((coeffs.r_p.norm_sqr() - textbook.norm_sqr()).abs() < 1e-12);
    }

    #[test]
    fn metal_grazing_total_reflection() {
        let n2 = refractive_index(Complex::new(-9.156, 0.635));
        let r = reflectance(&Refraction::solve(90.0, VACUUM, n2).unwrap()).unwrap();
        assert!((r.r_s - 1.0).abs() < 1e-12, "R_s: {}", r.r_s);
        assert!((r.r_p - 1.0).abs() < 1e-12, "R_p: {}", r.r_p);
    }

    #[test]
    fn identical_media_at_grazing_is_singular() {
        let refraction = Refraction::solve(90.0, VACUUM, VACUUM).unwrap();
        assert_eq!(refraction.cos_t, Complex::new(0.0, 0.0));
        let err = refl(&refraction).unwrap_err();
        assert!(err.is_domain_error());
    }

    #[test]
    fn unpolarized_mean() {
        let r = Reflectance { r_s: 0.9, r_p: 0.7 };
        assert!((r.unpolarized() - 0.8).abs() < 1e-15);
        assert!(r.is_physical(0.0));
        assert!(!Reflectance { r_s: 1.2, r_p: 0.7 }.is_physical(1e-9));
    }
}
