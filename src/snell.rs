//! Generalized Snell's law for complex refractive indices.
//!
//! For an absorbing transmission medium the refractive index is complex, so
//! the "transmission angle" is no longer a real angle. Rather than reducing
//! the problem to a real effective angle, this module keeps the complex
//! sine and cosine of the transmission angle, which is all the Fresnel
//! equations need:
//!
//! - `n = sqrt(epsilon)` on the principal branch
//! - `sin(theta_t) = n1 sin(theta_i) / n2`
//! - `cos(theta_t) = sqrt(1 - sin(theta_t)^2)` on the principal branch
//!
//! # Branch convention
//!
//! Every complex square root here has a non-negative real part, and a
//! non-negative imaginary part when the real part is zero. For a metal with
//! `Im(epsilon) > 0` this selects the root with `Im(n2) > 0`, a transmitted
//! wave that decays into the metal. Library square roots differ on the
//! negative real axis (signed zeros), so the convention is enforced by
//! [`principal_sqrt`] rather than inherited.

use num_complex::Complex;

use crate::error::{OpticsError, OpticsResult};

#[cfg(test)]
mod tests {

    use num_complex::Complex;

    use super::*;

    #[test]
    fn branch_cut_takes_positive_imaginary() {
        let a = principal_sqrt(Complex::new(-4.0, 0.0));
        let b = principal_sqrt(Complex::new(-4.0, -0.0));
        assert_eq!(a, Complex::new(0.0, 2.0));
        assert_eq!(b, Complex::new(0.0, 2.0));
    }

    #[test]
    fn non_negative_real_part() {
        let samples = [
            Complex::new(-9.156, 0.635),
            Complex::new(-9.156, -0.635),
            Complex::new(2.25, 0.0),
            Complex::new(0.0, -1.0),
            Complex::new(-1e-3, -1e-12),
        ];
        for z in samples.iter() {
            let w = principal_sqrt(*z);
            assert!(w.re >= 0.0, "sqrt({}) = {}", z, w);
            assert!((w * w - z).norm() < 1e-12 * (1.0 + z.norm()), "sqrt({}) = {}", z, w);
        }
    }

    #[test]
    fn normal_incidence_same_media() {
        let m = Complex::new(1.0, 0.0);
        let refraction = Refraction::solve(0.0, m, m).unwrap();
        assert_eq!(refraction.cos_i, 1.0);
        assert_eq!(refraction.cos_t, Complex::new(1.0, 0.0));
    }

    #[test]
    fn angle30_incidence() {
        let m1 = Complex::new(1.0, 0.0);
        let m2 = Complex::new(1.31, 0.0);
        let refraction = Refraction::solve(30.0, m1, m2).unwrap();
        let theta_t = refraction.sin_t.re.asin();
        assert!((theta_t - 0.3916126).abs() < 1e-6, "theta_t: {}", theta_t);
        assert!(refraction.sin_t.im.abs() < 1e-15);
        assert!((refraction.cos_t.re - theta_t.cos()).abs() < 1e-12);
    }

    #[test]
    fn grazing_cosine_is_exact() {
        assert_eq!(cos_deg(90.0), 0.0);
        assert_eq!(cos_deg(0.0), 1.0);
        let metal = refractive_index(Complex::new(-9.156, 0.635));
        let refraction = Refraction::solve(90.0, Complex::new(1.0, 0.0), metal).unwrap();
        assert_eq!(refraction.cos_i, 0.0);
        assert!(refraction.cos_t.re > 0.0);
    }

    #[test]
    fn metal_index_decays() {
        let n2 = refractive_index(Complex::new(-9.156, 0.635));
        assert!(n2.re > 0.0 && n2.im > 0.0, "n2: {}", n2);
        assert!((n2.im - 3.03).abs() < 0.01, "n2: {}", n2);
    }

    #[test]
    fn rejects_bad_angles() {
        let m = Complex::new(1.0, 0.0);
        assert!(Refraction::solve(-1.0, m, m).unwrap_err().is_invalid_input());
        assert!(Refraction::solve(90.5, m, m).unwrap_err().is_invalid_input());
        assert!(Refraction::solve(f64::NAN, m, m).unwrap_err().is_invalid_input());
    }

    #[test]
    fn zero_index_is_singular() {
        let m = Complex::new(1.0, 0.0);
        let err = Refraction::solve(45.0, m, Complex::new(0.0, 0.0)).unwrap_err();
        assert!(err.is_domain_error());
    }
}

/// Complex square root with non-negative real part; on the branch cut
/// (real part zero) the imaginary part is non-negative.
pub fn principal_sqrt(z: Complex<f64>) -> Complex<f64> {
    let w = z.sqrt();
    if w.re == 0.0 {
        Complex::new(0.0, w.im.abs())
    } else if w.re < 0.0 {
        -w
    } else {
        w
    }
}

/// Refractive index of a medium with relative permittivity `epsilon`.
pub fn refractive_index(epsilon: Complex<f64>) -> Complex<f64> {
    principal_sqrt(epsilon)
}

/// Cosine of an angle given in degrees.
///
/// Evaluated as `sin(90 - theta)` so the endpoints are exact: `cos_deg(90.0)`
/// is `0.0` and `cos_deg(0.0)` is `1.0`.
pub fn cos_deg(theta_deg: f64) -> f64 {
    (90.0 - theta_deg).to_radians().sin()
}

/// Incidence and transmission quantities at a planar interface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Refraction {
    /// Refractive index of the incident medium.
    pub n1: Complex<f64>,
    /// Refractive index of the transmission medium.
    pub n2: Complex<f64>,
    /// Cosine of the (real) incidence angle.
    pub cos_i: f64,
    /// Complex sine of the transmission angle.
    pub sin_t: Complex<f64>,
    /// Complex cosine of the transmission angle.
    pub cos_t: Complex<f64>,
}

impl Refraction {
    /// Applies the generalized Snell's law at incidence angle `theta_i_deg`.
    ///
    /// **Context**: A metal has a complex refractive index, so the transmitted
    /// wave is inhomogeneous and its angle complex. The Fresnel coefficients
    /// only need its sine and cosine.
    ///
    /// **How it Works**: Computes `sin(theta_t) = n1 sin(theta_i) / n2` and
    /// `cos(theta_t)` by the principal square root of `1 - sin^2`. Accepts the
    /// closed range `[0, 90]` degrees; at 90 degrees `cos_i` is exactly zero.
    pub fn solve(theta_i_deg: f64, n1: Complex<f64>, n2: Complex<f64>) -> OpticsResult<Self> {
        if !theta_i_deg.is_finite() || !(0.0..=90.0).contains(&theta_i_deg) {
            return Err(OpticsError::invalid(format!(
                "incidence angle must lie in [0, 90] degrees, got {}",
                theta_i_deg
            )));
        }
        if n2.re == 0.0 && n2.im == 0.0 {
            return Err(OpticsError::domain(
                "transmission medium has zero refractive index",
            ));
        }

        let sin_i = theta_i_deg.to_radians().sin();
        let cos_i = cos_deg(theta_i_deg);

        let sin_t = n1 * sin_i / n2;
        let cos_t = principal_sqrt(Complex::new(1.0, 0.0) - sin_t * sin_t);

        if !sin_t.is_finite() || !cos_t.is_finite() {
            return Err(OpticsError::domain(format!(
                "transmission angle is not finite at {} degrees",
                theta_i_deg
            )));
        }

        Ok(Self {
            n1,
            n2,
            cos_i,
            sin_t,
            cos_t,
        })
    }
}
