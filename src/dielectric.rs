//! Drude free-electron model of a metal's complex permittivity.
//!
//! The relative permittivity of a free-electron gas driven at angular
//! frequency `omega` is
//!
//! `epsilon(omega) = epsilon_inf - omega_p^2 / (omega^2 + i gamma omega)`
//!
//! where `omega_p` is the plasma frequency, `gamma` the damping (collision)
//! rate and `epsilon_inf` the high-frequency dielectric constant that lumps
//! together the bound-electron response. Positive `gamma` gives a positive
//! imaginary part, i.e. absorption.

use num_complex::Complex;
use serde::{Deserialize, Serialize};

use crate::error::{OpticsError, OpticsResult};

/// Optical constants of a metal in the Drude model, all in SI units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrudeParams {
    /// Plasma frequency (rad/s).
    pub omega_p: f64,
    /// Damping rate (rad/s).
    pub gamma: f64,
    /// High-frequency dielectric constant.
    pub epsilon_inf: f64,
}

impl DrudeParams {
    /// Creates a validated parameter set: `omega_p > 0`, `gamma >= 0` and
    /// every value finite.
    pub fn new(omega_p: f64, gamma: f64, epsilon_inf: f64) -> OpticsResult<Self> {
        if !omega_p.is_finite() || omega_p <= 0.0 {
            return Err(OpticsError::invalid(format!(
                "plasma frequency must be positive, got {}",
                omega_p
            )));
        }
        if !gamma.is_finite() || gamma < 0.0 {
            return Err(OpticsError::invalid(format!(
                "damping rate must be non-negative, got {}",
                gamma
            )));
        }
        if !epsilon_inf.is_finite() {
            return Err(OpticsError::invalid(format!(
                "epsilon_inf must be finite, got {}",
                epsilon_inf
            )));
        }
        Ok(Self {
            omega_p,
            gamma,
            epsilon_inf,
        })
    }

    /// Evaluates the permittivity of this metal at `omega`.
    pub fn permittivity(&self, omega: f64) -> OpticsResult<Complex<f64>> {
        dielectric_function(omega, self.omega_p, self.gamma, self.epsilon_inf)
    }
}

/// Complex relative permittivity of a Drude metal at angular frequency `omega`.
///
/// Fails with `DomainError` when the denominator `omega^2 + i gamma omega`
/// vanishes, which happens exactly at `omega == 0`. With `omega_p == 0` the
/// result is exactly `epsilon_inf`.
pub fn dielectric_function(
    omega: f64,
    omega_p: f64,
    gamma: f64,
    epsilon_inf: f64,
) -> OpticsResult<Complex<f64>> {
    if !omega.is_finite() || omega < 0.0 {
        return Err(OpticsError::invalid(format!(
            "angular frequency must be non-negative, got {}",
            omega
        )));
    }
    if !omega_p.is_finite() || omega_p < 0.0 {
        return Err(OpticsError::invalid(format!(
            "plasma frequency must be non-negative, got {}",
            omega_p
        )));
    }
    if !gamma.is_finite() || gamma < 0.0 {
        return Err(OpticsError::invalid(format!(
            "damping rate must be non-negative, got {}",
            gamma
        )));
    }
    if !epsilon_inf.is_finite() {
        return Err(OpticsError::invalid(format!(
            "epsilon_inf must be finite, got {}",
            epsilon_inf
        )));
    }

    let denominator = Complex::new(omega * omega, gamma * omega);
    if denominator.re == 0.0 && denominator.im == 0.0 {
        return Err(OpticsError::domain(format!(
            "Drude denominator vanishes at omega = {}, gamma = {}",
            omega, gamma
        )));
    }

    // no free electrons: exact identity, skip the division
    if omega_p == 0.0 {
        return Ok(Complex::new(epsilon_inf, 0.0));
    }

    let epsilon =
        Complex::new(epsilon_inf, 0.0) - Complex::new(omega_p * omega_p, 0.0) / denominator;
    if !epsilon.is_finite() {
        return Err(OpticsError::domain(format!(
            "permittivity is not finite at omega = {}",
            omega
        )));
    }
    Ok(epsilon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::wavelength_to_omega;

    #[test]
    fn no_free_electrons_is_exact() {
        for &(omega, gamma) in &[(1e15, 0.0), (3.7e15, 1e14), (1.0, 5e20)] {
            let eps = dielectric_function(omega, 0.0, gamma, 2.25).unwrap();
            assert_eq!(eps.re, 2.25);
            assert_eq!(eps.im, 0.0);
        }
    }

    #[test]
    fn zero_frequency_is_singular() {
        let err = dielectric_function(0.0, 0.0, 0.0, 1.0).unwrap_err();
        assert!(err.is_domain_error());
        let err = dielectric_function(0.0, 1e16, 1e14, 1.0).unwrap_err();
        assert!(err.is_domain_error());
    }

    #[test]
    fn lossless_plasma() {
        // gamma = 0: epsilon = 1 - (omega_p / omega)^2, purely real
        let eps = dielectric_function(2.0, 1.0, 0.0, 1.0).unwrap();
        assert!((eps.re - 0.75).abs() < 1e-15);
        assert!(eps.im.abs() < 1e-15);
    }

    #[test]
    fn gold_600nm() {
        let omega = wavelength_to_omega(600.0).unwrap();
        let eps = dielectric_function(omega, 1.37e16, 1.05e14, 9.84).unwrap();
        // metallic below the plasma frequency and absorbing
        assert!(eps.re < 0.0, "eps: {}", eps);
        assert!(eps.im > 0.0, "eps: {}", eps);
        assert!((eps.re + 9.156).abs() < 1e-2, "eps: {}", eps);
        assert!((eps.im - 0.635).abs() < 1e-2, "eps: {}", eps);
    }

    #[test]
    fn rejects_negative_parameters() {
        assert!(dielectric_function(1e15, -1.0, 0.0, 1.0)
            .unwrap_err()
            .is_invalid_input());
        assert!(dielectric_function(1e15, 1e16, -1.0, 1.0)
            .unwrap_err()
            .is_invalid_input());
        assert!(dielectric_function(-1e15, 1e16, 0.0, 1.0)
            .unwrap_err()
            .is_invalid_input());
    }

    #[test]
    fn params_validation() {
        assert!(DrudeParams::new(1.37e16, 1.05e14, 9.84).is_ok());
        assert!(DrudeParams::new(0.0, 1.05e14, 9.84).is_err());
        assert!(DrudeParams::new(1.37e16, -1.0, 9.84).is_err());
        assert!(DrudeParams::new(1.37e16, 1.05e14, f64::INFINITY).is_err());
    }
}
