//! Wavelength to angular frequency conversion.

use std::f64::consts::PI;

use crate::config::{NM_TO_M, SPEED_OF_LIGHT};
use crate::error::{OpticsError, OpticsResult};


/// Converts a vacuum wavelength in nanometres to angular frequency in rad/s,
/// `omega = 2 pi c / lambda`.
pub fn wavelength_to_omega(lambda_nm: f64) -> OpticsResult<f64> {
    if !lambda_nm.is_finite() || lambda_nm <= 0.0 {
        return Err(OpticsError::invalid(format!(
            "wavelength must be a positive number of nm, got {}",
            lambda_nm
        )));
    }
    let lambda_m = lambda_nm * NM_TO_M;
    let omega = 2.0 * PI * SPEED_OF_LIGHT / lambda_m;
    if !omega.is_finite() {
        return Err(OpticsError::invalid(format!(
            "wavelength of {:e} nm is too small for a finite angular frequency",
            lambda_nm
        )));
    }
    Ok(omega)
}
