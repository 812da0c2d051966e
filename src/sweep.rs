//! Incidence-angle sweep of the reflectance of a Drude metal.
//!
//! A sweep fixes the metal and the wavelength, so the permittivity and the
//! metal's refractive index are computed once; the angle grid is then
//! evaluated in parallel, each angle independently of the others. Results
//! come back in ascending angle order regardless of scheduling.

use log::{debug, warn};
use ndarray::Array1;
use num_complex::Complex;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    config::{
        DEFAULT_ANGLE_MAX, DEFAULT_ANGLE_MIN, DEFAULT_INCIDENT_DIELECTRIC_CONSTANT,
        DEFAULT_SAMPLE_COUNT, REFLECTANCE_TOLERANCE,
    },
    dielectric::DrudeParams,
    error::{OpticsError, OpticsResult},
    fresnel::{self, Reflectance},
    frequency::wavelength_to_omega,
    snell::{refractive_index, Refraction},
};

/// Angle grid and incident medium of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRequest {
    /// First angle of the grid (degrees).
    pub angle_min: f64,
    /// Last angle of the grid (degrees).
    pub angle_max: f64,
    /// Number of angles, both endpoints included.
    pub sample_count: usize,
    /// Relative permittivity of the incident medium.
    pub incident_dielectric_constant: f64,
}

impl Default for SweepRequest {
    fn default() -> Self {
        Self {
            angle_min: DEFAULT_ANGLE_MIN,
            angle_max: DEFAULT_ANGLE_MAX,
            sample_count: DEFAULT_SAMPLE_COUNT,
            incident_dielectric_constant: DEFAULT_INCIDENT_DIELECTRIC_CONSTANT,
        }
    }
}

impl SweepRequest {
    /// Checks the angle bounds, the sample count and the incident medium.
    pub fn validate(&self) -> OpticsResult<()> {
        let in_range = |a: f64| a.is_finite() && (0.0..=90.0).contains(&a);
        if !in_range(self.angle_min) || !in_range(self.angle_max) {
            return Err(OpticsError::invalid(format!(
                "angle bounds must lie in [0, 90] degrees, got [{}, {}]",
                self.angle_min, self.angle_max
            )));
        }
        match self.sample_count {
            0 => {
                return Err(OpticsError::invalid("sample count must be at least 1"));
            }
            1 if self.angle_min != self.angle_max => {
                return Err(OpticsError::invalid(format!(
                    "a single sample needs angle_min == angle_max, got [{}, {}]",
                    self.angle_min, self.angle_max
                )));
            }
            n if n > 1 && self.angle_min >= self.angle_max => {
                return Err(OpticsError::invalid(format!(
                    "angle_min must be below angle_max, got [{}, {}]",
                    self.angle_min, self.angle_max
                )));
            }
            _ => {}
        }
        let eps1 = self.incident_dielectric_constant;
        if !eps1.is_finite() || eps1 <= 0.0 {
            return Err(OpticsError::invalid(format!(
                "incident dielectric constant must be positive, got {}",
                eps1
            )));
        }
        Ok(())
    }
}

/// Reflectance at one incidence angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReflectanceSample {
    pub angle_deg: f64,
    pub r_s: f64,
    pub r_p: f64,
}

impl ReflectanceSample {
    fn new(angle_deg: f64, reflectance: Reflectance) -> Self {
        Self {
            angle_deg,
            r_s: reflectance.r_s,
            r_p: reflectance.r_p,
        }
    }

    pub fn reflectance(&self) -> Reflectance {
        Reflectance {
            r_s: self.r_s,
            r_p: self.r_p,
        }
    }

    /// Reflectance for unpolarized light.
    pub fn unpolarized(&self) -> f64 {
        self.reflectance().unpolarized()
    }
}

/// Reflectance samples in ascending angle order, together with the optical
/// quantities shared by all of them.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    /// Wavelength of the incident light (nm).
    pub wavelength_nm: f64,
    /// Angular frequency of the incident light (rad/s).
    pub omega: f64,
    /// Permittivity of the metal at `omega`.
    pub epsilon: Complex<f64>,
    /// Refractive index of the metal at `omega`.
    pub n2: Complex<f64>,
    pub samples: Vec<ReflectanceSample>,
}

impl SweepResult {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReflectanceSample> {
        self.samples.iter()
    }

    pub fn angles(&self) -> Array1<f64> {
        self.samples.iter().map(|s| s.angle_deg).collect()
    }

    pub fn r_s(&self) -> Array1<f64> {
        self.samples.iter().map(|s| s.r_s).collect()
    }

    pub fn r_p(&self) -> Array1<f64> {
        self.samples.iter().map(|s| s.r_p).collect()
    }

    pub fn unpolarized(&self) -> Array1<f64> {
        self.samples.iter().map(|s| s.unpolarized()).collect()
    }
}

/// Evenly spaced ascending angles over `[angle_min, angle_max]`, both ends
/// included. The last entry is exactly `angle_max`.
pub fn angle_grid(request: &SweepRequest) -> OpticsResult<Array1<f64>> {
    request.validate()?;
    let n = request.sample_count;
    let mut grid = Array1::linspace(request.angle_min, request.angle_max, n);
    // linspace accumulates rounding in the final step
    grid[n - 1] = request.angle_max;
    // spacing below one ulp of the angles repeats grid values
    if grid.iter().zip(grid.iter().skip(1)).any(|(a, b)| a >= b) {
        return Err(OpticsError::invalid(format!(
            "{} samples over [{}, {}] degrees are not strictly ascending",
            n, request.angle_min, request.angle_max
        )));
    }
    Ok(grid)
}

/// Computes the s- and p-reflectance of a Drude metal over a grid of
/// incidence angles.
///
/// **Context**: The reflectance curve of a metal against incidence angle is
/// the main output of the calculator. All angles share the same wavelength,
/// hence the same permittivity and metal index.
///
/// **How it Works**: Converts the wavelength to angular frequency, evaluates
/// the Drude permittivity and both refractive indices once, then solves the
/// generalized Snell's law and the Fresnel equations for every angle in
/// parallel. Any failure fails the whole sweep; no partial result is
/// returned.
pub fn compute_sweep(
    params: &DrudeParams,
    wavelength_nm: f64,
    request: &SweepRequest,
) -> OpticsResult<SweepResult> {
    let omega = wavelength_to_omega(wavelength_nm)?;
    let epsilon = params.permittivity(omega)?;
    let grid = angle_grid(request)?;

    let n1 = refractive_index(Complex::new(request.incident_dielectric_constant, 0.0));
    let n2 = refractive_index(epsilon);

    debug!(
        "sweep at {} nm: omega = {:.6e} rad/s, epsilon = {:.6}, n2 = {:.6}",
        wavelength_nm, omega, epsilon, n2
    );

    let samples = grid
        .to_vec()
        .par_iter()
        .map(|&angle| {
            let refraction = Refraction::solve(angle, n1, n2)?;
            let reflectance = fresnel::reflectance(&refraction)?;
            Ok(ReflectanceSample::new(angle, reflectance))
        })
        .collect::<OpticsResult<Vec<_>>>()?;

    if let Some(sample) = samples
        .iter()
        .find(|s| !s.reflectance().is_physical(REFLECTANCE_TOLERANCE))
    {
        warn!(
            "reflectance outside [0, 1] at {} deg ({} nm): R_s = {}, R_p = {}",
            sample.angle_deg, wavelength_nm, sample.r_s, sample.r_p
        );
    }

    Ok(SweepResult {
        wavelength_nm,
        omega,
        epsilon,
        n2,
        samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials;

    fn request(angle_min: f64, angle_max: f64, sample_count: usize) -> SweepRequest {
        SweepRequest {
            angle_min,
            angle_max,
            sample_count,
            ..SweepRequest::default()
        }
    }

    #[test]
    fn grid_endpoints() {
        let grid = angle_grid(&SweepRequest::default()).unwrap();
        assert_eq!(grid.len(), 1000);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[999], 90.0);
        assert!(grid.to_vec().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn single_sample_grid() {
        let grid = angle_grid(&request(45.0, 45.0, 1)).unwrap();
        assert_eq!(grid.to_vec(), vec![45.0]);
        assert!(angle_grid(&request(0.0, 90.0, 1)).is_err());
    }

    #[test]
    fn span_below_resolution_is_rejected() {
        let tiny = request(45.0, 45.0 + 1e-13, 100);
        assert!(tiny.validate().is_ok());
        assert!(angle_grid(&tiny).unwrap_err().is_invalid_input());
        let gold = materials::lookup("gold").unwrap();
        let err = compute_sweep(&gold, 600.0, &tiny).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn invalid_requests() {
        assert!(request(0.0, 90.0, 0).validate().unwrap_err().is_invalid_input());
        assert!(request(-5.0, 90.0, 10).validate().unwrap_err().is_invalid_input());
        assert!(request(0.0, 95.0, 10).validate().unwrap_err().is_invalid_input());
        assert!(request(60.0, 30.0, 10).validate().unwrap_err().is_invalid_input());
        assert!(request(30.0, 30.0, 10).validate().unwrap_err().is_invalid_input());
        let bad_medium = SweepRequest {
            incident_dielectric_constant: 0.0,
            ..SweepRequest::default()
        };
        assert!(bad_medium.validate().unwrap_err().is_invalid_input());
    }

    #[test]
    fn gold_sweep_shape() {
        let gold = materials::lookup("gold").unwrap();
        let result = compute_sweep(&gold, 600.0, &request(0.0, 90.0, 91)).unwrap();
        assert_eq!(result.len(), 91);
        for s in result.iter() {
            assert!((0.0..=1.0).contains(&s.r_s), "{:?}", s);
            assert!((0.0..=1.0).contains(&s.r_p), "{:?}", s);
            // p-reflectance of a metal never exceeds s-reflectance
            assert!(s.r_p <= s.r_s + 1e-12, "{:?}", s);
        }
        assert_eq!(result.angles()[90], 90.0);
    }

    #[test]
    fn wavelength_error_propagates() {
        let gold = materials::lookup("gold").unwrap();
        let err = compute_sweep(&gold, -1.0, &SweepRequest::default()).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn degenerate_medium_fails_whole_sweep() {
        // omega_p = 0 and epsilon_inf = 1 make the metal indistinguishable
        // from vacuum; the grazing sample has a zero Fresnel denominator
        let vacuum_like = DrudeParams {
            omega_p: 0.0,
            gamma: 0.0,
            epsilon_inf: 1.0,
        };
        let err = compute_sweep(&vacuum_like, 600.0, &request(0.0, 90.0, 10)).unwrap_err();
        assert!(err.is_domain_error());
        assert!(compute_sweep(&vacuum_like, 600.0, &request(0.0, 80.0, 10)).is_ok());
    }
}
