//! Python bindings, built with the `python` feature.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::{
    dielectric::DrudeParams,
    error::OpticsError,
    materials,
    sweep::{compute_sweep, SweepRequest, SweepResult},
};

impl From<OpticsError> for PyErr {
    fn from(err: OpticsError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

type Curves = (Vec<f64>, Vec<f64>, Vec<f64>);

fn into_curves(result: SweepResult) -> Curves {
    let angles = result.samples.iter().map(|s| s.angle_deg).collect();
    let r_s = result.samples.iter().map(|s| s.r_s).collect();
    let r_p = result.samples.iter().map(|s| s.r_p).collect();
    (angles, r_s, r_p)
}

/// Reflectance of a preset metal. Returns `(angles, R_s, R_p)`.
#[pyfunction]
#[pyo3(signature = (metal, wavelength_nm, angle_min=0.0, angle_max=90.0, sample_count=1000, incident_dielectric_constant=1.0))]
fn sweep_preset(
    metal: String,
    wavelength_nm: f64,
    angle_min: f64,
    angle_max: f64,
    sample_count: usize,
    incident_dielectric_constant: f64,
) -> PyResult<Curves> {
    let params = materials::lookup(&metal)?;
    let request = SweepRequest {
        angle_min,
        angle_max,
        sample_count,
        incident_dielectric_constant,
    };
    Ok(into_curves(compute_sweep(&params, wavelength_nm, &request)?))
}

/// Reflectance of a metal given by its Drude constants. Returns
/// `(angles, R_s, R_p)`.
#[pyfunction]
#[pyo3(signature = (omega_p, gamma, epsilon_inf, wavelength_nm, angle_min=0.0, angle_max=90.0, sample_count=1000, incident_dielectric_constant=1.0))]
#[allow(clippy::too_many_arguments)]
fn sweep_custom(
    omega_p: f64,
    gamma: f64,
    epsilon_inf: f64,
    wavelength_nm: f64,
    angle_min: f64,
    angle_max: f64,
    sample_count: usize,
    incident_dielectric_constant: f64,
) -> PyResult<Curves> {
    let params = DrudeParams::new(omega_p, gamma, epsilon_inf)?;
    let request = SweepRequest {
        angle_min,
        angle_max,
        sample_count,
        incident_dielectric_constant,
    };
    Ok(into_curves(compute_sweep(&params, wavelength_nm, &request)?))
}

/// Drude constants `(omega_p, gamma, epsilon_inf)` of a preset metal.
#[pyfunction]
fn lookup_material(name: String) -> PyResult<(f64, f64, f64)> {
    let p = materials::lookup(&name)?;
    Ok((p.omega_p, p.gamma, p.epsilon_inf))
}

#[pymodule]
fn metalrefl(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(sweep_preset, m)?)?;
    m.add_function(wrap_pyfunction!(sweep_custom, m)?)?;
    m.add_function(wrap_pyfunction!(lookup_material, m)?)?;
    m.add("MATERIALS", materials::names().collect::<Vec<_>>())?;
    Ok(())
}
