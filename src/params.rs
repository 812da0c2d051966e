//! Scalar parameters derived from a reflectance curve.
//!
//! These condense a sweep into a few numbers that are easy to compare
//! between metals and wavelengths:
//!
//! - **Normal-incidence reflectance**: `R` at 0 degrees, where s and p coincide
//! - **Pseudo-Brewster angle**: angle of minimum `R_p`; for a metal `R_p`
//!   dips but does not reach zero
//! - **Angle-averaged reflectances**: mean of `R_s`, `R_p` and the
//!   unpolarized reflectance over the swept range

use ndarray::{s, Array1};
use ndarray_stats::QuantileExt;
use serde::{Deserialize, Serialize};

use crate::sweep::SweepResult;


/// Trapezoidal integral of `y` over the abscissae `x`.
pub fn integrate_trapezoidal(x: &Array1<f64>, y: &Array1<f64>) -> f64 {
    let dx = &x.slice(s![1..]) - &x.slice(s![..-1]);
    let avg_y = (&y.slice(s![1..]) + &y.slice(s![..-1])) / 2.0;
    (dx * avg_y).sum()
}

/// Parameters derived from a reflectance sweep.
///
/// **Context**: A full curve is awkward to compare across metals or
/// wavelengths; a handful of characteristic numbers is not.
///
/// **How it Works**: Values are optional since not every sweep defines them.
/// The normal-incidence value needs a grid starting at 0 degrees, and the
/// averages need at least two distinct angles.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct CurveParams {
    pub normal_reflectance: Option<f64>,
    pub pseudo_brewster_angle: Option<f64>,
    pub min_r_p: Option<f64>,
    pub mean_r_s: Option<f64>,
    pub mean_r_p: Option<f64>,
    pub mean_unpolarized: Option<f64>,
}

impl CurveParams {
    /// Creates empty parameter storage.
    pub fn new() -> Self {
        Self {
            normal_reflectance: None,
            pseudo_brewster_angle: None,
            min_r_p: None,
            mean_r_s: None,
            mean_r_p: None,
            mean_unpolarized: None,
        }
    }

    pub fn from_sweep(sweep: &SweepResult) -> Self {
        let mut params = Self::new();
        let (Some(first), Some(last)) = (sweep.samples.first(), sweep.samples.last()) else {
            return params;
        };

        if first.angle_deg == 0.0 {
            params.normal_reflectance = Some(first.r_s);
        }

        let r_p = sweep.r_p();
        if let Ok(index) = r_p.argmin() {
            params.pseudo_brewster_angle = Some(sweep.samples[index].angle_deg);
            params.min_r_p = Some(r_p[index]);
        }

        let span = last.angle_deg - first.angle_deg;
        if sweep.len() > 1 && span > 0.0 {
            let angles = sweep.angles();
            let mean = |y: &Array1<f64>| integrate_trapezoidal(&angles, y) / span;
            params.mean_r_s = Some(mean(&sweep.r_s()));
            params.mean_r_p = Some(mean(&r_p));
            params.mean_unpolarized = Some(mean(&sweep.unpolarized()));
        }

        params
    }
}

impl Default for CurveParams {
    fn default() -> Self {
        Self::new()
    }
}
