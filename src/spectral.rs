//! Reflectance sweeps over several wavelengths.
//!
//! This module drives one angle sweep per configured wavelength for a single
//! metal, the way the reflectance of a metal is usually studied across the
//! visible spectrum. Wavelengths are processed in parallel with rayon while
//! a progress bar reports completed sweeps; results stay in the configured
//! wavelength order.
//!
//! # Key Features
//!
//! - [`SpectralSweep`]: orchestrates the sweeps of one run
//! - All-or-nothing: a failing wavelength fails the run
//! - Per-sweep [`CurveParams`] and a JSON summary for the whole run

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use num_complex::Complex;
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    dielectric::DrudeParams,
    error::OpticsResult,
    output,
    params::CurveParams,
    settings::Settings,
    sweep::{compute_sweep, SweepResult},
};

/// A multi-wavelength reflectance run for one metal.
///
/// **Context**: Comparing reflectance curves at several wavelengths shows
/// how the Drude response shifts from the near infrared to the violet. Each
/// wavelength is an independent sweep.
///
/// **How it Works**: Resolves the metal from the settings once, runs
/// [`compute_sweep`] for every wavelength in parallel, and keeps the results
/// together with their curve parameters for reporting and output.
#[derive(Debug)]
pub struct SpectralSweep {
    pub settings: Settings,
    pub material: String,
    pub params: DrudeParams,
    pub results: Vec<SweepResult>,
}

/// Per-wavelength entry of the run summary.
#[derive(Debug, Clone, Serialize)]
pub struct SweepSummary {
    pub wavelength_nm: f64,
    pub omega: f64,
    pub epsilon: Complex<f64>,
    pub refractive_index: Complex<f64>,
    pub table: String,
    pub params: CurveParams,
}

/// Summary of a whole run, written as `summary.json`.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub material: String,
    pub params: DrudeParams,
    pub incident_dielectric_constant: f64,
    pub sweeps: Vec<SweepSummary>,
}

impl SpectralSweep {
    /// Creates a run from validated settings.
    pub fn new(settings: Settings) -> OpticsResult<Self> {
        let (material, params) = settings.material()?;
        Ok(Self {
            settings,
            material,
            params,
            results: Vec::new(),
        })
    }

    /// Runs one sweep per wavelength.
    ///
    /// **Context**: Sweeps are independent and each is itself parallel over
    /// angles; rayon balances both levels on one pool.
    ///
    /// **How it Works**: Maps every wavelength to a sweep, advancing the
    /// progress bar as sweeps finish, and collects into a `Result` so the
    /// first failure aborts the run and leaves `results` empty.
    pub fn solve(&mut self) -> Result<()> {
        let start = Instant::now();
        info!(
            "Solving {} at {} wavelength(s), {} angles each...",
            self.material,
            self.settings.wavelengths.len(),
            self.settings.sample_count
        );

        let request = self.settings.sweep_request();
        let pb = ProgressBar::new(self.settings.wavelengths.len() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] {bar:40.green/blue} {pos:>5}/{len:5} {msg}",
            )?
            .progress_chars("█▇▆▅▄▃▂▁"),
        );
        pb.set_message("wavelength".to_string());

        self.results.clear();
        let results = self
            .settings
            .wavelengths
            .par_iter()
            .map(|&wavelength| {
                let result = compute_sweep(&self.params, wavelength, &request);
                pb.inc(1);
                result
            })
            .collect::<OpticsResult<Vec<_>>>();
        pb.finish_and_clear();
        self.results = results?;

        let duration = start.elapsed();
        info!(
            "Time taken: {:.2?}, Time per wavelength: {:.2?}",
            duration,
            duration / self.results.len().max(1) as u32
        );

        Ok(())
    }

    /// Name of the table file for a sweep, without extension. Characters
    /// other than ASCII letters, digits, `-` and `_` in the material name
    /// become `_`, so the file always lands in the output directory.
    pub fn table_name(&self, result: &SweepResult) -> String {
        let material: String = self
            .material
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}_{}nm", material, result.wavelength_nm)
    }

    /// Summary of the solved run.
    pub fn summary(&self) -> RunSummary {
        let sweeps = self
            .results
            .iter()
            .map(|result| SweepSummary {
                wavelength_nm: result.wavelength_nm,
                omega: result.omega,
                epsilon: result.epsilon,
                refractive_index: result.n2,
                table: format!("reflectance_{}.dat", self.table_name(result)),
                params: CurveParams::from_sweep(result),
            })
            .collect();
        RunSummary {
            material: self.material.clone(),
            params: self.params,
            incident_dielectric_constant: self.settings.incident_dielectric_constant,
            sweeps,
        }
    }

    /// Writes one table per sweep, the run summary and the resolved settings
    /// into the configured directory. Returns the paths written.
    pub fn writeup(&self) -> Result<Vec<PathBuf>> {
        let directory = &self.settings.directory;
        let mut written = Vec::with_capacity(self.results.len() + 2);
        for result in self.results.iter() {
            written.push(output::write_sweep(result, &self.table_name(result), directory)?);
        }
        written.push(output::write_summary(&self.summary(), directory)?);
        written.push(output::write_settings(&self.settings, directory)?);
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::load_default_config;

    #[test]
    fn keeps_wavelength_order() {
        let mut settings = load_default_config().unwrap();
        settings.wavelengths = vec![700.0, 400.0, 550.0];
        settings.sample_count = 31;
        let mut run = SpectralSweep::new(settings).unwrap();
        run.solve().unwrap();

        let wavelengths: Vec<f64> = run.results.iter().map(|r| r.wavelength_nm).collect();
        assert_eq!(wavelengths, vec![700.0, 400.0, 550.0]);
        assert!(run.results.iter().all(|r| r.len() == 31));
    }

    #[test]
    fn table_names_stay_in_directory() {
        let mut settings = load_default_config().unwrap();
        settings.custom = Some(DrudeParams {
            omega_p: 8.98e15,
            gamma: 2.8e13,
            epsilon_inf: 1.0,
        });
        settings.custom_name = Some("../out/so dium".to_string());
        settings.sample_count = 11;
        let mut run = SpectralSweep::new(settings).unwrap();
        run.solve().unwrap();

        let name = run.table_name(&run.results[0]);
        assert_eq!(name, "___out_so_dium_600nm");
        assert!(!name.contains('/') && !name.contains(".."));
    }

    #[test]
    fn failing_wavelength_fails_run() {
        let mut settings = load_default_config().unwrap();
        settings.wavelengths = vec![500.0, -1.0];
        settings.sample_count = 11;
        let mut run = SpectralSweep::new(settings).unwrap();
        assert!(run.solve().is_err());
        assert!(run.results.is_empty());
    }
}
