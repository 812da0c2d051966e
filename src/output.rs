//! Writing sweep results to disk.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use itertools::Itertools;
use log::info;
use serde::Serialize;

use crate::{settings::Settings, sweep::SweepResult};

/// Writes a sweep as a whitespace separated table `angle_deg R_s R_p`,
/// preceded by a `#` header. Returns the path written.
pub fn write_sweep(result: &SweepResult, name: &str, directory: &Path) -> Result<PathBuf> {
    fs::create_dir_all(directory)
        .with_context(|| format!("failed to create output directory {:?}", directory))?;
    let path = directory.join(format!("reflectance_{}.dat", name));
    let file = File::create(&path).with_context(|| format!("failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);

    writeln!(
        writer,
        "# wavelength_nm={} omega={:e} epsilon={} n2={}",
        result.wavelength_nm, result.omega, result.epsilon, result.n2
    )?;
    writeln!(writer, "# angle_deg R_s R_p")?;
    for sample in result.iter() {
        let row = [sample.angle_deg, sample.r_s, sample.r_p];
        writeln!(writer, "{}", row.iter().join(" "))?;
    }
    writer.flush()?;

    info!("wrote {:?}", path);
    Ok(path)
}

/// Writes any serializable summary as pretty JSON to `summary.json`.
pub fn write_summary<T: Serialize>(summary: &T, directory: &Path) -> Result<PathBuf> {
    fs::create_dir_all(directory)
        .with_context(|| format!("failed to create output directory {:?}", directory))?;
    let path = directory.join("summary.json");
    let file = File::create(&path).with_context(|| format!("failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writer.flush()?;

    info!("wrote {:?}", path);
    Ok(path)
}

/// Writes the resolved run settings to `settings.toml`, so a run can be
/// reproduced by copying it to `config/local.toml`.
pub fn write_settings(settings: &Settings, directory: &Path) -> Result<PathBuf> {
    fs::create_dir_all(directory)
        .with_context(|| format!("failed to create output directory {:?}", directory))?;
    let path = directory.join("settings.toml");
    let toml_string = toml::to_string(settings).context("failed to serialize settings")?;
    fs::write(&path, toml_string).with_context(|| format!("failed to write {:?}", path))?;

    info!("wrote {:?}", path);
    Ok(path)
}
