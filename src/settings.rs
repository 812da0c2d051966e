use std::env;
use std::fmt;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use config::{Config, Environment, File, FileFormat};
use log::{debug, info};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::dielectric::DrudeParams;
use crate::error::OpticsResult;
use crate::materials;
use crate::sweep::SweepRequest;

/// Built-in defaults, the lowest configuration layer.
pub const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Runtime configuration for the application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Name of a preset metal, used unless `custom` is given.
    pub material: String,
    /// Display name of the custom metal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
    /// Wavelengths of the incident light (nm).
    #[serde(deserialize_with = "one_or_many_wavelengths")]
    pub wavelengths: Vec<f64>,
    pub angle_min: f64,
    pub angle_max: f64,
    pub sample_count: usize,
    pub incident_dielectric_constant: f64,
    /// Output directory.
    pub directory: PathBuf,
    /// Custom Drude constants, overriding `material`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<DrudeParams>,
}

impl Settings {
    pub fn sweep_request(&self) -> SweepRequest {
        SweepRequest {
            angle_min: self.angle_min,
            angle_max: self.angle_max,
            sample_count: self.sample_count,
            incident_dielectric_constant: self.incident_dielectric_constant,
        }
    }

    /// Resolves the metal to a display name and its Drude constants.
    pub fn material(&self) -> OpticsResult<(String, DrudeParams)> {
        match self.custom {
            Some(custom) => {
                let params = DrudeParams::new(custom.omega_p, custom.gamma, custom.epsilon_inf)?;
                let name = self.custom_name.clone().unwrap_or_else(|| "custom".to_string());
                Ok((name, params))
            }
            None => {
                let params = materials::lookup(&self.material)?;
                Ok((self.material.trim().to_lowercase(), params))
            }
        }
    }
}

/// Accepts a list of wavelengths, a single number, or space separated
/// numbers in a string; the environment layer yields the latter two.
fn one_or_many_wavelengths<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Entry {
        Number(f64),
        Text(String),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Entries {
        One(Entry),
        Many(Vec<Entry>),
    }

    let entries = match Entries::deserialize(deserializer)? {
        Entries::One(entry) => vec![entry],
        Entries::Many(entries) => entries,
    };
    let mut wavelengths = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            Entry::Number(w) => wavelengths.push(w),
            Entry::Text(text) => {
                for token in text.split_whitespace() {
                    let w = token.parse::<f64>().map_err(|_| {
                        de::Error::custom(format!("invalid wavelength '{}'", token))
                    })?;
                    wavelengths.push(w);
                }
            }
        }
    }
    Ok(wavelengths)
}

/// Loads the built-in defaults only.
pub fn load_default_config() -> Result<Settings> {
    let settings: Config = Config::builder()
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        .build()
        .context("failed to load default configuration")?;

    let config: Settings = settings
        .try_deserialize()
        .context("failed to deserialize default configuration")?;

    validate_config(&config)?;

    Ok(config)
}

/// Loads the configuration from all layers, parsing the process arguments.
pub fn load_config() -> Result<Settings> {
    let args = CliArgs::parse();
    load_config_from(&args)
}

/// Loads the configuration from all layers with the given arguments on top:
/// built-in defaults, `config/local.toml` under the project root if present,
/// `METALREFL_*` environment variables, then the command line.
pub fn load_config_from(args: &CliArgs) -> Result<Settings> {
    let mut builder =
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

    match retrieve_project_root() {
        Some(root) => {
            let local_config = root.join("config/local.toml");
            if local_config.exists() {
                info!("Using local configuration: {:?}", local_config);
            } else {
                debug!("No local configuration at {:?}", local_config);
            }
            builder = builder.add_source(File::from(local_config).required(false));
        }
        None => debug!("No project root found, using built-in defaults"),
    }

    let settings: Config = builder
        .add_source(
            Environment::with_prefix("metalrefl")
                .try_parsing(true)
                .list_separator(" ")
                .with_list_parse_key("wavelengths"),
        )
        .build()
        .context("failed to load configuration")?;

    let mut config: Settings = settings
        .try_deserialize()
        .context("failed to deserialize configuration")?;

    args.apply(&mut config)?;

    validate_config(&config)?;

    debug!("{:#?}", config);

    Ok(config)
}

/// Retrieve the project root directory.
/// This function tries to find the project root directory in different ways:
/// 1. If the CARGO_MANIFEST_DIR environment variable is set, use it.
/// 2. If the METALREFL_ROOT_DIR environment variable is set, use it.
/// 3. If the "config" subdirectory is found in the executable directory or any of its parents, use it.
fn retrieve_project_root() -> Option<PathBuf> {
    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        return Some(PathBuf::from(manifest_dir));
    }
    if let Ok(path) = env::var("METALREFL_ROOT_DIR") {
        return Some(PathBuf::from(path));
    }
    let exe_path = env::current_exe().ok()?;
    exe_path
        .ancestors()
        .skip(1)
        .find(|dir| dir.join("config").is_dir())
        .map(PathBuf::from)
}

/// Checks a resolved configuration before any computation starts.
pub fn validate_config(config: &Settings) -> Result<()> {
    if config.wavelengths.is_empty() {
        return Err(anyhow!("At least one wavelength is required"));
    }
    if let Some(bad) = config
        .wavelengths
        .iter()
        .find(|w| !w.is_finite() || **w <= 0.0)
    {
        return Err(anyhow!("Wavelength must be greater than 0, got {}", bad));
    }
    let mut sorted = config.wavelengths.clone();
    sorted.sort_by(f64::total_cmp);
    if let Some(pair) = sorted.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(anyhow!("Wavelength {} nm is listed more than once", pair[0]));
    }
    config.sweep_request().validate()?;
    config.material()?;
    Ok(())
}

#[derive(Parser, Debug, Default)]
#[command(version, about = "metalrefl - reflectance of Drude metals at oblique incidence")]
pub struct CliArgs {
    /// Preset metal: gold, silver, copper, aluminum or nickel (case-insensitive).
    #[arg(short, long)]
    metal: Option<String>,

    /// Custom Drude constants: plasma frequency (rad/s), damping rate (rad/s)
    /// and high-frequency dielectric constant. Overrides --metal.
    #[arg(
        long,
        num_args = 3,
        value_delimiter = ' ',
        value_names = ["OMEGA_P", "GAMMA", "EPS_INF"],
        allow_negative_numbers = true
    )]
    custom: Option<Vec<f64>>,

    /// Display name for a custom metal.
    #[arg(long)]
    name: Option<String>,

    /// Wavelengths of the incident light in nm, separated by spaces.
    /// One sweep is computed per wavelength.
    #[arg(short, long, num_args = 1.., value_delimiter = ' ')]
    wavelength: Option<Vec<f64>>,

    /// Lower bound of the incidence angle sweep in degrees.
    #[arg(long)]
    min: Option<f64>,

    /// Upper bound of the incidence angle sweep in degrees.
    #[arg(long)]
    max: Option<f64>,

    /// Number of incidence angles, both bounds included.
    #[arg(short = 'n', long)]
    samples: Option<usize>,

    /// Dielectric constant of the incident medium.
    #[arg(long)]
    eps1: Option<f64>,

    /// Output directory.
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Choose the metal and wavelength at interactive prompts.
    #[arg(short, long)]
    pub interactive: bool,

    /// Print the preset metals and exit.
    #[arg(long)]
    pub list: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CliArgs {
    /// Overrides configuration values with those given on the command line.
    fn apply(&self, config: &mut Settings) -> Result<()> {
        if let Some(metal) = &self.metal {
            config.material = metal.clone();
            config.custom = None;
        }
        if let Some(custom) = &self.custom {
            let [omega_p, gamma, epsilon_inf] = custom[..] else {
                return Err(anyhow!(
                    "--custom requires exactly three values, got {}",
                    custom.len()
                ));
            };
            config.custom = Some(DrudeParams {
                omega_p,
                gamma,
                epsilon_inf,
            });
        }
        if let Some(name) = &self.name {
            config.custom_name = Some(name.clone());
        }
        if let Some(wavelengths) = &self.wavelength {
            config.wavelengths = wavelengths.clone();
        }
        if let Some(min) = self.min {
            config.angle_min = min;
        }
        if let Some(max) = self.max {
            config.angle_max = max;
        }
        if let Some(samples) = self.samples {
            config.sample_count = samples;
        }
        if let Some(eps1) = self.eps1 {
            config.incident_dielectric_constant = eps1;
        }
        if let Some(dir) = &self.dir {
            config.directory = dir.clone();
        }
        Ok(())
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let metal = match &self.custom {
            Some(c) => format!(
                "{} (omega_p = {:e} rad/s, gamma = {:e} rad/s, epsilon_inf = {})",
                self.custom_name.as_deref().unwrap_or("custom"),
                c.omega_p,
                c.gamma,
                c.epsilon_inf
            ),
            None => self.material.clone(),
        };
        write!(
            f,
            "Settings:
  - Metal: {}
  - Wavelengths (nm): {:?}
  - Angles (deg): {} to {} in {} samples
  - Incident Dielectric Constant: {}
  - Output Directory: {}
  ",
            metal,
            self.wavelengths,
            self.angle_min,
            self.angle_max,
            self.sample_count,
            self.incident_dielectric_constant,
            self.directory.display(),
        )
    }
}
