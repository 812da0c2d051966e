//! Reflectance of metal surfaces under visible light.
//!
//! A metal is described by its Drude constants; for a given wavelength the
//! crate evaluates the complex permittivity, solves the generalized Snell's
//! law and computes the Fresnel power reflectances for s- and p-polarized
//! light over a sweep of incidence angles.
//!
//! ```no_run
//! use metalrefl::{materials, sweep::{compute_sweep, SweepRequest}};
//!
//! let gold = materials::lookup("gold")?;
//! let result = compute_sweep(&gold, 600.0, &SweepRequest::default())?;
//! for sample in result.iter() {
//!     println!("{} {} {}", sample.angle_deg, sample.r_s, sample.r_p);
//! }
//! # Ok::<(), metalrefl::error::OpticsError>(())
//! ```

pub mod config;
pub mod dielectric;
pub mod error;
pub mod fresnel;
pub mod frequency;
pub mod materials;
pub mod output;
pub mod params;
pub mod prompt;
#[cfg(feature = "python")]
pub mod python;
pub mod settings;
pub mod snell;
pub mod spectral;
pub mod sweep;

pub use dielectric::{dielectric_function, DrudeParams};
pub use error::{OpticsError, OpticsResult};
pub use frequency::wavelength_to_omega;
pub use sweep::{compute_sweep, ReflectanceSample, SweepRequest, SweepResult};
