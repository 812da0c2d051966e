/// Speed of light in vacuum (m/s), as used by the frequency conversion.
pub const SPEED_OF_LIGHT: f64 = 3e8;
/// Nanometres to metres.
pub const NM_TO_M: f64 = 1e-9;
/// Lower bound of the default incidence-angle sweep (degrees).
pub const DEFAULT_ANGLE_MIN: f64 = 0.0;
/// Upper bound of the default incidence-angle sweep (degrees). Grazing incidence.
pub const DEFAULT_ANGLE_MAX: f64 = 90.0;
/// Number of incidence angles in the default sweep.
pub const DEFAULT_SAMPLE_COUNT: usize = 1000;
/// Dielectric constant of the incident medium (vacuum/air).
pub const DEFAULT_INCIDENT_DIELECTRIC_CONSTANT: f64 = 1.0;
/// Reflectances further than this outside `[0, 1]` are reported as unphysical.
pub const REFLECTANCE_TOLERANCE: f64 = 1e-9;
