//! Fixed catalog of Drude constants for common metals.
//!
//! The catalog is immutable static data; [`lookup`] is the only way in.

use crate::dielectric::DrudeParams;
use crate::error::{OpticsError, OpticsResult};

/// A named catalog entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub name: &'static str,
    pub params: DrudeParams,
}

const fn entry(name: &'static str, omega_p: f64, gamma: f64, epsilon_inf: f64) -> Material {
    Material {
        name,
        params: DrudeParams {
            omega_p,
            gamma,
            epsilon_inf,
        },
    }
}

/// Preset metals, in menu order.
pub static CATALOG: [Material; 5] = [
    entry("gold", 1.37e16, 1.05e14, 9.84),
    entry("silver", 1.38e16, 2.73e13, 3.7),
    entry("copper", 1.32e16, 1.22e14, 10.8),
    entry("aluminum", 2.24e16, 1.21e14, 1.0),
    entry("nickel", 1.83e16, 1.58e15, 1.0),
];

/// Looks up a preset by name, ignoring case and surrounding whitespace.
pub fn lookup(name: &str) -> OpticsResult<DrudeParams> {
    let key = name.trim();
    CATALOG
        .iter()
        .find(|m| m.name.eq_ignore_ascii_case(key))
        .map(|m| m.params)
        .ok_or_else(|| {
            OpticsError::invalid(format!(
                "unknown material '{}', expected one of: {}",
                name,
                names().collect::<Vec<_>>().join(", ")
            ))
        })
}

/// Names of all presets, in menu order.
pub fn names() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|m| m.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive() {
        let gold = lookup("gold").unwrap();
        assert_eq!(lookup("Gold").unwrap(), gold);
        assert_eq!(lookup("  GOLD ").unwrap(), gold);
        assert_eq!(gold.omega_p, 1.37e16);
        assert_eq!(gold.gamma, 1.05e14);
        assert_eq!(gold.epsilon_inf, 9.84);
    }

    #[test]
    fn all_presets_are_valid() {
        for m in CATALOG.iter() {
            let p = m.params;
            assert!(DrudeParams::new(p.omega_p, p.gamma, p.epsilon_inf).is_ok(), "{}", m.name);
        }
        assert_eq!(names().count(), 5);
    }

    #[test]
    fn unknown_material() {
        let err = lookup("unobtainium").unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("unobtainium"));
    }
}
