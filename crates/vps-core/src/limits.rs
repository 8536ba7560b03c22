//! Resource bounds configuration.
//!
//! Each numeric field of a record carries an inclusive [min, max] bound.
//! Bounds are loaded from a `limits.toml` file and injected into the
//! [`Validator`](crate::Validator); nothing reads them from global state.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Inclusive [min, max] bound for one resource field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bounds {
    pub min: u32,
    pub max: u32,
}

/// Configured bounds for every numeric record field.
///
/// ```toml
/// [cpu]
/// min = 1
/// max = 64
///
/// [ram]
/// min = 2
/// max = 64
///
/// [hdd]
/// min = 5
/// max = 4096
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VpsLimits {
    pub cpu: Bounds,
    pub ram: Bounds,
    pub hdd: Bounds,
}

impl Default for VpsLimits {
    fn default() -> Self {
        VpsLimits {
            cpu: Bounds { min: 1, max: 64 },
            ram: Bounds { min: 2, max: 64 },
            hdd: Bounds { min: 5, max: 4096 },
        }
    }
}

impl VpsLimits {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let limits: VpsLimits = toml::from_str(&content)?;
        Ok(limits)
    }
}
