//! Domain types for the VPS inventory.
//!
//! [`VpsRecord`] is the persisted entity; [`CreateVps`] and [`PatchVps`]
//! are the raw request payloads before validation. Request fields are wide
//! (`Option<i64>`) on purpose: absent fields and negative values must reach
//! the validator, which reports every violation at once, instead of being
//! rejected one at a time during deserialization.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ── Status ─────────────────────────────────────────────────────────

/// Lifecycle status of a virtual server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VpsStatus {
    Started,
    Stopped,
    Blocked,
}

impl VpsStatus {
    /// All statuses, in declared order. Error messages enumerate them in
    /// exactly this order.
    pub const CHOICES: [VpsStatus; 3] = [VpsStatus::Started, VpsStatus::Stopped, VpsStatus::Blocked];

    /// The lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            VpsStatus::Started => "started",
            VpsStatus::Stopped => "stopped",
            VpsStatus::Blocked => "blocked",
        }
    }

    /// Parse a wire name. Returns `None` for anything outside the enum.
    pub fn parse(value: &str) -> Option<VpsStatus> {
        Self::CHOICES.iter().copied().find(|s| s.as_str() == value)
    }

    /// Comma-separated list of the wire names, declared order.
    pub fn choices() -> String {
        Self::CHOICES
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for VpsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Record ─────────────────────────────────────────────────────────

/// A persisted virtual server record.
///
/// The wire shape is exactly these five fields; there is no generic field
/// introspection anywhere, so nothing internal can leak into responses.
///
/// Invariants held in persisted state: `cpu`, `ram`, `hdd` are within the
/// configured bounds, `ram` is even, and `id` never changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VpsRecord {
    pub id: Uuid,
    pub cpu: u32,
    /// GiB of memory, always even.
    pub ram: u32,
    /// GiB of disk.
    pub hdd: u32,
    pub status: VpsStatus,
}

impl VpsRecord {
    /// Key for the records table.
    pub fn table_key(&self) -> String {
        self.id.to_string()
    }
}

// ── Request payloads ───────────────────────────────────────────────

/// Raw create payload. A client-supplied `id` is not modeled here and is
/// therefore ignored; ids are always server-generated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateVps {
    pub cpu: Option<i64>,
    pub ram: Option<i64>,
    pub hdd: Option<i64>,
    /// Absent means the default status (`blocked`).
    pub status: Option<String>,
}

/// Raw partial-update payload. Every field present is validated, but only
/// `status` is ever applied to the stored record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatchVps {
    pub cpu: Option<i64>,
    pub ram: Option<i64>,
    pub hdd: Option<i64>,
    pub status: Option<String>,
}
