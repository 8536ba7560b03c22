//! Field validation and normalization.
//!
//! The validator checks every field and reports the union of all
//! violations at once — callers get one aggregated mapping of
//! field → ordered message list, never just the first failure.
//! Persistence only happens after the whole payload validates.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::limits::{Bounds, VpsLimits};
use crate::types::{CreateVps, PatchVps, VpsStatus};

/// A single field-level violation. `Display` is the wire message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Ensure this value is greater than or equal to {0}.")]
    BelowMin(u32),

    #[error("Ensure this value is less than or equal to {0}.")]
    AboveMax(u32),

    #[error("Invalid status. Please select a valid option from ({0}).")]
    InvalidChoice(String),

    #[error("This field is required.")]
    Required,
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Aggregated validation failures, keyed by field name.
///
/// Serializes as the wire error body: an object mapping each violated
/// field to its ordered list of message strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<ValidationError>>);

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, error: ValidationError) {
        self.0.entry(field).or_default().push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Violations recorded for one field, if any.
    pub fn field(&self, field: &str) -> Option<&[ValidationError]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }
}

/// A fully validated record-in-progress: normalized values, no id yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VpsDraft {
    pub cpu: u32,
    pub ram: u32,
    pub hdd: u32,
    pub status: VpsStatus,
}

/// Field validator with injected bounds.
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    limits: VpsLimits,
}

fn check_bounds(value: i64, bounds: Bounds) -> Result<u32, ValidationError> {
    if value < i64::from(bounds.min) {
        return Err(ValidationError::BelowMin(bounds.min));
    }
    if value > i64::from(bounds.max) {
        return Err(ValidationError::AboveMax(bounds.max));
    }
    Ok(value as u32)
}

impl Validator {
    pub fn new(limits: VpsLimits) -> Self {
        Validator { limits }
    }

    pub fn validate_cpu(&self, value: i64) -> Result<u32, ValidationError> {
        check_bounds(value, self.limits.cpu)
    }

    /// Validate ram. Odd values round DOWN to the nearest even number
    /// before the range check, so e.g. an odd input one above the maximum
    /// still normalizes into range.
    pub fn validate_ram(&self, value: i64) -> Result<u32, ValidationError> {
        let value = if value % 2 != 0 { value - 1 } else { value };
        check_bounds(value, self.limits.ram)
    }

    pub fn validate_hdd(&self, value: i64) -> Result<u32, ValidationError> {
        check_bounds(value, self.limits.hdd)
    }

    pub fn validate_status(&self, value: &str) -> Result<VpsStatus, ValidationError> {
        VpsStatus::parse(value)
            .ok_or_else(|| ValidationError::InvalidChoice(VpsStatus::choices()))
    }

    /// Validate a full create payload. Checks every field and returns the
    /// union of all violations; nothing short-circuits. `cpu`, `ram` and
    /// `hdd` are required; an absent `status` defaults to `blocked`.
    pub fn check_create(&self, input: &CreateVps) -> Result<VpsDraft, FieldErrors> {
        let mut errors = FieldErrors::default();

        let cpu = self.required(input.cpu, "cpu", &mut errors, |v| self.validate_cpu(v));
        let ram = self.required(input.ram, "ram", &mut errors, |v| self.validate_ram(v));
        let hdd = self.required(input.hdd, "hdd", &mut errors, |v| self.validate_hdd(v));

        let status = match &input.status {
            None => Some(VpsStatus::Blocked),
            Some(raw) => match self.validate_status(raw) {
                Ok(status) => Some(status),
                Err(e) => {
                    errors.push("status", e);
                    None
                }
            },
        };

        if !errors.is_empty() {
            return Err(errors);
        }
        // All four are Some when no errors were recorded.
        Ok(VpsDraft {
            cpu: cpu.unwrap(),
            ram: ram.unwrap(),
            hdd: hdd.unwrap(),
            status: status.unwrap(),
        })
    }

    /// Validate a partial-update payload. Every field present is checked
    /// (a bad `ram` in a patch is still a reported violation), but only a
    /// validated `status` is returned for application.
    pub fn check_patch(&self, input: &PatchVps) -> Result<Option<VpsStatus>, FieldErrors> {
        let mut errors = FieldErrors::default();

        if let Some(value) = input.cpu {
            if let Err(e) = self.validate_cpu(value) {
                errors.push("cpu", e);
            }
        }
        if let Some(value) = input.ram {
            if let Err(e) = self.validate_ram(value) {
                errors.push("ram", e);
            }
        }
        if let Some(value) = input.hdd {
            if let Err(e) = self.validate_hdd(value) {
                errors.push("hdd", e);
            }
        }

        let status = match &input.status {
            None => None,
            Some(raw) => match self.validate_status(raw) {
                Ok(status) => Some(status),
                Err(e) => {
                    errors.push("status", e);
                    None
                }
            },
        };

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(status)
    }

    fn required(
        &self,
        value: Option<i64>,
        field: &'static str,
        errors: &mut FieldErrors,
        check: impl Fn(i64) -> Result<u32, ValidationError>,
    ) -> Option<u32> {
        match value {
            None => {
                errors.push(field, ValidationError::Required);
                None
            }
            Some(v) => match check(v) {
                Ok(v) => Some(v),
                Err(e) => {
                    errors.push(field, e);
                    None
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> Validator {
        Validator::new(VpsLimits::default())
    }

    fn create(cpu: i64, ram: i64, hdd: i64, status: &str) -> CreateVps {
        CreateVps {
            cpu: Some(cpu),
            ram: Some(ram),
            hdd: Some(hdd),
            status: Some(status.to_string()),
        }
    }

    // ── Ram normalization ──────────────────────────────────────────

    #[test]
    fn odd_ram_rounds_down_to_even() {
        let v = validator();
        assert_eq!(v.validate_ram(17).unwrap(), 16);
        assert_eq!(v.validate_ram(33).unwrap(), 32);
        assert_eq!(v.validate_ram(3).unwrap(), 2);
    }

    #[test]
    fn even_ram_is_unchanged() {
        let v = validator();
        assert_eq!(v.validate_ram(32).unwrap(), 32);
        assert_eq!(v.validate_ram(64).unwrap(), 64);
    }

    #[test]
    fn ram_normalizes_before_the_range_check() {
        // 65 is above the max, but rounds down to 64 first.
        assert_eq!(validator().validate_ram(65).unwrap(), 64);
    }

    #[test]
    fn ram_above_max_after_normalization_fails() {
        let err = validator().validate_ram(320).unwrap_err();
        assert_eq!(err, ValidationError::AboveMax(64));
        assert_eq!(err.to_string(), "Ensure this value is less than or equal to 64.");
        // 67 normalizes to 66, still above 64.
        assert_eq!(validator().validate_ram(67).unwrap_err(), ValidationError::AboveMax(64));
    }

    #[test]
    fn ram_below_min_fails() {
        // 1 normalizes to 0, below the minimum of 2.
        assert_eq!(validator().validate_ram(1).unwrap_err(), ValidationError::BelowMin(2));
    }

    // ── Bounds ─────────────────────────────────────────────────────

    #[test]
    fn cpu_bounds() {
        let v = validator();
        assert_eq!(v.validate_cpu(1).unwrap(), 1);
        assert_eq!(v.validate_cpu(64).unwrap(), 64);
        assert_eq!(v.validate_cpu(0).unwrap_err(), ValidationError::BelowMin(1));
        assert_eq!(v.validate_cpu(65).unwrap_err(), ValidationError::AboveMax(64));
    }

    #[test]
    fn negative_hdd_fails_the_lower_bound() {
        let err = validator().validate_hdd(-100).unwrap_err();
        assert_eq!(err, ValidationError::BelowMin(5));
        assert_eq!(
            err.to_string(),
            "Ensure this value is greater than or equal to 5."
        );
    }

    // ── Status ─────────────────────────────────────────────────────

    #[test]
    fn valid_statuses_parse() {
        let v = validator();
        assert_eq!(v.validate_status("started").unwrap(), VpsStatus::Started);
        assert_eq!(v.validate_status("stopped").unwrap(), VpsStatus::Stopped);
        assert_eq!(v.validate_status("blocked").unwrap(), VpsStatus::Blocked);
    }

    #[test]
    fn invalid_status_message_enumerates_choices_in_order() {
        let err = validator().validate_status("reserved").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid status. Please select a valid option from (started, stopped, blocked)."
        );
    }

    // ── Aggregation ────────────────────────────────────────────────

    #[test]
    fn valid_create_produces_a_draft() {
        let draft = validator().check_create(&create(8, 32, 100, "started")).unwrap();
        assert_eq!(
            draft,
            VpsDraft {
                cpu: 8,
                ram: 32,
                hdd: 100,
                status: VpsStatus::Started,
            }
        );
    }

    #[test]
    fn create_reports_all_violations_at_once() {
        let errors = validator()
            .check_create(&create(8, 320, -100, "started"))
            .unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), ["hdd", "ram"]);
        assert_eq!(errors.field("ram").unwrap(), [ValidationError::AboveMax(64)]);
        assert_eq!(errors.field("hdd").unwrap(), [ValidationError::BelowMin(5)]);
    }

    #[test]
    fn create_reports_bad_values_and_bad_status_together() {
        let errors = validator()
            .check_create(&create(4, 310, 10000, "invalid_status"))
            .unwrap_err();
        assert!(errors.field("ram").is_some());
        assert!(errors.field("hdd").is_some());
        assert_eq!(
            errors.field("status").unwrap(),
            [ValidationError::InvalidChoice("started, stopped, blocked".to_string())]
        );
    }

    #[test]
    fn create_missing_fields_are_required_errors() {
        let errors = validator()
            .check_create(&CreateVps {
                ram: Some(320),
                ..CreateVps::default()
            })
            .unwrap_err();
        assert_eq!(errors.field("cpu").unwrap(), [ValidationError::Required]);
        assert_eq!(errors.field("hdd").unwrap(), [ValidationError::Required]);
        assert_eq!(errors.field("ram").unwrap(), [ValidationError::AboveMax(64)]);
    }

    #[test]
    fn create_without_status_defaults_to_blocked() {
        let draft = validator()
            .check_create(&CreateVps {
                cpu: Some(8),
                ram: Some(32),
                hdd: Some(100),
                status: None,
            })
            .unwrap();
        assert_eq!(draft.status, VpsStatus::Blocked);
    }

    #[test]
    fn field_errors_serialize_as_message_lists() {
        let errors = validator()
            .check_create(&create(8, 320, -100, "reserved"))
            .unwrap_err();
        let value = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            value["ram"][0],
            "Ensure this value is less than or equal to 64."
        );
        assert_eq!(
            value["hdd"][0],
            "Ensure this value is greater than or equal to 5."
        );
        assert_eq!(
            value["status"][0],
            "Invalid status. Please select a valid option from (started, stopped, blocked)."
        );
    }

    // ── Patch ──────────────────────────────────────────────────────

    #[test]
    fn patch_with_status_returns_it() {
        let patch = PatchVps {
            status: Some("stopped".to_string()),
            ..PatchVps::default()
        };
        assert_eq!(validator().check_patch(&patch).unwrap(), Some(VpsStatus::Stopped));
    }

    #[test]
    fn patch_without_status_returns_none() {
        let patch = PatchVps {
            cpu: Some(16),
            ..PatchVps::default()
        };
        assert_eq!(validator().check_patch(&patch).unwrap(), None);
    }

    #[test]
    fn patch_validates_every_present_field() {
        let patch = PatchVps {
            ram: Some(320),
            status: Some("stopped".to_string()),
            ..PatchVps::default()
        };
        let errors = validator().check_patch(&patch).unwrap_err();
        assert_eq!(errors.field("ram").unwrap(), [ValidationError::AboveMax(64)]);
    }

    #[test]
    fn patch_with_invalid_status_fails() {
        let patch = PatchVps {
            status: Some("reserved".to_string()),
            ..PatchVps::default()
        };
        let errors = validator().check_patch(&patch).unwrap_err();
        assert_eq!(
            errors.field("status").unwrap(),
            [ValidationError::InvalidChoice("started, stopped, blocked".to_string())]
        );
    }
}
