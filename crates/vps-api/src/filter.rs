//! Filter evaluator for list queries.
//!
//! Callers may supply any subset of `{cpu, ram, hdd, status}`; each present
//! criterion is an exact-equality predicate and all of them AND together.
//! The struct doubles as the `Query` deserialization target, so unparseable
//! numeric values are rejected at the transport boundary before the
//! evaluator ever sees them.

use serde::Deserialize;

use vps_core::{VpsRecord, VpsStatus};

/// Optional exact-match criteria for narrowing a list query.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct VpsFilter {
    pub cpu: Option<u32>,
    pub ram: Option<u32>,
    pub hdd: Option<u32>,
    /// Kept as the raw string: a value outside the status enum matches no
    /// record at all, which degrades the query to an empty result instead
    /// of raising a validation error.
    pub status: Option<String>,
}

impl VpsFilter {
    /// Whether the record satisfies every supplied criterion.
    pub fn matches(&self, record: &VpsRecord) -> bool {
        if self.cpu.is_some_and(|cpu| record.cpu != cpu) {
            return false;
        }
        if self.ram.is_some_and(|ram| record.ram != ram) {
            return false;
        }
        if self.hdd.is_some_and(|hdd| record.hdd != hdd) {
            return false;
        }
        if let Some(raw) = &self.status {
            match VpsStatus::parse(raw) {
                Some(status) => {
                    if record.status != status {
                        return false;
                    }
                }
                // Unrecognized status value: matches nothing.
                None => return false,
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn record(cpu: u32, ram: u32, hdd: u32, status: VpsStatus) -> VpsRecord {
        VpsRecord {
            id: Uuid::new_v4(),
            cpu,
            ram,
            hdd,
            status,
        }
    }

    fn fixture() -> Vec<VpsRecord> {
        vec![
            record(8, 32, 500, VpsStatus::Started),
            record(16, 64, 1000, VpsStatus::Stopped),
            record(4, 16, 200, VpsStatus::Started),
        ]
    }

    fn count(filter: &VpsFilter) -> usize {
        fixture().iter().filter(|r| filter.matches(r)).count()
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert_eq!(count(&VpsFilter::default()), 3);
    }

    #[test]
    fn filter_by_ram() {
        let filter = VpsFilter {
            ram: Some(32),
            ..VpsFilter::default()
        };
        assert_eq!(count(&filter), 1);
    }

    #[test]
    fn filter_by_status() {
        let filter = VpsFilter {
            status: Some("started".to_string()),
            ..VpsFilter::default()
        };
        assert_eq!(count(&filter), 2);
    }

    #[test]
    fn filter_by_multiple_fields_is_a_conjunction() {
        let filter = VpsFilter {
            ram: Some(64),
            status: Some("stopped".to_string()),
            ..VpsFilter::default()
        };
        assert_eq!(count(&filter), 1);

        // Same ram, wrong status: the conjunction fails.
        let filter = VpsFilter {
            ram: Some(64),
            status: Some("started".to_string()),
            ..VpsFilter::default()
        };
        assert_eq!(count(&filter), 0);
    }

    #[test]
    fn unrecognized_status_matches_nothing() {
        let filter = VpsFilter {
            ram: Some(32),
            status: Some("reserved".to_string()),
            ..VpsFilter::default()
        };
        assert_eq!(count(&filter), 0);
    }

    #[test]
    fn filter_by_cpu_and_hdd() {
        let filter = VpsFilter {
            cpu: Some(4),
            hdd: Some(200),
            ..VpsFilter::default()
        };
        assert_eq!(count(&filter), 1);
    }

    #[test]
    fn deserializes_from_query_pairs() {
        let filter: VpsFilter =
            serde_json::from_str(r#"{"ram": 32, "status": "started"}"#).unwrap();
        assert_eq!(filter.ram, Some(32));
        assert_eq!(filter.status.as_deref(), Some("started"));
        assert_eq!(filter.cpu, None);
    }
}
