//! VpsService — validate → persist → respond orchestration.
//!
//! The service is the only writer of record state. Validation entirely
//! precedes persistence: a failed create or patch leaves the store
//! untouched.

use tracing::debug;
use uuid::Uuid;

use vps_core::{CreateVps, PatchVps, Validator, VpsRecord};
use vps_state::RecordStore;

use crate::error::ApiError;
use crate::filter::VpsFilter;

/// Resource service over the record store.
#[derive(Clone)]
pub struct VpsService {
    store: RecordStore,
    validator: Validator,
}

impl VpsService {
    pub fn new(store: RecordStore, validator: Validator) -> Self {
        VpsService { store, validator }
    }

    /// Validate and persist a new record. The id is always generated
    /// server-side; on validation failure nothing is persisted.
    pub fn create(&self, input: &CreateVps) -> Result<VpsRecord, ApiError> {
        let draft = self
            .validator
            .check_create(input)
            .map_err(ApiError::Validation)?;
        let record = VpsRecord {
            id: Uuid::new_v4(),
            cpu: draft.cpu,
            ram: draft.ram,
            hdd: draft.hdd,
            status: draft.status,
        };
        self.store.insert_record(&record)?;
        debug!(id = %record.id, status = %record.status, "server created");
        Ok(record)
    }

    /// List records matching every supplied filter criterion.
    ///
    /// Ordering: status descending, compared as the lowercase wire names
    /// (`stopped`, then `started`, then `blocked`). The sort is stable, so
    /// records with equal status keep store key order — the sequence is
    /// deterministic across calls.
    pub fn list(&self, filter: &VpsFilter) -> Result<Vec<VpsRecord>, ApiError> {
        let mut records: Vec<VpsRecord> = self
            .store
            .list_records()?
            .into_iter()
            .filter(|record| filter.matches(record))
            .collect();
        records.sort_by(|a, b| b.status.as_str().cmp(a.status.as_str()));
        Ok(records)
    }

    /// Look up one record by id. Any id with no matching row — including
    /// a malformed one — answers not-found.
    pub fn get(&self, id: &str) -> Result<VpsRecord, ApiError> {
        self.store.get_record(id)?.ok_or_else(ApiError::not_found)
    }

    /// Partial update: validates every field present in the payload, then
    /// applies only `status`. A payload without `status` is a no-op that
    /// returns the record unchanged. The lookup short-circuits before
    /// validation — without a target record there is nothing to validate
    /// against.
    pub fn update_status(&self, id: &str, patch: &PatchVps) -> Result<VpsRecord, ApiError> {
        let current = self.store.get_record(id)?.ok_or_else(ApiError::not_found)?;

        let status = self
            .validator
            .check_patch(patch)
            .map_err(ApiError::Validation)?;

        match status {
            Some(status) => {
                let updated = self
                    .store
                    .update_status(id, status)?
                    .ok_or_else(ApiError::not_found)?;
                debug!(%id, status = %status, "server status updated");
                Ok(updated)
            }
            None => Ok(current),
        }
    }
}
