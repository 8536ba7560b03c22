//! vps-state — embedded record store for the VPS inventory.
//!
//! Backed by [redb](https://docs.rs/redb). Records are JSON-serialized
//! into redb's `&[u8]` value column, keyed by their UUID string.
//!
//! The [`RecordStore`] is `Clone + Send + Sync` (backed by `Arc<Database>`)
//! and can be shared across async tasks. Status updates run their
//! lookup + mutate + write inside a single write transaction, so
//! concurrent updates against the same record serialize at the store.

pub mod error;
pub mod store;
pub mod tables;

pub use error::{StoreError, StoreResult};
pub use store::RecordStore;
