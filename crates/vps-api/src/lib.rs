//! vps-api — REST API for the VPS inventory.
//!
//! Provides axum route handlers over [`VpsService`], which orchestrates
//! validate → persist → respond for each operation.
//!
//! # API Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/api/v1/vps` | List servers, with optional exact-match filters |
//! | POST | `/api/v1/vps` | Create a server |
//! | GET | `/api/v1/vps/{id}` | Get one server by id |
//! | PATCH | `/api/v1/vps/{id}` | Update a server's status |

pub mod error;
pub mod filter;
pub mod handlers;
pub mod service;

use axum::Router;
use axum::routing::get;

use vps_core::{Validator, VpsLimits};
use vps_state::RecordStore;

pub use error::ApiError;
pub use filter::VpsFilter;
pub use service::VpsService;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub service: VpsService,
}

/// Build the complete API router over a store and configured limits.
pub fn build_router(store: RecordStore, limits: VpsLimits) -> Router {
    let state = ApiState {
        service: VpsService::new(store, Validator::new(limits)),
    };

    let api_routes = Router::new()
        .route("/vps", get(handlers::list_vps).post(handlers::create_vps))
        .route("/vps/{id}", get(handlers::get_vps).patch(handlers::update_vps))
        .with_state(state);

    Router::new().nest("/api/v1", api_routes)
}
