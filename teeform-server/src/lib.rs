//! # Teeform Server
//!
//! HTTP surface for the design placement and catalog storage subsystem.
//!
//! ## Overview
//!
//! The server exposes two routes:
//!
//! - `POST /upload`: multipart submission of a design binary plus its
//!   placement, validated and durably recorded
//! - `GET /images`: paginated catalog reads with a `hasMore`
//!   continuation signal for incrementally loading clients
//!
//! ## Architecture
//!
//! Built on Axum over the `teeform-core` services: the catalog store
//! (single-writer JSON file), the asset store, and the ingestion and
//! pagination services. State is shared through [`infra::app_state::AppState`].

pub mod errors;
pub mod handlers;
pub mod infra;
pub mod routes;

pub use errors::{AppError, AppResult};
pub use infra::app_state::AppState;
pub use infra::config::Config;
