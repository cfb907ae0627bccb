//! Visage Gateway - the profile web application
//!
//! This crate implements:
//! - Session-guarded page routes (dashboard, profile)
//! - The profile persistence actions (name update, avatar upload)
//! - The profile repository (Postgres behind a feature, in-memory)
//! - The object-store client for the hosted avatar bucket
//! - Render-cache invalidation on successful writes

pub mod actions;
pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
pub mod router;
pub mod state;
pub mod storage;

pub use actions::{AvatarUpload, ProfileActions};
pub use auth::{AuthError, Claims, CurrentUser, SessionConfig, SessionUser};
pub use router::build_routes;
pub use state::AppState;

/// Gateway version
pub const GATEWAY_VERSION: &str = env!("CARGO_PKG_VERSION");
