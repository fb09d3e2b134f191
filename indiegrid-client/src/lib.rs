//! Async client for the hosted backend.
//!
//! Catalog queries (server-side filtering and paging), authentication and
//! session lifecycle, object-storage uploads, and the fire-and-forget
//! view-count RPC. All persistence lives behind this API; nothing in the
//! workspace talks SQL.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod storage;
pub mod types;

pub use auth::{Session, SessionManager};
pub use client::ApiClient;
pub use config::{config_path, session_cache_path, Backend, BackendSources, ConfigSource};
pub use error::ApiError;
pub use types::{GamePage, Genre};
