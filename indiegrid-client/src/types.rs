//! Wire types for backend responses.

use serde::{Deserialize, Serialize};

use indiegrid_catalog::Game;

/// One page of the server-side filtered game query.
#[derive(Debug, Clone, Deserialize)]
pub struct GamePage {
    #[serde(default)]
    pub entries: Vec<Game>,
    /// Total rows matching the filter, across all pages.
    #[serde(default)]
    pub total: u64,
}

/// A catalog genre row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: String,
    pub name: String,
}

/// Successful password-grant or signup response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Lifetime of the token in seconds.
    pub expires_in: i64,
    pub user: AuthUser,
}

/// The auth system's view of a user (not the profile row).
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Error body the backend returns alongside non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(alias = "error_description", alias = "msg")]
    pub message: Option<String>,
}
