//! HTTP client for the hosted backend's catalog API.
//!
//! Every `FilterSpec` dimension translates to a query parameter so the
//! backend can evaluate the same filters server-side; the response is a
//! single page plus the total row count.

use std::time::Duration;

use indiegrid_catalog::{FilterSpec, Game, UserProfile};

use crate::config::Backend;
use crate::error::ApiError;
use crate::types::{ErrorBody, GamePage, Genre};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Typed client over the backend's REST surface.
pub struct ApiClient {
    http: reqwest::Client,
    backend: Backend,
}

impl ApiClient {
    pub fn new(backend: Backend) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, backend })
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.backend.base_url, path)
    }

    /// Fetch one page of games matching the filter.
    ///
    /// `page` is zero-based; `per_page` is the server-side batch size.
    pub async fn fetch_games(
        &self,
        spec: &FilterSpec,
        page: usize,
        per_page: usize,
    ) -> Result<GamePage, ApiError> {
        let params = filter_query_params(spec, page, per_page);
        let resp = self
            .http
            .get(self.url("/rest/v1/games"))
            .header("apikey", &self.backend.api_key)
            .query(&params)
            .send()
            .await?;
        let resp = check_status(resp).await?;
        let page: GamePage = resp.json().await?;
        log::debug!(
            "fetched {} of {} games",
            page.entries.len(),
            page.total
        );
        Ok(page)
    }

    /// Fetch a single game by id.
    pub async fn fetch_game(&self, id: &str) -> Result<Game, ApiError> {
        let resp = self
            .http
            .get(self.url(&format!("/rest/v1/games/{id}")))
            .header("apikey", &self.backend.api_key)
            .send()
            .await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(format!("game {id}")));
        }
        let resp = check_status(resp).await?;
        Ok(resp.json().await?)
    }

    /// List all genres for the filter UI.
    pub async fn fetch_genres(&self) -> Result<Vec<Genre>, ApiError> {
        let resp = self
            .http
            .get(self.url("/rest/v1/genres"))
            .header("apikey", &self.backend.api_key)
            .send()
            .await?;
        let resp = check_status(resp).await?;
        Ok(resp.json().await?)
    }

    /// Fetch the profile row backing a session's user.
    pub async fn fetch_profile(&self, user_id: &str, access_token: &str) -> Result<UserProfile, ApiError> {
        let resp = self
            .http
            .get(self.url(&format!("/rest/v1/profiles/{user_id}")))
            .header("apikey", &self.backend.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(format!("profile {user_id}")));
        }
        let resp = check_status(resp).await?;
        Ok(resp.json().await?)
    }

    /// Fire-and-forget view-count increment.
    ///
    /// Engagement bookkeeping must never disturb the page, so failures are
    /// logged at debug and swallowed.
    pub async fn increment_views(&self, game_id: &str) {
        let result = self
            .http
            .post(self.url("/rest/v1/rpc/increment_views"))
            .header("apikey", &self.backend.api_key)
            .json(&serde_json::json!({ "game_id": game_id }))
            .send()
            .await;
        match result {
            Ok(resp) if !resp.status().is_success() => {
                log::debug!("view increment for {} returned {}", game_id, resp.status());
            }
            Err(e) => log::debug!("view increment for {} failed: {}", game_id, e),
            Ok(_) => {}
        }
    }

    /// Insert a new game row (submission flow). Requires a session.
    pub async fn insert_game(
        &self,
        access_token: &str,
        game: &serde_json::Value,
    ) -> Result<Game, ApiError> {
        let resp = self
            .http
            .post(self.url("/rest/v1/games"))
            .header("apikey", &self.backend.api_key)
            .bearer_auth(access_token)
            .json(game)
            .send()
            .await?;
        let resp = check_status(resp).await?;
        Ok(resp.json().await?)
    }
}

/// Translate a filter spec into the backend's query parameters.
///
/// Empty dimensions are omitted entirely rather than sent as empty strings.
pub(crate) fn filter_query_params(
    spec: &FilterSpec,
    page: usize,
    per_page: usize,
) -> Vec<(&'static str, String)> {
    let mut params: Vec<(&'static str, String)> = Vec::new();
    let search = spec.search.trim();
    if !search.is_empty() {
        params.push(("search", search.to_string()));
    }
    if !spec.genres.is_empty() {
        params.push(("genres", spec.genres.join(",")));
    }
    if !spec.platforms.is_empty() {
        params.push(("platforms", spec.platforms.join(",")));
    }
    if !spec.statuses.is_empty() {
        let statuses: Vec<&str> = spec
            .statuses
            .iter()
            .map(|s| match s {
                indiegrid_catalog::ReleaseStatus::Released => "released",
                indiegrid_catalog::ReleaseStatus::EarlyAccess => "early_access",
                indiegrid_catalog::ReleaseStatus::DemoAvailable => "demo_available",
                indiegrid_catalog::ReleaseStatus::InDevelopment => "in_development",
                indiegrid_catalog::ReleaseStatus::Concept => "concept",
                indiegrid_catalog::ReleaseStatus::Updated => "updated",
            })
            .collect();
        params.push(("statuses", statuses.join(",")));
    }
    let (lo, hi) = spec.price_range;
    params.push(("price_min", format_price(lo)));
    params.push(("price_max", format_price(hi)));
    if spec.free_only {
        params.push(("free_only", "true".to_string()));
    }
    params.push(("sort", spec.sort.as_query_value().to_string()));
    params.push(("time_frame", spec.time_frame.as_query_value().to_string()));
    params.push(("page", page.to_string()));
    params.push(("per_page", per_page.to_string()));
    params
}

fn format_price(p: f64) -> String {
    // Prices are currency amounts; two decimals is all the backend stores.
    format!("{p:.2}")
}

/// Map non-success statuses to the error taxonomy, pulling the backend's
/// message out of the body when there is one.
pub(crate) async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(ApiError::Unauthorized);
    }
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(ApiError::RateLimit);
    }
    let message = resp
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| status.to_string());
    if status.is_server_error() {
        return Err(ApiError::Server {
            status: status.as_u16(),
            message,
        });
    }
    Err(ApiError::Api(message))
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
