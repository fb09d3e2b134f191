//! Data model types for the game catalog.
//!
//! These types mirror the hosted backend's schema: games with genre and
//! platform tags, pricing, release status, engagement counters, media URLs,
//! and the client-side projection of an authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Game ────────────────────────────────────────────────────────────────────

/// A single listed game in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub title: String,
    pub developer: String,
    #[serde(default)]
    pub developer_id: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Genre tags. Unordered, may be empty, not unique across games.
    #[serde(default)]
    pub genres: Vec<String>,
    /// Platform tags. Same shape as genres.
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(flatten)]
    pub price: Price,
    #[serde(default)]
    pub status: ReleaseStatus,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    pub released_at: DateTime<Utc>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub banner_url: Option<String>,
    #[serde(default)]
    pub gallery_urls: Vec<String>,
    #[serde(default)]
    pub trailer_url: Option<String>,
}

// ── Price ───────────────────────────────────────────────────────────────────

/// Price of a game: either an explicit free marker or a non-negative amount.
///
/// The backend stores an `is_free` flag alongside the numeric `price` column,
/// so a zero price and the free marker are distinct on the wire. The flattened
/// serde form matches that layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Price {
    Free,
    Paid(f64),
}

impl Price {
    /// The effective numeric price: the free marker maps to 0.
    pub fn effective(&self) -> f64 {
        match self {
            Price::Free => 0.0,
            Price::Paid(p) => *p,
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, Price::Free)
    }
}

impl Default for Price {
    fn default() -> Self {
        Price::Free
    }
}

// Wire shape: `{ "is_free": bool, "price": number }`.
#[derive(Serialize, Deserialize)]
struct PriceWire {
    #[serde(default)]
    is_free: bool,
    #[serde(default)]
    price: f64,
}

impl Serialize for Price {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = match self {
            Price::Free => PriceWire {
                is_free: true,
                price: 0.0,
            },
            Price::Paid(p) => PriceWire {
                is_free: false,
                price: *p,
            },
        };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = PriceWire::deserialize(deserializer)?;
        if wire.is_free {
            Ok(Price::Free)
        } else {
            Ok(Price::Paid(wire.price))
        }
    }
}

// ── Release status ──────────────────────────────────────────────────────────

/// Where a game is in its release lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseStatus {
    #[default]
    Released,
    EarlyAccess,
    DemoAvailable,
    InDevelopment,
    Concept,
    Updated,
}

impl ReleaseStatus {
    /// Parse a status string leniently, defaulting to `Released`.
    ///
    /// The backend has stored both snake_case and display-cased values over
    /// time, so this accepts either.
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "early_access" => ReleaseStatus::EarlyAccess,
            "demo_available" | "demo" => ReleaseStatus::DemoAvailable,
            "in_development" => ReleaseStatus::InDevelopment,
            "concept" => ReleaseStatus::Concept,
            "updated" => ReleaseStatus::Updated,
            _ => ReleaseStatus::Released,
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            ReleaseStatus::Released => "Released",
            ReleaseStatus::EarlyAccess => "Early Access",
            ReleaseStatus::DemoAvailable => "Demo Available",
            ReleaseStatus::InDevelopment => "In Development",
            ReleaseStatus::Concept => "Concept",
            ReleaseStatus::Updated => "Updated",
        }
    }
}

impl std::fmt::Display for ReleaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ── User ────────────────────────────────────────────────────────────────────

/// Client-side projection of an authenticated user.
///
/// Owned by the backend's auth system; this cached copy is invalidated on
/// sign-out or session expiry. Username and email never change after signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}
