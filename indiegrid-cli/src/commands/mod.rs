pub(crate) mod auth;
pub(crate) mod browse;
pub(crate) mod config;
pub(crate) mod search;
pub(crate) mod show;
pub(crate) mod submit;

use std::io::Write;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use indiegrid_catalog::{FilterSpec, Game, Price, ReleaseStatus, SortKey, TimeFrame};
use indiegrid_client::{ApiClient, Backend};

use crate::error::CliError;
use crate::FilterArgs;

/// Translate command-line filter arguments into a validated spec.
pub(crate) fn build_spec(args: &FilterArgs) -> Result<FilterSpec, CliError> {
    let mut spec = FilterSpec::default();
    if let Some(genres) = &args.genres {
        spec.genres = genres.clone();
    }
    if let Some(platforms) = &args.platforms {
        spec.platforms = platforms.clone();
    }
    if let Some(statuses) = &args.statuses {
        spec.statuses = statuses
            .iter()
            .map(|s| parse_status(s))
            .collect::<Result<Vec<_>, _>>()?;
    }
    spec.free_only = args.free;
    let (min, max) = spec.price_range;
    spec.price_range = (
        args.min_price.unwrap_or(min),
        args.max_price.unwrap_or(max),
    );
    spec.sort = parse_sort_key(&args.sort)?;
    spec.time_frame = parse_time_frame(&args.time_frame)?;
    spec.validate()?;
    Ok(spec)
}

/// Build an API client from the resolved backend configuration.
///
/// Missing configuration is a setup problem, not an API failure, so it is
/// reported as `CliError::Config` with the resolution hint intact.
pub(crate) fn connect() -> Result<ApiClient, CliError> {
    let (backend, _) = Backend::load().map_err(|e| CliError::config(e.to_string()))?;
    Ok(ApiClient::new(backend)?)
}

/// Strict status parser for command-line input.
///
/// `ReleaseStatus::from_str_loose` tolerates whatever the backend has stored
/// and falls back to `Released`; that fallback would silently rewrite a typo
/// in a filter flag, so unknown words are rejected here instead.
pub(crate) fn parse_status(s: &str) -> Result<ReleaseStatus, CliError> {
    match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "released" => Ok(ReleaseStatus::Released),
        "early_access" => Ok(ReleaseStatus::EarlyAccess),
        "demo_available" | "demo" => Ok(ReleaseStatus::DemoAvailable),
        "in_development" => Ok(ReleaseStatus::InDevelopment),
        "concept" => Ok(ReleaseStatus::Concept),
        "updated" => Ok(ReleaseStatus::Updated),
        other => Err(CliError::input(format!("unknown release status: {other}"))),
    }
}

pub(crate) fn parse_sort_key(s: &str) -> Result<SortKey, CliError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "trending" => Ok(SortKey::Trending),
        "most-viewed" | "views" => Ok(SortKey::MostViewed),
        "most-liked" | "likes" => Ok(SortKey::MostLiked),
        "highest-rated" | "rating" => Ok(SortKey::HighestRated),
        "newest" => Ok(SortKey::Newest),
        "oldest" => Ok(SortKey::Oldest),
        "alphabetical" | "a-z" => Ok(SortKey::Alphabetical),
        "release-date" => Ok(SortKey::ReleaseDate),
        "price-asc" => Ok(SortKey::PriceAscending),
        "price-desc" => Ok(SortKey::PriceDescending),
        other => Err(CliError::input(format!("unknown sort key: {other}"))),
    }
}

pub(crate) fn parse_time_frame(s: &str) -> Result<TimeFrame, CliError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "today" => Ok(TimeFrame::Today),
        "week" => Ok(TimeFrame::Week),
        "month" => Ok(TimeFrame::Month),
        "quarter" => Ok(TimeFrame::Quarter),
        "all-time" | "all" => Ok(TimeFrame::AllTime),
        other => Err(CliError::input(format!("unknown time frame: {other}"))),
    }
}

pub(crate) fn format_price(price: &Price) -> String {
    match price {
        Price::Free => "Free".to_string(),
        Price::Paid(amount) => format!("${amount:.2}"),
    }
}

/// One catalog row for list-style output.
pub(crate) fn print_game_row(index: usize, game: &Game) {
    let price = format_price(&game.price);
    println!(
        "  {:>3}. {} {} {}",
        index,
        game.title.if_supports_color(Stdout, |t| t.bold()),
        format!("[{}]", game.status.label()).if_supports_color(Stdout, |t| t.cyan()),
        if game.price.is_free() {
            price.if_supports_color(Stdout, |t| t.green()).to_string()
        } else {
            price
        },
    );
    println!(
        "       {}  {}",
        game.developer.if_supports_color(Stdout, |t| t.dimmed()),
        format!("{} views, {} likes", game.views, game.likes)
            .if_supports_color(Stdout, |t| t.dimmed()),
    );
}

/// Indented spinner used while a delayed batch or network call is in flight.
pub(crate) fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("  {spinner:.cyan} {msg}") {
        pb.set_style(style.tick_chars("/-\\|"));
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

#[cfg(test)]
#[path = "tests/parse_tests.rs"]
mod tests;

/// Prompt on stdout and read one trimmed line from stdin.
pub(crate) fn read_line(prompt: &str) -> Result<String, CliError> {
    print!("  {prompt}: ");
    std::io::stdout().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
