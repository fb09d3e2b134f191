use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::error::CliError;

use super::{connect, format_price, spinner};

/// Print the full detail view for one game and record the view.
pub(crate) async fn run_show(id: &str) -> Result<(), CliError> {
    let client = connect()?;
    let pb = spinner("Fetching game...");
    let game = client.fetch_game(id).await;
    pb.finish_and_clear();
    let game = game?;

    println!(
        "{} {}",
        game.title.if_supports_color(Stdout, |t| t.bold()),
        format!("[{}]", game.status.label()).if_supports_color(Stdout, |t| t.cyan()),
    );
    println!(
        "  by {}",
        game.developer.if_supports_color(Stdout, |t| t.cyan()),
    );
    println!();
    println!("  {}", game.description);
    println!();
    if !game.genres.is_empty() {
        println!("  Genres:    {}", game.genres.join(", "));
    }
    if !game.platforms.is_empty() {
        println!("  Platforms: {}", game.platforms.join(", "));
    }
    println!("  Price:     {}", format_price(&game.price));
    println!(
        "  Released:  {}",
        game.released_at.format("%Y-%m-%d"),
    );
    println!(
        "  {}",
        format!(
            "{} views, {} likes, {} comments",
            game.views, game.likes, game.comments
        )
        .if_supports_color(Stdout, |t| t.dimmed()),
    );
    if let Some(trailer) = &game.trailer_url {
        println!("  Trailer:   {trailer}");
    }
    if !game.gallery_urls.is_empty() {
        println!("  Gallery:   {} images", game.gallery_urls.len());
    }

    // Fire-and-forget; failures only show up in debug logs.
    client.increment_views(&game.id).await;
    Ok(())
}
