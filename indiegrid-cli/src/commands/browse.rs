use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use indiegrid_feed::{FeedConfig, FeedEvent, GameFeed};

use crate::error::CliError;
use crate::FilterArgs;

use super::{build_spec, connect, print_game_row, read_line, spinner};

/// How many entries to pull into the local catalog snapshot per request.
const SNAPSHOT_SIZE: usize = 120;

/// Interactive catalog browser: fetch a snapshot, then page through it
/// batch by batch with the feed's load delay between batches.
pub(crate) async fn run_browse(args: &FilterArgs, page_size: usize) -> Result<(), CliError> {
    let spec = build_spec(args)?;
    let client = connect()?;

    let pb = spinner("Fetching catalog...");
    let page = client.fetch_games(&spec, 0, SNAPSHOT_SIZE).await;
    pb.finish_and_clear();
    let page = page?;

    let (mut feed, mut rx) = GameFeed::new(FeedConfig {
        page_size,
        ..FeedConfig::default()
    });
    feed.set_filter(spec);
    feed.set_catalog(page.entries);

    // Both setters emit reset events; the loader state is what we print from.
    while rx.try_recv().is_ok() {}

    let snapshot = feed.snapshot();
    println!(
        "{} {}",
        format!("{} games", snapshot.total).if_supports_color(Stdout, |t| t.bold()),
        format!("({} on the server)", page.total).if_supports_color(Stdout, |t| t.dimmed()),
    );
    println!();

    let mut shown = 0;
    for (i, game) in feed.visible().iter().enumerate() {
        print_game_row(i + 1, game);
        shown += 1;
    }

    loop {
        let snapshot = feed.snapshot();
        if !snapshot.cursor.has_more {
            println!();
            println!(
                "{}",
                "End of results.".if_supports_color(Stdout, |t| t.dimmed()),
            );
            return Ok(());
        }

        println!();
        let input = read_line("Enter for more, q to quit")?;
        if input.eq_ignore_ascii_case("q") {
            return Ok(());
        }

        if !feed.request_next() {
            continue;
        }
        let pb = spinner("Loading more...");
        loop {
            match rx.recv().await {
                Some(FeedEvent::BatchLoaded { appended, .. }) => {
                    pb.finish_and_clear();
                    let visible = feed.visible();
                    for (i, game) in visible.iter().enumerate().skip(shown) {
                        print_game_row(i + 1, game);
                    }
                    shown += appended;
                    break;
                }
                Some(FeedEvent::Exhausted) | Some(FeedEvent::Reset { .. }) => continue,
                None => {
                    pb.finish_and_clear();
                    return Ok(());
                }
            }
        }
    }
}
