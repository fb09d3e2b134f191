use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use indiegrid_catalog::apply_filters;

use crate::error::CliError;
use crate::FilterArgs;

use super::{build_spec, connect, print_game_row, spinner};

/// One-shot search: fetch a snapshot matching the filter, re-run the
/// evaluator locally with the search term, print the top results.
pub(crate) async fn run_search(
    query: &str,
    args: &FilterArgs,
    limit: usize,
) -> Result<(), CliError> {
    let mut spec = build_spec(args)?;
    spec.search = query.to_string();

    let client = connect()?;
    let pb = spinner("Searching...");
    let page = client.fetch_games(&spec, 0, limit.max(1)).await;
    pb.finish_and_clear();
    let page = page?;

    let matches = apply_filters(&page.entries, &spec);
    if matches.is_empty() {
        println!(
            "No games match {}",
            format!("\"{query}\"").if_supports_color(Stdout, |t| t.bold()),
        );
        return Ok(());
    }

    println!(
        "{} for {}",
        format!("{} matches", matches.len()).if_supports_color(Stdout, |t| t.bold()),
        format!("\"{query}\"").if_supports_color(Stdout, |t| t.cyan()),
    );
    println!();
    for (i, game) in matches.iter().take(limit).enumerate() {
        print_game_row(i + 1, game);
    }
    Ok(())
}
