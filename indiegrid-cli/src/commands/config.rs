use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use indiegrid_client::{config_path, Backend, ConfigSource};

use crate::error::CliError;

fn mask_value(s: &str) -> String {
    if s.len() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", &s[..4])
    }
}

/// Show the resolved backend settings and where each came from.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    println!(
        "{}",
        "Backend Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    println!();

    let path = config_path();
    if path.exists() {
        println!(
            "  Config file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        println!(
            "  Config file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    println!();

    match Backend::load() {
        Ok((backend, sources)) => {
            print_field("base_url", &backend.base_url, &sources.base_url);
            print_field("api_key", &mask_value(&backend.api_key), &sources.api_key);
        }
        Err(e) => {
            println!(
                "  {} {}",
                "not configured:".if_supports_color(Stdout, |t| t.yellow()),
                e,
            );
            println!();
            println!("  Set INDIEGRID_URL and INDIEGRID_API_KEY,");
            println!("  or run 'indiegrid config set --url <URL> --api-key <KEY>'.");
        }
    }
    Ok(())
}

fn print_field(name: &str, value: &str, source: &ConfigSource) {
    println!(
        "  {} {} {}",
        format!("{name}:").if_supports_color(Stdout, |t| t.cyan()),
        value,
        format!("({source})").if_supports_color(Stdout, |t| t.dimmed()),
    );
}

/// Write backend fields to the config file.
pub(crate) fn run_config_set(
    url: Option<&str>,
    api_key: Option<&str>,
) -> Result<(), CliError> {
    if url.is_none() && api_key.is_none() {
        return Err(CliError::input("nothing to set; pass --url and/or --api-key"));
    }
    let path = Backend::save(url, api_key)?;
    println!(
        "{} Saved to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

/// Print the config file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    println!("{}", config_path().display());
    Ok(())
}
