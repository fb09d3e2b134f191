use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use indiegrid_client::SessionManager;
use indiegrid_submit::validate_signup;

use crate::error::CliError;

use super::{connect, read_line, spinner};

/// Sign in with email/password, or print the OAuth authorize URL.
pub(crate) async fn run_login(
    email: Option<String>,
    provider: Option<String>,
) -> Result<(), CliError> {
    let client = connect()?;

    if let Some(provider) = provider {
        // OAuth completes in the browser; the CLI only hands over the URL.
        println!("Open this URL in your browser to sign in:");
        println!(
            "  {}",
            client
                .authorize_url(&provider)
                .if_supports_color(Stdout, |t| t.cyan()),
        );
        return Ok(());
    }

    let email = match email {
        Some(e) => e,
        None => read_line("email")?,
    };
    let password = read_line("password")?;
    if email.is_empty() || password.is_empty() {
        return Err(CliError::input("email and password are required"));
    }

    let mut manager = SessionManager::new();
    let pb = spinner("Signing in...");
    let result = manager.sign_in(&client, &email, &password).await;
    pb.finish_and_clear();
    let profile = result?;

    println!(
        "{} Signed in as {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        profile.username.if_supports_color(Stdout, |t| t.bold()),
    );
    Ok(())
}

/// Create an account interactively, then sign in.
pub(crate) async fn run_signup() -> Result<(), CliError> {
    let client = connect()?;

    let username = read_line("username")?;
    let email = read_line("email")?;
    let password = read_line("password")?;
    let confirm = read_line("confirm password")?;

    if let Err(errors) = validate_signup(&username, &email, &password, &confirm) {
        for e in &errors {
            eprintln!(
                "  {} {}: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e.field,
                e.message,
            );
        }
        return Err(CliError::input("signup details are invalid"));
    }

    let mut manager = SessionManager::new();
    let pb = spinner("Creating account...");
    let result = manager.sign_up(&client, &username, &email, &password).await;
    pb.finish_and_clear();
    let profile = result?;

    println!(
        "{} Account created; signed in as {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        profile.username.if_supports_color(Stdout, |t| t.bold()),
    );
    Ok(())
}

/// Sign out and clear the cached session.
pub(crate) async fn run_logout() -> Result<(), CliError> {
    let client = connect()?;
    let mut manager = SessionManager::new();

    if !manager.restore(&client).await {
        println!("Not signed in.");
        return Ok(());
    }

    manager.sign_out(&client).await;
    println!(
        "{} Signed out",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
    );
    Ok(())
}

/// Print the profile for the cached session.
pub(crate) async fn run_whoami() -> Result<(), CliError> {
    let client = connect()?;
    let mut manager = SessionManager::new();

    if !manager.restore(&client).await {
        println!("Not signed in.");
        return Ok(());
    }

    if let Some(profile) = manager.profile() {
        println!(
            "{} {}",
            profile.username.if_supports_color(Stdout, |t| t.bold()),
            format!("<{}>", profile.email).if_supports_color(Stdout, |t| t.dimmed()),
        );
        println!("  joined {}", profile.created_at.format("%Y-%m-%d"));
        if let Some(bio) = &profile.bio {
            println!("  {bio}");
        }
    }
    Ok(())
}
