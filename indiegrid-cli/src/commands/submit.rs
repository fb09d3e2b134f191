use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use serde::Deserialize;

use indiegrid_catalog::{Price, ReleaseStatus};
use indiegrid_client::SessionManager;
use indiegrid_submit::{
    submit_game, validate_submission, ImageLimits, MediaFile, SubmissionForm, SubmitError,
};

use crate::error::CliError;

use super::{connect, spinner};

/// On-disk submission manifest. Media fields are paths resolved relative
/// to the manifest file.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    title: String,
    description: String,
    #[serde(default)]
    genres: Vec<String>,
    #[serde(default)]
    platforms: Vec<String>,
    #[serde(default)]
    free: bool,
    price: Option<f64>,
    #[serde(default)]
    status: Option<String>,
    thumbnail: Option<PathBuf>,
    #[serde(default)]
    gallery: Vec<PathBuf>,
    trailer_url: Option<String>,
}

fn read_media(base: &Path, path: &Path) -> Result<MediaFile, CliError> {
    let resolved = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    let bytes = std::fs::read(&resolved)
        .map_err(|e| CliError::manifest(format!("{}: {e}", resolved.display())))?;
    let file_name = resolved
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    Ok(MediaFile { file_name, bytes })
}

fn load_form(manifest_path: &Path) -> Result<SubmissionForm, CliError> {
    let text = std::fs::read_to_string(manifest_path)
        .map_err(|e| CliError::manifest(format!("{}: {e}", manifest_path.display())))?;
    let manifest: Manifest =
        toml::from_str(&text).map_err(|e| CliError::manifest(e.to_string()))?;

    let price = if manifest.free {
        Price::Free
    } else {
        let amount = manifest.price.ok_or_else(|| {
            CliError::manifest("either 'free = true' or a 'price' is required")
        })?;
        Price::Paid(amount)
    };

    let base = manifest_path.parent().unwrap_or_else(|| Path::new("."));
    let thumbnail = manifest
        .thumbnail
        .as_deref()
        .map(|p| read_media(base, p))
        .transpose()?;
    let gallery = manifest
        .gallery
        .iter()
        .map(|p| read_media(base, p))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SubmissionForm {
        title: manifest.title,
        description: manifest.description,
        genres: manifest.genres,
        platforms: manifest.platforms,
        price,
        status: manifest
            .status
            .as_deref()
            .map(ReleaseStatus::from_str_loose)
            .unwrap_or_default(),
        thumbnail,
        gallery,
        trailer_url: manifest.trailer_url,
    })
}

/// Submit a game listing from a TOML manifest.
pub(crate) async fn run_submit(manifest_path: &Path, dry_run: bool) -> Result<(), CliError> {
    let form = load_form(manifest_path)?;

    if dry_run {
        if let Err(errors) = validate_submission(&form) {
            for e in &errors {
                eprintln!(
                    "  {} {}: {}",
                    "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                    e.field,
                    e.message,
                );
            }
            return Err(CliError::input("submission is invalid"));
        }
        println!(
            "{} Manifest is valid: \"{}\" with {} gallery image(s)",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            form.title,
            form.gallery.len(),
        );
        return Ok(());
    }

    let client = connect()?;
    let mut manager = SessionManager::new();
    if !manager.restore(&client).await {
        return Err(CliError::NotSignedIn);
    }
    let session = manager.current_session().ok_or(CliError::NotSignedIn)?.clone();

    let pb = spinner("Uploading submission...");
    let result = submit_game(&client, &session, &form, &ImageLimits::default()).await;
    pb.finish_and_clear();

    match result {
        Ok(game) => {
            println!(
                "{} Submitted \"{}\" (id {})",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                game.title.if_supports_color(Stdout, |t| t.bold()),
                game.id,
            );
            Ok(())
        }
        Err(SubmitError::Validation(errors)) => {
            for e in &errors {
                eprintln!(
                    "  {} {}: {}",
                    "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                    e.field,
                    e.message,
                );
            }
            Err(CliError::input("submission is invalid"))
        }
        Err(SubmitError::Aborted {
            step,
            uploaded,
            source,
        }) => {
            eprintln!(
                "{} Submission aborted during {step}: {source}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            );
            if !uploaded.is_empty() {
                // Storage objects are not rolled back on failure.
                eprintln!("  Already uploaded (left in place):");
                for url in &uploaded {
                    eprintln!("    {url}");
                }
            }
            Err(CliError::input("submission failed"))
        }
        Err(e) => Err(e.into()),
    }
}
