//! The submission pipeline: validate, compress, upload, insert.
//!
//! Steps run in a fixed order and the first network failure aborts the rest.
//! Files uploaded before the failure stay in the bucket; the combined error
//! lists them so a caller can clean up by hand if it cares to.

use indiegrid_catalog::{Game, Price, ReleaseStatus};
use indiegrid_client::storage::BUCKET_GAME_MEDIA;
use indiegrid_client::{ApiClient, Session};

use crate::error::SubmitError;
use crate::media::{compress_image, ImageLimits};
use crate::validate::validate_submission;

/// An image file attached to the form, already read into memory.
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// A new game listing as entered in the submission form.
#[derive(Debug, Clone, Default)]
pub struct SubmissionForm {
    pub title: String,
    pub description: String,
    pub genres: Vec<String>,
    pub platforms: Vec<String>,
    pub price: Price,
    pub status: ReleaseStatus,
    pub thumbnail: Option<MediaFile>,
    pub gallery: Vec<MediaFile>,
    pub trailer_url: Option<String>,
}

/// Submit a new game listing for review.
///
/// Order: validation (no I/O), thumbnail upload, gallery uploads in form
/// order, then the row insert. Returns the created row.
pub async fn submit_game(
    client: &ApiClient,
    session: &Session,
    form: &SubmissionForm,
    limits: &ImageLimits,
) -> Result<Game, SubmitError> {
    validate_submission(form).map_err(SubmitError::Validation)?;
    if session.expired() {
        return Err(SubmitError::NotSignedIn);
    }

    let slug = slugify(&form.title);
    let prefix = format!("{}/{}", session.user_id, slug);
    let mut uploaded: Vec<String> = Vec::new();

    // Validation guarantees the thumbnail is present.
    let thumbnail = form.thumbnail.as_ref().ok_or_else(|| {
        SubmitError::Validation(vec![crate::validate::FieldError {
            field: "thumbnail",
            message: "a thumbnail image is required".to_string(),
        }])
    })?;

    let img = compress_image(&thumbnail.bytes, limits)?;
    let thumbnail_url = client
        .upload(
            &session.access_token,
            BUCKET_GAME_MEDIA,
            &format!("{prefix}/thumbnail.{}", img.extension),
            img.bytes,
            img.content_type,
        )
        .await
        .map_err(|source| SubmitError::Aborted {
            step: "thumbnail upload",
            uploaded: uploaded.clone(),
            source,
        })?;
    uploaded.push(thumbnail_url.clone());

    let mut gallery_urls = Vec::with_capacity(form.gallery.len());
    for (i, file) in form.gallery.iter().enumerate() {
        let img = compress_image(&file.bytes, limits)?;
        let url = client
            .upload(
                &session.access_token,
                BUCKET_GAME_MEDIA,
                &format!("{prefix}/gallery-{i}.{}", img.extension),
                img.bytes,
                img.content_type,
            )
            .await
            .map_err(|source| SubmitError::Aborted {
                step: "gallery upload",
                uploaded: uploaded.clone(),
                source,
            })?;
        uploaded.push(url.clone());
        gallery_urls.push(url);
    }

    let row = serde_json::json!({
        "title": form.title.trim(),
        "description": form.description.trim(),
        "developer_id": session.user_id,
        "genres": form.genres,
        "platforms": form.platforms,
        "is_free": form.price.is_free(),
        "price": form.price.effective(),
        "status": form.status,
        "thumbnail_url": thumbnail_url,
        "gallery_urls": gallery_urls,
        "trailer_url": form.trailer_url,
    });
    let game = client
        .insert_game(&session.access_token, &row)
        .await
        .map_err(|source| SubmitError::Aborted {
            step: "game insert",
            uploaded: uploaded.clone(),
            source,
        })?;

    log::info!("submitted game {} ({})", game.title, game.id);
    Ok(game)
}

/// Stable object-key slug from a title.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_dash = true;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("untitled");
    }
    slug
}

#[cfg(test)]
#[path = "tests/submit_tests.rs"]
mod tests;
