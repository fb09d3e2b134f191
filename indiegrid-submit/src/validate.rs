//! Form validation.
//!
//! Everything here runs before any network call; failures surface inline on
//! the form, field by field, rather than as one opaque error.

use indiegrid_catalog::Price;

use crate::SubmissionForm;

/// Maximum size for an uploaded image, before compression.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;
/// Gallery cap; more shots than this add load time without adding signal.
pub const MAX_GALLERY_IMAGES: usize = 8;

pub const MIN_USERNAME_LEN: usize = 3;
pub const MAX_USERNAME_LEN: usize = 24;
pub const MIN_PASSWORD_LEN: usize = 8;

/// One inline validation failure, keyed by form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a game submission. Collects every failure rather than stopping
/// at the first, so the form can mark all offending fields at once.
pub fn validate_submission(form: &SubmissionForm) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if form.title.trim().is_empty() {
        errors.push(FieldError::new("title", "title is required"));
    }
    if form.description.trim().is_empty() {
        errors.push(FieldError::new("description", "description is required"));
    }
    if form.genres.is_empty() {
        errors.push(FieldError::new("genres", "select at least one genre"));
    }
    if form.platforms.is_empty() {
        errors.push(FieldError::new("platforms", "select at least one platform"));
    }
    if let Price::Paid(p) = form.price {
        if !p.is_finite() || p < 0.0 {
            errors.push(FieldError::new("price", "price must be zero or positive"));
        }
    }

    match &form.thumbnail {
        None => errors.push(FieldError::new("thumbnail", "a thumbnail image is required")),
        Some(file) if file.bytes.len() > MAX_IMAGE_BYTES => {
            errors.push(FieldError::new(
                "thumbnail",
                format!(
                    "{} exceeds the {} MiB image limit",
                    file.file_name,
                    MAX_IMAGE_BYTES / (1024 * 1024)
                ),
            ));
        }
        Some(_) => {}
    }

    if form.gallery.len() > MAX_GALLERY_IMAGES {
        errors.push(FieldError::new(
            "gallery",
            format!("at most {MAX_GALLERY_IMAGES} gallery images"),
        ));
    }
    for file in &form.gallery {
        if file.bytes.len() > MAX_IMAGE_BYTES {
            errors.push(FieldError::new(
                "gallery",
                format!(
                    "{} exceeds the {} MiB image limit",
                    file.file_name,
                    MAX_IMAGE_BYTES / (1024 * 1024)
                ),
            ));
        }
    }

    if let Some(url) = &form.trailer_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(FieldError::new("trailer_url", "trailer must be an http(s) URL"));
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Validate a signup form before calling the auth endpoint.
pub fn validate_signup(
    username: &str,
    email: &str,
    password: &str,
    password_confirm: &str,
) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    let username = username.trim();
    if username.len() < MIN_USERNAME_LEN || username.len() > MAX_USERNAME_LEN {
        errors.push(FieldError::new(
            "username",
            format!("username must be {MIN_USERNAME_LEN}-{MAX_USERNAME_LEN} characters"),
        ));
    }
    // Not RFC-grade; the backend verifies deliverability. This catches typos.
    let email = email.trim();
    if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        errors.push(FieldError::new("email", "enter a valid email address"));
    }
    if password.len() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new(
            "password",
            format!("password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    if password != password_confirm {
        errors.push(FieldError::new("password_confirm", "passwords do not match"));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
#[path = "tests/validate_tests.rs"]
mod tests;
