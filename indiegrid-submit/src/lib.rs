//! Game submission pipeline: validation, image compression, staged uploads.
//!
//! All validation is client-side and runs before any network call; the
//! upload/insert sequence aborts on first failure with a combined error.

pub mod error;
pub mod media;
pub mod submit;
pub mod validate;

pub use error::SubmitError;
pub use media::{compress_image, CompressedImage, ImageLimits};
pub use submit::{slugify, submit_game, MediaFile, SubmissionForm};
pub use validate::{validate_signup, validate_submission, FieldError};
