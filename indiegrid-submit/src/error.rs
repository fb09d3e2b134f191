use crate::validate::FieldError;
use indiegrid_client::ApiError;

/// Errors from the submission pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Client-side validation failed; nothing was sent over the network.
    #[error("submission has {} invalid field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("image processing failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("not signed in")]
    NotSignedIn,

    /// An upload or the final insert failed partway through.
    ///
    /// Files uploaded before the failure are listed but not deleted; there is
    /// no compensating cleanup.
    #[error("submission aborted during {step}: {source}")]
    Aborted {
        step: &'static str,
        uploaded: Vec<String>,
        #[source]
        source: ApiError,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}
