//! Object storage uploads.
//!
//! Thumbnails, gallery shots, and avatars upload to bucket paths after
//! client-side compression; the public URL comes straight from the bucket
//! layout, so no second request is needed.

use crate::client::{check_status, ApiClient};
use crate::error::ApiError;

/// Buckets the submission flow writes to.
pub const BUCKET_GAME_MEDIA: &str = "game-media";
pub const BUCKET_AVATARS: &str = "avatars";

impl ApiClient {
    /// Upload an object and return its public URL.
    ///
    /// `path` is the object key within the bucket, e.g.
    /// `"<user_id>/<game_id>/thumbnail.jpg"`.
    pub async fn upload(
        &self,
        access_token: &str,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, ApiError> {
        let resp = self
            .http()
            .post(self.url(&format!("/storage/v1/object/{bucket}/{path}")))
            .header("apikey", &self.backend().api_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .bearer_auth(access_token)
            .body(bytes)
            .send()
            .await?;
        check_status(resp).await?;
        let url = self.public_url(bucket, path);
        log::debug!("uploaded {bucket}/{path}");
        Ok(url)
    }

    /// Public URL for an object, without checking that it exists.
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        self.url(&format!("/storage/v1/object/public/{bucket}/{path}"))
    }
}
