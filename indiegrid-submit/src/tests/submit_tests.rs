use super::*;

use chrono::{Duration as ChronoDuration, Utc};
use indiegrid_client::{ApiClient, Backend, Session};

fn offline_client() -> ApiClient {
    ApiClient::new(Backend {
        base_url: "https://api.indiegrid.example".to_string(),
        api_key: "anon-key".to_string(),
    })
    .unwrap()
}

fn session(expired: bool) -> Session {
    let offset = if expired {
        -ChronoDuration::hours(1)
    } else {
        ChronoDuration::hours(1)
    };
    Session {
        access_token: "token".to_string(),
        user_id: "u1".to_string(),
        email: None,
        expires_at: Utc::now() + offset,
    }
}

#[test]
fn slugify_flattens_punctuation_and_case() {
    assert_eq!(slugify("Cyber Runner 2087"), "cyber-runner-2087");
    assert_eq!(slugify("  Forest   Guardian!  "), "forest-guardian");
    assert_eq!(slugify("Héllo Wörld"), "h-llo-w-rld");
    assert_eq!(slugify("!!!"), "untitled");
}

#[tokio::test]
async fn invalid_form_never_reaches_the_network() {
    // The offline client would fail any request; validation fires first.
    let err = submit_game(
        &offline_client(),
        &session(false),
        &SubmissionForm::default(),
        &ImageLimits::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, SubmitError::Validation(_)));
}

#[tokio::test]
async fn expired_session_aborts_before_compression() {
    let form = SubmissionForm {
        title: "Cyber Runner 2087".to_string(),
        description: "Outrun the grid.".to_string(),
        genres: vec!["Action".to_string()],
        platforms: vec!["Windows".to_string()],
        thumbnail: Some(MediaFile {
            file_name: "thumb.png".to_string(),
            // Deliberately not a decodable image: the session gate must
            // reject before compression ever looks at the bytes.
            bytes: vec![0u8; 16],
        }),
        ..Default::default()
    };
    let err = submit_game(
        &offline_client(),
        &session(true),
        &form,
        &ImageLimits::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, SubmitError::NotSignedIn));
}
