use super::*;

use crate::config::Backend;

fn offline_client() -> ApiClient {
    ApiClient::new(Backend {
        base_url: "https://api.indiegrid.example".to_string(),
        api_key: "anon-key".to_string(),
    })
    .unwrap()
}

fn expired_session() -> Session {
    Session {
        access_token: "stale-token".to_string(),
        user_id: "u1".to_string(),
        email: Some("dev@example.com".to_string()),
        expires_at: Utc::now() - ChronoDuration::hours(1),
    }
}

#[test]
fn session_expiry_is_checked_against_now() {
    assert!(expired_session().expired());
    let live = Session {
        expires_at: Utc::now() + ChronoDuration::hours(1),
        ..expired_session()
    };
    assert!(!live.expired());
}

#[test]
fn session_round_trips_through_json() {
    let session = expired_session();
    let encoded = serde_json::to_string(&session).unwrap();
    let decoded: Session = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded.access_token, session.access_token);
    assert_eq!(decoded.user_id, session.user_id);
    assert_eq!(decoded.expires_at, session.expires_at);
}

#[tokio::test]
async fn restore_rejects_an_expired_cache_without_a_network_call() {
    let dir = tempfile::tempdir().unwrap();
    let cache = dir.path().join("session.json");
    std::fs::write(&cache, serde_json::to_string(&expired_session()).unwrap()).unwrap();

    let mut sessions = SessionManager::with_cache_path(cache.clone());
    // fetch_profile is never reached for an expired token, so the offline
    // client is safe here.
    assert!(!sessions.restore(&offline_client()).await);
    assert!(sessions.current_session().is_none());
    assert!(!cache.exists(), "expired cache should be removed");
}

#[tokio::test]
async fn restore_with_no_cache_is_signed_out() {
    let dir = tempfile::tempdir().unwrap();
    let mut sessions = SessionManager::with_cache_path(dir.path().join("session.json"));
    assert!(!sessions.restore(&offline_client()).await);
    assert!(!sessions.is_signed_in());
}

#[tokio::test]
async fn sign_out_without_a_session_still_notifies_watchers() {
    let dir = tempfile::tempdir().unwrap();
    let mut sessions = SessionManager::with_cache_path(dir.path().join("session.json"));
    let mut rx = sessions.subscribe();
    assert!(rx.borrow().is_none());

    sessions.sign_out(&offline_client()).await;
    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().is_none());
    assert!(sessions.profile().is_none());
}

#[test]
fn authorize_url_names_the_provider() {
    let client = offline_client();
    assert_eq!(
        client.authorize_url("github"),
        "https://api.indiegrid.example/auth/v1/authorize?provider=github"
    );
}
