use super::*;

use chrono::{TimeZone, Utc};
use indiegrid_catalog::types::{Price, ReleaseStatus};

fn games(n: usize) -> Vec<Game> {
    (0..n)
        .map(|i| Game {
            id: format!("g{i}"),
            title: format!("Game {i}"),
            developer: "Dev".to_string(),
            developer_id: None,
            description: String::new(),
            genres: vec![],
            platforms: vec![],
            price: Price::Free,
            status: ReleaseStatus::Released,
            views: (n - i) as u64,
            likes: 0,
            comments: 0,
            released_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            thumbnail_url: None,
            banner_url: None,
            gallery_urls: vec![],
            trailer_url: None,
        })
        .collect()
}

#[test]
fn thirty_items_page_twelve_delivers_three_batches() {
    let mut loader = BatchLoader::new(games(30), 12);

    let initial = loader.load_initial();
    assert_eq!(initial.len(), 12);
    assert_eq!(initial[0].id, "g0");
    assert!(loader.cursor().has_more);

    assert!(loader.begin_load());
    assert_eq!(loader.complete_load(), 12);
    assert_eq!(loader.visible().len(), 24);
    assert!(loader.cursor().has_more);

    assert!(loader.begin_load());
    assert_eq!(loader.complete_load(), 6);
    assert_eq!(loader.visible().len(), 30);
    assert!(!loader.cursor().has_more);

    // Fourth call is a no-op.
    assert!(!loader.begin_load());
}

#[test]
fn batches_union_to_the_full_list_without_duplicates() {
    let n = 25;
    let p = 4;
    let mut loader = BatchLoader::new(games(n), p);
    loader.load_initial();
    let mut batches = 1;
    while loader.begin_load() {
        loader.complete_load();
        batches += 1;
    }
    assert_eq!(batches, n.div_ceil(p));

    let ids: Vec<&str> = loader.visible().iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids.len(), n);
    let expected: Vec<String> = (0..n).map(|i| format!("g{i}")).collect();
    assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());
}

#[test]
fn empty_source_is_exhausted_immediately() {
    let mut loader = BatchLoader::new(Vec::new(), 12);
    assert_eq!(loader.load_initial().len(), 0);
    assert!(!loader.cursor().has_more);
    assert!(!loader.begin_load());
}

#[test]
fn source_smaller_than_one_page_needs_no_second_batch() {
    let mut loader = BatchLoader::new(games(5), 12);
    assert_eq!(loader.load_initial().len(), 5);
    assert!(!loader.cursor().has_more);
}

#[test]
fn begin_load_refuses_while_in_flight() {
    let mut loader = BatchLoader::new(games(30), 12);
    loader.load_initial();
    assert!(loader.begin_load());
    assert!(!loader.begin_load());
    loader.complete_load();
    assert!(loader.begin_load());
}

#[test]
fn begin_load_refuses_before_initial_batch() {
    let mut loader = BatchLoader::new(games(30), 12);
    assert!(!loader.begin_load());
}

#[test]
fn abandon_load_clears_the_in_flight_marker() {
    let mut loader = BatchLoader::new(games(30), 12);
    loader.load_initial();
    assert!(loader.begin_load());
    loader.abandon_load();
    assert_eq!(loader.visible().len(), 12);
    assert!(loader.begin_load());
}

#[test]
fn load_initial_replaces_rather_than_appends() {
    let mut loader = BatchLoader::new(games(30), 12);
    loader.load_initial();
    loader.begin_load();
    loader.complete_load();
    assert_eq!(loader.visible().len(), 24);

    let again = loader.load_initial();
    assert_eq!(again.len(), 12);
    assert_eq!(loader.cursor().batch, 0);
    assert!(loader.cursor().has_more);
}

#[test]
fn zero_page_size_is_clamped() {
    let mut loader = BatchLoader::new(games(3), 0);
    assert_eq!(loader.page_size(), 1);
    assert_eq!(loader.load_initial().len(), 1);
}
