use super::*;

use indiegrid_catalog::{ReleaseStatus, SortKey, TimeFrame};

fn value_of<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.as_str())
}

#[test]
fn default_spec_sends_only_paging_price_and_order() {
    let params = filter_query_params(&FilterSpec::default(), 0, 12);
    assert!(value_of(&params, "search").is_none());
    assert!(value_of(&params, "genres").is_none());
    assert!(value_of(&params, "platforms").is_none());
    assert!(value_of(&params, "statuses").is_none());
    assert!(value_of(&params, "free_only").is_none());
    assert_eq!(value_of(&params, "price_min"), Some("0.00"));
    assert_eq!(value_of(&params, "price_max"), Some("1000.00"));
    assert_eq!(value_of(&params, "sort"), Some("trending"));
    assert_eq!(value_of(&params, "time_frame"), Some("all-time"));
    assert_eq!(value_of(&params, "page"), Some("0"));
    assert_eq!(value_of(&params, "per_page"), Some("12"));
}

#[test]
fn every_dimension_translates_to_a_parameter() {
    let spec = FilterSpec {
        genres: vec!["Action".into(), "Roguelike".into()],
        platforms: vec!["Windows".into()],
        price_range: (5.0, 19.99),
        statuses: vec![ReleaseStatus::EarlyAccess, ReleaseStatus::Concept],
        search: "  cyber  ".into(),
        free_only: true,
        sort: SortKey::MostLiked,
        time_frame: TimeFrame::Week,
    };
    let params = filter_query_params(&spec, 2, 24);
    assert_eq!(value_of(&params, "search"), Some("cyber"));
    assert_eq!(value_of(&params, "genres"), Some("Action,Roguelike"));
    assert_eq!(value_of(&params, "platforms"), Some("Windows"));
    assert_eq!(value_of(&params, "statuses"), Some("early_access,concept"));
    assert_eq!(value_of(&params, "price_min"), Some("5.00"));
    assert_eq!(value_of(&params, "price_max"), Some("19.99"));
    assert_eq!(value_of(&params, "free_only"), Some("true"));
    assert_eq!(value_of(&params, "sort"), Some("most-liked"));
    assert_eq!(value_of(&params, "time_frame"), Some("week"));
    assert_eq!(value_of(&params, "page"), Some("2"));
    assert_eq!(value_of(&params, "per_page"), Some("24"));
}

#[test]
fn unordered_sort_keys_still_reach_the_server() {
    // The client-side evaluator passes these through, but the server orders.
    for (key, wire) in [
        (SortKey::ReleaseDate, "release-date"),
        (SortKey::PriceAscending, "price-asc"),
        (SortKey::PriceDescending, "price-desc"),
    ] {
        let spec = FilterSpec {
            sort: key,
            ..Default::default()
        };
        let params = filter_query_params(&spec, 0, 12);
        assert_eq!(value_of(&params, "sort"), Some(wire));
    }
}

#[test]
fn game_page_deserializes_with_defaults() {
    let page: GamePage = serde_json::from_str(r#"{"entries": [], "total": 0}"#).unwrap();
    assert!(page.entries.is_empty());
    assert_eq!(page.total, 0);

    let page: GamePage = serde_json::from_str("{}").unwrap();
    assert!(page.entries.is_empty());
}
