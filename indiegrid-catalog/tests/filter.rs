use chrono::{TimeZone, Utc};
use indiegrid_catalog::types::{Game, Price, ReleaseStatus};
use indiegrid_catalog::{apply_filters, FilterSpec, FilterSpecError, SortKey};

fn game(id: &str, title: &str, price: Price) -> Game {
    Game {
        id: id.to_string(),
        title: title.to_string(),
        developer: "Test Dev".to_string(),
        developer_id: None,
        description: String::new(),
        genres: vec![],
        platforms: vec![],
        price,
        status: ReleaseStatus::Released,
        views: 0,
        likes: 0,
        comments: 0,
        released_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        thumbnail_url: None,
        banner_url: None,
        gallery_urls: vec![],
        trailer_url: None,
    }
}

fn sample_catalog() -> Vec<Game> {
    let mut cyber = game("cyber", "Cyber Runner 2087", Price::Paid(19.99));
    cyber.genres = vec!["Action".into(), "Cyberpunk".into()];
    cyber.platforms = vec!["Windows".into(), "Linux".into()];
    cyber.views = 500;
    cyber.likes = 40;
    cyber.released_at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

    let mut forest = game("forest", "Forest Guardian", Price::Free);
    forest.genres = vec!["Adventure".into()];
    forest.platforms = vec!["Windows".into()];
    forest.views = 1200;
    forest.likes = 10;
    forest.status = ReleaseStatus::EarlyAccess;
    forest.released_at = Utc.with_ymd_and_hms(2023, 3, 15, 0, 0, 0).unwrap();

    let mut dungeon = game("dungeon", "Dungeon Depths", Price::Paid(9.99));
    dungeon.genres = vec!["Action RPG".into(), "Roguelike".into()];
    dungeon.platforms = vec!["Mac".into()];
    dungeon.views = 300;
    dungeon.likes = 80;
    dungeon.description = "Descend into procedurally generated dungeons".into();
    dungeon.released_at = Utc.with_ymd_and_hms(2022, 11, 5, 0, 0, 0).unwrap();

    let mut pixel = game("pixel", "Pixel Farm", Price::Free);
    pixel.genres = vec!["Simulation".into()];
    pixel.platforms = vec!["Web".into()];
    pixel.views = 50;
    pixel.likes = 5;
    pixel.status = ReleaseStatus::DemoAvailable;
    pixel.released_at = Utc.with_ymd_and_hms(2025, 2, 20, 0, 0, 0).unwrap();

    vec![cyber, forest, dungeon, pixel]
}

fn ids(games: &[Game]) -> Vec<&str> {
    games.iter().map(|g| g.id.as_str()).collect()
}

#[test]
fn default_spec_returns_full_catalog() {
    let catalog = sample_catalog();
    let result = apply_filters(&catalog, &FilterSpec::default());
    assert_eq!(result.len(), catalog.len());
    let mut got = ids(&result);
    got.sort();
    let mut want = ids(&catalog);
    want.sort();
    assert_eq!(got, want);
}

#[test]
fn empty_catalog_yields_empty_result() {
    let result = apply_filters(&[], &FilterSpec::default());
    assert!(result.is_empty());
}

#[test]
fn search_matches_title_only_in_result() {
    let catalog = sample_catalog();
    let spec = FilterSpec {
        search: "cyber".to_string(),
        ..Default::default()
    };
    let result = apply_filters(&catalog, &spec);
    assert_eq!(ids(&result), vec!["cyber"]);
}

#[test]
fn search_is_an_iff_over_all_fields() {
    let catalog = sample_catalog();
    let query = "dungeon";
    let spec = FilterSpec {
        search: query.to_string(),
        ..Default::default()
    };
    let result = apply_filters(&catalog, &spec);
    let result_ids: Vec<&str> = ids(&result);

    for g in &catalog {
        let hit = g.title.to_lowercase().contains(query)
            || g.developer.to_lowercase().contains(query)
            || g.description.to_lowercase().contains(query)
            || g.genres.iter().any(|t| t.to_lowercase().contains(query));
        assert_eq!(
            result_ids.contains(&g.id.as_str()),
            hit,
            "membership mismatch for {}",
            g.id
        );
    }
}

#[test]
fn search_is_case_insensitive() {
    let catalog = sample_catalog();
    let spec = FilterSpec {
        search: "CYBER".to_string(),
        ..Default::default()
    };
    assert_eq!(ids(&apply_filters(&catalog, &spec)), vec!["cyber"]);
}

#[test]
fn genre_selection_uses_substring_containment() {
    let catalog = sample_catalog();
    // "RPG" must match the "Action RPG" tag by containment, not equality.
    let spec = FilterSpec {
        genres: vec!["RPG".to_string()],
        ..Default::default()
    };
    assert_eq!(ids(&apply_filters(&catalog, &spec)), vec!["dungeon"]);
}

#[test]
fn genre_selection_is_or_combined() {
    let catalog = sample_catalog();
    let spec = FilterSpec {
        genres: vec!["Adventure".to_string(), "Simulation".to_string()],
        sort: SortKey::Alphabetical,
        ..Default::default()
    };
    assert_eq!(ids(&apply_filters(&catalog, &spec)), vec!["forest", "pixel"]);
}

#[test]
fn platform_and_genre_are_and_combined() {
    let catalog = sample_catalog();
    let spec = FilterSpec {
        genres: vec!["Action".to_string()],
        platforms: vec!["Linux".to_string()],
        ..Default::default()
    };
    // "Action" matches cyber and dungeon ("Action RPG"), but only cyber is on Linux.
    assert_eq!(ids(&apply_filters(&catalog, &spec)), vec!["cyber"]);
}

#[test]
fn price_interval_is_inclusive_iff() {
    let catalog = sample_catalog();
    let spec = FilterSpec {
        price_range: (9.99, 19.99),
        ..Default::default()
    };
    let result = apply_filters(&catalog, &spec);
    let result_ids = ids(&result);

    for g in &catalog {
        let p = g.price.effective();
        let inside = (9.99..=19.99).contains(&p);
        assert_eq!(result_ids.contains(&g.id.as_str()), inside);
    }
    for g in &result {
        let p = g.price.effective();
        assert!((9.99..=19.99).contains(&p));
    }
}

#[test]
fn free_marker_maps_to_zero_for_price_filtering() {
    let catalog = sample_catalog();
    let spec = FilterSpec {
        price_range: (0.0, 0.0),
        ..Default::default()
    };
    let result = apply_filters(&catalog, &spec);
    let mut got = ids(&result);
    got.sort();
    assert_eq!(got, vec!["forest", "pixel"]);
}

#[test]
fn free_only_keeps_only_free_entries() {
    // Spec scenario: prices [free, 9.99, free] with free_only set.
    let catalog = vec![
        game("a", "Alpha", Price::Free),
        game("b", "Beta", Price::Paid(9.99)),
        game("c", "Gamma", Price::Free),
    ];
    let spec = FilterSpec {
        free_only: true,
        sort: SortKey::Alphabetical,
        ..Default::default()
    };
    assert_eq!(ids(&apply_filters(&catalog, &spec)), vec!["a", "c"]);
}

#[test]
fn status_filter_is_membership() {
    let catalog = sample_catalog();
    let spec = FilterSpec {
        statuses: vec![ReleaseStatus::EarlyAccess, ReleaseStatus::DemoAvailable],
        sort: SortKey::Alphabetical,
        ..Default::default()
    };
    assert_eq!(ids(&apply_filters(&catalog, &spec)), vec!["forest", "pixel"]);
}

#[test]
fn sort_most_viewed_descends_by_views() {
    let catalog = sample_catalog();
    let spec = FilterSpec {
        sort: SortKey::MostViewed,
        ..Default::default()
    };
    assert_eq!(
        ids(&apply_filters(&catalog, &spec)),
        vec!["forest", "cyber", "dungeon", "pixel"]
    );
}

#[test]
fn sort_most_liked_descends_by_likes() {
    let catalog = sample_catalog();
    let spec = FilterSpec {
        sort: SortKey::MostLiked,
        ..Default::default()
    };
    assert_eq!(
        ids(&apply_filters(&catalog, &spec)),
        vec!["dungeon", "cyber", "forest", "pixel"]
    );
}

#[test]
fn sort_newest_and_oldest_use_release_timestamp() {
    let catalog = sample_catalog();
    let newest = apply_filters(
        &catalog,
        &FilterSpec {
            sort: SortKey::Newest,
            ..Default::default()
        },
    );
    assert_eq!(ids(&newest), vec!["pixel", "cyber", "forest", "dungeon"]);

    let oldest = apply_filters(
        &catalog,
        &FilterSpec {
            sort: SortKey::Oldest,
            ..Default::default()
        },
    );
    assert_eq!(ids(&oldest), vec!["dungeon", "forest", "cyber", "pixel"]);
}

#[test]
fn sort_alphabetical_is_case_insensitive() {
    let catalog = vec![
        game("b", "banana quest", Price::Free),
        game("a", "Apple Saga", Price::Free),
        game("z", "ZEBRA", Price::Free),
    ];
    let spec = FilterSpec {
        sort: SortKey::Alphabetical,
        ..Default::default()
    };
    assert_eq!(ids(&apply_filters(&catalog, &spec)), vec!["a", "b", "z"]);
}

#[test]
fn undefined_sort_keys_preserve_input_order() {
    let catalog = sample_catalog();
    for key in [
        SortKey::ReleaseDate,
        SortKey::PriceAscending,
        SortKey::PriceDescending,
    ] {
        let spec = FilterSpec {
            sort: key,
            ..Default::default()
        };
        assert_eq!(ids(&apply_filters(&catalog, &spec)), ids(&catalog));
    }
}

#[test]
fn evaluator_is_idempotent_and_non_mutating() {
    let catalog = sample_catalog();
    let before = ids(&catalog)
        .into_iter()
        .map(String::from)
        .collect::<Vec<_>>();
    let spec = FilterSpec {
        search: "e".to_string(),
        sort: SortKey::MostViewed,
        ..Default::default()
    };
    let first = apply_filters(&catalog, &spec);
    let second = apply_filters(&catalog, &spec);
    assert_eq!(ids(&first), ids(&second));
    assert_eq!(
        ids(&catalog),
        before.iter().map(String::as_str).collect::<Vec<_>>()
    );
}

#[test]
fn validate_rejects_inverted_price_range() {
    let spec = FilterSpec {
        price_range: (20.0, 10.0),
        ..Default::default()
    };
    assert_eq!(
        spec.validate(),
        Err(FilterSpecError::InvertedPriceRange { lo: 20.0, hi: 10.0 })
    );
}

#[test]
fn validate_rejects_negative_lower_bound() {
    let spec = FilterSpec {
        price_range: (-1.0, 10.0),
        ..Default::default()
    };
    assert_eq!(spec.validate(), Err(FilterSpecError::NegativePrice(-1.0)));
}

#[test]
fn validate_rejects_blank_tags() {
    let spec = FilterSpec {
        genres: vec!["  ".to_string()],
        ..Default::default()
    };
    assert_eq!(spec.validate(), Err(FilterSpecError::BlankTag("genre")));
}

#[test]
fn validate_accepts_default_spec() {
    assert!(FilterSpec::default().validate().is_ok());
}
