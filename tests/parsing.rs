use std::fs;
use std::path::PathBuf;

use sportspro_terminal::match_fetch::{parse_match_detail_json, parse_matches_json};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_matches_fixture() {
    let raw = read_fixture("matches.json");
    let rows = parse_matches_json(&raw).expect("fixture should parse");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, "4c1c1698-4d30-4f4f-9f21-4f0f2a3c1b9e");
    assert_eq!(rows[0].name, "India vs Australia, 3rd T20I");
    assert!(rows[0].match_started);
    assert!(rows[0].match_ended);
    assert_eq!(rows[0].venue, "Wankhede Stadium, Mumbai");
}

#[test]
fn absent_display_fields_default_to_empty() {
    let raw = read_fixture("matches.json");
    let rows = parse_matches_json(&raw).expect("fixture should parse");
    assert!(!rows[1].match_started);
    assert!(rows[1].venue.is_empty());
    assert!(rows[1].status.is_empty());
}

#[test]
fn parses_current_matches_fixture() {
    let raw = read_fixture("current_matches.json");
    let rows = parse_matches_json(&raw).expect("fixture should parse");
    assert_eq!(rows.len(), 1);
    assert!(rows[0].match_started);
    assert!(!rows[0].match_ended);
    assert_eq!(rows[0].status, "Pakistan need 84 runs");
}

#[test]
fn parses_match_info_fixture() {
    let raw = read_fixture("match_info.json");
    let detail = parse_match_detail_json(&raw).expect("fixture should parse");
    assert_eq!(detail.name, "India vs Australia, 3rd T20I");
    assert_eq!(detail.toss_winner.as_deref(), Some("India"));
    assert_eq!(detail.toss_choice.as_deref(), Some("bowl"));
    assert_eq!(detail.team_info.len(), 2);
    assert_eq!(detail.team_info[0].name, "Australia");
    assert!(detail.team_info[0].image_url.starts_with("https://"));
    assert_eq!(detail.score.len(), 2);
    assert_eq!(detail.score[1].runs, 187);
    assert_eq!(detail.score[1].wickets, 4);
    assert_eq!(detail.score[1].overs, 19.2);
    assert_eq!(detail.date_time_gmt, "2026-07-14T18:30:00");
}

#[test]
fn listing_without_data_is_empty() {
    let rows = parse_matches_json(r#"{"status":"failure","reason":"invalid api key"}"#)
        .expect("envelope without data should parse");
    assert!(rows.is_empty());

    let rows = parse_matches_json(r#"{"data":null,"status":"success"}"#)
        .expect("null data should parse");
    assert!(rows.is_empty());
}

#[test]
fn null_body_is_empty_listing() {
    let rows = parse_matches_json("null").expect("null body should parse");
    assert!(rows.is_empty());
}

#[test]
fn detail_without_data_is_an_error() {
    assert!(parse_match_detail_json(r#"{"status":"failure"}"#).is_err());
    assert!(parse_match_detail_json(r#"{"data":null,"status":"success"}"#).is_err());
    assert!(parse_match_detail_json("null").is_err());
}

#[test]
fn malformed_body_is_an_error() {
    assert!(parse_matches_json("{not json").is_err());
    assert!(parse_match_detail_json("{not json").is_err());
}
