//! Snapshot round-trips against a real temp directory.

use pol_core::system::CountryTag;
use pol_engine::CampaignBuilder;
use pol_io::{delete_campaign, list_campaigns, load_campaign, save_campaign, IoError};

#[test]
fn save_load_round_trip_preserves_the_campaign() {
    let dir = tempfile::tempdir().unwrap();
    let state = CampaignBuilder::new(11, CountryTag::Usa).build();

    save_campaign(dir.path(), "slot1", &state).unwrap();
    let loaded = load_campaign(dir.path(), "slot1").unwrap();

    assert_eq!(
        serde_json::to_string(&state).unwrap(),
        serde_json::to_string(&loaded).unwrap()
    );
}

#[test]
fn saving_twice_replaces_the_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let first = CampaignBuilder::new(1, CountryTag::Japan).build();
    let second = CampaignBuilder::new(2, CountryTag::Japan).build();

    save_campaign(dir.path(), "slot", &first).unwrap();
    save_campaign(dir.path(), "slot", &second).unwrap();

    let loaded = load_campaign(dir.path(), "slot").unwrap();
    assert_eq!(loaded.seed, 2);
    assert_eq!(list_campaigns(dir.path()).unwrap(), vec!["slot"]);
}

#[test]
fn list_is_sorted_and_delete_removes() {
    let dir = tempfile::tempdir().unwrap();
    let state = CampaignBuilder::new(3, CountryTag::Korea).build();

    save_campaign(dir.path(), "bravo", &state).unwrap();
    save_campaign(dir.path(), "alpha", &state).unwrap();
    assert_eq!(list_campaigns(dir.path()).unwrap(), vec!["alpha", "bravo"]);

    delete_campaign(dir.path(), "alpha").unwrap();
    assert_eq!(list_campaigns(dir.path()).unwrap(), vec!["bravo"]);
    assert!(matches!(
        load_campaign(dir.path(), "alpha"),
        Err(IoError::NotFound(id)) if id == "alpha"
    ));
}

#[test]
fn missing_directory_lists_empty() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("never_created");
    assert!(list_campaigns(&missing).unwrap().is_empty());
}

#[test]
fn traversal_ids_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let state = CampaignBuilder::new(4, CountryTag::Philippines).build();
    assert!(matches!(
        save_campaign(dir.path(), "../outside", &state),
        Err(IoError::InvalidId(_))
    ));
}
