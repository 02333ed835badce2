//! Integration tests for group profiles and completeness ranking

mod common;

use tail_intel::error::AppError;
use tail_intel::profile::ProfileService;

#[test]
fn test_unknown_group_is_not_found() {
    let db = common::seeded_db();
    let service = ProfileService::new(db.store.clone());

    let err = service.group_profile(999).unwrap_err();
    assert!(matches!(&err, AppError::NotFound(_)));
    assert_eq!(err.error_code(), "NOT_FOUND");
}

#[test]
fn test_profile_summary_enrichment() {
    let db = common::seeded_db();
    let service = ProfileService::new(db.store.clone());

    let profile = service.group_profile(1).unwrap();
    let summary = &profile.summary;

    assert_eq!(summary.group_name, "Lockbit");
    assert_eq!(summary.aliases, "ABCD Gang, Lockbit 3.0, Lockbit Black");
    assert_eq!(summary.synopsis, "Ransomware-as-a-service operation.");
    assert_eq!(summary.motivation, "Financial");
    assert_eq!(summary.regions, "France, Germany");
    assert_eq!(summary.industries, "Finance, Healthcare");
    assert_eq!(summary.mitre_ttps, "T1486 Data Encrypted for Impact");
    assert_eq!(summary.total_victims, "150");
    assert_eq!(summary.first_seen, "2022-03-15");
    assert_eq!(summary.last_seen, "2023-06-01");
}

#[test]
fn test_incidents_ordered_by_completeness_then_date() {
    let db = common::seeded_db();
    let service = ProfileService::new(db.store.clone());

    let profile = service.group_profile(1).unwrap();
    let victims: Vec<&str> = profile
        .incidents
        .iter()
        .map(|i| i.victim_name.as_str())
        .collect();

    // Beta Bank: sector + 300-char description + 1 technique (5.5)
    // Gamma Corp: sector + source url (2.0)
    // Alpha Hospital: sector only (1.0)
    assert_eq!(victims, vec!["Beta Bank", "Gamma Corp", "Alpha Hospital"]);
}

#[test]
fn test_equal_scores_order_most_recent_first() {
    let db = common::seeded_db();
    let service = ProfileService::new(db.store.clone());

    // Both Akira incidents score 1.0 (sector only)
    let profile = service.group_profile(4).unwrap();
    let dates: Vec<&str> = profile
        .incidents
        .iter()
        .map(|i| i.date_of_leak.as_str())
        .collect();
    assert_eq!(dates, vec!["2024-02-10", "2023-09-01"]);
}

#[test]
fn test_incident_records_carry_techniques() {
    let db = common::seeded_db();
    let service = ProfileService::new(db.store.clone());

    let profile = service.group_profile(1).unwrap();
    let beta = profile
        .incidents
        .iter()
        .find(|i| i.victim_name == "Beta Bank")
        .unwrap();
    assert_eq!(beta.mitre_ttps, "T1486 Data Encrypted for Impact");

    let alpha = profile
        .incidents
        .iter()
        .find(|i| i.victim_name == "Alpha Hospital")
        .unwrap();
    assert_eq!(alpha.mitre_ttps, "N/A");
}

#[test]
fn test_missing_group_fields_use_sentinels() {
    let db = common::seeded_db();
    let service = ProfileService::new(db.store.clone());

    let profile = service.group_profile(2).unwrap();
    let summary = &profile.summary;

    assert_eq!(summary.group_name, "Conti");
    assert_eq!(summary.synopsis, "No synopsis available.");
    assert_eq!(summary.total_victims, "0");
    assert_eq!(summary.aliases, "Wizard Spider");
}

#[test]
fn test_group_without_incidents_degrades_to_sentinels() {
    let db = common::seeded_db();
    let service = ProfileService::new(db.store.clone());

    let profile = service.group_profile(3).unwrap();
    let summary = &profile.summary;

    assert_eq!(summary.group_name, "Quietworm");
    assert_eq!(summary.aliases, "N/A");
    assert_eq!(summary.regions, "N/A");
    assert_eq!(summary.industries, "N/A");
    assert_eq!(summary.mitre_ttps, "N/A");
    assert_eq!(summary.motivation, "N/A");
    assert_eq!(summary.first_seen, "N/A");
    assert_eq!(summary.last_seen, "N/A");
    assert!(profile.incidents.is_empty());
}

#[test]
fn test_incident_detail_sentinels() {
    let db = common::seeded_db();
    let service = ProfileService::new(db.store.clone());

    let profile = service.group_profile(1).unwrap();
    let alpha = profile
        .incidents
        .iter()
        .find(|i| i.victim_name == "Alpha Hospital")
        .unwrap();

    assert_eq!(alpha.victim_sector, "Healthcare");
    assert_eq!(alpha.victim_country, "Germany");
    assert_eq!(alpha.data_exposed, "N/A");
    assert!(alpha.source_url.is_none());

    let gamma = profile
        .incidents
        .iter()
        .find(|i| i.victim_name == "Gamma Corp")
        .unwrap();
    assert_eq!(gamma.source_url.as_deref(), Some("https://leaks.example/gamma"));
}
