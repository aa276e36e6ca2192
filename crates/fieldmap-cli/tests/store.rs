use std::fs;
use std::path::PathBuf;

use chrono::{TimeZone, Utc};
use fieldmap_cli::{HistoryRepository, load_extracted_fields};
use fieldmap_map::{MappingEngine, MappingResolver, MappingSession, discover_fields, document_fields};
use fieldmap_model::{HistoricalMapping, HistoryScope, ManufacturerId, TemplateId};
use fieldmap_standards::MatchingStandards;

fn temp_store_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("fieldmap_store_{label}_{stamp}"));
    dir
}

fn cleanup_dir(dir: &PathBuf) {
    let _ = fs::remove_dir_all(dir);
}

fn mapping(manufacturer: &str, document_type: &str, raw_name: &str, target: &str) -> HistoricalMapping {
    HistoricalMapping {
        scope: HistoryScope::new(ManufacturerId::new(manufacturer), document_type),
        raw_name: raw_name.to_string(),
        target: target.to_string(),
        accepted_confidence: 0.95,
        accepted_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap(),
    }
}

#[test]
fn missing_scope_loads_as_empty_history() {
    let dir = temp_store_dir("missing");
    let repo = HistoryRepository::new(&dir).expect("create repo");
    let scope = HistoryScope::new(ManufacturerId::new("ACME"), "ivr");

    assert!(!repo.exists(&scope));
    assert!(repo.load(&scope).expect("load").is_empty());
    assert!(repo.list().expect("list").is_empty());
    cleanup_dir(&dir);
}

#[test]
fn append_keeps_earlier_entries() {
    let dir = temp_store_dir("append");
    let repo = HistoryRepository::new(&dir).expect("create repo");

    let path = repo
        .append(mapping("Acme Wound", "ivr", "patient_dob", "patient_dob"))
        .expect("append");
    assert!(path.ends_with("%41cme%20%57ound_ivr.json"));
    repo.append(mapping("Acme Wound", "ivr", "wound_loc", "wound_location"))
        .expect("append");

    let scope = HistoryScope::new(ManufacturerId::new("Acme Wound"), "ivr");
    let loaded = repo.load(&scope).expect("load");
    let targets: Vec<&str> = loaded.iter().map(|m| m.target.as_str()).collect();
    assert_eq!(targets, ["patient_dob", "wound_location"]);
    assert_eq!(loaded[0], mapping("Acme Wound", "ivr", "patient_dob", "patient_dob"));

    let stored = repo.load_stored(&scope).expect("load").expect("stored");
    assert_eq!(stored.version, "1.0");
    assert!(stored.updated_at.is_some());
    cleanup_dir(&dir);
}

#[test]
fn scopes_are_kept_apart() {
    let dir = temp_store_dir("scopes");
    let repo = HistoryRepository::new(&dir).expect("create repo");
    repo.append(mapping("ACME", "ivr", "qty", "quantity")).expect("append");
    repo.append(mapping("ACME", "order_form", "qty", "quantity")).expect("append");
    repo.append(mapping("Beta", "ivr", "qty", "quantity")).expect("append");
    repo.append(mapping("ACME", "ivr", "dob", "patient_dob")).expect("append");

    let listed = repo.list().expect("list");
    let scopes: Vec<(String, String, String, usize)> = listed
        .iter()
        .map(|m| {
            let file = m
                .file_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            (m.manufacturer.to_string(), m.document_type.clone(), file, m.mapping_count)
        })
        .collect();
    insta::assert_json_snapshot!(scopes, @r#"
    [
      [
        "ACME",
        "ivr",
        "%41%43%4D%45_ivr.json",
        2
      ],
      [
        "ACME",
        "order_form",
        "%41%43%4D%45_order%5Fform.json",
        1
      ],
      [
        "Beta",
        "ivr",
        "%42eta_ivr.json",
        1
      ]
    ]
    "#);
    cleanup_dir(&dir);
}

#[test]
fn similar_looking_scopes_get_their_own_files() {
    let dir = temp_store_dir("collide");
    let repo = HistoryRepository::new(&dir).expect("create repo");
    let spaced = repo
        .append(mapping("Acme Wound", "ivr", "qty", "quantity"))
        .expect("append");
    let joined = repo
        .append(mapping("Acme", "wound_ivr", "dob", "patient_dob"))
        .expect("append");
    let upper = repo
        .append(mapping("ACME", "wound_ivr", "npi", "provider_npi"))
        .expect("append");
    assert_ne!(spaced, joined);
    assert_ne!(joined, upper);

    let counts: Vec<(String, String, usize)> = repo
        .list()
        .expect("list")
        .into_iter()
        .map(|m| (m.manufacturer.to_string(), m.document_type, m.mapping_count))
        .collect();
    assert_eq!(
        counts,
        [
            ("ACME".to_string(), "wound_ivr".to_string(), 1),
            ("Acme".to_string(), "wound_ivr".to_string(), 1),
            ("Acme Wound".to_string(), "ivr".to_string(), 1),
        ]
    );

    let joined_scope = HistoryScope::new(ManufacturerId::new("Acme"), "wound_ivr");
    let loaded = repo.load(&joined_scope).expect("load");
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].target, "patient_dob");
    cleanup_dir(&dir);
}

#[test]
fn document_type_case_shares_one_file() {
    let dir = temp_store_dir("doc_case");
    let repo = HistoryRepository::new(&dir).expect("create repo");
    let first = repo.append(mapping("ACME", "ivr", "qty", "quantity")).expect("append");
    let second = repo.append(mapping("ACME", "IVR", "dob", "patient_dob")).expect("append");
    assert_eq!(first, second);

    let scope = HistoryScope::new(ManufacturerId::new("ACME"), "Ivr");
    assert_eq!(repo.load(&scope).expect("load").len(), 2);
    cleanup_dir(&dir);
}

#[test]
fn file_holding_another_scope_is_rejected() {
    let dir = temp_store_dir("header");
    let repo = HistoryRepository::new(&dir).expect("create repo");
    let path = repo.append(mapping("Beta", "ivr", "qty", "quantity")).expect("append");
    fs::rename(&path, dir.join("%41%43%4D%45_ivr.json")).expect("rename");

    let scope = HistoryScope::new(ManufacturerId::new("ACME"), "ivr");
    let err = repo.load(&scope).unwrap_err();
    assert!(err.to_string().contains("holds Beta/ivr, expected ACME/ivr"));
    assert!(repo.append(mapping("ACME", "ivr", "dob", "patient_dob")).is_err());
    cleanup_dir(&dir);
}

#[test]
fn append_all_rejects_mixed_scopes() {
    let dir = temp_store_dir("mixed");
    let repo = HistoryRepository::new(&dir).expect("create repo");
    let err = repo
        .append_all(vec![
            mapping("ACME", "ivr", "qty", "quantity"),
            mapping("ACME", "order_form", "qty", "quantity"),
        ])
        .unwrap_err();
    assert!(err.to_string().contains("belongs to ACME/order_form"));
    assert!(repo.append_all(Vec::new()).is_err());
    assert!(repo.list().expect("list").is_empty());
    cleanup_dir(&dir);
}

#[test]
fn list_skips_foreign_json_files() {
    let dir = temp_store_dir("foreign");
    let repo = HistoryRepository::new(&dir).expect("create repo");
    repo.append(mapping("ACME", "ivr", "qty", "quantity")).expect("append");
    fs::write(dir.join("notes.json"), "{\"hello\": true}").expect("write");
    fs::write(dir.join("README.txt"), "not history").expect("write");

    let listed = repo.list().expect("list");
    assert_eq!(listed.len(), 1);
    cleanup_dir(&dir);
}

#[test]
fn corrupt_scope_file_reports_its_path() {
    let dir = temp_store_dir("corrupt");
    let repo = HistoryRepository::new(&dir).expect("create repo");
    fs::write(dir.join("%41%43%4D%45_ivr.json"), "[not json").expect("write");

    let scope = HistoryScope::new(ManufacturerId::new("ACME"), "ivr");
    let err = repo.load(&scope).unwrap_err();
    assert!(format!("{err:#}").contains("%41%43%4D%45_ivr.json"));
    cleanup_dir(&dir);
}

#[test]
fn stored_manual_mappings_drive_later_suggestions() {
    let dir = temp_store_dir("feedback");
    let repo = HistoryRepository::new(&dir).expect("create repo");
    let fields_path = dir.join("acme_ivr.csv");
    fs::write(
        &fields_path,
        "name,label,context,page,top\nbday,,,1,0.1\nPatient DOB,,,1,0.2\n",
    )
    .expect("write fields");

    let standards = MatchingStandards::embedded().expect("standards");
    let engine = MappingEngine::new(standards);
    let acme = ManufacturerId::new("ACME");
    let scope = HistoryScope::new(acme.clone(), "ivr");
    let resolver = MappingResolver::new(acme.clone());

    let extracted = load_extracted_fields(&fields_path).expect("fields");
    let discovered = discover_fields(&extracted, "ivr", &TemplateId::new("acme_ivr"));
    let fields = document_fields(&discovered);
    assert_eq!(fields[0].raw_name, "bday");

    for _ in 0..12 {
        let history = repo.load(&scope).expect("load");
        let mut report = MappingSession::new(&engine, "ivr").run(&fields, &acme, &history);
        let result = report.result_for_mut("bday").expect("bday result");
        let recorded = resolver
            .accept_manual(
                result,
                "patient_dob",
                standards.catalog(),
                Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap(),
            )
            .expect("manual accept");
        repo.append(recorded).expect("append");
    }

    let history = repo.load(&scope).expect("load");
    assert_eq!(history.len(), 12);
    let report = MappingSession::new(&engine, "ivr").run(&fields, &acme, &history);
    let top = report
        .result_for("bday")
        .and_then(|r| r.top())
        .expect("learned suggestion");
    assert_eq!(top.target, "patient_dob");
    assert_eq!(top.confidence, 0.9);
    assert_eq!(top.reasons, vec!["Used in 12 similar templates"]);
    cleanup_dir(&dir);
}
