use std::collections::HashSet;

use seomaster_core::{AnalysisModule, InputValues};

#[test]
fn test_six_modules_with_distinct_ids() {
    let ids: HashSet<&str> = AnalysisModule::ALL.iter().map(|m| m.id()).collect();
    assert_eq!(ids.len(), 6);
}

#[test]
fn test_display_matches_id() {
    for module in AnalysisModule::ALL {
        assert_eq!(module.to_string(), module.id());
    }
}

#[test]
fn test_parse_round_trip() {
    for module in AnalysisModule::ALL {
        let parsed: AnalysisModule = module.id().parse().unwrap();
        assert_eq!(parsed, module);
    }
}

#[test]
fn test_parse_rejects_unknown_module() {
    let err = "rank-tracker".parse::<AnalysisModule>().unwrap_err();
    assert!(err.to_string().contains("rank-tracker"));
}

#[test]
fn test_serde_uses_screaming_snake_case() {
    let json = serde_json::to_string(&AnalysisModule::LocalSeo).unwrap();
    assert_eq!(json, "\"LOCAL_SEO\"");

    let parsed: AnalysisModule = serde_json::from_str("\"COMPETITOR_ANALYSIS\"").unwrap();
    assert_eq!(parsed, AnalysisModule::CompetitorAnalysis);
}

#[test]
fn test_catalog_metadata_is_populated() {
    for module in AnalysisModule::ALL {
        assert!(!module.title().is_empty());
        assert!(!module.description().is_empty());
        for field in module.fields() {
            assert!(!field.name.is_empty());
            assert!(!field.label.is_empty());
        }
    }
}

#[test]
fn test_local_seo_fields() {
    let names: Vec<&str> = AnalysisModule::LocalSeo
        .fields()
        .iter()
        .map(|f| f.name)
        .collect();
    assert_eq!(names, vec!["city", "businessType"]);
}

#[test]
fn test_missing_fields_reports_absent_and_blank() {
    let mut inputs = InputValues::new();
    inputs.insert("city".to_string(), "Austin, TX".to_string());
    inputs.insert("businessType".to_string(), "  ".to_string());

    let missing = AnalysisModule::LocalSeo.missing_fields(&inputs);
    assert_eq!(missing, vec!["businessType"]);
}

#[test]
fn test_missing_fields_empty_when_all_supplied() {
    let mut inputs = InputValues::new();
    inputs.insert("myUrl".to_string(), "https://example.com".to_string());
    inputs.insert(
        "competitorUrl".to_string(),
        "https://competitor.com".to_string(),
    );

    assert!(AnalysisModule::ContentGap.missing_fields(&inputs).is_empty());
}
