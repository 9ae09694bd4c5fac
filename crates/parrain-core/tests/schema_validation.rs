//! JsonSchema validation for the types served over the HTTP API.

use chrono::Utc;
use schemars::schema_for;

use parrain_core::CohortCode;
use parrain_core::entities::{PairingDetail, StudentSummary};
use parrain_core::errors::ErrorKind;
use parrain_core::responses::{
    DrawResponse, ImportReport, ImportResponse, SponsorshipStats, UndoResponse,
};

fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

fn summary(id: &str, last: &str, first: &str, cohort: &str) -> StudentSummary {
    StudentSummary {
        id: id.into(),
        last_name: last.into(),
        first_name: first.into(),
        cohort: CohortCode::new(cohort).unwrap(),
    }
}

#[test]
fn stats_use_front_end_field_names() {
    let stats = SponsorshipStats {
        remaining_mentees: 12,
        available_mentors: 40,
    };
    let value = serde_json::to_value(stats).unwrap();
    assert_eq!(value["remaining_filleuls"], 12);
    assert_eq!(value["available_parrains"], 40);

    let schema = serde_json::to_value(schema_for!(SponsorshipStats)).unwrap();
    let errors = validate_against_schema(&schema, &value);
    assert!(errors.is_empty(), "{errors:?}");
}

#[test]
fn undo_response_matches_schema() {
    let response = UndoResponse {
        message: "Undid pairing".into(),
        reverted: PairingDetail {
            id: "bin-0000000a".into(),
            mentee: summary("stu-00000001", "Martin", "Léa", "B1"),
            mentor: summary("stu-00000002", "Durand", "Hugo", "B2"),
            created_at: Utc::now(),
        },
    };
    let value = serde_json::to_value(&response).unwrap();
    let schema = serde_json::to_value(schema_for!(UndoResponse)).unwrap();
    let errors = validate_against_schema(&schema, &value);
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(value["reverted"]["mentor"]["cohort"], "B2");
}

#[test]
fn import_report_rejects_negative_counts() {
    let schema = serde_json::to_value(schema_for!(ImportReport)).unwrap();
    let bad = serde_json::json!({
        "imported": -1,
        "skipped_unknown_cohort": 0,
        "skipped_incomplete": 0
    });
    assert!(!validate_against_schema(&schema, &bad).is_empty());
}

#[test]
fn error_kind_serializes_snake_case() {
    assert_eq!(
        serde_json::to_string(&ErrorKind::NotFound).unwrap(),
        "\"not_found\""
    );
    let schema = serde_json::to_value(schema_for!(ErrorKind)).unwrap();
    let errors = validate_against_schema(&schema, &serde_json::json!("persistence"));
    assert!(errors.is_empty(), "{errors:?}");
}

#[test]
fn draw_response_uses_front_end_keys() {
    let detail = PairingDetail {
        id: "bin-0000000b".into(),
        mentee: summary("stu-00000003", "Petit", "Noé", "M1"),
        mentor: summary("stu-00000004", "Roux", "Inès", "M2"),
        created_at: Utc::now(),
    };
    let value = serde_json::to_value(DrawResponse::from(&detail)).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "filleul": {"nom": "Petit", "prenom": "Noé", "promotion": "M1"},
            "parrain": {"nom": "Roux", "prenom": "Inès", "promotion": "M2"}
        })
    );

    let schema = serde_json::to_value(schema_for!(DrawResponse)).unwrap();
    let errors = validate_against_schema(&schema, &value);
    assert!(errors.is_empty(), "{errors:?}");
}

#[test]
fn import_response_flattens_counts() {
    let response = ImportResponse::success(ImportReport {
        imported: 42,
        skipped_unknown_cohort: 3,
        skipped_incomplete: 0,
    });
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["message"], "Successfully imported 42 students.");
    assert_eq!(value["status"], "success");
    assert_eq!(value["skipped_unknown_cohort"], 3);

    let schema = serde_json::to_value(schema_for!(ImportResponse)).unwrap();
    let errors = validate_against_schema(&schema, &value);
    assert!(errors.is_empty(), "{errors:?}");
}
