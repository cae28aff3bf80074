//! Request payload and response parsing tests.

use chrono::NaiveDate;
use epiforecast_dashboard::models::{Algorithm, ScoringRequest, ScoringResponse};
use epiforecast_dashboard::DashboardError;
use serde_json::json;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

#[test]
fn algorithm_wire_names() {
    assert_eq!(Algorithm::Sir.as_str(), "SIR");
    assert_eq!(Algorithm::Logistic.to_string(), "LOGISTIC");
    assert_eq!(
        serde_json::to_value(Algorithm::Calibration).unwrap(),
        json!("CALIBRATION")
    );
}

#[test]
fn algorithm_parses_case_insensitively() {
    assert_eq!("sir".parse::<Algorithm>().unwrap(), Algorithm::Sir);
    assert_eq!(" Calibration ".parse::<Algorithm>().unwrap(), Algorithm::Calibration);
}

#[test]
fn unknown_algorithm_is_rejected() {
    let err = "SEIR".parse::<Algorithm>().unwrap_err();
    assert!(matches!(err, DashboardError::InvalidArgument(_)));
}

// ---------------------------------------------------------------------------
// ScoringRequest
// ---------------------------------------------------------------------------

#[test]
fn payload_date_has_no_zero_padding() {
    let req = ScoringRequest::new(Algorithm::Sir, date(2020, 3, 3), "Poland", 14, 10_000, 20, 10);
    assert_eq!(req.payload_date(), "3/3/20");

    let req = ScoringRequest::new(Algorithm::Sir, date(2020, 1, 22), "Poland", 14, 10_000, 20, 10);
    assert_eq!(req.payload_date(), "1/22/20");

    let req = ScoringRequest::new(Algorithm::Sir, date(2021, 11, 5), "Poland", 14, 10_000, 20, 10);
    assert_eq!(req.payload_date(), "11/5/21");
}

#[test]
fn payload_has_seven_fields_and_one_row() {
    let req = ScoringRequest::new(
        Algorithm::Calibration,
        date(2020, 1, 22),
        "Poland",
        40,
        10_000,
        20,
        10,
    );
    let payload = serde_json::to_value(req.to_payload()).unwrap();

    assert_eq!(
        payload,
        json!({
            "fields": ["algorithm", "start_date", "country", "predict_range", "S0", "I0", "R0"],
            "values": [["CALIBRATION", "1/22/20", "Poland", 40, 10000, 20, 10]]
        })
    );
}

// ---------------------------------------------------------------------------
// ScoringResponse
// ---------------------------------------------------------------------------

#[test]
fn parses_flat_table() {
    let body = json!({
        "fields": ["Actual", "Predicted"],
        "values": [[5, 6], [9, 10.5]]
    })
    .to_string();

    let resp = ScoringResponse::from_json(&body).unwrap();
    assert_eq!(resp.fields, vec!["Actual", "Predicted"]);
    assert_eq!(resp.len(), 2);
    assert_eq!(resp.values[1][1], json!(10.5));
}

#[test]
fn parses_predictions_envelope() {
    let body = json!({
        "predictions": [{ "fields": ["I"], "values": [[20], [25], [31]] }]
    })
    .to_string();

    let resp = ScoringResponse::from_json(&body).unwrap();
    assert_eq!(resp.fields, vec!["I"]);
    assert_eq!(resp.len(), 3);
}

#[test]
fn empty_values_is_an_empty_table() {
    let resp = ScoringResponse::from_json(r#"{"fields": ["I"], "values": []}"#).unwrap();
    assert!(resp.is_empty());
}

#[test]
fn missing_fields_is_malformed() {
    let err = ScoringResponse::from_json(r#"{"values": [[1]]}"#).unwrap_err();
    assert!(matches!(err, DashboardError::MalformedResponse(ref m) if m.contains("fields")));
}

#[test]
fn missing_values_is_malformed() {
    let err = ScoringResponse::from_json(r#"{"fields": ["I"]}"#).unwrap_err();
    assert!(matches!(err, DashboardError::MalformedResponse(ref m) if m.contains("values")));
}

#[test]
fn ragged_row_is_malformed() {
    let err = ScoringResponse::from_json(r#"{"fields": ["A", "B"], "values": [[1, 2], [3]]}"#)
        .unwrap_err();
    assert!(matches!(err, DashboardError::MalformedResponse(ref m) if m.contains("Row 1")));
}

#[test]
fn non_json_body_is_malformed() {
    let err = ScoringResponse::from_json("<html>oops</html>").unwrap_err();
    assert!(matches!(err, DashboardError::MalformedResponse(_)));
}

#[test]
fn empty_predictions_is_malformed() {
    let err = ScoringResponse::from_json(r#"{"predictions": []}"#).unwrap_err();
    assert!(matches!(err, DashboardError::MalformedResponse(_)));
}
