use super::*;

#[test]
fn decodes_successful_process_response() {
    let body = r#"{
        "status": "success",
        "measurements": {
            "shoulder_width": 412.5,
            "torso_height": 430,
            "chest_width": 390.1,
            "shoulder_to_chest_ratio": 1.057,
            "torso_aspect_ratio": 1.04
        },
        "result_url": "/static/result_20240101_120000.jpg"
    }"#;
    let parsed: ProcessImagesResponse = serde_json::from_str(body).expect("decode");
    assert_eq!(parsed.status, "success");
    assert_eq!(parsed.measurements.torso_height, Some(430.0));
    assert_eq!(parsed.measurements.shoulder_width, Some(412.5));
    assert_eq!(parsed.result_url, "/static/result_20240101_120000.jpg");
}

#[test]
fn bad_measurement_values_still_decode() {
    let body = r#"{
        "status": "success",
        "measurements": {
            "shoulder_width": null,
            "torso_height": "tall",
            "chest_width": 390.1,
            "shoulder_to_chest_ratio": 1.057
        },
        "result_url": "/static/x.jpg"
    }"#;
    let parsed: ProcessImagesResponse = serde_json::from_str(body).expect("lenient decode");
    assert_eq!(parsed.result_url, "/static/x.jpg");
    assert_eq!(parsed.measurements.shoulder_width, None);
    assert_eq!(parsed.measurements.torso_height, None);
    assert_eq!(parsed.measurements.chest_width, Some(390.1));
    assert_eq!(parsed.measurements.torso_aspect_ratio, None);
}

#[test]
fn missing_or_malformed_measurements_object_decodes_empty() {
    for body in [
        r#"{"status":"success","result_url":"/static/x.jpg"}"#,
        r#"{"status":"success","measurements":null,"result_url":"/static/x.jpg"}"#,
        r#"{"status":"success","measurements":[1,2,3],"result_url":"/static/x.jpg"}"#,
    ] {
        let parsed: ProcessImagesResponse = serde_json::from_str(body).expect(body);
        assert_eq!(parsed.measurements, Measurements::default(), "{body}");
    }
}

#[test]
fn response_without_result_url_is_rejected() {
    let body = r#"{"status":"success","measurements":{}}"#;
    assert!(serde_json::from_str::<ProcessImagesResponse>(body).is_err());
}

#[test]
fn health_body_tolerates_extra_and_missing_fields() {
    let full: HealthResponse = serde_json::from_str(
        r#"{"status":"ok","timestamp":"2024-01-01T00:00:00.123456","service":"AI Fitting App API","version":"1.0.0","extra":true}"#,
    )
    .expect("decode");
    assert_eq!(full.status, "ok");
    assert_eq!(full.version.as_deref(), Some("1.0.0"));

    let empty: HealthResponse = serde_json::from_str("{}").expect("decode");
    assert!(empty.status.is_empty());
}

#[test]
fn error_message_is_detail_verbatim() {
    assert_eq!(
        ErrorBody::message_from_body(br#"{"detail":"Invalid file type"}"#),
        "Invalid file type"
    );
    assert_eq!(
        ErrorBody::message_from_body(br#"{"detail":"  No person detected in image  "}"#),
        "  No person detected in image  "
    );
}

#[test]
fn error_message_falls_back_without_detail() {
    assert_eq!(ErrorBody::message_from_body(b"{}"), DEFAULT_PROCESS_FAILURE);
    assert_eq!(
        ErrorBody::message_from_body(br#"{"detail":null}"#),
        DEFAULT_PROCESS_FAILURE
    );
    assert_eq!(
        ErrorBody::message_from_body(br#"{"detail":""}"#),
        DEFAULT_PROCESS_FAILURE
    );
    assert_eq!(
        ErrorBody::message_from_body(b"<html>502 Bad Gateway</html>"),
        DEFAULT_PROCESS_FAILURE
    );
}

#[test]
fn structured_detail_is_rendered_as_json() {
    let message = ErrorBody::message_from_body(
        br#"{"detail":[{"loc":["body","user_image"],"msg":"field required"}]}"#,
    );
    assert!(message.contains("field required"));
    assert!(message.starts_with('['));
}
