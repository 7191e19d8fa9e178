use super::common::*;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::admission::router::optimize_handler;
use crate::workflows::admission::{
    admission_router, AdmissionRequestError, AdmissionService, OptimizeRequest,
};

fn service() -> Arc<AdmissionService> {
    Arc::new(AdmissionService::default())
}

fn request(notes: Option<&str>, guideline: Option<&str>) -> OptimizeRequest {
    OptimizeRequest {
        doctor_notes: notes.map(str::to_string),
        guideline_text: guideline.map(str::to_string),
        reference_notes: None,
    }
}

async fn post_json(body: Value) -> axum::response::Response {
    admission_router(service())
        .oneshot(
            axum::http::Request::post("/api/optimize")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .expect("router responds")
}

#[test]
fn service_rejects_blank_notes_before_scoring() {
    let err = AdmissionService::default()
        .optimize(request(Some("   "), Some(guideline_text())))
        .expect_err("blank notes rejected");
    assert_eq!(err, AdmissionRequestError::MissingNotes);
}

#[test]
fn service_rejects_guideline_without_lines() {
    let err = AdmissionService::default()
        .optimize(request(Some(pneumonia_notes()), Some(" \n \n")))
        .expect_err("empty guideline rejected");
    assert_eq!(err, AdmissionRequestError::EmptyGuideline);

    let err = AdmissionService::default()
        .optimize(request(Some(pneumonia_notes()), None))
        .expect_err("absent guideline rejected");
    assert_eq!(err, AdmissionRequestError::EmptyGuideline);
}

#[test]
fn service_skips_validation_without_reference() {
    let response = AdmissionService::default()
        .optimize(request(Some(pneumonia_notes()), Some(guideline_text())))
        .expect("valid request");

    assert!(response.validation.is_none());
    assert_eq!(response.report.extracted_criteria.len(), 5);
}

#[tokio::test]
async fn handler_returns_bad_request_for_missing_notes() {
    let response = optimize_handler(
        State(service()),
        Ok(axum::Json(request(None, Some(guideline_text())))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert_eq!(body, json!({ "error": "Doctor notes are required." }));
}

#[tokio::test]
async fn handler_returns_unprocessable_for_empty_guideline() {
    let response = optimize_handler(
        State(service()),
        Ok(axum::Json(request(Some(pneumonia_notes()), Some("")))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn optimize_route_returns_camel_case_report() {
    let response = post_json(json!({
        "doctorNotes": pneumonia_notes(),
        "guidelineText": guideline_text(),
    }))
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["overallScore"], json!(20));
    assert_eq!(body["admissionRecommended"], json!(false));
    assert_eq!(body["extractedCriteria"][0]["id"], json!("C1"));
    assert_eq!(body["extractedCriteria"][0]["category"], json!("Respiratory"));
    assert_eq!(body["missingCriteria"][0]["status"], json!("Met"));
    assert_eq!(body["missingCriteria"][1]["status"], json!("Partially Met"));
    assert_eq!(
        body["revisedNotes"]["riskStratification"],
        json!("Comorbidities (htn, dm) increase risk of deterioration.")
    );
    assert!(body.get("validation").is_none());
}

#[tokio::test]
async fn optimize_route_accepts_pdf_text_alias_and_reference_notes() {
    let response = post_json(json!({
        "doctorNotes": pneumonia_notes(),
        "pdfText": guideline_text(),
        "referenceNotes": "Patient requires supplemental oxygen therapy for hypoxemia.",
    }))
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let validation = &body["validation"];
    assert_eq!(validation["sections"].as_array().map(Vec::len), Some(4));
    assert_eq!(validation["sections"][0]["title"], json!("Clinical Summary"));
    assert!(validation["overall"].as_u64().is_some_and(|score| score <= 100));
}

#[tokio::test]
async fn optimize_route_rejects_missing_notes_field() {
    let response = post_json(json!({ "guidelineText": guideline_text() })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn optimize_route_reports_malformed_payload_as_json_error() {
    let response = post_json(json!({
        "doctorNotes": 5,
        "guidelineText": guideline_text(),
    }))
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .is_some_and(|message| message.contains("doctorNotes")));
}
