//! Route tests for document exports.

use std::io::{Cursor, Read};
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use leasebook_core::export::{PDF_CONTENT_TYPE, XLSX_CONTENT_TYPE};
use leasebook_core::lease::LeaseBook;
use leasebook_core::reports::SnapshotStore;

use crate::test_support::{BrokenStore, app, app_with, body_bytes, body_json, get, send};

fn worksheet_xml(bytes: &[u8]) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut xml = String::new();
    archive
        .by_name("xl/worksheets/sheet1.xml")
        .unwrap()
        .read_to_string(&mut xml)
        .unwrap();
    xml
}

#[tokio::test]
async fn test_excel_export_headers_and_rows() {
    let response = send(app(), get("/api/v1/export/customers/excel")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], XLSX_CONTENT_TYPE);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"customers.xlsx\""
    );

    let bytes = body_bytes(response).await;
    let xml = worksheet_xml(&bytes);
    // Header row plus one row per customer.
    assert_eq!(xml.matches("<row ").count(), 4);
}

#[tokio::test]
async fn test_excel_export_of_empty_dataset_has_header_only() {
    let app = app_with(Arc::new(SnapshotStore::new(LeaseBook::default())));
    let response = send(app, get("/api/v1/export/customers/excel")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let xml = worksheet_xml(&body_bytes(response).await);
    assert_eq!(xml.matches("<row ").count(), 1);
}

#[tokio::test]
async fn test_pdf_export_headers_and_body() {
    let response = send(app(), get("/api/v1/export/payments/pdf")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], PDF_CONTENT_TYPE);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"payment_report.pdf\""
    );

    let bytes = body_bytes(response).await;
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_exports_require_auth() {
    for uri in ["/api/v1/export/customers/excel", "/api/v1/export/payments/pdf"] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = send(app(), request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_export_load_failure_is_internal_error() {
    let response = send(
        app_with(Arc::new(BrokenStore)),
        get("/api/v1/export/payments/pdf"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"], "INTERNAL_ERROR");
}
