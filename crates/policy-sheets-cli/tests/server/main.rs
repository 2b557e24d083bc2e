//! HTTP session tests, driven through the router without a socket.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use policy_sheets::{ReportConfig, XLSX_MIME_TYPE};
use policy_sheets_cli::router;
use pretty_assertions::assert_eq;
use tower::ServiceExt;

const BOUNDARY: &str = "policy-sheets-test-boundary";

const UPLOAD: &str = r#"[
    {"id": "/providers/Microsoft.Authorization/policyDefinitions/abc-123",
     "displayName": "Allowed locations",
     "policyRule": {"then": {"effect": "deny"}},
     "versions": ["1.0.0", "1.1.0"]},
    {"name": "def-456",
     "id": "/providers/Microsoft.Authorization/policyDefinitions/def-456",
     "properties": {"displayName": "Audit tags", "policyRule": {"then": {"effect": "audit"}}}}
]"#;

fn app() -> Router {
    router(ReportConfig::default(), 1024 * 1024)
}

fn upload_request(field: &str, content: &str) -> Request<Body> {
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"export.json\"\r\nContent-Type: application/json\r\n\r\n{content}\r\n--{b}--\r\n",
        b = BOUNDARY,
    );
    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

#[tokio::test]
async fn index_shows_upload_form() {
    let response = app().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("enctype=\"multipart/form-data\""));
    assert!(!html.contains("<table>"));
}

#[tokio::test]
async fn download_before_upload_is_not_found() {
    let response = app().oneshot(get("/download")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn upload_previews_and_downloads() {
    let app = app();

    let response = app.clone().oneshot(upload_request("file", UPLOAD)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("<td>abc-123</td>"));
    assert!(html.contains("<td>def-456</td>"));
    assert!(html.contains("<td>1.0.0, 1.1.0</td>"));

    // Preview survives a page reload
    let html = String::from_utf8(body_bytes(app.clone().oneshot(get("/")).await.unwrap()).await).unwrap();
    assert_eq!(html.matches("<tr>").count(), 3);

    for _ in 0..2 {
        let response = app.clone().oneshot(get("/download")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], XLSX_MIME_TYPE);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Azure_Policy_Definitions.xlsx\""
        );

        let bytes = body_bytes(response).await;
        let archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        assert!(archive.file_names().any(|n| n == "xl/worksheets/sheet1.xml"));
    }
}

#[tokio::test]
async fn object_upload_reports_error_and_drops_artifact() {
    let app = app();
    app.clone().oneshot(upload_request("file", UPLOAD)).await.unwrap();

    let response = app
        .clone()
        .oneshot(upload_request("file", r#"{"value": []}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("class=\"error\""));
    assert!(html.contains("found an object"));
    assert!(!html.contains("<table>"));

    let response = app.clone().oneshot(get("/download")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The session keeps working after a failure
    let response = app.oneshot(upload_request("file", UPLOAD)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_file_field_is_bad_request() {
    let response = app()
        .oneshot(upload_request("attachment", UPLOAD))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
