//! End-to-end tests for the upload and gallery routes.

use axum_test::TestServer;
use axum_test::multipart::{MultipartForm, Part};
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

use teeform_server::{AppState, Config, routes::create_app};

struct TestApp {
    server: TestServer,
    upload_dir: PathBuf,
    _tempdir: TempDir,
}

fn build_test_app() -> TestApp {
    let tempdir = tempfile::tempdir().expect("failed to create temporary directory");
    let upload_dir = tempdir.path().join("uploads");
    std::fs::create_dir_all(&upload_dir).expect("failed to create upload directory");

    let config = Config {
        server_host: "127.0.0.1".into(),
        server_port: 0,
        upload_dir: upload_dir.clone(),
        catalog_path: upload_dir.join("data.json"),
        upload_url_prefix: "/uploads".into(),
        max_upload_bytes: 1024 * 1024,
        cors_allowed_origins: vec![],
    };

    let state = AppState::new(config);
    let server = TestServer::new(create_app(state)).unwrap();

    TestApp {
        server,
        upload_dir,
        _tempdir: tempdir,
    }
}

fn design_upload(position: &str, size: &str) -> MultipartForm {
    MultipartForm::new()
        .add_part(
            "file",
            Part::bytes(vec![0x89, b'P', b'N', b'G'])
                .file_name("design.png")
                .mime_type("image/png"),
        )
        .add_text("position", position.to_owned())
        .add_text("size", size.to_owned())
}

#[tokio::test]
async fn upload_then_list_round_trip() {
    let app = build_test_app();

    let response = app
        .server
        .post("/upload")
        .multipart(design_upload(
            r#"{"x": 30.0, "y": 30.0}"#,
            r#"{"width": 33.0, "height": 33.0}"#,
        ))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["message"], "File uploaded successfully");
    let file_url = body["fileUrl"].as_str().unwrap();
    assert!(file_url.starts_with("/uploads/"));
    assert_eq!(body["position"]["x"], 30.0);
    assert_eq!(body["size"]["width"], 33.0);

    // The binary is on disk under the advertised name.
    let name = file_url.rsplit('/').next().unwrap();
    assert!(app.upload_dir.join(name).exists());

    let listed: Value = app.server.get("/images").await.json();
    let images = listed["images"].as_array().unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0]["url"], file_url);
    assert_eq!(listed["hasMore"], false);
}

#[tokio::test]
async fn pdf_upload_is_rejected_with_400() {
    let app = build_test_app();

    let form = MultipartForm::new()
        .add_part(
            "file",
            Part::bytes(b"%PDF-1.4".to_vec())
                .file_name("design.pdf")
                .mime_type("application/pdf"),
        )
        .add_text("position", r#"{"x": 30.0, "y": 30.0}"#)
        .add_text("size", r#"{"width": 33.0, "height": 33.0}"#);

    let response = app.server.post("/upload").multipart(form).await;
    response.assert_status_bad_request();

    let body: Value = response.json();
    assert!(
        body["error"].as_str().unwrap().contains("unsupported media type"),
        "unexpected error body: {body}"
    );
}

#[tokio::test]
async fn missing_file_is_a_400() {
    let app = build_test_app();

    let form = MultipartForm::new()
        .add_text("position", r#"{"x": 30.0, "y": 30.0}"#)
        .add_text("size", r#"{"width": 33.0, "height": 33.0}"#);

    let response = app.server.post("/upload").multipart(form).await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], "no file uploaded");
}

#[tokio::test]
async fn malformed_position_is_a_400() {
    let app = build_test_app();

    let response = app
        .server
        .post("/upload")
        .multipart(design_upload("{broken", r#"{"width": 33.0, "height": 33.0}"#))
        .await;
    response.assert_status_bad_request();

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("position"));
}

#[tokio::test]
async fn out_of_range_placement_is_a_400() {
    let app = build_test_app();

    let response = app
        .server
        .post("/upload")
        .multipart(design_upload(
            r#"{"x": 130.0, "y": 30.0}"#,
            r#"{"width": 33.0, "height": 33.0}"#,
        ))
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn get_on_upload_route_is_a_405() {
    let app = build_test_app();
    let response = app.server.get("/upload").await;
    response.assert_status(axum::http::StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn empty_catalog_lists_as_empty_page() {
    let app = build_test_app();

    let response = app.server.get("/images").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["images"].as_array().unwrap().len(), 0);
    assert_eq!(body["hasMore"], false);
}

#[tokio::test]
async fn paginates_eight_records_with_limit_six() {
    let app = build_test_app();

    for i in 0..8 {
        let response = app
            .server
            .post("/upload")
            .multipart(design_upload(
                &format!(r#"{{"x": {i}.0, "y": 10.0}}"#),
                r#"{"width": 20.0, "height": 20.0}"#,
            ))
            .await;
        response.assert_status_ok();
    }

    let first: Value = app.server.get("/images").add_query_param("page", 1).add_query_param("limit", 6).await.json();
    assert_eq!(first["images"].as_array().unwrap().len(), 6);
    assert_eq!(first["hasMore"], true);

    let second: Value = app.server.get("/images").add_query_param("page", 2).add_query_param("limit", 6).await.json();
    let second_images = second["images"].as_array().unwrap();
    assert_eq!(second_images.len(), 2);
    assert_eq!(second["hasMore"], false);

    // Append order is pagination order: pages 1 and 2 line up with the
    // upload sequence.
    assert_eq!(first["images"][0]["position"]["x"], 0.0);
    assert_eq!(second_images[0]["position"]["x"], 6.0);
    assert_eq!(second_images[1]["position"]["x"], 7.0);

    // Past-the-end page is empty, not an error.
    let third: Value = app.server.get("/images").add_query_param("page", 3).add_query_param("limit", 6).await.json();
    assert_eq!(third["images"].as_array().unwrap().len(), 0);
    assert_eq!(third["hasMore"], false);
}

#[tokio::test]
async fn zero_limit_is_a_400() {
    let app = build_test_app();

    let response = app
        .server
        .get("/images")
        .add_query_param("limit", 0)
        .await;
    response.assert_status_bad_request();

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("limit"));
}

#[tokio::test]
async fn zero_page_is_a_400() {
    let app = build_test_app();
    let response = app.server.get("/images").add_query_param("page", 0).await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn pixel_inputs_with_canvas_are_normalized() {
    let app = build_test_app();

    let form = design_upload(r#"{"x": 86.4, "y": 86.4}"#, r#"{"width": 96.0, "height": 96.0}"#)
        .add_text("canvas", r#"{"width": 288.0, "height": 288.0}"#);

    let response = app.server.post("/upload").multipart(form).await;
    response.assert_status_ok();

    let body: Value = response.json();
    let x = body["position"]["x"].as_f64().unwrap();
    assert!((x - 30.0).abs() < 1e-9, "expected 30%, got {x}");
}
