//! Web API Tattoo Tests
//!
//! Integration tests for the record and category endpoints, including
//! image uploads, against an in-memory SQLite model.

mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum_test::multipart::MultipartForm;
use serde_json::{json, Value};
use std::sync::Arc;

use common::{bearer_token, create_test_app, create_test_app_with, image_part, jpeg_part, png_part};
use tattoo_api::{Database, SqliteTattooModel};

/// Assert `name` is `<base>-<digits><ext>`.
fn assert_stored_name(name: &str, base: &str, ext: &str) {
    let millis = name
        .strip_prefix(&format!("{base}-"))
        .and_then(|rest| rest.strip_suffix(ext))
        .unwrap_or_else(|| panic!("unexpected stored name {name}"));
    assert!(!millis.is_empty());
    assert!(millis.chars().all(|c| c.is_ascii_digit()), "{name}");
}

async fn create_category(server: &axum_test::TestServer, name: &str) -> i64 {
    let response = server
        .post("/records/category")
        .json(&json!({ "name": name }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["data"]["id"].as_i64().unwrap()
}

// ============================================================================
// Records
// ============================================================================

#[tokio::test]
async fn test_list_tattoos_empty() {
    let app = create_test_app().await;

    let response = app.server.get("/records").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "data": [] }));
}

#[tokio::test]
async fn test_create_tattoo_with_png() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/records")
        .multipart(
            MultipartForm::new()
                .add_text("name", "Koi")
                .add_text("description", "Japanese koi")
                .add_part("image", png_part("koi.png")),
        )
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["data"]["name"], "Koi");
    assert_eq!(body["data"]["description"], "Japanese koi");

    let image = body["data"]["image"].as_str().unwrap();
    assert_stored_name(image, "koi", ".png");
    assert_eq!(app.stored_files(), vec![image.to_string()]);
    assert_eq!(
        std::fs::read(app.uploads.path().join(image)).unwrap(),
        b"\x89PNG\r\n\x1a\nfake-png"
    );
}

#[tokio::test]
async fn test_create_tattoo_with_extensionless_jpeg() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/records")
        .multipart(
            MultipartForm::new()
                .add_text("name", "Portrait")
                .add_part("image", jpeg_part("photo")),
        )
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_stored_name(body["data"]["image"].as_str().unwrap(), "photo", "");
}

#[tokio::test]
async fn test_create_tattoo_with_parameterized_content_type() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/records")
        .multipart(
            MultipartForm::new()
                .add_text("name", "Koi")
                .add_part(
                    "image",
                    image_part("koi.png", "image/png; charset=binary", b"\x89PNG\r\n\x1a\n"),
                ),
        )
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    let image = body["data"]["image"].as_str().unwrap();
    assert_stored_name(image, "koi", ".png");
    assert_eq!(app.stored_files(), vec![image.to_string()]);
}

#[tokio::test]
async fn test_create_tattoo_with_uppercase_content_type() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/records")
        .multipart(
            MultipartForm::new()
                .add_text("name", "Scan")
                .add_part("image", image_part("scan.jpg", "IMAGE/JPEG", b"\xff\xd8\xff")),
        )
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_stored_name(response.json::<Value>()["data"]["image"].as_str().unwrap(), "scan", ".jpg");
}

#[tokio::test]
async fn test_create_tattoo_with_leading_dots_name() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/records")
        .multipart(
            MultipartForm::new()
                .add_text("name", "Dots")
                .add_part("image", png_part("..png")),
        )
        .await;

    response.assert_status(StatusCode::CREATED);
    let image = response.json::<Value>()["data"]["image"].as_str().unwrap().to_string();
    assert_stored_name(&image, ".", ".png");
    assert_eq!(app.stored_files(), vec![image]);
}

#[tokio::test]
async fn test_create_tattoo_without_image() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/records")
        .multipart(MultipartForm::new().add_text("name", "Script"))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert!(response.json::<Value>()["data"]["image"].is_null());
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_create_tattoo_rejects_gif() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/records")
        .multipart(
            MultipartForm::new()
                .add_text("name", "Spinner")
                .add_part("image", image_part("spin.gif", "image/gif", b"GIF89a")),
        )
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({
        "error": "Image must be one of the following types image/jpeg image/png"
    }));
    assert!(app.stored_files().is_empty());

    let list: Value = app.server.get("/records").await.json();
    assert_eq!(list["data"], json!([]));
}

#[tokio::test]
async fn test_create_tattoo_rejects_unexpected_field() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/records")
        .multipart(
            MultipartForm::new()
                .add_text("name", "Koi")
                .add_part("photo", png_part("koi.png")),
        )
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "Unexpected field" }));
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_create_tattoo_rejects_two_images() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/records")
        .multipart(
            MultipartForm::new()
                .add_text("name", "Pair")
                .add_part("image", png_part("a.png"))
                .add_part("image", png_part("b.png")),
        )
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "Unexpected field" }));
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_create_tattoo_rejects_long_field() {
    let db = Database::open_in_memory().await.unwrap();
    let app = create_test_app_with(Arc::new(SqliteTattooModel::new(db)), |config| {
        config.uploads.max_field_size = 16;
    });

    let response = app
        .server
        .post("/records")
        .multipart(
            MultipartForm::new()
                .add_text("name", "Koi")
                .add_text("description", "x".repeat(17))
                .add_part("image", png_part("koi.png")),
        )
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "Field value too long" }));
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_create_tattoo_storage_failure_is_internal_error() {
    let db = Database::open_in_memory().await.unwrap();
    let app = create_test_app_with(Arc::new(SqliteTattooModel::new(db)), |config| {
        config.uploads.destination_dir = format!("{}/missing", config.uploads.destination_dir);
    });

    let response = app
        .server
        .post("/records")
        .multipart(
            MultipartForm::new()
                .add_text("name", "Koi")
                .add_part("image", png_part("koi.png")),
        )
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({ "error": "An internal error occurred" }));
}

#[tokio::test]
async fn test_create_tattoo_requires_name() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/records")
        .multipart(MultipartForm::new().add_text("description", "no name"))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"], "Validation failed");
    assert!(body["details"]["name"].is_array());
}

#[tokio::test]
async fn test_create_tattoo_category_id_checks() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/records")
        .multipart(
            MultipartForm::new()
                .add_text("name", "Koi")
                .add_text("category_id", "abc"),
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "category_id must be an integer" }));

    let response = app
        .server
        .post("/records")
        .multipart(
            MultipartForm::new()
                .add_text("name", "Koi")
                .add_text("category_id", "42"),
        )
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let category_id = create_category(&app.server, "Japanese").await;
    let response = app
        .server
        .post("/records")
        .multipart(
            MultipartForm::new()
                .add_text("name", "Koi")
                .add_text("category_id", category_id.to_string()),
        )
        .await;
    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["data"]["category_id"], category_id);
}

#[tokio::test]
async fn test_create_tattoo_rejects_json_body() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/records")
        .json(&json!({ "name": "Koi" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_get_tattoo() {
    let app = create_test_app().await;

    let created: Value = app
        .server
        .post("/records")
        .multipart(MultipartForm::new().add_text("name", "Dagger"))
        .await
        .json();
    let id = created["data"]["id"].as_i64().unwrap();

    let response = app.server.get(&format!("/records/{id}")).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"]["name"], "Dagger");

    let response = app.server.get("/records/9999").await;
    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "error": "Tattoo not found" }));
}

#[tokio::test]
async fn test_update_tattoo_replaces_image() {
    let app = create_test_app().await;

    let created: Value = app
        .server
        .post("/records")
        .multipart(
            MultipartForm::new()
                .add_text("name", "Rose")
                .add_text("description", "Red rose")
                .add_part("image", png_part("rose.png")),
        )
        .await
        .json();
    let id = created["data"]["id"].as_i64().unwrap();

    let response = app
        .server
        .put(&format!("/records/{id}"))
        .multipart(
            MultipartForm::new()
                .add_text("name", "Black rose")
                .add_part("image", jpeg_part("rose-v2.jpg")),
        )
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["name"], "Black rose");
    assert_eq!(body["data"]["description"], "Red rose");
    assert_stored_name(body["data"]["image"].as_str().unwrap(), "rose-v2", ".jpg");
    assert_eq!(app.stored_files().len(), 2);
}

#[tokio::test]
async fn test_update_tattoo_keeps_image_without_upload() {
    let app = create_test_app().await;

    let created: Value = app
        .server
        .post("/records")
        .multipart(
            MultipartForm::new()
                .add_text("name", "Anchor")
                .add_part("image", png_part("anchor.png")),
        )
        .await
        .json();
    let id = created["data"]["id"].as_i64().unwrap();

    let response = app
        .server
        .put(&format!("/records/{id}"))
        .multipart(MultipartForm::new().add_text("description", ""))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["image"], created["data"]["image"]);
    assert!(body["data"]["description"].is_null());
}

#[tokio::test]
async fn test_update_tattoo_rejected_upload_leaves_record() {
    let app = create_test_app().await;

    let created: Value = app
        .server
        .post("/records")
        .multipart(MultipartForm::new().add_text("name", "Anchor"))
        .await
        .json();
    let id = created["data"]["id"].as_i64().unwrap();

    let response = app
        .server
        .put(&format!("/records/{id}"))
        .multipart(
            MultipartForm::new()
                .add_text("name", "Changed")
                .add_part("image", image_part("x.gif", "image/gif", b"GIF89a")),
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let current: Value = app.server.get(&format!("/records/{id}")).await.json();
    assert_eq!(current["data"]["name"], "Anchor");
}

#[tokio::test]
async fn test_update_missing_tattoo() {
    let app = create_test_app().await;

    let response = app
        .server
        .put("/records/9999")
        .multipart(MultipartForm::new().add_text("name", "Ghost"))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "error": "Tattoo not found" }));
}

#[tokio::test]
async fn test_delete_tattoo() {
    let app = create_test_app().await;

    let created: Value = app
        .server
        .post("/records")
        .multipart(MultipartForm::new().add_text("name", "Skull"))
        .await
        .json();
    let id = created["data"]["id"].as_i64().unwrap();

    let response = app.server.delete(&format!("/records/{id}")).await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = app.server.delete(&format!("/records/{id}")).await;
    response.assert_status(StatusCode::NOT_FOUND);

    app.server
        .get(&format!("/records/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

// ============================================================================
// Categories
// ============================================================================

#[tokio::test]
async fn test_category_lifecycle() {
    let app = create_test_app().await;

    let id = create_category(&app.server, "Blackwork").await;

    let response = app.server.get(&format!("/records/category/{id}")).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"]["name"], "Blackwork");

    create_category(&app.server, "Dotwork").await;
    let list: Value = app.server.get("/records/category").await.json();
    let names: Vec<&str> = list["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Blackwork", "Dotwork"]);
}

#[tokio::test]
async fn test_duplicate_category_conflicts() {
    let app = create_test_app().await;
    create_category(&app.server, "Tribal").await;

    let response = app
        .server
        .post("/records/category")
        .json(&json!({ "name": "Tribal" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    response.assert_json(&json!({ "error": "Resource already exists" }));
}

#[tokio::test]
async fn test_invalid_category_payloads() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/records/category")
        .json(&json!({ "name": "" }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.json::<Value>()["details"]["name"].is_array());

    let response = app
        .server
        .post("/records/category")
        .json(&json!({ "title": "Tribal" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_category() {
    let app = create_test_app().await;

    let response = app.server.get("/records/category/9999").await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "error": "Category not found" }));
}

// ============================================================================
// Ambient routes
// ============================================================================

#[tokio::test]
async fn test_stored_image_is_served() {
    let app = create_test_app().await;

    let created: Value = app
        .server
        .post("/records")
        .multipart(
            MultipartForm::new()
                .add_text("name", "Heart")
                .add_part("image", png_part("heart.png")),
        )
        .await
        .json();
    let image = created["data"]["image"].as_str().unwrap();

    let response = app.server.get(&format!("/uploads/{image}")).await;
    response.assert_status_ok();
    assert_eq!(&response.as_bytes()[..], b"\x89PNG\r\n\x1a\nfake-png");
}

#[tokio::test]
async fn test_health() {
    let app = create_test_app().await;

    let response = app.server.get("/health").await;

    response.assert_status_ok();
    response.assert_text("OK");
}

#[tokio::test]
async fn test_bearer_token_is_optional() {
    let app = create_test_app().await;

    app.server
        .get("/records")
        .add_header(AUTHORIZATION, bearer_token(7, "artist"))
        .await
        .assert_status_ok();

    app.server
        .get("/records")
        .add_header(AUTHORIZATION, "Bearer not-a-jwt".to_string())
        .await
        .assert_status_ok();
}
