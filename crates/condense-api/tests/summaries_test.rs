//! Summary persistence and rendering integration tests.
//!
//! Run with: `cargo test -p condense-api --test summaries_test`
//! Requires Docker for testcontainers (Postgres).

mod helpers;

use helpers::{api_path, auth::mint_token, create_test_user_in_db, setup_test_app, STUB_SUMMARY};
use serde_json::json;

#[tokio::test]
async fn test_store_summary_round_trip() {
    let app = setup_test_app().await;
    create_test_user_in_db(&app.pool, "user_round_trip").await;
    let token = mint_token("user_round_trip");

    let response = app
        .client()
        .post(&api_path("/summaries"))
        .authorization_bearer(&token)
        .json(&json!({
            "file_url": "http://localhost:4000/files/uploads/abc.pdf",
            "summary": STUB_SUMMARY,
            "title": "report.pdf",
        }))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    let id = body["data"]["id"].as_str().expect("id string").to_string();

    // Read back: title, pdf_url, summary, and status survive unchanged
    let response = app
        .client()
        .get(&api_path(&format!("/summaries/{}", id)))
        .authorization_bearer(&token)
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"]["title"], "report.pdf");
    assert_eq!(
        body["data"]["pdf_url"],
        "http://localhost:4000/files/uploads/abc.pdf"
    );
    assert_eq!(body["data"]["summary"], STUB_SUMMARY);
    assert_eq!(body["data"]["status"], "completed");
}

#[tokio::test]
async fn test_store_summary_missing_fields_performs_no_insert() {
    let app = setup_test_app().await;
    create_test_user_in_db(&app.pool, "user_missing_fields").await;
    let token = mint_token("user_missing_fields");

    let response = app
        .client()
        .post(&api_path("/summaries"))
        .authorization_bearer(&token)
        .json(&json!({
            "file_url": "http://localhost:4000/files/uploads/abc.pdf",
            "summary": "body",
            "title": "",
        }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(app.summary_count().await, 0);
}

#[tokio::test]
async fn test_store_summary_without_auth_performs_no_insert() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path("/summaries"))
        .json(&json!({
            "file_url": "http://localhost:4000/files/uploads/abc.pdf",
            "summary": "body",
            "title": "report.pdf",
        }))
        .await;

    assert_eq!(response.status_code(), 401);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(app.summary_count().await, 0);
}

#[tokio::test]
async fn test_store_summary_unknown_caller_performs_no_insert() {
    let app = setup_test_app().await;
    // Token is valid, but no matching user row exists
    let token = mint_token("user_without_row");

    let response = app
        .client()
        .post(&api_path("/summaries"))
        .authorization_bearer(&token)
        .json(&json!({
            "file_url": "http://localhost:4000/files/uploads/abc.pdf",
            "summary": "body",
            "title": "report.pdf",
        }))
        .await;

    assert_eq!(response.status_code(), 404);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "USER_NOT_FOUND");
    assert_eq!(app.summary_count().await, 0);
}

#[tokio::test]
async fn test_list_summaries_returns_callers_rows() {
    let app = setup_test_app().await;
    create_test_user_in_db(&app.pool, "user_list").await;
    create_test_user_in_db(&app.pool, "user_other").await;
    let token = mint_token("user_list");
    let other_token = mint_token("user_other");

    for title in ["first.pdf", "second.pdf"] {
        let response = app
            .client()
            .post(&api_path("/summaries"))
            .authorization_bearer(&token)
            .json(&json!({
                "file_url": "http://localhost:4000/files/uploads/x.pdf",
                "summary": "body",
                "title": title,
            }))
            .await;
        assert_eq!(response.status_code(), 201);
    }

    let response = app
        .client()
        .post(&api_path("/summaries"))
        .authorization_bearer(&other_token)
        .json(&json!({
            "file_url": "http://localhost:4000/files/uploads/y.pdf",
            "summary": "body",
            "title": "theirs.pdf",
        }))
        .await;
    assert_eq!(response.status_code(), 201);

    let response = app
        .client()
        .get(&api_path("/summaries"))
        .authorization_bearer(&token)
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    let rows = body["data"].as_array().expect("array");
    assert_eq!(rows.len(), 2);
    assert!(rows
        .iter()
        .all(|row| row["title"] != "theirs.pdf"));
}

#[tokio::test]
async fn test_summary_of_other_user_reads_as_not_found() {
    let app = setup_test_app().await;
    create_test_user_in_db(&app.pool, "user_owner").await;
    create_test_user_in_db(&app.pool, "user_intruder").await;

    let response = app
        .client()
        .post(&api_path("/summaries"))
        .authorization_bearer(&mint_token("user_owner"))
        .json(&json!({
            "file_url": "http://localhost:4000/files/uploads/x.pdf",
            "summary": "body",
            "title": "mine.pdf",
        }))
        .await;
    assert_eq!(response.status_code(), 201);
    let body: serde_json::Value = response.json();
    let id = body["data"]["id"].as_str().expect("id").to_string();

    let response = app
        .client()
        .get(&api_path(&format!("/summaries/{}", id)))
        .authorization_bearer(&mint_token("user_intruder"))
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_generate_returns_model_output_verbatim() {
    let app = setup_test_app().await;
    let token = mint_token("user_generate");

    let response = app
        .client()
        .post(&api_path("/summaries/generate"))
        .authorization_bearer(&token)
        .json(&json!({ "text": "Extracted document text." }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], STUB_SUMMARY);
}

#[tokio::test]
async fn test_extract_unreachable_url_is_fetch_failed_with_no_insert() {
    let app = setup_test_app().await;
    let token = mint_token("user_extract");

    let response = app
        .client()
        .post(&api_path("/summaries/extract"))
        .authorization_bearer(&token)
        .json(&json!({ "file_url": "http://127.0.0.1:1/never.pdf" }))
        .await;

    assert_eq!(response.status_code(), 502);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "FETCH_FAILED");
    assert_eq!(app.summary_count().await, 0);
}

#[tokio::test]
async fn test_rendered_blocks_follow_summary_structure() {
    let app = setup_test_app().await;
    create_test_user_in_db(&app.pool, "user_blocks").await;
    let token = mint_token("user_blocks");

    let response = app
        .client()
        .post(&api_path("/summaries"))
        .authorization_bearer(&token)
        .json(&json!({
            "file_url": "http://localhost:4000/files/uploads/abc.pdf",
            "summary": "📝 **Main Topics**\n* Topic A\n* Topic B\n\nPlain paragraph.",
            "title": "report.pdf",
        }))
        .await;
    assert_eq!(response.status_code(), 201);
    let body: serde_json::Value = response.json();
    let id = body["data"]["id"].as_str().expect("id").to_string();

    let response = app
        .client()
        .get(&api_path(&format!("/summaries/{}/blocks", id)))
        .authorization_bearer(&token)
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    let blocks = body["data"].as_array().expect("blocks array");
    assert_eq!(blocks.len(), 4);
    assert_eq!(blocks[0]["type"], "heading");
    assert_eq!(blocks[0]["emoji"], "📝");
    assert_eq!(blocks[0]["title"], "Main Topics");
    assert_eq!(blocks[1]["type"], "list");
    assert_eq!(blocks[1]["items"].as_array().expect("items").len(), 2);
    assert_eq!(blocks[2]["type"], "spacer");
    assert_eq!(blocks[3]["type"], "paragraph");
}

#[tokio::test]
async fn test_pipeline_short_circuits_on_fetch_failure_and_keeps_upload() {
    use axum_test::multipart::{MultipartForm, Part};
    use std::sync::atomic::Ordering;

    let app = setup_test_app().await;
    create_test_user_in_db(&app.pool, "user_pipeline").await;
    let token = mint_token("user_pipeline");

    // The test storage base URL is not served, so extraction fails after a
    // successful upload. Later stages must not run and the uploaded file is
    // not compensated away.
    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(b"%PDF-1.4 test".to_vec())
            .file_name("report.pdf")
            .mime_type("application/pdf"),
    );

    let response = app
        .client()
        .post(&api_path("/summaries/pipeline"))
        .authorization_bearer(&token)
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 502);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "FETCH_FAILED");
    assert_eq!(app.upload_calls.load(Ordering::SeqCst), 1);
    assert_eq!(app.summary_count().await, 0);
}
