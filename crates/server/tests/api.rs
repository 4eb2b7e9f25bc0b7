use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use configs::{AppConfig, DatabaseConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

/// App over a private in-memory SQLite database with the schema applied.
async fn build_app() -> anyhow::Result<Router> {
    let cfg = AppConfig {
        database: DatabaseConfig { url: "sqlite::memory:".into(), ..Default::default() },
        ..Default::default()
    };
    server::startup::build_app(&cfg).await
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))?,
        None => builder.body(Body::empty())?,
    };
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, value))
}

fn user_body(n: u32) -> Value {
    json!({
        "name": format!("User {n}"),
        "email": format!("user{n}@example.com"),
        "age": 20,
        "student_id": format!("S{:07}", n),
    })
}

#[tokio::test]
async fn health_reports_ok() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
    Ok(())
}

#[tokio::test]
async fn user_create_get_and_list() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, created) = send(&app, "POST", "/api/users", Some(user_body(1))).await?;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["student_id"], "S0000001");

    let (status, fetched) = send(&app, "GET", &format!("/api/users/{id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (_, list) = send(&app, "GET", "/api/users", None).await?;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, "GET", "/api/users/999", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "User not found");
    Ok(())
}

#[tokio::test]
async fn duplicate_user_is_conflict_and_nothing_is_stored() -> anyhow::Result<()> {
    let app = build_app().await?;
    send(&app, "POST", "/api/users", Some(user_body(1))).await?;

    let mut dup = user_body(2);
    dup["email"] = json!("user1@example.com");
    let (status, body) = send(&app, "POST", "/api/users", Some(dup)).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "User already exists");

    let (_, list) = send(&app, "GET", "/api/users", None).await?;
    assert_eq!(list.as_array().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn invalid_payloads_are_422() -> anyhow::Result<()> {
    let app = build_app().await?;

    let mut bad = user_body(1);
    bad["student_id"] = json!("X123");
    let (status, body) = send(&app, "POST", "/api/users", Some(bad)).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Validation Error");

    let (status, _) = send(&app, "POST", "/api/users", Some(json!({"name": "only"}))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let req = Request::builder()
        .method("POST")
        .uri("/api/courses")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, "GET", "/api/users/abc", None).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, "GET", "/api/courses?limit=-1", None).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[tokio::test]
async fn out_of_range_paging_is_422() -> anyhow::Result<()> {
    let app = build_app().await?;
    for uri in [
        "/api/courses?limit=18446744073709551615",
        "/api/courses?offset=18446744073709551615",
        "/api/courses?offset=-3",
    ] {
        let (status, body) = send(&app, "GET", uri, None).await?;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        assert_eq!(body["error"], "Validation Error");
    }

    let (status, body) = send(&app, "GET", "/api/courses?limit=9223372036854775807", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn repeated_identical_user_is_conflict() -> anyhow::Result<()> {
    let app = build_app().await?;
    let ada = json!({"name": "Ada", "email": "ada@x.com", "age": 30, "student_id": "S1234567"});

    let (status, created) = send(&app, "POST", "/api/users", Some(ada.clone())).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created["id"].is_i64());

    let (status, body) = send(&app, "POST", "/api/users", Some(ada)).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "User already exists");

    let (_, list) = send(&app, "GET", "/api/users", None).await?;
    assert_eq!(list, json!([created]));
    Ok(())
}

#[tokio::test]
async fn invalid_patch_field_is_422_and_row_unchanged() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (_, created) = send(&app, "POST", "/api/users", Some(user_body(1))).await?;
    let id = created["id"].as_i64().unwrap();

    let (status, body) =
        send(&app, "PATCH", &format!("/api/users/{id}"), Some(json!({"name": "Fine", "age": 200}))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Validation Error");

    let (_, unchanged) = send(&app, "GET", &format!("/api/users/{id}"), None).await?;
    assert_eq!(unchanged, created);

    let (_, project) =
        send(&app, "POST", &format!("/api/users/{id}/projects"), Some(json!({"name": "Keep"}))).await?;
    let pid = project["id"].as_i64().unwrap();
    let (status, _) = send(&app, "PATCH", &format!("/api/projects/{pid}"), Some(json!({"name": ""}))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, fetched) = send(&app, "GET", &format!("/api/projects/{pid}"), None).await?;
    assert_eq!(fetched["name"], "Keep");
    Ok(())
}

#[tokio::test]
async fn patch_changes_only_supplied_fields() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (_, created) = send(&app, "POST", "/api/users", Some(user_body(1))).await?;
    let id = created["id"].as_i64().unwrap();

    let (status, patched) =
        send(&app, "PATCH", &format!("/api/users/{id}"), Some(json!({"name": "Renamed", "email": null}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["name"], "Renamed");
    assert_eq!(patched["email"], created["email"]);
    assert_eq!(patched["age"], created["age"]);

    let (status, _) = send(&app, "PATCH", "/api/users/999", Some(json!({"name": "x"}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn patch_onto_taken_email_is_conflict() -> anyhow::Result<()> {
    let app = build_app().await?;
    send(&app, "POST", "/api/users", Some(user_body(1))).await?;
    let (_, second) = send(&app, "POST", "/api/users", Some(user_body(2))).await?;
    let id = second["id"].as_i64().unwrap();

    let (status, body) =
        send(&app, "PATCH", &format!("/api/users/{id}"), Some(json!({"email": "user1@example.com"}))).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "User update failed (unique constraint)");

    let (_, unchanged) = send(&app, "GET", &format!("/api/users/{id}"), None).await?;
    assert_eq!(unchanged["email"], "user2@example.com");
    Ok(())
}

#[tokio::test]
async fn put_replaces_every_field() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (_, created) = send(&app, "POST", "/api/users", Some(user_body(1))).await?;
    let id = created["id"].as_i64().unwrap();

    let (status, replaced) = send(&app, "PUT", &format!("/api/users/{id}"), Some(user_body(7))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["id"], created["id"]);
    assert_eq!(replaced["email"], "user7@example.com");
    assert_eq!(replaced["student_id"], "S0000007");

    let (status, _) = send(&app, "PUT", &format!("/api/users/{id}"), Some(json!({"name": "partial"}))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[tokio::test]
async fn delete_user_cascades_to_projects() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (_, owner) = send(&app, "POST", "/api/users", Some(user_body(1))).await?;
    let id = owner["id"].as_i64().unwrap();

    let (status, project) =
        send(&app, "POST", &format!("/api/users/{id}/projects"), Some(json!({"name": "Thesis"}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(project["owner_id"], owner["id"]);
    assert_eq!(project["description"], Value::Null);

    let (status, body) = send(&app, "DELETE", &format!("/api/users/{id}"), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, projects) = send(&app, "GET", "/api/projects", None).await?;
    assert!(projects.as_array().unwrap().is_empty());

    let (status, _) = send(&app, "DELETE", &format!("/api/users/{id}"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn project_for_missing_owner_is_404() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) =
        send(&app, "POST", "/api/projects", Some(json!({"name": "Orphan", "owner_id": 42}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "User not found");

    let (status, _) = send(&app, "POST", "/api/users/42/projects", Some(json!({"name": "Orphan"}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, list) = send(&app, "GET", "/api/users/42/projects", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));
    Ok(())
}

#[tokio::test]
async fn project_get_embeds_owner() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (_, owner) = send(&app, "POST", "/api/users", Some(user_body(3))).await?;
    let (_, project) = send(
        &app,
        "POST",
        "/api/projects",
        Some(json!({"name": "Robot", "description": "line follower", "owner_id": owner["id"]})),
    )
    .await?;
    let pid = project["id"].as_i64().unwrap();

    let (status, body) = send(&app, "GET", &format!("/api/projects/{pid}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Robot");
    assert_eq!(body["owner"], owner);

    let (status, body) = send(&app, "GET", "/api/projects/999", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Project not found");
    Ok(())
}

#[tokio::test]
async fn project_patch_and_put() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (_, a) = send(&app, "POST", "/api/users", Some(user_body(1))).await?;
    let (_, b) = send(&app, "POST", "/api/users", Some(user_body(2))).await?;
    let (_, project) = send(
        &app,
        "POST",
        "/api/projects",
        Some(json!({"name": "P", "description": "d", "owner_id": a["id"]})),
    )
    .await?;
    let pid = project["id"].as_i64().unwrap();

    let (status, patched) =
        send(&app, "PATCH", &format!("/api/projects/{pid}"), Some(json!({"owner_id": b["id"]}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["owner_id"], b["id"]);
    assert_eq!(patched["description"], "d");

    let (status, replaced) =
        send(&app, "PUT", &format!("/api/projects/{pid}"), Some(json!({"name": "Q", "owner_id": a["id"]}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["name"], "Q");
    assert_eq!(replaced["description"], Value::Null);

    let (status, _) =
        send(&app, "PATCH", &format!("/api/projects/{pid}"), Some(json!({"owner_id": 999}))).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn courses_paginate_in_id_order() -> anyhow::Result<()> {
    let app = build_app().await?;
    for (code, credits) in [("CS101", 3), ("CS102", 4), ("CS103", 5)] {
        let (status, _) =
            send(&app, "POST", "/api/courses", Some(json!({"code": code, "name": code, "credits": credits}))).await?;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) =
        send(&app, "POST", "/api/courses", Some(json!({"code": "CS101", "name": "again", "credits": 2}))).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "Course already exists");

    let (_, page) = send(&app, "GET", "/api/courses?limit=2&offset=1", None).await?;
    let codes: Vec<&str> = page.as_array().unwrap().iter().filter_map(|c| c["code"].as_str()).collect();
    assert_eq!(codes, ["CS102", "CS103"]);

    let (_, all) = send(&app, "GET", "/api/courses", None).await?;
    assert_eq!(all.as_array().unwrap().len(), 3);
    Ok(())
}

#[tokio::test]
async fn openapi_document_is_served() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, doc) = send(&app, "GET", "/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/users/{id}/projects"].is_object());
    assert!(doc["paths"]["/health"].is_object());
    Ok(())
}
