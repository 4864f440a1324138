mod common;

use std::time::Duration;

use common::{GITHUB_TOKEN, TestApp, spawn, spawn_configured};
use http::{Method, StatusCode};
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

const REPO: &str = "/repos/octo-org/hello-world/collaborators/validuser";

fn target() -> Value {
    json!({ "repoOwner": "octo-org", "repoName": "hello-world" })
}

/// Admin token plus an employee linked to GitHub account `validuser`
async fn linked_employee(app: &TestApp) -> (String, String) {
    let (token, _) = app.login().await;
    app.github_user_exists("validuser").await;
    let employee = app
        .create_employee(
            &token,
            json!({
                "name": "Ana",
                "email": "ana@x.com",
                "platforms": [{ "platformName": "GitHub", "accountId": "validuser" }]
            }),
        )
        .await;
    (token, employee["id"].as_str().unwrap().to_string())
}

fn add_uri(employee_id: &str) -> String {
    format!("/api/accounts/{employee_id}/platform/GitHub/add")
}

fn remove_uri(employee_id: &str) -> String {
    format!("/api/accounts/{employee_id}/platform/GitHub/remove")
}

#[tokio::test]
async fn test_grant_adds_collaborator() {
    let app = spawn().await;
    let (token, id) = linked_employee(&app).await;
    app.store_github_credential(&token).await;

    Mock::given(method("PUT"))
        .and(path(REPO))
        .and(header("authorization", format!("Bearer {GITHUB_TOKEN}").as_str()))
        .and(header("accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 7, "permissions": "write" })))
        .expect(1)
        .mount(&app.mock)
        .await;

    let (status, body) = app
        .send(Method::POST, &add_uri(&id), Some(&token), Some(target()))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(
        body["message"],
        "Employee validuser added as collaborator to octo-org/hello-world"
    );
    assert_eq!(body["upstreamStatus"], 201);
    assert_eq!(body["upstream"]["id"], 7);
}

#[tokio::test]
async fn test_revoke_removes_collaborator() {
    let app = spawn().await;
    let (token, id) = linked_employee(&app).await;
    app.store_github_credential(&token).await;

    Mock::given(method("DELETE"))
        .and(path(REPO))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&app.mock)
        .await;

    let (status, body) = app
        .send(Method::DELETE, &remove_uri(&id), Some(&token), Some(target()))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Employee validuser removed from octo-org/hello-world");
    assert_eq!(body["upstreamStatus"], 204);
    assert!(body.get("upstream").is_none());
}

#[tokio::test]
async fn test_grant_without_link_issues_no_call() {
    let app = spawn().await;
    let (token, _) = app.login().await;
    app.store_github_credential(&token).await;
    let employee = app
        .create_employee(&token, json!({ "name": "Bo", "email": "bo@x.com" }))
        .await;
    let id = employee["id"].as_str().unwrap();

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&app.mock)
        .await;

    let (status, body) = app
        .send(Method::POST, &add_uri(id), Some(&token), Some(target()))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4004);
    assert_eq!(body["message"], "GitHub account not linked to this employee.");
}

#[tokio::test]
async fn test_grant_forbidden_leaves_records_unchanged() {
    let app = spawn().await;
    let (token, id) = linked_employee(&app).await;
    app.store_github_credential(&token).await;

    Mock::given(method("PUT"))
        .and(path(REPO))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "message": "Must have admin rights" })))
        .expect(1)
        .mount(&app.mock)
        .await;

    let (_, employee_before) = app
        .send(Method::GET, &format!("/api/employees/{id}"), Some(&token), None)
        .await;
    let (_, platforms_before) = app
        .send(Method::GET, "/api/platforms", Some(&token), None)
        .await;

    let (status, body) = app
        .send(Method::POST, &add_uri(&id), Some(&token), Some(target()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 4006);
    assert_eq!(body["message"], "Invalid GitHub token or insufficient permissions.");
    assert_eq!(body["details"]["upstreamStatus"], 403);
    assert_eq!(body["details"]["upstream"]["message"], "Must have admin rights");

    let (_, employee_after) = app
        .send(Method::GET, &format!("/api/employees/{id}"), Some(&token), None)
        .await;
    let (_, platforms_after) = app
        .send(Method::GET, "/api/platforms", Some(&token), None)
        .await;
    assert_eq!(employee_before, employee_after);
    assert_eq!(platforms_before, platforms_after);
}

#[tokio::test]
async fn test_grant_account_not_found() {
    let app = spawn().await;
    let (token, id) = linked_employee(&app).await;
    app.store_github_credential(&token).await;

    Mock::given(method("PUT"))
        .and(path(REPO))
        .respond_with(ResponseTemplate::new(404))
        .mount(&app.mock)
        .await;

    let (status, body) = app
        .send(Method::POST, &add_uri(&id), Some(&token), Some(target()))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4005);
    assert_eq!(body["message"], "GitHub account 'validuser' not found.");
}

#[tokio::test]
async fn test_grant_upstream_error_carries_diagnostics() {
    let app = spawn().await;
    let (token, id) = linked_employee(&app).await;
    app.store_github_credential(&token).await;

    Mock::given(method("PUT"))
        .and(path(REPO))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "message": "Validation Failed" })),
        )
        .mount(&app.mock)
        .await;

    let (status, body) = app
        .send(Method::POST, &add_uri(&id), Some(&token), Some(target()))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 4007);
    assert_eq!(body["message"], "Error adding collaborator");
    assert_eq!(body["details"]["upstreamStatus"], 422);
    assert_eq!(body["details"]["upstream"]["message"], "Validation Failed");
}

#[tokio::test]
async fn test_grant_requires_configured_credential() {
    let app = spawn().await;
    let (token, id) = linked_employee(&app).await;

    let (status, body) = app
        .send(Method::POST, &add_uri(&id), Some(&token), Some(target()))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4003);
    assert_eq!(body["message"], "GitHub integration not properly configured.");
}

#[tokio::test]
async fn test_grant_unknown_employee() {
    let app = spawn().await;
    let (token, _) = app.login().await;
    app.store_github_credential(&token).await;

    let (status, body) = app
        .send(Method::POST, &add_uri("nobody"), Some(&token), Some(target()))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3001);
}

#[tokio::test]
async fn test_grant_requires_repository() {
    let app = spawn().await;
    let (token, id) = linked_employee(&app).await;

    let (status, body) = app
        .send(
            Method::POST,
            &add_uri(&id),
            Some(&token),
            Some(json!({ "repoOwner": "octo-org" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Repository owner and name are required.");
}

#[tokio::test]
async fn test_grant_unsupported_platform() {
    let app = spawn().await;
    let (token, id) = linked_employee(&app).await;

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/api/accounts/{id}/platform/Jira/add"),
            Some(&token),
            Some(target()),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4008);
}

#[tokio::test]
async fn test_grant_times_out_as_upstream_error() {
    let app = spawn_configured(|config| config.platform_timeout_secs = 1).await;
    let (token, id) = linked_employee(&app).await;
    app.store_github_credential(&token).await;

    Mock::given(method("PUT"))
        .and(path(REPO))
        .respond_with(ResponseTemplate::new(201).set_delay(Duration::from_secs(3)))
        .mount(&app.mock)
        .await;

    let (status, body) = app
        .send(Method::POST, &add_uri(&id), Some(&token), Some(target()))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 4007);
    assert_eq!(body["details"]["timeout"], true);
}

#[tokio::test]
async fn test_grant_unreachable_platform_is_upstream_error() {
    let app = spawn_configured(|config| {
        config.github_api_url = "http://127.0.0.1:9".to_string();
    })
    .await;
    let (token, _) = app.login().await;
    app.store_github_credential(&token).await;

    // Link validation also calls GitHub, so seed the employee directly
    let employee = access_server::db::repository::EmployeeRepository::new(app.state.get_db())
        .create(access_server::db::repository::employee::EmployeeDraft {
            name: "Ana".into(),
            email: "ana@x.com".into(),
            platforms: vec![shared::models::PlatformLink {
                platform_name: "GitHub".into(),
                account_id: "validuser".into(),
                status: shared::models::LinkStatus::Active,
            }],
        })
        .await
        .unwrap();

    let (status, body) = app
        .send(Method::POST, &add_uri(&employee.key), Some(&token), Some(target()))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 4007);
    assert_eq!(body["details"]["timeout"], false);
}
