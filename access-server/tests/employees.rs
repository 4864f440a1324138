mod common;

use access_server::core::DeleteMode;
use common::{spawn, spawn_with};
use http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_create_employee_defaults_link_status() {
    let app = spawn().await;
    let (token, _) = app.login().await;
    app.github_user_exists("validuser").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/employees",
            Some(&token),
            Some(json!({
                "name": "Ana",
                "email": "ana@x.com",
                "platforms": [
                    { "platformName": "GitHub", "accountId": "validuser" },
                    { "platformName": "Jira", "accountId": "ana.j", "status": "inactive" }
                ]
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Employee added successfully.");
    let employee = &body["employee"];
    assert_eq!(employee["name"], "Ana");
    assert_eq!(employee["email"], "ana@x.com");
    assert_eq!(employee["platforms"][0]["status"], "active");
    assert_eq!(employee["platforms"][1]["status"], "inactive");
    assert!(employee["id"].is_string());
}

#[tokio::test]
async fn test_create_keeps_custom_link_status() {
    let app = spawn().await;
    let (token, _) = app.login().await;
    app.github_user_exists("validuser").await;

    let employee = app
        .create_employee(
            &token,
            json!({
                "name": "Ana",
                "email": "ana@x.com",
                "platforms": [{ "platformName": "GitHub", "accountId": "validuser", "status": "pending" }]
            }),
        )
        .await;
    assert_eq!(employee["platforms"][0]["status"], "pending");

    let id = employee["id"].as_str().unwrap();
    let (status, fetched) = app
        .send(Method::GET, &format!("/api/employees/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["platforms"][0]["status"], "pending");
}

#[tokio::test]
async fn test_create_with_unknown_github_account_writes_nothing() {
    let app = spawn().await;
    let (token, _) = app.login().await;
    app.github_user_missing("ghost-user-does-not-exist").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/employees",
            Some(&token),
            Some(json!({
                "name": "Ghost",
                "email": "ghost@x.com",
                "platforms": [{ "platformName": "GitHub", "accountId": "ghost-user-does-not-exist" }]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4005);
    assert_eq!(
        body["message"],
        "GitHub account 'ghost-user-does-not-exist' does not exist."
    );

    let (status, list) = app
        .send(Method::GET, "/api/employees", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_create_rejects_incomplete_link() {
    let app = spawn().await;
    let (token, _) = app.login().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/employees",
            Some(&token),
            Some(json!({
                "name": "Ana",
                "email": "ana@x.com",
                "platforms": [{ "platformName": "GitHub", "accountId": "" }]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3003);
    assert!(body["message"].as_str().unwrap().contains("#1"));
}

#[tokio::test]
async fn test_create_validates_name_and_email() {
    let app = spawn().await;
    let (token, _) = app.login().await;

    let (status, _) = app
        .send(
            Method::POST,
            "/api/employees",
            Some(&token),
            Some(json!({ "name": " ", "email": "ana@x.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(
            Method::POST,
            "/api/employees",
            Some(&token),
            Some(json!({ "name": "Ana", "email": "not-an-email" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = spawn().await;
    let (token, _) = app.login().await;
    app.create_employee(&token, json!({ "name": "Ana", "email": "ana@x.com" }))
        .await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/employees",
            Some(&token),
            Some(json!({ "name": "Other Ana", "email": "ANA@x.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 3002);
}

#[tokio::test]
async fn test_malformed_body_keeps_message_contract() {
    let app = spawn().await;
    let (token, _) = app.login().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/employees",
            Some(&token),
            Some(json!({ "name": 42 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_update_replaces_links_wholesale() {
    let app = spawn().await;
    let (token, _) = app.login().await;
    app.github_user_exists("validuser").await;
    app.github_user_exists("newhandle").await;

    let created = app
        .create_employee(
            &token,
            json!({
                "name": "Ana",
                "email": "ana@x.com",
                "platforms": [{ "platformName": "GitHub", "accountId": "validuser" }]
            }),
        )
        .await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/employees/{id}"),
            Some(&token),
            Some(json!({
                "name": "Ana Maria",
                "email": "ana@x.com",
                "platforms": [{ "platformName": "GitHub", "accountId": "newhandle", "status": "suspended" }]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Employee updated successfully.");
    assert_eq!(body["employee"]["name"], "Ana Maria");
    let links = body["employee"]["platforms"].as_array().unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0]["accountId"], "newhandle");
    assert_eq!(links[0]["status"], "suspended");

    let (status, fetched) = app
        .send(Method::GET, &format!("/api/employees/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["platforms"][0]["accountId"], "newhandle");
}

#[tokio::test]
async fn test_update_with_unknown_account_leaves_record_unchanged() {
    let app = spawn().await;
    let (token, _) = app.login().await;
    app.github_user_exists("validuser").await;
    app.github_user_missing("ghost").await;

    let created = app
        .create_employee(
            &token,
            json!({
                "name": "Ana",
                "email": "ana@x.com",
                "platforms": [{ "platformName": "GitHub", "accountId": "validuser" }]
            }),
        )
        .await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/api/employees/{id}"),
            Some(&token),
            Some(json!({
                "name": "Renamed",
                "email": "ana@x.com",
                "platforms": [{ "platformName": "GitHub", "accountId": "ghost" }]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, fetched) = app
        .send(Method::GET, &format!("/api/employees/{id}"), Some(&token), None)
        .await;
    assert_eq!(fetched["name"], "Ana");
    assert_eq!(fetched["platforms"][0]["accountId"], "validuser");
}

#[tokio::test]
async fn test_update_unknown_employee() {
    let app = spawn().await;
    let (token, _) = app.login().await;
    let (status, body) = app
        .send(
            Method::PUT,
            "/api/employees/does-not-exist",
            Some(&token),
            Some(json!({ "name": "Ana", "email": "ana@x.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3001);
}

#[tokio::test]
async fn test_delete_unknown_employee_has_no_side_effect() {
    let app = spawn().await;
    let (token, _) = app.login().await;
    app.create_employee(&token, json!({ "name": "Ana", "email": "ana@x.com" }))
        .await;

    let (status, body) = app
        .send(
            Method::DELETE,
            "/api/employees/does-not-exist",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3001);

    let (_, list) = app
        .send(Method::GET, "/api/employees", Some(&token), None)
        .await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_hard_delete_removes_employee() {
    let app = spawn().await;
    let (token, _) = app.login().await;
    let created = app
        .create_employee(&token, json!({ "name": "Ana", "email": "ana@x.com" }))
        .await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = app
        .send(Method::DELETE, &format!("/api/employees/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Employee deleted successfully.");

    // Email is free again after a hard delete
    app.create_employee(&token, json!({ "name": "Ana", "email": "ana@x.com" }))
        .await;
}

#[tokio::test]
async fn test_soft_delete_hides_employee() {
    let app = spawn_with(DeleteMode::Soft).await;
    let (token, _) = app.login().await;
    app.github_user_exists("validuser").await;
    let created = app
        .create_employee(
            &token,
            json!({
                "name": "Ana",
                "email": "ana@x.com",
                "platforms": [{ "platformName": "GitHub", "accountId": "validuser" }]
            }),
        )
        .await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = app
        .send(Method::DELETE, &format!("/api/employees/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send(Method::GET, &format!("/api/employees/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = app
        .send(Method::GET, "/api/employees", Some(&token), None)
        .await;
    assert_eq!(list.as_array().unwrap().len(), 0);

    let (status, _) = app
        .send(Method::DELETE, &format!("/api/employees/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The record is kept with its links marked deleted
    let stored = access_server::db::repository::EmployeeRepository::new(app.state.get_db())
        .find_by_email("ana@x.com")
        .await
        .unwrap()
        .unwrap();
    assert!(stored.deleted_at.is_some());
    assert_eq!(
        stored.platforms[0].status,
        shared::models::LinkStatus::Deleted
    );
}
