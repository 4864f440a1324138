mod common;

use common::{GITHUB_TOKEN, TestApp, spawn};
use http::{Method, StatusCode};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

const ATLAS_USER: &str = "/api/atlas/v2/groups/proj-1/databaseUsers/admin/app_user";

async fn store_atlas_credential(app: &TestApp, token: &str) {
    let (status, body) = app
        .send(
            Method::POST,
            "/api/platforms",
            Some(token),
            Some(json!({
                "name": "MongoDB",
                "credentials": { "publicKey": "pub", "apiKey": "priv" }
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
}

#[tokio::test]
async fn test_create_platform_returns_redacted_summary() {
    let app = spawn().await;
    let (token, _) = app.login().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/platforms",
            Some(&token),
            Some(json!({
                "name": "GitHub",
                "apiEndpoint": "https://api.github.com",
                "authMethod": "token",
                "credentials": { "apiKey": GITHUB_TOKEN }
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "GitHub");
    assert_eq!(body["configured"], true);
    assert!(body.get("credentials").is_none());
    assert!(!body.to_string().contains(GITHUB_TOKEN));

    let (status, list) = app
        .send(Method::GET, "/api/platforms", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert!(!list.to_string().contains(GITHUB_TOKEN));
}

#[tokio::test]
async fn test_platform_name_is_unique() {
    let app = spawn().await;
    let (token, _) = app.login().await;
    app.store_github_credential(&token).await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/platforms",
            Some(&token),
            Some(json!({ "name": "github", "credentials": { "apiKey": "other" } })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4002);
}

#[tokio::test]
async fn test_credential_shape_is_enforced() {
    let app = spawn().await;
    let (token, _) = app.login().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/platforms",
            Some(&token),
            Some(json!({ "name": "MongoDB", "credentials": { "apiKey": "priv" } })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("publicKey"));

    let (status, _) = app
        .send(
            Method::POST,
            "/api/platforms",
            Some(&token),
            Some(json!({ "name": "Jira", "credentials": {} })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_platform() {
    let app = spawn().await;
    let (token, _) = app.login().await;
    app.store_github_credential(&token).await;

    let (_, list) = app
        .send(Method::GET, "/api/platforms", Some(&token), None)
        .await;
    let id = list[0]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .send(Method::DELETE, &format!("/api/platforms/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Platform deleted");

    let (status, body) = app
        .send(Method::DELETE, &format!("/api/platforms/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);
}

#[tokio::test]
async fn test_list_org_repos_uses_stored_token() {
    let app = spawn().await;
    let (token, _) = app.login().await;
    app.store_github_credential(&token).await;

    Mock::given(method("GET"))
        .and(path("/orgs/octo-org/repos"))
        .and(header("authorization", format!("Bearer {GITHUB_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "hello-world", "owner": { "login": "octo-org" } }
        ])))
        .expect(1)
        .mount(&app.mock)
        .await;

    let (status, body) = app
        .send(
            Method::GET,
            "/api/platforms/github/orgs/octo-org/repos",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "hello-world");
}

#[tokio::test]
async fn test_atlas_validate_user() {
    let app = spawn().await;
    let (token, _) = app.login().await;
    store_atlas_credential(&app, &token).await;

    Mock::given(method("GET"))
        .and(path(ATLAS_USER))
        // base64("pub:priv")
        .and(header("authorization", "Basic cHViOnByaXY="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "username": "app_user" })))
        .mount(&app.mock)
        .await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/accounts/mongodb/validate-user",
            Some(&token),
            Some(json!({ "username": "app_user", "projectId": "proj-1" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "MongoDB user exists");
    assert_eq!(body["user"]["username"], "app_user");
}

#[tokio::test]
async fn test_atlas_unknown_user() {
    let app = spawn().await;
    let (token, _) = app.login().await;
    store_atlas_credential(&app, &token).await;

    Mock::given(method("GET"))
        .and(path("/api/atlas/v2/groups/proj-1/databaseUsers/admin/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&app.mock)
        .await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/accounts/mongodb/validate-user",
            Some(&token),
            Some(json!({ "username": "missing", "projectId": "proj-1" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4005);
    assert_eq!(body["message"], "MongoDB user missing not found");
}

#[tokio::test]
async fn test_atlas_change_password() {
    let app = spawn().await;
    let (token, _) = app.login().await;
    store_atlas_credential(&app, &token).await;

    Mock::given(method("PATCH"))
        .and(path(ATLAS_USER))
        .and(body_json(json!({ "password": "n3w-Secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "username": "app_user" })))
        .expect(1)
        .mount(&app.mock)
        .await;

    let (status, body) = app
        .send(
            Method::PATCH,
            "/api/accounts/mongodb/change-password",
            Some(&token),
            Some(json!({
                "username": "app_user",
                "newPassword": "n3w-Secret",
                "projectId": "proj-1"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Password updated successfully for user app_user");
}

#[tokio::test]
async fn test_atlas_change_password_requires_fields() {
    let app = spawn().await;
    let (token, _) = app.login().await;

    let (status, body) = app
        .send(
            Method::PATCH,
            "/api/accounts/mongodb/change-password",
            Some(&token),
            Some(json!({ "username": "app_user", "projectId": "proj-1" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "newPassword is required");
}

#[tokio::test]
async fn test_atlas_requires_credential() {
    let app = spawn().await;
    let (token, _) = app.login().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/accounts/mongodb/validate-user",
            Some(&token),
            Some(json!({ "username": "app_user", "projectId": "proj-1" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4003);
}
