//! Integration tests for identity login, tokens and error mapping.

mod helpers;

use axum::http::StatusCode;
use hourbook_entity::user::UserRole;

use helpers::IDENTITY_KEY;

fn login_body(email: &str) -> serde_json::Value {
    serde_json::json!({
        "email": email,
        "display_name": "Nia Park",
        "avatar_url": "https://img.example.org/nia.png",
    })
}

#[tokio::test]
async fn test_login_provisions_volunteer() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request_with_headers(
            "POST",
            "/api/auth/login",
            Some(login_body("Nia@Example.org")),
            None,
            &[("x-identity-key", IDENTITY_KEY)],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let data = response.data();
    assert_eq!(data["provisioned"], true);
    assert_eq!(data["user"]["email"], "nia@example.org");
    assert_eq!(data["user"]["role"], "volunteer");
    assert_eq!(data["user"]["first_name"], "Nia");

    let token = data["access_token"].as_str().unwrap().to_string();
    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.data()["full_name"], "Nia Park");

    let again = app
        .request_with_headers(
            "POST",
            "/api/auth/login",
            Some(login_body("nia@example.org")),
            None,
            &[("x-identity-key", IDENTITY_KEY)],
        )
        .await;
    assert_eq!(again.status, StatusCode::OK);
    assert_eq!(again.data()["provisioned"], false);
}

#[tokio::test]
async fn test_login_requires_identity_key() {
    let app = helpers::TestApp::new().await;

    let missing = app
        .request("POST", "/api/auth/login", Some(login_body("nia@example.org")), None)
        .await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.error_code(), "UNAUTHORIZED");

    let wrong = app
        .request_with_headers(
            "POST",
            "/api/auth/login",
            Some(login_body("nia@example.org")),
            None,
            &[("x-identity-key", "guess")],
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_rejects_bad_email() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request_with_headers(
            "POST",
            "/api/auth/login",
            Some(login_body("not-an-email")),
            None,
            &[("x-identity-key", IDENTITY_KEY)],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_refresh_issues_new_access_token() {
    let app = helpers::TestApp::new().await;

    let login = app
        .request_with_headers(
            "POST",
            "/api/auth/login",
            Some(login_body("nia@example.org")),
            None,
            &[("x-identity-key", IDENTITY_KEY)],
        )
        .await;
    let refresh_token = login.data()["refresh_token"].as_str().unwrap().to_string();
    let access_token = login.data()["access_token"].as_str().unwrap().to_string();

    let refreshed = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh_token })),
            None,
        )
        .await;
    assert_eq!(refreshed.status, StatusCode::OK);
    let new_token = refreshed.data()["access_token"].as_str().unwrap();
    let me = app.request("GET", "/api/auth/me", None, Some(new_token)).await;
    assert_eq!(me.status, StatusCode::OK);

    // An access token is not accepted where a refresh token is required.
    let misuse = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": access_token })),
            None,
        )
        .await;
    assert_eq!(misuse.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_or_invalid_bearer_is_401() {
    let app = helpers::TestApp::new().await;

    let missing = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.error_code(), "UNAUTHORIZED");

    let garbage = app
        .request("GET", "/api/notifications", None, Some("not.a.jwt"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["backend"], "memory");
}

#[tokio::test]
async fn test_user_directory_and_admin_provisioning() {
    let app = helpers::TestApp::new().await;
    let (volunteer, supervisor, admin) = app.seeded().await;

    let created = app
        .request(
            "POST",
            "/api/admin/users",
            Some(serde_json::json!({
                "email": "olu@x.org",
                "first_name": "Olu",
                "last_name": "Bassey",
                "role": "supervisor",
            })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{:?}", created.body);

    let duplicate = app
        .request(
            "POST",
            "/api/admin/users",
            Some(serde_json::json!({
                "email": "olu@x.org",
                "first_name": "Olu",
                "role": "supervisor",
            })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let not_admin = app
        .request(
            "POST",
            "/api/admin/users",
            Some(serde_json::json!({
                "email": "eve@x.org",
                "first_name": "Eve",
                "role": "admin",
            })),
            Some(&supervisor.token),
        )
        .await;
    assert_eq!(not_admin.status, StatusCode::FORBIDDEN);
    assert_eq!(not_admin.error_code(), "FORBIDDEN");

    let supervisors = app
        .request("GET", "/api/users?role=supervisor", None, Some(&supervisor.token))
        .await;
    assert_eq!(supervisors.status, StatusCode::OK);
    assert_eq!(supervisors.data()["total_items"], 2);

    let forbidden = app
        .request("GET", "/api/users", None, Some(&volunteer.token))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let lookup = app
        .request("GET", "/api/users/by-email/OLU@x.org", None, Some(&volunteer.token))
        .await;
    assert_eq!(lookup.status, StatusCode::OK);
    assert_eq!(lookup.data()["role"], "supervisor");

    let unknown = app
        .request("GET", "/api/users/by-email/nobody@x.org", None, Some(&volunteer.token))
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_class_catalog() {
    let app = helpers::TestApp::new().await;
    let admin = app
        .create_user("ada@x.org", "Ada", "Okafor", UserRole::Admin)
        .await;

    let created = app
        .request(
            "POST",
            "/api/admin/classes",
            Some(serde_json::json!({ "class_name": "RSSW290", "hour_requirement": 20.0 })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let invalid = app
        .request(
            "POST",
            "/api/admin/classes",
            Some(serde_json::json!({ "class_name": "RSSW291", "hour_requirement": -1.0 })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);

    let fetched = app
        .request("GET", "/api/classes/RSSW290", None, Some(&admin.token))
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.data()["hour_requirement"], 20.0);

    let lowercase_dup = app
        .request(
            "POST",
            "/api/admin/classes",
            Some(serde_json::json!({ "class_name": "rssw290", "hour_requirement": 10.0 })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(lowercase_dup.status, StatusCode::CONFLICT);
    assert_eq!(lowercase_dup.error_code(), "CONFLICT");

    let list = app.request("GET", "/api/classes", None, Some(&admin.token)).await;
    assert_eq!(list.data().as_array().map(Vec::len), Some(1));
}
