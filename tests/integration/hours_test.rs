//! Integration tests for hours requests, totals and the approval race.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

async fn total_hours(app: &helpers::TestApp, volunteer: &helpers::TestUser) -> f64 {
    let summary = app
        .request(
            "GET",
            &format!("/api/volunteers/{}/summary", volunteer.id()),
            None,
            Some(&volunteer.token),
        )
        .await;
    assert_eq!(summary.status, StatusCode::OK, "{:?}", summary.body);
    summary.data()["total_hours"].as_f64().expect("total_hours")
}

#[tokio::test]
async fn test_hours_approval_credits_once() {
    let app = helpers::TestApp::new().await;
    let (volunteer, supervisor, _admin) = app.seeded().await;

    let submitted = app.submit_hours(&volunteer, "10:00:00", "12:30:00").await;
    assert_eq!(submitted.status, StatusCode::CREATED, "{:?}", submitted.body);
    assert_eq!(submitted.data()["hours"], 2.5);
    assert_eq!(submitted.data()["status"], "pending");
    let id = submitted.data()["id"].as_str().unwrap().to_string();

    assert_eq!(total_hours(&app, &volunteer).await, 0.0);

    let pending = app
        .request(
            "GET",
            "/api/hours-requests/pending/count",
            None,
            Some(&supervisor.token),
        )
        .await;
    assert_eq!(pending.data()["count"], 1);

    let approved = app
        .request(
            "POST",
            &format!("/api/hours-requests/{id}/decision"),
            Some(json!({ "action": "approve" })),
            Some(&supervisor.token),
        )
        .await;
    assert_eq!(approved.status, StatusCode::OK);
    assert_eq!(approved.data()["status"], "approved");
    assert_eq!(total_hours(&app, &volunteer).await, 2.5);

    let again = app
        .request(
            "POST",
            &format!("/api/hours-requests/{id}/decision"),
            Some(json!({ "action": "reject" })),
            Some(&supervisor.token),
        )
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
    assert_eq!(again.error_code(), "INVALID_STATE");
    assert_eq!(total_hours(&app, &volunteer).await, 2.5);

    let notes = app
        .request("GET", "/api/notifications", None, Some(&volunteer.token))
        .await;
    assert_eq!(
        notes.data()["items"][0]["body"],
        "Your hours request for Tutoring on 2024-10-03 has been approved."
    );
}

#[tokio::test]
async fn test_concurrent_approvals_single_credit() {
    let app = helpers::TestApp::new().await;
    let (volunteer, supervisor, _admin) = app.seeded().await;

    let submitted = app.submit_hours(&volunteer, "09:00:00", "11:00:00").await;
    let id = submitted.data()["id"].as_str().unwrap().to_string();
    let path = format!("/api/hours-requests/{id}/decision");

    let (first, second) = tokio::join!(
        app.request(
            "POST",
            &path,
            Some(json!({ "action": "approve" })),
            Some(&supervisor.token),
        ),
        app.request(
            "POST",
            &path,
            Some(json!({ "action": "approve" })),
            Some(&supervisor.token),
        ),
    );

    let mut statuses = [first.status, second.status];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::CONFLICT]);
    assert_eq!(total_hours(&app, &volunteer).await, 2.0);
}

#[tokio::test]
async fn test_non_positive_interval_rejected_before_insert() {
    let app = helpers::TestApp::new().await;
    let (volunteer, _supervisor, _admin) = app.seeded().await;

    let backwards = app.submit_hours(&volunteer, "12:00:00", "10:00:00").await;
    assert_eq!(backwards.status, StatusCode::BAD_REQUEST);
    assert_eq!(backwards.error_code(), "VALIDATION_ERROR");

    let empty = app.submit_hours(&volunteer, "10:00:00", "10:00:00").await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    let listed = app
        .request("GET", "/api/hours-requests", None, Some(&volunteer.token))
        .await;
    assert_eq!(listed.data()["total_items"], 0);
}

#[tokio::test]
async fn test_hours_review_permissions() {
    let app = helpers::TestApp::new().await;
    let (volunteer, _supervisor, admin) = app.seeded().await;
    let other_supervisor = app
        .create_user(
            "olu@x.org",
            "Olu",
            "Bassey",
            hourbook_entity::user::UserRole::Supervisor,
        )
        .await;

    let submitted = app.submit_hours(&volunteer, "10:00:00", "11:00:00").await;
    let id = submitted.data()["id"].as_str().unwrap().to_string();
    let path = format!("/api/hours-requests/{id}/decision");

    for token in [&admin.token, &volunteer.token, &other_supervisor.token] {
        let response = app
            .request("POST", &path, Some(json!({ "action": "approve" })), Some(token))
            .await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);
    }

    let peek = app
        .request(
            "GET",
            &format!("/api/hours-requests/{id}"),
            None,
            Some(&other_supervisor.token),
        )
        .await;
    assert_eq!(peek.status, StatusCode::FORBIDDEN);

    let admin_view = app
        .request(
            "GET",
            &format!("/api/hours-requests/{id}"),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(admin_view.status, StatusCode::OK);

    let admin_count = app
        .request("GET", "/api/hours-requests/pending/count", None, Some(&admin.token))
        .await;
    assert_eq!(admin_count.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_progress_groups_approved_hours() {
    let app = helpers::TestApp::new().await;
    let (volunteer, supervisor, _admin) = app.seeded().await;

    for (from, to) in [
        ("09:00:00", "10:30:00"),
        ("13:00:00", "15:00:00"),
        ("16:00:00", "17:00:00"),
    ] {
        app.submit_hours(&volunteer, from, to).await;
    }

    let pending = app
        .request(
            "GET",
            "/api/hours-requests?status=pending",
            None,
            Some(&supervisor.token),
        )
        .await;
    let items = pending.data()["items"].as_array().unwrap().clone();
    assert_eq!(items.len(), 3);

    // Approve the two longer blocks, reject the last.
    for item in &items {
        let action = if item["hours"] == 1.0 { "reject" } else { "approve" };
        let id = item["id"].as_str().unwrap();
        let response = app
            .request(
                "POST",
                &format!("/api/hours-requests/{id}/decision"),
                Some(json!({ "action": action })),
                Some(&supervisor.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let report = app
        .request(
            "GET",
            &format!("/api/volunteers/{}/progress?class_name=RSSW290", volunteer.id()),
            None,
            Some(&supervisor.token),
        )
        .await;
    assert_eq!(report.status, StatusCode::OK, "{:?}", report.body);
    let data = report.data();
    assert_eq!(data["total_hours"], 3.5);
    assert_eq!(data["entries"][0]["total_hours"], 3.5);
    assert_eq!(data["entries"][0]["activity"], "Tutoring");
    assert_eq!(data["class"]["hour_requirement"], 20.0);
    assert_eq!(data["class"]["remaining_hours"], 16.5);

    let stranger = app
        .create_user(
            "noor@x.org",
            "Noor",
            "Haddad",
            hourbook_entity::user::UserRole::Volunteer,
        )
        .await;
    let denied = app
        .request(
            "GET",
            &format!("/api/volunteers/{}/progress", volunteer.id()),
            None,
            Some(&stranger.token),
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_out_of_range_page_returns_empty_page() {
    let app = helpers::TestApp::new().await;
    let (volunteer, _supervisor, _admin) = app.seeded().await;
    app.submit_hours(&volunteer, "10:00:00", "11:00:00").await;

    let listed = app
        .request(
            "GET",
            "/api/hours-requests?page=18446744073709551615&page_size=100",
            None,
            Some(&volunteer.token),
        )
        .await;
    assert_eq!(listed.status, StatusCode::OK, "{:?}", listed.body);
    assert_eq!(listed.data()["total_items"], 1);
    assert_eq!(listed.data()["items"].as_array().unwrap().len(), 0);
    assert_eq!(listed.data()["has_next"], false);
}
