//! Integration tests for the registration workflow over HTTP.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use hourbook_entity::user::UserRole;

#[tokio::test]
async fn test_registration_two_stage_approval() {
    let app = helpers::TestApp::new().await;
    let (volunteer, supervisor, admin) = app.seeded().await;

    let id = app.submit_registration(&volunteer).await;
    let path = format!("/api/registration-requests/{id}");

    let pending = app
        .request(
            "GET",
            "/api/registration-requests/pending/count",
            None,
            Some(&supervisor.token),
        )
        .await;
    assert_eq!(pending.data()["count"], 1);

    let forwarded = app
        .request(
            "POST",
            &format!("{path}/decision"),
            Some(json!({ "action": "approve" })),
            Some(&supervisor.token),
        )
        .await;
    assert_eq!(forwarded.status, StatusCode::OK, "{:?}", forwarded.body);
    assert_eq!(forwarded.data()["status"], "pending_admin_approval");

    let admin_pending = app
        .request(
            "GET",
            "/api/registration-requests/pending/count",
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(admin_pending.data()["count"], 1);

    let admin_notes = app
        .request("GET", "/api/notifications", None, Some(&admin.token))
        .await;
    assert_eq!(
        admin_notes.data()["items"][0]["body"],
        "Registration request from Vera Lunde for RSSW290 is awaiting admin approval."
    );

    let approved = app
        .request(
            "POST",
            &format!("{path}/decision"),
            Some(json!({ "action": "approve" })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(approved.status, StatusCode::OK);
    assert_eq!(approved.data()["status"], "approved");
    assert_eq!(approved.data()["reviewed_by"], admin.id());

    let again = app
        .request(
            "POST",
            &format!("{path}/decision"),
            Some(json!({ "action": "approve" })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
    assert_eq!(again.error_code(), "INVALID_STATE");

    let enrolled = app
        .request(
            "GET",
            "/api/enrollments/check?class_name=RSSW290&semester=Fall",
            None,
            Some(&volunteer.token),
        )
        .await;
    assert_eq!(enrolled.data()["enrolled"], true);

    let enrollments = app
        .request(
            "GET",
            &format!("/api/volunteers/{}/enrollments", volunteer.id()),
            None,
            Some(&volunteer.token),
        )
        .await;
    assert_eq!(enrollments.data().as_array().map(Vec::len), Some(1));

    let supervisors = app
        .request(
            "GET",
            &format!("/api/volunteers/{}/supervisors", volunteer.id()),
            None,
            Some(&volunteer.token),
        )
        .await;
    assert_eq!(supervisors.data()[0]["email"], "sam@x.org");

    let roster = app
        .request(
            "GET",
            &format!("/api/supervisors/{}/volunteers", supervisor.id()),
            None,
            Some(&supervisor.token),
        )
        .await;
    assert_eq!(roster.status, StatusCode::OK);
    assert_eq!(roster.data()[0]["volunteer"]["email"], "vera@x.org");
    assert_eq!(roster.data()[0]["total_hours"], 0.0);

    let volunteer_notes = app
        .request("GET", "/api/notifications", None, Some(&volunteer.token))
        .await;
    assert_eq!(
        volunteer_notes.data()["items"][0]["body"],
        "Your registration request for RSSW290 has been approved."
    );

    let resubmit = app
        .request(
            "POST",
            "/api/registration-requests",
            Some(json!({
                "course_name": "RSSW290",
                "semester": "Fall",
                "year": 2024,
                "organization": "Food Bank",
                "supervisor_email": "sam@x.org",
            })),
            Some(&volunteer.token),
        )
        .await;
    assert_eq!(resubmit.status, StatusCode::CONFLICT);
    assert_eq!(resubmit.error_code(), "CONFLICT");
}

#[tokio::test]
async fn test_admin_reject_leaves_no_enrollment() {
    let app = helpers::TestApp::new().await;
    let (volunteer, supervisor, admin) = app.seeded().await;

    let id = app.submit_registration(&volunteer).await;
    let decision = format!("/api/registration-requests/{id}/decision");

    let skipped = app
        .request(
            "POST",
            &decision,
            Some(json!({ "action": "approve" })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(skipped.status, StatusCode::CONFLICT);

    app.request(
        "POST",
        &decision,
        Some(json!({ "action": "approve" })),
        Some(&supervisor.token),
    )
    .await;

    let rejected = app
        .request(
            "POST",
            &decision,
            Some(json!({ "action": "reject" })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(rejected.status, StatusCode::OK);
    assert_eq!(rejected.data()["status"], "rejected");

    let enrolled = app
        .request(
            "GET",
            "/api/enrollments/check?class_name=RSSW290&semester=Fall",
            None,
            Some(&volunteer.token),
        )
        .await;
    assert_eq!(enrolled.data()["enrolled"], false);

    let notes = app
        .request("GET", "/api/notifications?unread_only=true", None, Some(&volunteer.token))
        .await;
    assert_eq!(
        notes.data()["items"][0]["body"],
        "Unfortunately, your registration request for RSSW290 has been rejected."
    );
}

#[tokio::test]
async fn test_registration_access_rules() {
    let app = helpers::TestApp::new().await;
    let (volunteer, _supervisor, admin) = app.seeded().await;
    let other_supervisor = app
        .create_user("olu@x.org", "Olu", "Bassey", UserRole::Supervisor)
        .await;
    let other_volunteer = app
        .create_user("noor@x.org", "Noor", "Haddad", UserRole::Volunteer)
        .await;

    let id = app.submit_registration(&volunteer).await;
    let path = format!("/api/registration-requests/{id}");

    let unassigned = app
        .request(
            "POST",
            &format!("{path}/decision"),
            Some(json!({ "action": "approve" })),
            Some(&other_supervisor.token),
        )
        .await;
    assert_eq!(unassigned.status, StatusCode::FORBIDDEN);

    let by_volunteer = app
        .request(
            "POST",
            &format!("{path}/decision"),
            Some(json!({ "action": "approve" })),
            Some(&volunteer.token),
        )
        .await;
    assert_eq!(by_volunteer.status, StatusCode::FORBIDDEN);

    let peek = app
        .request("GET", &path, None, Some(&other_volunteer.token))
        .await;
    assert_eq!(peek.status, StatusCode::FORBIDDEN);

    let own = app.request("GET", &path, None, Some(&volunteer.token)).await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.data()["status"], "pending_supervisor_approval");

    let others_list = app
        .request("GET", "/api/registration-requests", None, Some(&other_volunteer.token))
        .await;
    assert_eq!(others_list.data()["total_items"], 0);

    let admin_list = app
        .request(
            "GET",
            "/api/registration-requests?status=pending_supervisor_approval",
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(admin_list.data()["total_items"], 1);

    let bad_action = app
        .request(
            "POST",
            &format!("{path}/decision"),
            Some(json!({ "action": "maybe" })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(bad_action.status, StatusCode::BAD_REQUEST);

    let bad_id = app
        .request("GET", "/api/registration-requests/nope", None, Some(&admin.token))
        .await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);

    let missing = app
        .request(
            "GET",
            &format!("/api/registration-requests/{}", uuid::Uuid::new_v4()),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_submission_validation() {
    let app = helpers::TestApp::new().await;
    let (volunteer, supervisor, _admin) = app.seeded().await;

    let missing_field = app
        .request(
            "POST",
            "/api/registration-requests",
            Some(json!({ "course_name": "RSSW290", "semester": "Fall" })),
            Some(&volunteer.token),
        )
        .await;
    assert_eq!(missing_field.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing_field.error_code(), "VALIDATION_ERROR");

    let blank_org = app
        .request(
            "POST",
            "/api/registration-requests",
            Some(json!({
                "course_name": "RSSW290",
                "semester": "Fall",
                "year": 2024,
                "organization": "",
                "supervisor_email": "sam@x.org",
            })),
            Some(&volunteer.token),
        )
        .await;
    assert_eq!(blank_org.status, StatusCode::BAD_REQUEST);
    assert!(blank_org.body["details"]["organization"].is_array());

    let not_a_supervisor = app
        .request(
            "POST",
            "/api/registration-requests",
            Some(json!({
                "course_name": "RSSW290",
                "semester": "Fall",
                "year": 2024,
                "organization": "Food Bank",
                "supervisor_email": "vera@x.org",
            })),
            Some(&volunteer.token),
        )
        .await;
    assert_eq!(not_a_supervisor.status, StatusCode::BAD_REQUEST);

    let by_supervisor = app
        .request(
            "POST",
            "/api/registration-requests",
            Some(json!({
                "course_name": "RSSW290",
                "semester": "Fall",
                "year": 2024,
                "organization": "Food Bank",
                "supervisor_email": "sam@x.org",
            })),
            Some(&supervisor.token),
        )
        .await;
    assert_eq!(by_supervisor.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_second_open_request_is_conflict() {
    let app = helpers::TestApp::new().await;
    let (volunteer, _supervisor, _admin) = app.seeded().await;
    app.submit_registration(&volunteer).await;

    let duplicate = app
        .request(
            "POST",
            "/api/registration-requests",
            Some(json!({
                "course_name": "rssw290",
                "semester": "Fall",
                "year": 2024,
                "organization": "Shelter",
                "supervisor_email": "sam@x.org",
            })),
            Some(&volunteer.token),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.error_code(), "CONFLICT");

    let other_semester = app
        .request(
            "POST",
            "/api/registration-requests",
            Some(json!({
                "course_name": "RSSW290",
                "semester": "Spring",
                "year": 2025,
                "organization": "Shelter",
                "supervisor_email": "sam@x.org",
            })),
            Some(&volunteer.token),
        )
        .await;
    assert_eq!(other_semester.status, StatusCode::CREATED);
}
