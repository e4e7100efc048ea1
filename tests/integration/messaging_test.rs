//! Integration tests for direct messages and the notification inbox.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_message_notifies_receiver() {
    let app = helpers::TestApp::new().await;
    let (volunteer, supervisor, _admin) = app.seeded().await;

    let sent = app
        .request(
            "POST",
            "/api/messages",
            Some(json!({ "receiver_email": "SAM@x.org", "body": "Can we move Thursday's shift?" })),
            Some(&volunteer.token),
        )
        .await;
    assert_eq!(sent.status, StatusCode::CREATED, "{:?}", sent.body);
    assert_eq!(sent.data()["sender_id"], volunteer.id());
    assert_eq!(sent.data()["receiver_id"], supervisor.id());

    let count = app
        .request(
            "GET",
            "/api/notifications/unread-count",
            None,
            Some(&supervisor.token),
        )
        .await;
    assert_eq!(count.data()["count"], 1);

    let inbox = app
        .request("GET", "/api/notifications", None, Some(&supervisor.token))
        .await;
    let first = &inbox.data()["items"][0];
    assert_eq!(first["kind"], "message");
    assert_eq!(first["body"], "You have received a new message from Vera Lunde");
    assert_eq!(first["sender_id"], volunteer.id());
    assert_eq!(first["is_read"], false);

    let sender_count = app
        .request(
            "GET",
            "/api/notifications/unread-count",
            None,
            Some(&volunteer.token),
        )
        .await;
    assert_eq!(sender_count.data()["count"], 0);
}

#[tokio::test]
async fn test_conversation_is_chronological() {
    let app = helpers::TestApp::new().await;
    let (volunteer, supervisor, _admin) = app.seeded().await;

    let exchange = [
        (&volunteer, "sam@x.org", "first"),
        (&supervisor, "vera@x.org", "second"),
        (&volunteer, "sam@x.org", "third"),
    ];
    for (sender, receiver, body) in exchange {
        let response = app
            .request(
                "POST",
                "/api/messages",
                Some(json!({ "receiver_email": receiver, "body": body })),
                Some(&sender.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    for (viewer, other) in [(&volunteer, "sam@x.org"), (&supervisor, "vera@x.org")] {
        let thread = app
            .request(
                "GET",
                &format!("/api/messages/with/{other}"),
                None,
                Some(&viewer.token),
            )
            .await;
        assert_eq!(thread.status, StatusCode::OK);
        let bodies: Vec<&str> = thread.data()["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["body"].as_str().unwrap())
            .collect();
        assert_eq!(bodies, ["first", "second", "third"]);
    }

    let kim = app
        .create_user(
            "kim@x.org",
            "Kim",
            "Tran",
            hourbook_entity::user::UserRole::Volunteer,
        )
        .await;
    let outsider = app
        .request("GET", "/api/messages/with/sam@x.org", None, Some(&kim.token))
        .await;
    assert_eq!(outsider.data()["total_items"], 0);
}

#[tokio::test]
async fn test_message_rejections() {
    let app = helpers::TestApp::new().await;
    let (volunteer, _supervisor, _admin) = app.seeded().await;

    let to_self = app
        .request(
            "POST",
            "/api/messages",
            Some(json!({ "receiver_email": "vera@x.org", "body": "note to self" })),
            Some(&volunteer.token),
        )
        .await;
    assert_eq!(to_self.status, StatusCode::BAD_REQUEST);
    assert_eq!(to_self.error_code(), "VALIDATION_ERROR");

    let unknown = app
        .request(
            "POST",
            "/api/messages",
            Some(json!({ "receiver_email": "ghost@x.org", "body": "hello?" })),
            Some(&volunteer.token),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let empty = app
        .request(
            "POST",
            "/api/messages",
            Some(json!({ "receiver_email": "sam@x.org", "body": "" })),
            Some(&volunteer.token),
        )
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    let anonymous = app
        .request(
            "POST",
            "/api/messages",
            Some(json!({ "receiver_email": "sam@x.org", "body": "hi" })),
            None,
        )
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_mark_read_and_read_all() {
    let app = helpers::TestApp::new().await;
    let (volunteer, supervisor, _admin) = app.seeded().await;

    for body in ["one", "two", "three"] {
        app.request(
            "POST",
            "/api/messages",
            Some(json!({ "receiver_email": "sam@x.org", "body": body })),
            Some(&volunteer.token),
        )
        .await;
    }

    let inbox = app
        .request("GET", "/api/notifications", None, Some(&supervisor.token))
        .await;
    let id = inbox.data()["items"][0]["id"].as_str().unwrap().to_string();

    let stolen = app
        .request(
            "PUT",
            &format!("/api/notifications/{id}/read"),
            None,
            Some(&volunteer.token),
        )
        .await;
    assert_eq!(stolen.status, StatusCode::NOT_FOUND);

    let marked = app
        .request(
            "PUT",
            &format!("/api/notifications/{id}/read"),
            None,
            Some(&supervisor.token),
        )
        .await;
    assert_eq!(marked.status, StatusCode::OK);
    assert_eq!(marked.data()["is_read"], true);
    assert!(marked.data()["read_at"].is_string());

    let unread = app
        .request(
            "GET",
            "/api/notifications?unread_only=true",
            None,
            Some(&supervisor.token),
        )
        .await;
    assert_eq!(unread.data()["total_items"], 2);

    let all = app
        .request(
            "PUT",
            "/api/notifications/read-all",
            None,
            Some(&supervisor.token),
        )
        .await;
    assert_eq!(all.data()["marked"], 2);

    let count = app
        .request(
            "GET",
            "/api/notifications/unread-count",
            None,
            Some(&supervisor.token),
        )
        .await;
    assert_eq!(count.data()["count"], 0);

    let bad_id = app
        .request(
            "PUT",
            "/api/notifications/not-a-uuid/read",
            None,
            Some(&supervisor.token),
        )
        .await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);
}
