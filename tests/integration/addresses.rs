use crate::common::{self, Session, TestApp};

use axum::http::StatusCode;
use serde_json::{Value, json};

async fn contact_id(app: &TestApp, session: &Session) -> i64 {
    let response = common::send(
        app,
        common::authed_request(
            "POST",
            "/api/v1/contacts",
            &session.access_token,
            Some(json!({"firstName": "Jane"})),
        ),
    )
    .await;
    common::body_json(response).await["data"]["id"]
        .as_i64()
        .unwrap()
}

async fn call(
    app: &TestApp,
    session: &Session,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let response = common::send(
        app,
        common::authed_request(method, uri, &session.access_token, body),
    )
    .await;
    let status = response.status();
    (status, common::body_json(response).await)
}

#[tokio::test]
async fn test_address_crud() {
    let app = common::test_app();
    let session = common::signed_in(&app, "a@x.com", "alice1").await;
    let cid = contact_id(&app, &session).await;
    let base = format!("/api/v1/contacts/{cid}/addresses");

    let (status, json) = call(
        &app,
        &session,
        "POST",
        &base,
        Some(json!({"street": "Main St 1", "city": "Osaka", "country": "Japan", "postalCode": "5300001"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["status"], "Address created successfully");
    let aid = json["data"]["id"].as_i64().unwrap();
    assert_eq!(json["data"]["postalCode"], "5300001");

    let (status, json) = call(&app, &session, "GET", &base, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let (status, json) = call(
        &app,
        &session,
        "PATCH",
        &format!("{base}/{aid}"),
        Some(json!({"city": "Kyoto", "country": "Japan"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["city"], "Kyoto");
    assert_eq!(json["data"]["street"], "Main St 1");

    let (status, _) = call(
        &app,
        &session,
        "PATCH",
        &format!("{base}/{aid}"),
        Some(json!({"city": "Kyoto"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = call(&app, &session, "DELETE", &format!("{base}/{aid}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], true);

    let (status, json) = call(&app, &session, "GET", &format!("{base}/{aid}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["errors"], "Address not found");
}

#[tokio::test]
async fn test_addresses_of_foreign_contact() {
    let app = common::test_app();
    let alice = common::signed_in(&app, "a@x.com", "alice1").await;
    let bob = common::signed_in(&app, "b@x.com", "bobby1").await;
    let cid = contact_id(&app, &alice).await;

    let (status, json) = call(
        &app,
        &bob,
        "POST",
        &format!("/api/v1/contacts/{cid}/addresses"),
        Some(json!({"country": "Japan"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["errors"], "Contact not found");
}
