use crate::common::{self, Session, TestApp};

use axum::http::StatusCode;
use serde_json::{Value, json};

async fn create(app: &TestApp, session: &Session, body: Value) -> Value {
    let response = common::send(
        app,
        common::authed_request("POST", "/api/v1/contacts", &session.access_token, Some(body)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    common::body_json(response).await["data"].clone()
}

async fn get_json(app: &TestApp, session: &Session, uri: &str) -> (StatusCode, Value) {
    let response = common::send(
        app,
        common::authed_request("GET", uri, &session.access_token, None),
    )
    .await;
    let status = response.status();
    (status, common::body_json(response).await)
}

#[tokio::test]
async fn test_contacts_require_access_token() {
    let app = common::test_app();

    let response = common::send(
        &app,
        common::json_request("POST", "/api/v1/contacts", json!({"firstName": "Jane"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_contact_crud() {
    let app = common::test_app();
    let session = common::signed_in(&app, "a@x.com", "alice1").await;

    let contact = create(
        &app,
        &session,
        json!({"firstName": "Jane", "lastName": "Doe", "email": "jane@example.com"}),
    )
    .await;
    let id = contact["id"].as_i64().unwrap();
    assert_eq!(contact["firstName"], "Jane");
    assert!(contact.get("userId").is_none());

    let (status, json) = get_json(&app, &session, &format!("/api/v1/contacts/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "Success get a contact");

    let response = common::send(
        &app,
        common::authed_request(
            "PATCH",
            &format!("/api/v1/contacts/{id}"),
            &session.access_token,
            Some(json!({"phone": "08123456"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["data"]["phone"], "08123456");
    assert_eq!(json["data"]["lastName"], "Doe");

    let response = common::send(
        &app,
        common::authed_request(
            "DELETE",
            &format!("/api/v1/contacts/{id}"),
            &session.access_token,
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_json(response).await["data"], true);

    let (status, json) = get_json(&app, &session, &format!("/api/v1/contacts/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["errors"], "Contact not found");
}

#[tokio::test]
async fn test_contacts_are_scoped_to_owner() {
    let app = common::test_app();
    let alice = common::signed_in(&app, "a@x.com", "alice1").await;
    let bob = common::signed_in(&app, "b@x.com", "bobby1").await;

    let contact = create(&app, &alice, json!({"firstName": "Jane"})).await;
    let id = contact["id"].as_i64().unwrap();

    let (status, _) = get_json(&app, &bob, &format!("/api/v1/contacts/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, json) = get_json(&app, &bob, "/api/v1/contacts").await;
    assert_eq!(json["data"], json!([]));
}

#[tokio::test]
async fn test_contact_validation() {
    let app = common::test_app();
    let session = common::signed_in(&app, "a@x.com", "alice1").await;

    let response = common::send(
        &app,
        common::authed_request(
            "POST",
            "/api/v1/contacts",
            &session.access_token,
            Some(json!({"firstName": "Jo", "email": "not-an-email"})),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = common::body_json(response).await;
    let paths: Vec<&str> = json["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["path"].as_str().unwrap())
        .collect();
    assert!(paths.contains(&"firstName"));
    assert!(paths.contains(&"email"));
}

#[tokio::test]
async fn test_bulk_create() {
    let app = common::test_app();
    let session = common::signed_in(&app, "a@x.com", "alice1").await;

    let response = common::send(
        &app,
        common::authed_request(
            "POST",
            "/api/v1/contacts/bulk",
            &session.access_token,
            Some(json!([{"firstName": "Jane"}, {"firstName": "Jo"}])),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = common::body_json(response).await;
    assert_eq!(json["errors"][0]["path"], "1.firstName");

    let (_, json) = get_json(&app, &session, "/api/v1/contacts").await;
    assert_eq!(json["data"], json!([]));

    let response = common::send(
        &app,
        common::authed_request(
            "POST",
            "/api/v1/contacts/bulk",
            &session.access_token,
            Some(json!([{"firstName": "Jane"}, {"firstName": "John"}])),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(common::body_json(response).await["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_bulk_create_rejects_oversized_batch() {
    let app = common::test_app();
    let session = common::signed_in(&app, "a@x.com", "alice1").await;
    let batch: Vec<_> = (0..1001).map(|_| json!({"firstName": "Jane"})).collect();

    let response = common::send(
        &app,
        common::authed_request(
            "POST",
            "/api/v1/contacts/bulk",
            &session.access_token,
            Some(json!(batch)),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (_, json) = get_json(&app, &session, "/api/v1/contacts").await;
    assert_eq!(json["data"], json!([]));
}

#[tokio::test]
async fn test_search_paging_and_sorting() {
    let app = common::test_app();
    let session = common::signed_in(&app, "a@x.com", "alice1").await;

    for (first, last) in [("Alice", "Smith"), ("Bob", "Alison"), ("Carol", "Jones")] {
        create(&app, &session, json!({"firstName": first, "lastName": last})).await;
    }

    let (status, json) = get_json(&app, &session, "/api/v1/contacts?username=ali").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(
        json["paging"],
        json!({"size": 10, "total_page": 1, "current_page": 1})
    );

    let (_, json) = get_json(
        &app,
        &session,
        "/api/v1/contacts?page=2&size=2&sortBy=firstName,unknown&orderBy=desc",
    )
    .await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["firstName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alice"]);
    assert_eq!(json["paging"]["total_page"], 2);

    let (status, json) = get_json(&app, &session, "/api/v1/contacts?size=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["errors"][0]["path"], "size");

    let (status, _) = get_json(&app, &session, "/api/v1/contacts?page=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_rejects_huge_page() {
    let app = common::test_app();
    let session = common::signed_in(&app, "a@x.com", "alice1").await;

    let (status, json) = get_json(
        &app,
        &session,
        "/api/v1/contacts?page=9223372036854775807&size=100",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["errors"][0]["path"], "page");
}

#[tokio::test]
async fn test_contact_image_upload() {
    let app = common::test_app();
    let session = common::signed_in(&app, "a@x.com", "alice1").await;
    let contact = create(&app, &session, json!({"firstName": "Jane"})).await;
    let id = contact["id"].as_i64().unwrap();

    let boundary = "X-BOUNDARY";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"face.webp\"\r\nContent-Type: image/webp\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(&[1u8; 512]);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let response = common::send(
        &app,
        axum::http::Request::builder()
            .method("PUT")
            .uri(format!("/api/v1/contacts/{id}/upload"))
            .header(
                axum::http::header::AUTHORIZATION,
                format!("Bearer {}", session.access_token),
            )
            .header(
                axum::http::header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(axum::body::Body::from(body))
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let info = common::body_json(response).await["data"].clone();

    let (_, json) = get_json(&app, &session, &format!("/api/v1/contacts/{id}")).await;
    assert_eq!(json["data"]["image"], info["imageSecureUrl"]);
}
