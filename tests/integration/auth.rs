use crate::common::{self, TestApp};

use addressbook::domain::users::UserRepository;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::json;
use time::{Duration, OffsetDateTime};

fn with_cookies(method: &str, uri: &str, cookies: &[String]) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::COOKIE, cookies.join("; "))
        .body(Body::empty())
        .unwrap()
}

/// True when the response tells the browser to drop `name`.
fn clears_cookie(response: &axum::http::Response<Body>, name: &str) -> bool {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|c| c.starts_with(&format!("{}=", name)) && c.contains("Max-Age=0"))
}

async fn current_with_bearer(app: &TestApp, token: &str) -> StatusCode {
    common::send(app, common::authed_request("GET", "/api/v1/auth/current", token, None))
        .await
        .status()
}

async fn refresh_with_bearer(app: &TestApp, token: &str) -> StatusCode {
    common::send(
        app,
        common::authed_request("POST", "/api/v1/auth/refresh-token", token, None),
    )
    .await
    .status()
}

#[tokio::test]
async fn test_register_verify_login_current_round_trip() {
    let app = common::test_app();

    let response = common::send(
        &app,
        common::json_request(
            "POST",
            "/api/v1/auth/register",
            json!({"email": "a@x.com", "password": "secretpw", "username": "alice1"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = common::body_json(response).await;
    assert_eq!(json["status"], "User successfully registered");
    let token = json["data"]["emailVerificationToken"].as_str().unwrap().to_string();
    assert!(!token.is_empty());
    assert_eq!(app.mailer.sent().len(), 1);

    let verified = common::verify(&app, "a@x.com", &token).await;
    assert_eq!(verified["code"], 200);
    assert_eq!(verified["data"]["isVerified"], true);
    assert!(verified["data"]["verifiedTime"].is_string());

    let session = common::login(&app, "a@x.com", "secretpw").await;
    assert!(!session.access_token.is_empty());
    assert!(!session.refresh_token.is_empty());
    assert!(common::cookie_value(&session.cookies, "accesstoken").is_some());
    assert!(common::cookie_value(&session.cookies, "refreshtoken").is_some());

    let response = common::send(
        &app,
        with_cookies("GET", "/api/v1/auth/current", &session.cookies),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(
        json["data"],
        json!({"email": "a@x.com", "username": "alice1", "role": "ADMIN"})
    );
}

#[tokio::test]
async fn test_login_sets_session_cookie_attributes() {
    let app = common::test_app();
    common::register(&app, "a@x.com", "alice1", "secretpw").await;
    common::verify(&app, "a@x.com", "secret").await;

    let response = common::send(
        &app,
        common::json_request(
            "POST",
            "/api/v1/auth/login",
            json!({"email": "a@x.com", "password": "secretpw"}),
        ),
    )
    .await;

    let raw: Vec<String> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    let access = raw.iter().find(|c| c.starts_with("accesstoken=")).unwrap();
    assert!(access.contains("HttpOnly"));
    assert!(access.contains("SameSite=None"));
    assert!(access.contains("Path=/"));
    assert!(access.contains("Max-Age=120"));
    assert!(!access.contains("Secure"));
}

#[tokio::test]
async fn test_first_registered_user_is_admin() {
    let app = common::test_app();

    common::register(&app, "a@x.com", "alice1", "secretpw").await;
    common::register(&app, "b@x.com", "bobby1", "secretpw").await;

    let first = common::verify(&app, "a@x.com", "secret").await;
    let second = common::verify(&app, "b@x.com", "secret").await;

    assert_eq!(first["data"]["role"], "ADMIN");
    assert_eq!(second["data"]["role"], "USER");
}

#[tokio::test]
async fn test_duplicate_username_rejected_before_insert() {
    let app = common::test_app();
    common::register(&app, "a@x.com", "alice1", "secretpw").await;

    let response = common::send(
        &app,
        common::json_request(
            "POST",
            "/api/v1/auth/register",
            json!({"email": "other@x.com", "password": "secretpw", "username": "alice1"}),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = common::body_json(response).await;
    assert_eq!(json["errors"], "Username already exists");
    assert_eq!(app.users.count_all().await.unwrap(), 1);
}

#[tokio::test]
async fn test_register_validation_errors() {
    let app = common::test_app();

    let response = common::send(
        &app,
        common::json_request(
            "POST",
            "/api/v1/auth/register",
            json!({"email": "a@x.com", "password": "short", "username": "alice1"}),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = common::body_json(response).await;
    assert_eq!(json["code"], 400);
    assert_eq!(json["errors"][0]["path"], "password");
}

#[tokio::test]
async fn test_unverified_user_cannot_login_or_reset() {
    let app = common::test_app();
    common::register(&app, "a@x.com", "alice1", "secretpw").await;

    let response = common::send(
        &app,
        common::json_request(
            "POST",
            "/api/v1/auth/login",
            json!({"email": "a@x.com", "password": "secretpw"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = common::send(
        &app,
        common::json_request(
            "POST",
            "/api/v1/auth/forgot-password",
            json!({"email": "a@x.com"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_look_the_same() {
    let app = common::test_app();
    common::signed_in(&app, "a@x.com", "alice1").await;

    let wrong_password = common::send(
        &app,
        common::json_request(
            "POST",
            "/api/v1/auth/login",
            json!({"email": "a@x.com", "password": "wrongpass"}),
        ),
    )
    .await;
    let unknown = common::send(
        &app,
        common::json_request(
            "POST",
            "/api/v1/auth/login",
            json!({"email": "nobody@x.com", "password": "secretpw"}),
        ),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);
    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        common::body_json(wrong_password).await,
        common::body_json(unknown).await
    );
}

#[tokio::test]
async fn test_superseded_refresh_token_is_rejected() {
    let app = common::test_app();
    let first = common::signed_in(&app, "a@x.com", "alice1").await;
    let second = common::login(&app, "a@x.com", "secretpw").await;

    assert_eq!(
        refresh_with_bearer(&app, &first.refresh_token).await,
        StatusCode::UNAUTHORIZED
    );

    let response = common::send(
        &app,
        common::authed_request(
            "POST",
            "/api/v1/auth/refresh-token",
            &second.refresh_token,
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(common::cookie_value(&common::set_cookies(&response), "accesstoken").is_some());
    let json = common::body_json(response).await;
    assert_eq!(json["data"]["refreshToken"], second.refresh_token.as_str());

    let new_access = json["data"]["accessToken"].as_str().unwrap();
    assert_eq!(current_with_bearer(&app, new_access).await, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_via_cookie() {
    let app = common::test_app();
    let session = common::signed_in(&app, "a@x.com", "alice1").await;

    let response = common::send(
        &app,
        with_cookies("POST", "/api/v1/auth/refresh-token", &session.cookies),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_token_kinds_are_not_interchangeable() {
    let app = common::test_app();
    let session = common::signed_in(&app, "a@x.com", "alice1").await;

    assert_eq!(
        current_with_bearer(&app, &session.refresh_token).await,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        refresh_with_bearer(&app, &session.access_token).await,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn test_missing_refresh_token() {
    let app = common::test_app();

    let response = common::send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/v1/auth/refresh-token")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = common::body_json(response).await;
    assert_eq!(json["errors"], "Refresh token not found");
}

#[tokio::test]
async fn test_guard_rejects_missing_or_garbage_tokens() {
    let app = common::test_app();

    let response = common::send(
        &app,
        Request::builder()
            .uri("/api/v1/auth/current")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    assert_eq!(
        current_with_bearer(&app, "not-a-jwt").await,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn test_cookie_takes_priority_over_bearer() {
    let app = common::test_app();
    let session = common::signed_in(&app, "a@x.com", "alice1").await;

    let response = common::send(
        &app,
        Request::builder()
            .uri("/api/v1/auth/current")
            .header(header::COOKIE, session.cookies.join("; "))
            .header(header::AUTHORIZATION, "Bearer not-a-jwt")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unsigned_cookie_is_ignored() {
    let app = common::test_app();
    let session = common::signed_in(&app, "a@x.com", "alice1").await;

    // Raw JWT without the cookie signature.
    let forged = format!("accesstoken={}", session.access_token);
    let response = common::send(
        &app,
        with_cookies("GET", "/api/v1/auth/current", &[forged.clone()]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = common::send(
        &app,
        Request::builder()
            .uri("/api/v1/auth/current")
            .header(header::COOKIE, forged)
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", session.access_token),
            )
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_logout_twice() {
    let app = common::test_app();
    let session = common::signed_in(&app, "a@x.com", "alice1").await;

    let response = common::send(
        &app,
        common::authed_request("DELETE", "/api/v1/auth/logout", &session.access_token, None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(clears_cookie(&response, "accesstoken"));
    assert!(clears_cookie(&response, "refreshtoken"));
    let json = common::body_json(response).await;
    assert_eq!(json["data"], true);

    let response = common::send(
        &app,
        common::authed_request("DELETE", "/api/v1/auth/logout", &session.access_token, None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = common::body_json(response).await;
    assert_eq!(json["errors"], "User already logged out");

    // Access token stays valid until expiry; the refresh token does not.
    assert_eq!(
        current_with_bearer(&app, &session.access_token).await,
        StatusCode::OK
    );
    assert_eq!(
        refresh_with_bearer(&app, &session.refresh_token).await,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn test_forgot_and_reset_password() {
    let app = common::test_app();
    let session = common::signed_in(&app, "a@x.com", "alice1").await;

    let response = common::send(
        &app,
        common::json_request(
            "POST",
            "/api/v1/auth/forgot-password",
            json!({"email": "a@x.com"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    let token = json["data"]["passwordResetToken"].as_str().unwrap().to_string();
    assert!(
        app.mailer
            .sent()
            .iter()
            .any(|m| m.subject == "Reset Password")
    );

    let reset = json!({
        "email": "a@x.com",
        "newPassword": "newsecret",
        "repeatNewPassword": "newsecret",
        "resetPasswordToken": token,
    });
    let response = common::send(
        &app,
        common::json_request("POST", "/api/v1/auth/reset-password", reset.clone()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(clears_cookie(&response, "refreshtoken"));
    let json = common::body_json(response).await;
    assert_eq!(json["data"], json!({"email": "a@x.com", "username": "alice1"}));

    // Single use
    let response = common::send(
        &app,
        common::json_request("POST", "/api/v1/auth/reset-password", reset),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Old session is gone, new password works
    assert_eq!(
        refresh_with_bearer(&app, &session.refresh_token).await,
        StatusCode::UNAUTHORIZED
    );
    common::login(&app, "a@x.com", "newsecret").await;
}

#[tokio::test]
async fn test_expired_reset_token() {
    let app = common::test_app();
    common::signed_in(&app, "a@x.com", "alice1").await;
    common::send(
        &app,
        common::json_request(
            "POST",
            "/api/v1/auth/forgot-password",
            json!({"email": "a@x.com"}),
        ),
    )
    .await;

    let user = app.users.find_by_email("a@x.com").await.unwrap().unwrap();
    app.users
        .set_password_reset_expiry(user.id, OffsetDateTime::now_utc() - Duration::seconds(1));

    let response = common::send(
        &app,
        common::json_request(
            "POST",
            "/api/v1/auth/reset-password",
            json!({
                "email": "a@x.com",
                "newPassword": "newsecret",
                "repeatNewPassword": "newsecret",
                "resetPasswordToken": "secret",
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = common::body_json(response).await;
    assert_eq!(json["errors"], "Reset password token expired");
    common::login(&app, "a@x.com", "secretpw").await;
}

#[tokio::test]
async fn test_reset_token_not_echoed_in_production() {
    let app = common::test_app_with(common::test_config(&[("APP_ENV", "production")]));
    let registered = common::register(&app, "a@x.com", "alice1", "secretpw").await;
    let token = registered["data"]["emailVerificationToken"]
        .as_str()
        .unwrap()
        .to_string();
    assert_eq!(token.len(), 80);
    common::verify(&app, "a@x.com", &token).await;

    let response = common::send(
        &app,
        common::json_request(
            "POST",
            "/api/v1/auth/forgot-password",
            json!({"email": "a@x.com"}),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert!(json["data"].get("passwordResetToken").is_none());
}

#[tokio::test]
async fn test_avatar_upload() {
    let app = common::test_app();
    let session = common::signed_in(&app, "a@x.com", "alice1").await;

    let boundary = "X-BOUNDARY";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"me.png\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(&[0u8; 2048]);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let response = common::send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/v1/auth/upload")
            .header(header::AUTHORIZATION, format!("Bearer {}", session.access_token))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["data"]["format"], "png");
    assert_eq!(json["data"]["size"], 2.0);

    let user = app.users.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(
        user.image.as_deref(),
        json["data"]["imageSecureUrl"].as_str()
    );
    assert_eq!(app.images.stored().len(), 1);
}
