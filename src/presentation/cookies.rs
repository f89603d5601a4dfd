use axum_extra::extract::SignedCookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

pub const ACCESS_TOKEN_COOKIE: &str = "accesstoken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshtoken";

/// Attributes shared by every session cookie.
#[derive(Debug, Clone, Copy)]
pub struct CookiePolicy {
    pub secure: bool,
    pub access_ttl: i64,
    pub refresh_ttl: i64,
}

fn session_cookie(name: &'static str, value: String, max_age: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::None)
        .path("/")
        .max_age(Duration::seconds(max_age))
        .build()
}

/// Expired, empty cookie. Added rather than removed from the jar so the
/// browser is told to drop it even when the request authenticated by header.
fn removal_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build((name, ""))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::None)
        .path("/")
        .build();
    cookie.make_removal();
    cookie
}

pub fn set_access_token(jar: SignedCookieJar, token: &str, policy: CookiePolicy) -> SignedCookieJar {
    jar.add(session_cookie(
        ACCESS_TOKEN_COOKIE,
        token.to_string(),
        policy.access_ttl,
        policy.secure,
    ))
}

pub fn set_session(
    jar: SignedCookieJar,
    access_token: &str,
    refresh_token: &str,
    policy: CookiePolicy,
) -> SignedCookieJar {
    set_access_token(jar, access_token, policy).add(session_cookie(
        REFRESH_TOKEN_COOKIE,
        refresh_token.to_string(),
        policy.refresh_ttl,
        policy.secure,
    ))
}

pub fn clear_session(jar: SignedCookieJar, policy: CookiePolicy) -> SignedCookieJar {
    jar.add(removal_cookie(ACCESS_TOKEN_COOKIE, policy.secure))
        .add(removal_cookie(REFRESH_TOKEN_COOKIE, policy.secure))
}

/// Value of a signed cookie; tampered or unsigned cookies read as absent.
pub fn read(jar: &SignedCookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}
