use crate::config::AuthConfig;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use time::Duration;

/// Single shared-secret gate: the request is an admin request iff the auth
/// cookie carries exactly the configured marker value. A missing cookie and
/// a wrong value are treated the same.
pub fn is_authenticated(jar: &CookieJar, auth: &AuthConfig) -> bool {
    jar.get(&auth.cookie_name)
        .map(|cookie| constant_time_eq(cookie.value().as_bytes(), auth.cookie_value.as_bytes()))
        .unwrap_or(false)
}

/// Compares a login attempt against the configured admin password. With no
/// password configured nobody can log in.
pub fn check_password(auth: &AuthConfig, candidate: &str) -> bool {
    match auth.admin_password.as_deref() {
        Some(expected) if !expected.is_empty() => {
            constant_time_eq(candidate.as_bytes(), expected.as_bytes())
        }
        _ => false,
    }
}

pub fn login_cookie(auth: &AuthConfig, secure: bool) -> Cookie<'static> {
    Cookie::build((auth.cookie_name.clone(), auth.cookie_value.clone()))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(axum_extra::extract::cookie::SameSite::Lax)
        .max_age(Duration::days(auth.cookie_max_age_days))
        .build()
}

/// Overwrites the auth cookie with an empty, already expired one.
pub fn logout_cookie(auth: &AuthConfig) -> Cookie<'static> {
    Cookie::build((auth.cookie_name.clone(), ""))
        .path("/")
        .max_age(Duration::ZERO)
        .expires(time::OffsetDateTime::UNIX_EPOCH)
        .build()
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
