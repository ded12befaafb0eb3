use crate::services::auth;
use crate::web::error::{AppError, AppResult};
use crate::web::extractors::IsAdmin;
use crate::web::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tera::Context;

#[derive(Deserialize)]
pub struct LoginForm {
    password: String,
}

fn password_accepted(state: &AppState, password: &str) -> bool {
    if auth::check_password(&state.config.auth, password) {
        tracing::info!("Admin logged in");
        true
    } else {
        tracing::warn!("Failed admin login attempt");
        false
    }
}

/// POST /api/auth/login
pub async fn api_login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: Result<Json<LoginForm>, JsonRejection>,
) -> AppResult<Response> {
    let Json(form) = payload?;

    if !password_accepted(&state, &form.password) {
        return Err(AppError::Unauthorized);
    }
    let cookie = auth::login_cookie(&state.config.auth, state.config.server.secure_cookies);
    Ok((jar.add(cookie), Json(json!({ "ok": true }))).into_response())
}

/// GET /api/auth/check
pub async fn check(IsAdmin(is_admin): IsAdmin) -> AppResult<Response> {
    if is_admin {
        Ok(Json(json!({ "authenticated": true })).into_response())
    } else {
        Err(AppError::Unauthorized)
    }
}

/// POST /api/auth/logout
pub async fn api_logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let jar = jar.add(auth::logout_cookie(&state.config.auth));
    (jar, Json(json!({ "ok": true }))).into_response()
}

/// GET /admin/login
pub async fn login_form(
    State(state): State<Arc<AppState>>,
    IsAdmin(is_admin): IsAdmin,
) -> AppResult<Response> {
    if is_admin {
        return Ok(Redirect::to("/admin").into_response());
    }

    let mut ctx = Context::new();
    ctx.insert("site", &state.config.site);
    let html = state.templates.render("admin/login.html", &ctx)?;
    Ok(Html(html).into_response())
}

/// POST /admin/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    if password_accepted(&state, &form.password) {
        let cookie = auth::login_cookie(&state.config.auth, state.config.server.secure_cookies);
        return Ok((jar.add(cookie), Redirect::to("/admin")).into_response());
    }

    let mut ctx = Context::new();
    ctx.insert("site", &state.config.site);
    ctx.insert("error", "Invalid password");
    let html = state.templates.render("admin/login.html", &ctx)?;
    Ok((StatusCode::UNAUTHORIZED, Html(html)).into_response())
}

/// POST /admin/logout
pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let jar = jar.add(auth::logout_cookie(&state.config.auth));
    (jar, Redirect::to("/admin/login")).into_response()
}
