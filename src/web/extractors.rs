use crate::services::auth;
use crate::web::error::AppError;
use crate::web::state::AppState;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Proof that the request carries the admin cookie. Rejects with 401 before
/// any body extractor runs.
pub struct AdminAuth;

impl FromRequestParts<Arc<AppState>> for AdminAuth {
    type Rejection = AppError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<AppState>,
    ) -> Pin<Box<dyn Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>>
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        let cookies = CookieJar::from_headers(&parts.headers);
        let allowed = auth::is_authenticated(&cookies, &state.config.auth);
        let path = parts.uri.path().to_string();
        Box::pin(async move {
            if allowed {
                Ok(AdminAuth)
            } else {
                tracing::warn!("Rejected unauthenticated request to {}", path);
                Err(AppError::Unauthorized)
            }
        })
    }
}

/// Whether the request carries the admin cookie, without rejecting.
pub struct IsAdmin(pub bool);

impl FromRequestParts<Arc<AppState>> for IsAdmin {
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<AppState>,
    ) -> Pin<Box<dyn Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>>
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        let cookies = CookieJar::from_headers(&parts.headers);
        let allowed = auth::is_authenticated(&cookies, &state.config.auth);
        Box::pin(async move { Ok(IsAdmin(allowed)) })
    }
}
