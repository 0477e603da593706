use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use crate::auth::session::{self, AdminSession};
use crate::error::AppError;
use crate::state::AppState;

/// Extractor that requires a live admin session.
/// Returns 401 if the session cookie is absent, malformed, or expired.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AdminSession);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookie_name = &state.config.auth.cookie_name;
        let value = get_cookie_value(parts, cookie_name).ok_or(AppError::Unauthorized)?;

        AdminSession::decode(value, state.config.session_ttl_ms(), session::now_ms())
            .map(AdminUser)
            .ok_or(AppError::Unauthorized)
    }
}

/// Optional session extractor — returns None instead of 401 when the
/// visitor is not signed in.
pub struct MaybeAdmin(pub Option<AdminSession>);

impl FromRequestParts<AppState> for MaybeAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match AdminUser::from_request_parts(parts, state).await {
            Ok(AdminUser(session)) => Ok(MaybeAdmin(Some(session))),
            Err(_) => Ok(MaybeAdmin(None)),
        }
    }
}

fn get_cookie_value<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(';'))
        .map(|s| s.trim())
        .find_map(|cookie| {
            let mut split = cookie.splitn(2, '=');
            let key = split.next()?.trim();
            let val = split.next()?.trim();
            if key == name {
                Some(val)
            } else {
                None
            }
        })
}
