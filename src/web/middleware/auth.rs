//! Caller resolution for the protected routes.
//!
//! A request carries its JWT either as `Authorization: Bearer <token>` or in
//! the [`TOKEN_COOKIE`] cookie set by the login handler. The resolved caller
//! is stored as an [`AuthenticatedUser`] extension, which is the only source
//! of the user id the list and tag handlers scope their queries by.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{DecodingKey, Validation, decode};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::web::models::{AuthenticatedUser, Claims};
use crate::web::{AppState, error::AppError};

/// Name of the cookie holding the session token.
pub const TOKEN_COOKIE: &str = "token";

fn rejected() -> AppError {
    AppError::Unauthorized("Missing or invalid token.".to_string())
}

/// The bearer token wins over the cookie when both are present.
fn presented_token(headers: &HeaderMap, jar: &CookieJar) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    match bearer {
        Some(token) => Some(token.to_owned()),
        None => jar
            .get(TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_owned()),
    }
}

pub(crate) fn caller_from_token(
    token: &str,
    jwt_secret: &str,
) -> Result<AuthenticatedUser, AppError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        warn!(error = %e, "Rejected session token.");
        rejected()
    })?
    .claims;

    Ok(AuthenticatedUser {
        id: claims.user_id,
        username: claims.sub,
    })
}

pub async fn require_authenticated_user(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = presented_token(req.headers(), &jar) else {
        debug!(path = %req.uri().path(), "Request without a session token.");
        return Err(rejected());
    };

    let caller = caller_from_token(&token, &state.config.jwt_secret)?;
    req.extensions_mut().insert(caller);
    Ok(next.run(req).await)
}
