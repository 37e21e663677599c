//! Cookie-bound session middleware
//!
//! Per request: cookie present? -> signature and structure valid? -> not
//! expired? Any failed transition is a 401. Endpoints choose between the
//! `Required` and `Optional` policies instead of duplicating the checks.

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, HeaderValue, header, request::Parts};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::DomainError;
use crate::infrastructure::auth::SessionClaims;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session_id";

/// How an endpoint treats a request without a session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPolicy {
    /// An absent cookie is a hard `Unauthenticated` failure.
    Required,
    /// An absent cookie means "no identity". A cookie that is present but
    /// invalid or expired still fails, exactly as under `Required`.
    Optional,
}

/// Resolve the session for a request according to the given policy.
pub fn resolve_session(
    headers: &HeaderMap,
    state: &AppState,
    policy: SessionPolicy,
) -> Result<Option<SessionClaims>, ApiError> {
    let Some(token) = session_cookie(headers) else {
        return match policy {
            SessionPolicy::Required => Err(DomainError::Unauthenticated.into()),
            SessionPolicy::Optional => Ok(None),
        };
    };

    let claims = state.token_codec.parse(&token)?;

    // A validly signed token is still only trusted while unexpired.
    if claims.is_expired() {
        debug!(login = claims.login.as_str(), "rejected expired session");
        return Err(DomainError::Unauthenticated.into());
    }

    Ok(Some(claims))
}

/// Extract the session cookie value, if any.
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;

    raw.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// Extractor that requires an authenticated session.
#[derive(Debug, Clone)]
pub struct RequireUser(pub SessionClaims);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match resolve_session(&parts.headers, state, SessionPolicy::Required)? {
            Some(claims) => Ok(RequireUser(claims)),
            // The required policy never resolves to an absent session.
            None => Err(DomainError::Unauthenticated.into()),
        }
    }
}

/// Extractor that accepts an absent session as anonymous.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<SessionClaims>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = resolve_session(&parts.headers, state, SessionPolicy::Optional)?;
        Ok(MaybeUser(claims))
    }
}

/// Set-Cookie value binding the token to the client until `expires_at`.
pub fn issue_session(token: &str, expires_at: DateTime<Utc>) -> Result<HeaderValue, DomainError> {
    let cookie = format!(
        "{}={}; Path=/; Expires={}; HttpOnly",
        SESSION_COOKIE,
        token,
        format_expires(expires_at),
    );

    HeaderValue::from_str(&cookie)
        .map_err(|e| DomainError::internal(format!("Failed to build session cookie: {}", e)))
}

/// Set-Cookie value that expires the session cookie immediately.
///
/// The token value itself stays cryptographically valid until its own
/// expiry; this only instructs the client to drop it.
pub fn end_session() -> HeaderValue {
    HeaderValue::from_static(
        "session_id=; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT; HttpOnly",
    )
}

fn format_expires(expires_at: DateTime<Utc>) -> String {
    expires_at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
