//! Authentication endpoints: signup, signin, logout
//!
//! Signup and signin mint a session token and bind it to the client through
//! the session cookie; logout expires the cookie. The token itself is the
//! only session record, so logout does not invalidate its value.

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, header},
    response::IntoResponse,
    routing::post,
};
use serde::Serialize;

use crate::api::middleware::{end_session, issue_session, session_cookie};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::DomainError;
use crate::domain::user::{Credentials, User};
use crate::infrastructure::auth::SessionClaims;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/logout", post(logout))
}

/// User fields safe to expose
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: u64,
    pub login: String,
    pub created_at: String,
}

impl UserResponse {
    fn from_user(user: &User) -> Self {
        Self {
            id: user.id(),
            login: user.login().to_string(),
            created_at: user.created_at().to_rfc3339(),
        }
    }
}

/// Response for signup and signin
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: UserResponse,
    pub expires_at: String,
}

/// Logout response
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// Register a new user and start a session.
///
/// POST /api/v1/signup
async fn signup(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.user_service.signup(credentials).await?;
    session_response(&state, &user)
}

/// Authenticate an existing user and start a session.
///
/// POST /api/v1/signin
async fn signin(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.user_service.signin(credentials).await?;
    session_response(&state, &user)
}

/// End the session by expiring the cookie.
///
/// POST /api/v1/logout
///
/// Requires the session cookie to be present; its validity is not checked,
/// since the only effect is instructing the client to drop it.
async fn logout(headers: HeaderMap) -> Result<impl IntoResponse, ApiError> {
    if session_cookie(&headers).is_none() {
        return Err(DomainError::Unauthenticated.into());
    }

    Ok((
        [(header::SET_COOKIE, end_session())],
        Json(LogoutResponse {
            message: "Logged out".to_string(),
        }),
    ))
}

fn session_response(state: &AppState, user: &User) -> Result<impl IntoResponse + use<>, ApiError> {
    let claims = SessionClaims::for_user(user, state.token_codec.lifetime_hours());
    let token = state.token_codec.issue(&claims)?;

    let expires_at = claims.expires_at();
    let cookie = issue_session(&token, expires_at)?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(SessionResponse {
            user: UserResponse::from_user(user),
            expires_at: expires_at.to_rfc3339(),
        }),
    ))
}
