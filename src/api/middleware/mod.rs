//! API middleware components

pub mod session;

pub use session::{
    MaybeUser, RequireUser, SESSION_COOKIE, SessionPolicy, end_session, issue_session,
    resolve_session, session_cookie,
};
