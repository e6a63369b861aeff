//! Identifies the user making a request.
//!
//! Signing in, sessions and passwords are handled by the hosted auth provider
//! that sits in front of the server. The provider forwards the ID of the
//! authenticated user in a request header (see [AuthState::identity_header]),
//! and route handlers receive it through the [UserId] extractor.

use std::fmt::Display;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderName, request::Parts},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error};

/// The default header the auth provider uses to forward the user's ID.
pub const DEFAULT_IDENTITY_HEADER: &str = "x-forwarded-user";

/// The opaque ID of an authenticated user, as issued by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Wrap the user ID issued by the auth provider.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The state needed to identify users.
#[derive(Debug, Clone)]
pub struct AuthState {
    /// The request header carrying the authenticated user's ID.
    pub identity_header: HeaderName,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            identity_header: state.identity_header.clone(),
        }
    }
}

/// Parse a configured header name, e.g. "X-Forwarded-User".
///
/// # Errors
/// Returns [Error::InvalidIdentityHeader] if `name` is not a valid header name.
pub fn parse_identity_header(name: &str) -> Result<HeaderName, Error> {
    HeaderName::try_from(name.trim()).map_err(|error| {
        tracing::error!("invalid identity header \"{name}\": {error}");
        Error::InvalidIdentityHeader(name.to_owned())
    })
}

impl<S> FromRequestParts<S> for UserId
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        let user_id = parts
            .headers
            .get(&auth_state.identity_header)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(UserId::new);

        match user_id {
            Some(user_id) => Ok(user_id),
            None => {
                tracing::warn!(
                    "request to {} is missing the identity header \"{}\"",
                    parts.uri,
                    auth_state.identity_header
                );
                Err(Error::Unauthenticated)
            }
        }
    }
}
