//! Session guard for Visage Gateway.
//!
//! The hosted session service is consumed read-only: the gateway only
//! ever asks "who is the current user, or none". A session is an HS256
//! token carried in the `visage_session` cookie (or a bearer header for
//! non-browser clients); this module verifies it and exposes the result
//! as axum extractors.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use visage_core::UserId;

use crate::state::AppState;

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "visage_session";

/// Session token claims.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,   // Subject (user id)
    pub email: String, // Account email, immutable
    pub exp: usize,    // Expiration time
    pub iat: usize,    // Issued at
    pub iss: String,   // Issuer
    pub aud: String,   // Audience
}

/// Authentication error
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Missing session")]
    MissingSession,
}

/// Session token configuration
#[derive(Clone)]
pub struct SessionConfig {
    pub encoding_key: EncodingKey,
    pub decoding_key: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub expiry_seconds: u64,
}

impl SessionConfig {
    /// Create a new session config with a secret
    pub fn new(secret: &str, issuer: String, audience: String) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            audience,
            expiry_seconds: 3600, // 1 hour default
        }
    }

    /// Issue a session token for a user
    pub fn issue_token(&self, user: UserId, email: &str) -> Result<String, AuthError> {
        let now = chrono::Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: user.to_string(),
            email: email.to_string(),
            exp: now + self.expiry_seconds as usize,
            iat: now,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AuthError::InvalidToken)
    }

    /// Verify a session token
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                if e.kind() == &jsonwebtoken::errors::ErrorKind::ExpiredSignature {
                    AuthError::TokenExpired
                } else {
                    AuthError::InvalidToken
                }
            })
    }
}

/// The authenticated principal: the only session facts this codebase
/// ever reads.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: String,
}

fn authenticate(parts: &Parts, state: &AppState) -> Result<CurrentUser, AuthError> {
    let jar = CookieJar::from_headers(&parts.headers);
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .or_else(|| bearer_token(parts))
        .ok_or(AuthError::MissingSession)?;

    let claims = state.sessions.verify_token(&token)?;
    let id = UserId::parse(&claims.sub).map_err(|_| AuthError::InvalidToken)?;
    Ok(CurrentUser {
        id,
        email: claims.email,
    })
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

/// Rejection for action routes: 401 with the inline message the form
/// renders.
pub struct ApiAuthRejection;

impl IntoResponse for ApiAuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "Not authenticated" })),
        )
            .into_response()
    }
}

#[async_trait::async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiAuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state).map_err(|err| {
            tracing::debug!("rejected action request: {err}");
            ApiAuthRejection
        })
    }
}

/// Page-route guard: an anonymous visitor is redirected to the login
/// entry point. The originally requested path is not preserved.
pub struct SessionUser(pub CurrentUser);

#[async_trait::async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match authenticate(parts, state) {
            Ok(user) => Ok(Self(user)),
            Err(err) => {
                tracing::debug!("redirecting anonymous visitor to /login: {err}");
                Err(Redirect::to("/login"))
            }
        }
    }
}
