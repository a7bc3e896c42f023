//! The authentication gate.
//!
//! - [`jwt`] -- bearer token generation and validation.
//! - [`AuthGate`] -- admin login and request verification on top of it.
//!
//! There is exactly one account, configured through the environment. The
//! gate holds no per-session state: a token is valid purely by signature
//! and expiry.

pub mod jwt;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use self::jwt::{generate_token, validate_token, JwtConfig};

type HmacSha256 = Hmac<Sha256>;

/// The single administrator login.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl AdminCredentials {
    /// Load admin credentials from environment variables.
    ///
    /// | Env Var          | Required | Default |
    /// |------------------|----------|---------|
    /// | `ADMIN_USERNAME` | no       | `admin` |
    /// | `ADMIN_PASSWORD` | **yes**  | --      |
    ///
    /// # Panics
    ///
    /// Panics if `ADMIN_PASSWORD` is not set or is empty.
    pub fn from_env() -> Self {
        let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into());
        let password = std::env::var("ADMIN_PASSWORD")
            .expect("ADMIN_PASSWORD must be set in the environment");
        assert!(!password.is_empty(), "ADMIN_PASSWORD must not be empty");

        Self { username, password }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("unauthorized")]
    Unauthorized,

    #[error("token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Proof that a request carried a valid bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authorized {
    pub expires_at: DateTime<Utc>,
}

/// Issues tokens for the admin login and verifies them on every API call.
pub struct AuthGate {
    jwt: JwtConfig,
    admin_username: String,
    admin_password_mac: Vec<u8>,
}

impl AuthGate {
    pub fn new(jwt: JwtConfig, admin: &AdminCredentials) -> Self {
        let admin_password_mac = password_mac(&jwt.secret, &admin.password);
        Self {
            admin_username: admin.username.to_lowercase(),
            admin_password_mac,
            jwt,
        }
    }

    pub fn issue_token(&self) -> Result<String, AuthError> {
        self.issue_token_at(Utc::now())
    }

    pub fn issue_token_at(&self, now: DateTime<Utc>) -> Result<String, AuthError> {
        Ok(generate_token(&self.jwt, now)?)
    }

    /// Check a login attempt and issue a token on success.
    ///
    /// The username is compared case-insensitively. The password is
    /// compared exactly, in constant time, via HMAC digests keyed by the
    /// signing secret.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let username_ok = username.to_lowercase() == self.admin_username;
        let password_ok = self.password_matches(password);

        if !(username_ok & password_ok) {
            tracing::info!(username = %username, "Rejected login attempt");
            return Err(AuthError::InvalidCredentials);
        }
        self.issue_token()
    }

    /// Verify an `Authorization` header value.
    pub fn verify(&self, header: &str) -> Result<Authorized, AuthError> {
        self.verify_at(header, Utc::now())
    }

    /// Verify an `Authorization` header value against an explicit clock.
    ///
    /// Every failure collapses into [`AuthError::Unauthorized`].
    pub fn verify_at(&self, header: &str, now: DateTime<Utc>) -> Result<Authorized, AuthError> {
        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::Unauthorized)?;

        let claims = validate_token(token, &self.jwt, now).map_err(|e| {
            tracing::debug!(error = %e, "Bearer token rejected");
            AuthError::Unauthorized
        })?;

        let expires_at = DateTime::from_timestamp(claims.exp, 0).ok_or(AuthError::Unauthorized)?;
        Ok(Authorized { expires_at })
    }

    fn password_matches(&self, candidate: &str) -> bool {
        let Some(mut mac) = keyed_mac(&self.jwt.secret) else {
            return false;
        };
        mac.update(candidate.as_bytes());
        mac.verify_slice(&self.admin_password_mac).is_ok()
    }
}

fn keyed_mac(secret: &str) -> Option<HmacSha256> {
    HmacSha256::new_from_slice(secret.as_bytes()).ok()
}

/// An empty digest never verifies, so a key failure locks the login.
fn password_mac(secret: &str, password: &str) -> Vec<u8> {
    keyed_mac(secret)
        .map(|mut mac| {
            mac.update(password.as_bytes());
            mac.finalize().into_bytes().to_vec()
        })
        .unwrap_or_default()
}
