//! Bearer token generation and validation.
//!
//! Tokens are HMAC-signed JWTs whose only claim is `exp`. Verification
//! accepts any HMAC-family algorithm and checks expiry against an explicit
//! clock so callers (and tests) control "now".

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Configuration for token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in hours (default: 730).
    pub token_expiry_hours: i64,
}

/// Default token lifetime in hours (roughly one month).
pub const DEFAULT_TOKEN_EXPIRY_HOURS: i64 = 730;

/// Algorithms a presented token may declare.
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var            | Required | Default |
    /// |--------------------|----------|---------|
    /// | `JWT_SECRET`       | **yes**  | --      |
    /// | `JWT_EXPIRY_HOURS` | no       | `730`   |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let token_expiry_hours: i64 = std::env::var("JWT_EXPIRY_HOURS")
            .unwrap_or_else(|_| DEFAULT_TOKEN_EXPIRY_HOURS.to_string())
            .parse()
            .expect("JWT_EXPIRY_HOURS must be a valid i64");

        Self {
            secret,
            token_expiry_hours,
        }
    }

    pub fn token_lifetime(&self) -> TimeDelta {
        TimeDelta::hours(self.token_expiry_hours)
    }
}

/// Generate an HS256 token that expires one lifetime after `now`.
pub fn generate_token(
    config: &JwtConfig,
    now: DateTime<Utc>,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        exp: (now + config.token_lifetime()).timestamp(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate a token and return its [`Claims`].
///
/// The header's `alg` must be HS256, HS384 or HS512; anything else is
/// rejected before the signature is looked at. A token is still valid at
/// the exact second it expires.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
    now: DateTime<Utc>,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
    // Expiry is checked below against the caller's clock, without leeway.
    validation.validate_exp = false;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    if now.timestamp() > token_data.claims.exp {
        return Err(ErrorKind::ExpiredSignature.into());
    }
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    /// Helper to build a test config with a known secret.
    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            token_expiry_hours: DEFAULT_TOKEN_EXPIRY_HOURS,
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_704_900_000, 0).unwrap()
    }

    /// Sign `claims` with the test secret under an arbitrary header.
    fn sign_with_header(header_json: &str, claims: &Claims, algorithm: Algorithm) -> String {
        let header = URL_SAFE_NO_PAD.encode(header_json);
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims).unwrap());
        let message = format!("{header}.{payload}");
        let signature = jsonwebtoken::crypto::sign(
            message.as_bytes(),
            &EncodingKey::from_secret(test_config().secret.as_bytes()),
            algorithm,
        )
        .unwrap();
        format!("{message}.{signature}")
    }

    #[test]
    fn test_generate_and_validate_token() {
        let config = test_config();
        let token = generate_token(&config, now()).expect("token generation should succeed");

        let claims = validate_token(&token, &config, now()).expect("token should validate");
        assert_eq!(claims.exp, (now() + TimeDelta::hours(730)).timestamp());
    }

    #[test]
    fn test_token_valid_after_one_hour() {
        let config = test_config();
        let token = generate_token(&config, now()).unwrap();

        assert!(validate_token(&token, &config, now() + TimeDelta::hours(1)).is_ok());
    }

    #[test]
    fn test_token_valid_at_exact_expiry() {
        let config = test_config();
        let token = generate_token(&config, now()).unwrap();

        assert!(validate_token(&token, &config, now() + TimeDelta::hours(730)).is_ok());
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();
        let token = generate_token(&config, now()).unwrap();

        let result = validate_token(&token, &config, now() + TimeDelta::hours(731));
        assert_matches!(
            result.map_err(|e| e.into_kind()),
            Err(ErrorKind::ExpiredSignature)
        );
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = JwtConfig {
            secret: "secret-alpha".to_string(),
            token_expiry_hours: 730,
        };
        let config_b = JwtConfig {
            secret: "secret-bravo".to_string(),
            token_expiry_hours: 730,
        };

        let token = generate_token(&config_a, now()).unwrap();

        assert!(
            validate_token(&token, &config_b, now()).is_err(),
            "token signed with a different secret must fail"
        );
    }

    #[test]
    fn test_hs512_token_is_accepted() {
        let claims = Claims {
            exp: (now() + TimeDelta::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(test_config().secret.as_bytes()),
        )
        .unwrap();

        assert_eq!(validate_token(&token, &test_config(), now()).unwrap(), claims);
    }

    #[test]
    fn test_non_hmac_algorithm_is_rejected() {
        // HMAC-signed body, but the header claims RS256.
        let claims = Claims {
            exp: (now() + TimeDelta::hours(1)).timestamp(),
        };
        let token = sign_with_header(r#"{"alg":"RS256","typ":"JWT"}"#, &claims, Algorithm::HS256);

        let result = validate_token(&token, &test_config(), now());
        assert_matches!(
            result.map_err(|e| e.into_kind()),
            Err(ErrorKind::InvalidAlgorithm)
        );
    }

    #[test]
    fn test_unsigned_token_is_rejected() {
        let claims = Claims {
            exp: (now() + TimeDelta::hours(1)).timestamp(),
        };
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
        let token = format!("{header}.{payload}.");

        assert!(validate_token(&token, &test_config(), now()).is_err());
    }

    #[test]
    fn test_token_without_exp_is_rejected() {
        let token = encode(
            &Header::default(),
            &serde_json::json!({ "sub": "admin" }),
            &EncodingKey::from_secret(test_config().secret.as_bytes()),
        )
        .unwrap();

        assert!(validate_token(&token, &test_config(), now()).is_err());
    }
}
