//! Session token codec
//!
//! Issues and parses the compact three-segment token (HS256) that is the
//! sole record of a session. Parsing verifies algorithm and signature only;
//! expiry is the session middleware's responsibility.

use std::collections::HashSet;
use std::fmt::Debug;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::domain::user::User;

/// Claims carried by a session token.
///
/// Exactly three fields travel on the wire: `userID`, `login`, `expire`
/// (unix seconds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(rename = "userID")]
    pub user_id: u64,
    pub login: String,
    pub expire: i64,
}

impl SessionClaims {
    /// Claims for a freshly authenticated user, expiring `lifetime_hours`
    /// from now.
    pub fn for_user(user: &User, lifetime_hours: u64) -> Self {
        let expires_at = Utc::now() + Duration::hours(lifetime_hours as i64);

        Self {
            user_id: user.id(),
            login: user.login().to_string(),
            expire: expires_at.timestamp(),
        }
    }

    /// Whether the expiry timestamp has passed. Not consulted by the codec.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.expire
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.expire, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Configuration for the token codec
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Symmetric signing secret, fixed for the process lifetime.
    pub secret: String,
    /// Session lifetime in hours.
    pub lifetime_hours: u64,
}

/// Signs and parses session tokens with a process-wide symmetric secret.
#[derive(Clone)]
pub struct TokenCodec {
    lifetime_hours: u64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("lifetime_hours", &self.lifetime_hours)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl TokenCodec {
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        // Pin the algorithm to HS256; a token declaring anything else
        // (including "none") fails verification. Expiry is checked by the
        // middleware, so parsing stays pure.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();

        Self {
            lifetime_hours: config.lifetime_hours,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    pub fn lifetime_hours(&self) -> u64 {
        self.lifetime_hours
    }

    /// Sign the claims into the compact three-segment wire form.
    pub fn issue(&self, claims: &SessionClaims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to sign session token: {}", e)))
    }

    /// Verify and decode a token.
    ///
    /// Every failure mode collapses into the single `InvalidToken` kind;
    /// callers learn nothing about which check failed.
    pub fn parse(&self, token: &str) -> Result<SessionClaims, DomainError> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| DomainError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

    fn codec_with_secret(secret: &str) -> TokenCodec {
        TokenCodec::new(TokenConfig {
            secret: secret.to_string(),
            lifetime_hours: 24,
        })
    }

    fn codec() -> TokenCodec {
        codec_with_secret("test-secret-key-12345")
    }

    fn future_claims() -> SessionClaims {
        SessionClaims {
            user_id: 42,
            login: "alice".to_string(),
            expire: (Utc::now() + Duration::hours(1)).timestamp(),
        }
    }

    #[test]
    fn test_round_trip() {
        let codec = codec();
        let claims = future_claims();

        let token = codec.issue(&claims).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let parsed = codec.parse(&token).unwrap();
        assert_eq!(parsed, claims);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = codec_with_secret("secret-1")
            .issue(&future_claims())
            .unwrap();

        let result = codec_with_secret("secret-2").parse(&token);
        assert!(matches!(result, Err(DomainError::InvalidToken)));
    }

    #[test]
    fn test_foreign_algorithm_rejected() {
        // Same secret, different HMAC flavor: the pinned algorithm wins.
        let codec = codec();
        let token = encode(
            &Header::new(Algorithm::HS384),
            &future_claims(),
            &EncodingKey::from_secret(b"test-secret-key-12345"),
        )
        .unwrap();

        assert!(matches!(
            codec.parse(&token),
            Err(DomainError::InvalidToken)
        ));
    }

    #[test]
    fn test_alg_none_rejected() {
        let codec = codec();
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let payload =
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&future_claims()).unwrap());

        let forged = format!("{}.{}.", header, payload);
        assert!(matches!(
            codec.parse(&forged),
            Err(DomainError::InvalidToken)
        ));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let codec = codec();
        let token = codec.issue(&future_claims()).unwrap();

        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        let mut payload = URL_SAFE_NO_PAD.decode(&parts[1]).unwrap();
        payload[0] ^= 0x01;
        parts[1] = URL_SAFE_NO_PAD.encode(&payload);

        let tampered = parts.join(".");
        assert!(matches!(
            codec.parse(&tampered),
            Err(DomainError::InvalidToken)
        ));
    }

    #[test]
    fn test_truncated_token_rejected() {
        let codec = codec();
        let token = codec.issue(&future_claims()).unwrap();

        let truncated = &token[..token.rfind('.').unwrap()];
        assert!(matches!(
            codec.parse(truncated),
            Err(DomainError::InvalidToken)
        ));
    }

    #[test]
    fn test_missing_claims_rejected() {
        let codec = codec();

        // Validly signed, but the payload lacks `login` and `expire`.
        let token = encode(
            &Header::new(Algorithm::HS256),
            &serde_json::json!({"userID": 1}),
            &EncodingKey::from_secret(b"test-secret-key-12345"),
        )
        .unwrap();

        assert!(matches!(
            codec.parse(&token),
            Err(DomainError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_still_parses() {
        let codec = codec();
        let claims = SessionClaims {
            user_id: 42,
            login: "alice".to_string(),
            expire: (Utc::now() - Duration::hours(1)).timestamp(),
        };

        // The codec stays pure: a validly signed expired token decodes, and
        // the expiry is reported through the claims.
        let token = codec.issue(&claims).unwrap();
        let parsed = codec.parse(&token).unwrap();

        assert_eq!(parsed, claims);
        assert!(parsed.is_expired());
    }

    #[test]
    fn test_claims_expiry_window() {
        let claims = future_claims();
        assert!(!claims.is_expired());
        assert!(claims.expires_at() > Utc::now());
    }
}
