//! LiveKit access tokens
//!
//! Access tokens are HS256 JWTs signed with the project's API secret. The
//! `video` claim carries the room permissions, `iss` names the API key and
//! `sub` names the participant identity.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Default token lifetime, matching the hosted server SDK.
pub const DEFAULT_TTL_SECONDS: i64 = 6 * 60 * 60;

/// Room permissions embedded in the `video` claim
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VideoGrant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_join: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_publish: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_subscribe: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_publish_data: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_admin: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_create: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_list: Option<bool>,
}

impl VideoGrant {
    /// Grant to join `room` with publish and subscribe rights
    pub fn join(room: impl Into<String>) -> Self {
        Self {
            room_join: Some(true),
            room: Some(room.into()),
            can_publish: Some(true),
            can_subscribe: Some(true),
            ..Default::default()
        }
    }

    /// Overlay the fields set in `other` onto this grant
    fn merge(&mut self, other: VideoGrant) {
        macro_rules! overlay {
            ($($field:ident),*) => {
                $(if other.$field.is_some() { self.$field = other.$field; })*
            };
        }
        overlay!(
            room_join,
            room,
            can_publish,
            can_subscribe,
            can_publish_data,
            hidden,
            room_admin,
            room_create,
            room_list
        );
    }
}

/// Identity and lifetime of a token
#[derive(Debug, Clone)]
pub struct AccessTokenOptions {
    /// Participant identity, unique within a room
    pub identity: String,

    /// Display name
    pub name: Option<String>,

    /// Opaque participant metadata
    pub metadata: Option<String>,

    /// Lifetime from the moment of signing
    pub ttl: Duration,
}

impl AccessTokenOptions {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            name: None,
            metadata: None,
            ttl: Duration::seconds(DEFAULT_TTL_SECONDS),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// JWT claims of an access token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// API key that signed the token
    pub iss: String,

    /// Participant identity
    #[serde(default)]
    pub sub: String,

    #[serde(default)]
    pub jti: String,

    /// Not-before timestamp (Unix epoch)
    pub nbf: i64,

    /// Expiration timestamp (Unix epoch)
    pub exp: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,

    #[serde(default)]
    pub video: VideoGrant,
}

/// Builder for a signed access token
#[derive(Debug, Clone)]
pub struct AccessToken {
    api_key: String,
    api_secret: String,
    options: AccessTokenOptions,
    grant: VideoGrant,
}

impl AccessToken {
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        options: AccessTokenOptions,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            options,
            grant: VideoGrant::default(),
        }
    }

    /// Add room permissions. Fields already granted are overwritten only
    /// where `grant` sets them.
    pub fn with_grant(mut self, grant: VideoGrant) -> Self {
        self.grant.merge(grant);
        self
    }

    /// Claims this token would carry if signed now
    pub fn claims(&self) -> Result<Claims, TokenError> {
        if self.grant.room_join == Some(true) && self.options.identity.is_empty() {
            return Err(TokenError::MissingIdentity);
        }

        let now = Utc::now();
        let exp = now
            .checked_add_signed(self.options.ttl)
            .ok_or(TokenError::InvalidTtl)?;

        Ok(Claims {
            iss: self.api_key.clone(),
            sub: self.options.identity.clone(),
            jti: self.options.identity.clone(),
            nbf: now.timestamp(),
            exp: exp.timestamp(),
            name: self.options.name.clone(),
            metadata: self.options.metadata.clone(),
            video: self.grant.clone(),
        })
    }

    /// Sign the token as an HS256 JWT
    pub fn to_jwt(&self) -> Result<String, TokenError> {
        let claims = self.claims()?;
        let key = EncodingKey::from_secret(self.api_secret.as_bytes());

        encode(&Header::new(Algorithm::HS256), &claims, &key)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }
}

/// Decodes tokens signed by a given key pair
pub struct TokenVerifier {
    api_key: Option<String>,
    api_secret: String,
}

impl TokenVerifier {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            api_secret: api_secret.into(),
        }
    }

    /// Verifier that accepts any `iss`, for when only the secret is known
    pub fn any_issuer(api_secret: impl Into<String>) -> Self {
        Self {
            api_key: None,
            api_secret: api_secret.into(),
        }
    }

    /// Validate signature, issuer (when known) and validity window, then
    /// return the claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let key = DecodingKey::from_secret(self.api_secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_nbf = true;
        if let Some(api_key) = &self.api_key {
            validation.set_issuer(&[api_key.as_str()]);
        }

        let data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            jsonwebtoken::errors::ErrorKind::ImmatureSignature => TokenError::NotYetValid,
            jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            jsonwebtoken::errors::ErrorKind::InvalidIssuer => TokenError::InvalidIssuer,
            _ => TokenError::InvalidFormat(e.to_string()),
        })?;

        Ok(data.claims)
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TokenError {
    #[error("identity is required for join but not set")]
    MissingIdentity,

    #[error("Token lifetime out of range")]
    InvalidTtl,

    #[error("Token generation failed: {0}")]
    Generation(String),

    #[error("Token has expired")]
    Expired,

    #[error("Token is not valid yet")]
    NotYetValid,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token was issued by a different API key")]
    InvalidIssuer,

    #[error("Invalid token format: {0}")]
    InvalidFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "APItestkey";
    const SECRET: &str = "test-secret-key-for-unit-tests";

    fn join_token(identity: &str, room: &str) -> AccessToken {
        AccessToken::new(KEY, SECRET, AccessTokenOptions::new(identity))
            .with_grant(VideoGrant::join(room))
    }

    #[test]
    fn test_sign_and_verify() {
        let jwt = join_token("user-abc123", "playground-x").to_jwt().unwrap();
        let claims = TokenVerifier::new(KEY, SECRET).verify(&jwt).unwrap();

        assert_eq!(claims.iss, KEY);
        assert_eq!(claims.sub, "user-abc123");
        assert_eq!(claims.jti, "user-abc123");
        assert_eq!(claims.video, VideoGrant::join("playground-x"));
        assert_eq!(claims.exp - claims.nbf, DEFAULT_TTL_SECONDS);
    }

    #[test]
    fn test_grant_serializes_camel_case() {
        let value = serde_json::to_value(VideoGrant::join("lobby")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "roomJoin": true,
                "room": "lobby",
                "canPublish": true,
                "canSubscribe": true,
            })
        );
    }

    #[test]
    fn test_grants_merge() {
        let token = join_token("alice", "lobby").with_grant(VideoGrant {
            can_publish: Some(false),
            hidden: Some(true),
            ..Default::default()
        });
        let claims = token.claims().unwrap();

        assert_eq!(claims.video.room.as_deref(), Some("lobby"));
        assert_eq!(claims.video.can_publish, Some(false));
        assert_eq!(claims.video.can_subscribe, Some(true));
        assert_eq!(claims.video.hidden, Some(true));
    }

    #[test]
    fn test_join_requires_identity() {
        let result = join_token("", "lobby").to_jwt();
        assert_eq!(result.unwrap_err(), TokenError::MissingIdentity);
    }

    #[test]
    fn test_identity_optional_without_join() {
        let token = AccessToken::new(KEY, SECRET, AccessTokenOptions::new("")).with_grant(
            VideoGrant {
                room_list: Some(true),
                ..Default::default()
            },
        );
        assert!(token.to_jwt().is_ok());
    }

    #[test]
    fn test_optional_claims() {
        let options = AccessTokenOptions {
            name: Some("Bob".to_string()),
            metadata: Some(r#"{"role":"viewer"}"#.to_string()),
            ..AccessTokenOptions::new("bob").with_ttl(Duration::seconds(60))
        };
        let jwt = AccessToken::new(KEY, SECRET, options)
            .with_grant(VideoGrant::join("lobby"))
            .to_jwt()
            .unwrap();
        let claims = TokenVerifier::new(KEY, SECRET).verify(&jwt).unwrap();

        assert_eq!(claims.name.as_deref(), Some("Bob"));
        assert_eq!(claims.metadata.as_deref(), Some(r#"{"role":"viewer"}"#));
        assert_eq!(claims.exp - claims.nbf, 60);
    }

    #[test]
    fn test_verify_expired() {
        let jwt = AccessToken::new(
            KEY,
            SECRET,
            AccessTokenOptions::new("alice").with_ttl(Duration::seconds(-10)),
        )
        .with_grant(VideoGrant::join("lobby"))
        .to_jwt()
        .unwrap();

        let result = TokenVerifier::new(KEY, SECRET).verify(&jwt);
        assert_eq!(result.unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn test_verify_wrong_secret() {
        let jwt = join_token("alice", "lobby").to_jwt().unwrap();
        let result = TokenVerifier::new(KEY, "wrong-secret").verify(&jwt);
        assert_eq!(result.unwrap_err(), TokenError::InvalidSignature);
    }

    #[test]
    fn test_verify_wrong_issuer() {
        let jwt = join_token("alice", "lobby").to_jwt().unwrap();
        let result = TokenVerifier::new("APIother", SECRET).verify(&jwt);
        assert_eq!(result.unwrap_err(), TokenError::InvalidIssuer);
    }

    #[test]
    fn test_any_issuer_checks_secret_only() {
        let jwt = join_token("alice", "lobby").to_jwt().unwrap();

        let claims = TokenVerifier::any_issuer(SECRET).verify(&jwt).unwrap();
        assert_eq!(claims.iss, KEY);
        assert_eq!(claims.sub, "alice");

        let result = TokenVerifier::any_issuer("wrong-secret").verify(&jwt);
        assert_eq!(result.unwrap_err(), TokenError::InvalidSignature);
    }

    #[test]
    fn test_overflowing_ttl_rejected() {
        let token = AccessToken::new(
            KEY,
            SECRET,
            AccessTokenOptions::new("alice").with_ttl(Duration::seconds(10_000_000_000_000)),
        )
        .with_grant(VideoGrant::join("lobby"));
        assert_eq!(token.to_jwt().unwrap_err(), TokenError::InvalidTtl);
    }

    #[test]
    fn test_verify_garbage() {
        match TokenVerifier::new(KEY, SECRET).verify("not-a-valid-jwt") {
            Err(TokenError::InvalidFormat(_)) => {}
            other => panic!("Expected InvalidFormat, got {:?}", other),
        }
    }
}
