//! Bearer token issuance and validation.
//!
//! Tokens are self-contained HS256 JWTs over a shared secret. Expiry is
//! checked with zero clock-skew leeway; issuer/audience checks stay disabled
//! because the service is single-tenant and single-audience.

use anyhow::{Context, Result};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::types::User;

use super::random_hex;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub(crate) struct Claims {
    // Subject: the username.
    pub(crate) sub: String,

    pub(crate) uid: String,
    pub(crate) jti: String,

    // Access and refresh tokens carry identical identity claims; only the
    // kind and expiry differ. The kind keeps them non-interchangeable.
    pub(crate) kind: TokenKind,

    pub(crate) iat: i64,
    pub(crate) exp: i64,
}

#[derive(Clone, Debug)]
pub(crate) struct TokenConfig {
    pub(crate) secret: String,
    pub(crate) access_ttl_secs: i64,
    pub(crate) refresh_ttl_secs: i64,
}

#[derive(Clone)]
pub(crate) struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl TokenService {
    pub(crate) fn new(config: TokenConfig) -> Result<Self> {
        if config.secret.is_empty() {
            anyhow::bail!("token signing secret cannot be empty");
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;

        Ok(TokenService {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            access_ttl_secs: config.access_ttl_secs,
            refresh_ttl_secs: config.refresh_ttl_secs,
        })
    }

    /// Issues a signed token for `user`, returning the token string and its
    /// validity window in seconds.
    pub(crate) fn issue(&self, user: &User, kind: TokenKind) -> Result<(String, i64)> {
        let ttl = match kind {
            TokenKind::Access => self.access_ttl_secs,
            TokenKind::Refresh => self.refresh_ttl_secs,
        };
        let now = time::OffsetDateTime::now_utc().unix_timestamp();

        let claims = Claims {
            sub: user.username.clone(),
            uid: user.id.clone(),
            jti: random_hex()?,
            kind,
            iat: now,
            exp: now + ttl,
        };

        let token = encode(&Header::default(), &claims, &self.encoding).context("sign token")?;
        Ok((token, ttl))
    }

    pub(crate) fn validate(&self, token: &str) -> Result<Claims> {
        let data =
            decode::<Claims>(token, &self.decoding, &self.validation).context("invalid token")?;
        Ok(data.claims)
    }
}
