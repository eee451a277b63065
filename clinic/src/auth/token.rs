use crate::error::{ClinicError, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use shared::{Config, TokenSigning};
use tracing::debug;

/// Lifetime of an access token.
pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 15;

pub const INVALID_TOKEN_MESSAGE: &str = "invalid access token";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub email: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(email: &str, issuer: &str, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            email: email.to_string(),
            iss: issuer.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }
}

/// Issues and verifies signed bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl: Duration,
}

impl TokenService {
    /// HS256 with a shared secret.
    pub fn with_secret(secret: &[u8], issuer: impl Into<String>) -> Self {
        Self {
            algorithm: Algorithm::HS256,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
            ttl: Duration::minutes(ACCESS_TOKEN_TTL_MINUTES),
        }
    }

    /// RS256 with PEM encoded keys.
    pub fn with_rsa_pem(
        private_pem: &[u8],
        public_pem: &[u8],
        issuer: impl Into<String>,
    ) -> Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(private_pem)
            .map_err(|e| ClinicError::Token(format!("invalid private key: {}", e)))?;
        let decoding_key = DecodingKey::from_rsa_pem(public_pem)
            .map_err(|e| ClinicError::Token(format!("invalid public key: {}", e)))?;

        Ok(Self {
            algorithm: Algorithm::RS256,
            encoding_key,
            decoding_key,
            issuer: issuer.into(),
            ttl: Duration::minutes(ACCESS_TOKEN_TTL_MINUTES),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        match &config.token_signing {
            TokenSigning::Secret(secret) => {
                Ok(Self::with_secret(secret.as_bytes(), &config.token_issuer))
            }
            TokenSigning::RsaPem {
                private_key_path,
                public_key_path,
            } => {
                let private_pem = read_key(private_key_path)?;
                let public_pem = read_key(public_key_path)?;
                Self::with_rsa_pem(&private_pem, &public_pem, &config.token_issuer)
            }
        }
    }

    /// Issue a token carrying `email` that expires after the configured lifetime.
    pub fn issue(&self, email: &str) -> Result<String> {
        let claims = Claims::new(email, &self.issuer, Utc::now(), self.ttl);
        self.sign(&claims)
    }

    pub fn sign(&self, claims: &Claims) -> Result<String> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(|e| ClinicError::Token(e.to_string()))
    }

    /// Check signature, issuer and expiry, returning the email claim.
    pub fn verify(&self, token: &str) -> Result<String> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss"]);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims.email)
            .map_err(|e| {
                debug!("Rejected access token: {}", e);
                ClinicError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string())
            })
    }
}

fn read_key(path: &str) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| ClinicError::Token(format!("cannot read {}: {}", path, e)))
}
