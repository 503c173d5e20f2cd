//! JWT Identity Extractor
//!
//! Verifies HMAC-signed JWTs against a pre-shared secret and extracts the
//! `sub` claim.

use chrono::{TimeZone, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

use crate::bridge::IdentityExtractor;
use crate::error::{BridgeError, Result};
use crate::types::VerifiedIdentity;

/// Algorithms accepted with a shared secret
const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Configuration for the JWT extractor
#[derive(Clone)]
pub struct JwtExtractorConfig {
    /// Pre-shared HMAC secret
    pub secret: String,

    /// Expected audience (aud claim), if any
    pub audience: Option<String>,

    /// Expected issuer (iss claim), if any
    pub issuer: Option<String>,

    /// Clock skew tolerated on exp/nbf, in seconds
    pub leeway_secs: u64,
}

impl fmt::Debug for JwtExtractorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtExtractorConfig")
            .field("secret", &"[redacted]")
            .field("audience", &self.audience)
            .field("issuer", &self.issuer)
            .field("leeway_secs", &self.leeway_secs)
            .finish()
    }
}

impl JwtExtractorConfig {
    /// Create a configuration for a shared secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            audience: None,
            issuer: None,
            leeway_secs: 0,
        }
    }

    /// Set the expected audience
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Set the expected issuer
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Set the clock skew leeway
    pub fn with_leeway_secs(mut self, leeway_secs: u64) -> Self {
        self.leeway_secs = leeway_secs;
        self
    }
}

/// JWT claims we care about
#[derive(Debug, Deserialize)]
struct JwtClaims {
    /// Subject
    sub: Option<String>,
    /// Issuer
    iss: Option<String>,
    /// Expiration
    exp: Option<i64>,
}

/// JWT identity extractor
pub struct JwtExtractor {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtExtractor {
    /// Create a new JWT extractor
    pub fn new(config: JwtExtractorConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        // Tokens in circulation carry only sub/name/iat, so nothing is mandatory
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = config.leeway_secs;

        // A configured claim must also be present, not just correct when present
        match config.audience {
            Some(ref aud) => {
                validation.set_audience(&[aud]);
                validation.required_spec_claims.insert("aud".to_string());
            }
            None => validation.validate_aud = false,
        }
        if let Some(ref iss) = config.issuer {
            validation.set_issuer(&[iss]);
            validation.required_spec_claims.insert("iss".to_string());
        }

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    /// Create an extractor that only checks the shared secret
    pub fn from_secret(secret: impl Into<String>) -> Self {
        Self::new(JwtExtractorConfig::new(secret))
    }
}

impl fmt::Debug for JwtExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtExtractor")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}

impl IdentityExtractor for JwtExtractor {
    fn description(&self) -> &str {
        "HMAC JWT extractor"
    }

    fn extract(&self, credential: &str) -> Result<VerifiedIdentity> {
        let token_data = decode::<JwtClaims>(credential, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(error = %e, "JWT rejected");
                BridgeError::from(e)
            })?;
        let claims = token_data.claims;

        let subject = claims
            .sub
            .filter(|sub| !sub.is_empty())
            .ok_or(BridgeError::MissingIdentityClaim)?;

        let mut identity = VerifiedIdentity::new(subject);
        if let Some(iss) = claims.iss {
            identity = identity.with_issuer(iss);
        }
        if let Some(exp_time) = claims.exp.and_then(|exp| Utc.timestamp_opt(exp, 0).single()) {
            identity = identity.with_expires_at(exp_time);
        }

        debug!(
            subject = %identity.subject,
            alg = ?token_data.header.alg,
            "JWT verified"
        );

        Ok(identity)
    }
}
