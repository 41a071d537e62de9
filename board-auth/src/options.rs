// Authentication options and configuration.

use board_core::BoardConfigSnapshot;
use serde::{Deserialize, Serialize};

/// HMAC signing algorithms accepted for bearer tokens.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum JwtAlgorithm {
    /// HMAC using SHA-256
    #[default]
    HS256,
    /// HMAC using SHA-384
    HS384,
    /// HMAC using SHA-512
    HS512,
}

impl JwtAlgorithm {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HS256" => Some(Self::HS256),
            "HS384" => Some(Self::HS384),
            "HS512" => Some(Self::HS512),
            _ => None,
        }
    }
}

/// Bearer-token verification settings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct JwtOptions {
    /// Base64-encoded HMAC secret. Without one every token is rejected.
    pub secret: Option<String>,
    pub algorithm: JwtAlgorithm,
    /// Accepted schemes in the `Authorization` header.
    pub schemes: Vec<String>,
    /// Claim holding the principal id.
    pub entity_id_claim: String,
}

impl Default for JwtOptions {
    fn default() -> Self {
        Self {
            secret: None,
            algorithm: JwtAlgorithm::default(),
            schemes: vec!["Bearer".to_string(), "JWT".to_string()],
            entity_id_claim: "sub".to_string(),
        }
    }
}

impl JwtOptions {
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Read `auth.secret`, `auth.algorithm` and `auth.entityidclaim`.
    pub fn from_config(config: &BoardConfigSnapshot) -> Self {
        let mut options = Self {
            secret: config.get_string("auth.secret"),
            ..Self::default()
        };
        if let Some(alg) = config.get("auth.algorithm").and_then(JwtAlgorithm::parse) {
            options.algorithm = alg;
        }
        if let Some(claim) = config.get_string("auth.entityidclaim") {
            options.entity_id_claim = claim;
        }
        options
    }
}
