// Bearer-token verification.
//
// Turns an `Authorization` header into a verified principal id. Tokens are
// optional: a request without one is simply anonymous. Issuing tokens is the
// job of whoever owns the login flow.

use anyhow::Result;
use board_core::bail_board;
use board_core::errors::BoardError;
use serde_json::Value;

use crate::options::JwtOptions;

#[cfg(any(feature = "jwt-aws-lc-rs", feature = "jwt-rust-crypto"))]
use crate::options::JwtAlgorithm;

pub struct JwtVerifier {
    options: JwtOptions,
}

impl JwtVerifier {
    pub fn new(options: JwtOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &JwtOptions {
        &self.options
    }

    /// Extract the token from an `Authorization` header value.
    ///
    /// Accepts `<scheme> <token>` for the configured schemes, or a bare token.
    pub fn parse_header(&self, header: &str) -> Option<String> {
        let hv = header.trim();
        if hv.is_empty() {
            return None;
        }

        if let Some((scheme, token)) = hv.split_once(' ') {
            let scheme = scheme.trim();
            let token = token.trim();
            if token.is_empty() {
                return None;
            }

            let allowed = self
                .options
                .schemes
                .iter()
                .any(|s| s.eq_ignore_ascii_case(scheme));
            return allowed.then(|| token.to_string());
        }

        Some(hv.to_string())
    }

    /// Principal id carried by an optional `Authorization` header.
    ///
    /// No header (or an empty one) is `Ok(None)`. A header that is present but
    /// does not hold a valid token is a `NotAuthenticated` error.
    pub fn principal_from_header(&self, header: Option<&str>) -> Result<Option<String>> {
        let Some(header) = header.filter(|h| !h.trim().is_empty()) else {
            return Ok(None);
        };

        let Some(token) = self.parse_header(header) else {
            bail_board!(not_authenticated, "Unsupported authorization scheme");
        };

        self.verify(&token).map(Some)
    }

    /// Verify `token` and return the principal id claim.
    pub fn verify(&self, token: &str) -> Result<String> {
        let claims = self.decode_claims(token)?;

        claims
            .get(&self.options.entity_id_claim)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                BoardError::not_authenticated("Could not resolve entity id from token")
                    .into_anyhow()
            })
    }

    #[cfg(any(feature = "jwt-aws-lc-rs", feature = "jwt-rust-crypto"))]
    fn decode_claims(&self, token: &str) -> Result<Value> {
        use jsonwebtoken::{decode, DecodingKey, Validation};

        let secret = self.options.secret.as_ref().ok_or_else(|| {
            BoardError::not_authenticated("JWT secret is not configured").into_anyhow()
        })?;

        let key = DecodingKey::from_base64_secret(secret).map_err(|e| {
            BoardError::general_error(format!("Invalid JWT secret: {e}")).into_anyhow()
        })?;

        let mut validation = Validation::new(algorithm(&self.options.algorithm));
        validation.set_required_spec_claims(&[self.options.entity_id_claim.as_str()]);

        let decoded = decode::<Value>(token, &key, &validation)
            .map_err(|e| BoardError::not_authenticated(e.to_string()).into_anyhow())?;

        Ok(decoded.claims)
    }

    #[cfg(not(any(feature = "jwt-aws-lc-rs", feature = "jwt-rust-crypto")))]
    fn decode_claims(&self, _token: &str) -> Result<Value> {
        Err(BoardError::not_authenticated(
            "JWT support is disabled (enable one of: jwt-aws-lc-rs, jwt-rust-crypto)",
        )
        .into_anyhow())
    }
}

#[cfg(any(feature = "jwt-aws-lc-rs", feature = "jwt-rust-crypto"))]
fn algorithm(alg: &JwtAlgorithm) -> jsonwebtoken::Algorithm {
    match alg {
        JwtAlgorithm::HS256 => jsonwebtoken::Algorithm::HS256,
        JwtAlgorithm::HS384 => jsonwebtoken::Algorithm::HS384,
        JwtAlgorithm::HS512 => jsonwebtoken::Algorithm::HS512,
    }
}
