use axum::http::HeaderMap;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};

use super::{keys::KeySet, AuthError, Claims};
use crate::config::AuthConfig;

/// Extract the raw token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = headers
        .get("authorization")
        .ok_or(AuthError::MissingHeader)?;
    let value = header.to_str().map_err(|_| AuthError::MalformedHeader)?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MalformedHeader)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::MalformedHeader);
    }
    Ok(token)
}

/// Validates bearer tokens against the provider's published key set.
/// Stateless per request; verified tokens are never cached.
pub struct TokenVerifier {
    keys: KeySet,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig, keys: KeySet) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);

        Self { keys, validation }
    }

    /// Full verification pass: well-formed token, known signing key, valid
    /// signature, not expired, issuer and audience as configured.
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header =
            decode_header(token).map_err(|e| AuthError::MalformedToken(e.to_string()))?;
        let kid = header
            .kid
            .ok_or_else(|| AuthError::MalformedToken("missing key id".to_string()))?;

        let key = self.keys.decoding_key(&kid).await?;
        let data = decode::<Claims>(token, &key, &self.validation).map_err(classify)?;
        Ok(data.claims)
    }
}

fn classify(err: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        ErrorKind::InvalidIssuer => AuthError::ClaimMismatch("issuer mismatch".to_string()),
        ErrorKind::InvalidAudience => AuthError::ClaimMismatch("audience mismatch".to_string()),
        ErrorKind::MissingRequiredClaim(claim) => {
            AuthError::ClaimMismatch(format!("missing claim '{}'", claim))
        }
        _ => AuthError::MalformedToken(err.to_string()),
    }
}
