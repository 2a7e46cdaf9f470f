use std::collections::HashMap;

use jsonwebtoken::DecodingKey;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use super::AuthError;
use crate::config::JwksSource;

/// Key set document as published by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwks {
    pub keys: Vec<Jwk>,
}

/// Single published key. Only RSA signature keys are usable here; other
/// entries are ignored when the set is indexed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    pub kid: String,
    #[serde(default)]
    pub n: String,
    #[serde(default)]
    pub e: String,
    #[serde(rename = "use", default)]
    pub key_use: Option<String>,
    #[serde(default)]
    pub alg: Option<String>,
}

impl Jwks {
    fn signing_keys(&self) -> HashMap<String, Jwk> {
        self.keys
            .iter()
            .filter(|k| k.kty == "RSA")
            .filter(|k| k.key_use.as_deref().map_or(true, |u| u == "sig"))
            .map(|k| (k.kid.clone(), k.clone()))
            .collect()
    }
}

/// Cache of the provider's signing keys, fetched once at startup. An
/// unknown `kid` triggers exactly one refresh in case the provider rotated
/// keys; a second miss fails the request.
pub struct KeySet {
    source: JwksSource,
    http: reqwest::Client,
    keys: RwLock<HashMap<String, Jwk>>,
}

impl KeySet {
    /// Fetch and index the key set. Fails fast so a deployment with an
    /// unreachable key source never starts serving.
    pub async fn load(source: JwksSource) -> Result<Self, AuthError> {
        let http = reqwest::Client::new();
        let jwks = Self::fetch(&source, &http).await?;
        let keys = jwks.signing_keys();
        info!("Loaded {} signing key(s) from key set", keys.len());

        Ok(Self {
            source,
            http,
            keys: RwLock::new(keys),
        })
    }

    async fn fetch(source: &JwksSource, http: &reqwest::Client) -> Result<Jwks, AuthError> {
        match source {
            JwksSource::Url(url) => http
                .get(url)
                .send()
                .await
                .map_err(|e| AuthError::KeySet(e.to_string()))?
                .error_for_status()
                .map_err(|e| AuthError::KeySet(e.to_string()))?
                .json::<Jwks>()
                .await
                .map_err(|e| AuthError::KeySet(e.to_string())),
            JwksSource::File(path) => {
                let raw = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| AuthError::KeySet(format!("{}: {}", path, e)))?;
                serde_json::from_str(&raw).map_err(|e| AuthError::KeySet(e.to_string()))
            }
        }
    }

    /// Decoding key for `kid`, refreshing the cache once on a miss.
    pub async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        if let Some(jwk) = self.keys.read().await.get(kid) {
            return decoding_key_from(jwk);
        }

        // Possible key rotation: refresh once, then give up.
        let refreshed = Self::fetch(&self.source, &self.http).await?;
        let mut keys = self.keys.write().await;
        *keys = refreshed.signing_keys();
        info!("Refreshed key set after miss on kid {}", kid);

        match keys.get(kid) {
            Some(jwk) => decoding_key_from(jwk),
            None => Err(AuthError::UnknownKeyId(kid.to_string())),
        }
    }
}

fn decoding_key_from(jwk: &Jwk) -> Result<DecodingKey, AuthError> {
    DecodingKey::from_rsa_components(&jwk.n, &jwk.e)
        .map_err(|e| AuthError::KeySet(format!("unusable key {}: {}", jwk.kid, e)))
}
