//! Display-only decoding of bearer token payloads.
//!
//! The signature is never checked. Anything derived here is cosmetic.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::model::UserProfile;

/// Claims we know how to show. Unknown claims are ignored.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<Value>,
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// Expiry as a timestamp, when the token carries one.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }

    fn subject(&self) -> Option<String> {
        self.sub
            .as_ref()
            .or(self.user_id.as_ref())
            .and_then(|value| match value {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }
}

/// Decodes the payload segment of a JWT-shaped token.
///
/// Returns `None` for anything malformed; never panics.
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let mut segments = token.split('.');
    let (_header, payload) = (segments.next()?, segments.next()?);
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Builds a display profile from a token, if its payload names a subject.
pub fn profile_from_token(token: &str) -> Option<UserProfile> {
    let claims = decode_claims(token)?;
    let id = claims.subject()?;
    Some(UserProfile {
        id,
        email: claims.email,
        name: claims.name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with(payload: &str) -> String {
        format!("eyJhbGciOiJIUzI1NiJ9.{}.sig", URL_SAFE_NO_PAD.encode(payload))
    }

    #[test]
    fn test_profile_from_valid_payload() {
        let token = token_with(r#"{"sub":"42","email":"hana@example.com","name":"Hana","exp":1893456000}"#);
        let profile = profile_from_token(&token).unwrap();
        assert_eq!(profile.id, "42");
        assert_eq!(profile.email.as_deref(), Some("hana@example.com"));
        assert_eq!(profile.name.as_deref(), Some("Hana"));

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.expires_at().unwrap().timestamp(), 1893456000);
    }

    #[test]
    fn test_numeric_user_id_claim() {
        let token = token_with(r#"{"user_id":17}"#);
        assert_eq!(profile_from_token(&token).unwrap().id, "17");
    }

    #[test]
    fn test_malformed_tokens_yield_none() {
        assert!(profile_from_token("opaque-token").is_none());
        assert!(profile_from_token("a.!!!not-base64!!!.c").is_none());
        assert!(profile_from_token(&token_with("not json")).is_none());
        assert!(profile_from_token(&token_with(r#"{"email":"x@y.z"}"#)).is_none());
    }
}
