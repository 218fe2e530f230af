//! Google ID-token verification.
//!
//! Login handlers depend on the [`IdentityVerifier`] trait; production wires
//! in [`GoogleVerifier`], tests inject a fake.

use async_trait::async_trait;
use cityguide_core::error::CoreError;
use serde::Deserialize;

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Issuers Google signs ID tokens with.
const GOOGLE_ISSUERS: &[&str] = &["accounts.google.com", "https://accounts.google.com"];

/// Identity asserted by a verified third-party token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub email: String,
    pub name: String,
}

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify `id_token` and return who it identifies.
    ///
    /// An invalid token is [`CoreError::Unauthorized`]; failing to reach the
    /// issuer is [`CoreError::Internal`].
    async fn verify(&self, id_token: &str) -> Result<VerifiedIdentity, CoreError>;
}

/// Subset of Google's `tokeninfo` response that login relies on.
#[derive(Debug, Deserialize)]
pub struct TokenInfo {
    pub aud: String,
    pub iss: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

/// Check audience and issuer, then extract the identity.
pub fn check_token_info(info: TokenInfo, client_id: &str) -> Result<VerifiedIdentity, CoreError> {
    let invalid = || CoreError::Unauthorized("Invalid token".into());

    if client_id.is_empty() || info.aud != client_id {
        return Err(invalid());
    }
    if !GOOGLE_ISSUERS.contains(&info.iss.as_str()) {
        return Err(invalid());
    }
    let email = info.email.filter(|e| !e.is_empty()).ok_or_else(invalid)?;
    let name = info
        .name
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());

    Ok(VerifiedIdentity { email, name })
}

/// Verifies tokens against Google's `tokeninfo` endpoint.
pub struct GoogleVerifier {
    client: reqwest::Client,
    client_id: String,
}

impl GoogleVerifier {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            client_id: client_id.into(),
        }
    }
}

#[async_trait]
impl IdentityVerifier for GoogleVerifier {
    async fn verify(&self, id_token: &str) -> Result<VerifiedIdentity, CoreError> {
        if self.client_id.is_empty() {
            return Err(CoreError::Unauthorized("Google login is not configured".into()));
        }

        let response = self
            .client
            .get(TOKENINFO_URL)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| CoreError::Internal(format!("Token verification request failed: {e}")))?;

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "Google rejected ID token");
            return Err(CoreError::Unauthorized("Invalid token".into()));
        }

        let info: TokenInfo = response
            .json()
            .await
            .map_err(|e| CoreError::Internal(format!("Unreadable tokeninfo response: {e}")))?;

        check_token_info(info, &self.client_id)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn info(aud: &str, iss: &str) -> TokenInfo {
        TokenInfo {
            aud: aud.into(),
            iss: iss.into(),
            email: Some("ana@gmail.com".into()),
            name: Some("Ana".into()),
        }
    }

    #[test]
    fn accepts_both_issuer_forms() {
        for iss in GOOGLE_ISSUERS {
            let identity = check_token_info(info("client", iss), "client").unwrap();
            assert_eq!(identity.email, "ana@gmail.com");
            assert_eq!(identity.name, "Ana");
        }
    }

    #[test]
    fn rejects_wrong_audience_or_issuer() {
        assert_matches!(
            check_token_info(info("other", "accounts.google.com"), "client"),
            Err(CoreError::Unauthorized(_))
        );
        assert_matches!(
            check_token_info(info("client", "evil.example.com"), "client"),
            Err(CoreError::Unauthorized(_))
        );
    }

    #[test]
    fn rejects_when_unconfigured() {
        assert!(check_token_info(info("", "accounts.google.com"), "").is_err());
    }

    #[test]
    fn name_falls_back_to_email_local_part() {
        let mut token = info("client", "accounts.google.com");
        token.name = None;
        assert_eq!(check_token_info(token, "client").unwrap().name, "ana");
    }

    #[test]
    fn email_is_required() {
        let mut token = info("client", "accounts.google.com");
        token.email = None;
        assert!(check_token_info(token, "client").is_err());
    }
}
