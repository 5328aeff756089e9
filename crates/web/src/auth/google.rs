use serde::Deserialize;
use storage::dto::common::normalize_email;
use thiserror::Error;

const TOKEN_INFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

#[derive(Debug, Error)]
pub enum GoogleAuthError {
    #[error("Google sign-in is not configured")]
    NotConfigured,

    #[error("Google rejected the token")]
    InvalidToken,

    #[error("Token was issued for another client")]
    AudienceMismatch,

    #[error("Google account email is not verified")]
    UnverifiedEmail,

    #[error("Token info request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Subset of the token-info response we rely on.
#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: String,
    sub: String,
    email: String,
    #[serde(default)]
    email_verified: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// A verified Google identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleIdentity {
    pub google_id: String,
    pub email: String,
    pub name: String,
}

/// Verifies Google ID tokens against the token-info endpoint.
#[derive(Clone)]
pub struct GoogleVerifier {
    client: reqwest::Client,
    client_id: Option<String>,
}

impl GoogleVerifier {
    pub fn new(client: reqwest::Client, client_id: Option<String>) -> Self {
        Self { client, client_id }
    }

    pub async fn verify(&self, id_token: &str) -> Result<GoogleIdentity, GoogleAuthError> {
        let client_id = self
            .client_id
            .as_deref()
            .ok_or(GoogleAuthError::NotConfigured)?;

        let response = self
            .client
            .get(TOKEN_INFO_URL)
            .query(&[("id_token", id_token)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GoogleAuthError::InvalidToken);
        }

        let info: TokenInfo = response.json().await?;
        identity_from(info, client_id)
    }
}

fn identity_from(info: TokenInfo, client_id: &str) -> Result<GoogleIdentity, GoogleAuthError> {
    if info.aud != client_id {
        return Err(GoogleAuthError::AudienceMismatch);
    }

    if info.email_verified.as_deref() != Some("true") {
        return Err(GoogleAuthError::UnverifiedEmail);
    }

    let name = info
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| info.email.split('@').next().unwrap_or_default().to_string());

    Ok(GoogleIdentity {
        google_id: info.sub,
        email: normalize_email(&info.email),
        name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(aud: &str, verified: Option<&str>, name: Option<&str>) -> TokenInfo {
        TokenInfo {
            aud: aud.into(),
            sub: "1234567890".into(),
            email: "sana@example.edu".into(),
            email_verified: verified.map(str::to_string),
            name: name.map(str::to_string),
        }
    }

    #[test]
    fn test_identity_from_valid_token() {
        let identity = identity_from(info("client-1", Some("true"), Some("Sana")), "client-1").unwrap();

        assert_eq!(identity.google_id, "1234567890");
        assert_eq!(identity.name, "Sana");
    }

    #[test]
    fn test_audience_must_match() {
        let err = identity_from(info("client-2", Some("true"), None), "client-1").unwrap_err();
        assert!(matches!(err, GoogleAuthError::AudienceMismatch));
    }

    #[test]
    fn test_email_must_be_verified() {
        let err = identity_from(info("client-1", Some("false"), None), "client-1").unwrap_err();
        assert!(matches!(err, GoogleAuthError::UnverifiedEmail));
    }

    #[test]
    fn test_name_falls_back_to_email_local_part() {
        let identity = identity_from(info("client-1", Some("true"), None), "client-1").unwrap();
        assert_eq!(identity.name, "sana");
    }

    #[tokio::test]
    async fn test_unconfigured_verifier_refuses() {
        let verifier = GoogleVerifier::new(reqwest::Client::new(), None);
        let err = verifier.verify("token").await.unwrap_err();
        assert!(matches!(err, GoogleAuthError::NotConfigured));
    }
}
