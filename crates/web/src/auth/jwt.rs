use chrono::{Duration, NaiveDateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use storage::models::Account;
use uuid::Uuid;

/// JWT Claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub sub: Uuid,
    pub email: String,
    pub role: String,
    /// Token id, the key used for revocation
    pub jti: Uuid,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Expiry as a UTC timestamp, used as the lifetime of a revocation entry.
    pub fn expires_at(&self) -> NaiveDateTime {
        chrono::DateTime::from_timestamp(self.exp, 0)
            .unwrap_or_else(Utc::now)
            .naive_utc()
    }
}

/// Signing and verification keys for HS256 session tokens.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtKeys {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Sign a new token for an account.
    pub fn sign(&self, account: &Account) -> jsonwebtoken::errors::Result<String> {
        let now = Utc::now();

        let claims = Claims {
            sub: account.account_id,
            email: account.email.clone(),
            role: account.role.clone(),
            jti: Uuid::new_v4(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Verify signature and expiry and decode the claims.
    pub fn verify(&self, token: &str) -> jsonwebtoken::errors::Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(role: &str) -> Account {
        let now = Utc::now().naive_utc();
        Account {
            account_id: Uuid::new_v4(),
            name: "Hamza".into(),
            email: "hamza@example.edu".into(),
            password_hash: None,
            role: role.into(),
            is_participant: false,
            cnic: None,
            google_id: None,
            position: None,
            subpost: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_sign_and_verify() {
        let keys = JwtKeys::new("test-secret", 24);
        let account = account("admin");

        let token = keys.sign(&account).unwrap();
        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.sub, account.account_id);
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.email, "hamza@example.edu");
        assert!(claims.expires_at() > Utc::now().naive_utc());
    }

    #[test]
    fn test_each_token_has_its_own_id() {
        let keys = JwtKeys::new("test-secret", 24);
        let account = account("user");

        let first = keys.verify(&keys.sign(&account).unwrap()).unwrap();
        let second = keys.verify(&keys.sign(&account).unwrap()).unwrap();

        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let keys = JwtKeys::new("test-secret", -2);
        let token = keys.sign(&account("user")).unwrap();

        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = JwtKeys::new("one", 24).sign(&account("user")).unwrap();

        assert!(JwtKeys::new("two", 24).verify(&token).is_err());
    }
}
