//! SQL API authentication.
//!
//! Key-pair authentication signs a short-lived RS256 JWT with the user's
//! private key. See:
//! <https://docs.snowflake.com/en/developer-guide/sql-api/authenticating>

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use rtbf_core::warehouse::{Result, WarehouseError};
use serde::Serialize;

use crate::config::{Credentials, WarehouseConfig};

const KEYPAIR_JWT: &str = "KEYPAIR_JWT";
const JWT_LIFETIME_MINUTES: i64 = 59;

/// Bearer token and the matching token-type header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorization {
    pub bearer: String,
    pub token_type: &'static str,
}

/// Claims of a key-pair JWT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeypairClaims {
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Builds the authorization for a request issued at `now`.
pub fn authorization(config: &WarehouseConfig, now: DateTime<Utc>) -> Result<Authorization> {
    match &config.credentials {
        Credentials::Token { token, token_type } => Ok(Authorization {
            bearer: token.clone(),
            token_type: token_type.header_value(),
        }),
        Credentials::KeyPair {
            private_key_pem,
            public_key_fingerprint,
        } => {
            let claims =
                keypair_claims(&config.account, &config.user, public_key_fingerprint, now);
            let key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes()).map_err(|e| {
                WarehouseError::Authentication(format!("Invalid private key: {}", e))
            })?;
            let bearer = encode(&Header::new(Algorithm::RS256), &claims, &key).map_err(|e| {
                WarehouseError::Authentication(format!("Failed to sign JWT: {}", e))
            })?;
            Ok(Authorization {
                bearer,
                token_type: KEYPAIR_JWT,
            })
        }
    }
}

/// Pure function: builds the key-pair JWT claims.
///
/// The account is upper-cased and stripped of any region suffix, so
/// `abc12345.us-east-1` becomes `ABC12345`.
pub fn keypair_claims(
    account: &str,
    user: &str,
    fingerprint: &str,
    now: DateTime<Utc>,
) -> KeypairClaims {
    let account = account
        .split('.')
        .next()
        .unwrap_or_default()
        .to_uppercase();
    let user = user.to_uppercase();
    let fingerprint = if fingerprint.starts_with("SHA256:") {
        fingerprint.to_string()
    } else {
        format!("SHA256:{}", fingerprint)
    };
    let qualified = format!("{}.{}", account, user);

    KeypairClaims {
        iss: format!("{}.{}", qualified, fingerprint),
        sub: qualified,
        iat: now.timestamp(),
        exp: (now + Duration::minutes(JWT_LIFETIME_MINUTES)).timestamp(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TokenType;
    use rtbf_core::warehouse::SessionContext;

    fn config(credentials: Credentials) -> WarehouseConfig {
        WarehouseConfig {
            account: "abc12345.us-east-1".to_string(),
            user: "gdpr_admin".to_string(),
            credentials,
            context: SessionContext::default(),
            host: None,
            timeout: std::time::Duration::from_secs(60),
        }
    }

    #[test]
    fn test_keypair_claims() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = keypair_claims("abc12345.us-east-1", "gdpr_admin", "AbC=", now);

        assert_eq!(claims.sub, "ABC12345.GDPR_ADMIN");
        assert_eq!(claims.iss, "ABC12345.GDPR_ADMIN.SHA256:AbC=");
        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp, 1_700_000_000 + 59 * 60);
    }

    #[test]
    fn test_keypair_claims_keep_existing_prefix() {
        let claims = keypair_claims("org-acct", "u", "SHA256:xyz", Utc::now());
        assert_eq!(claims.iss, "ORG-ACCT.U.SHA256:xyz");
    }

    #[test]
    fn test_token_authorization() {
        let auth = authorization(
            &config(Credentials::Token {
                token: "pat".to_string(),
                token_type: TokenType::ProgrammaticAccessToken,
            }),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(auth.bearer, "pat");
        assert_eq!(auth.token_type, "PROGRAMMATIC_ACCESS_TOKEN");
    }

    #[test]
    fn test_invalid_private_key_is_authentication_error() {
        let err = authorization(
            &config(Credentials::KeyPair {
                private_key_pem: "not a key".to_string(),
                public_key_fingerprint: "SHA256:abc".to_string(),
            }),
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, WarehouseError::Authentication(_)));
    }
}
