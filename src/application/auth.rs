//! Bearer token verification.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, errors::ErrorKind};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    Missing,
    #[error("bearer token expired")]
    Expired,
    #[error("bearer token rejected: {0}")]
    Invalid(String),
}

/// Claims issued by the login flow. `userId` is the historical claim name;
/// `sub` is accepted as well.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
    #[serde(alias = "sub")]
    user_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// The verified caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPrincipal {
    pub user_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl AuthPrincipal {
    /// Best available display name when the user is not in the store.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.user_id)
    }
}

pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// HS256 with a shared secret. `exp` is enforced when present but not required.
    pub fn new(secret: &str, leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_seconds;
        validation.required_spec_claims.clear();
        validation.validate_exp = true;

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<AuthPrincipal, AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::Missing);
        }

        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|err| {
            match err.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::Invalid(err.to_string()),
            }
        })?;

        let claims = data.claims;
        let user_id = claims.user_id.trim().to_string();
        if user_id.is_empty() {
            return Err(AuthError::Invalid("empty user id claim".to_string()));
        }

        Ok(AuthPrincipal {
            user_id,
            email: claims.email,
            name: claims.name,
        })
    }
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithms", &self.validation.algorithms)
            .field("leeway", &self.validation.leeway)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::{Value, json};
    use time::OffsetDateTime;

    use super::*;

    const SECRET: &str = "test-secret";

    fn token(claims: Value, secret: &str) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("token encodes")
    }

    fn verifier() -> TokenVerifier {
        TokenVerifier::new(SECRET, 0)
    }

    #[test]
    fn accepts_user_id_claim() {
        let principal = verifier()
            .verify(&token(
                json!({"userId": "2", "email": "lars@privatrengoring.dk"}),
                SECRET,
            ))
            .expect("valid token");
        assert_eq!(principal.user_id, "2");
        assert_eq!(principal.display_name(), "lars@privatrengoring.dk");
    }

    #[test]
    fn accepts_sub_as_user_id() {
        let principal = verifier()
            .verify(&token(json!({"sub": "3", "name": "Sofie"}), SECRET))
            .expect("valid token");
        assert_eq!(principal.user_id, "3");
        assert_eq!(principal.display_name(), "Sofie");
    }

    #[test]
    fn rejects_wrong_secret() {
        let result = verifier().verify(&token(json!({"userId": "1"}), "other-secret"));
        assert!(matches!(result, Err(AuthError::Invalid(_))));
    }

    #[test]
    fn rejects_expired_token() {
        let exp = OffsetDateTime::now_utc().unix_timestamp() - 3600;
        let result = verifier().verify(&token(json!({"userId": "1", "exp": exp}), SECRET));
        assert!(matches!(result, Err(AuthError::Expired)));
    }

    #[test]
    fn rejects_garbage_and_blank_tokens() {
        assert!(matches!(
            verifier().verify("not-a-jwt"),
            Err(AuthError::Invalid(_))
        ));
        assert!(matches!(verifier().verify("   "), Err(AuthError::Missing)));
    }

    #[test]
    fn rejects_blank_user_id() {
        let result = verifier().verify(&token(json!({"userId": " "}), SECRET));
        assert!(matches!(result, Err(AuthError::Invalid(_))));
    }
}
