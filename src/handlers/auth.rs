use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use log::warn;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::{config::Config, errors::ApiError};

/// Claims carried by tokens issued by the user service
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ObjectId as hex
    pub id: String,
    pub exp: usize,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("Invalid Authorization header format, expected 'Token <jwt>' or 'Bearer <jwt>'")]
    InvalidScheme,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        ApiError::Unauthorized(error.to_string())
    }
}

/// Extract the token from an Authorization header value
pub fn extract_token(header: Option<&str>) -> Result<&str, AuthError> {
    let value = header.ok_or(AuthError::MissingHeader)?;

    value
        .strip_prefix("Token ")
        .or_else(|| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::InvalidScheme)
}

/// Verify an HS256 token against `secret`
pub fn verify_token(token: &str, secret: &str, leeway_secs: u64) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = leeway_secs;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;

    Ok(data.claims)
}

/// Authenticated caller. Using it as a handler argument makes the route
/// require a valid token; the request is rejected before the handler runs.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let config = match req.app_data::<web::Data<Arc<Config>>>() {
            Some(config) => config,
            None => {
                warn!("Config not found in app data");
                return ready(Err(ApiError::InternalError));
            }
        };

        let header = req
            .headers()
            .get("Authorization")
            .and_then(|v| v.to_str().ok());

        let result = extract_token(header)
            .and_then(|token| {
                verify_token(token, &config.auth.jwt_secret, config.auth.leeway_secs)
            })
            .map(|claims| AuthUser {
                user_id: claims.id,
            })
            .map_err(|e| {
                warn!("Rejected request to {}: {}", req.path(), e);
                ApiError::from(e)
            });

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token_for(id: &str, secret: &str, exp: usize) -> String {
        let claims = Claims {
            id: id.to_string(),
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn in_one_hour() -> usize {
        (chrono::Utc::now().timestamp() + 3600) as usize
    }

    #[test]
    fn test_extract_token_schemes() {
        assert_eq!(extract_token(Some("Token abc")).unwrap(), "abc");
        assert_eq!(extract_token(Some("Bearer abc")).unwrap(), "abc");
    }

    #[test]
    fn test_extract_token_missing() {
        assert!(matches!(extract_token(None), Err(AuthError::MissingHeader)));
    }

    #[test]
    fn test_extract_token_bad_scheme() {
        assert!(matches!(
            extract_token(Some("Basic dXNlcjpwYXNz")),
            Err(AuthError::InvalidScheme)
        ));
        assert!(matches!(
            extract_token(Some("Bearer ")),
            Err(AuthError::InvalidScheme)
        ));
    }

    #[test]
    fn test_verify_token_valid() {
        let token = token_for("64b7f1e2a1b2c3d4e5f60718", "secret", in_one_hour());
        let claims = verify_token(&token, "secret", 0).unwrap();
        assert_eq!(claims.id, "64b7f1e2a1b2c3d4e5f60718");
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let token = token_for("64b7f1e2a1b2c3d4e5f60718", "secret", in_one_hour());
        assert!(matches!(
            verify_token(&token, "other", 0),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_verify_token_expired() {
        let expired = (chrono::Utc::now().timestamp() - 3600) as usize;
        let token = token_for("64b7f1e2a1b2c3d4e5f60718", "secret", expired);
        assert!(verify_token(&token, "secret", 60).is_err());
    }
}
