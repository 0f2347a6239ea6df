//! JWT validation.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use uuid::Uuid;

use sharebox_core::config::AuthConfig;
use sharebox_core::error::AppError;

use super::claims::{Claims, DownloadClaims, DOWNLOAD_PURPOSE};

/// Validates JWT access and download tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(map_jwt_error)?;
        Ok(token_data.claims)
    }

    /// Decodes a download token and checks that it was minted for the
    /// expected file and purpose. A valid signature is not enough: a
    /// token for file A must never release the bytes of file B.
    pub fn decode_download_token(
        &self,
        token: &str,
        expected_file_id: Uuid,
    ) -> Result<DownloadClaims, AppError> {
        let token_data = decode::<DownloadClaims>(token, &self.decoding_key, &self.validation)
            .map_err(map_jwt_error)?;
        let claims = token_data.claims;

        if claims.purpose != DOWNLOAD_PURPOSE {
            return Err(AppError::unauthorized("Invalid token purpose"));
        }
        if claims.file_id != expected_file_id {
            return Err(AppError::unauthorized("Token does not match this file"));
        }

        Ok(claims)
    }
}

fn map_jwt_error(e: jsonwebtoken::errors::Error) -> AppError {
    match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::unauthorized("Token has expired")
        }
        jsonwebtoken::errors::ErrorKind::InvalidToken => {
            AppError::unauthorized("Invalid token format")
        }
        jsonwebtoken::errors::ErrorKind::InvalidSignature => {
            AppError::unauthorized("Invalid token signature")
        }
        _ => AppError::unauthorized(format!("Token validation failed: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use sharebox_core::config::AuthConfig;
    use sharebox_entity::user::UserRole;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret-at-least-32-bytes-long!!".to_string(),
            token_ttl_hours: 1,
            sso: Default::default(),
        }
    }

    #[test]
    fn test_access_token_roundtrip() {
        let cfg = config();
        let encoder = JwtEncoder::new(&cfg);
        let decoder = JwtDecoder::new(&cfg);
        let user_id = Uuid::new_v4();

        let (token, _) = encoder
            .generate_access_token(user_id, UserRole::Admin, "a@corp.test")
            .unwrap();
        let claims = decoder.decode_access_token(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, UserRole::Admin);
        assert_eq!(claims.email, "a@corp.test");
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_download_token_scoped_to_file() {
        let cfg = config();
        let encoder = JwtEncoder::new(&cfg);
        let decoder = JwtDecoder::new(&cfg);
        let file_id = Uuid::new_v4();

        let token = encoder.generate_download_token(file_id).unwrap();
        assert!(decoder.decode_download_token(&token, file_id).is_ok());

        // The same token must not unlock a different file.
        let other = Uuid::new_v4();
        assert!(decoder.decode_download_token(&token, other).is_err());
    }

    #[test]
    fn test_access_token_rejected_as_download_token() {
        let cfg = config();
        let encoder = JwtEncoder::new(&cfg);
        let decoder = JwtDecoder::new(&cfg);
        let file_id = Uuid::new_v4();

        let (access, _) = encoder
            .generate_access_token(Uuid::new_v4(), UserRole::User, "a@corp.test")
            .unwrap();
        assert!(decoder.decode_download_token(&access, file_id).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let encoder = JwtEncoder::new(&config());
        let mut other = config();
        other.jwt_secret = "a-completely-different-secret-value!".to_string();
        let decoder = JwtDecoder::new(&other);

        let (token, _) = encoder
            .generate_access_token(Uuid::new_v4(), UserRole::User, "a@corp.test")
            .unwrap();
        assert!(decoder.decode_access_token(&token).is_err());
    }
}
