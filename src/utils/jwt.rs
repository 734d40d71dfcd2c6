use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expires_in: i64,
}

impl JwtService {
    pub fn new(secret: &str, expires_in: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expires_in,
        }
    }

    pub fn generate_admin_token(&self) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expires_in);

        let claims = Claims {
            sub: ADMIN_ROLE.to_string(),
            role: ADMIN_ROLE.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(AppError::JwtError)
    }

    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(AppError::JwtError)
    }

    pub fn verify_admin_token(&self, token: &str) -> AppResult<Claims> {
        let claims = self.verify_token(token)?;

        if claims.role != ADMIN_ROLE {
            return Err(AppError::AuthError("Invalid token role".to_string()));
        }

        Ok(claims)
    }

    pub fn get_expires_in(&self) -> i64 {
        self.expires_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_token_round_trip() {
        let jwt = JwtService::new("secret", 60);
        let token = jwt.generate_admin_token().unwrap();
        let claims = jwt.verify_admin_token(&token).unwrap();
        assert_eq!(claims.role, ADMIN_ROLE);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let token = JwtService::new("secret-a", 60).generate_admin_token().unwrap();
        assert!(JwtService::new("secret-b", 60).verify_admin_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // 超出默认 60 秒的 leeway
        let jwt = JwtService::new("secret", -120);
        let token = jwt.generate_admin_token().unwrap();
        assert!(jwt.verify_admin_token(&token).is_err());
    }
}
