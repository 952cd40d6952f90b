//! Authentication service for user registration, login, and token management

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{LoginRequest, RegisterUser, Role, User, UserCredentials};

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    jwt_secret: String,
    token_expiry: i64,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub username: String,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

/// Successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Successful registration
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: User,
}

/// Sign an HS256 token for `user` valid for `expiry_secs`
pub fn encode_token(user: &User, secret: &str, expiry_secs: i64) -> AppResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        role: user.role,
        exp: (now + Duration::seconds(expiry_secs)).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

/// Verify signature and expiry, returning the claims
pub fn decode_token(token: &str, secret: &str) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
}

/// Hash a password with bcrypt at the default cost
pub fn hash_password(password: &str) -> AppResult<String> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            jwt_secret: config.jwt.secret.clone(),
            token_expiry: config.jwt.token_expiry,
        }
    }

    /// Register a new account with the `user` role
    pub async fn register(&self, input: RegisterUser) -> AppResult<RegisterResponse> {
        input.validate()?;

        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 OR email = $2)",
        )
        .bind(&input.username)
        .bind(&input.email)
        .fetch_one(&self.db)
        .await?;

        if taken {
            return Err(AppError::conflict(
                "username",
                "Username or email already exists",
            ));
        }

        let password_hash = hash_password(&input.password)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, role, created_at
            "#,
        )
        .bind(&input.username)
        .bind(&input.email)
        .bind(&password_hash)
        .bind(Role::User)
        .fetch_one(&self.db)
        .await
        .map_err(AppError::on_unique_violation(
            "username",
            "Username or email already exists",
        ))?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(RegisterResponse {
            message: "User registered successfully".to_string(),
            user,
        })
    }

    /// Authenticate with username and password
    pub async fn login(&self, input: LoginRequest) -> AppResult<LoginResponse> {
        input.validate()?;

        let credentials = sqlx::query_as::<_, UserCredentials>(
            r#"
            SELECT id, username, email, role, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(&input.username)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        let valid = verify(&input.password, &credentials.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

        if !valid {
            tracing::debug!(username = %input.username, "Login rejected");
            return Err(AppError::InvalidCredentials);
        }

        let user = credentials.into_user();
        let token = encode_token(&user, &self.jwt_secret, self.token_expiry)?;

        Ok(LoginResponse { token, user })
    }

    /// Current account of an authenticated session
    pub async fn me(&self, user_id: Uuid) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, role, created_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            username: "vendedor1".to_string(),
            email: "vendedor1@stocky.local".to_string(),
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_token_round_trip() {
        let user = sample_user(Role::Admin);
        let token = encode_token(&user, "test-secret", 7200).unwrap();
        let claims = decode_token(&token, "test-secret").unwrap();

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.username, "vendedor1");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.exp - claims.iat, 7200);
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let token = encode_token(&sample_user(Role::User), "test-secret", 7200).unwrap();
        let err = decode_token(&token, "other-secret").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_expired_token_rejected() {
        // Past the default 60s leeway
        let token = encode_token(&sample_user(Role::User), "test-secret", -120).unwrap();
        assert!(decode_token(&token, "test-secret").is_err());
    }
}
