//! Authentication tests
//!
//! Token issuance and verification, password hashing and the role model.

use chrono::Utc;
use proptest::prelude::*;
use shared::{LoginRequest, RegisterUser, Role, User};
use sqlx::PgPool;
use stocky_backend::config::{
    AdminConfig, Config, DatabaseConfig, JwtConfig, MovementsConfig, ServerConfig,
};
use stocky_backend::error::AppError;
use stocky_backend::services::auth::{decode_token, encode_token, hash_password, AuthService};
use uuid::Uuid;
use validator::Validate;

const SECRET: &str = "test-secret";

fn user(username: &str, role: Role) -> User {
    User {
        id: Uuid::new_v4(),
        username: username.to_string(),
        email: format!("{}@stocky.local", username),
        role,
        created_at: Utc::now(),
    }
}

fn config() -> Config {
    Config {
        environment: "test".to_string(),
        server: ServerConfig::default(),
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 1,
            min_connections: 0,
            run_migrations: false,
            seed_sample_data: false,
        },
        jwt: JwtConfig {
            secret: SECRET.to_string(),
            token_expiry: 7200,
        },
        movements: MovementsConfig::default(),
        admin: AdminConfig {
            username: "admin".to_string(),
            email: "admin@stocky.local".to_string(),
            password: None,
        },
    }
}

fn registration(username: &str) -> RegisterUser {
    RegisterUser {
        username: username.to_string(),
        email: format!("{}@stocky.local", username),
        password: "secret123".to_string(),
    }
}

fn login(username: &str, password: &str) -> LoginRequest {
    LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    }
}

// ============================================================================
// Property Test Strategies
// ============================================================================

fn username_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9._-]{2,20}"
}

fn role_strategy() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Admin), Just(Role::User)]
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    /// A token decodes to the username and role it was issued for
    #[test]
    fn prop_token_carries_identity(
        username in username_strategy(),
        role in role_strategy(),
    ) {
        let account = user(&username, role);
        let token = encode_token(&account, SECRET, 7200).unwrap();
        let claims = decode_token(&token, SECRET).unwrap();

        prop_assert_eq!(claims.sub, account.id.to_string());
        prop_assert_eq!(claims.username, username);
        prop_assert_eq!(claims.role, role);
    }

    /// Registration input with a short password never validates
    #[test]
    fn prop_short_password_rejected(
        username in username_strategy(),
        password in "[a-zA-Z0-9]{0,5}",
    ) {
        let input = RegisterUser {
            username,
            email: "nuevo@stocky.local".to_string(),
            password,
        };
        prop_assert!(input.validate().is_err());
    }
}

// ============================================================================
// Unit Tests: Tokens
// ============================================================================

#[cfg(test)]
mod token_tests {
    use super::*;

    #[test]
    fn test_tampered_token_rejected() {
        let token = encode_token(&user("vendedor1", Role::User), SECRET, 7200).unwrap();
        let mut tampered = token.clone();
        tampered.push('x');

        assert!(matches!(
            decode_token(&tampered, SECRET),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = encode_token(&user("admin", Role::Admin), SECRET, 7200).unwrap();
        assert!(decode_token(&token, "another-secret").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = encode_token(&user("admin", Role::Admin), SECRET, -3600).unwrap();
        assert!(decode_token(&token, SECRET).is_err());
    }

    #[test]
    fn test_default_expiry_is_two_hours() {
        let token = encode_token(&user("admin", Role::Admin), SECRET, 7200).unwrap();
        let claims = decode_token(&token, SECRET).unwrap();
        assert_eq!(claims.exp - claims.iat, 2 * 60 * 60);
    }
}

// ============================================================================
// Unit Tests: Passwords
// ============================================================================

#[cfg(test)]
mod password_tests {
    use super::*;

    #[test]
    fn test_hash_verifies_only_the_right_password() {
        let hash = hash_password("secret123").unwrap();

        assert_ne!(hash, "secret123");
        assert!(bcrypt::verify("secret123", &hash).unwrap());
        assert!(!bcrypt::verify("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("secret123").unwrap();
        let second = hash_password("secret123").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_role_defaults_to_user() {
        assert_eq!(Role::default(), Role::User);
        assert!(Role::Admin.is_admin());
        assert!(!Role::User.is_admin());
    }
}

// ============================================================================
// Database Tests: Register and Login
// ============================================================================

#[sqlx::test(migrations = "./migrations")]
#[ignore] // Requires database connection
async fn test_register_then_login_issues_user_token(pool: PgPool) {
    let service = AuthService::new(pool, &config());

    let registered = service.register(registration("marta")).await.unwrap();
    assert_eq!(registered.user.username, "marta");
    assert_eq!(registered.user.role, Role::User);

    let session = service.login(login("marta", "secret123")).await.unwrap();
    assert_eq!(session.user.id, registered.user.id);

    let claims = decode_token(&session.token, SECRET).unwrap();
    assert_eq!(claims.sub, registered.user.id.to_string());
    assert_eq!(claims.username, "marta");
    assert_eq!(claims.role, Role::User);

    let me = service.me(registered.user.id).await.unwrap();
    assert_eq!(me.email, "marta@stocky.local");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore] // Requires database connection
async fn test_login_with_wrong_password_is_invalid_credentials(pool: PgPool) {
    let service = AuthService::new(pool, &config());
    service.register(registration("marta")).await.unwrap();

    let err = service
        .login(login("marta", "wrong-password"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));

    // Unknown users get the same answer
    let err = service.login(login("nadie", "secret123")).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore] // Requires database connection
async fn test_duplicate_registration_conflicts(pool: PgPool) {
    let service = AuthService::new(pool, &config());
    service.register(registration("marta")).await.unwrap();

    let err = service.register(registration("marta")).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }));

    let mut same_email = registration("otra");
    same_email.email = "marta@stocky.local".to_string();
    let err = service.register(same_email).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }));
}
