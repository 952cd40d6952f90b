//! User administration service

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::config::AdminConfig;
use crate::error::{AppError, AppResult};
use crate::models::{CreateUser, Role, UpdateUser, User};
use crate::services::auth::hash_password;

const USER_COLUMNS: &str = "id, username, email, role, created_at";

#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

impl UserService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY created_at, username",
            USER_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;
        Ok(users)
    }

    pub async fn get(&self, user_id: Uuid) -> AppResult<User> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))
    }

    pub async fn create(&self, input: CreateUser) -> AppResult<User> {
        input.validate()?;
        self.check_available(&input.username, &input.email, None)
            .await?;

        let password_hash = hash_password(&input.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&input.username)
        .bind(&input.email)
        .bind(&password_hash)
        .bind(input.role.unwrap_or_default())
        .fetch_one(&self.db)
        .await
        .map_err(AppError::on_unique_violation(
            "username",
            "Username or email already exists",
        ))?;

        tracing::info!(user_id = %user.id, username = %user.username, role = %user.role, "User created");
        Ok(user)
    }

    pub async fn update(&self, user_id: Uuid, input: UpdateUser) -> AppResult<User> {
        input.validate()?;
        let current = self.get(user_id).await?;

        let username = input.username.unwrap_or(current.username);
        let email = input.email.unwrap_or(current.email);
        self.check_available(&username, &email, Some(user_id))
            .await?;

        let password_hash = input.password.as_deref().map(hash_password).transpose()?;

        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET username = $2, email = $3, role = $4,
                password_hash = COALESCE($5, password_hash), updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(user_id)
        .bind(&username)
        .bind(&email)
        .bind(input.role.unwrap_or(current.role))
        .bind(password_hash)
        .fetch_optional(&self.db)
        .await
        .map_err(AppError::on_unique_violation(
            "username",
            "Username or email already exists",
        ))?
        .ok_or_else(|| AppError::NotFound("User".to_string()))
    }

    /// Delete an account; admins cannot remove themselves
    pub async fn delete(&self, user_id: Uuid, acting_user_id: Uuid) -> AppResult<()> {
        if user_id == acting_user_id {
            return Err(AppError::validation("id", "You cannot delete your own account"));
        }

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User".to_string()));
        }

        tracing::info!(user_id = %user_id, "User deleted");
        Ok(())
    }

    /// Create the configured admin account unless the username already exists
    pub async fn ensure_admin(&self, admin: &AdminConfig) -> AppResult<()> {
        let Some(password) = admin.password.as_deref() else {
            tracing::debug!("No admin password configured, skipping admin bootstrap");
            return Ok(());
        };

        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(&admin.username)
                .fetch_one(&self.db)
                .await?;

        if exists {
            return Ok(());
        }

        let user = self
            .create(CreateUser {
                username: admin.username.clone(),
                email: admin.email.clone(),
                password: password.to_string(),
                role: Some(Role::Admin),
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "Admin account created");
        Ok(())
    }

    async fn check_available(
        &self,
        username: &str,
        email: &str,
        exclude: Option<Uuid>,
    ) -> AppResult<()> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE (username = $1 OR email = $2) AND ($3::uuid IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(exclude)
        .fetch_one(&self.db)
        .await?;

        if taken {
            return Err(AppError::conflict(
                "username",
                "Username or email already exists",
            ));
        }
        Ok(())
    }
}
