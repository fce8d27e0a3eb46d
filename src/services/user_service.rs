use serde::Deserialize;
use sqlx::PgPool;

use crate::auth::{password, Role};
use crate::database::models::User;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct RegisterUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Administrator-driven mutation. A registration starts inactive and
/// unassigned; an administrator activates it, grants a role, and
/// assigns an establishment through this.
#[derive(Debug, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "rol")]
    pub role: Option<Role>,
    #[serde(rename = "id_establecimiento")]
    pub establishment_id: Option<i64>,
    pub active: Option<bool>,
}

pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let row = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Self-registration: the account starts inactive, as an operator,
    /// with no establishment, until an administrator enables it.
    pub async fn register(&self, reg: RegisterUser) -> Result<User, ApiError> {
        let password_hash = password::hash(&reg.password)?;

        let row = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash, role, active) \
             VALUES ($1, $2, $3, $4, false) RETURNING *",
        )
        .bind(&reg.name)
        .bind(&reg.email)
        .bind(&password_hash)
        .bind(Role::Operario)
        .fetch_one(&self.pool)
        .await
        .map_err(email_conflict)?;
        Ok(row)
    }

    /// Bootstrap an active administrator (CLI only).
    pub async fn create_admin(
        &self,
        name: &str,
        email: &str,
        plain_password: &str,
        establishment_id: Option<i64>,
    ) -> Result<User, ApiError> {
        let password_hash = password::hash(plain_password)?;

        let row = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash, role, establishment_id, active) \
             VALUES ($1, $2, $3, $4, $5, true) RETURNING *",
        )
        .bind(name)
        .bind(email)
        .bind(&password_hash)
        .bind(Role::Admin)
        .bind(establishment_id)
        .fetch_one(&self.pool)
        .await
        .map_err(email_conflict)?;
        Ok(row)
    }

    pub async fn list(&self, establishment: Option<i64>) -> Result<Vec<User>, ApiError> {
        let rows = match establishment {
            Some(est) => {
                sqlx::query_as::<_, User>(
                    "SELECT * FROM users WHERE establishment_id = $1 ORDER BY id",
                )
                .bind(est)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(rows)
    }

    pub async fn get(&self, id: i64) -> Result<User, ApiError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ApiError::not_found("user not found"))
    }

    pub async fn update(&self, id: i64, upd: UpdateUser) -> Result<User, ApiError> {
        let row = sqlx::query_as::<_, User>(
            "UPDATE users SET \
                name = COALESCE($1, name), \
                email = COALESCE($2, email), \
                role = COALESCE($3, role), \
                establishment_id = COALESCE($4, establishment_id), \
                active = COALESCE($5, active) \
             WHERE id = $6 RETURNING *",
        )
        .bind(&upd.name)
        .bind(&upd.email)
        .bind(upd.role)
        .bind(upd.establishment_id)
        .bind(upd.active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(email_conflict)?;
        row.ok_or_else(|| ApiError::not_found("user not found"))
    }

    /// Accounts are never removed, only switched off.
    pub async fn deactivate(&self, id: i64) -> Result<(), ApiError> {
        let result = sqlx::query("UPDATE users SET active = false WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("user not found"));
        }
        Ok(())
    }

    pub async fn touch_last_access(&self, id: i64) -> Result<(), ApiError> {
        sqlx::query("UPDATE users SET last_access = now() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

fn email_conflict(err: sqlx::Error) -> ApiError {
    match &err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
            ApiError::conflict("email already registered")
        }
        _ => err.into(),
    }
}
