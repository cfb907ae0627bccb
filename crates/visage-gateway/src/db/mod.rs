//! Database and repository layer for profile persistence.

use async_trait::async_trait;
use chrono::Utc;
#[cfg(feature = "persistence-sqlx")]
use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use thiserror::Error;

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use visage_core::{Profile, UserId};

/// Database connection pool type used by gateway persistence.
#[cfg(feature = "persistence-sqlx")]
pub type DatabasePool = PgPool;

/// Placeholder pool type when SQLx persistence is disabled.
#[cfg(not(feature = "persistence-sqlx"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct DatabasePool;

/// SQL schema for the `profiles` table.
///
/// Rows are created by the account-creation trigger in the hosted
/// platform; this codebase only reads and updates them.
pub const PROFILES_TABLE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS profiles (
    id UUID PRIMARY KEY,
    full_name TEXT,
    email TEXT NOT NULL UNIQUE,
    avatar_url TEXT,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);"#;

/// Error type returned by repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database query failed.
    #[cfg(feature = "persistence-sqlx")]
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    /// SQLx persistence feature is disabled.
    #[error("persistence-sqlx feature is disabled")]
    SqlxDisabled,
}

/// Create a PostgreSQL connection pool for gateway persistence.
#[cfg(feature = "persistence-sqlx")]
pub async fn init_pool(database_url: &str) -> Result<DatabasePool, RepositoryError> {
    Ok(PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?)
}

/// Create a PostgreSQL connection pool for gateway persistence.
#[cfg(not(feature = "persistence-sqlx"))]
pub async fn init_pool(_database_url: &str) -> Result<DatabasePool, RepositoryError> {
    Err(RepositoryError::SqlxDisabled)
}

/// Initialize required tables if they do not exist.
#[cfg(feature = "persistence-sqlx")]
pub async fn initialize_schema(pool: &DatabasePool) -> Result<(), RepositoryError> {
    sqlx::query(PROFILES_TABLE_SCHEMA).execute(pool).await?;
    Ok(())
}

/// Initialize required tables if they do not exist.
#[cfg(not(feature = "persistence-sqlx"))]
pub async fn initialize_schema(_pool: &DatabasePool) -> Result<(), RepositoryError> {
    Err(RepositoryError::SqlxDisabled)
}

/// Persistence operations for profiles.
///
/// Every write is row-scoped to one user id; no operation here touches
/// the email column.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Load one profile by user id.
    async fn get(&self, id: UserId) -> Result<Option<Profile>, RepositoryError>;
    /// Persist a profile row (the external account trigger's job; used
    /// here for seeding and tests).
    async fn create(&self, profile: Profile) -> Result<(), RepositoryError>;
    /// Write the trimmed display name for one user.
    async fn update_name(&self, id: UserId, full_name: &str) -> Result<(), RepositoryError>;
    /// Write the avatar URL for one user.
    async fn update_avatar_url(&self, id: UserId, avatar_url: &str) -> Result<(), RepositoryError>;
}

/// SQLx/PostgreSQL implementation of [`ProfileRepository`].
#[cfg(feature = "persistence-sqlx")]
#[derive(Debug, Clone)]
pub struct SqlxProfileRepository {
    pool: DatabasePool,
}

#[cfg(feature = "persistence-sqlx")]
impl SqlxProfileRepository {
    /// Build a repository over an existing pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[cfg(feature = "persistence-sqlx")]
#[async_trait]
impl ProfileRepository for SqlxProfileRepository {
    async fn get(&self, id: UserId) -> Result<Option<Profile>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, full_name, email, avatar_url, updated_at FROM profiles WHERE id = $1",
        )
        .bind(uuid::Uuid::from(id))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| Profile {
            id: UserId::from(row.get::<uuid::Uuid, _>("id")),
            full_name: row.get("full_name"),
            email: row.get("email"),
            avatar_url: row.get("avatar_url"),
            updated_at: row.get("updated_at"),
        }))
    }

    async fn create(&self, profile: Profile) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO profiles (id, full_name, email, avatar_url, updated_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(uuid::Uuid::from(profile.id))
        .bind(&profile.full_name)
        .bind(&profile.email)
        .bind(&profile.avatar_url)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_name(&self, id: UserId, full_name: &str) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE profiles SET full_name = $2, updated_at = NOW() WHERE id = $1")
            .bind(uuid::Uuid::from(id))
            .bind(full_name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update_avatar_url(&self, id: UserId, avatar_url: &str) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE profiles SET avatar_url = $2, updated_at = NOW() WHERE id = $1")
            .bind(uuid::Uuid::from(id))
            .bind(avatar_url)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// In-memory implementation of [`ProfileRepository`] for tests and for
/// running the gateway without a database.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<UserId, Profile>>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn get(&self, id: UserId) -> Result<Option<Profile>, RepositoryError> {
        Ok(self.profiles.read().await.get(&id).cloned())
    }

    async fn create(&self, profile: Profile) -> Result<(), RepositoryError> {
        self.profiles.write().await.insert(profile.id, profile);
        Ok(())
    }

    async fn update_name(&self, id: UserId, full_name: &str) -> Result<(), RepositoryError> {
        if let Some(profile) = self.profiles.write().await.get_mut(&id) {
            profile.full_name = Some(full_name.to_string());
            profile.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn update_avatar_url(&self, id: UserId, avatar_url: &str) -> Result<(), RepositoryError> {
        if let Some(profile) = self.profiles.write().await.get_mut(&id) {
            profile.avatar_url = Some(avatar_url.to_string());
            profile.updated_at = Utc::now();
        }
        Ok(())
    }
}
