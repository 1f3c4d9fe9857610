//! # Admin Repository
//!
//! Record store operations for staff accounts.
//!
//! The repository only ever sees hashes: the app layer hashes passwords and
//! security answers before they get here and verifies them after fetching.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use stampcard_core::types::{Admin, NewAdmin};

/// Column list shared by every admin SELECT.
const ADMIN_COLUMNS: &str = "id, username, email, password_hash, \
     security_question, security_answer_hash, created_at";

/// Repository for staff account operations.
#[derive(Debug, Clone)]
pub struct AdminRepository {
    pool: SqlitePool,
}

impl AdminRepository {
    /// Creates a new AdminRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AdminRepository { pool }
    }

    /// Registers a staff account.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - username already taken
    pub async fn insert(&self, admin: &NewAdmin) -> DbResult<Admin> {
        debug!(username = %admin.username, "Registering admin");

        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO admins \
                 (username, email, password_hash, security_question, \
                  security_answer_hash, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&admin.username)
        .bind(&admin.email)
        .bind(&admin.password_hash)
        .bind(&admin.security_question)
        .bind(&admin.security_answer_hash)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Admin", id.to_string()))
    }

    /// Gets an admin by row id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    /// Finds an admin by username.
    ///
    /// Returns `Ok(None)` rather than an error: login and recovery collapse
    /// unknown-username and wrong-secret into one generic message, so the
    /// caller decides how much to reveal.
    pub async fn find_by_username(&self, username: &str) -> DbResult<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE username = ?1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    /// Rotates a password hash after a successful recovery.
    pub async fn update_password_hash(&self, username: &str, password_hash: &str) -> DbResult<()> {
        debug!(username = %username, "Rotating admin password hash");

        let result = sqlx::query("UPDATE admins SET password_hash = ?2 WHERE username = ?1")
            .bind(username)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Admin", username.to_string()));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn new_admin(username: &str) -> NewAdmin {
        NewAdmin {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "$argon2id$fake-hash".to_string(),
            security_question: "First pet?".to_string(),
            security_answer_hash: "$argon2id$fake-answer-hash".to_string(),
        }
    }

    async fn repo() -> AdminRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.admins()
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = repo().await;

        let created = repo.insert(&new_admin("front.desk")).await.unwrap();
        assert_eq!(created.username, "front.desk");
        assert_eq!(created.security_question, "First pet?");

        let found = repo.find_by_username("front.desk").await.unwrap();
        assert!(found.is_some());
        assert!(repo.find_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let repo = repo().await;

        repo.insert(&new_admin("front.desk")).await.unwrap();
        let err = repo.insert(&new_admin("front.desk")).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_password_hash_rotation() {
        let repo = repo().await;
        repo.insert(&new_admin("front.desk")).await.unwrap();

        repo.update_password_hash("front.desk", "$argon2id$new-hash")
            .await
            .unwrap();

        let admin = repo.find_by_username("front.desk").await.unwrap().unwrap();
        assert_eq!(admin.password_hash, "$argon2id$new-hash");

        let err = repo
            .update_password_hash("nobody", "$argon2id$x")
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
