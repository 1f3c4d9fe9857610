//! # Customer Repository
//!
//! Record store operations for customers.
//!
//! ## Key Operations
//! - Enrollment with transactional member-code assignment
//! - Card-login resolution (member code or mobile, exactly one match)
//! - Substring search and active/vault listings
//! - Counter updates, soft delete, restore, hard delete
//!
//! ## Enrollment Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  enroll("Ayesha Khan", "03001234567")                               │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  BEGIN                                                              │
//! │    count ← SELECT COUNT(*) FROM customers      (e.g. 41)            │
//! │    code  ← member_code(count)                  ("MSC0042")          │
//! │    INSERT customer (code, name, mobile, zero counters)              │
//! │  COMMIT                                                             │
//! │                                                                     │
//! │  Count and insert share one transaction; member_code is UNIQUE,     │
//! │  so a lost race is a typed duplicate error, never two cards with    │
//! │  the same code.                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use stampcard_core::ledger::StampLedger;
use stampcard_core::lookup::LoginKey;
use stampcard_core::member_id::member_code;
use stampcard_core::types::Customer;

/// Column list shared by every customer SELECT.
const CUSTOMER_COLUMNS: &str = "id, member_code, name, mobile, stamps, \
     lifetime_stamps, redeems, is_deleted, created_at, updated_at";

/// Repository for customer record operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CustomerRepository::new(pool);
/// let customer = repo.enroll("Ayesha Khan", "03001234567").await?;
/// let found = repo.find_by_login(&LoginKey::parse("msc0001")?).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    // =========================================================================
    // Enrollment
    // =========================================================================

    /// Enrolls a new customer with zeroed counters and the next member code.
    ///
    /// ## Returns
    /// * `Ok(Customer)` - the inserted record
    /// * `Err(DbError::UniqueViolation)` - member code collision (lost race)
    pub async fn enroll(&self, name: &str, mobile: &str) -> DbResult<Customer> {
        debug!(name = %name, "Enrolling customer");

        let mut tx = self.pool.begin().await?;

        // Soft-deleted records still count: the sequence never reuses a code.
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&mut *tx)
            .await?;

        let code = member_code(count);
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO customers \
                 (member_code, name, mobile, stamps, lifetime_stamps, redeems, \
                  is_deleted, created_at, updated_at) \
             VALUES (?1, ?2, ?3, 0, 0, 0, 0, ?4, ?5)",
        )
        .bind(&code)
        .bind(name)
        .bind(mobile)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_rowid();
        tx.commit().await?;

        debug!(id = %id, code = %code, "Customer enrolled");

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Customer", id.to_string()))
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Gets a customer by row id, deleted or not.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Gets an active (non-deleted) customer by row id.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - no such record, or it is archived
    pub async fn get_active_by_id(&self, id: i64) -> DbResult<Customer> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = ?1 AND is_deleted = 0"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        customer.ok_or_else(|| DbError::not_found("Customer", id.to_string()))
    }

    /// Resolves a card-login credential to exactly one active customer.
    ///
    /// Member codes match case-insensitively; mobiles match exactly. Zero
    /// matches and ambiguous matches both come back as the same generic
    /// not-found - callers learn nothing about which field was wrong.
    pub async fn find_by_login(&self, key: &LoginKey) -> DbResult<Customer> {
        let matches = match key {
            LoginKey::MemberCode(code) => {
                sqlx::query_as::<_, Customer>(&format!(
                    "SELECT {CUSTOMER_COLUMNS} FROM customers \
                     WHERE is_deleted = 0 AND UPPER(member_code) = UPPER(?1)"
                ))
                .bind(code)
                .fetch_all(&self.pool)
                .await?
            }
            LoginKey::Mobile(mobile) => {
                sqlx::query_as::<_, Customer>(&format!(
                    "SELECT {CUSTOMER_COLUMNS} FROM customers \
                     WHERE is_deleted = 0 AND mobile = ?1"
                ))
                .bind(mobile)
                .fetch_all(&self.pool)
                .await?
            }
        };

        debug!(candidates = matches.len(), "Card login resolved");

        // Exactly one active match or nothing; ambiguity leaks no more than
        // a miss does.
        let mut matches = matches.into_iter();
        match (matches.next(), matches.next()) {
            (Some(customer), None) => Ok(customer),
            _ => Err(DbError::not_found("Customer", key.as_str().to_string())),
        }
    }

    /// Searches active customers by case-insensitive substring on name,
    /// mobile, or member code, newest enrollment first.
    pub async fn search(&self, query: &str, limit: u32) -> DbResult<Vec<Customer>> {
        let query = query.trim();

        debug!(query = %query, limit = %limit, "Searching customers");

        if query.is_empty() {
            return self.list_active(limit).await;
        }

        // LIKE is case-insensitive for ASCII in SQLite by default.
        let pattern = format!("%{}%", query);

        let customers = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers \
             WHERE is_deleted = 0 \
               AND (name LIKE ?1 OR mobile LIKE ?1 OR member_code LIKE ?1) \
             ORDER BY created_at DESC \
             LIMIT ?2"
        ))
        .bind(&pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = customers.len(), "Search returned customers");
        Ok(customers)
    }

    /// Lists active customers, newest enrollment first.
    pub async fn list_active(&self, limit: u32) -> DbResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers \
             WHERE is_deleted = 0 \
             ORDER BY created_at DESC \
             LIMIT ?1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    /// Lists archived ("vault") customers, newest enrollment first.
    pub async fn list_vault(&self, limit: u32) -> DbResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers \
             WHERE is_deleted = 1 \
             ORDER BY created_at DESC \
             LIMIT ?1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    /// Counts all customer records, archived included (drives member-code
    /// assignment).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Writes ledger counters back to a customer record.
    ///
    /// Plain read-modify-write with no version compare: two staff sessions
    /// adjusting the same customer race, last write wins. A miscounted stamp
    /// is low-stakes; the limitation is documented, not fixed here.
    pub async fn update_counts(&self, id: i64, ledger: &StampLedger) -> DbResult<()> {
        debug!(
            id = %id,
            stamps = ledger.stamps,
            lifetime = ledger.lifetime_stamps,
            redeems = ledger.redeems,
            "Updating customer counters"
        );

        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE customers SET \
                 stamps = ?2, \
                 lifetime_stamps = ?3, \
                 redeems = ?4, \
                 updated_at = ?5 \
             WHERE id = ?1 AND is_deleted = 0",
        )
        .bind(id)
        .bind(ledger.stamps)
        .bind(ledger.lifetime_stamps)
        .bind(ledger.redeems)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id.to_string()));
        }

        Ok(())
    }

    /// Soft-deletes a customer into the vault. Counters are untouched.
    pub async fn soft_delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Archiving customer");

        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE customers SET is_deleted = 1, updated_at = ?2 \
             WHERE id = ?1 AND is_deleted = 0",
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id.to_string()));
        }

        Ok(())
    }

    /// Restores an archived customer to the active listing.
    pub async fn restore(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Restoring customer from vault");

        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE customers SET is_deleted = 0, updated_at = ?2 \
             WHERE id = ?1 AND is_deleted = 1",
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id.to_string()));
        }

        Ok(())
    }

    /// Permanently removes a customer record. Irreversible.
    pub async fn hard_delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Hard-deleting customer");

        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id.to_string()));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
