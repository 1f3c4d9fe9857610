//! # stampcard-db: Record Store Layer for Stampcard
//!
//! SQLite storage behind the loyalty program, accessed through repositories.
//!
//! ## Architecture Position
//! ```text
//! HTTP route (enroll_customer)
//!      │
//!      ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   stampcard-db (THIS CRATE)                     │
//! │                                                                 │
//! │   ┌───────────────┐   ┌────────────────┐   ┌──────────────┐    │
//! │   │   Database    │   │  Repositories  │   │  Migrations  │    │
//! │   │   (pool.rs)   │◄──│ customer.rs    │   │  (embedded)  │    │
//! │   │   SqlitePool  │   │ admin.rs       │   │ 001_init.sql │    │
//! │   └───────────────┘   └────────────────┘   └──────────────┘    │
//! └─────────────────────────────────────────────────────────────────┘
//!      │
//!      ▼
//! SQLite database file (or :memory: in tests)
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (customer, admin)

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::admin::AdminRepository;
pub use repository::customer::CustomerRepository;
