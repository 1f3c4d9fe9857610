//! # stampcard-server: HTTP App Layer
//!
//! axum routes over the loyalty core and the record store.
//!
//! ## Surface
//! ```text
//! Staff        POST   /api/customers                  enroll
//!              GET    /api/customers                  list / search (active)
//!              GET    /api/customers/vault            archived listing
//!              GET    /api/customers/export.csv       CSV download
//!              GET    /api/customers/{id}             one record
//!              POST   /api/customers/{id}/stamps      grant / revoke
//!              POST   /api/customers/{id}/redeem      convert full wheel
//!              POST   /api/customers/{id}/restore     out of the vault
//!              DELETE /api/customers/{id}             soft delete (vault)
//!              DELETE /api/customers/{id}/purge       hard delete
//!
//! Card         POST   /api/card/login                 code or mobile
//!              GET    /api/card/{code}                membership card view
//!
//! Admin        POST   /api/admins/register
//!              POST   /api/admins/login
//!              POST   /api/admins/recover             security-answer gated
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod qr;
pub mod routes;
pub mod state;

pub use routes::app;
pub use state::AppState;
