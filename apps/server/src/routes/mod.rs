//! # HTTP Routes
//!
//! Route modules and router assembly. Handlers are thin: validate input,
//! run the core rules, persist through a repository, shape a DTO.

pub mod admins;
pub mod card;
pub mod customers;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Staff: customer management
        .route(
            "/api/customers",
            post(customers::enroll).get(customers::list),
        )
        .route("/api/customers/vault", get(customers::list_vault))
        .route("/api/customers/export.csv", get(customers::export_csv))
        .route(
            "/api/customers/{id}",
            get(customers::get_one).delete(customers::soft_delete),
        )
        .route("/api/customers/{id}/stamps", post(customers::adjust_stamps))
        .route("/api/customers/{id}/redeem", post(customers::redeem))
        .route("/api/customers/{id}/restore", post(customers::restore))
        .route("/api/customers/{id}/purge", delete(customers::hard_delete))
        // Customer card
        .route("/api/card/login", post(card::login))
        .route("/api/card/{code}", get(card::view))
        // Staff accounts
        .route("/api/admins/register", post(admins::register))
        .route("/api/admins/login", post(admins::login))
        .route("/api/admins/recover", post(admins::recover))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
