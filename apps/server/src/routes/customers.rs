//! # Staff Customer Routes
//!
//! Enrollment, listings, stamp adjustments, redemption, vault management and
//! CSV export. Every mutating handler follows the same shape: fetch the
//! active record, run the ledger rules in the core, write the counters back.
//!
//! There is no version compare on the write-back: two staff sessions
//! adjusting the same customer race and the last write wins. Known
//! limitation, kept as-is.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use stampcard_core::export::{customers_csv, export_filename};
use stampcard_core::ledger::StampAdjustment;
use stampcard_core::rank::redeems_to_next_tier;
use stampcard_core::types::Customer;
use stampcard_core::validation::{validate_mobile, validate_name, validate_search_query};
use stampcard_core::STAMPS_PER_REWARD;

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// DTOs
// =============================================================================

/// Customer DTO for staff screens.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub id: i64,
    pub member_code: String,
    pub name: String,
    pub mobile: String,
    pub stamps: i64,
    pub stamps_required: i64,
    pub lifetime_stamps: i64,
    pub redeems: i64,
    pub reward_unlocked: bool,
    pub archived: bool,
    pub rank: RankDto,
    pub joined_at: String,
}

/// Derived rank block rendered as the card badge.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankDto {
    pub tier: String,
    pub color: String,
    pub min_redeems: i64,
    /// Redemptions remaining to the next tier; absent at the top tier.
    pub redeems_to_next: Option<i64>,
}

impl From<Customer> for CustomerDto {
    fn from(c: Customer) -> Self {
        let tier = c.tier();
        CustomerDto {
            id: c.id,
            reward_unlocked: c.reward_unlocked(),
            rank: RankDto {
                tier: tier.label().to_string(),
                color: tier.color().to_string(),
                min_redeems: tier.min_redeems(),
                redeems_to_next: redeems_to_next_tier(c.redeems),
            },
            member_code: c.member_code,
            name: c.name,
            mobile: c.mobile,
            stamps: c.stamps,
            stamps_required: STAMPS_PER_REWARD,
            lifetime_stamps: c.lifetime_stamps,
            redeems: c.redeems,
            archived: c.is_deleted,
            joined_at: c.created_at.format("%d %b %Y").to_string(),
        }
    }
}

// =============================================================================
// Enrollment & Listings
// =============================================================================

/// Enrollment form body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    pub name: String,
    pub mobile: String,
}

/// Enrolls a new customer.
pub async fn enroll(
    State(state): State<AppState>,
    Json(body): Json<EnrollRequest>,
) -> Result<(StatusCode, Json<CustomerDto>), ApiError> {
    validate_name(&body.name)?;
    validate_mobile(&body.mobile)?;

    let customer = state
        .db
        .customers()
        .enroll(body.name.trim(), body.mobile.trim())
        .await?;

    info!(code = %customer.member_code, "Customer enrolled");
    Ok((StatusCode::CREATED, Json(customer.into())))
}

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Substring filter over name, mobile, member code.
    pub query: Option<String>,
    pub limit: Option<u32>,
}

/// Lists or searches active customers, newest enrollment first.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<CustomerDto>>, ApiError> {
    let query = validate_search_query(params.query.as_deref().unwrap_or(""))?;
    let limit = params.limit.unwrap_or(50).min(500);

    let customers = state.db.customers().search(&query, limit).await?;
    Ok(Json(customers.into_iter().map(CustomerDto::from).collect()))
}

/// Lists archived ("vault") customers.
pub async fn list_vault(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<CustomerDto>>, ApiError> {
    let limit = params.limit.unwrap_or(50).min(500);

    let customers = state.db.customers().list_vault(limit).await?;
    Ok(Json(customers.into_iter().map(CustomerDto::from).collect()))
}

/// Gets one customer by row id (archived included, for the vault screen).
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CustomerDto>, ApiError> {
    let customer = state
        .db
        .customers()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Customer"))?;

    Ok(Json(customer.into()))
}

// =============================================================================
// Stamp Actions
// =============================================================================

/// Stamp adjustment body: `{"adjustment": "grant"}` or `{"adjustment": "revoke"}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustStampsRequest {
    pub adjustment: StampAdjustment,
}

/// Grants or revokes one stamp.
pub async fn adjust_stamps(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<AdjustStampsRequest>,
) -> Result<Json<CustomerDto>, ApiError> {
    let repo = state.db.customers();
    let customer = repo.get_active_by_id(id).await?;

    let mut ledger = customer.ledger();
    ledger.adjust(body.adjustment);
    repo.update_counts(id, &ledger).await?;

    debug!(id = %id, adjustment = ?body.adjustment, "Stamps adjusted");
    Ok(Json(repo.get_active_by_id(id).await?.into()))
}

/// Converts a full stamp wheel into one reward.
pub async fn redeem(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CustomerDto>, ApiError> {
    let repo = state.db.customers();
    let customer = repo.get_active_by_id(id).await?;

    let mut ledger = customer.ledger();
    ledger.redeem()?;
    repo.update_counts(id, &ledger).await?;

    info!(code = %customer.member_code, redeems = ledger.redeems, "Reward redeemed");
    Ok(Json(repo.get_active_by_id(id).await?.into()))
}

// =============================================================================
// Vault & Deletion
// =============================================================================

/// Archives a customer into the vault.
pub async fn soft_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.db.customers().soft_delete(id).await?;
    info!(id = %id, "Customer archived");
    Ok(StatusCode::NO_CONTENT)
}

/// Restores an archived customer.
pub async fn restore(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CustomerDto>, ApiError> {
    let repo = state.db.customers();
    repo.restore(id).await?;
    info!(id = %id, "Customer restored");
    Ok(Json(repo.get_active_by_id(id).await?.into()))
}

/// Permanently removes a customer. Irreversible.
pub async fn hard_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.db.customers().hard_delete(id).await?;
    info!(id = %id, "Customer purged");
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// CSV Export
// =============================================================================

/// Downloads the visible customer list (active and vault) as CSV, filename
/// stamped with today's date.
pub async fn export_csv(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let repo = state.db.customers();
    let mut customers = repo.list_active(500).await?;
    customers.extend(repo.list_vault(500).await?);

    let csv = customers_csv(&customers);
    let filename = export_filename(Utc::now().date_naive());

    info!(rows = customers.len(), filename = %filename, "Customer export generated");

    Ok((
        StatusCode::OK,
        [
            ("Content-Type", "text/csv".to_string()),
            (
                "Content-Disposition",
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    ))
}
