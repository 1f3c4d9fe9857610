//! # Customer Card Routes
//!
//! The customer-facing side: log in with one free-form credential (member
//! code, any case, or mobile number) and view the digital membership card.
//! The card carries the stamp wheel, derived rank, and a QR code linking
//! back to the card view.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use stampcard_core::lookup::LoginKey;
use stampcard_core::member_id::normalize_member_code;
use stampcard_core::types::Customer;
use stampcard_db::DbError;

use crate::error::ApiError;
use crate::routes::customers::{CustomerDto, RankDto};
use crate::state::AppState;

// =============================================================================
// DTOs
// =============================================================================

/// The digital membership card.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub member_code: String,
    pub name: String,
    pub stamps: i64,
    pub stamps_required: i64,
    pub lifetime_stamps: i64,
    pub redeems: i64,
    pub reward_unlocked: bool,
    pub rank: RankDto,
    /// Link the QR code resolves to.
    pub card_url: String,
    /// Square image rendering the QR code.
    pub qr_image_url: String,
}

impl CardView {
    fn build(customer: Customer, state: &AppState) -> Result<Self, ApiError> {
        let card_url = state.qr.card_link(&customer.member_code)?;
        let qr_image_url = state.qr.image_url(&customer.member_code)?;
        let dto = CustomerDto::from(customer);

        Ok(CardView {
            member_code: dto.member_code,
            name: dto.name,
            stamps: dto.stamps,
            stamps_required: dto.stamps_required,
            lifetime_stamps: dto.lifetime_stamps,
            redeems: dto.redeems,
            reward_unlocked: dto.reward_unlocked,
            rank: dto.rank,
            card_url,
            qr_image_url,
        })
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Card login body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardLoginRequest {
    /// Member code (any case) or mobile number.
    pub credential: String,
}

/// Collapses a lookup miss into the generic not-found; anything else (store
/// outage, query failure) keeps its own mapping, so an outage never reads as
/// "no such customer".
fn miss_or_passthrough(err: DbError) -> ApiError {
    match err {
        DbError::NotFound { .. } => ApiError::not_found("Customer"),
        other => other.into(),
    }
}

/// Logs a customer into their card.
///
/// Zero matches, ambiguous matches and malformed credentials all collapse
/// into the same generic not-found.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<CardLoginRequest>,
) -> Result<Json<CardView>, ApiError> {
    let key = LoginKey::parse(&body.credential).map_err(|_| ApiError::not_found("Customer"))?;

    debug!("Card login attempt");

    let customer = state
        .db
        .customers()
        .find_by_login(&key)
        .await
        .map_err(miss_or_passthrough)?;

    Ok(Json(CardView::build(customer, &state)?))
}

/// Renders the card for a member code - the view a scanned QR lands on.
pub async fn view(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<CardView>, ApiError> {
    let code = normalize_member_code(&code).map_err(|_| ApiError::not_found("Customer"))?;

    let customer = state
        .db
        .customers()
        .find_by_login(&LoginKey::MemberCode(code))
        .await
        .map_err(miss_or_passthrough)?;

    Ok(Json(CardView::build(customer, &state)?))
}
