//! # Staff Account Routes
//!
//! Registration, login and security-answer-gated password recovery.
//!
//! All three credential checks return the same generic error for every
//! failure mode - unknown username, wrong password, wrong answer - so a
//! caller cannot probe which field was wrong.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use stampcard_core::types::NewAdmin;
use stampcard_core::validation::{validate_password, validate_security_text, validate_username};

use crate::auth::{hash_secret, verify_secret};
use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// DTOs
// =============================================================================

/// Staff account DTO; hashes never leave the server.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDto {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub security_question: String,
}

// =============================================================================
// Registration
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub security_question: String,
    pub security_answer: String,
}

/// Registers a staff account. Password and security answer are hashed
/// before they reach the store.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AdminDto>), ApiError> {
    validate_username(&body.username)?;
    validate_password(&body.password)?;
    validate_security_text("security question", &body.security_question)?;
    validate_security_text("security answer", &body.security_answer)?;

    let new_admin = NewAdmin {
        username: body.username.trim().to_string(),
        email: body.email.trim().to_string(),
        password_hash: hash_secret(&body.password)
            .map_err(|e| ApiError::internal(e.to_string()))?,
        security_question: body.security_question.trim().to_string(),
        security_answer_hash: hash_secret(body.security_answer.trim())
            .map_err(|e| ApiError::internal(e.to_string()))?,
    };

    let admin = state.db.admins().insert(&new_admin).await?;

    info!(username = %admin.username, "Admin registered");

    Ok((
        StatusCode::CREATED,
        Json(AdminDto {
            id: admin.id,
            username: admin.username,
            email: admin.email,
            security_question: admin.security_question,
        }),
    ))
}

// =============================================================================
// Login
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Verifies staff credentials.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AdminDto>, ApiError> {
    let admin = state
        .db
        .admins()
        .find_by_username(body.username.trim())
        .await?;

    // Unknown username and wrong password take the same exit.
    let Some(admin) = admin else {
        warn!("Admin login failed");
        return Err(ApiError::invalid_credentials());
    };

    if !verify_secret(&body.password, &admin.password_hash) {
        warn!(username = %admin.username, "Admin login failed");
        return Err(ApiError::invalid_credentials());
    }

    info!(username = %admin.username, "Admin logged in");

    Ok(Json(AdminDto {
        id: admin.id,
        username: admin.username,
        email: admin.email,
        security_question: admin.security_question,
    }))
}

// =============================================================================
// Recovery
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoverRequest {
    pub username: String,
    pub security_answer: String,
    pub new_password: String,
}

/// Rotates a password after a matching security answer.
pub async fn recover(
    State(state): State<AppState>,
    Json(body): Json<RecoverRequest>,
) -> Result<StatusCode, ApiError> {
    validate_password(&body.new_password)?;

    let repo = state.db.admins();
    let admin = repo.find_by_username(body.username.trim()).await?;

    let Some(admin) = admin else {
        warn!("Admin recovery failed");
        return Err(ApiError::invalid_credentials());
    };

    if !verify_secret(body.security_answer.trim(), &admin.security_answer_hash) {
        warn!(username = %admin.username, "Admin recovery failed");
        return Err(ApiError::invalid_credentials());
    }

    let new_hash =
        hash_secret(&body.new_password).map_err(|e| ApiError::internal(e.to_string()))?;
    repo.update_password_hash(&admin.username, &new_hash).await?;

    info!(username = %admin.username, "Admin password rotated");
    Ok(StatusCode::NO_CONTENT)
}
