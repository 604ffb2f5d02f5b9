//! Admin Authentication Endpoints
//! Mission: admin login and the forgot/reset password flow

use crate::api::AppState;
use crate::auth::models::{AdminLoginRequest, ForgotPasswordRequest, ResetPasswordRequest};
use crate::auth::PrincipalType;
use crate::error::ApiError;
use crate::messages;
use crate::response::{ok, Envelope};
use axum::{extract::State, Json};
use rand::{distributions::Alphanumeric, Rng};
use serde_json::{json, Value};
use tracing::{info, warn};

const RESET_TOKEN_LEN: usize = 32;

/// POST /admin/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<AdminLoginRequest>,
) -> Result<Json<Envelope<Value>>, ApiError> {
    info!("🔐 Admin login attempt: {}", payload.email);

    let admin = state
        .users
        .find_active_by_email(&payload.email)?
        .ok_or_else(|| ApiError::NotFound(messages::ADMIN_NOT_FOUND.to_string()))?;

    if !bcrypt::verify(&payload.password, &admin.password_hash)? {
        warn!("❌ Failed admin login: {}", payload.email);
        return Err(ApiError::InvalidPassword);
    }

    let access_token =
        state
            .tokens
            .issue(&admin.id, &admin.email, admin.role, PrincipalType::Admin)?;

    info!("✅ Admin logged in: {}", admin.email);

    Ok(ok(
        messages::ADMIN_LOGIN_SUCC,
        json!({
            "firstName": admin.first_name,
            "lastName": admin.last_name,
            "role": admin.role,
            "accessToken": access_token,
        }),
    ))
}

/// POST /admin/forgotPassword
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<Json<Envelope<Value>>, ApiError> {
    let admin = state
        .users
        .find_active_by_email(&payload.email)?
        .ok_or_else(|| ApiError::NotFound(messages::ADMIN_NOT_FOUND.to_string()))?;

    let token: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(RESET_TOKEN_LEN)
        .map(char::from)
        .collect();

    state.users.set_reset_token(&admin.id, &token)?;

    info!("📧 Reset token issued for {}", admin.email);

    Ok(ok(
        messages::FORGOT_PASS_SUCC,
        json!({
            "resetUrlLink": format!("{}reset-password/{}", state.config.admin_url, token),
        }),
    ))
}

/// POST /admin/resetPassword
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<Envelope<Value>>, ApiError> {
    let token = payload.token.trim();
    if token.len() != RESET_TOKEN_LEN {
        return Err(ApiError::BadRequest(
            messages::RESET_TOKEN_INVALID.to_string(),
        ));
    }

    let principal = state
        .users
        .find_by_reset_token(token)?
        .ok_or_else(|| ApiError::BadRequest(messages::RESET_TOKEN_INVALID.to_string()))?;

    let password_hash = bcrypt::hash(&payload.new_password, state.config.bcrypt_cost)?;
    // Clears the reset token alongside the password write, so the link is
    // single-use.
    state.users.reset_password(&principal.id, &password_hash)?;

    info!("🔑 Password reset for {}", principal.email);

    Ok(ok(messages::RESET_PASS_SUCC, json!({})))
}
