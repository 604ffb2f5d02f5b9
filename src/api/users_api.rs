//! User Endpoints
//! Mission: signup, signin, and the authenticated profile operations

use crate::api::AppState;
use crate::auth::models::{
    Claims, NewPrincipal, SignInRequest, SignUpRequest, UpdateUserRequest,
};
use crate::auth::{Principal, PrincipalType, Role};
use crate::error::ApiError;
use crate::messages;
use crate::response::{ok, Envelope};
use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::{info, warn};

/// POST /users/signUp
pub async fn sign_up(
    State(state): State<AppState>,
    Json(payload): Json<SignUpRequest>,
) -> Result<Json<Envelope<Value>>, ApiError> {
    // Check-then-insert, with the unique email index backstopping a race.
    if state.users.find_by_email(&payload.email)?.is_some() {
        return Err(ApiError::AlreadyExists(
            messages::EMAIL_ALREADY_EXIST.to_string(),
        ));
    }

    let password_hash = bcrypt::hash(&payload.password, state.config.bcrypt_cost)?;

    let user = state.users.create(NewPrincipal {
        first_name: payload.first_name,
        last_name: payload.last_name,
        email: payload.email,
        country_code: payload.country_code,
        phone_number: payload.phone_number,
        address: payload.address,
        password_hash,
        role: Role::User,
    })?;

    let access_token = state
        .tokens
        .issue(&user.id, &user.email, Role::User, PrincipalType::User)?;

    Ok(ok(
        messages::USER_SIGN_UP_SUCC,
        json!({
            "firstName": user.first_name,
            "lastName": user.last_name,
            "email": user.email,
            "accessToken": access_token,
        }),
    ))
}

/// POST /users/signIn
pub async fn sign_in(
    State(state): State<AppState>,
    Json(payload): Json<SignInRequest>,
) -> Result<Json<Envelope<Value>>, ApiError> {
    let user = state
        .users
        .find_by_email(&payload.email)?
        .ok_or_else(|| ApiError::NotFound(messages::USER_DOES_NOT_FOUND.to_string()))?;

    if !user.is_active {
        warn!("Rejected sign-in for disabled account {}", user.email);
        return Err(ApiError::Unauthorized(
            messages::ACCOUNT_DISABLED.to_string(),
        ));
    }

    if !bcrypt::verify(&payload.password, &user.password_hash)? {
        return Err(ApiError::InvalidPassword);
    }

    let access_token = state
        .tokens
        .issue(&user.id, &user.email, Role::User, PrincipalType::User)?;

    info!("✅ User signed in: {}", user.email);

    Ok(ok(
        messages::USER_SIGN_IN_SUCC,
        json!({
            "firstName": user.first_name,
            "lastName": user.last_name,
            "role": user.role,
            "email": user.email,
            "accessToken": access_token,
        }),
    ))
}

/// POST /users/update
pub async fn update_user(
    State(state): State<AppState>,
    claims: Claims,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<Envelope<Value>>, ApiError> {
    require_principal(&state, &claims)?;

    state.users.update_profile(&claims.sub, &payload)?;

    Ok(ok(messages::USER_UPDATED_SUCC, json!({})))
}

/// GET /users/view
pub async fn view_user(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<Envelope<Principal>>, ApiError> {
    let user = require_principal(&state, &claims)?;

    // Principal's Serialize impl already hides hash, reset token, and the
    // deleted flag.
    Ok(ok(messages::USER_GET_SUCC, user))
}

/// The authenticated services re-check that the claims still resolve to a
/// stored principal before acting, a second read after the gate's.
pub(crate) fn require_principal(state: &AppState, claims: &Claims) -> Result<Principal, ApiError> {
    state
        .users
        .find_by_id(&claims.sub)?
        .ok_or_else(|| ApiError::NotFound(messages::USER_DOES_NOT_FOUND.to_string()))
}
