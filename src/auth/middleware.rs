//! Authentication Gate
//! Mission: resolve bearer tokens to principals before protected handlers run

use crate::api::AppState;
use crate::auth::models::{Claims, PrincipalType};
use crate::auth::user_store::UserStore;
use crate::error::ApiError;
use crate::messages;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::warn;

/// Per-request authentication gate for the protected route trees.
///
/// A request without a `Bearer` header passes through unauthenticated;
/// handlers that need a principal reject it themselves. When a token is
/// present it must verify, its claimed principal type must match the path
/// prefix, and the looked-up account must be neither deleted nor inactive.
/// Valid claims are attached to the request extensions. The gate holds no
/// state across requests.
pub async fn auth_gate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|t| t.to_string());

    let Some(token) = token else {
        // No bearer token: proceed unauthenticated.
        return Ok(next.run(req).await);
    };

    let claims = state.tokens.verify(&token)?;
    let principal = resolve_principal(&state.users, &claims, req.uri().path())?;

    if principal.is_deleted {
        warn!("Rejected deleted account {}", claims.sub);
        return Err(ApiError::Unauthorized(
            messages::MID_USER_ACC_DELETED.to_string(),
        ));
    }

    if !principal.is_active {
        warn!("Rejected inactive account {}", claims.sub);
        return Err(ApiError::Unauthorized(
            messages::MID_USER_ACC_INACTIVE.to_string(),
        ));
    }

    // Downstream handlers read the decoded claims, not a re-fetched record.
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Match the claimed principal type against the path prefix and look the
/// principal up. `Admin` tokens are only honored under `/admin/`, `user`
/// tokens only under `/users/`; every other combination is unresolvable and
/// reads as an invalid token.
fn resolve_principal(
    store: &UserStore,
    claims: &Claims,
    path: &str,
) -> Result<crate::auth::models::Principal, ApiError> {
    let resolvable = match claims.principal_type {
        PrincipalType::Admin => path.starts_with("/admin/"),
        PrincipalType::User => path.starts_with("/users/"),
    };

    if !resolvable {
        return Err(ApiError::InvalidToken);
    }

    store.find_by_id(&claims.sub)?.ok_or(ApiError::InvalidToken)
}

/// Extractor for handlers that require an authenticated principal. Pulls
/// the claims the gate attached; absent claims mean the request arrived
/// without a token.
#[async_trait]
impl<S> FromRequestParts<S> for Claims
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized(messages::AUTH_REQUIRED.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::{NewPrincipal, Role};
    use tempfile::NamedTempFile;

    fn store_with_user() -> (UserStore, NamedTempFile, String) {
        let temp = NamedTempFile::new().unwrap();
        let store = UserStore::new(temp.path().to_str().unwrap()).unwrap();
        let user = store
            .create(NewPrincipal {
                first_name: "Jo".into(),
                last_name: "Dev".into(),
                email: "jo@example.com".into(),
                country_code: None,
                phone_number: None,
                address: None,
                password_hash: "hash".into(),
                role: Role::User,
            })
            .unwrap();
        let id = user.id;
        (store, temp, id)
    }

    fn claims(sub: &str, principal_type: PrincipalType) -> Claims {
        Claims {
            sub: sub.to_string(),
            email: "jo@example.com".to_string(),
            role: Role::User,
            principal_type,
            exp: 4_000_000_000,
        }
    }

    #[test]
    fn test_user_token_resolves_under_users_prefix() {
        let (store, _temp, id) = store_with_user();
        let resolved =
            resolve_principal(&store, &claims(&id, PrincipalType::User), "/users/view").unwrap();
        assert_eq!(resolved.id, id);
    }

    #[test]
    fn test_user_token_rejected_under_admin_prefix() {
        let (store, _temp, id) = store_with_user();
        let err = resolve_principal(&store, &claims(&id, PrincipalType::User), "/admin/anything")
            .unwrap_err();
        assert_eq!(err, ApiError::InvalidToken);
    }

    #[test]
    fn test_admin_token_rejected_under_users_prefix() {
        let (store, _temp, id) = store_with_user();
        let err = resolve_principal(&store, &claims(&id, PrincipalType::Admin), "/users/view")
            .unwrap_err();
        assert_eq!(err, ApiError::InvalidToken);
    }

    #[test]
    fn test_unknown_principal_is_invalid_token() {
        let (store, _temp, _id) = store_with_user();
        let err = resolve_principal(
            &store,
            &claims("missing-id", PrincipalType::User),
            "/users/view",
        )
        .unwrap_err();
        assert_eq!(err, ApiError::InvalidToken);
    }
}
