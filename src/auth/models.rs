//! Authentication Models
//! Mission: principal records, roles, and token claims

use serde::{Deserialize, Serialize};

/// A stored identity. Admins and regular users share this one record shape
/// (and one table); `role` tells them apart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country_code: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String, // bcrypt hash - never serialize
    pub role: Role,
    #[serde(skip_serializing)]
    pub reset_token: Option<String>,
    pub is_active: bool,
    #[serde(skip_serializing)]
    pub is_deleted: bool,
    pub created_date: String,
    pub updated_date: String,
}

/// Stored role of a principal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "USER")]
    User,
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ADMIN" => Some(Role::Admin),
            "USER" => Some(Role::User),
            _ => None,
        }
    }
}

/// Principal-type tag carried in the token. The gate matches this against
/// the request path prefix: `Admin` is only valid under `/admin/` and `User`
/// only under `/users/`. The wire casing is asymmetric by contract.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PrincipalType {
    #[serde(rename = "Admin")]
    Admin,
    #[serde(rename = "user")]
    User,
}

impl PrincipalType {
    pub fn as_str(&self) -> &str {
        match self {
            PrincipalType::Admin => "Admin",
            PrincipalType::User => "user",
        }
    }
}

/// JWT claims payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Principal id.
    pub sub: String,
    pub email: String,
    pub role: Role,
    #[serde(rename = "type")]
    pub principal_type: PrincipalType,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// New principal data handed to the store; the store fills in id, flags,
/// and timestamps.
#[derive(Debug, Clone)]
pub struct NewPrincipal {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country_code: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub password_hash: String,
    pub role: Role,
}

// ===== Request bodies =====

#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub first_name: String,
    pub last_name: String,
    pub country_code: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}
