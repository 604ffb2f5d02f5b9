//! Application Configuration
//! Mission: load every environment knob once, pass it in explicitly

use std::env;
use tracing::warn;

/// Configuration loaded once at startup. Business logic never reads the
/// process environment directly; it receives the relevant fields from here.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database_path: String,
    pub jwt_secret: String,
    pub jwt_expiry_secs: i64,
    pub bcrypt_cost: u32,
    pub admin_email: String,
    pub admin_password: String,
    pub admin_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let jwt_secret = env::var("JWT_TOKEN_SECRET").unwrap_or_else(|_| {
            warn!("⚠️  JWT_TOKEN_SECRET not set - using insecure development secret");
            "taskpilot-dev-secret".to_string()
        });

        let jwt_expiry_secs = env::var("JWT_TOKEN_EXPIRY_TIME")
            .ok()
            .and_then(|v| parse_expiry(&v))
            .unwrap_or(24 * 3600);

        let bcrypt_cost = env::var("PASSWORD_SALT")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "taskpilot.db".to_string()),
            jwt_secret,
            jwt_expiry_secs,
            bcrypt_cost,
            admin_email: env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@taskpilot.dev".to_string()),
            admin_password: env::var("ADMIN_PASSWORD")
                .unwrap_or_else(|_| "Admin@123".to_string()),
            admin_url: env::var("ADMIN_URL")
                .unwrap_or_else(|_| "http://localhost:4200/".to_string()),
        }
    }
}

/// Accepts plain seconds ("3600") or a value with an `m`/`h`/`d` suffix
/// ("30m", "24h", "7d"), matching the expiry strings the deployment uses.
fn parse_expiry(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(secs) = raw.parse::<i64>() {
        return Some(secs);
    }
    let (unit_idx, unit) = raw.char_indices().last()?;
    let value = raw[..unit_idx].parse::<i64>().ok()?;
    match unit {
        'm' => Some(value * 60),
        'h' => Some(value * 3600),
        'd' => Some(value * 86400),
        _ => None,
    }
}
