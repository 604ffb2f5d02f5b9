//! Authentication Module
//! Mission: credential storage, token issue/verify, and the request gate

pub mod jwt;
pub mod middleware;
pub mod models;
pub mod user_store;

pub use jwt::TokenService;
pub use middleware::auth_gate;
pub use models::{Claims, Principal, PrincipalType, Role};
pub use user_store::UserStore;
