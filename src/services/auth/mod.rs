pub mod auth_service;
pub mod context;
pub mod factory;
pub mod failure;
pub mod jwt;
pub mod password;
pub mod principal;
pub mod role;

pub use auth_service::AuthService;
pub use context::{AuthCtx, Principal};
pub use factory::build_auth_service;
pub use failure::AuthFailure;
