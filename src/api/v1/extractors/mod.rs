mod auth_ctx;
mod rejection;

pub use auth_ctx::AuthCtxExtractor;
pub use rejection::{AppJson, AppPath};
