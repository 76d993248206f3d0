/*
 * Responsibility
 * - Router-level layers: authentication/authorization, HTTP plumbing, CORS, security headers
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
