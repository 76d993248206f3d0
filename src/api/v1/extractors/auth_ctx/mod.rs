/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - Hand the request-scoped AuthCtx to handlers
 * - Handlers then call the principal resolvers explicitly
 */

mod core;

pub use core::AuthCtxExtractor;
