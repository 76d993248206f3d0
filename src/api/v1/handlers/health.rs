/*
 * Responsibility
 * - GET /common/health (liveness; no authentication, no database)
 */
pub async fn health() -> &'static str {
    "OK"
}
