use tracing::instrument;

pub mod index;
pub mod outline;

#[utoipa::path(get, path = "/health-check", responses((status = 200, body = String)))]
#[instrument]
pub async fn health_check() -> &'static str {
    tracing::debug!("health checked");
    "OK"
}
