pub use error::{Error, Result};
pub use server::{router, ApiDoc, Config, Context, HttpServer};
use std::sync::Arc;
use tracing::instrument;

mod error;
mod handlers;
mod server;

#[instrument]
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let context = Context::new(&config)?;

    tracing::debug!(?context, "starting server with context");

    let server = HttpServer::builder()
        .config(config)
        .context(Arc::new(context))
        .build();

    server.start().await
}
