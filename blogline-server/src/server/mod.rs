use axum::{
    extract::FromRequest,
    response::IntoResponse,
    routing::{get, post, IntoMakeService},
    Router,
};
use blogline_core::{CompletionClient, CompletionSettings, PromptTemplate};
use bon::Builder;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, future::IntoFuture, net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::{instrument, Instrument, Level};
use utoipa::OpenApi;

use crate::{
    error::ErrorResponse,
    handlers::{self, outline::OutlineRequest, outline::OutlineResponse},
    Result,
};

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(crate::error::Error))]
pub struct Json<T>(pub T);

impl<T> IntoResponse for Json<T>
where
    axum::Json<T>: IntoResponse,
{
    fn into_response(self) -> axum::response::Response {
        axum::Json(self.0).into_response()
    }
}

#[derive(new, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub socket_addr: SocketAddr,
    #[serde(default)]
    pub completion: CompletionSettings,
}

#[derive(Builder)]
pub struct HttpServer {
    #[builder(into)]
    config: Arc<Config>,
    context: Arc<Context>,
}

/// Shared by every request. Nothing in here changes after startup.
#[derive(Debug)]
pub struct Context {
    pub template: PromptTemplate,
    pub client: CompletionClient,
}

impl Context {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            template: PromptTemplate::outline(),
            client: CompletionClient::new(config.completion.clone())?,
        })
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(handlers::outline::outline, handlers::health_check),
    components(schemas(OutlineRequest, OutlineResponse, ErrorResponse))
)]
pub struct ApiDoc;

pub fn router(context: Arc<Context>) -> Router {
    Router::new()
        .route(
            &ServiceRoutes::Index.to_string(),
            get(handlers::index::index).post(handlers::index::submit),
        )
        .route(
            &ServiceRoutes::Outline.to_string(),
            post(handlers::outline::outline),
        )
        .route(
            &ServiceRoutes::HealthCheck.to_string(),
            get(handlers::health_check),
        )
        .route(&ServiceRoutes::OpenApi.to_string(), get(openapi))
        .layer(TraceLayer::new_for_http())
        .with_state(context)
}

fn build_service(context: Arc<Context>) -> IntoMakeService<Router> {
    router(context).into_make_service()
}

#[instrument]
async fn openapi() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}

enum ServiceRoutes {
    Index,
    Outline,
    HealthCheck,
    OpenApi,
}

impl Display for ServiceRoutes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceRoutes::Index => write!(f, "/"),
            ServiceRoutes::Outline => write!(f, "/outline"),
            ServiceRoutes::HealthCheck => write!(f, "/health-check"),
            ServiceRoutes::OpenApi => write!(f, "/api-docs/openapi.json"),
        }
    }
}

impl HttpServer {
    pub async fn start(self) -> anyhow::Result<()> {
        let context = self.context;
        let socket_addr = self.config.socket_addr;

        let listener = tokio::net::TcpListener::bind(&socket_addr).await?;

        let server_span = tracing::span!(Level::INFO, "server span");
        tracing::info!(
            completions = %context.client.endpoint(),
            "starting server on http://{socket_addr}"
        );

        axum::serve(listener, build_service(context))
            .into_future()
            .instrument(server_span)
            .await?;

        tracing::info!("HTTP server shutdown");

        Ok(())
    }
}
