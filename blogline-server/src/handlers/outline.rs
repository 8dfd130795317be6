use std::{collections::HashMap, sync::Arc};

use axum::extract::State;
use blogline_core::prompt::TOPIC_VARIABLE;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::error::{ErrorResponse, Result};
use crate::server::{Context, Json};

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct OutlineRequest {
    /// What the blog post is about. May be empty.
    #[serde(default)]
    pub topic: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct OutlineResponse {
    pub topic: String,
    /// The exact prompt sent to the completion endpoint.
    pub prompt: String,
    /// The completion text, unmodified.
    pub output: String,
}

#[utoipa::path(
    post,
    path = "/outline",
    request_body = OutlineRequest,
    responses(
        (status = 200, body = OutlineResponse),
        (status = 502, description = "the completion endpoint failed", body = ErrorResponse),
    )
)]
#[instrument(skip(context))]
pub async fn outline(
    State(context): State<Arc<Context>>,
    Json(payload): Json<OutlineRequest>,
) -> Result<Json<OutlineResponse>> {
    let response = run_outline(&context, payload.topic).await?;

    Ok(Json(response))
}

#[instrument(skip(context))]
pub(crate) async fn run_outline(context: &Context, topic: String) -> Result<OutlineResponse> {
    let values = HashMap::from([(TOPIC_VARIABLE, topic.as_str())]);
    let prompt = context.template.format(&values)?;

    let output = context.client.complete(&prompt).await?;
    let response = OutlineResponse {
        topic,
        prompt,
        output,
    };

    tracing::info!(output_len = response.output.len(), "outline generated");
    tracing::trace!(?response);

    Ok(response)
}
