use std::sync::Arc;

use askama::Template;
use axum::{extract::State, http::StatusCode, response::Html, Form};
use serde::Deserialize;
use tracing::instrument;

use super::outline::run_outline;
use crate::error::Result;
use crate::server::Context;

pub const TITLE: &str = "Blog Outline Generator";

#[derive(Template, Debug, Default)]
#[template(path = "index.html")]
struct OutlinePage {
    title: &'static str,
    topic: String,
    output: Option<String>,
    error: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct OutlineForm {
    #[serde(default)]
    topic: String,
}

#[instrument]
pub async fn index() -> Result<Html<String>> {
    let page = OutlinePage {
        title: TITLE,
        ..Default::default()
    };

    Ok(Html(page.render()?))
}

/// Form submission. Endpoint failures are shown on the page instead of
/// replacing it.
#[instrument(skip(context))]
pub async fn submit(
    State(context): State<Arc<Context>>,
    Form(form): Form<OutlineForm>,
) -> Result<(StatusCode, Html<String>)> {
    let (status, page) = match run_outline(&context, form.topic.clone()).await {
        Ok(response) => (
            StatusCode::OK,
            OutlinePage {
                title: TITLE,
                topic: response.topic,
                output: Some(response.output),
                error: None,
            },
        ),
        Err(err) => {
            tracing::error!(%err, "outline failed");
            (
                err.status(),
                OutlinePage {
                    title: TITLE,
                    topic: form.topic,
                    output: None,
                    error: Some(err.to_string()),
                },
            )
        }
    };

    Ok((status, Html(page.render()?)))
}
