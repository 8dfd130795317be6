use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unbalanced brace at byte {position} in prompt template")]
    TemplateSyntax { position: usize },
    #[error("template variables {found:?} do not match declared input variables {declared:?}")]
    TemplateVariables {
        declared: Vec<String>,
        found: Vec<String>,
    },
    #[error("no value given for template variable `{0}`")]
    MissingVariable(String),
    #[error("invalid completion endpoint URL: {0}")]
    BaseUrl(#[from] url::ParseError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("completion endpoint returned {status}: {body}")]
    Endpoint { status: StatusCode, body: String },
    #[error("completion endpoint returned no choices")]
    EmptyCompletion,
}
