pub mod completion;
mod error;
pub mod prompt;

pub use completion::{CompletionClient, CompletionSettings};
pub use error::{Error, Result};
pub use prompt::{outline_prompt, PromptTemplate};
