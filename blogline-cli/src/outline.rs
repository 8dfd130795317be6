use std::io::Write;

use blogline_core::{outline_prompt, CompletionClient};
use clap::Parser;
use tracing::instrument;

use crate::endpoint::EndpointArgs;

/// Generate a single outline and print it to stdout
#[derive(Parser, Clone, Debug, PartialEq)]
pub struct OutlineArgs {
    /// What the blog post is about
    #[arg(default_value = "")]
    topic: String,
    /// Print the formatted prompt to stderr before sending it
    #[arg(long)]
    show_prompt: bool,
    #[command(flatten)]
    endpoint: EndpointArgs,
}

#[instrument(skip(args), fields(topic = %args.topic))]
pub async fn run(args: OutlineArgs) -> anyhow::Result<()> {
    let client = CompletionClient::new(args.endpoint.into())?;
    let prompt = outline_prompt(&args.topic);

    if args.show_prompt {
        eprintln!("{prompt}");
    }

    let output = client.complete(&prompt).await?;

    write_output(std::io::stdout().lock(), &output)?;

    Ok(())
}

/// Writes the completion exactly as received.
fn write_output(mut writer: impl Write, output: &str) -> std::io::Result<()> {
    writer.write_all(output.as_bytes())?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parser_is_valid() {
        OutlineArgs::command().debug_assert();
    }

    #[test]
    fn output_is_written_unmodified() {
        for output in ["no trailing newline", "ends with one\n", "\n\nleading\n\n"] {
            let mut written = Vec::new();
            write_output(&mut written, output).unwrap();
            assert_eq!(written, output.as_bytes());
        }
    }

    #[test]
    fn topic_may_be_omitted() {
        let args = OutlineArgs::try_parse_from(["outline"]).unwrap();
        assert_eq!(args.topic, "");
        assert_eq!(args.endpoint, EndpointArgs::default());
    }

    #[test]
    fn endpoint_flags_are_accepted() {
        let args = OutlineArgs::try_parse_from([
            "outline",
            "vector databases",
            "--base-url",
            "http://10.0.0.5:8000/v1",
            "--max-tokens",
            "512",
        ])
        .unwrap();
        assert_eq!(args.topic, "vector databases");
        assert_eq!(args.endpoint.base_url.as_str(), "http://10.0.0.5:8000/v1");
        assert_eq!(args.endpoint.max_tokens, 512);
    }
}
