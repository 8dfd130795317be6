use std::{fmt::Display, path::PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use server::ServerArgs;
use tracing::Instrument;
use tracing_chrome::ChromeLayerBuilder;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod endpoint;
mod outline;
mod server;

const DEFAULT_LOG_ENV: &str = "blogline_server=debug,blogline_core=debug,tower_http=info";

#[derive(Parser)]
#[command(version, about = "Generate blog outlines with a local language model")]
struct Cli {
    /// Where traces go (`chrome` writes a trace-timestamp.json file).
    #[arg(long, default_value_t)]
    pub tracing: TracingArgs,
    #[command(subcommand)]
    runner: Runner,
}

#[derive(Subcommand)]
enum Runner {
    /// Serve the outline form
    Server(ServerArgs),
    /// Serve using a config saved with `server --save-config`
    ServerConfig {
        #[arg(long)]
        path: PathBuf,
    },
    Outline(outline::OutlineArgs),
}

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum TracingArgs {
    Chrome,
    #[default]
    Stdout,
    None,
}

impl Display for TracingArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TracingArgs::Chrome => write!(f, "chrome"),
            TracingArgs::Stdout => write!(f, "stdout"),
            TracingArgs::None => write!(f, "none"),
        }
    }
}

fn setup_tracing(tracing_args: TracingArgs) -> anyhow::Result<Option<Box<dyn Drop>>> {
    match tracing_args {
        TracingArgs::Chrome => {
            let (chrome_layer, guard) = ChromeLayerBuilder::new().build();
            tracing_subscriber::registry().with(chrome_layer).init();
            Ok(Some(Box::new(guard)))
        }
        TracingArgs::Stdout => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| DEFAULT_LOG_ENV.into()),
                )
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .init();

            tracing::info!("tracing started");

            Ok(None)
        }
        TracingArgs::None => Ok(None),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let _guard = setup_tracing(args.tracing)?;
    match args.runner {
        Runner::Server(args) => server::run(args).await,
        Runner::ServerConfig { path } => {
            let config = server::load_config(path).await?;
            let span = tracing::info_span!("run_server span");
            blogline_server::run_server(config).instrument(span).await
        }
        Runner::Outline(args) => outline::run(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parser_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn tracing_defaults_to_stdout() {
        let cli = Cli::try_parse_from(["blogline", "outline", "rust"]).unwrap();
        assert_eq!(cli.tracing, TracingArgs::Stdout);
        assert!(matches!(cli.runner, Runner::Outline(_)));
    }
}
