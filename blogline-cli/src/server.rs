use std::{
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
};

use blogline_server::Config;
use tracing::instrument;

use clap::Parser;

use crate::endpoint::EndpointArgs;

const DEFAULT_HOST_ADDR: &str = "::1";
const DEFAULT_HOST_PORT: u16 = 8080;
const DEFAULT_CONFIG_DIR: &str = "./configs/server/";

#[derive(Parser, Clone, Debug, PartialEq)]
pub struct ServerArgs {
    #[arg(long, default_value = DEFAULT_HOST_ADDR)]
    ip: String,
    #[arg(long, default_value_t = DEFAULT_HOST_PORT)]
    port: u16,
    #[command(flatten)]
    endpoint: EndpointArgs,
    /// Where server configs are stored
    #[arg(long, default_value = DEFAULT_CONFIG_DIR)]
    config_dir: PathBuf,
    /// An optional name of this config to save to [`ServerArgs::config_dir`]
    #[arg(long)]
    save_config: Option<String>,
}

impl Default for ServerArgs {
    fn default() -> Self {
        Self {
            ip: DEFAULT_HOST_ADDR.to_string(),
            port: DEFAULT_HOST_PORT,
            endpoint: EndpointArgs::default(),
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            save_config: None,
        }
    }
}

impl TryFrom<ServerArgs> for Config {
    type Error = anyhow::Error;

    fn try_from(value: ServerArgs) -> anyhow::Result<Self> {
        let ServerArgs {
            ip, port, endpoint, ..
        } = value;

        let address: IpAddr = ip.parse()?;
        let full_address = SocketAddr::new(address, port);
        Ok(Config::new(full_address, endpoint.into()))
    }
}

pub async fn run(args: ServerArgs) -> anyhow::Result<()> {
    if let Some(ref name) = args.save_config {
        tracing::info!(name, "saving config");
        let path = save_config(name, args.clone()).await?;
        tracing::info!(?path, "config saved");
    }

    let config = args.try_into()?;

    tracing::info!(?config, "starting server");
    blogline_server::run_server(config).await?;

    Ok(())
}

#[instrument]
async fn save_config(name: &str, args: ServerArgs) -> anyhow::Result<PathBuf> {
    if !args.config_dir.exists() {
        std::fs::create_dir_all(&args.config_dir)?;
    }
    let filename = format!("{name}.toml");
    let path = args.config_dir.join(filename);

    let config: Config = args.clone().try_into()?;

    let contents = toml::to_string(&config)?;
    tokio::fs::write(&path, contents).await?;

    Ok(path)
}

pub async fn load_config(path: impl AsRef<Path>) -> anyhow::Result<Config> {
    let path = path.as_ref();
    tracing::info!(?path, "loading config");
    let contents = tokio::fs::read_to_string(path).await?;
    Ok(toml::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogline_core::CompletionSettings;
    use clap::CommandFactory;

    #[test]
    fn cli_parser_is_valid() {
        ServerArgs::command().debug_assert();
    }

    #[test]
    fn default_config_works() {
        let default_args = ServerArgs::default();
        let config: Config = default_args
            .try_into()
            .expect("server Config should work with default args");
        assert_eq!(config.socket_addr, "[::1]:8080".parse().unwrap());
        assert_eq!(config.completion, CompletionSettings::default());
    }

    #[test]
    fn empty_command_line_matches_default() {
        let args = ServerArgs::try_parse_from(["server"]).unwrap();
        assert_eq!(args, ServerArgs::default());
    }

    #[test]
    fn bad_ip_is_rejected() {
        let args = ServerArgs::try_parse_from(["server", "--ip", "localhost"]).unwrap();
        let config: anyhow::Result<Config> = args.try_into();
        assert!(config.is_err());
    }

    #[tokio::test]
    async fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join("server");
        let args = ServerArgs::try_parse_from([
            "server",
            "--ip",
            "127.0.0.1",
            "--port",
            "3000",
            "--base-url",
            "http://127.0.0.1:1234/v1",
            "--model",
            "llama-3",
            "--config-dir",
            config_dir.to_str().unwrap(),
        ])
        .unwrap();

        let path = save_config("local", args.clone()).await.unwrap();
        assert_eq!(path, config_dir.join("local.toml"));

        let loaded = load_config(&path).await.unwrap();
        let expected: Config = args.try_into().unwrap();
        assert_eq!(loaded, expected);
        assert_eq!(loaded.completion.model, "llama-3");
    }
}
