use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use std::{path::PathBuf, sync::Arc};
use weather_core::{Config, ForecastResolver, HttpUpstreamClient};

use crate::routes::{AppState, router};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Forecast summary proxy for api.weather.gov")]
pub struct Cli {
    /// Path to the TOML config file; defaults to the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// Address to bind, overrides `server.bind_address`.
        #[arg(long)]
        bind: Option<String>,

        /// Port to listen on, overrides `server.port`.
        #[arg(long)]
        port: Option<u16>,
    },

    /// Write a config file with default values.
    InitConfig {
        /// Replace an existing file.
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let command = self.command.unwrap_or(Command::Serve {
            bind: None,
            port: None,
        });

        match command {
            Command::Serve { bind, port } => {
                let mut config = Config::load(self.config.as_deref())?;
                if let Some(bind) = bind {
                    config.server.bind_address = bind;
                }
                if let Some(port) = port {
                    config.server.port = port;
                }
                serve(config).await
            }
            Command::InitConfig { force } => {
                let path = match self.config {
                    Some(path) => path,
                    None => Config::config_file_path()?,
                };
                if path.exists() && !force {
                    bail!(
                        "Config file already exists: {}\n\
                         Hint: pass --force to overwrite it.",
                        path.display()
                    );
                }

                Config::default().save(&path)?;
                println!("Wrote default configuration to {}", path.display());
                Ok(())
            }
        }
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let client = HttpUpstreamClient::new(&config.upstream)?;
    let state = AppState {
        resolver: Arc::new(ForecastResolver::new(Arc::new(client))),
    };

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!(%addr, "starting weather server");
    axum::serve(listener, router(state))
        .await
        .context("HTTP server terminated unexpectedly")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::parse_from(["weather-server"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn serve_overrides_parse() {
        let cli = Cli::parse_from([
            "weather-server",
            "--config",
            "/tmp/weather.toml",
            "serve",
            "--bind",
            "127.0.0.1",
            "--port",
            "8080",
        ]);

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/weather.toml")));
        match cli.command {
            Some(Command::Serve { bind, port }) => {
                assert_eq!(bind.as_deref(), Some("127.0.0.1"));
                assert_eq!(port, Some(8080));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn port_must_be_numeric() {
        let res = Cli::try_parse_from(["weather-server", "serve", "--port", "http"]);
        assert!(res.is_err());
    }

    #[tokio::test]
    async fn init_config_writes_defaults_and_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let path_arg = path.to_str().unwrap();

        Cli::parse_from(["weather-server", "--config", path_arg, "init-config"])
            .run()
            .await
            .unwrap();
        assert_eq!(Config::load(Some(&path)).unwrap(), Config::default());

        let err = Cli::parse_from(["weather-server", "--config", path_arg, "init-config"])
            .run()
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));

        Cli::parse_from(["weather-server", "--config", path_arg, "init-config", "--force"])
            .run()
            .await
            .unwrap();
    }
}
