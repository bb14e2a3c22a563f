use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use rmcp::{ServiceExt, transport::stdio};

use crate::{
    config::{DEFAULT_BASE_URL, WeatherConfig},
    http, logging,
    lookup::WeatherLookup,
    server::WeatherServer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    /// MCP over stdin/stdout.
    Stdio,
    /// Stateless MCP over HTTP at `POST /mcp`.
    Http,
}

/// Current-weather MCP server backed by OpenWeatherMap.
#[derive(Debug, Parser)]
#[command(name = "zh-weather-mcp", version, about)]
pub struct Cli {
    /// OpenWeatherMap API key. Lookups report an error while it is empty.
    #[arg(long, env = "WEATHER_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    /// Provider base URL; `/weather` is appended.
    #[arg(long, env = "WEATHER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, env = "WEATHER_TRANSPORT", value_enum, default_value_t = Transport::Http)]
    pub transport: Transport,

    /// Listen address for the HTTP transport.
    #[arg(long, env = "WEATHER_BIND", default_value = "0.0.0.0:8000")]
    pub bind: String,

    #[arg(long, env = "WEATHER_LOG_DIR", default_value = "./logs")]
    pub log_dir: PathBuf,
}

impl Cli {
    pub fn config(&self) -> WeatherConfig {
        WeatherConfig::new(self.api_key.clone(), self.base_url.clone())
    }

    pub async fn run(self) -> anyhow::Result<()> {
        logging::init(&self.log_dir)?;

        let config = self.config();
        config.log_summary();

        let server = WeatherServer::new(WeatherLookup::new(config));

        match self.transport {
            Transport::Stdio => {
                tracing::info!("Starting weather MCP server on stdio");
                let service = server.serve(stdio()).await.inspect_err(|e| {
                    tracing::error!("serving error: {:?}", e);
                })?;
                service.waiting().await?;
            }
            Transport::Http => {
                tracing::info!("Starting weather MCP server on http://{}/mcp", self.bind);
                http::serve(server, &self.bind).await?;
            }
        }

        tracing::info!("Weather MCP server stopped");
        Ok(())
    }
}
