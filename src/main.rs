//! Chinese-language current-weather MCP server.
//!
//! Exposes one tool, `get_current_weather`, which queries OpenWeatherMap and
//! returns a fixed set of localized fields. Served over stdio or stateless
//! HTTP; see `zh-weather-mcp --help`.

use anyhow::Result;
use clap::Parser;

mod cli;
mod config;
mod error;
mod http;
mod identity;
mod logging;
mod lookup;
mod model;
mod provider;
mod server;
#[cfg(test)]
mod testutils;

#[tokio::main]
async fn main() -> Result<()> {
    cli::Cli::parse().run().await
}
