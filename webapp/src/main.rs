use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use platform_obs::{ObsConfig, init_tracing, shutdown_tracing};
use webapp::{CustomProperties, http};

#[derive(Parser, Debug)]
#[command(name = "webapp", version, about = "Employee directory web front")]
struct Cli {
    #[arg(long, env = "WEBAPP_HOST", default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, env = "WEBAPP_PORT", default_value_t = 9001)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(ObsConfig::for_service("webapp"))?;
    let cli = Cli::parse();
    let properties = Arc::new(CustomProperties::from_env()?);
    let outcome = http::serve(cli.host, cli.port, http::AppState::new(properties)).await;
    shutdown_tracing();
    outcome
}
