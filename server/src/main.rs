use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use employee_api::{AppConfig, AppState, ServeConfig, http, migrate, seed};
use migration::{Migrator, MigratorTrait};
use platform_db::{DbPool, SeaEmployeeRepository, connect};
use platform_obs::{ObsConfig, init_tracing, shutdown_tracing};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "employee-api", version, about = "Employee directory API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server.
    Serve(ServeCommand),
    /// Run database migrations.
    #[command(subcommand)]
    Migrate(MigrateCommand),
    /// Insert demo employees into an empty table.
    Seed,
}

#[derive(Subcommand, Debug)]
enum MigrateCommand {
    /// Apply pending migrations.
    Up,
    /// Rollback the most recent migration.
    Down,
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, env = "API_HOST", default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, env = "API_PORT", default_value_t = 9000)]
    port: u16,
    #[arg(long, help = "Allow starting even when migrations are pending")]
    allow_dirty: bool,
}

impl From<&ServeCommand> for ServeConfig {
    fn from(value: &ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(ObsConfig::for_service("employee-api"))?;
    let cli = Cli::parse();
    let config = Arc::new(AppConfig::load()?);
    let outcome = match cli.command {
        Command::Serve(cmd) => run_server(cmd, config).await,
        Command::Migrate(MigrateCommand::Up) => migrate_up(&config).await,
        Command::Migrate(MigrateCommand::Down) => migrate_down(&config).await,
        Command::Seed => run_seed(&config).await,
    };
    shutdown_tracing();
    outcome
}

async fn setup_pool(config: &AppConfig) -> Result<DbPool> {
    connect(&config.database).await.map_err(Into::into)
}

async fn run_server(cmd: ServeCommand, config: Arc<AppConfig>) -> Result<()> {
    let pool = setup_pool(&config).await?;
    migrate::ensure_migrations(&pool, cmd.allow_dirty).await?;
    let state = AppState::new(pool, config);
    http::serve((&cmd).into(), state).await
}

async fn run_seed(config: &AppConfig) -> Result<()> {
    let pool = setup_pool(config).await?;
    let repo = SeaEmployeeRepository::new(pool);
    let inserted = seed::seed_demo_employees(&repo).await?;
    info!(inserted, "seed finished");
    Ok(())
}

async fn migrate_up(config: &AppConfig) -> Result<()> {
    let pool = setup_pool(config).await?;
    Migrator::up(&pool, None).await?;
    info!("database migrations applied");
    Ok(())
}

async fn migrate_down(config: &AppConfig) -> Result<()> {
    let pool = setup_pool(config).await?;
    Migrator::down(&pool, Some(1)).await?;
    info!("most recent migration rolled back");
    Ok(())
}
