use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use inquire::{Select, Text};
use tower_http::trace::TraceLayer;
use tracing::info;
use weather_core::{Config, LogLevel, Mode, Units, WeatherSource, upstream_from_config};
use weather_server::{AppState, Server, create_router, shutdown_signal, telemetry};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather lookup service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server.
    Serve(ServeArgs),

    /// Fetch current weather for a city from the upstream provider.
    Show {
        /// City name, e.g. "Kaneohe".
        city: String,

        /// metric, imperial or standard; defaults to the configured units.
        #[arg(long)]
        units: Option<Units>,
    },

    /// Interactively write the config file.
    Configure,
}

/// Flags override the config file.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// proxy or store.
    #[arg(long)]
    pub mode: Option<Mode>,

    /// Listening port (default 9010 in proxy mode, 9000 in store mode).
    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long)]
    pub host: Option<String>,

    /// Unit system for requests without a `units` parameter.
    #[arg(long)]
    pub units: Option<Units>,

    /// verbose or quiet.
    #[arg(long)]
    pub log: Option<LogLevel>,

    /// Environment variable holding the upstream API key.
    #[arg(long)]
    pub api_key_env: Option<String>,
}

impl ServeArgs {
    fn apply(self, config: &mut Config) {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(port) = self.port {
            config.port = Some(port);
        }
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(units) = self.units {
            config.units = units;
        }
        if let Some(log) = self.log {
            config.log = log;
        }
        if let Some(api_key_env) = self.api_key_env {
            config.api_key_env = api_key_env;
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve(args) => serve(args).await,
            Command::Show { city, units } => show(&city, units).await,
            Command::Configure => configure(),
        }
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    args.apply(&mut config);

    telemetry::init(config.log);

    let state = AppState::from_config(&config).context("Invalid server configuration")?;
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr = config.listen_addr();
    let grace = Duration::from_secs(config.shutdown_grace_secs);
    let server = Server::bind(&addr, app, grace)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    let local_addr = server.local_addr()?;
    info!(
        mode = %config.mode,
        units = %config.units,
        addr = %local_addr,
        "weather service listening"
    );

    let handle = server.handle();
    tokio::spawn(async move {
        shutdown_signal().await;
        handle.shutdown();
    });

    server.run().await?;
    Ok(())
}

async fn show(city: &str, units: Option<Units>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let client = upstream_from_config(&config)?;
    let units = units.unwrap_or(config.units);

    let record = client
        .fetch_weather(city, units)
        .await
        .with_context(|| format!("Unable to locate city '{city}'"))?;

    println!(
        "{}: {} ({}), {:.1}{}",
        record.city,
        record.condition,
        record.description,
        record.temperature,
        record.units.symbol()
    );

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let modes = vec![Mode::Proxy, Mode::Store];
    let cursor = modes.iter().position(|m| *m == config.mode).unwrap_or(0);
    config.mode = Select::new("Serve mode:", modes).with_starting_cursor(cursor).prompt()?;

    let units = Units::all().to_vec();
    let cursor = units.iter().position(|u| *u == config.units).unwrap_or(0);
    config.units = Select::new("Default units:", units).with_starting_cursor(cursor).prompt()?;

    let api_key_env = Text::new("Environment variable holding the API key:")
        .with_default(&config.api_key_env)
        .prompt()?;
    config.api_key_env = api_key_env;

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}
