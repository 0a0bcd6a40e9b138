use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};

/// Command-line arguments for the Rengøring binary.
#[derive(Debug, Parser)]
#[command(
    name = "rengoring",
    version,
    about = "Privat Rengøring marketplace API server"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "RENGORING_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the HTTP API.
    Serve(Box<ServeArgs>),
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    /// Override the listener host.
    #[arg(long = "server-host", value_name = "HOST")]
    pub server_host: Option<String>,

    /// Override the listener port.
    #[arg(long = "server-port", value_name = "PORT")]
    pub server_port: Option<u16>,

    /// Override the graceful shutdown timeout.
    #[arg(long = "server-graceful-shutdown-seconds", value_name = "SECONDS")]
    pub server_graceful_shutdown_seconds: Option<u64>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Override the HS256 secret used to verify bearer tokens.
    #[arg(long = "jwt-secret", env = "RENGORING_JWT_SECRET", value_name = "SECRET")]
    pub jwt_secret: Option<String>,

    #[arg(long = "jwt-leeway-seconds", value_name = "SECONDS")]
    pub jwt_leeway_seconds: Option<u64>,

    /// Override the API rate limit window size.
    #[arg(long = "api-rate-limit-window-seconds", value_name = "SECONDS")]
    pub api_rate_limit_window_seconds: Option<u64>,

    /// Override the API rate limit request ceiling.
    #[arg(long = "api-rate-limit-max-requests", value_name = "COUNT")]
    pub api_rate_limit_max_requests: Option<u64>,

    /// Start with the mock users and posts loaded.
    #[arg(
        long = "seed-mock-data",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub seed_mock_data: Option<bool>,
}
