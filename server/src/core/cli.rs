use clap::Parser;

use std::path::PathBuf;

use super::constants::{ENV_CONFIG, ENV_DEBUG, ENV_HOST, ENV_PORT, ENV_USER_HEADER};

#[derive(Parser)]
#[command(name = "lqlgate")]
#[command(version, about = "REST gateway for LQL monitoring queries", long_about = None)]
pub struct Cli {
    /// Server host address
    #[arg(long, short = 'H', env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', env = ENV_PORT)]
    pub port: Option<u16>,

    /// Path to config file
    #[arg(long, short = 'c', env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Request header carrying the authenticated user name
    #[arg(long, env = ENV_USER_HEADER)]
    pub user_header: Option<String>,

    /// Enable debug mode (logs unmatched requests)
    #[arg(long, env = ENV_DEBUG)]
    pub debug: bool,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub config: Option<PathBuf>,
    pub user_header: Option<String>,
    pub debug: bool,
}

impl From<Cli> for CliConfig {
    fn from(cli: Cli) -> Self {
        Self {
            host: cli.host,
            port: cli.port,
            config: cli.config,
            user_header: cli.user_header,
            debug: cli.debug,
        }
    }
}

/// Parse CLI arguments
pub fn parse() -> CliConfig {
    Cli::parse().into()
}
