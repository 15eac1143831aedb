//! Core application

use std::sync::Arc;

use anyhow::Result;

use crate::api::ApiServer;
use crate::core::banner;
use crate::core::cli::{self, CliConfig};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::core::shutdown::ShutdownService;
use crate::data::LqlClient;
use crate::domain::{QueryService, TableRegistry};

pub struct CoreApp {
    pub shutdown: ShutdownService,
    pub config: AppConfig,
    pub registry: Arc<TableRegistry>,
    pub service: QueryService,
}

impl CoreApp {
    /// Run the gateway with CLI argument parsing.
    ///
    /// The host process supplies the LQL client; everything else comes from
    /// the command line, environment and config files.
    pub async fn run(client: Arc<dyn LqlClient>) -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let cli_config = cli::parse();
        let app = Self::init(&cli_config, client)?;
        Self::start_server(app).await
    }

    /// Build the application from already-parsed CLI settings
    pub fn init(cli: &CliConfig, client: Arc<dyn LqlClient>) -> Result<Self> {
        let config = AppConfig::load(cli)?;
        let registry = Arc::new(
            TableRegistry::builtin().overlay(&config.tables.columns, &config.tables.filters),
        );
        let mut presets: Vec<&str> = registry.preset_names().collect();
        presets.sort_unstable();
        tracing::debug!(
            tables = registry.table_count(),
            presets = ?presets,
            "Registry initialized"
        );

        let service = QueryService::new(registry.clone(), client);

        Ok(Self {
            shutdown: ShutdownService::new(),
            config,
            registry,
            service,
        })
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        // A host process may already own the global subscriber
        let _ = tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .try_init();
    }

    async fn start_server(app: Self) -> Result<()> {
        // Install signal handlers FIRST (before any blocking calls)
        app.shutdown.install_signal_handlers();

        banner::print_banner(
            &app.config.server.host,
            app.config.server.port,
            &app.config.auth.user_header,
            app.registry.table_count(),
            app.registry.preset_count(),
        );

        let server = ApiServer::new(app.config, app.service, app.shutdown);
        server.start().await?;

        tracing::info!("Shutdown complete");
        Ok(())
    }
}
