use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tournament_table::api::state::AppState;
use tournament_table::config::AppConfig;
use tournament_table::dom::Document;
use tournament_table::fetch::Loader;
use tournament_table::parse_duration;
use tournament_table::table::{initialize, RenderOutcome};

#[derive(Parser)]
#[command(name = "tournament-table")]
#[command(about = "Render regional tournament standings and groups as HTML")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the snapshot once and write the rendered page
    Render {
        /// URL or file path of the tournament data
        #[arg(long)]
        source: Option<String>,

        /// HTML template providing the surfaces
        #[arg(long)]
        template: Option<PathBuf>,

        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Delay before the first retry (e.g., "500ms", "1s")
        #[arg(long)]
        retry_delay: Option<String>,
    },

    /// Start the HTTP server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,

        /// URL or file path of the tournament data
        #[arg(long)]
        source: Option<String>,

        /// HTML template providing the surfaces
        #[arg(long)]
        template: Option<PathBuf>,

        /// Directory served for all other paths
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    init_tracing(&config.log_level, cli.json_logs);

    tracing::info!("Starting tournament-table v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Render {
            source,
            template,
            out,
            retry_delay,
        } => {
            if let Some(source) = source {
                config.loader.source = source;
            }
            if let Some(template) = template {
                config.page.template = Some(template);
            }
            if let Some(delay) = retry_delay {
                let delay = parse_duration(&delay)
                    .with_context(|| format!("Invalid --retry-delay: {}", delay))?;
                config.loader.retry_delay_ms = delay.as_millis() as u64;
            }
            config.validate()?;

            let loader = Loader::from_config(&config.loader_config())?;
            let mut doc = Document::from_template(config.page.template.as_deref())?;

            let handle = initialize(&mut doc, &loader).await;
            let html = doc.to_html();

            match &out {
                Some(path) => {
                    tokio::fs::write(path, &html)
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!("Wrote {} bytes to {}", html.len(), path.display());
                }
                None => println!("{}", html),
            }

            // The page is written either way; a failed load still exits non-zero.
            if let RenderOutcome::LoadFailed { detail, .. } = handle.outcome {
                anyhow::bail!("Tournament data could not be loaded: {}", detail);
            }
        }
        Commands::Serve {
            host,
            port,
            source,
            template,
            static_dir,
        } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(source) = source {
                config.loader.source = source;
            }
            if let Some(template) = template {
                config.page.template = Some(template);
            }
            if let Some(dir) = static_dir {
                config.server.static_dir = dir;
            }
            config.validate()?;

            // Relative file sources live next to the static assets.
            let mut loader_config = config.loader_config();
            loader_config.base_dir = Some(config.server.static_dir.clone());

            let loader = Loader::from_config(&loader_config)?;
            let template = Document::from_template(config.page.template.as_deref())?;

            let state = AppState {
                loader: Arc::new(loader),
                template: Arc::new(template),
                static_dir: Some(config.server.static_dir.clone()),
                cors_origin: config.server.cors_origin.clone(),
            };
            let app = tournament_table::api::build_router(state);
            let addr = format!("{}:{}", config.server.host, config.server.port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Tournament table: http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
