use clap::Parser;
use firebender2itp::{build_router, AppState, ProxyConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "firebender2itp",
    about = "Protocol-translation proxy from the Firebender message API to an OpenAI-style backend",
    version
)]
struct Cli {
    /// Path to config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "firebender2itp=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = ProxyConfig::find_and_load(cli.config.as_deref())?;

    if let Some(port) = cli.port {
        config.port = port;
    }

    // Validate config eagerly
    let base_url = config.effective_base_url()?;
    let _api_key = config.resolve_api_key()?;

    let models = config.model_table();

    info!("firebender2itp v{}", env!("CARGO_PKG_VERSION"));
    info!("  Backend:    {}", base_url);
    info!("  Base model: {}", models.base_model());
    info!("  Models:     {} mapped", models.len());
    info!("  Port:       {}", config.port);

    let client = reqwest::Client::builder()
        .timeout(firebender2itp::relay::REQUEST_TIMEOUT)
        .build()?;

    let state = Arc::new(AppState {
        config: config.clone(),
        models,
        client,
    });

    let app = build_router(state);
    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
