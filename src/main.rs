use std::net::SocketAddr;
use std::sync::Arc;

use prompt_studio::gemini_client::GeminiClient;
use prompt_studio::thumbnail::ThumbnailFetcher;
use prompt_studio::{app, AppState, Orchestrator, StudioConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_logging()?;

    let config = match StudioConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    tracing::info!("Initializing Gemini client ({})...", config.gemini_model);
    let gemini = GeminiClient::with_endpoint(
        config.gemini_api_key.clone(),
        config.gemini_base_url.clone(),
        config.gemini_model.clone(),
    );
    let thumbnails = ThumbnailFetcher::new(
        config.thumbnail_base_url.clone(),
        config.thumbnail_proxy_url.clone(),
    );

    let orchestrator = Orchestrator::new(Arc::new(gemini), thumbnails);
    let shared_state = Arc::new(AppState::new(orchestrator, config.gemini_model.clone()));

    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(
        listener,
        app(shared_state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cfg!(debug_assertions) {
            "debug,prompt_studio=trace,reqwest=info,hyper=info,tower=info".to_string()
        } else {
            "info,prompt_studio=info,reqwest=warn,hyper=warn,tower=warn".to_string()
        }
    });

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&log_level))?;

    let fmt_layer = if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_target(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!("Prompt studio starting up...");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Build mode: {}", if cfg!(debug_assertions) { "development" } else { "production" });
    tracing::info!("Log level: {}", log_level);

    Ok(())
}
