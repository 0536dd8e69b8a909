use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use navigator_api::config::Config;
use navigator_api::db::create_pool;
use navigator_api::llm_client::LlmClient;
use navigator_api::reports::memory::InMemoryReportStore;
use navigator_api::reports::postgres::PgReportStore;
use navigator_api::reports::store::ReportStore;
use navigator_api::routes::build_router;
use navigator_api::service::CareerService;
use navigator_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("navigator_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career Navigator API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize report store
    let (store, store_backend): (Arc<dyn ReportStore>, &'static str) =
        match &config.database_url {
            Some(url) => {
                let pool = create_pool(url).await?;
                let store: Arc<dyn ReportStore> = Arc::new(PgReportStore::new(pool));
                (store, "postgres")
            }
            None => {
                info!("DATABASE_URL not set; reports will be kept in memory");
                let store: Arc<dyn ReportStore> = Arc::new(InMemoryReportStore::new());
                (store, "memory")
            }
        };

    // Initialize LLM client
    let llm = LlmClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        config.gemini_api_base.clone(),
    )?;
    info!("LLM client initialized (model: {})", llm.model());

    // Build app state
    let state = AppState {
        service: CareerService::new(Arc::new(llm), store),
        store_backend,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the web client's origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
