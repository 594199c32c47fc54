use linneo::config::{Config, StoreKind, USAGE};
use linneo::plants::routes;
use linneo::plants::service::PlantService;
use linneo::store::client::DocumentStore;
use linneo::store::elastic::ElasticStore;
use linneo::store::memory::MemoryStore;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = Config::load(&args)?;

    // 1. Store client:
    let store: Arc<dyn DocumentStore> = match config.store {
        StoreKind::Elastic => {
            tracing::info!("Using Elasticsearch store at {}", config.store_url);
            Arc::new(ElasticStore::new(&config.store_url, config.store_timeout)?)
        }
        StoreKind::Memory => {
            tracing::info!("Using in-memory store");
            let memory = MemoryStore::new();
            memory.create_index(&config.index);
            Arc::new(memory)
        }
    };

    // 2. Service and HTTP router:
    let service = Arc::new(PlantService::new(store, &config.index, config.store_timeout));
    let app = routes::router(service);

    // 3. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
