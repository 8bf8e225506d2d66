use quiz_server::{AppState, ServerConfig, create_router};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quiz_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let app = create_router(AppState::new());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("quiz service listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
