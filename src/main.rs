use push_relay::handlers::build_router;
use push_relay::{AppState, Config};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if config.requires_signature() {
        info!("Signature verification enabled");
    } else {
        info!("No GITHUB_SECRET set; accepting unsigned deliveries");
    }
    info!("Repos root: {}", config.repos_root.display());
    info!("Webhook path: {}", config.webhook_path);

    let bind_address = config.bind_address.clone();
    let state = Arc::new(AppState { config });
    let app = build_router(state);

    info!("Listening on {}", bind_address);
    let listener = tokio::net::TcpListener::bind(bind_address).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
