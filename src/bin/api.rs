use veritas::{api, app_state::AppState, config::Config};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env().expect("Failed to load configuration");
    let state = AppState::new(&config);
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .expect("Failed to bind to address");
    tracing::info!(addr = %config.bind_addr(), "news credibility service listening");
    axum::serve(listener, app).await.unwrap();
}
