mod app;
mod auth;
mod config;
mod profiles;
mod state;
mod validation;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "profilehub=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = state::AppState::init().await?;
    // schema must exist before the first request
    app_state.migrate().await?;
    tracing::info!(
        scheme = ?app_state.config.password_scheme,
        "database ready"
    );

    let addr = app_state.config.server.bind_addr()?;
    app::serve(app::build_app(app_state), addr).await
}
