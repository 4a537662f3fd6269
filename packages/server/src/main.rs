use paddock_server::config::AppConfig;
use paddock_server::database::init_db;
use paddock_server::mail::build_mailer;
use paddock_server::state::AppState;
use paddock_server::{build_router, seed};
use tracing::{Level, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = init_db(&config.database.url).await?;
    info!("Database schema synchronized");

    seed::ensure_indexes(&db).await?;
    seed::seed_bootstrap_admin(&db, &config.bootstrap).await?;

    let mailer = build_mailer(&config.mail)?;
    if !config.mail.enabled {
        info!("Mail delivery disabled, outgoing mail will only be logged");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(db, config, mailer);
    let app = build_router(state);

    info!("Server running at http://{}", addr);
    info!("Swagger UI at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
