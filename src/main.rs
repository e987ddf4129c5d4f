//! Trivia API server: reads config from the environment, prepares the database, serves the router.

use tokio::net::TcpListener;
use trivia_api::telemetry::init_tracing;
use trivia_api::{
    app, apply_migrations, ensure_database_exists, seed_categories, AppState, PgStore, TriviaConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = TriviaConfig::from_env()?;
    tracing::info!(?config, "starting");

    if config.create_database {
        ensure_database_exists(&config.database).await?;
    }
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(config.database.clone())
        .await?;

    apply_migrations(&pool).await?;
    if config.seed_categories {
        let inserted = seed_categories(&pool).await?;
        if inserted > 0 {
            tracing::info!(inserted, "seeded default categories");
        }
    }

    let state = AppState::new(PgStore::new(pool));
    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
