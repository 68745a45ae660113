use anyhow::Context;
use todolist_api::{
    build_app,
    config::AppConfig,
    infrastructure::{
        db, seed,
        sqlite_repo::{SqliteCategoryRepository, SqliteTodoItemRepository},
    },
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(database_url = %config.database_url, environment = ?config.environment, "starting");

    let pool = db::connect(&config.database_url).await?;
    db::migrate(&pool).await?;
    if config.seed_data {
        seed::seed_if_empty(&SqliteCategoryRepository::new(pool.clone()), &SqliteTodoItemRepository::new(pool.clone()))
            .await
            .context("seeding sample data")?;
    }

    let router = build_app(pool.clone(), config.environment);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}
