use std::{str::FromStr, time::Duration};

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

const IN_MEMORY_PREFIX: &str = "sqlite::memory:";

/// Opens a pool against `database_url` with foreign keys enforced.
///
/// An in-memory database lives only as long as its connection, so for
/// `sqlite::memory:` the pool holds exactly one connection that never expires.
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    prepare_sqlite_file(database_url)?;
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("invalid database url `{database_url}`"))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if database_url.starts_with(IN_MEMORY_PREFIX) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    let pool = pool_options.connect_with(options).await?;
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!().run(pool).await.context("running migrations")?;
    Ok(())
}

/// Creates the parent directory of a file-backed database.
fn prepare_sqlite_file(database_url: &str) -> Result<()> {
    if database_url.starts_with(IN_MEMORY_PREFIX) { return Ok(()); }
    let Some(path) = database_url.strip_prefix("sqlite://").or_else(|| database_url.strip_prefix("sqlite:")) else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or(path);
    // On Windows, absolute paths may look like /C:/path; strip the leading slash
    let path = if cfg!(windows) && path.len() >= 3 && path.as_bytes()[0] == b'/' && path.as_bytes()[2] == b':' {
        &path[1..]
    } else {
        path
    };
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}
