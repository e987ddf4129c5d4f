//! Database bootstrap: create the database, the two tables, and optionally the default categories.
//! Every step is idempotent so the server can run it on each start.

use crate::error::StoreError;
use crate::model::DEFAULT_CATEGORIES;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{ConnectOptions, PgPool};

const CATEGORIES_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS categories (
        id BIGSERIAL PRIMARY KEY,
        type TEXT NOT NULL CHECK (type <> '')
    )
"#;

// category is a plain column: questions may reference ids that are not (or no longer) in categories.
const QUESTIONS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS questions (
        id BIGSERIAL PRIMARY KEY,
        question TEXT NOT NULL,
        answer TEXT NOT NULL,
        category BIGINT NOT NULL,
        difficulty BIGINT NOT NULL
    )
"#;

/// Create `categories` and `questions` if they do not exist. Existing tables are left untouched.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(CATEGORIES_DDL).execute(pool).await?;
    sqlx::query(QUESTIONS_DDL).execute(pool).await?;
    tracing::debug!("schema ready");
    Ok(())
}

/// Insert [`DEFAULT_CATEGORIES`] when the categories table is empty. Returns the number of rows inserted.
pub async fn seed_categories(pool: &PgPool) -> Result<u64, StoreError> {
    let names: Vec<String> = DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect();
    let result = sqlx::query(
        r#"
        INSERT INTO categories (type)
        SELECT unnest($1::TEXT[])
        WHERE NOT EXISTS (SELECT 1 FROM categories)
        "#,
    )
    .bind(names)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// Connect to the server's `postgres` database and create the target database if it is missing.
pub async fn ensure_database_exists(options: &PgConnectOptions) -> Result<(), StoreError> {
    let Some((admin, db_name)) = admin_target(options) else {
        return Ok(());
    };
    let mut conn: PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

/// Same server and credentials pointed at `postgres`, plus the database to create.
/// `None` when there is nothing to create.
fn admin_target(options: &PgConnectOptions) -> Option<(PgConnectOptions, String)> {
    let db_name = options.get_database()?.trim();
    if db_name.is_empty() || db_name == "postgres" {
        return None;
    }
    Some((options.clone().database("postgres"), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
