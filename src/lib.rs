//! Trivia API: categories, paginated questions, search, and quiz rounds over PostgreSQL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod telemetry;

pub use config::TriviaConfig;
pub use error::{AppError, ConfigError, StoreError};
pub use migration::{apply_migrations, ensure_database_exists, seed_categories};
pub use model::{Category, CategoryMap, NewQuestion, Question};
pub use response::success_ok;
pub use routes::{app, common_routes, trivia_routes};
pub use state::AppState;
pub use store::{MemoryStore, PgStore, TriviaStore};
