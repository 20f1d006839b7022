//! Membership portal: account and member REST API over PostgreSQL, plus the client-side
//! service, form and navigation-guard layer that talks to it.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod response;
pub mod routes;
pub mod routing;
pub mod service;
pub mod state;
pub mod store;

pub use auth::{AuthProvider, StaticTokenProvider};
pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use response::{success_many, success_one, success_one_ok};
pub use routes::{api_routes, app, common_routes};
pub use state::AppState;
pub use store::{connect_pool, connect_pool_lazy, ensure_database_exists};
