pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod markdown;
pub mod routes;
pub mod sanitize;
pub mod store;
pub mod telegraph;

pub use config::Config;
pub use db::DbPool;
pub use routes::{create_router, AppState};
