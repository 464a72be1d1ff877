pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod middleware;
pub mod models;
pub mod store;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::{AppError, AppResult};
