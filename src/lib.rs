pub mod app;
pub mod crypto;
pub mod domain;
pub mod error;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::database_service::DatabaseService;
pub use crypto::token::TokenService;
pub use domain::{DomainError, MonthKey};
pub use error::AppError;
pub use infra::config::Config;
