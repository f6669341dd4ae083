pub mod auth;
pub mod router;
pub mod types;
pub mod handlers {
    pub mod admin;
    pub mod auth;
    pub mod common;
    pub mod fixed_expenses;
    pub mod health;
    pub mod installments;
    pub mod reports;
    pub mod savings;
    pub mod settings;
    pub mod transactions;
}

pub use router::{cors_layer, create_router, ApiDoc};
pub use types::AppState;
