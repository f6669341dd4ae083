//! PostgreSQL persistence: schema bootstrap and per-table parameterised queries.
//!
//! Every query function is generic over `PgExecutor`, so the same call runs against the
//! pool or inside an open transaction.

pub mod fixed_expenses;
pub mod installments;
pub mod savings;
pub mod schema;
pub mod settings;
pub mod transactions;
pub mod users;
