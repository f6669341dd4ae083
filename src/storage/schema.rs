//! Table definitions. Applied idempotently on every start.

use sqlx::PgPool;

/// Tables owned by the service, in creation order.
pub const TABLES: &[&str] = &[
    "users",
    "user_settings",
    "transactions",
    "fixed_expenses",
    "installments",
    "savings_boxes",
    "savings_movements",
];

const CREATE_TABLES: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        username VARCHAR(100) UNIQUE NOT NULL,
        password VARCHAR(255) NOT NULL,
        name VARCHAR(100) NOT NULL DEFAULT '',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE TABLE IF NOT EXISTS user_settings (
        id SERIAL PRIMARY KEY,
        user_id INTEGER UNIQUE NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        settings JSONB NOT NULL DEFAULT '{}'::jsonb
    )",
    "CREATE TABLE IF NOT EXISTS transactions (
        id SERIAL PRIMARY KEY,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        type VARCHAR(20) NOT NULL,
        category VARCHAR(50) NOT NULL DEFAULT 'other',
        description VARCHAR(255) NOT NULL,
        value NUMERIC(12,2) NOT NULL,
        date DATE NOT NULL,
        split_count INTEGER NOT NULL DEFAULT 1,
        original_value NUMERIC(12,2),
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE TABLE IF NOT EXISTS fixed_expenses (
        id SERIAL PRIMARY KEY,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        description VARCHAR(255) NOT NULL,
        value NUMERIC(12,2) NOT NULL,
        day INTEGER NOT NULL CHECK (day BETWEEN 1 AND 31),
        category VARCHAR(50) NOT NULL DEFAULT 'other',
        paid_months TEXT[] NOT NULL DEFAULT '{}',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE TABLE IF NOT EXISTS installments (
        id SERIAL PRIMARY KEY,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        description VARCHAR(255) NOT NULL,
        category VARCHAR(50) NOT NULL DEFAULT 'other',
        total_value NUMERIC(12,2) NOT NULL,
        installment_value NUMERIC(12,2) NOT NULL,
        total_installments INTEGER NOT NULL CHECK (total_installments >= 1),
        paid_installments INTEGER NOT NULL DEFAULT 0,
        start_date DATE NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        CHECK (paid_installments BETWEEN 0 AND total_installments)
    )",
    "CREATE TABLE IF NOT EXISTS savings_boxes (
        id SERIAL PRIMARY KEY,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        name VARCHAR(100) NOT NULL,
        goal NUMERIC(12,2) NOT NULL DEFAULT 0,
        current_value NUMERIC(12,2) NOT NULL DEFAULT 0 CHECK (current_value >= 0),
        icon VARCHAR(16) NOT NULL DEFAULT '🐷',
        color VARCHAR(16) NOT NULL DEFAULT '#6366f1',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE TABLE IF NOT EXISTS savings_movements (
        id SERIAL PRIMARY KEY,
        savings_box_id INTEGER NOT NULL REFERENCES savings_boxes(id) ON DELETE CASCADE,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        kind VARCHAR(10) NOT NULL,
        value NUMERIC(12,2) NOT NULL,
        date DATE NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
];

/// Columns introduced after the first schema; brings older databases up to date.
const UPGRADES: &[&str] = &[
    "ALTER TABLE users ADD COLUMN IF NOT EXISTS name VARCHAR(100) NOT NULL DEFAULT ''",
    "ALTER TABLE transactions ADD COLUMN IF NOT EXISTS category VARCHAR(50) NOT NULL DEFAULT 'other'",
    "ALTER TABLE transactions ADD COLUMN IF NOT EXISTS split_count INTEGER NOT NULL DEFAULT 1",
    "ALTER TABLE transactions ADD COLUMN IF NOT EXISTS original_value NUMERIC(12,2)",
    "ALTER TABLE fixed_expenses ADD COLUMN IF NOT EXISTS category VARCHAR(50) NOT NULL DEFAULT 'other'",
    "ALTER TABLE fixed_expenses ADD COLUMN IF NOT EXISTS paid_months TEXT[] NOT NULL DEFAULT '{}'",
    "ALTER TABLE installments ADD COLUMN IF NOT EXISTS category VARCHAR(50) NOT NULL DEFAULT 'other'",
    "ALTER TABLE savings_boxes ADD COLUMN IF NOT EXISTS icon VARCHAR(16) NOT NULL DEFAULT '🐷'",
    "ALTER TABLE savings_boxes ADD COLUMN IF NOT EXISTS color VARCHAR(16) NOT NULL DEFAULT '#6366f1'",
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_transactions_user_date ON transactions (user_id, date DESC)",
    "CREATE INDEX IF NOT EXISTS idx_fixed_expenses_user ON fixed_expenses (user_id)",
    "CREATE INDEX IF NOT EXISTS idx_installments_user ON installments (user_id)",
    "CREATE INDEX IF NOT EXISTS idx_savings_boxes_user ON savings_boxes (user_id)",
    "CREATE INDEX IF NOT EXISTS idx_savings_movements_user ON savings_movements (user_id, date)",
];

pub async fn init_schema(pool: &PgPool) -> anyhow::Result<()> {
    for sql in CREATE_TABLES.iter().chain(UPGRADES).chain(INDEXES) {
        sqlx::query(sql).execute(pool).await?;
    }
    Ok(())
}

/// Names from `TABLES` that do not exist in the `public` schema.
pub async fn missing_tables(pool: &PgPool) -> anyhow::Result<Vec<String>> {
    let wanted: Vec<String> = TABLES.iter().map(|t| t.to_string()).collect();
    let present: Vec<String> = sqlx::query_scalar(
        "SELECT table_name::text FROM information_schema.tables
         WHERE table_schema = 'public' AND table_name = ANY($1)",
    )
    .bind(&wanted)
    .fetch_all(pool)
    .await?;

    Ok(TABLES
        .iter()
        .filter(|t| !present.iter().any(|p| p == *t))
        .map(|t| t.to_string())
        .collect())
}
