use finance_tracker::infra::config::Config;
use finance_tracker::storage::schema;
use sqlx::postgres::PgPoolOptions;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--init-schema]\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL, JWT_SECRET, ADMIN_SECRET\n\
         Optional:\n\
           ADMIN_PASSWORD, BIND_ADDR, DB_MAX_CONNECTIONS, JWT_TTL_HOURS, ADMIN_TTL_HOURS, BCRYPT_COST\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let init_schema = args.iter().any(|a| a == "--init-schema");

    // Force-read config (nice error messages if missing)
    let config = Config::from_env()?;

    println!("> Preflight:");
    println!("  BIND_ADDR={}", config.bind_addr);
    println!("  DB_MAX_CONNECTIONS={}", config.db_max_connections);
    println!("  JWT_TTL_HOURS={}", config.jwt_ttl_hours);
    println!("  ADMIN_TTL_HOURS={}", config.admin_ttl_hours);
    println!("  BCRYPT_COST={}", config.bcrypt_cost);
    if config.jwt_secret == config.admin_secret {
        eprintln!("  Warning: JWT_SECRET and ADMIN_SECRET are equal; use distinct secrets.");
    }
    if config.admin_password.is_none() {
        println!("  ADMIN_PASSWORD not set: admin console is disabled.");
    }

    // Basic DB connectivity
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Cannot connect to DATABASE_URL: {}", e))?;
    let version: String = sqlx::query_scalar("SELECT version()").fetch_one(&pool).await?;
    println!("  Postgres: {}", version);

    // Schema presence
    let missing = schema::missing_tables(&pool).await?;
    if missing.is_empty() {
        println!("  All {} tables present.", schema::TABLES.len());
    } else if init_schema {
        println!("  Missing tables {:?} -> creating schema...", missing);
        schema::init_schema(&pool).await?;
        let still_missing = schema::missing_tables(&pool).await?;
        if !still_missing.is_empty() {
            return Err(anyhow::anyhow!("Tables still missing after init: {:?}", still_missing));
        }
        println!("  Schema initialized successfully.");
    } else {
        return Err(anyhow::anyhow!(
            "Missing tables {:?}. Re-run with --init-schema (the API server also creates them on start)",
            missing
        ));
    }

    println!("> Preflight OK.");
    Ok(())
}
