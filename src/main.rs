use chrono::Utc;
use dotenvy::dotenv;
use stoneworks::{
    config::{catalog, database},
    core::{material, order_template, report},
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();

    // 3. Load the seed catalog
    let catalog = catalog::load_default_config()
        .inspect_err(|e| error!("Failed to load catalog: {}", e))?;

    // 4. Connect and make sure the schema exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed template rows and the material price list
    order_template::ensure_order_templates(&db, &catalog)
        .await
        .inspect_err(|e| error!("Failed to seed order templates: {}", e))?;
    material::seed_materials(&db, &catalog.materials)
        .await
        .inspect_err(|e| error!("Failed to seed materials: {}", e))?;

    // 6. Print today's report
    let today = Utc::now().date_naive();
    let daily = report::generate_daily_report(&db, today)
        .await
        .inspect_err(|e| error!("Failed to generate daily report: {}", e))?;
    println!("{}", report::format_daily_report(&daily));

    Ok(())
}
