use dairy_ledger::{
    config::{account, catalog, database},
    core::{dashboard, format::format_currency, product},
    errors::Result,
    ledger::Ledger,
};
use dotenvy::dotenv;
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

    // 2. Load .env file; variables can also be set externally
    dotenv().ok();

    // 3. Business settings and starter catalog
    let config_path = account::get_config_path();
    let config = catalog::load_config_or_default(&config_path)
        .inspect_err(|e| error!("Failed to load {}: {}", config_path, e))?;
    let account_id = account::get_account_id();
    info!("Running {} for account {}", config.business_name, account_id);

    // 4. Connect and make sure the tables exist
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db).await?;

    // 5. Seed catalog products the account does not have yet
    let seeded = product::seed_products(&db, &account_id, &config.products).await?;
    if seeded > 0 {
        info!("Seeded {} catalog products", seeded);
    }

    // 6. Today's dashboard
    let ledger = Ledger::open(db, account_id).await?;
    let summary = ledger.dashboard(dashboard::today_utc());
    let symbol = config.currency_symbol.as_str();

    info!(
        "{}: {} orders ({} delivered), collected {}, pending {}",
        summary.date,
        summary.total_orders,
        summary.delivered_orders,
        format_currency(summary.total_collected, symbol),
        format_currency(summary.total_pending, symbol)
    );
    for tally in &summary.product_summary {
        info!("  {} x {}", tally.label, tally.quantity);
    }

    Ok(())
}
