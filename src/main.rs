use anyhow::Context;
use plan_tiers::{config, PlanResolver, TierCatalog};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    dotenvy::dotenv().ok();

    let environment = *config::PRICE_ENVIRONMENT;
    let catalog = TierCatalog::standard().context("tier catalog failed validation")?;
    let resolver = PlanResolver::new(&catalog, environment);

    let entries = resolver.catalog_entries();
    tracing::info!(%environment, offerings = entries.len(), "tier catalog loaded");

    let rendered = serde_json::to_string_pretty(&entries)?;
    println!("{rendered}");
    Ok(())
}
