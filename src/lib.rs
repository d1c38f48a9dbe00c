pub mod billing;
pub mod config;
pub mod error;

pub use billing::{
    BillingAccount, PlanResolver, PriceEnvironment, TeamBillingProfile, Tier, TierCatalog, TIERS,
};
pub use config::{price_environment_from_env, select_price_environment, PRICE_ENVIRONMENT};
pub use error::{CatalogError, ConfigError};
