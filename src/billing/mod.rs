pub mod allowance;
pub mod catalog;
pub mod models;
pub mod resolver;

pub use allowance::MAX_ALLOWANCE_FOR_ENTERPRISE;
pub use catalog::{TierCatalog, TIERS};
pub use models::{
    BillingAccount, BillingPeriod, OfferingPrices, PlanCatalogEntry, Price, PriceEnvironment,
    PriceIds, PricedModel, PricedOffering, TeamBillingProfile, Tier, TierDetails, UNLIMITED,
};
pub use resolver::PlanResolver;
