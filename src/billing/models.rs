use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Sentinel used by quotas and page limits for "no limit".
pub const UNLIMITED: i64 = -1;

/// key: billing-tiers -> hobby,pro,enterprise
/// Variants are declared low-to-high value; plan comparison relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Hobby,
    Pro,
    Enterprise,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Hobby, Tier::Pro, Tier::Enterprise];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Hobby => "hobby",
            Tier::Pro => "pro",
            Tier::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which set of provider price ids is live for this process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceEnvironment {
    #[default]
    Test,
    Production,
}

impl PriceEnvironment {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceEnvironment::Test => "test",
            PriceEnvironment::Production => "production",
        }
    }

    /// Lenient parse: only the exact value `production` selects production ids.
    pub fn from_env_value(raw: &str) -> Self {
        if raw == "production" {
            PriceEnvironment::Production
        } else {
            PriceEnvironment::Test
        }
    }
}

impl fmt::Display for PriceEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceEnvironment {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "test" => Ok(PriceEnvironment::Test),
            "production" => Ok(PriceEnvironment::Production),
            _ => Err(ConfigError::UnknownEnvironment(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    Monthly,
    Yearly,
}

/// Provider price ids, one per deployment environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceIds {
    pub test: String,
    pub production: String,
}

impl PriceIds {
    pub fn new(test: impl Into<String>, production: impl Into<String>) -> Self {
        Self {
            test: test.into(),
            production: production.into(),
        }
    }

    pub fn for_environment(&self, environment: PriceEnvironment) -> &str {
        match environment {
            PriceEnvironment::Test => &self.test,
            PriceEnvironment::Production => &self.production,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub amount: u32,
    pub price_ids: PriceIds,
}

/// Pricing attached to a paid offering. Yearly billing is always offered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferingPrices {
    #[serde(default)]
    pub monthly: Option<Price>,
    pub yearly: Price,
}

/// key: billing-offering -> quota,page-limit,prices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedOffering {
    pub name: String,
    pub quota: i64,
    pub num_website_pages_per_project: i64,
    #[serde(default)]
    pub price: Option<OfferingPrices>,
}

impl PricedOffering {
    pub fn monthly_price_id(&self, environment: PriceEnvironment) -> Option<&str> {
        self.price
            .as_ref()
            .and_then(|price| price.monthly.as_ref())
            .map(|monthly| monthly.price_ids.for_environment(environment))
    }

    pub fn yearly_price_id(&self, environment: PriceEnvironment) -> Option<&str> {
        self.price
            .as_ref()
            .map(|price| price.yearly.price_ids.for_environment(environment))
    }

    pub fn matches_price_id(&self, environment: PriceEnvironment, price_id: &str) -> bool {
        self.monthly_price_id(environment) == Some(price_id)
            || self.yearly_price_id(environment) == Some(price_id)
    }

    pub fn is_paid(&self) -> bool {
        self.price.is_some()
    }

    pub fn has_unlimited_quota(&self) -> bool {
        self.quota == UNLIMITED
    }

    pub fn has_unlimited_pages(&self) -> bool {
        self.num_website_pages_per_project == UNLIMITED
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierDetails {
    pub name: String,
    #[serde(default)]
    pub enterprise: bool,
    pub description: String,
    pub items: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
    pub prices: Vec<PricedOffering>,
}

/// Models whose completions are metered against a quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PricedModel {
    #[serde(rename = "gpt-4")]
    Gpt4,
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
    #[serde(rename = "byo")]
    Byo,
}

impl PricedModel {
    pub fn label(&self) -> &'static str {
        match self {
            PricedModel::Gpt4 => "GPT-4",
            PricedModel::Gpt35Turbo => "Chat",
            PricedModel::Byo => "BYO",
        }
    }
}

/// Flattened view of one offering, resolved for a single environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanCatalogEntry {
    pub tier: Tier,
    pub tier_name: String,
    pub enterprise: bool,
    pub offering: String,
    pub quota: i64,
    pub num_website_pages_per_project: i64,
    pub monthly_amount: Option<u32>,
    pub monthly_price_id: Option<String>,
    pub yearly_amount: Option<u32>,
    pub yearly_price_id: Option<String>,
}

/// Read-only view of the billing fields stored on a team.
pub trait BillingAccount {
    fn is_enterprise_plan(&self) -> bool;
    fn price_id(&self) -> Option<&str>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamBillingProfile {
    pub is_enterprise_plan: bool,
    #[serde(default)]
    pub stripe_price_id: Option<String>,
}

impl TeamBillingProfile {
    pub fn free() -> Self {
        Self::default()
    }

    pub fn enterprise() -> Self {
        Self {
            is_enterprise_plan: true,
            stripe_price_id: None,
        }
    }

    pub fn subscribed(price_id: impl Into<String>) -> Self {
        Self {
            is_enterprise_plan: false,
            stripe_price_id: Some(price_id.into()),
        }
    }
}

impl BillingAccount for TeamBillingProfile {
    fn is_enterprise_plan(&self) -> bool {
        self.is_enterprise_plan
    }

    fn price_id(&self) -> Option<&str> {
        self.stripe_price_id.as_deref()
    }
}
