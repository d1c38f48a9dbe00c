use std::collections::HashSet;

use once_cell::sync::Lazy;

use super::models::{
    OfferingPrices, Price, PriceEnvironment, PriceIds, PricedOffering, Tier, TierDetails,
    UNLIMITED,
};
use crate::error::{CatalogError, CatalogResult};

/// The shipped catalog, built once per process.
pub static TIERS: Lazy<TierCatalog> =
    Lazy::new(|| TierCatalog::standard().expect("standard tier catalog must be valid"));

/// key: billing-catalog -> ordered tiers
/// Tier details keyed by `Tier`, iterated in `Tier::ALL` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierCatalog {
    hobby: TierDetails,
    pro: TierDetails,
    enterprise: TierDetails,
}

impl TierCatalog {
    /// Builds a catalog, rejecting tiers without offerings and price ids that
    /// appear twice within the same environment.
    pub fn new(
        hobby: TierDetails,
        pro: TierDetails,
        enterprise: TierDetails,
    ) -> CatalogResult<Self> {
        let catalog = Self {
            hobby,
            pro,
            enterprise,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn standard() -> CatalogResult<Self> {
        Self::new(hobby_tier(), pro_tier(), enterprise_tier())
    }

    pub fn details(&self, tier: Tier) -> &TierDetails {
        match tier {
            Tier::Hobby => &self.hobby,
            Tier::Pro => &self.pro,
            Tier::Enterprise => &self.enterprise,
        }
    }

    pub fn primary_offering(&self, tier: Tier) -> &PricedOffering {
        // `validate` guarantees every tier carries at least one offering.
        &self.details(tier).prices[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tier, &TierDetails)> + '_ {
        Tier::ALL.into_iter().map(move |tier| (tier, self.details(tier)))
    }

    /// Every offering with its owning tier, in scan order.
    pub fn offerings(&self) -> impl Iterator<Item = (Tier, &TierDetails, &PricedOffering)> + '_ {
        self.iter().flat_map(|(tier, details)| {
            details
                .prices
                .iter()
                .map(move |offering| (tier, details, offering))
        })
    }

    fn validate(&self) -> CatalogResult<()> {
        for (tier, details) in self.iter() {
            if details.prices.is_empty() {
                return Err(CatalogError::EmptyTier { tier });
            }
        }

        for environment in [PriceEnvironment::Test, PriceEnvironment::Production] {
            let mut seen = HashSet::new();
            for (_, _, offering) in self.offerings() {
                let ids = [
                    offering.monthly_price_id(environment),
                    offering.yearly_price_id(environment),
                ];
                for price_id in ids.into_iter().flatten() {
                    if !seen.insert(price_id) {
                        return Err(CatalogError::DuplicatePriceId {
                            environment,
                            price_id: price_id.to_string(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn hobby_tier() -> TierDetails {
    TierDetails {
        name: "Hobby".to_string(),
        enterprise: false,
        description: "For personal and non-commercial projects".to_string(),
        items: lines(&[
            "Unlimited documents",
            "Unlimited BYO* completions",
            "25 GPT-4 completions",
            "100 website pages per project",
            "Public/private GitHub repos",
        ]),
        notes: lines(&["* BYO: Bring-your-own API key"]),
        prices: vec![PricedOffering {
            name: "Free".to_string(),
            quota: 25,
            num_website_pages_per_project: 100,
            price: None,
        }],
    }
}

fn pro_tier() -> TierDetails {
    TierDetails {
        name: "Pro".to_string(),
        enterprise: false,
        description: "For production".to_string(),
        items: lines(&[
            "Everything in Hobby, plus:",
            "Prompt templates",
            "Model customization",
            "1000 GPT-4 completions",
            "1000 website pages per project",
            "Analytics (soon)",
        ]),
        notes: Vec::new(),
        prices: vec![PricedOffering {
            name: "Pro".to_string(),
            quota: 1000,
            num_website_pages_per_project: 1000,
            price: Some(OfferingPrices {
                monthly: Some(Price {
                    amount: 120,
                    price_ids: PriceIds::new(
                        "price_1N0TzLCv3sM26vDeQ7VxLKWP",
                        "price_1N0U0ICv3sM26vDes1KHwQ4y",
                    ),
                }),
                yearly: Price {
                    amount: 100,
                    price_ids: PriceIds::new(
                        "price_1N0TzLCv3sM26vDeIwhDValY",
                        "price_1N0U0ICv3sM26vDebBlSdU2k",
                    ),
                },
            }),
        }],
    }
}

fn enterprise_tier() -> TierDetails {
    TierDetails {
        name: "Enterprise".to_string(),
        enterprise: true,
        description: "For projects at scale".to_string(),
        items: lines(&[
            "Everything in Pro, plus:",
            "Teams",
            "Integrations",
            "Unbranded prompts",
            "Unlimited completions",
            "Dedicated support",
            "White glove onboarding",
            "Insights (soon)",
        ]),
        notes: Vec::new(),
        prices: vec![PricedOffering {
            name: "Enterprise".to_string(),
            quota: UNLIMITED,
            num_website_pages_per_project: UNLIMITED,
            price: None,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_is_ordered_low_to_high() {
        let tiers: Vec<Tier> = TIERS.iter().map(|(tier, _)| tier).collect();
        assert_eq!(tiers, vec![Tier::Hobby, Tier::Pro, Tier::Enterprise]);
    }

    #[test]
    fn free_and_enterprise_tiers_are_unpriced() {
        let hobby = TIERS.primary_offering(Tier::Hobby);
        assert!(!hobby.is_paid());
        assert_eq!(hobby.quota, 25);
        assert_eq!(hobby.num_website_pages_per_project, 100);

        let enterprise = TIERS.primary_offering(Tier::Enterprise);
        assert!(!enterprise.is_paid());
        assert!(enterprise.has_unlimited_quota());
        assert!(enterprise.has_unlimited_pages());
        assert!(TIERS.details(Tier::Enterprise).enterprise);
    }

    #[test]
    fn duplicate_price_ids_are_rejected() {
        let mut enterprise = enterprise_tier();
        enterprise.prices[0].price = pro_tier().prices[0].price.clone();

        let err = TierCatalog::new(hobby_tier(), pro_tier(), enterprise)
            .expect_err("shared price ids should be rejected");
        assert_eq!(
            err,
            CatalogError::DuplicatePriceId {
                environment: PriceEnvironment::Test,
                price_id: "price_1N0TzLCv3sM26vDeQ7VxLKWP".to_string(),
            }
        );
    }

    #[test]
    fn duplicates_are_checked_per_environment() {
        let mut pro = pro_tier();
        if let Some(prices) = pro.prices[0].price.as_mut() {
            prices.yearly.price_ids.production = "price_shared".to_string();
            if let Some(monthly) = prices.monthly.as_mut() {
                monthly.price_ids.test = "price_shared".to_string();
            }
        }

        assert!(TierCatalog::new(hobby_tier(), pro, enterprise_tier()).is_ok());
    }

    #[test]
    fn empty_tier_is_rejected() {
        let mut pro = pro_tier();
        pro.prices.clear();

        let err = TierCatalog::new(hobby_tier(), pro, enterprise_tier())
            .expect_err("tier without offerings should be rejected");
        assert_eq!(err, CatalogError::EmptyTier { tier: Tier::Pro });
    }
}
