use std::cmp::Ordering;

use super::catalog::{TierCatalog, TIERS};
use super::models::{
    BillingPeriod, PlanCatalogEntry, PriceEnvironment, PricedOffering, Tier, TierDetails,
};
use crate::config;

/// key: billing-resolver -> price id lookups
///
/// Resolves provider price ids against a catalog using the ids of a single
/// deployment environment. Unknown ids are an expected outcome, never an error.
#[derive(Debug, Clone, Copy)]
pub struct PlanResolver<'a> {
    catalog: &'a TierCatalog,
    environment: PriceEnvironment,
}

impl PlanResolver<'static> {
    /// Resolver over the shipped catalog using the configured environment.
    pub fn from_env() -> Self {
        Self::new(&TIERS, *config::PRICE_ENVIRONMENT)
    }
}

impl<'a> PlanResolver<'a> {
    pub fn new(catalog: &'a TierCatalog, environment: PriceEnvironment) -> Self {
        Self {
            catalog,
            environment,
        }
    }

    pub fn catalog(&self) -> &'a TierCatalog {
        self.catalog
    }

    pub fn environment(&self) -> PriceEnvironment {
        self.environment
    }

    fn find_match(&self, price_id: &str) -> Option<(Tier, &'a TierDetails, &'a PricedOffering)> {
        let found = self
            .catalog
            .offerings()
            .find(|(_, _, offering)| offering.matches_price_id(self.environment, price_id));
        if found.is_none() {
            tracing::debug!(
                price_id,
                environment = %self.environment,
                "price id not found in tier catalog"
            );
        }
        found
    }

    pub fn offering_for_price_id(&self, price_id: &str) -> Option<&'a PricedOffering> {
        self.find_match(price_id).map(|(_, _, offering)| offering)
    }

    pub fn tier_details_for_price_id(&self, price_id: &str) -> Option<&'a TierDetails> {
        self.find_match(price_id).map(|(_, details, _)| details)
    }

    pub fn tier_for_price_id(&self, price_id: &str) -> Option<Tier> {
        self.find_match(price_id).map(|(tier, _, _)| tier)
    }

    /// True only for yearly ids. Monthly ids and unknown ids both yield `false`;
    /// use [`Self::billing_period_for_price_id`] to tell them apart.
    pub fn is_yearly_price(&self, price_id: &str) -> bool {
        self.catalog
            .offerings()
            .any(|(_, _, offering)| offering.yearly_price_id(self.environment) == Some(price_id))
    }

    pub fn billing_period_for_price_id(&self, price_id: &str) -> Option<BillingPeriod> {
        self.catalog.offerings().find_map(|(_, _, offering)| {
            if offering.monthly_price_id(self.environment) == Some(price_id) {
                Some(BillingPeriod::Monthly)
            } else if offering.yearly_price_id(self.environment) == Some(price_id) {
                Some(BillingPeriod::Yearly)
            } else {
                None
            }
        })
    }

    /// Orders two price ids by the position of their offerings in the catalog.
    ///
    /// The monthly and yearly ids of one offering compare equal. Whichever id
    /// is met first during the scan is the lower plan. When neither id is in
    /// the catalog the result is `Greater`; that fallback is a policy choice
    /// and does not reflect any real value comparison.
    pub fn compare_plans(&self, price_id: &str, other_price_id: &str) -> Ordering {
        if price_id == other_price_id {
            return Ordering::Equal;
        }

        for (_, _, offering) in self.catalog.offerings() {
            let monthly = offering.monthly_price_id(self.environment);
            let yearly = offering.yearly_price_id(self.environment);

            if (monthly == Some(price_id) && yearly == Some(other_price_id))
                || (monthly == Some(other_price_id) && yearly == Some(price_id))
            {
                return Ordering::Equal;
            }
            if monthly == Some(price_id) || yearly == Some(price_id) {
                return Ordering::Less;
            }
            if monthly == Some(other_price_id) || yearly == Some(other_price_id) {
                return Ordering::Greater;
            }
        }

        tracing::debug!(
            price_id,
            other_price_id,
            environment = %self.environment,
            "neither price id is in the tier catalog; treating as greater"
        );
        Ordering::Greater
    }

    /// [`Self::compare_plans`] as -1, 0 or 1.
    pub fn compare_plans_code(&self, price_id: &str, other_price_id: &str) -> i8 {
        match self.compare_plans(price_id, other_price_id) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    pub fn catalog_entries(&self) -> Vec<PlanCatalogEntry> {
        let environment = self.environment;
        self.catalog
            .offerings()
            .map(|(tier, details, offering)| {
                let monthly = offering.price.as_ref().and_then(|p| p.monthly.as_ref());
                let yearly = offering.price.as_ref().map(|p| &p.yearly);
                PlanCatalogEntry {
                    tier,
                    tier_name: details.name.clone(),
                    enterprise: details.enterprise,
                    offering: offering.name.clone(),
                    quota: offering.quota,
                    num_website_pages_per_project: offering.num_website_pages_per_project,
                    monthly_amount: monthly.map(|price| price.amount),
                    monthly_price_id: monthly
                        .map(|price| price.price_ids.for_environment(environment).to_string()),
                    yearly_amount: yearly.map(|price| price.amount),
                    yearly_price_id: yearly
                        .map(|price| price.price_ids.for_environment(environment).to_string()),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRO_MONTHLY_TEST: &str = "price_1N0TzLCv3sM26vDeQ7VxLKWP";
    const PRO_YEARLY_TEST: &str = "price_1N0TzLCv3sM26vDeIwhDValY";
    const PRO_MONTHLY_LIVE: &str = "price_1N0U0ICv3sM26vDes1KHwQ4y";

    fn test_resolver() -> PlanResolver<'static> {
        PlanResolver::new(&TIERS, PriceEnvironment::Test)
    }

    #[test]
    fn billing_period_separates_monthly_yearly_and_unknown() {
        let resolver = test_resolver();
        assert_eq!(
            resolver.billing_period_for_price_id(PRO_MONTHLY_TEST),
            Some(BillingPeriod::Monthly)
        );
        assert_eq!(
            resolver.billing_period_for_price_id(PRO_YEARLY_TEST),
            Some(BillingPeriod::Yearly)
        );
        assert_eq!(resolver.billing_period_for_price_id("price_unknown"), None);
    }

    #[test]
    fn yearly_check_conflates_monthly_and_unknown() {
        let resolver = test_resolver();
        assert!(resolver.is_yearly_price(PRO_YEARLY_TEST));
        assert!(!resolver.is_yearly_price(PRO_MONTHLY_TEST));
        assert!(!resolver.is_yearly_price("price_unknown"));
    }

    #[test]
    fn compare_codes_match_ordering() {
        let resolver = test_resolver();
        assert_eq!(resolver.compare_plans_code(PRO_MONTHLY_TEST, "price_unknown"), -1);
        assert_eq!(resolver.compare_plans_code(PRO_MONTHLY_TEST, PRO_YEARLY_TEST), 0);
        assert_eq!(resolver.compare_plans_code("price_unknown", PRO_MONTHLY_TEST), 1);
    }

    #[test]
    fn two_unknown_ids_fall_back_to_greater() {
        let resolver = test_resolver();
        assert_eq!(
            resolver.compare_plans("price_a", "price_b"),
            Ordering::Greater
        );
        assert_eq!(
            resolver.compare_plans("price_b", "price_a"),
            Ordering::Greater
        );
    }

    #[test]
    fn ids_from_another_environment_do_not_match() {
        let resolver = test_resolver();
        assert!(resolver.offering_for_price_id(PRO_MONTHLY_LIVE).is_none());
        assert!(resolver.tier_for_price_id(PRO_MONTHLY_LIVE).is_none());
    }

    #[test]
    fn catalog_entries_resolve_active_environment() {
        let entries = PlanResolver::new(&TIERS, PriceEnvironment::Production).catalog_entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].tier, Tier::Hobby);
        assert_eq!(entries[0].monthly_price_id, None);

        let pro = &entries[1];
        assert_eq!(pro.tier, Tier::Pro);
        assert_eq!(pro.monthly_amount, Some(120));
        assert_eq!(pro.yearly_amount, Some(100));
        assert_eq!(pro.monthly_price_id.as_deref(), Some(PRO_MONTHLY_LIVE));

        assert!(entries[2].enterprise);
        assert_eq!(entries[2].quota, -1);
    }
}
