use super::models::{BillingAccount, Tier, UNLIMITED};
use super::resolver::PlanResolver;

/// Monthly completions granted to enterprise teams. Effectively unlimited.
pub const MAX_ALLOWANCE_FOR_ENTERPRISE: i64 = 1_000_000;

/// An empty stored id counts as no subscription.
fn stored_price_id(account: &impl BillingAccount) -> Option<&str> {
    account.price_id().filter(|price_id| !price_id.is_empty())
}

/// key: billing-allowance -> quota,pages per team
impl PlanResolver<'_> {
    /// Completions a team may run per billing cycle.
    ///
    /// Enterprise teams get [`MAX_ALLOWANCE_FOR_ENTERPRISE`]. A stored price id
    /// that is no longer in the catalog is a legacy subscription and keeps the
    /// current Pro quota. Teams without a price id are on the Hobby tier.
    pub fn monthly_query_allowance(&self, account: &impl BillingAccount) -> i64 {
        if account.is_enterprise_plan() {
            return MAX_ALLOWANCE_FOR_ENTERPRISE;
        }

        match stored_price_id(account) {
            Some(price_id) => match self.offering_for_price_id(price_id) {
                Some(offering) => offering.quota,
                None => {
                    let quota = self.catalog().primary_offering(Tier::Pro).quota;
                    tracing::warn!(
                        price_id,
                        quota,
                        "stale price id on team; applying legacy quota"
                    );
                    quota
                }
            },
            None => self.catalog().primary_offering(Tier::Hobby).quota,
        }
    }

    /// Website pages a team may index per project. Same resolution order as
    /// [`Self::monthly_query_allowance`], with enterprise teams unlimited.
    pub fn website_pages_per_project_allowance(&self, account: &impl BillingAccount) -> i64 {
        if account.is_enterprise_plan() {
            return UNLIMITED;
        }

        match stored_price_id(account) {
            Some(price_id) => match self.offering_for_price_id(price_id) {
                Some(offering) => offering.num_website_pages_per_project,
                None => {
                    let pages = self
                        .catalog()
                        .primary_offering(Tier::Pro)
                        .num_website_pages_per_project;
                    tracing::warn!(
                        price_id,
                        pages,
                        "stale price id on team; applying legacy page allowance"
                    );
                    pages
                }
            },
            None => {
                self.catalog()
                    .primary_offering(Tier::Hobby)
                    .num_website_pages_per_project
            }
        }
    }
}
