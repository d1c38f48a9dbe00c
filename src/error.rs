use thiserror::Error;

use crate::billing::models::{PriceEnvironment, Tier};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("tier `{tier}` has no priced offerings")]
    EmptyTier { tier: Tier },
    #[error("price id `{price_id}` is listed more than once for the {environment} environment")]
    DuplicatePriceId {
        environment: PriceEnvironment,
        price_id: String,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported deployment environment '{0}'; expected 'test' or 'production'")]
    UnknownEnvironment(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
