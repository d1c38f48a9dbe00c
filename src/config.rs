use once_cell::sync::Lazy;

use crate::billing::models::PriceEnvironment;

/// Deployment environment whose price ids are live. Read once from
/// `DEPLOYMENT_ENV`, falling back to `NEXT_PUBLIC_VERCEL_ENV`.
pub static PRICE_ENVIRONMENT: Lazy<PriceEnvironment> = Lazy::new(price_environment_from_env);

pub fn price_environment_from_env() -> PriceEnvironment {
    select_price_environment(
        read_optional_env("DEPLOYMENT_ENV"),
        read_optional_env("NEXT_PUBLIC_VERCEL_ENV"),
    )
}

/// Only the exact value `production` selects production ids; any other value,
/// or neither variable set, selects test ids. `DEPLOYMENT_ENV` wins when set.
pub fn select_price_environment(
    deployment_env: Option<String>,
    vercel_env: Option<String>,
) -> PriceEnvironment {
    deployment_env
        .or(vercel_env)
        .map(|value| PriceEnvironment::from_env_value(&value))
        .unwrap_or_default()
}

fn read_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::PlanResolver;

    fn some(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn unset_environment_selects_test() {
        assert_eq!(select_price_environment(None, None), PriceEnvironment::Test);
    }

    #[test]
    fn only_production_selects_production() {
        assert_eq!(
            select_price_environment(None, some("production")),
            PriceEnvironment::Production
        );
        for value in ["preview", "development", "test", "Production", " production"] {
            assert_eq!(
                select_price_environment(None, some(value)),
                PriceEnvironment::Test,
                "{value} should select test ids"
            );
        }
    }

    #[test]
    fn deployment_env_takes_precedence() {
        assert_eq!(
            select_price_environment(some("production"), some("preview")),
            PriceEnvironment::Production
        );
        assert_eq!(
            select_price_environment(some("preview"), some("production")),
            PriceEnvironment::Test
        );
    }

    #[test]
    fn resolver_from_env_uses_configured_environment() {
        let resolver = PlanResolver::from_env();
        assert_eq!(resolver.environment(), *PRICE_ENVIRONMENT);
        assert_eq!(resolver.environment(), price_environment_from_env());
    }
}
