//! Application state for meshi-server

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::{JwtConfig, JwtService};
use crate::booking::CivilClock;
use crate::config::Config;
use crate::db::DbService;
use crate::error::BoxError;
use crate::stripe::{BillingGateway, StripeGateway};

/// Redirect targets and billing settings derived from config
#[derive(Debug, Clone)]
pub struct BillingSettings {
    pub currency: String,
    pub subscription_price_id: String,
    pub success_url: String,
    pub cancel_url: String,
    /// Absolute member edit URL (billing portal return)
    pub member_edit_url: String,
    /// Relative member edit path (client fallback on billing errors)
    pub member_edit_path: String,
}

impl BillingSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            currency: config.stripe_currency.clone(),
            subscription_price_id: config.stripe_subscription_price_id.clone(),
            success_url: config.public_url(&config.checkout_success_path),
            cancel_url: config.public_url(&config.checkout_cancel_path),
            member_edit_url: config.public_url(&config.member_edit_path),
            member_edit_path: config.member_edit_path.clone(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub clock: CivilClock,
    pub jwt: JwtService,
    pub billing: Arc<dyn BillingGateway>,
    pub billing_settings: BillingSettings,
}

impl AppState {
    /// Open the database and build the live Stripe gateway
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let db = DbService::new(&config.database_path).await?;
        let gateway = StripeGateway::new(&config.stripe_api_base, &config.stripe_secret_key)?;
        Self::from_parts(db.pool, config, Arc::new(gateway))
    }

    /// Assemble state from an existing pool and gateway
    pub fn from_parts(
        pool: SqlitePool,
        config: &Config,
        billing: Arc<dyn BillingGateway>,
    ) -> Result<Self, BoxError> {
        let minutes = config.civil_utc_offset_minutes;
        let clock = CivilClock::from_offset_minutes(minutes)
            .ok_or_else(|| format!("CIVIL_UTC_OFFSET_MINUTES out of range: {minutes}"))?;
        let jwt = JwtService::new(&JwtConfig {
            secret: config.jwt_secret.clone(),
            expiry_hours: config.jwt_expiry_hours,
        });

        Ok(Self {
            pool,
            clock,
            jwt,
            billing,
            billing_settings: BillingSettings::from_config(config),
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_billing_settings_urls() {
        let settings = BillingSettings::from_config(&Config::default());
        assert_eq!(settings.success_url, "http://localhost:8080/success");
        assert_eq!(settings.cancel_url, "http://localhost:8080/cancel");
        assert_eq!(settings.member_edit_url, "http://localhost:8080/member/edit");
        assert_eq!(settings.member_edit_path, "/member/edit");
    }

    #[tokio::test]
    async fn test_bad_offset_rejected() {
        let pool = crate::db::test_support::pool().await;
        let config = Config {
            civil_utc_offset_minutes: 24 * 60,
            ..Config::default()
        };
        let gateway = Arc::new(crate::stripe::fake::FakeGateway::default());
        assert!(AppState::from_parts(pool, &config, gateway).is_err());
    }
}
