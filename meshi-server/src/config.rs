//! Server configuration

use crate::booking::clock::DEFAULT_OFFSET_MINUTES;
use crate::error::BoxError;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment: development | staging | production
    pub environment: String,
    /// SQLite database file
    pub database_path: String,
    pub http_port: u16,
    /// HS256 signing secret
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub stripe_secret_key: String,
    pub stripe_api_base: String,
    /// Price used by subscription checkout
    pub stripe_subscription_price_id: String,
    /// ISO currency for one-off checkout
    pub stripe_currency: String,
    /// Origin used to build redirect URLs handed to Stripe
    pub public_base_url: String,
    pub checkout_success_path: String,
    pub checkout_cancel_path: String,
    /// Page returned to from the billing portal
    pub member_edit_path: String,
    /// Offset of the shops' civil time from UTC, in minutes
    pub civil_utc_offset_minutes: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".into(),
            database_path: "meshi.db".into(),
            http_port: 8080,
            jwt_secret: "dev-JWT_SECRET-not-for-production".into(),
            jwt_expiry_hours: 24,
            stripe_secret_key: "dev-STRIPE_SECRET_KEY-not-for-production".into(),
            stripe_api_base: "https://api.stripe.com".into(),
            stripe_subscription_price_id: String::new(),
            stripe_currency: "jpy".into(),
            public_base_url: "http://localhost:8080".into(),
            checkout_success_path: "/success".into(),
            checkout_cancel_path: "/cancel".into(),
            member_edit_path: "/member/edit".into(),
            civil_utc_offset_minutes: DEFAULT_OFFSET_MINUTES,
        }
    }
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    fn parsed<T: std::str::FromStr>(name: &str, default: T) -> Result<T, BoxError> {
        match std::env::var(name) {
            Ok(v) if !v.trim().is_empty() => v
                .trim()
                .parse()
                .map_err(|_| format!("{name} has an invalid value: {v}").into()),
            _ => Ok(default),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let defaults = Self::default();
        let environment = std::env::var("ENVIRONMENT").unwrap_or(defaults.environment);
        let var = |name: &str, default: String| std::env::var(name).unwrap_or(default);

        Ok(Self {
            database_path: var("DATABASE_PATH", defaults.database_path),
            http_port: Self::parsed("HTTP_PORT", defaults.http_port)?,
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            jwt_expiry_hours: Self::parsed("JWT_EXPIRY_HOURS", defaults.jwt_expiry_hours)?,
            stripe_secret_key: Self::require_secret("STRIPE_SECRET_KEY", &environment)?,
            stripe_api_base: var("STRIPE_API_BASE", defaults.stripe_api_base),
            stripe_subscription_price_id: var(
                "STRIPE_SUBSCRIPTION_PRICE_ID",
                defaults.stripe_subscription_price_id,
            ),
            stripe_currency: var("STRIPE_CURRENCY", defaults.stripe_currency),
            public_base_url: var("PUBLIC_BASE_URL", defaults.public_base_url)
                .trim_end_matches('/')
                .to_string(),
            checkout_success_path: var("CHECKOUT_SUCCESS_PATH", defaults.checkout_success_path),
            checkout_cancel_path: var("CHECKOUT_CANCEL_PATH", defaults.checkout_cancel_path),
            member_edit_path: var("MEMBER_EDIT_PATH", defaults.member_edit_path),
            civil_utc_offset_minutes: Self::parsed(
                "CIVIL_UTC_OFFSET_MINUTES",
                defaults.civil_utc_offset_minutes,
            )?,
            environment,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Absolute URL for a path on the public site
    pub fn public_url(&self, path: &str) -> String {
        format!("{}{path}", self.public_base_url)
    }
}
