//! Stripe integration via REST API (no SDK dependency)
//!
//! Handlers talk to [`BillingGateway`]; [`StripeGateway`] is the live
//! implementation. Each call returns the hosted URL or id Stripe hands back.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::BoxError;

/// One-off payment checkout
#[derive(Debug, Clone)]
pub struct PaymentCheckout<'a> {
    pub product_name: &'a str,
    /// Amount in the currency's minor unit (yen for JPY)
    pub unit_amount: i64,
    pub currency: &'a str,
    pub customer_id: Option<&'a str>,
    pub success_url: &'a str,
    pub cancel_url: &'a str,
}

/// Recurring subscription checkout
#[derive(Debug, Clone)]
pub struct SubscriptionCheckout<'a> {
    pub price_id: &'a str,
    pub customer_id: Option<&'a str>,
    pub success_url: &'a str,
    pub cancel_url: &'a str,
}

#[async_trait]
pub trait BillingGateway: Send + Sync {
    /// Create a customer, returning its id
    async fn create_customer(&self, email: &str, name: &str, user_id: i64)
    -> Result<String, BoxError>;

    /// Create a payment-mode checkout session, returning its URL
    async fn create_payment_checkout(&self, req: &PaymentCheckout<'_>) -> Result<String, BoxError>;

    /// Create a subscription-mode checkout session, returning its URL
    async fn create_subscription_checkout(
        &self,
        req: &SubscriptionCheckout<'_>,
    ) -> Result<String, BoxError>;

    /// Create a billing portal session, returning its URL
    async fn create_billing_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<String, BoxError>;
}

/// Live Stripe client
#[derive(Clone)]
pub struct StripeGateway {
    client: reqwest::Client,
    api_base: String,
    secret_key: String,
}

impl StripeGateway {
    pub fn new(api_base: &str, secret_key: &str) -> Result<Self, BoxError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            secret_key: secret_key.to_string(),
        })
    }

    async fn post_form(
        &self,
        path: &str,
        form: &[(&str, String)],
        field: &str,
    ) -> Result<String, BoxError> {
        let resp: serde_json::Value = self
            .client
            .post(format!("{}{path}", self.api_base))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(form)
            .send()
            .await?
            .json()
            .await?;

        resp[field]
            .as_str()
            .map(String::from)
            .ok_or_else(|| format!("Stripe {path} failed: {}", resp["error"]["message"]).into())
    }
}

impl std::fmt::Debug for StripeGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeGateway")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl BillingGateway for StripeGateway {
    async fn create_customer(
        &self,
        email: &str,
        name: &str,
        user_id: i64,
    ) -> Result<String, BoxError> {
        let form = [
            ("email", email.to_string()),
            ("name", name.to_string()),
            ("metadata[user_id]", user_id.to_string()),
        ];
        self.post_form("/v1/customers", &form, "id").await
    }

    async fn create_payment_checkout(&self, req: &PaymentCheckout<'_>) -> Result<String, BoxError> {
        let mut form = vec![
            ("mode", "payment".to_string()),
            ("payment_method_types[0]", "card".to_string()),
            ("line_items[0][price_data][currency]", req.currency.to_string()),
            (
                "line_items[0][price_data][product_data][name]",
                req.product_name.to_string(),
            ),
            (
                "line_items[0][price_data][unit_amount]",
                req.unit_amount.to_string(),
            ),
            ("line_items[0][quantity]", "1".to_string()),
            ("success_url", req.success_url.to_string()),
            ("cancel_url", req.cancel_url.to_string()),
        ];
        if let Some(customer) = req.customer_id {
            form.push(("customer", customer.to_string()));
        }
        self.post_form("/v1/checkout/sessions", &form, "url").await
    }

    async fn create_subscription_checkout(
        &self,
        req: &SubscriptionCheckout<'_>,
    ) -> Result<String, BoxError> {
        let mut form = vec![
            ("mode", "subscription".to_string()),
            ("payment_method_types[0]", "card".to_string()),
            ("line_items[0][price]", req.price_id.to_string()),
            ("line_items[0][quantity]", "1".to_string()),
            ("success_url", req.success_url.to_string()),
            ("cancel_url", req.cancel_url.to_string()),
        ];
        if let Some(customer) = req.customer_id {
            form.push(("customer", customer.to_string()));
        }
        self.post_form("/v1/checkout/sessions", &form, "url").await
    }

    async fn create_billing_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<String, BoxError> {
        let form = [
            ("customer", customer_id.to_string()),
            ("return_url", return_url.to_string()),
        ];
        self.post_form("/v1/billing_portal/sessions", &form, "url")
            .await
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::sync::Mutex;

    /// In-process gateway recording every call
    #[derive(Default)]
    pub struct FakeGateway {
        pub fail: bool,
        pub calls: Mutex<Vec<String>>,
    }

    impl FakeGateway {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn record(&self, call: String) -> Result<(), BoxError> {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(call);
            }
            if self.fail {
                return Err("stripe unavailable".into());
            }
            Ok(())
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl BillingGateway for FakeGateway {
        async fn create_customer(
            &self,
            email: &str,
            name: &str,
            user_id: i64,
        ) -> Result<String, BoxError> {
            self.record(format!("customer:{email}:{name}"))?;
            Ok(format!("cus_{user_id}"))
        }

        async fn create_payment_checkout(
            &self,
            req: &PaymentCheckout<'_>,
        ) -> Result<String, BoxError> {
            self.record(format!(
                "payment:{}:{}:{}",
                req.product_name, req.unit_amount, req.currency
            ))?;
            Ok("https://checkout.test/pay".into())
        }

        async fn create_subscription_checkout(
            &self,
            req: &SubscriptionCheckout<'_>,
        ) -> Result<String, BoxError> {
            self.record(format!(
                "subscription:{}:{}",
                req.price_id,
                req.customer_id.unwrap_or("-")
            ))?;
            Ok("https://checkout.test/sub".into())
        }

        async fn create_billing_portal_session(
            &self,
            customer_id: &str,
            return_url: &str,
        ) -> Result<String, BoxError> {
            self.record(format!("portal:{customer_id}:{return_url}"))?;
            Ok("https://billing.test/portal".into())
        }
    }
}
