//! Checkout and billing portal
//!
//! Provider failures are logged and turned into a 502 carrying a
//! `redirect` detail that names a page the client can safely return to.

use shared::error::{AppError, ErrorCode};
use shared::models::RedirectUrl;

use super::shop as shop_service;
use crate::booking::Actor;
use crate::db::repository::{member, user};
use crate::error::{BoxError, ServiceError, ServiceResult};
use crate::state::AppState;
use crate::stripe::{PaymentCheckout, SubscriptionCheckout};

fn provider_failure(code: ErrorCode, message: &str, redirect: &str, e: BoxError) -> ServiceError {
    tracing::error!(error = %e, code = %code, "Billing provider call failed");
    AppError::with_message(code, message)
        .with_redirect(redirect)
        .into()
}

/// One-off payment for a shop; the amount is the shop's price
pub async fn shop_checkout(
    state: &AppState,
    actor: &Actor,
    shop_id: i64,
) -> ServiceResult<RedirectUrl> {
    let shop = shop_service::find(&state.pool, shop_id).await?;
    let settings = &state.billing_settings;
    let profile = member::get_or_create(&state.pool, actor.user_id).await?;

    let request = PaymentCheckout {
        product_name: &shop.name,
        unit_amount: shop.price,
        currency: &settings.currency,
        customer_id: profile.stripe_customer_id.as_deref(),
        success_url: &settings.success_url,
        cancel_url: &settings.cancel_url,
    };
    let url = state
        .billing
        .create_payment_checkout(&request)
        .await
        .map_err(|e| {
            provider_failure(
                ErrorCode::PaymentSetupFailed,
                "Could not start the payment. Please try again later.",
                &format!("/shops/{shop_id}"),
                e,
            )
        })?;

    tracing::info!(
        shop_id,
        user_id = actor.user_id,
        amount = shop.price,
        "Payment checkout created"
    );
    Ok(RedirectUrl { url })
}

/// Subscription checkout for the configured price
pub async fn subscription_checkout(state: &AppState, actor: &Actor) -> ServiceResult<RedirectUrl> {
    let settings = &state.billing_settings;
    if settings.subscription_price_id.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::ConfigError,
            "Subscription price is not configured",
        )
        .into());
    }
    let profile = member::get_or_create(&state.pool, actor.user_id).await?;

    let request = SubscriptionCheckout {
        price_id: &settings.subscription_price_id,
        customer_id: profile.stripe_customer_id.as_deref(),
        success_url: &settings.success_url,
        cancel_url: &settings.cancel_url,
    };
    let url = state
        .billing
        .create_subscription_checkout(&request)
        .await
        .map_err(|e| {
            provider_failure(
                ErrorCode::PaymentSetupFailed,
                "Could not start the subscription. Please try again later.",
                &settings.member_edit_path,
                e,
            )
        })?;

    tracing::info!(user_id = actor.user_id, "Subscription checkout created");
    Ok(RedirectUrl { url })
}

/// Billing portal session; the provider customer is created on first use
pub async fn billing_portal(state: &AppState, actor: &Actor) -> ServiceResult<RedirectUrl> {
    let settings = &state.billing_settings;
    let profile = member::get_or_create(&state.pool, actor.user_id).await?;

    let customer_id = match profile.stripe_customer_id {
        Some(id) => id,
        None => {
            let account = user::find_by_id(&state.pool, actor.user_id)
                .await?
                .ok_or_else(AppError::not_authenticated)?;
            let name = [
                profile.display_name.trim().to_string(),
                account.full_name(),
                account.username.clone(),
            ]
            .into_iter()
            .find(|n| !n.is_empty())
            .unwrap_or_default();

            let created = state
                .billing
                .create_customer(&account.email, &name, account.id)
                .await
                .map_err(|e| {
                    provider_failure(
                        ErrorCode::BillingCustomerFailed,
                        "Could not open the billing portal. Please try again later.",
                        &settings.member_edit_path,
                        e,
                    )
                })?;
            member::set_stripe_customer(&state.pool, actor.user_id, &created).await?;
            tracing::info!(user_id = actor.user_id, "Billing customer created");

            // a concurrent request may have stored its customer first
            member::find_by_user(&state.pool, actor.user_id)
                .await?
                .and_then(|p| p.stripe_customer_id)
                .unwrap_or(created)
        }
    };

    let url = state
        .billing
        .create_billing_portal_session(&customer_id, &settings.member_edit_url)
        .await
        .map_err(|e| {
            provider_failure(
                ErrorCode::BillingPortalUnavailable,
                "Could not open the billing portal. Please try again later.",
                &settings.member_edit_path,
                e,
            )
        })?;
    Ok(RedirectUrl { url })
}
