//! Subscription plan table
//!
//! Billing itself is handled by the payment provider behind the session provider. This
//! module only carries the plan table and credentials that the provider is configured with.

use serde::Serialize;
use std::fmt;

const DEFAULT_FREE_TRIAL_DAYS: u32 = 7;

const DEFAULT_PLUS_PRICE_ID: &str = "price_1RoxnJHmTADgihIthZTLmrPn";
const DEFAULT_PLUS_ANNUAL_PRICE_ID: &str = "price_1Roxo5HmTADgihItEbJu5llL";
const DEFAULT_PRO_PRICE_ID: &str = "price_1RoxnRHmTADgihIt4y8c0lVE";
const DEFAULT_PRO_ANNUAL_PRICE_ID: &str = "price_1RoxnoHmTADgihItzFvVP8KT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlan {
    pub name: String,
    pub price_id: String,
    pub annual_discount_price_id: String,
    pub free_trial_days: u32,
}

#[derive(Clone)]
pub struct BillingConfig {
    pub subscriptions_enabled: bool,
    pub allow_retrials_for_different_plans: bool,
    pub api_key: String,
    pub webhook_secret: Option<String>,
    pub plans: Vec<SubscriptionPlan>,
}

impl fmt::Debug for BillingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BillingConfig")
            .field("subscriptions_enabled", &self.subscriptions_enabled)
            .field(
                "allow_retrials_for_different_plans",
                &self.allow_retrials_for_different_plans,
            )
            .field("api_key", &"[redacted]")
            .field(
                "webhook_secret",
                &self.webhook_secret.as_ref().map(|_| "[redacted]"),
            )
            .field("plans", &self.plans)
            .finish()
    }
}

impl BillingConfig {
    pub(crate) fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let webhook_secret = lookup("STRIPE_WEBHOOK_SECRET").filter(|s| !s.is_empty());
        if webhook_secret.is_none() {
            tracing::warn!("STRIPE_WEBHOOK_SECRET is not set; billing webhooks cannot be verified");
        }

        let plans = vec![
            SubscriptionPlan {
                name: "Plus".to_string(),
                price_id: var_or("STRIPE_PLUS_PRICE_ID", DEFAULT_PLUS_PRICE_ID),
                annual_discount_price_id: var_or(
                    "STRIPE_PLUS_ANNUAL_PRICE_ID",
                    DEFAULT_PLUS_ANNUAL_PRICE_ID,
                ),
                free_trial_days: DEFAULT_FREE_TRIAL_DAYS,
            },
            SubscriptionPlan {
                name: "Pro".to_string(),
                price_id: var_or("STRIPE_PRO_PRICE_ID", DEFAULT_PRO_PRICE_ID),
                annual_discount_price_id: var_or(
                    "STRIPE_PRO_ANNUAL_PRICE_ID",
                    DEFAULT_PRO_ANNUAL_PRICE_ID,
                ),
                free_trial_days: DEFAULT_FREE_TRIAL_DAYS,
            },
        ];

        Self {
            subscriptions_enabled: true,
            allow_retrials_for_different_plans: true,
            api_key: var_or("STRIPE_KEY", "sk_test_"),
            webhook_secret,
            plans,
        }
    }

    /// Look up a plan by name, ignoring case
    pub fn plan(&self, name: &str) -> Option<&SubscriptionPlan> {
        self.plans
            .iter()
            .find(|plan| plan.name.eq_ignore_ascii_case(name))
    }
}
