use std::sync::Arc;

use axum::{Router, routing::get};
use stackprovider_auth_axum::stackprovider_auth::{
    Account, AccountError, AccountStore, AuthConfig, connect_account_store,
};
use stackprovider_auth_axum::{AuthState, auth_api_router, with_session_gate};

mod handlers;
mod provider;
mod server;

use crate::handlers::{
    about, contact, dashboard, forget_password, index, reset_password, settings, sign_in,
    two_factor,
};
use crate::server::{init_tracing, spawn_http_server};

const DEFAULT_DEMO_ACCOUNTS: &str = "known@example.com";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing(env!("CARGO_CRATE_NAME"));

    let config = Arc::new(AuthConfig::from_env()?);
    tracing::info!(
        app = %config.app_name,
        production = config.profile.is_production(),
        base_url = %config.public_base_url(),
        "Loaded auth configuration"
    );

    let accounts = connect_account_store(&config.account_store).await?;
    let seed = std::env::var("DEMO_ACCOUNTS").unwrap_or_else(|_| DEFAULT_DEMO_ACCOUNTS.to_string());
    for email in seed.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        match accounts.insert_account(Account::new(email, "Demo User")).await {
            Ok(account) => tracing::info!(email = %account.email, "Seeded demo account"),
            Err(AccountError::Conflict(_)) => tracing::debug!(email, "Demo account already exists"),
            Err(e) => return Err(e.into()),
        }
    }

    let state = AuthState::new(config.clone(), accounts);

    let pages = Router::new()
        .route("/", get(index))
        .route("/about", get(about))
        .route("/contact", get(contact))
        .route("/sign-in", get(sign_in))
        .route("/forget-password", get(forget_password))
        .route("/reset-password", get(reset_password))
        .route("/two-factor", get(two_factor))
        .route("/dashboard", get(dashboard))
        .route("/settings", get(settings));

    let app = with_session_gate(pages, state.clone())
        .merge(auth_api_router(provider::router(config), state));

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);

    spawn_http_server(port, app).await??;
    Ok(())
}
