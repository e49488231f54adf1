//! Anivise Server — application entry point.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use anivise_auth::config::AuthConfig;
use anivise_auth::context::OrgContextResolver;
use anivise_auth::impersonation::ImpersonationCodec;
use anivise_auth::webhook::WebhookAuthenticator;
use anivise_directory::{
    CachedSecretProvider, MemoryAuditSink, MemoryDirectory, MemoryIdentityProvider, MemoryJobStore,
    MemoryNotifier, MemorySecretStore,
};
use anivise_server::state::AppState;

fn env_flag(name: &str) -> bool {
    std::env::var(name).is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("anivise=info".parse().unwrap()),
        )
        .json()
        .init();

    let config = AuthConfig {
        impersonation_secret: std::env::var("ANIVISE_IMPERSONATION_SECRET").ok(),
        base_domain: std::env::var("ANIVISE_BASE_DOMAIN").unwrap_or_else(|_| "localhost".into()),
        webhook_fallback_secret: std::env::var("ANIVISE_WEBHOOK_SECRET").ok(),
        first_membership_fallback: env_flag("ANIVISE_FIRST_MEMBERSHIP_FALLBACK"),
    };

    // No signing secret, no server: refusing to start beats minting
    // forgeable impersonation cookies.
    let codec = match ImpersonationCodec::new(&config) {
        Ok(codec) => codec,
        Err(e) => {
            tracing::error!(error = %e, "refusing to start");
            std::process::exit(1);
        }
    };

    let directory = MemoryDirectory::new();
    let secrets = CachedSecretProvider::new(MemorySecretStore::new(), Duration::from_secs(30));
    let state = AppState {
        identity: MemoryIdentityProvider::new(),
        directory: directory.clone(),
        jobs: MemoryJobStore::new(),
        notifier: MemoryNotifier::new(),
        audit: MemoryAuditSink::new(),
        webhook: Arc::new(WebhookAuthenticator::new(
            secrets,
            config.webhook_fallback_secret.clone(),
        )),
        resolver: Arc::new(OrgContextResolver::new(directory, &config)),
        codec: Arc::new(codec),
        config: Arc::new(config),
        secure_cookies: env_flag("ANIVISE_SECURE_COOKIES"),
    };
    let app = anivise_server::router(state);

    let bind = std::env::var("ANIVISE_BIND").unwrap_or_else(|_| "127.0.0.1:8080".into());
    let listener = match tokio::net::TcpListener::bind(&bind).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %bind, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(%bind, "Starting Anivise server...");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
    }
    tracing::info!("Anivise server stopped.");
}
