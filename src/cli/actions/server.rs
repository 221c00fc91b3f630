use crate::api::{self, AppState};
use crate::remote::{identity::RestIdentityProvider, store::RestDocumentStore};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub identity_url: String,
    pub identity_api_key: Option<SecretString>,
    pub store_url: String,
    pub store_api_key: Option<SecretString>,
}

/// Execute the server action.
/// # Errors
/// Returns an error if a backend client cannot be built or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    let identity = RestIdentityProvider::new(&args.identity_url, args.identity_api_key)
        .context("Could not build identity provider client")?;

    let store = RestDocumentStore::new(&args.store_url, args.store_api_key)
        .context("Could not build document store client")?;

    let state = Arc::new(AppState::new(Arc::new(identity), Arc::new(store)));

    api::new(args.port, state).await
}

fn log_startup_args(args: &Args) {
    info!(
        port = args.port,
        identity_url = %args.identity_url,
        identity_api_key_set = args.identity_api_key.is_some(),
        store_url = %args.store_url,
        store_api_key_set = args.store_api_key.is_some(),
        "Startup configuration"
    );
}
