//! Map validated CLI matches to the action to execute.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{
    ARG_IDENTITY_API_KEY, ARG_IDENTITY_URL, ARG_PORT, ARG_STORE_API_KEY, ARG_STORE_URL,
};
use anyhow::{Context, Result};
use secrecy::SecretString;

/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);

    let identity_url = matches
        .get_one::<String>(ARG_IDENTITY_URL)
        .cloned()
        .context("missing required argument: --identity-url")?;

    let store_url = matches
        .get_one::<String>(ARG_STORE_URL)
        .cloned()
        .context("missing required argument: --store-url")?;

    let identity_api_key = matches
        .get_one::<String>(ARG_IDENTITY_API_KEY)
        .cloned()
        .map(SecretString::from);

    let store_api_key = matches
        .get_one::<String>(ARG_STORE_API_KEY)
        .cloned()
        .map(SecretString::from);

    Ok(Action::Server(Args {
        port,
        identity_url,
        identity_api_key,
        store_url,
        store_api_key,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::actions::Action;

    #[test]
    fn maps_matches_to_server_args() {
        temp_env::with_vars(
            [
                ("APROBI_IDENTITY_URL", Some("https://identity.example.com")),
                ("APROBI_STORE_URL", Some("https://store.example.com")),
                ("APROBI_STORE_API_KEY", Some("store-key")),
                ("APROBI_PORT", Some("9090")),
            ],
            || {
                let command = crate::cli::commands::new();
                let matches = command.get_matches_from(vec!["aprobi"]);
                let action = handler(&matches).expect("handler must succeed");

                let Action::Server(args) = action;
                assert_eq!(args.port, 9090);
                assert_eq!(args.identity_url, "https://identity.example.com");
                assert!(args.identity_api_key.is_none());
                assert_eq!(args.store_url, "https://store.example.com");
                assert!(args.store_api_key.is_some());
            },
        );
    }
}
