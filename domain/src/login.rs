//! Login-client assembly from process configuration.
//!
//! Fronts the OAuth gateway for the web layer: picks the configured provider,
//! pulls its credentials out of [`Config`] and hands back a ready client.

use crate::error::{DomainErrorKind, Error, InternalErrorKind};
use crate::gateway::oauth::{ClientOptions, OauthClient, ProviderKind};
use log::*;
use service::config::Config;

/// Build the provider client selected by `config.provider`.
///
/// Google honors a configured client-credentials JSON file before falling
/// back to the flag/env credential pair.
pub fn client_from_config(config: &Config) -> Result<OauthClient, Error> {
    let kind: ProviderKind = config.provider.parse().map_err(|_| {
        error!("Unknown login provider: {}", config.provider);
        Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
        }
    })?;

    if kind == ProviderKind::Google {
        if let Some(fname) = config.google_credentials_file() {
            info!("Configuring google login client from credentials file");
            return OauthClient::google_from_file(fname, ClientOptions::default());
        }
    }

    let (client_id, client_secret) = credentials_for(config, kind)?;
    let options = ClientOptions {
        is_user: config.discord_is_user,
        ..Default::default()
    };

    let client = OauthClient::new(kind, &client_id, &client_secret, options)?;
    info!("Configured {kind} login client");
    Ok(client)
}

fn credentials_for(config: &Config, kind: ProviderKind) -> Result<(String, String), Error> {
    let pair = match kind {
        ProviderKind::Google => (config.google_client_id(), config.google_client_secret()),
        ProviderKind::GitHub => (config.github_client_id(), config.github_client_secret()),
        ProviderKind::HuggingFace => (
            config.huggingface_client_id(),
            config.huggingface_client_secret(),
        ),
        ProviderKind::Discord => (config.discord_client_id(), config.discord_client_secret()),
    };

    match pair {
        (Some(client_id), Some(client_secret)) => Ok((client_id, client_secret)),
        _ => {
            error!("Missing {kind} client credentials");
            Err(Error {
                source: None,
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
            })
        }
    }
}
