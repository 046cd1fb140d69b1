//! OAuth provider variants and their endpoint configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{DomainErrorKind, Error, InternalErrorKind};

/// Known OAuth providers for browser login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Google,
    GitHub,
    HuggingFace,
    Discord,
}

impl ProviderKind {
    /// Get the provider identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Google => "google",
            ProviderKind::GitHub => "github",
            ProviderKind::HuggingFace => "huggingface",
            ProviderKind::Discord => "discord",
        }
    }

    /// The JSON field in this provider's user-info payload that uniquely
    /// identifies the authenticated subject.
    pub fn id_key(&self) -> &'static str {
        match self {
            ProviderKind::Google | ProviderKind::HuggingFace => "sub",
            ProviderKind::GitHub | ProviderKind::Discord => "id",
        }
    }

    /// Scopes requested when the caller supplies none.
    pub fn default_scope(&self) -> Vec<String> {
        let scopes: &[&str] = match self {
            ProviderKind::Google => &[
                "openid",
                "https://www.googleapis.com/auth/userinfo.email",
                "https://www.googleapis.com/auth/userinfo.profile",
            ],
            ProviderKind::GitHub => &["user"],
            ProviderKind::HuggingFace => &["openid", "profile"],
            ProviderKind::Discord => &[
                "applications.commands",
                "applications.commands.permissions.update",
                "identify",
            ],
        };
        scopes.iter().map(|s| s.to_string()).collect()
    }

    /// The production endpoints for this provider.
    pub fn default_urls(&self) -> ProviderUrls {
        match self {
            ProviderKind::Google => ProviderUrls {
                authorize_url: "https://accounts.google.com/o/oauth2/v2/auth".to_string(),
                token_url: "https://www.googleapis.com/oauth2/v4/token".to_string(),
                info_url: "https://www.googleapis.com/oauth2/v3/userinfo".to_string(),
                revoke_url: None,
            },
            ProviderKind::GitHub => ProviderUrls {
                authorize_url: "https://github.com/login/oauth/authorize".to_string(),
                token_url: "https://github.com/login/oauth/access_token".to_string(),
                info_url: "https://api.github.com/user".to_string(),
                revoke_url: None,
            },
            ProviderKind::HuggingFace => ProviderUrls {
                authorize_url: "https://huggingface.co/oauth/authorize".to_string(),
                token_url: "https://huggingface.co/oauth/token".to_string(),
                info_url: "https://huggingface.co/oauth/userinfo".to_string(),
                revoke_url: None,
            },
            ProviderKind::Discord => ProviderUrls {
                authorize_url: "https://discord.com/oauth2/authorize".to_string(),
                token_url: "https://discord.com/api/oauth2/token".to_string(),
                info_url: "https://discord.com/api/users/@me".to_string(),
                revoke_url: Some("https://discord.com/api/oauth2/token/revoke".to_string()),
            },
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ProviderKindParseError;

impl FromStr for ProviderKind {
    type Err = ProviderKindParseError;
    fn from_str(name: &str) -> Result<ProviderKind, Self::Err> {
        match name.to_lowercase().as_str() {
            "google" => Ok(ProviderKind::Google),
            "github" => Ok(ProviderKind::GitHub),
            "huggingface" => Ok(ProviderKind::HuggingFace),
            "discord" => Ok(ProviderKind::Discord),
            _ => Err(ProviderKindParseError),
        }
    }
}

/// Endpoint URLs for a provider's OAuth surface.
///
/// Defaults come from [`ProviderKind::default_urls`]; tests override them to
/// point at a stub server.
#[derive(Debug, Clone)]
pub struct ProviderUrls {
    pub authorize_url: String,
    pub token_url: String,
    pub info_url: String,
    /// Token revocation endpoint. Only Discord publishes one; no revocation
    /// call is issued by this crate.
    pub revoke_url: Option<String>,
}

impl ProviderUrls {
    /// Every URL must be a non-empty absolute URL.
    pub(crate) fn validate(&self) -> Result<(), Error> {
        let mut urls = vec![&self.authorize_url, &self.token_url, &self.info_url];
        if let Some(revoke_url) = &self.revoke_url {
            urls.push(revoke_url);
        }
        for url in urls {
            if url.is_empty() || Url::parse(url).is_err() {
                return Err(Error {
                    source: None,
                    error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
                });
            }
        }
        Ok(())
    }
}
