//! Provider-agnostic OAuth2 authorization-code client.
//!
//! One client is constructed per application with long-lived credentials and
//! shared across requests. The code-for-token exchange returns the token as a
//! value instead of caching it on the client, so the client itself stays
//! immutable and safe to share.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use log::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::error::{DomainErrorKind, Error, ExternalErrorKind, InternalErrorKind};
use crate::gateway::oauth::provider::{ProviderKind, ProviderUrls};

/// OAuth token response from a provider's token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    pub expires_in: Option<i64>,
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
}

/// User info from a provider's info endpoint.
///
/// Providers disagree wildly on payload shape, so this stays an opaque JSON
/// object. The only field the login flow relies on is the provider's identity
/// field (`sub`, `id`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserInfo(pub serde_json::Map<String, Value>);

impl UserInfo {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The identity value stored under `id_key`.
    pub fn ident(&self, id_key: &str) -> Result<Value, Error> {
        self.get(id_key).cloned().ok_or_else(|| Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::MissingField(
                id_key.to_string(),
            )),
        })
    }
}

/// Request to exchange an authorization code for tokens (JSON-body providers).
#[derive(Debug, Serialize)]
struct TokenExchangeRequest {
    code: String,
    redirect_uri: String,
    client_id: String,
    client_secret: String,
    grant_type: String,
}

/// Discord's variant: form-encoded body, credentials via HTTP Basic auth,
/// no redirect_uri.
#[derive(Debug, Serialize)]
struct DiscordTokenExchangeRequest {
    grant_type: String,
    code: String,
}

/// Optional construction parameters for [`OauthClient`].
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Scopes to request; the provider default applies when absent.
    pub scope: Option<Vec<String>>,
    /// CSRF state; generated for HuggingFace when absent.
    pub state: Option<String>,
    /// An authorization code captured out-of-band, e.g. from a pasted
    /// redirect URL run through [`super::decode`].
    pub code: Option<String>,
    /// Discord: authorize as a user install (integration_type 1) instead of
    /// a guild install (0).
    pub is_user: bool,
    /// Discord permissions bitmask. Accepted and stored but never sent in the
    /// authorize link; kept for parity with the upstream flow.
    pub perms: u64,
}

/// OAuth2 client bound to one provider's endpoints.
pub struct OauthClient {
    kind: ProviderKind,
    client_id: String,
    client_secret: String,
    scope: Vec<String>,
    state: Option<String>,
    code: Option<String>,
    integration_type: u8,
    perms: u64,
    urls: ProviderUrls,
    http_client: reqwest::Client,
}

impl OauthClient {
    /// Create a client against the provider's production endpoints.
    pub fn new(
        kind: ProviderKind,
        client_id: &str,
        client_secret: &str,
        options: ClientOptions,
    ) -> Result<Self, Error> {
        Self::with_urls(kind, client_id, client_secret, options, kind.default_urls())
    }

    /// Create a client with explicit endpoint URLs.
    ///
    /// Scope and state resolution happens here, once: an absent scope takes
    /// the provider default, and HuggingFace receives a generated CSRF state
    /// when none was supplied (its authorize endpoint mandates one).
    pub fn with_urls(
        kind: ProviderKind,
        client_id: &str,
        client_secret: &str,
        options: ClientOptions,
        urls: ProviderUrls,
    ) -> Result<Self, Error> {
        if client_id.is_empty() || client_secret.is_empty() {
            return Err(Error {
                source: None,
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
            });
        }
        urls.validate()?;

        let scope = options.scope.unwrap_or_else(|| kind.default_scope());
        let state = match (kind, options.state) {
            (ProviderKind::HuggingFace, None) => Some(generate_state()),
            (_, state) => state,
        };

        let http_client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            kind,
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            scope,
            state,
            code: options.code,
            integration_type: u8::from(options.is_user),
            perms: options.perms,
            urls,
            http_client,
        })
    }

    /// Create a Google client from a Google client-credentials JSON file
    /// (the downloadable file holding a `web` object with `client_id` and
    /// `client_secret`).
    pub fn google_from_file(fname: impl AsRef<Path>, options: ClientOptions) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(fname).map_err(|e| Error {
            source: Some(Box::new(e)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
        })?;
        let creds: Value = serde_json::from_str(&contents).map_err(|e| Error {
            source: Some(Box::new(e)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
        })?;
        let web = &creds["web"];
        let client_id = web["client_id"].as_str().unwrap_or_default().to_string();
        let client_secret = web["client_secret"].as_str().unwrap_or_default().to_string();

        Self::new(ProviderKind::Google, &client_id, &client_secret, options)
    }

    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    pub fn id_key(&self) -> &'static str {
        self.kind.id_key()
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    /// The authorization code supplied at construction, if any.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// The Discord permissions bitmask supplied at construction. Stored but
    /// never transmitted in the authorize link.
    pub fn perms(&self) -> u64 {
        self.perms
    }

    pub fn urls(&self) -> &ProviderUrls {
        &self.urls
    }

    /// Generate the authorization URL the browser should be sent to.
    ///
    /// No network call occurs; the returned string is directly usable as an
    /// HTTP redirect target. Per-call `scope`/`state` override the values
    /// resolved at construction.
    ///
    /// Discord's authorize endpoint takes no `redirect_uri` and an extra
    /// `integration_type` instead; its permissions/prompt parameters are
    /// deliberately not sent.
    pub fn login_link(
        &self,
        redirect_uri: &str,
        scope: Option<&[String]>,
        state: Option<&str>,
    ) -> String {
        let scope = scope.unwrap_or(&self.scope).join(" ");
        let state = state.or(self.state.as_deref());

        match self.kind {
            ProviderKind::Discord => format!(
                "{}?\
                response_type=code&\
                client_id={}&\
                integration_type={}&\
                scope={}",
                self.urls.authorize_url,
                urlencoding::encode(&self.client_id),
                self.integration_type,
                urlencoding::encode(&scope),
            ),
            _ => {
                let mut link = format!(
                    "{}?\
                    response_type=code&\
                    client_id={}&\
                    redirect_uri={}&\
                    scope={}",
                    self.urls.authorize_url,
                    urlencoding::encode(&self.client_id),
                    urlencoding::encode(redirect_uri),
                    urlencoding::encode(&scope),
                );
                if let Some(state) = state {
                    link.push_str(&format!("&state={}", urlencoding::encode(state)));
                }
                link
            }
        }
    }

    /// Exchange an authorization code for tokens.
    ///
    /// Returns the token response as a value; nothing is cached on the
    /// client. A non-2xx answer from the token endpoint is surfaced as-is,
    /// untouched and unretried.
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenResponse, Error> {
        debug!("Exchanging {} authorization code for tokens", self.kind);

        let response = match self.kind {
            ProviderKind::Discord => {
                let request = DiscordTokenExchangeRequest {
                    grant_type: "authorization_code".to_string(),
                    code: code.to_string(),
                };
                self.http_client
                    .post(&self.urls.token_url)
                    .form(&request)
                    .basic_auth(&self.client_id, Some(&self.client_secret))
                    .send()
                    .await
            }
            _ => {
                let request = TokenExchangeRequest {
                    code: code.to_string(),
                    redirect_uri: redirect_uri.to_string(),
                    client_id: self.client_id.clone(),
                    client_secret: self.client_secret.clone(),
                    grant_type: "authorization_code".to_string(),
                };
                self.http_client
                    .post(&self.urls.token_url)
                    .json(&request)
                    .send()
                    .await
            }
        }
        .map_err(|e| {
            warn!("Failed to exchange {} OAuth code: {:?}", self.kind, e);
            Error {
                source: Some(Box::new(e)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{} token endpoint error ({status}): {body}", self.kind);
            return Err(Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::TokenExchange {
                    status: status.as_u16(),
                    body,
                }),
            });
        }

        let tokens: TokenResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse {} token response: {:?}", self.kind, e);
            Error {
                source: Some(Box::new(e)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Parse),
            }
        })?;
        if tokens.access_token.is_empty() {
            warn!("{} token response carried no access token", self.kind);
            return Err(Error {
                source: None,
                error_kind: DomainErrorKind::Internal(InternalErrorKind::MissingToken),
            });
        }

        info!("Successfully exchanged {} OAuth code for tokens", self.kind);
        Ok(tokens)
    }

    /// Get user info using an access token.
    ///
    /// The body is parsed as JSON regardless of HTTP status: an error answer
    /// that isn't JSON surfaces lazily as a parse failure rather than failing
    /// fast on the status line.
    pub async fn get_info(&self, access_token: &str) -> Result<UserInfo, Error> {
        let response = self
            .http_client
            .get(&self.urls.info_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to get {} user info: {:?}", self.kind, e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
                }
            })?;

        let body = response.text().await?;
        let info: UserInfo = serde_json::from_str(&body)?;
        Ok(info)
    }

    /// Combines [`Self::exchange_code`] and [`Self::get_info`], threading the
    /// freshly returned access token through. Returns both the token response
    /// (for session storage) and the user info (for the authorization check).
    pub async fn exchange_and_fetch_info(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<(TokenResponse, UserInfo), Error> {
        let tokens = self.exchange_code(code, redirect_uri).await?;
        let info = self.get_info(&tokens.access_token).await?;
        Ok((tokens, info))
    }

    /// Run the full exchange and return only the provider identity value.
    pub async fn exchange_and_fetch_id(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<Value, Error> {
        let (_, info) = self.exchange_and_fetch_info(code, redirect_uri).await?;
        info.ident(self.id_key())
    }
}

/// Random URL-safe CSRF state: 16 bytes of entropy, base64url, no padding.
fn generate_state() -> String {
    let random_bytes: [u8; 16] = rand::thread_rng().gen();
    URL_SAFE_NO_PAD.encode(random_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use url::Url;

    fn test_client(kind: ProviderKind) -> OauthClient {
        OauthClient::new(kind, "test-id", "test-secret", ClientOptions::default()).unwrap()
    }

    fn test_client_with_server(kind: ProviderKind, server_url: &str) -> OauthClient {
        let urls = ProviderUrls {
            authorize_url: format!("{server_url}/authorize"),
            token_url: format!("{server_url}/token"),
            info_url: format!("{server_url}/userinfo"),
            revoke_url: None,
        };
        OauthClient::with_urls(kind, "test-id", "test-secret", ClientOptions::default(), urls)
            .unwrap()
    }

    fn query_param(link: &str, name: &str) -> Option<String> {
        let url = Url::parse(link).unwrap();
        url.query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn test_login_link_default_scope_per_provider() {
        let cases = [
            (
                ProviderKind::Google,
                "openid https://www.googleapis.com/auth/userinfo.email \
                 https://www.googleapis.com/auth/userinfo.profile",
            ),
            (ProviderKind::GitHub, "user"),
            (ProviderKind::HuggingFace, "openid profile"),
            (
                ProviderKind::Discord,
                "applications.commands applications.commands.permissions.update identify",
            ),
        ];
        for (kind, expected_scope) in cases {
            let link = test_client(kind).login_link("https://app.example.com/redirect", None, None);
            assert_eq!(
                query_param(&link, "scope").as_deref(),
                Some(expected_scope),
                "{kind} scope"
            );
            assert_eq!(query_param(&link, "response_type").as_deref(), Some("code"));
            assert_eq!(query_param(&link, "client_id").as_deref(), Some("test-id"));
        }
    }

    #[test]
    fn test_login_link_redirect_uri_presence() {
        let redirect_uri = "https://app.example.com/redirect";
        for kind in [
            ProviderKind::Google,
            ProviderKind::GitHub,
            ProviderKind::HuggingFace,
        ] {
            let link = test_client(kind).login_link(redirect_uri, None, None);
            assert_eq!(
                query_param(&link, "redirect_uri").as_deref(),
                Some(redirect_uri),
                "{kind} redirect_uri"
            );
        }

        // Discord takes integration_type instead of redirect_uri, and never
        // sends its permissions bitmask.
        let discord = OauthClient::new(
            ProviderKind::Discord,
            "test-id",
            "test-secret",
            ClientOptions {
                is_user: true,
                perms: 8,
                ..Default::default()
            },
        )
        .unwrap();
        let link = discord.login_link(redirect_uri, None, None);
        assert_eq!(query_param(&link, "redirect_uri"), None);
        assert_eq!(query_param(&link, "integration_type").as_deref(), Some("1"));
        assert_eq!(query_param(&link, "permissions"), None);
        assert_eq!(query_param(&link, "prompt"), None);
        assert_eq!(discord.perms(), 8);
    }

    #[test]
    fn test_login_link_explicit_scope_and_state_override() {
        let client = test_client(ProviderKind::GitHub);
        let scope = vec!["repo".to_string(), "user:email".to_string()];
        let link = client.login_link(
            "https://app.example.com/redirect",
            Some(&scope),
            Some("abc123"),
        );
        assert_eq!(query_param(&link, "scope").as_deref(), Some("repo user:email"));
        assert_eq!(query_param(&link, "state").as_deref(), Some("abc123"));
    }

    #[test]
    fn test_huggingface_generates_urlsafe_state() {
        let client = test_client(ProviderKind::HuggingFace);
        let state = client.state().expect("huggingface state must be generated");
        assert!(!state.is_empty());
        assert!(!state.contains(['=', '+', '/']));
        // 16 bytes of entropy base64url-encoded without padding.
        assert_eq!(state.len(), 22);

        let link = client.login_link("https://app.example.com/redirect", None, None);
        assert_eq!(query_param(&link, "state").as_deref(), Some(state));
    }

    #[test]
    fn test_supplied_state_kept_verbatim() {
        let client = OauthClient::new(
            ProviderKind::HuggingFace,
            "test-id",
            "test-secret",
            ClientOptions {
                state: Some("keep-me".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(client.state(), Some("keep-me"));
    }

    #[test]
    fn test_non_huggingface_has_no_generated_state() {
        for kind in [
            ProviderKind::Google,
            ProviderKind::GitHub,
            ProviderKind::Discord,
        ] {
            assert_eq!(test_client(kind).state(), None, "{kind} state");
        }
    }

    #[test]
    fn test_out_of_band_code_is_kept() {
        let (code, state, _) =
            crate::gateway::oauth::decode("https://host/redirect?code=C9&state=S9");
        let client = OauthClient::new(
            ProviderKind::GitHub,
            "test-id",
            "test-secret",
            ClientOptions {
                code: Some(code),
                state: Some(state),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(client.code(), Some("C9"));
        assert_eq!(client.state(), Some("S9"));
    }

    #[test]
    fn test_only_discord_publishes_revoke_endpoint() {
        let discord = test_client(ProviderKind::Discord);
        assert_eq!(
            discord.urls().revoke_url.as_deref(),
            Some("https://discord.com/api/oauth2/token/revoke")
        );
        assert!(test_client(ProviderKind::Google).urls().revoke_url.is_none());
    }

    #[test]
    fn test_empty_credentials_fail_construction() {
        for (id, secret) in [("", "secret"), ("id", ""), ("", "")] {
            let result =
                OauthClient::new(ProviderKind::Google, id, secret, ClientOptions::default());
            let err = result.err().expect("construction must fail");
            assert_eq!(
                err.error_kind,
                DomainErrorKind::Internal(InternalErrorKind::Config)
            );
        }
    }

    #[test]
    fn test_invalid_urls_fail_construction() {
        let urls = ProviderUrls {
            authorize_url: "not a url".to_string(),
            token_url: "https://example.com/token".to_string(),
            info_url: "https://example.com/userinfo".to_string(),
            revoke_url: None,
        };
        let result = OauthClient::with_urls(
            ProviderKind::GitHub,
            "test-id",
            "test-secret",
            ClientOptions::default(),
            urls,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_google_from_file() {
        let path = std::env::temp_dir().join(format!(
            "google-creds-{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"{"web": {"client_id": "file-id", "client_secret": "file-secret"}}"#,
        )
        .unwrap();

        let client = OauthClient::google_from_file(&path, ClientOptions::default()).unwrap();
        let link = client.login_link("https://app.example.com/redirect", None, None);
        assert_eq!(query_param(&link, "client_id").as_deref(), Some("file-id"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_google_from_file_missing_keys() {
        let path = std::env::temp_dir().join(format!(
            "google-creds-empty-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"installed": {}}"#).unwrap();

        let err = OauthClient::google_from_file(&path, ClientOptions::default())
            .err()
            .expect("missing web credentials must fail");
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Config)
        );

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_exchange_code_then_get_info_uses_bearer_token() {
        let mut server = Server::new_async().await;
        let client = test_client_with_server(ProviderKind::Google, &server.url());

        let token_mock = server
            .mock("POST", "/token")
            .match_body(Matcher::Json(serde_json::json!({
                "code": "C123",
                "redirect_uri": "https://app.example.com/redirect",
                "client_id": "test-id",
                "client_secret": "test-secret",
                "grant_type": "authorization_code",
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "T"}"#)
            .create_async()
            .await;
        let info_mock = server
            .mock("GET", "/userinfo")
            .match_header("authorization", "Bearer T")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"sub": "user-1", "name": "Test User"}"#)
            .create_async()
            .await;

        let tokens = client
            .exchange_code("C123", "https://app.example.com/redirect")
            .await
            .unwrap();
        assert_eq!(tokens.access_token, "T");

        let info = client.get_info(&tokens.access_token).await.unwrap();
        assert_eq!(info.get("sub"), Some(&serde_json::json!("user-1")));

        token_mock.assert_async().await;
        info_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_discord_exchange_uses_basic_auth_form_body() {
        let mut server = Server::new_async().await;
        let client = test_client_with_server(ProviderKind::Discord, &server.url());

        let expected_auth = format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode("test-id:test-secret")
        );
        let token_mock = server
            .mock("POST", "/token")
            .match_header("authorization", expected_auth.as_str())
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
                Matcher::UrlEncoded("code".into(), "C456".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "DT", "token_type": "Bearer"}"#)
            .create_async()
            .await;

        let tokens = client
            .exchange_code("C456", "https://app.example.com/redirect")
            .await
            .unwrap();
        assert_eq!(tokens.access_token, "DT");
        assert_eq!(tokens.token_type, "Bearer");

        token_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_exchange_code_error_status_surfaces_body() {
        let mut server = Server::new_async().await;
        let client = test_client_with_server(ProviderKind::GitHub, &server.url());

        server
            .mock("POST", "/token")
            .with_status(400)
            .with_body(r#"{"error": "bad_verification_code"}"#)
            .create_async()
            .await;

        let err = client
            .exchange_code("expired", "https://app.example.com/redirect")
            .await
            .err()
            .expect("exchange must fail");
        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::TokenExchange {
                status: 400,
                body: r#"{"error": "bad_verification_code"}"#.to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_exchange_code_without_access_token_is_missing_token() {
        let mut server = Server::new_async().await;
        let client = test_client_with_server(ProviderKind::Google, &server.url());

        server
            .mock("POST", "/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token_type": "Bearer"}"#)
            .create_async()
            .await;

        let err = client
            .exchange_code("C123", "https://app.example.com/redirect")
            .await
            .err()
            .expect("exchange must fail");
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::MissingToken)
        );
    }

    #[tokio::test]
    async fn test_get_info_non_json_body_is_parse_error() {
        let mut server = Server::new_async().await;
        let client = test_client_with_server(ProviderKind::Google, &server.url());

        server
            .mock("GET", "/userinfo")
            .with_status(401)
            .with_body("Unauthorized")
            .create_async()
            .await;

        let err = client.get_info("stale").await.err().expect("must fail");
        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::Parse)
        );
    }

    #[tokio::test]
    async fn test_exchange_and_fetch_id_returns_identity_field() {
        let mut server = Server::new_async().await;
        let client = test_client_with_server(ProviderKind::GitHub, &server.url());

        server
            .mock("POST", "/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "T"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/userinfo")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": 12345, "login": "octocat"}"#)
            .create_async()
            .await;

        let ident = client
            .exchange_and_fetch_id("C123", "https://app.example.com/redirect")
            .await
            .unwrap();
        assert_eq!(ident, serde_json::json!(12345));
    }

    #[tokio::test]
    async fn test_exchange_and_fetch_id_missing_field() {
        let mut server = Server::new_async().await;
        let client = test_client_with_server(ProviderKind::GitHub, &server.url());

        server
            .mock("POST", "/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "T"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/userinfo")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"login": "octocat"}"#)
            .create_async()
            .await;

        let err = client
            .exchange_and_fetch_id("C123", "https://app.example.com/redirect")
            .await
            .err()
            .expect("must fail");
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::MissingField("id".to_string()))
        );
    }
}
