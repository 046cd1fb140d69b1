use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq)]
pub enum RustEnv {
    Development,
    Production,
    Staging,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RustEnvParseError;

impl FromStr for RustEnv {
    type Err = RustEnvParseError;
    fn from_str(level: &str) -> Result<RustEnv, Self::Err> {
        match level.to_lowercase().as_str() {
            "development" => Ok(RustEnv::Development),
            "production" => Ok(RustEnv::Production),
            "staging" => Ok(RustEnv::Staging),
            _ => Err(RustEnvParseError),
        }
    }
}

impl fmt::Display for RustEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RustEnv::Development => write!(f, "development"),
            RustEnv::Production => write!(f, "production"),
            RustEnv::Staging => write!(f, "staging"),
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// A list of full CORS origin URLs that allowed to receive server responses.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = "http://localhost:3000,https://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// The identity provider to log users in against (google, github,
    /// huggingface or discord).
    #[arg(long, env, default_value = "google")]
    pub provider: String,

    /// Google OAuth client ID
    #[arg(long, env)]
    google_client_id: Option<String>,

    /// Google OAuth client secret
    #[arg(long, env)]
    google_client_secret: Option<String>,

    /// Path to a Google client-credentials JSON file. Takes precedence over
    /// the client id/secret pair when set.
    #[arg(long, env)]
    google_credentials_file: Option<String>,

    /// GitHub OAuth client ID
    #[arg(long, env)]
    github_client_id: Option<String>,

    /// GitHub OAuth client secret
    #[arg(long, env)]
    github_client_secret: Option<String>,

    /// HuggingFace OAuth client ID
    #[arg(long, env)]
    huggingface_client_id: Option<String>,

    /// HuggingFace OAuth client secret
    #[arg(long, env)]
    huggingface_client_secret: Option<String>,

    /// Discord OAuth client ID
    #[arg(long, env)]
    discord_client_id: Option<String>,

    /// Discord OAuth client secret
    #[arg(long, env)]
    discord_client_secret: Option<String>,

    /// Request Discord authorization as a user install rather than a guild
    /// install.
    #[arg(long, env, default_value_t = false)]
    pub discord_is_user: bool,

    /// Path of the host application's login page. The gate redirects
    /// unauthenticated requests here; the route itself is owned by the host.
    #[arg(long, env, default_value = "/login")]
    login_path: String,

    /// Path the provider redirects back to with the authorization code.
    #[arg(long, env, default_value = "/redirect")]
    redirect_path: String,

    /// Path that clears the session's login state.
    #[arg(long, env, default_value = "/logout")]
    logout_path: String,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "127.0.0.1")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 4000)]
    pub port: u16,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Set the Rust runtime environment to use.
    #[arg(
    short,
    long,
    env,
    default_value_t = RustEnv::Development,
    value_parser = clap::builder::PossibleValuesParser::new([
        "DEVELOPMENT", "PRODUCTION", "STAGING",
        "development", "production", "staging"
    ])
        .map(|s| s.parse::<RustEnv>().unwrap()),
    )]
    pub runtime_env: RustEnv,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    pub fn google_client_id(&self) -> Option<String> {
        self.google_client_id.clone()
    }

    pub fn google_client_secret(&self) -> Option<String> {
        self.google_client_secret.clone()
    }

    pub fn google_credentials_file(&self) -> Option<String> {
        self.google_credentials_file.clone()
    }

    pub fn github_client_id(&self) -> Option<String> {
        self.github_client_id.clone()
    }

    pub fn github_client_secret(&self) -> Option<String> {
        self.github_client_secret.clone()
    }

    pub fn huggingface_client_id(&self) -> Option<String> {
        self.huggingface_client_id.clone()
    }

    pub fn huggingface_client_secret(&self) -> Option<String> {
        self.huggingface_client_secret.clone()
    }

    pub fn discord_client_id(&self) -> Option<String> {
        self.discord_client_id.clone()
    }

    pub fn discord_client_secret(&self) -> Option<String> {
        self.discord_client_secret.clone()
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn redirect_path(&self) -> &str {
        &self.redirect_path
    }

    pub fn logout_path(&self) -> &str {
        &self.logout_path
    }

    pub fn runtime_env(&self) -> RustEnv {
        self.runtime_env.clone()
    }

    pub fn is_production(&self) -> bool {
        self.runtime_env() == RustEnv::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["social_login_rs"]);
        assert_eq!(config.provider, "google");
        assert_eq!(config.login_path(), "/login");
        assert_eq!(config.redirect_path(), "/redirect");
        assert_eq!(config.logout_path(), "/logout");
        assert_eq!(config.port, 4000);
        assert_eq!(config.runtime_env(), RustEnv::Development);
        assert!(!config.is_production());
    }

    #[test]
    fn test_provider_credentials_flags() {
        let config = Config::parse_from([
            "social_login_rs",
            "--provider",
            "discord",
            "--discord-client-id",
            "d-id",
            "--discord-client-secret",
            "d-secret",
            "--discord-is-user",
        ]);
        assert_eq!(config.discord_client_id().as_deref(), Some("d-id"));
        assert_eq!(config.discord_client_secret().as_deref(), Some("d-secret"));
        assert!(config.discord_is_user);
        assert_eq!(config.google_client_id(), None);
    }

    #[test]
    fn test_rust_env_round_trip() {
        assert_eq!("PRODUCTION".parse(), Ok(RustEnv::Production));
        assert_eq!(RustEnv::Staging.to_string(), "staging");
        assert_eq!("qa".parse::<RustEnv>(), Err(RustEnvParseError));
    }
}
