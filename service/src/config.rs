use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default Salesforce login host used when `SALESFORCE_LOGIN_URL` is not set.
pub const DEFAULT_SALESFORCE_LOGIN_URL: &str = "https://login.salesforce.com";

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
    /// Login attempts started from one of these origins are redirected back to it.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = "http://localhost:3001"
    )]
    pub allowed_origins: Vec<String>,

    /// The base URL of the frontend application. Used as the return origin when the
    /// caller's origin is missing or not allowed.
    #[arg(long, env, default_value = "http://localhost:3001")]
    frontend_base_url: String,

    /// Consumer key of the Salesforce connected app.
    #[arg(long, env)]
    salesforce_client_id: Option<String>,

    /// Consumer secret of the Salesforce connected app.
    #[arg(long, env, hide_env_values = true)]
    salesforce_client_secret: Option<String>,

    /// Callback URL registered on the connected app, e.g.
    /// http://localhost:3000/auth/salesforce/callback
    #[arg(long, env)]
    salesforce_redirect_uri: Option<String>,

    /// The Salesforce login host. Override for sandboxes or to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_SALESFORCE_LOGIN_URL)]
    salesforce_login_url: String,

    /// The `prompt` value sent to the authorization endpoint. Empty omits it.
    #[arg(long, env, default_value = "login")]
    salesforce_prompt: String,

    /// Seconds a login attempt may take between redirect and callback.
    #[arg(long, env, default_value_t = 600)]
    pub oauth_state_ttl_seconds: u64,

    /// Session expiry duration in seconds (default: 2 hours = 7200 seconds)
    #[arg(long, env, default_value_t = 7200)]
    pub session_expiry_seconds: u64,

    /// Seconds between sweeps that evict expired login attempts and sessions.
    #[arg(long, env, default_value_t = 60)]
    pub store_cleanup_interval_seconds: u64,

    /// Timeout in seconds for calls to Salesforce.
    #[arg(long, env, default_value_t = 30)]
    pub http_timeout_seconds: u64,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "127.0.0.1")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 3000)]
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

    pub fn set_salesforce_login_url(mut self, login_url: String) -> Self {
        self.salesforce_login_url = login_url;
        self
    }

    pub fn set_salesforce_credentials(
        mut self,
        client_id: String,
        client_secret: String,
        redirect_uri: String,
    ) -> Self {
        self.salesforce_client_id = Some(client_id);
        self.salesforce_client_secret = Some(client_secret);
        self.salesforce_redirect_uri = Some(redirect_uri);
        self
    }

    pub fn salesforce_client_id(&self) -> Option<String> {
        self.salesforce_client_id.clone()
    }

    pub fn salesforce_client_secret(&self) -> Option<String> {
        self.salesforce_client_secret.clone()
    }

    pub fn salesforce_redirect_uri(&self) -> Option<String> {
        self.salesforce_redirect_uri.clone()
    }

    pub fn salesforce_login_url(&self) -> &str {
        &self.salesforce_login_url
    }

    /// Returns the authorization `prompt` value, if one should be sent.
    pub fn salesforce_prompt(&self) -> Option<String> {
        Some(self.salesforce_prompt.clone()).filter(|p| !p.is_empty())
    }

    /// Returns the frontend application base URL without a trailing slash.
    pub fn frontend_base_url(&self) -> &str {
        self.frontend_base_url.trim_end_matches('/')
    }

    /// Returns true if `origin` is one of the configured allowed origins.
    pub fn is_allowed_origin(&self, origin: &str) -> bool {
        self.allowed_origins
            .iter()
            .any(|allowed| allowed.trim_end_matches('/') == origin)
    }

    pub fn oauth_state_ttl(&self) -> Duration {
        Duration::from_secs(self.oauth_state_ttl_seconds)
    }

    pub fn session_expiry(&self) -> Duration {
        Duration::from_secs(self.session_expiry_seconds)
    }

    pub fn store_cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.store_cleanup_interval_seconds.max(1))
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds.max(1))
    }

    pub fn runtime_env(&self) -> RustEnv {
        self.runtime_env.clone()
    }

    pub fn is_production(&self) -> bool {
        self.runtime_env() == RustEnv::Production
    }
}
