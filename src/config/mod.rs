use secrecy::Secret;
use serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub gemini: GeminiSettings,
}

#[derive(Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Secret the session-cookie signing key is derived from. When unset an
    /// ephemeral key is generated at startup and sessions do not survive a
    /// restart.
    #[serde(default)]
    pub session_secret: Option<Secret<String>>,
    /// Certificate/key pair for terminating TLS. When unset the server
    /// speaks plain HTTP (tests, reverse-proxy deployments).
    #[serde(default)]
    pub tls: Option<TlsSettings>,
}

#[derive(Deserialize, Clone)]
pub struct TlsSettings {
    pub cert_path: String,
    pub key_path: String,
}

#[derive(Deserialize, Clone)]
pub struct GeminiSettings {
    /// Required; there is no default, so a missing key fails configuration
    /// loading and prevents startup.
    pub api_key: Secret<String>,
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL override, so tests can point the client at a stub server.
    #[serde(default)]
    pub api_base: Option<String>,
    #[serde(default = "default_generation_timeout_secs")]
    pub generation_timeout_secs: u64,
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_generation_timeout_secs() -> u64 {
    30
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("config");

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")).required(true))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
