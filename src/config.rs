use serde::Deserialize;
use std::path::Path;

/// Top-level configuration parsed from TOML.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub grant: GrantConfig,
}

/// Server-level configuration.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Prefix the token route is mounted under, e.g. `/force-mock-oauth-server-app`.
    /// Empty mounts it at the root.
    #[serde(default)]
    pub context_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            context_path: String::new(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9966
}

/// Values returned verbatim in every token response.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GrantConfig {
    #[serde(default = "default_id")]
    pub id: String,
    /// Session id handed back as the access token.
    #[serde(default = "default_access_token")]
    pub access_token: String,
    #[serde(default = "default_instance_url")]
    pub instance_url: String,
    #[serde(default = "default_refresh_token")]
    pub refresh_token: String,
    #[serde(default = "default_signature")]
    pub signature: String,
}

impl Default for GrantConfig {
    fn default() -> Self {
        Self {
            id: default_id(),
            access_token: default_access_token(),
            instance_url: default_instance_url(),
            refresh_token: default_refresh_token(),
            signature: default_signature(),
        }
    }
}

fn default_id() -> String {
    "https://login.salesforce.com/id/00D50000000IZ3ZEAW/00550000001fg5OAAQ".to_string()
}

fn default_access_token() -> String {
    "222".to_string()
}

fn default_instance_url() -> String {
    "http://localhost:9966/force-mock-oauth-server-app/oauth2".to_string()
}

fn default_refresh_token() -> String {
    "333".to_string()
}

fn default_signature() -> String {
    "555".to_string()
}

/// Load config from an optional TOML file, apply environment overrides, and validate.
///
/// Without a path every value falls back to its default.
pub fn load_config(path: Option<&Path>) -> Result<Config, String> {
    let mut config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path).map_err(|e| {
                format!("Failed to read config file '{}': {}", path.display(), e)
            })?;
            parse_config(&content)?
        }
        None => Config::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate(&config)?;

    Ok(config)
}

fn parse_config(content: &str) -> Result<Config, String> {
    toml::from_str(content).map_err(|e| format!("Failed to parse TOML config: {e}"))
}

/// Apply environment variable overrides. `lookup` is `std::env::var` outside tests.
fn apply_env_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup("MOCK_OAUTH_INSTANCE_URL") {
        config.grant.instance_url = val;
    }
    if let Some(val) = lookup("MOCK_OAUTH_ACCESS_TOKEN") {
        config.grant.access_token = val;
    }
}

/// Validate the entire configuration. Returns an error string on failure.
fn validate(config: &Config) -> Result<(), String> {
    validate_server(&config.server)?;
    validate_grant(&config.grant)?;
    Ok(())
}

fn validate_server(server: &ServerConfig) -> Result<(), String> {
    if server.host.is_empty() {
        return Err("server.host must not be empty".to_string());
    }

    if !server.context_path.is_empty() {
        let path_regex = regex_lite::Regex::new(r"^(/[A-Za-z0-9._~-]+)+$")
            .map_err(|e| format!("internal regex error: {e}"))?;
        if !path_regex.is_match(&server.context_path) {
            return Err(format!(
                "server.context_path '{}' must look like /segment[/segment...] with no trailing slash",
                server.context_path
            ));
        }
    }

    Ok(())
}

fn validate_grant(grant: &GrantConfig) -> Result<(), String> {
    let missing: Vec<&str> = [
        ("id", grant.id.as_str()),
        ("access_token", grant.access_token.as_str()),
        ("instance_url", grant.instance_url.as_str()),
        ("refresh_token", grant.refresh_token.as_str()),
        ("signature", grant.signature.as_str()),
    ]
    .iter()
    .filter(|(_, v)| v.is_empty())
    .map(|(k, _)| *k)
    .collect();

    if !missing.is_empty() {
        return Err(format!(
            "grant values must not be empty: {}",
            missing.join(", ")
        ));
    }

    for (key, url) in [("grant.id", &grant.id), ("grant.instance_url", &grant.instance_url)] {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(format!("{key} must be a valid HTTP(S) URL"));
        }
    }

    // The SDK appends its own paths to the instance URL
    if grant.instance_url.ends_with('/') {
        return Err("grant.instance_url must not have a trailing slash".to_string());
    }

    Ok(())
}
