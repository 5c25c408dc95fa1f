use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    /// Base address of the facility backend. A production deployment points
    /// at the reverse-proxied origin; local development targets the backend
    /// directly.
    pub base_url: String,
}

/// Resolution order: built-in defaults, then an optional config/cockpit.toml,
/// then COCKPIT_* environment variables (COCKPIT_API__BASE_URL).
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .set_default("api.base_url", "http://localhost:8000")?
        .add_source(config::File::with_name("config/cockpit").required(false))
        .add_source(config::Environment::with_prefix("COCKPIT").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_target_local_backend() {
        let config = load_app_config().unwrap();
        assert!(config.api.base_url.starts_with("http"));
    }
}
