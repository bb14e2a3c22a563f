pub const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org/data/2.5";

/// Provider settings shared read-only by every lookup.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// OpenWeatherMap `appid`. May be empty; lookups then fail without touching the network.
    pub api_key: String,
    pub base_url: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl WeatherConfig {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn api_key_len(&self) -> usize {
        self.api_key.len()
    }

    /// `{base_url}/weather`, tolerating a trailing slash on the base.
    pub fn weather_endpoint(&self) -> String {
        format!("{}/weather", self.base_url.trim_end_matches('/'))
    }

    /// Startup diagnostics. Never logs the key itself.
    pub fn log_summary(&self) {
        tracing::info!(
            "API Key loaded: {}",
            if self.has_api_key() { "Yes" } else { "No" }
        );
        tracing::info!("API Key length: {}", self.api_key_len());
        tracing::info!("Weather provider: {}", self.base_url);
    }
}
