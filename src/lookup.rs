use crate::{
    config::WeatherConfig,
    error::LookupError,
    identity,
    model::{LookupOutcome, LookupRequest, WeatherSummary},
    provider::OpenWeatherProvider,
};

/// Current-weather lookup against the configured provider.
///
/// `lookup` never fails: every error is folded into [`LookupOutcome::Error`].
#[derive(Debug, Clone)]
pub struct WeatherLookup {
    config: WeatherConfig,
}

impl WeatherLookup {
    pub fn new(config: WeatherConfig) -> Self {
        Self { config }
    }

    /// `userinfo` is the raw `userinfo` header, if the transport has one.
    pub async fn lookup(&self, request: &LookupRequest, userinfo: Option<&str>) -> LookupOutcome {
        tracing::info!(
            city = %request.city,
            country = ?request.country,
            units = %request.units,
            "Received request for current weather"
        );

        match self.try_lookup(request, userinfo).await {
            Ok(summary) => {
                tracing::info!(city = %summary.city, "Weather lookup succeeded");
                LookupOutcome::Summary(summary)
            }
            Err(err) => {
                tracing::warn!(city = %request.city, error = %err, "Weather lookup failed");
                LookupOutcome::Error(err.into())
            }
        }
    }

    async fn try_lookup(
        &self,
        request: &LookupRequest,
        userinfo: Option<&str>,
    ) -> Result<WeatherSummary, LookupError> {
        if !self.config.has_api_key() {
            return Err(LookupError::MissingApiKey);
        }

        match userinfo.filter(|raw| !raw.is_empty()) {
            Some(raw) => {
                let userinfo = identity::decode_userinfo(raw)?;
                tracing::info!(%userinfo, "User info");
            }
            None => tracing::info!("None User info"),
        }

        let provider = OpenWeatherProvider::new(&self.config)?;
        let current = provider.fetch_current(request).await?;
        current.into_summary(request.units)
    }
}
