//! OpenWeatherMap current-weather endpoint.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Number;

use crate::{
    config::WeatherConfig,
    error::LookupError,
    model::{LookupRequest, Units, WeatherSummary},
};

const USER_AGENT: &str = concat!("zh-weather-mcp/", env!("CARGO_PKG_VERSION"));
/// Ask the provider for Chinese condition descriptions.
const LANG: &str = "zh_cn";

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

// Numbers stay as `Number` so they print with the provider's own precision.
#[derive(Debug, Deserialize)]
struct OwMain {
    temp: Number,
    feels_like: Number,
    temp_min: Number,
    temp_max: Number,
    humidity: Number,
    pressure: Number,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: Number,
}

#[derive(Debug, Deserialize)]
struct OwClouds {
    all: Number,
}

#[derive(Debug, Deserialize)]
pub struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    weather: Vec<OwWeather>,
    main: OwMain,
    wind: OwWind,
    clouds: OwClouds,
}

impl OwCurrentResponse {
    pub fn into_summary(self, units: Units) -> Result<WeatherSummary, LookupError> {
        let description = self
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or_else(|| LookupError::Malformed("missing field `weather[0]`".to_string()))?;

        let degrees = |value: &Number| format!("{}{}", value, units.temperature_suffix());

        Ok(WeatherSummary {
            city: self.name,
            country: self.sys.country,
            description,
            temperature: degrees(&self.main.temp),
            feels_like: degrees(&self.main.feels_like),
            temperature_min: degrees(&self.main.temp_min),
            temperature_max: degrees(&self.main.temp_max),
            humidity: format!("{}%", self.main.humidity),
            pressure: format!("{} hPa", self.main.pressure),
            wind_speed: format!("{} {}", self.wind.speed, units.wind_speed_unit()),
            cloud_cover: format!("{}%", self.clouds.all),
        })
    }
}

/// Maps a non-success provider status onto the caller-facing error.
pub fn classify_status(status: StatusCode, city: &str) -> LookupError {
    match status {
        StatusCode::NOT_FOUND => LookupError::CityNotFound {
            city: city.to_string(),
        },
        StatusCode::UNAUTHORIZED => LookupError::InvalidApiKey,
        status => LookupError::Status {
            status: status.as_u16(),
        },
    }
}

/// One-shot provider handle. The HTTP client lives exactly as long as this value.
#[derive(Debug)]
pub struct OpenWeatherProvider<'a> {
    config: &'a WeatherConfig,
    http: Client,
}

impl<'a> OpenWeatherProvider<'a> {
    pub fn new(config: &'a WeatherConfig) -> Result<Self, LookupError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { config, http })
    }

    pub async fn fetch_current(
        &self,
        request: &LookupRequest,
    ) -> Result<OwCurrentResponse, LookupError> {
        let url = self.config.weather_endpoint();
        let location = request.location();

        tracing::debug!(%url, %location, units = %request.units, "Requesting current weather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", location.as_str()),
                ("appid", self.config.api_key.as_str()),
                ("units", request.units.as_str()),
                ("lang", LANG),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            tracing::error!("HTTP error occurred: {} - {}", status.as_u16(), body);
            return Err(classify_status(status, &request.city));
        }

        let body = res.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
