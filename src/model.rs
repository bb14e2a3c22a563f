use rmcp::schemars;
use serde::{Deserialize, Serialize};

fn default_city() -> String {
    "beijing".to_string()
}

fn default_country() -> Option<String> {
    Some("CN".to_string())
}

/// Arguments of the `get_current_weather` tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct LookupRequest {
    #[serde(default = "default_city")]
    #[schemars(description = "城市名称 (例如: \"beijing\", \"shanghai\", \"New York\")")]
    pub city: String,
    #[serde(default = "default_country")]
    #[schemars(description = "国家代码 (可选，例如: \"CN\", \"US\")")]
    pub country: Option<String>,
    #[serde(default)]
    #[schemars(description = "温度单位 (\"metric\"=摄氏度, \"imperial\"=华氏度)")]
    pub units: Units,
}

impl Default for LookupRequest {
    fn default() -> Self {
        Self {
            city: default_city(),
            country: default_country(),
            units: Units::default(),
        }
    }
}

impl LookupRequest {
    pub fn new(city: impl Into<String>, country: Option<&str>, units: Units) -> Self {
        Self {
            city: city.into(),
            country: country.map(str::to_string),
            units,
        }
    }

    /// Provider `q` parameter: `city` alone, or `city,country` when a country is given.
    pub fn location(&self) -> String {
        match self.country.as_deref() {
            Some(country) if !country.is_empty() => format!("{},{}", self.city, country),
            _ => self.city.clone(),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn wind_speed_unit(&self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Localized current-weather summary returned on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherSummary {
    #[serde(rename = "城市")]
    pub city: String,
    #[serde(rename = "国家")]
    pub country: String,
    #[serde(rename = "天气状况")]
    pub description: String,
    #[serde(rename = "当前温度")]
    pub temperature: String,
    #[serde(rename = "体感温度")]
    pub feels_like: String,
    #[serde(rename = "最低温度")]
    pub temperature_min: String,
    #[serde(rename = "最高温度")]
    pub temperature_max: String,
    #[serde(rename = "湿度")]
    pub humidity: String,
    #[serde(rename = "气压")]
    pub pressure: String,
    #[serde(rename = "风速")]
    pub wind_speed: String,
    #[serde(rename = "云量")]
    pub cloud_cover: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResult {
    #[serde(rename = "错误")]
    pub message: String,
}

impl ErrorResult {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// What a lookup hands back to the transport: always a plain mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LookupOutcome {
    Summary(WeatherSummary),
    Error(ErrorResult),
}

impl LookupOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, LookupOutcome::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_arguments_take_defaults() {
        let request: LookupRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.city, "beijing");
        assert_eq!(request.country.as_deref(), Some("CN"));
        assert_eq!(request.units, Units::Metric);
    }

    #[test]
    fn null_country_means_no_country() {
        let request: LookupRequest =
            serde_json::from_str(r#"{"city": "paris", "country": null, "units": "imperial"}"#)
                .unwrap();
        assert_eq!(request.country, None);
        assert_eq!(request.units, Units::Imperial);
        assert_eq!(request.location(), "paris");
    }

    #[test]
    fn location_without_country_is_city() {
        let request = LookupRequest::new("London", None, Units::Metric);
        assert_eq!(request.location(), "London");

        let request = LookupRequest::new("London", Some(""), Units::Metric);
        assert_eq!(request.location(), "London");
    }

    #[test]
    fn location_with_country_is_comma_joined() {
        let request = LookupRequest::new("shanghai", Some("CN"), Units::Metric);
        assert_eq!(request.location(), "shanghai,CN");
    }

    #[test]
    fn unknown_units_are_rejected() {
        let err = serde_json::from_str::<LookupRequest>(r#"{"units": "kelvin"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown variant"));
    }

    #[test]
    fn unit_labels() {
        assert_eq!(Units::Metric.temperature_suffix(), "°C");
        assert_eq!(Units::Metric.wind_speed_unit(), "m/s");
        assert_eq!(Units::Imperial.temperature_suffix(), "°F");
        assert_eq!(Units::Imperial.wind_speed_unit(), "mph");
    }

    #[test]
    fn error_result_serializes_as_single_key() {
        let outcome = LookupOutcome::Error(ErrorResult::new("boom"));
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({"错误": "boom"})
        );
        assert!(outcome.is_error());
    }
}
