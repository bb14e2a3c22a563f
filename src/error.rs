use thiserror::Error;

use crate::{identity::IdentityError, model::ErrorResult};

/// Every way a weather lookup can fail.
///
/// `Display` is the localized message handed back to the caller.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("请设置环境变量 WEATHER_API_KEY")]
    MissingApiKey,

    #[error("未找到城市: {city}")]
    CityNotFound { city: String },

    #[error("API密钥无效，请检查 WEATHER_API_KEY 环境变量")]
    InvalidApiKey,

    #[error("API请求失败: {status}")]
    Status { status: u16 },

    #[error("获取天气信息失败: {0}")]
    Request(#[source] reqwest::Error),

    #[error("获取天气信息失败: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("获取天气信息失败: {0}")]
    Identity(#[from] IdentityError),

    #[error("获取天气信息失败: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for LookupError {
    // The request URL carries the api key in its query.
    fn from(err: reqwest::Error) -> Self {
        LookupError::Request(err.without_url())
    }
}

impl From<LookupError> for ErrorResult {
    fn from(err: LookupError) -> Self {
        ErrorResult::new(err.to_string())
    }
}
