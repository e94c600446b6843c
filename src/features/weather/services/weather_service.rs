use crate::core::config::WeatherConfig;
use crate::core::error::{AppError, Result};
use crate::features::weather::dtos::{OpenWeatherResponse, WeatherDto};

/// Best-effort client for the current weather of one configured city
pub struct WeatherService {
    client: reqwest::Client,
    config: WeatherConfig,
}

impl WeatherService {
    pub fn new(config: WeatherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("AmptierCore/1.0 (issue-reporting)")
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Current weather, or `None` when the provider is unavailable.
    ///
    /// Never fails: pages render without the weather snippet instead.
    pub async fn current(&self) -> Option<WeatherDto> {
        match self.fetch().await {
            Ok(weather) => weather,
            Err(e) => {
                tracing::warn!("Weather unavailable for {}: {}", self.config.city, e);
                None
            }
        }
    }

    async fn fetch(&self) -> Result<Option<WeatherDto>> {
        tracing::debug!("Fetching weather for {}", self.config.city);

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("q", self.config.city.as_str()),
                ("appid", self.config.api_key.as_str()),
                ("units", self.config.units.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Weather request failed: {}", e)))?;

        if !response.status().is_success() {
            tracing::warn!("Weather provider returned status: {}", response.status());
            return Ok(None);
        }

        let body: OpenWeatherResponse = response.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to parse weather response: {}", e))
        })?;

        Ok(body.into_dto(&self.config.city))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{spawn_stub_server, unreachable_weather_config};
    use axum::{
        extract::Query,
        http::StatusCode,
        routing::get,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;

    fn config_for(base_url: String) -> WeatherConfig {
        WeatherConfig {
            api_key: "test-key".to_string(),
            city: "Sacramento".to_string(),
            base_url,
            units: "imperial".to_string(),
        }
    }

    #[tokio::test]
    async fn test_current_weather() {
        async fn handler(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
            let expected = params.get("q").map(String::as_str) == Some("Sacramento")
                && params.get("appid").map(String::as_str) == Some("test-key")
                && params.get("units").map(String::as_str) == Some("imperial");
            if !expected {
                return (StatusCode::UNAUTHORIZED, Json(json!({"cod": 401})));
            }
            (
                StatusCode::OK,
                Json(json!({
                    "main": {"temp": 88.5},
                    "weather": [{"description": "few clouds"}]
                })),
            )
        }

        let base_url = spawn_stub_server(Router::new().route("/weather", get(handler))).await;
        let service = WeatherService::new(config_for(format!("{}/weather", base_url))).unwrap();

        let weather = service.current().await.unwrap();
        assert_eq!(weather.city, "Sacramento");
        assert_eq!(weather.temperature, 88.5);
        assert_eq!(weather.description, "few clouds");
    }

    #[tokio::test]
    async fn test_city_is_query_encoded() {
        async fn handler(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
            let city = params.get("q").cloned().unwrap_or_default();
            Json(json!({"main": {"temp": 1.0}, "weather": [{"description": city}]}))
        }

        let base_url = spawn_stub_server(Router::new().route("/weather", get(handler))).await;
        let mut config = config_for(format!("{}/weather", base_url));
        config.city = "West Sacramento&appid=stolen".to_string();
        let service = WeatherService::new(config).unwrap();

        let weather = service.current().await.unwrap();
        assert_eq!(weather.description, "West Sacramento&appid=stolen");
    }

    #[tokio::test]
    async fn test_non_success_status_yields_none() {
        async fn handler() -> (StatusCode, Json<Value>) {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"cod": 401, "message": "Invalid API key"})),
            )
        }

        let base_url = spawn_stub_server(Router::new().route("/weather", get(handler))).await;
        let service = WeatherService::new(config_for(format!("{}/weather", base_url))).unwrap();

        assert!(service.current().await.is_none());
    }

    #[tokio::test]
    async fn test_malformed_body_yields_none() {
        async fn handler() -> &'static str {
            "not json"
        }

        let base_url = spawn_stub_server(Router::new().route("/weather", get(handler))).await;
        let service = WeatherService::new(config_for(format!("{}/weather", base_url))).unwrap();

        assert!(service.current().await.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_yields_none() {
        let service = WeatherService::new(unreachable_weather_config()).unwrap();
        assert!(service.current().await.is_none());
    }
}
