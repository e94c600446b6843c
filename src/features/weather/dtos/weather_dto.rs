use serde::{Deserialize, Serialize};

/// Current conditions shown in the page header
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherDto {
    pub city: String,
    pub temperature: f64,
    pub description: String,
}

/// Subset of the OpenWeatherMap current weather response
#[derive(Debug, Deserialize)]
pub struct OpenWeatherResponse {
    pub main: OpenWeatherMain,
    #[serde(default)]
    pub weather: Vec<OpenWeatherCondition>,
}

#[derive(Debug, Deserialize)]
pub struct OpenWeatherMain {
    pub temp: f64,
}

#[derive(Debug, Deserialize)]
pub struct OpenWeatherCondition {
    pub description: String,
}

impl OpenWeatherResponse {
    /// Flatten into the header snippet; `None` when no condition is reported
    pub fn into_dto(self, city: &str) -> Option<WeatherDto> {
        let condition = self.weather.into_iter().next()?;

        Some(WeatherDto {
            city: city.to_string(),
            temperature: self.main.temp,
            description: condition.description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_dto() {
        let raw = r#"{
            "main": {"temp": 71.3, "humidity": 40},
            "weather": [{"id": 800, "main": "Clear", "description": "clear sky"}],
            "name": "Sacramento"
        }"#;
        let response: OpenWeatherResponse = serde_json::from_str(raw).unwrap();

        assert_eq!(
            response.into_dto("Sacramento"),
            Some(WeatherDto {
                city: "Sacramento".to_string(),
                temperature: 71.3,
                description: "clear sky".to_string(),
            })
        );
    }

    #[test]
    fn test_into_dto_without_conditions() {
        let response: OpenWeatherResponse =
            serde_json::from_str(r#"{"main": {"temp": 50.0}, "weather": []}"#).unwrap();
        assert!(response.into_dto("Sacramento").is_none());
    }
}
