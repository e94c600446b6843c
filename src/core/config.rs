use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub weather: WeatherConfig,
    pub reports: ReportConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub max_request_body_size: usize,
    pub template_dir: String,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// OpenWeatherMap settings for the header snippet
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub api_key: String,
    /// City queried on every page render
    pub city: String,
    pub base_url: String,
    /// `imperial`, `metric` or `standard`
    pub units: String,
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Location stored when a complaint is submitted without one
    pub default_location: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            weather: WeatherConfig::from_env()?,
            reports: ReportConfig::from_env()?,
        })
    }
}

impl AppConfig {
    // Room for several photos at the per-image cap
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 50 * 1024 * 1024; // 50MB
    const DEFAULT_TEMPLATE_DIR: &'static str = "templates/pages";

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        let template_dir =
            env::var("TEMPLATE_DIR").unwrap_or_else(|_| Self::DEFAULT_TEMPLATE_DIR.to_string());

        Ok(Self {
            host,
            port,
            max_request_body_size,
            template_dir,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    // Default values for database connection pool (conservative defaults for small-medium apps)
    const DEFAULT_PORT: u16 = 5432;
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());

        let port = env::var("DB_PORT")
            .unwrap_or_else(|_| Self::DEFAULT_PORT.to_string())
            .parse::<u16>()
            .map_err(|_| "DB_PORT must be a valid port number".to_string())?;

        let user = env::var("DB_USER").map_err(|_| "DB_USER must be set".to_string())?;
        let password = env::var("DB_PASSWORD").map_err(|_| "DB_PASSWORD must be set".to_string())?;
        let name = env::var("DB_NAME").map_err(|_| "DB_NAME must be set".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            user,
            password,
            name,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl WeatherConfig {
    const DEFAULT_CITY: &'static str = "Sacramento";
    const DEFAULT_BASE_URL: &'static str = "http://api.openweathermap.org/data/2.5/weather";
    const DEFAULT_UNITS: &'static str = "imperial";

    pub fn from_env() -> Result<Self, String> {
        let api_key = env::var("WEATHER_API_KEY")
            .map_err(|_| "WEATHER_API_KEY environment variable is required".to_string())?;

        let city = env::var("WEATHER_CITY").unwrap_or_else(|_| Self::DEFAULT_CITY.to_string());
        let base_url =
            env::var("WEATHER_BASE_URL").unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());
        let units = env::var("WEATHER_UNITS").unwrap_or_else(|_| Self::DEFAULT_UNITS.to_string());

        Ok(Self {
            api_key,
            city,
            base_url,
            units,
        })
    }
}

impl ReportConfig {
    const DEFAULT_LOCATION: &'static str = "Sacramento";

    pub fn from_env() -> Result<Self, String> {
        let default_location = env::var("DEFAULT_LOCATION")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_LOCATION.to_string());

        Ok(Self { default_location })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_address() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_request_body_size: 1024,
            template_dir: "templates/pages".to_string(),
        };
        assert_eq!(config.server_address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_default_body_limit_fits_a_full_size_image() {
        use crate::features::reports::dtos::MAX_IMAGE_SIZE;

        assert!(AppConfig::DEFAULT_MAX_REQUEST_BODY_SIZE > 2 * MAX_IMAGE_SIZE);
    }
}
