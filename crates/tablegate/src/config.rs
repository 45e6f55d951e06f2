use std::{env, time::Duration};

use tablegate_core::table::Throughput;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// AWS region for the DynamoDB client (default: "us-west-2")
    pub aws_region: String,
    /// Custom endpoint URL, e.g. DynamoDB Local (default: none)
    pub endpoint_url: Option<String>,
    /// Read capacity units for tables created through the API (default: 5)
    pub read_capacity_units: i64,
    /// Write capacity units for tables created through the API (default: 5)
    pub write_capacity_units: i64,
    /// Per-request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
    /// Log output format (default: pretty)
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `AWS_REGION` - AWS region (default: "us-west-2")
    /// - `AWS_ENDPOINT_URL` - Custom DynamoDB endpoint (default: unset)
    /// - `TABLE_READ_CAPACITY` - Read capacity units for new tables (default: 5)
    /// - `TABLE_WRITE_CAPACITY` - Write capacity units for new tables (default: 5)
    /// - `REQUEST_TIMEOUT_SECONDS` - Request timeout (default: 10)
    /// - `LOG_FORMAT` - "pretty" or "json" (default: "pretty")
    pub fn from_env() -> Self {
        Self {
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "us-west-2".to_string()),
            endpoint_url: env::var("AWS_ENDPOINT_URL")
                .ok()
                .filter(|url| !url.is_empty()),
            read_capacity_units: env::var("TABLE_READ_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(5),
            write_capacity_units: env::var("TABLE_WRITE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(5),
            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(10),
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        }
    }

    /// Provisioned throughput applied to created tables.
    pub fn throughput(&self) -> Throughput {
        Throughput {
            read_capacity_units: self.read_capacity_units,
            write_capacity_units: self.write_capacity_units,
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({})", url),
            None => format!("AWS DynamoDB (region: {})", self.aws_region),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            aws_region: "eu-west-1".to_string(),
            endpoint_url: None,
            read_capacity_units: 10,
            write_capacity_units: 2,
            request_timeout_seconds: 30,
            log_format: LogFormat::Pretty,
        }
    }

    #[test]
    fn test_throughput_from_capacity_units() {
        let throughput = config().throughput();
        assert_eq!(throughput.read_capacity_units, 10);
        assert_eq!(throughput.write_capacity_units, 2);
    }

    #[test]
    fn test_request_timeout_conversion() {
        assert_eq!(config().request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_target_display() {
        let mut config = config();
        assert_eq!(config.target_display(), "AWS DynamoDB (region: eu-west-1)");

        config.endpoint_url = Some("http://localhost:8000".to_string());
        assert_eq!(config.target_display(), "Local DynamoDB (http://localhost:8000)");
    }

    #[test]
    fn test_zero_timeout_falls_back_to_default() {
        env::set_var("REQUEST_TIMEOUT_SECONDS", "0");
        let config = Config::from_env();
        env::remove_var("REQUEST_TIMEOUT_SECONDS");

        assert_eq!(config.request_timeout_seconds, 10);
    }

    #[test]
    fn test_default_values() {
        // Clear environment variables to test defaults
        env::remove_var("AWS_REGION");
        env::remove_var("AWS_ENDPOINT_URL");
        env::remove_var("TABLE_READ_CAPACITY");
        env::remove_var("TABLE_WRITE_CAPACITY");
        env::remove_var("REQUEST_TIMEOUT_SECONDS");
        env::remove_var("LOG_FORMAT");

        let config = Config::from_env();

        assert_eq!(config.aws_region, "us-west-2");
        assert_eq!(config.endpoint_url, None);
        assert_eq!(config.read_capacity_units, 5);
        assert_eq!(config.write_capacity_units, 5);
        assert_eq!(config.request_timeout_seconds, 10);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }
}
