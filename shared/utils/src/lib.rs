pub mod bom;
pub mod config;
pub mod error;
pub mod logging;

pub use config::*;
pub use error::*;
pub use logging::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.cpq.language, "en");
        assert!(!config.cpq.has_credentials());
        assert!(config.cpq.max_concurrent_fetches > 0);
    }

    #[test]
    fn test_error_handling() {
        let error = ConsoleError::validation("segmentItemIds", "must not be empty");
        assert_eq!(error.error_code(), "VALIDATION_ERROR");
        assert_eq!(error.http_status_code(), 400);
    }
}
