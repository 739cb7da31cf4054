//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::SystemConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
///
/// ```rust,ignore
/// use gauge_stepper::load_config;
///
/// let config = load_config("dash.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SystemConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<SystemConfig> {
    let config: SystemConfig = toml::from_str(content).map_err(|e| {
        let msg = truncated(e.message());
        Error::Config(ConfigError::ParseError(msg))
    })?;

    // Validate the configuration
    super::validation::validate_config(&config)?;

    Ok(config)
}

fn truncated(message: &str) -> heapless::String<128> {
    let mut out = heapless::String::new();
    for c in message.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
[gauges.speedo]
name = "Speedometer"
total_steps = 945
"#;

        let config = parse_config(toml).unwrap();
        assert!(config.gauge("speedo").is_some());
    }

    #[test]
    fn test_parse_with_profile() {
        let toml = r#"
[profiles.gentle]
entries = [[20, 3000], [50, 1500], [100, 1000]]

[gauges.fuel]
name = "Fuel"
total_steps = 600
driver = "four_wire"
profile = "gentle"
"#;

        let config = parse_config(toml).unwrap();
        let profile = config.profile("gentle").unwrap().to_profile().unwrap();
        assert_eq!(profile.max_velocity(), 100);
    }

    #[test]
    fn test_validation_runs_after_parse() {
        let toml = r#"
[gauges.fuel]
name = "Fuel"
total_steps = 600
profile = "nowhere"
"#;

        assert!(matches!(
            parse_config(toml),
            Err(Error::Config(ConfigError::UnknownProfile { .. }))
        ));
    }

    #[test]
    fn test_syntax_error_is_parse_error() {
        assert!(matches!(
            parse_config("[gauges.fuel\n"),
            Err(Error::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_config("/nonexistent/dash.toml"),
            Err(Error::Config(ConfigError::IoError(_)))
        ));
    }
}
