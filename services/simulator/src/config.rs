use serde::Deserialize;
use shared::errors::ServiceError;
use std::env;
use std::fmt;
use std::str::FromStr;

use crate::slots::SamplingMode;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    pub supply_capacity: usize,
    pub seed: Option<u64>,
    pub sampling_mode: SamplingMode,
    pub verify_trials: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub report_json: bool,
    pub metrics_summary: bool,
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            simulation: SimulationConfig {
                supply_capacity: shared::SUPPLY_CAPACITY,
                seed: None,
                sampling_mode: SamplingMode::Rejection,
                verify_trials: 0,
            },
            output: OutputConfig {
                report_json: false,
                metrics_summary: false,
                log_json: false,
            },
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let seed = match env::var("SIM_SEED") {
            Ok(value) if !value.trim().is_empty() => Some(parse_setting("SIM_SEED", &value)?),
            _ => None,
        };

        Ok(Config {
            simulation: SimulationConfig {
                supply_capacity: setting_or("SIM_SUPPLY_CAPACITY", &shared::SUPPLY_CAPACITY.to_string())?,
                seed,
                sampling_mode: setting_or("SIM_SAMPLING_MODE", "rejection")?,
                verify_trials: setting_or("SIM_VERIFY_TRIALS", "0")?,
            },
            output: OutputConfig {
                report_json: setting_or("SIM_REPORT_JSON", "false")?,
                metrics_summary: setting_or("SIM_METRICS_SUMMARY", "false")?,
                log_json: env::var("LOG_FORMAT")
                    .unwrap_or_else(|_| "text".to_string())
                    .eq_ignore_ascii_case("json"),
            },
        })
    }
}

fn setting_or<T>(key: &str, default: &str) -> Result<T, ServiceError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    parse_setting(key, &value)
}

/// Parse one setting, reporting the key and the parser's message on failure
pub fn parse_setting<T>(key: &str, value: &str) -> Result<T, ServiceError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ServiceError::configuration(key, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::errors::ErrorCategory;

    #[test]
    fn test_defaults_match_shared_constants() {
        let config = Config::default();
        assert_eq!(config.simulation.supply_capacity, 60);
        assert_eq!(config.simulation.sampling_mode, SamplingMode::Rejection);
        assert!(config.simulation.seed.is_none());
        assert!(!config.output.report_json);
    }

    #[test]
    fn test_parse_setting_values() {
        assert_eq!(parse_setting::<usize>("SIM_VERIFY_TRIALS", " 25 ").unwrap(), 25);
        assert_eq!(
            parse_setting::<SamplingMode>("SIM_SAMPLING_MODE", "live_index").unwrap(),
            SamplingMode::LiveIndex
        );
    }

    #[test]
    fn test_parse_setting_failure_is_configuration_error() {
        let error = parse_setting::<u64>("SIM_SEED", "abc").unwrap_err();
        assert_eq!(error.category, ErrorCategory::Configuration);
        assert_eq!(error.code, "CONFIGURATION_INVALID_VALUE");
        assert_eq!(error.message, "Invalid value for SIM_SEED");

        let error = parse_setting::<bool>("SIM_REPORT_JSON", "yes").unwrap_err();
        assert!(error.to_string().contains("SIM_REPORT_JSON"));
    }
}
