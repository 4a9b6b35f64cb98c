use serde::{Deserialize, Deserializer};
use std::env;
use tracing::Level;
use super::{parse_env_var, SettingsError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogOutput {
    #[default]
    Stderr,
    File(String),
}

impl std::str::FromStr for LogOutput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("stderr") {
            Ok(LogOutput::Stderr)
        } else {
            Ok(LogOutput::File(s.to_string()))
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogSettings {
    pub format: LogFormat,
    pub level: Level,
    pub output: LogOutput,
}

impl LogSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Ok(Self {
            format: parse_env_var("APIGW_LOG_FORMAT", || LogFormat::Text)?,
            level: parse_log_level(env::var("APIGW_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()))?,
            output: parse_env_var("APIGW_LOG_OUTPUT", || LogOutput::Stderr)?,
        })
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: Level::INFO,
            output: LogOutput::default(),
        }
    }
}

fn parse_log_level(level: String) -> Result<Level, SettingsError> {
    match level.to_lowercase().as_str() {
        "error" => Ok(Level::ERROR),
        "warn" => Ok(Level::WARN),
        "info" => Ok(Level::INFO),
        "debug" => Ok(Level::DEBUG),
        "trace" => Ok(Level::TRACE),
        _ => Err(SettingsError::EnvVarInvalid {
            var_name: "APIGW_LOG_LEVEL".to_string(),
            value: level,
            reason: "유효하지 않은 로그 레벨".to_string(),
        }),
    }
}

impl<'de> Deserialize<'de> for LogSettings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            #[serde(default)]
            format: LogFormat,
            #[serde(default = "default_log_level_string")]
            level: String,
            #[serde(default)]
            output: Option<String>,
        }

        let helper = Helper::deserialize(deserializer)?;
        let level = parse_log_level(helper.level)
            .map_err(<D::Error as serde::de::Error>::custom)?;
        let output = match helper.output {
            Some(output) if !output.eq_ignore_ascii_case("stderr") => LogOutput::File(output),
            _ => LogOutput::Stderr,
        };

        Ok(LogSettings {
            format: helper.format,
            level,
            output,
        })
    }
}

fn default_log_level_string() -> String {
    "info".to_string()
}
