use serde::Deserialize;
use std::{env, fs, path::Path};
use tracing::debug;

mod client;
mod error;
pub mod logging;

pub use client::ClientSettings;
pub use error::SettingsError;
pub use logging::{LogFormat, LogOutput, LogSettings};

pub type Result<T> = std::result::Result<T, SettingsError>;

/// 프로세스 설정
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    // 로깅 설정
    #[serde(default)]
    pub logging: LogSettings,

    // 클라우드 API 클라이언트 설정
    #[serde(default)]
    pub client: ClientSettings,
}

impl Settings {
    pub fn load() -> Result<Self> {
        if let Ok(config_path) = env::var("APIGW_SETTINGS_FILE") {
            Self::from_toml_file(&config_path)
        } else {
            Self::from_env()
        }
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("설정 파일 로드: {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| SettingsError::FileError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let settings: Self = toml::from_str(&content).map_err(|e| SettingsError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn from_env() -> Result<Self> {
        let settings = Self {
            logging: LogSettings::from_env()?,
            client: ClientSettings::from_env()?,
        };

        settings.validate()?;
        Ok(settings)
    }

    /// 설정 유효성 검증
    pub fn validate(&self) -> Result<()> {
        self.client.validate()
    }
}

pub fn parse_env_var<T: std::str::FromStr, F: FnOnce() -> T>(name: &str, default: F) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val.parse().map_err(|e: T::Err| SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: val,
            reason: e.to_string(),
        }),
        Err(env::VarError::NotPresent) => Ok(default()),
        Err(e) => Err(SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: "".to_string(),
            reason: e.to_string(),
        }),
    }
}
