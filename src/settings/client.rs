use serde::Deserialize;
use std::env;
use std::fmt;
use std::time::Duration;
use url::Url;

use super::{parse_env_var, SettingsError};
use crate::apigw::{ConnectionOptions, TransportProtocol};
use crate::config::DEFAULT_REGION;

/// 클라우드 API 클라이언트 설정
#[derive(Clone, Deserialize)]
pub struct ClientSettings {
    /// API 자격 증명 ID
    #[serde(default)]
    pub secret_id: String,

    /// API 자격 증명 키
    #[serde(default)]
    pub secret_key: String,

    /// 임시 자격 증명 토큰
    #[serde(default)]
    pub token: Option<String>,

    /// 리전 (기본값: ap-guangzhou)
    #[serde(default = "default_region")]
    pub region: String,

    /// 전송 프로토콜 (기본값: https)
    #[serde(default)]
    pub protocol: TransportProtocol,

    /// 엔드포인트 재정의 (호스트 또는 URL)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// 요청 타임아웃 (초, 기본값: 30)
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_timeout() -> u64 {
    30
}

impl ClientSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let settings = Self {
            secret_id: env::var("APIGW_SECRET_ID").unwrap_or_default(),
            secret_key: env::var("APIGW_SECRET_KEY").unwrap_or_default(),
            token: env::var("APIGW_TOKEN").ok(),
            region: parse_env_var("APIGW_REGION", default_region)?,
            protocol: parse_env_var("APIGW_PROTOCOL", TransportProtocol::default)?,
            endpoint: env::var("APIGW_ENDPOINT").ok(),
            timeout: parse_env_var("APIGW_TIMEOUT", default_timeout)?,
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.region.is_empty() {
            return Err(SettingsError::InvalidValue {
                key: "client.region",
                value: self.region.clone(),
                reason: "리전은 비어있을 수 없습니다".to_string(),
            });
        }

        if self.timeout == 0 {
            return Err(SettingsError::InvalidValue {
                key: "client.timeout",
                value: self.timeout.to_string(),
                reason: "타임아웃은 0보다 커야 합니다".to_string(),
            });
        }

        self.resolve_endpoint()?;
        Ok(())
    }

    /// 원격 호출에 필요한 자격 증명 확인
    pub fn require_credentials(&self) -> Result<(), SettingsError> {
        if self.secret_id.is_empty() {
            return Err(SettingsError::MissingCredential {
                key: "client.secret_id",
                env_var: "APIGW_SECRET_ID",
            });
        }
        if self.secret_key.is_empty() {
            return Err(SettingsError::MissingCredential {
                key: "client.secret_key",
                env_var: "APIGW_SECRET_KEY",
            });
        }
        Ok(())
    }

    /// 엔드포인트 재정의를 (프로토콜, 호스트[:포트])로 해석
    ///
    /// 스킴이 없는 값은 호스트로 취급한다. 경로가 있는 URL은 거부한다.
    pub fn resolve_endpoint(&self) -> Result<Option<(TransportProtocol, String)>, SettingsError> {
        let Some(endpoint) = self.endpoint.as_deref() else {
            return Ok(None);
        };

        let invalid = |reason: String| SettingsError::InvalidValue {
            key: "client.endpoint",
            value: endpoint.to_string(),
            reason,
        };

        let has_scheme = endpoint.contains("://");
        let candidate = if has_scheme {
            endpoint.to_string()
        } else {
            format!("{}://{}", self.protocol, endpoint)
        };

        let url = Url::parse(&candidate).map_err(|e| invalid(e.to_string()))?;

        let protocol = match url.scheme() {
            "http" => TransportProtocol::Http,
            "https" => TransportProtocol::Https,
            other => return Err(invalid(format!("지원하지 않는 스킴: {}", other))),
        };

        let host = url
            .host_str()
            .ok_or_else(|| invalid("호스트가 없습니다".to_string()))?;

        if url.path() != "/" || url.query().is_some() {
            return Err(invalid("엔드포인트에 경로를 포함할 수 없습니다".to_string()));
        }

        let host = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        Ok(Some((protocol, host)))
    }

    /// RPC 클라이언트 연결 옵션으로 변환
    pub fn connection_options(&self) -> Result<ConnectionOptions, SettingsError> {
        let (protocol, host) = match self.resolve_endpoint()? {
            Some((protocol, host)) => (protocol, Some(host)),
            None => (self.protocol, None),
        };

        Ok(ConnectionOptions {
            secret_id: self.secret_id.clone(),
            secret_key: self.secret_key.clone(),
            token: self.token.clone(),
            region: self.region.clone(),
            protocol,
            host,
            timeout: Duration::from_secs(self.timeout),
            ..Default::default()
        })
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            secret_id: String::new(),
            secret_key: String::new(),
            token: None,
            region: default_region(),
            protocol: TransportProtocol::default(),
            endpoint: None,
            timeout: default_timeout(),
        }
    }
}

impl fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSettings")
            .field("secret_id", &self.secret_id)
            .field("secret_key", &"***")
            .field("region", &self.region)
            .field("protocol", &self.protocol)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}
