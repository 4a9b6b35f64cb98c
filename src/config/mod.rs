//! API 게이트웨이 서비스 설정 모델과 검증
//!
//! 입력은 타입이 없는 JSON 값이며, 검증을 통과하면 기본값이 채워진
//! [`ServiceConfig`]가 만들어진다. 검증은 원격 서비스에 접근하지 않는다.

use serde_json::Value;
use std::path::Path;
use tracing::debug;

mod error;
mod schema;
mod types;
mod validator;

pub use error::ValidationError;
pub use schema::{AUTH_SCHEMA, ENDPOINT_SCHEMA, FUNCTION_SCHEMA, SERVICE_SCHEMA, USAGE_PLAN_SCHEMA};
pub use types::{
    AuthConfig, Endpoint, Environment, FunctionBinding, HttpMethod, Protocol, ServiceConfig,
    UsagePlan, DEFAULT_REGION, UNLIMITED_REQUESTS,
};
pub use validator::ConfigValidator;

pub type Result<T> = std::result::Result<T, ValidationError>;

/// 설정 값 검증
///
/// 원본 값은 변경하지 않는다. 호출자는 반환된 값을 사용해야 한다.
pub fn validate(config: &Value) -> Result<ServiceConfig> {
    ConfigValidator::new()?.validate(config)
}

impl ServiceConfig {
    /// JSON 또는 TOML 설정 파일을 읽어 검증
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("서비스 설정 파일 로드: {}", path.display());

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ValidationError::Parse {
                reason: format!("설정 파일 {} 읽기 실패: {}", path.display(), e),
            })?;

        let value = parse_document(path, &content)?;
        validate(&value)
    }

    /// 기본값이 채워진 JSON 객체로 변환
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

fn parse_document(path: &Path, content: &str) -> Result<Value> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(content).map_err(|e| ValidationError::Parse {
            reason: format!("JSON 파싱 오류: {}", e),
        }),
        Some("toml") => {
            let document: toml::Value = toml::from_str(content).map_err(|e| ValidationError::Parse {
                reason: format!("TOML 파싱 오류: {}", e),
            })?;
            serde_json::to_value(document).map_err(|e| ValidationError::Parse {
                reason: format!("TOML 변환 오류: {}", e),
            })
        }
        _ => Err(ValidationError::Parse {
            reason: format!("지원하지 않는 설정 파일 형식: {}", path.display()),
        }),
    }
}
