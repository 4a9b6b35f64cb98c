use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// API 게이트웨이 서비스 설정
///
/// `validate`를 통과한 값만 이 타입으로 만들어진다. 생략된 선택 필드는
/// 기본값으로 채워져 있다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    /// 리전 (기본값: ap-guangzhou)
    #[serde(default = "default_region")]
    pub region: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,

    /// 프런트엔드 프로토콜 (기본값: http)
    #[serde(default)]
    pub protocol: Protocol,

    pub service_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// 배포 환경 (기본값: release)
    #[serde(default)]
    pub environment: Environment,

    pub endpoints: Vec<Endpoint>,

    /// 알 수 없는 최상위 키는 그대로 보존
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Endpoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, rename = "enableCORS")]
    pub enable_cors: bool,

    pub path: String,

    pub method: HttpMethod,

    pub function: FunctionBinding,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_plan: Option<UsagePlan>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthConfig>,
}

/// 엔드포인트 백엔드 함수 바인딩
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FunctionBinding {
    #[serde(default)]
    pub is_integrated_response: bool,

    /// 함수 버전/별칭 (기본값: $LATEST)
    #[serde(default = "default_function_qualifier")]
    pub function_qualifier: String,

    pub function_name: String,
}

/// 사용량 계획
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UsagePlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_plan_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_plan_desc: Option<String>,

    /// 총 요청 한도, -1은 무제한
    #[serde(default = "default_max_request_num", deserialize_with = "deserialize_integral")]
    pub max_request_num: i64,

    /// 초당 요청 한도 (기본값: 1000)
    #[serde(
        default = "default_max_request_num_pre_sec",
        deserialize_with = "deserialize_integral"
    )]
    pub max_request_num_pre_sec: i64,

    pub usage_plan_name: String,
}

impl UsagePlan {
    pub fn is_unlimited(&self) -> bool {
        self.max_request_num == UNLIMITED_REQUESTS
    }
}

/// 시크릿 키 인증 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AuthConfig {
    /// 백엔드 타임아웃 (초, 기본값: 15)
    #[serde(default = "default_service_timeout", deserialize_with = "deserialize_integral")]
    pub service_timeout: i64,

    pub secret_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Protocol {
    #[default]
    #[serde(rename = "http")]
    Http,
    #[serde(rename = "https")]
    Https,
    #[serde(rename = "http&https")]
    HttpAndHttps,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
            Protocol::HttpAndHttps => "http&https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Prepub,
    Test,
    #[default]
    Release,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Prepub => "prepub",
            Environment::Test => "test",
            Environment::Release => "release",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Any,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Any => "ANY",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const DEFAULT_REGION: &str = "ap-guangzhou";
pub const UNLIMITED_REQUESTS: i64 = -1;

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_function_qualifier() -> String {
    "$LATEST".to_string()
}

fn default_max_request_num() -> i64 {
    UNLIMITED_REQUESTS
}

fn default_max_request_num_pre_sec() -> i64 {
    1000
}

fn default_service_timeout() -> i64 {
    15
}

// 스키마의 "integer"는 10.0 같은 정수값 실수도 허용하므로 동일하게 받는다
fn deserialize_integral<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Number::deserialize(deserializer)?;
    if let Some(value) = number.as_i64() {
        return Ok(value);
    }

    match number.as_f64() {
        Some(value) if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 => {
            Ok(value as i64)
        }
        _ => Err(<D::Error as serde::de::Error>::custom(format!(
            "정수가 아닌 값: {}",
            number
        ))),
    }
}
