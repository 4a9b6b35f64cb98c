use jsonschema::error::ValidationErrorKind;
use jsonschema::{Draft, JSONSchema};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::error::ValidationError;
use super::schema::{AUTH_SCHEMA, ENDPOINT_SCHEMA, FUNCTION_SCHEMA, SERVICE_SCHEMA, USAGE_PLAN_SCHEMA};
use super::types::ServiceConfig;

/// 서비스 설정 검증기
///
/// 검증 순서: 최상위 형태 → 각 엔드포인트(순서대로) 형태 → function → usagePlan → auth.
/// 첫 번째 위반에서 중단한다.
pub struct ConfigValidator {
    service: JSONSchema,
    endpoint: JSONSchema,
    function: JSONSchema,
    usage_plan: JSONSchema,
    auth: JSONSchema,
}

/// 검증 단계. 필수 필드 오류 메시지의 경로 라벨을 결정한다.
#[derive(Debug, Clone, Copy)]
enum Stage {
    Service,
    Endpoint,
    Function,
    UsagePlan,
    Auth,
}

impl Stage {
    fn required_label(&self, property: &str) -> String {
        let prefix = match self {
            Stage::Service => "",
            Stage::Endpoint => "endpoints.",
            Stage::Function => "endpoints.function.",
            Stage::UsagePlan => "usagePlan.",
            Stage::Auth => "endpoints.auth.",
        };
        format!("{}{}", prefix, property)
    }
}

impl ConfigValidator {
    /// 내장 스키마를 컴파일해 검증기 생성
    pub fn new() -> Result<Self, ValidationError> {
        let validator = Self {
            service: compile(SERVICE_SCHEMA)?,
            endpoint: compile(ENDPOINT_SCHEMA)?,
            function: compile(FUNCTION_SCHEMA)?,
            usage_plan: compile(USAGE_PLAN_SCHEMA)?,
            auth: compile(AUTH_SCHEMA)?,
        };
        debug!("서비스 설정 스키마 컴파일 성공");
        Ok(validator)
    }

    /// 설정 값을 검증하고 기본값이 채워진 새 설정을 반환
    pub fn validate(&self, config: &Value) -> Result<ServiceConfig, ValidationError> {
        check(&self.service, config, Stage::Service, "")?;

        let endpoints = config
            .get("endpoints")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        for (index, endpoint) in endpoints.iter().enumerate() {
            let prefix = format!("endpoints[{}]", index);
            check(&self.endpoint, endpoint, Stage::Endpoint, &prefix)?;

            if let Some(function) = endpoint.get("function") {
                check(&self.function, function, Stage::Function, &format!("{}.function", prefix))?;
            }
            if let Some(usage_plan) = endpoint.get("usagePlan") {
                check(&self.usage_plan, usage_plan, Stage::UsagePlan, &format!("{}.usagePlan", prefix))?;
            }
            if let Some(auth) = endpoint.get("auth") {
                check(&self.auth, auth, Stage::Auth, &format!("{}.auth", prefix))?;
            }
        }

        let service = ServiceConfig::deserialize(config)
            .map_err(|e| ValidationError::Parse { reason: e.to_string() })?;

        debug!(
            service = %service.service_name,
            endpoints = service.endpoints.len(),
            "서비스 설정 검증 완료"
        );
        Ok(service)
    }
}

fn compile(source: &str) -> Result<JSONSchema, ValidationError> {
    let schema_value: Value = serde_json::from_str(source)
        .map_err(|e| ValidationError::SchemaCompile {
            reason: format!("스키마 파싱 오류: {}", e),
        })?;

    let schema = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&schema_value)
        .map_err(|e| ValidationError::SchemaCompile { reason: e.to_string() })?;

    Ok(schema)
}

fn check(schema: &JSONSchema, instance: &Value, stage: Stage, prefix: &str) -> Result<(), ValidationError> {
    if let Err(mut errors) = schema.validate(instance) {
        if let Some(error) = errors.next() {
            if let ValidationErrorKind::Required { property } = &error.kind {
                let name = property
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| property.to_string());
                return Err(ValidationError::Required {
                    path: stage.required_label(&name),
                });
            }

            return Err(ValidationError::Schema {
                path: dotted_path(prefix, &error.instance_path.to_string()),
                message: error.to_string(),
            });
        }
    }
    Ok(())
}

/// JSON 포인터(`/endpoints/0/method`)를 `endpoints[0].method` 형태로 변환
fn dotted_path(prefix: &str, pointer: &str) -> String {
    let mut path = prefix.to_string();
    for segment in pointer.split('/').filter(|s| !s.is_empty()) {
        if segment.parse::<usize>().is_ok() {
            path.push_str(&format!("[{}]", segment));
        } else {
            if !path.is_empty() {
                path.push('.');
            }
            path.push_str(segment);
        }
    }

    if path.is_empty() {
        "value".to_string()
    } else {
        path
    }
}
