/// 서비스 설정 스키마 정의
///
/// 검증은 단계별로 진행되므로 스키마도 단계별로 나뉜다.
/// 모든 스키마는 JSON Schema Draft 7을 따른다.

/// 최상위 서비스 스키마. 알 수 없는 최상위 키는 허용한다.
/// endpoints 항목 내부는 `ENDPOINT_SCHEMA`에서 따로 검사한다.
pub const SERVICE_SCHEMA: &str = r#"{
    "$schema": "http://json-schema.org/draft-07/schema#",
    "type": "object",
    "required": ["serviceName", "endpoints"],
    "properties": {
        "region": {"type": "string"},
        "serviceId": {"type": "string"},
        "protocol": {
            "type": "string",
            "enum": ["http", "https", "http&https"]
        },
        "serviceName": {"type": "string", "minLength": 2, "maxLength": 50},
        "description": {"type": "string", "maxLength": 200},
        "environment": {
            "type": "string",
            "enum": ["prepub", "test", "release"]
        },
        "endpoints": {"type": "array", "maxItems": 100}
    }
}"#;

/// 엔드포인트 형태 스키마. function/usagePlan/auth 내부는 이후 단계에서 검사한다.
pub const ENDPOINT_SCHEMA: &str = r#"{
    "$schema": "http://json-schema.org/draft-07/schema#",
    "type": "object",
    "required": ["path", "method", "function"],
    "additionalProperties": false,
    "properties": {
        "apiId": {"type": "string"},
        "description": {"type": "string", "maxLength": 200},
        "enableCORS": {"type": "boolean"},
        "path": {"type": "string"},
        "method": {
            "type": "string",
            "enum": ["GET", "POST", "PUT", "DELETE", "HEAD", "ANY"]
        },
        "function": {"type": "object"},
        "usagePlan": {"type": "object"},
        "auth": {"type": "object"}
    }
}"#;

/// 백엔드 함수 바인딩 스키마
pub const FUNCTION_SCHEMA: &str = r#"{
    "$schema": "http://json-schema.org/draft-07/schema#",
    "type": "object",
    "required": ["functionName"],
    "additionalProperties": false,
    "properties": {
        "isIntegratedResponse": {"type": "boolean"},
        "functionQualifier": {"type": "string"},
        "functionName": {"type": "string"}
    }
}"#;

/// 사용량 계획 스키마
pub const USAGE_PLAN_SCHEMA: &str = r#"{
    "$schema": "http://json-schema.org/draft-07/schema#",
    "type": "object",
    "required": ["usagePlanName"],
    "additionalProperties": false,
    "properties": {
        "usagePlanId": {"type": "string"},
        "usagePlanDesc": {"type": "string", "maxLength": 200},
        "maxRequestNum": {"type": "integer", "minimum": 1, "maximum": 99999999},
        "maxRequestNumPreSec": {"type": "integer", "minimum": 1, "maximum": 2000},
        "usagePlanName": {"type": "string", "minLength": 2, "maxLength": 50}
    }
}"#;

/// 인증 설정 스키마
pub const AUTH_SCHEMA: &str = r#"{
    "$schema": "http://json-schema.org/draft-07/schema#",
    "type": "object",
    "required": ["secretName"],
    "additionalProperties": false,
    "properties": {
        "serviceTimeout": {"type": "integer"},
        "secretName": {"type": "string"},
        "secretIds": {
            "type": "array",
            "maxItems": 100,
            "items": {"type": "string"}
        }
    }
}"#;
