use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::debug;
use uuid::Uuid;

use super::error::TransportError;
use crate::config::DEFAULT_REGION;

/// v3 API 버전 헤더 기본값
pub const V3_API_VERSION: &str = "2018-08-08";

/// v3 오류 응답을 정규화할 때 사용하는 상태 코드
pub const V3_ERROR_CODE: i64 = -1;

/// 전송 프로토콜
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportProtocol {
    Http,
    #[default]
    Https,
}

impl fmt::Display for TransportProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportProtocol::Http => f.write_str("http"),
            TransportProtocol::Https => f.write_str("https"),
        }
    }
}

impl std::str::FromStr for TransportProtocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" => Ok(TransportProtocol::Http),
            "https" => Ok(TransportProtocol::Https),
            _ => Err(format!("Invalid transport protocol: {}", s)),
        }
    }
}

/// RPC 클라이언트 연결 옵션
#[derive(Clone)]
pub struct ConnectionOptions {
    pub secret_id: String,
    pub secret_key: String,
    pub token: Option<String>,
    pub region: String,
    /// 서비스 종류 (디스패처가 생성 시 지정)
    pub service_type: String,
    pub protocol: TransportProtocol,
    /// 호스트 재정의
    pub host: Option<String>,
    pub timeout: Duration,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            secret_id: String::new(),
            secret_key: String::new(),
            token: None,
            region: DEFAULT_REGION.to_string(),
            service_type: String::new(),
            protocol: TransportProtocol::default(),
            host: None,
            timeout: Duration::from_secs(30),
        }
    }
}

// secret_key는 로그에 남지 않도록 가린다
impl fmt::Debug for ConnectionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionOptions")
            .field("secret_id", &self.secret_id)
            .field("secret_key", &"***")
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("region", &self.region)
            .field("service_type", &self.service_type)
            .field("protocol", &self.protocol)
            .field("host", &self.host)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// 요청 단위 옵션. 지정하지 않은 값은 연결 옵션을 따른다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub path: Option<String>,
    pub host: Option<String>,
    pub timeout: Option<Duration>,
}

/// 서명된 클라우드 RPC 요청을 수행하는 협력자
///
/// 응답은 최소한 `{code: number, message: string}`을 포함해야 한다.
/// 전송 실패는 `Err`로 반환한다.
#[async_trait]
pub trait RpcClient: Send + Sync {
    async fn request(
        &self,
        payload: Map<String, Value>,
        options: RequestOptions,
        use_v3: bool,
    ) -> Result<Value, TransportError>;
}

/// reqwest 기반 RPC 클라이언트
///
/// 요청 서명은 수행하지 않는다. 서명은 앞단 게이트웨이나 별도 클라이언트가 담당한다.
pub struct HttpRpcClient {
    options: ConnectionOptions,
    client: reqwest::Client,
}

impl HttpRpcClient {
    pub fn new(options: ConnectionOptions) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()?;

        Ok(Self { options, client })
    }

    pub fn options(&self) -> &ConnectionOptions {
        &self.options
    }

    fn host(&self, request: &RequestOptions, use_v3: bool) -> String {
        if let Some(host) = request.host.as_ref().or(self.options.host.as_ref()) {
            return host.clone();
        }

        if use_v3 {
            format!("{}.tencentcloudapi.com", self.options.service_type)
        } else {
            format!("{}.api.qcloud.com", self.options.service_type)
        }
    }
}

#[async_trait]
impl RpcClient for HttpRpcClient {
    async fn request(
        &self,
        mut payload: Map<String, Value>,
        options: RequestOptions,
        use_v3: bool,
    ) -> Result<Value, TransportError> {
        let url = format!(
            "{}://{}{}",
            self.options.protocol,
            self.host(&options, use_v3),
            options.path.as_deref().unwrap_or("/")
        );
        let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

        let mut builder = self.client.post(&url);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        if use_v3 {
            let action = payload.remove("Action").unwrap_or(Value::Null);
            let version = payload.remove("Version");

            builder = builder
                .header("X-TC-Action", action.as_str().unwrap_or_default())
                .header("X-TC-Region", self.options.region.as_str())
                .header("X-TC-Timestamp", timestamp.to_string())
                .header(
                    "X-TC-Version",
                    version.as_ref().and_then(Value::as_str).unwrap_or(V3_API_VERSION),
                );
            if let Some(token) = &self.options.token {
                builder = builder.header("X-TC-Token", token.as_str());
            }
        } else {
            payload
                .entry("Region")
                .or_insert_with(|| json!(self.options.region));
            payload
                .entry("SecretId")
                .or_insert_with(|| json!(self.options.secret_id));
            payload.entry("Timestamp").or_insert_with(|| json!(timestamp));
            payload
                .entry("Nonce")
                .or_insert_with(|| json!(Uuid::new_v4().as_fields().0));
            if let Some(token) = &self.options.token {
                payload.entry("Token").or_insert_with(|| json!(token));
            }
        }

        debug!(url = %url, v3 = use_v3, "RPC 요청 전송");

        let response = builder.json(&payload).send().await?;
        let body: Value = response.json().await?;

        Ok(if use_v3 { normalize_v3(body) } else { body })
    }
}

/// v3 `{"Response": {...}}` 응답을 `{code, message, ...}` 형태로 변환
fn normalize_v3(body: Value) -> Value {
    let mut envelope = match body {
        Value::Object(envelope) => envelope,
        other => return other,
    };

    match envelope.remove("Response") {
        Some(Value::Object(mut response)) => {
            match response.remove("Error") {
                Some(error) => {
                    let message = error
                        .get("Message")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string();
                    response.insert("code".to_string(), json!(V3_ERROR_CODE));
                    response.insert("message".to_string(), json!(message));
                    response.insert(
                        "codeDesc".to_string(),
                        error.get("Code").cloned().unwrap_or(Value::Null),
                    );
                }
                None => {
                    response.insert("code".to_string(), json!(0));
                    response.insert("message".to_string(), json!(""));
                }
            }
            Value::Object(response)
        }
        Some(other) => {
            envelope.insert("Response".to_string(), other);
            Value::Object(envelope)
        }
        None => Value::Object(envelope),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_v3_success() {
        let body = json!({"Response": {"RequestId": "abc", "ServiceId": "service-1"}});
        let normalized = normalize_v3(body);

        assert_eq!(normalized["code"], 0);
        assert_eq!(normalized["message"], "");
        assert_eq!(normalized["ServiceId"], "service-1");
    }

    #[test]
    fn test_normalize_v3_error() {
        let body = json!({
            "Response": {
                "RequestId": "abc",
                "Error": {"Code": "ResourceNotFound.InvalidService", "Message": "service does not exist"}
            }
        });
        let normalized = normalize_v3(body);

        assert_eq!(normalized["code"], V3_ERROR_CODE);
        assert_eq!(normalized["message"], "service does not exist");
        assert_eq!(normalized["codeDesc"], "ResourceNotFound.InvalidService");
        assert!(normalized.get("Error").is_none());
    }

    #[test]
    fn test_normalize_v3_passthrough() {
        let body = json!({"code": 0, "message": ""});
        assert_eq!(normalize_v3(body.clone()), body);
    }

    #[test]
    fn test_connection_options_debug_hides_secret() {
        let options = ConnectionOptions {
            secret_id: "id".to_string(),
            secret_key: "very-secret".to_string(),
            ..Default::default()
        };

        let printed = format!("{:?}", options);
        assert!(!printed.contains("very-secret"));
        assert!(printed.contains("ap-guangzhou"));
    }

    #[test]
    fn test_host_resolution() {
        let client = HttpRpcClient::new(ConnectionOptions {
            service_type: "apigateway".to_string(),
            ..Default::default()
        })
        .unwrap();

        let defaults = RequestOptions::default();
        assert_eq!(client.host(&defaults, false), "apigateway.api.qcloud.com");
        assert_eq!(client.host(&defaults, true), "apigateway.tencentcloudapi.com");

        let overridden = RequestOptions {
            host: Some("127.0.0.1:9000".to_string()),
            ..Default::default()
        };
        assert_eq!(client.host(&overridden, false), "127.0.0.1:9000");
    }
}
