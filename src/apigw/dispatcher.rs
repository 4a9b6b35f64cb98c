use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, instrument};

use super::action::RemoteAction;
use super::client::{ConnectionOptions, HttpRpcClient, RequestOptions, RpcClient};
use super::error::{ApiError, HttpError, TransportError};

/// RPC 클라이언트에 지정하는 서비스 종류
pub const SERVICE_TYPE: &str = "apigateway";

/// 모든 액션 요청에 강제되는 전송 경로
pub const TRANSPORT_PATH: &str = "/v2/index.php";

/// 해제/삭제 액션에서 "이미 없음"으로 간주하는 메시지 (대소문자 구분)
const NOT_FOUND_MARKERS: [&str; 2] = ["does not exist", "not found"];

/// 액션 테이블 항목
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionEntry {
    pub action: RemoteAction,
    pub needs_existence_check: bool,
}

impl ActionEntry {
    fn new(action: RemoteAction) -> Self {
        Self {
            action,
            needs_existence_check: action.needs_existence_check(),
        }
    }
}

/// API 게이트웨이 액션 디스패처
///
/// 허용 목록의 액션마다 하나의 항목을 갖는 고정 테이블을 생성 시 만든다.
/// 호출 간 공유되는 가변 상태는 없다.
pub struct Dispatcher {
    client: Arc<dyn RpcClient>,
    actions: [ActionEntry; 25],
}

impl Dispatcher {
    /// 연결 옵션에 서비스 종류를 지정한 뒤 `connect`로 RPC 클라이언트를 만든다
    pub fn new<C, F>(mut options: ConnectionOptions, connect: F) -> Result<Self, ApiError>
    where
        C: RpcClient + 'static,
        F: FnOnce(ConnectionOptions) -> Result<C, TransportError>,
    {
        options.service_type = SERVICE_TYPE.to_string();
        let client = connect(options).map_err(ApiError::Transport)?;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// 기본 HTTP 클라이언트로 디스패처 생성
    pub fn connect(options: ConnectionOptions) -> Result<Self, ApiError> {
        Self::new(options, HttpRpcClient::new)
    }

    /// 이미 구성된 클라이언트를 사용
    pub fn with_client(client: Arc<dyn RpcClient>) -> Self {
        let actions = RemoteAction::ALL.map(ActionEntry::new);
        debug!(actions = actions.len(), "액션 테이블 생성");
        Self { client, actions }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &ActionEntry> {
        self.actions.iter()
    }

    pub fn action(&self, action: RemoteAction) -> BoundAction<'_> {
        // ALL과 열거 순서가 같으므로 판별값이 곧 인덱스
        BoundAction {
            dispatcher: self,
            entry: self.actions[action as usize],
        }
    }

    pub fn by_name(&self, name: &str) -> Option<BoundAction<'_>> {
        name.parse::<RemoteAction>().ok().map(|action| self.action(action))
    }

    /// 테이블 항목을 통해 액션 호출
    pub async fn call(
        &self,
        action: RemoteAction,
        parameters: Value,
        options: Option<RequestOptions>,
        use_v3: bool,
    ) -> Result<Value, ApiError> {
        self.action(action).call(parameters, options, use_v3).await
    }

    /// 공통 호출 루틴
    ///
    /// 파라미터에 `Action`을 합치고 경로를 고정한 뒤 RPC 클라이언트에 위임한다.
    /// 응답 `code`가 0이 아니면 `HttpError`를 반환하되, `needs_existence_check`이면
    /// "존재하지 않음" 메시지는 성공으로 취급해 원본 응답을 돌려준다.
    #[instrument(level = "debug", skip(self, parameters, options), fields(action = %action))]
    pub async fn invoke(
        &self,
        action: RemoteAction,
        parameters: Value,
        options: Option<RequestOptions>,
        use_v3: bool,
        needs_existence_check: bool,
    ) -> Result<Value, ApiError> {
        let mut payload = match parameters {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            _ => {
                return Err(ApiError::InvalidParameters {
                    action: action.to_string(),
                })
            }
        };
        payload.insert("Action".to_string(), Value::String(action.as_str().to_string()));

        let options = RequestOptions {
            path: Some(TRANSPORT_PATH.to_string()),
            ..options.unwrap_or_default()
        };

        let response = self
            .client
            .request(payload, options, use_v3)
            .await
            .map_err(ApiError::Transport)?;

        let code = match response.get("code").and_then(response_code) {
            Some(code) => code,
            None => {
                return Err(ApiError::InvalidResponse {
                    action: action.to_string(),
                    response: response.to_string(),
                })
            }
        };

        if code == 0 {
            return Ok(response);
        }

        let message = response
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default();

        if needs_existence_check && is_not_found(message) {
            debug!(code, message = %message, "리소스가 이미 없음, 실패 무시");
            return Ok(response);
        }

        Err(HttpError::new(code, message).into())
    }
}

/// 응답 `code`를 정수로 읽는다. 정수값 실수와 i64 범위를 넘는 정수도 허용한다.
fn response_code(code: &Value) -> Option<i64> {
    if let Some(code) = code.as_i64() {
        return Some(code);
    }

    // u64 초과분은 `as` 변환에서 i64::MAX로 포화된다
    code.as_f64()
        .filter(|code| code.fract() == 0.0)
        .map(|code| code as i64)
}

fn is_not_found(message: &str) -> bool {
    NOT_FOUND_MARKERS.iter().any(|marker| message.contains(marker))
}

/// 테이블 항목에 묶인 호출 핸들
#[derive(Clone, Copy)]
pub struct BoundAction<'a> {
    dispatcher: &'a Dispatcher,
    entry: ActionEntry,
}

impl<'a> BoundAction<'a> {
    pub fn entry(&self) -> ActionEntry {
        self.entry
    }

    pub async fn call(
        &self,
        parameters: Value,
        options: Option<RequestOptions>,
        use_v3: bool,
    ) -> Result<Value, ApiError> {
        self.dispatcher
            .invoke(
                self.entry.action,
                parameters,
                options,
                use_v3,
                self.entry.needs_existence_check,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_not_found_markers() {
        assert!(is_not_found("usage plan does not exist"));
        assert!(is_not_found("secret not found"));
        assert!(!is_not_found("Not Found"));
        assert!(!is_not_found("permission denied"));
    }

    #[test]
    fn test_response_code() {
        assert_eq!(response_code(&json!(0)), Some(0));
        assert_eq!(response_code(&json!(-1)), Some(-1));
        assert_eq!(response_code(&json!(4000.0)), Some(4000));
        assert_eq!(response_code(&json!(u64::MAX)), Some(i64::MAX));
        assert_eq!(response_code(&json!(0.5)), None);
        assert_eq!(response_code(&json!("0")), None);
    }
}
