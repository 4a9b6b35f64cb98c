use std::fmt;

/// RPC 클라이언트가 반환하는 전송 계층 오류
///
/// 디스패처는 이 오류를 감싸거나 재시도하지 않고 그대로 전달한다.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// 원격 액션이 0이 아닌 상태 코드를 반환했을 때의 오류
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    pub code: i64,
    pub message: String,
}

impl HttpError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for HttpError {}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("원격 액션 실패 ({0})")]
    Http(#[from] HttpError),

    #[error(transparent)]
    Transport(TransportError),

    #[error("액션 {action}의 파라미터는 객체여야 합니다")]
    InvalidParameters { action: String },

    #[error("액션 {action}의 응답에 숫자 code가 없음: {response}")]
    InvalidResponse { action: String, response: String },
}

impl ApiError {
    /// 원격 상태 코드 오류인 경우 그 내용
    pub fn as_http(&self) -> Option<&HttpError> {
        match self {
            ApiError::Http(e) => Some(e),
            _ => None,
        }
    }
}
