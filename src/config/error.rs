/// 서비스 설정 검증 오류
///
/// 첫 번째 위반 항목에서 검증이 중단되므로 항상 하나의 원인만 담는다.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// 필수 필드 누락
    #[error("\"{path}\" is required")]
    Required { path: String },

    /// 스키마 제약 위반 (길이, 범위, 열거값, 알 수 없는 키 등)
    #[error("\"{path}\" is invalid: {message}")]
    Schema { path: String, message: String },

    /// 입력 파싱 실패
    #[error("설정 파싱 오류: {reason}")]
    Parse { reason: String },

    /// 내장 스키마 컴파일 실패
    #[error("스키마 컴파일 오류: {reason}")]
    SchemaCompile { reason: String },
}

impl ValidationError {
    /// 오류가 가리키는 필드 경로
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Required { path } | Self::Schema { path, .. } => Some(path),
            _ => None,
        }
    }
}
