use std::path::PathBuf;

/// 프로세스 설정 오류
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// 환경 변수 값을 해석할 수 없음
    #[error("환경 변수 {var_name} 값 {value:?} 오류: {reason}")]
    EnvVarInvalid {
        var_name: String,
        value: String,
        reason: String,
    },

    /// 설정 항목 값이 허용 범위를 벗어남 (환경 변수/설정 파일 공통)
    #[error("설정 항목 {key} 값 {value:?} 오류: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// 원격 호출에 필요한 자격 증명이 비어 있음
    #[error("자격 증명 {key} 누락 (환경 변수 {env_var} 또는 설정 파일 [client] 섹션)")]
    MissingCredential {
        key: &'static str,
        env_var: &'static str,
    },

    #[error("설정 파일 {} 읽기 오류: {source}", .path.display())]
    FileError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("설정 파일 {} 파싱 오류: {source}", .path.display())]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}
