use std::ffi::OsStr;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::settings::{LogFormat, LogOutput, LogSettings};

const DEFAULT_LOG_FILE: &str = "apigw_deployer.log";

/// 전역 tracing 구독자 초기화
///
/// 반환된 guard가 살아있는 동안 비동기 writer가 로그를 내보낸다.
/// 이미 초기화된 경우 기존 구독자를 유지한다.
pub fn init_logging(settings: &LogSettings) -> WorkerGuard {
    let (writer, guard) = match &settings.output {
        LogOutput::Stderr => tracing_appender::non_blocking(std::io::stderr()),
        LogOutput::File(path) => {
            let path = Path::new(path);
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path.file_name().unwrap_or_else(|| OsStr::new(DEFAULT_LOG_FILE));
            tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name))
        }
    };

    let filter = EnvFilter::from_default_env().add_directive(settings.level.into());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(true);

    let result = match settings.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };

    if result.is_err() {
        tracing::debug!("tracing 구독자가 이미 초기화됨");
    }

    guard
}
