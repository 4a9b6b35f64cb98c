use apigw_deployer::apigw::{Dispatcher, RemoteAction};
use apigw_deployer::config::ServiceConfig;
use apigw_deployer::logging::init_logging;
use apigw_deployer::settings::Settings;
use serde_json::Value;
use std::error::Error;
use std::process;
use tracing::{error, info};

const USAGE: &str = "사용법:
  apigw_deployer validate <config.json|config.toml>
  apigw_deployer actions
  apigw_deployer call <Action> [params.json] [--v3]";

/// 모든 실패(인자, 설정, 실행)에 공통으로 쓰는 종료 코드
const EXIT_FAILURE: i32 = 1;

#[derive(Debug, PartialEq)]
enum Command {
    Validate { path: String },
    Actions,
    Call { action: RemoteAction, params: Option<String>, use_v3: bool },
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    match args.first().map(String::as_str) {
        Some("validate") => match args.get(1) {
            Some(path) => Ok(Command::Validate { path: path.clone() }),
            None => Err("설정 파일 경로가 필요합니다".to_string()),
        },
        Some("actions") => Ok(Command::Actions),
        Some("call") => {
            let action = args
                .get(1)
                .ok_or_else(|| "액션 이름이 필요합니다".to_string())?
                .parse::<RemoteAction>()
                .map_err(|e| e.to_string())?;
            let use_v3 = args.iter().skip(2).any(|arg| arg == "--v3");
            let params = args.iter().skip(2).find(|arg| *arg != "--v3").cloned();
            Ok(Command::Call { action, params, use_v3 })
        }
        Some(other) => Err(format!("알 수 없는 명령: {}", other)),
        None => Err("명령이 필요합니다".to_string()),
    }
}

async fn run(command: Command, settings: &Settings) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Validate { path } => {
            let config = ServiceConfig::from_file(&path).await?;
            info!(service = %config.service_name, endpoints = config.endpoints.len(), "설정 검증 성공");
            println!("{}", serde_json::to_string_pretty(&config.to_value()?)?);
        }
        Command::Actions => {
            for action in RemoteAction::ALL {
                let marker = if action.needs_existence_check() { " (existence check)" } else { "" };
                println!("{}{}", action, marker);
            }
        }
        Command::Call { action, params, use_v3 } => {
            let params = match params {
                Some(path) => serde_json::from_str(&tokio::fs::read_to_string(&path).await?)?,
                None => Value::Null,
            };
            settings.client.require_credentials()?;
            let dispatcher = Dispatcher::connect(settings.client.connection_options()?)?;
            let response = dispatcher.call(action, params, None, use_v3).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            process::exit(EXIT_FAILURE);
        }
    };

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("설정 로드 실패: {}", e);
            process::exit(EXIT_FAILURE);
        }
    };

    let _guard = init_logging(&settings.logging);

    if let Err(e) = run(command, &settings).await {
        error!(error = %e, "명령 실행 실패");
        eprintln!("{}", e);
        process::exit(EXIT_FAILURE);
    }
}
