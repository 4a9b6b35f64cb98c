use std::process::{Command, Output};

// 환경 변수 설정에 영향받지 않도록 APIGW_* 변수를 제거하고 실행
fn run_cli(args: &[&str]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_apigw_deployer"));
    for (key, _) in std::env::vars() {
        if key.starts_with("APIGW_") {
            command.env_remove(key);
        }
    }
    command.args(args).output().unwrap()
}

#[test]
fn test_argument_errors_exit_with_one() {
    for args in [&[][..], &["deploy"][..], &["call"][..], &["call", "describeApi"][..]] {
        let output = run_cli(args);
        assert_eq!(output.status.code(), Some(1), "args: {:?}", args);
        assert!(String::from_utf8_lossy(&output.stderr).contains("사용법"));
    }
}

#[test]
fn test_validate_failure_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("serverless.json");
    std::fs::write(&path, r#"{"endpoints": []}"#).unwrap();

    let output = run_cli(&["validate", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("\"serviceName\" is required"));
}

#[test]
fn test_actions_lists_table() {
    let output = run_cli(&["actions"]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 25);
    assert!(stdout.lines().any(|line| line == "DeleteApiKey (existence check)"));
}
