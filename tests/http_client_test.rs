use apigw_deployer::apigw::{
    ApiError, ConnectionOptions, Dispatcher, HttpRpcClient, RemoteAction, RequestOptions,
    TransportProtocol, V3_ERROR_CODE,
};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

// Mock 게이트웨이가 받은 요청
#[derive(Debug, Clone)]
struct Captured {
    path: String,
    headers: HashMap<String, String>,
    body: Value,
}

type CapturedLog = Arc<Mutex<Vec<Captured>>>;

// 고정 응답을 돌려주는 로컬 HTTP 서버
async fn spawn_gateway(response: &'static str, delay: Duration) -> (SocketAddr, CapturedLog) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captured: CapturedLog = Arc::new(Mutex::new(Vec::new()));
    let sink = captured.clone();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let sink = sink.clone();
            tokio::spawn(async move {
                let service = service_fn(move |req: Request<Incoming>| {
                    let sink = sink.clone();
                    async move {
                        let path = req.uri().path().to_string();
                        let headers = req
                            .headers()
                            .iter()
                            .map(|(k, v)| {
                                (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string())
                            })
                            .collect();
                        let bytes = req.into_body().collect().await?.to_bytes();
                        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
                        sink.lock().unwrap().push(Captured { path, headers, body });

                        tokio::time::sleep(delay).await;
                        Ok::<_, hyper::Error>(Response::new(Full::new(Bytes::from(response))))
                    }
                });

                let _ = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service)
                    .await;
            });
        }
    });

    (addr, captured)
}

fn options_for(addr: SocketAddr) -> ConnectionOptions {
    ConnectionOptions {
        secret_id: "AKID-test".to_string(),
        secret_key: "secret".to_string(),
        token: Some("session-token".to_string()),
        region: "ap-shanghai".to_string(),
        protocol: TransportProtocol::Http,
        host: Some(addr.to_string()),
        timeout: Duration::from_secs(5),
        ..Default::default()
    }
}

fn connect(addr: SocketAddr) -> Dispatcher {
    Dispatcher::new(options_for(addr), HttpRpcClient::new).unwrap()
}

#[tokio::test]
async fn test_v2_request_carries_common_parameters() {
    let (addr, captured) = spawn_gateway(
        r#"{"code": 0, "message": "", "serviceId": "service-1"}"#,
        Duration::ZERO,
    )
    .await;
    let dispatcher = connect(addr);

    let response = dispatcher
        .call(RemoteAction::CreateService, json!({"serviceName": "demo"}), None, false)
        .await
        .unwrap();
    assert_eq!(response, json!({"code": 0, "message": "", "serviceId": "service-1"}));

    let request = captured.lock().unwrap()[0].clone();
    assert_eq!(request.path, "/v2/index.php");
    assert_eq!(request.body["Action"], "CreateService");
    assert_eq!(request.body["serviceName"], "demo");
    assert_eq!(request.body["Region"], "ap-shanghai");
    assert_eq!(request.body["SecretId"], "AKID-test");
    assert_eq!(request.body["Token"], "session-token");
    assert!(request.body["Timestamp"].is_u64());
    assert!(request.body["Nonce"].is_u64());
    assert!(request.body.get("SecretKey").is_none());
}

#[tokio::test]
async fn test_v2_caller_parameters_win() {
    let (addr, captured) = spawn_gateway(r#"{"code": 0}"#, Duration::ZERO).await;
    let dispatcher = connect(addr);

    dispatcher
        .call(RemoteAction::DescribeService, json!({"Region": "ap-beijing"}), None, false)
        .await
        .unwrap();

    let request = captured.lock().unwrap()[0].clone();
    assert_eq!(request.body["Region"], "ap-beijing");
}

#[tokio::test]
async fn test_v3_request_uses_headers() {
    let (addr, captured) = spawn_gateway(
        r#"{"Response": {"RequestId": "req-1", "ServiceId": "service-9"}}"#,
        Duration::ZERO,
    )
    .await;
    let dispatcher = connect(addr);

    let response = dispatcher
        .call(RemoteAction::DescribeService, json!({"ServiceId": "service-9"}), None, true)
        .await
        .unwrap();
    assert_eq!(response["code"], 0);
    assert_eq!(response["ServiceId"], "service-9");

    let request = captured.lock().unwrap()[0].clone();
    assert_eq!(request.path, "/v2/index.php");
    assert_eq!(request.headers["x-tc-action"], "DescribeService");
    assert_eq!(request.headers["x-tc-region"], "ap-shanghai");
    assert_eq!(request.headers["x-tc-version"], "2018-08-08");
    assert_eq!(request.headers["x-tc-token"], "session-token");
    assert!(request.body.get("Action").is_none());
    assert_eq!(request.body["ServiceId"], "service-9");
}

#[tokio::test]
async fn test_v3_not_found_is_swallowed_for_delete() {
    let (addr, _) = spawn_gateway(
        r#"{"Response": {"RequestId": "req-2", "Error": {"Code": "ResourceNotFound.InvalidApiKey", "Message": "api key not found"}}}"#,
        Duration::ZERO,
    )
    .await;
    let dispatcher = connect(addr);

    let response = dispatcher
        .call(RemoteAction::DeleteApiKey, json!({"AccessKeyId": "AKID"}), None, true)
        .await
        .unwrap();
    assert_eq!(response["code"], V3_ERROR_CODE);
    assert_eq!(response["codeDesc"], "ResourceNotFound.InvalidApiKey");

    let error = dispatcher
        .call(RemoteAction::CreateApiKey, json!({}), None, true)
        .await
        .unwrap_err();
    assert_eq!(error.as_http().map(|e| e.code), Some(V3_ERROR_CODE));
}

#[tokio::test]
async fn test_invalid_body_is_transport_error() {
    let (addr, _) = spawn_gateway("<html>bad gateway</html>", Duration::ZERO).await;
    let dispatcher = connect(addr);

    let result = dispatcher
        .call(RemoteAction::DescribeApi, json!({}), None, false)
        .await;
    assert!(matches!(result, Err(ApiError::Transport(_))));
}

#[tokio::test]
async fn test_request_timeout_override() {
    let (addr, _) = spawn_gateway(r#"{"code": 0}"#, Duration::from_secs(2)).await;
    let dispatcher = connect(addr);

    let options = RequestOptions {
        timeout: Some(Duration::from_millis(200)),
        ..Default::default()
    };
    let result = dispatcher
        .call(RemoteAction::DescribeApi, json!({}), Some(options), false)
        .await;
    assert!(matches!(result, Err(ApiError::Transport(_))));
}

#[tokio::test]
async fn test_connection_refused() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dispatcher = connect(addr);
    let result = dispatcher
        .call(RemoteAction::ReleaseService, json!({}), None, false)
        .await;
    assert!(matches!(result, Err(ApiError::Transport(_))));
}
