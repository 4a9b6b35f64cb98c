//! API 게이트웨이 배포 도구의 설정 검증기와 원격 액션 디스패처입니다.
//!
//! # 주요 기능
//!
//! - 서비스/엔드포인트/사용량 계획/인증 설정 검증 및 기본값 적용
//! - 고정된 원격 액션 목록에 대한 호출 테이블
//! - 해제/삭제 액션의 "이미 없음" 실패 무시
//!
//! # 설정 검증
//!
//! ```
//! use apigw_deployer::config;
//! use serde_json::json;
//!
//! let config = config::validate(&json!({
//!     "serviceName": "demo",
//!     "endpoints": [{
//!         "path": "/users",
//!         "method": "GET",
//!         "function": {"functionName": "list-users"}
//!     }]
//! })).unwrap();
//!
//! assert_eq!(config.region, "ap-guangzhou");
//! assert_eq!(config.endpoints[0].function.function_qualifier, "$LATEST");
//! ```
//!
//! # 액션 테이블
//!
//! ```
//! use apigw_deployer::apigw::{RemoteAction, SERVICE_TYPE};
//!
//! assert_eq!(RemoteAction::ALL.len(), 25);
//! assert!(RemoteAction::DeleteApiKey.needs_existence_check());
//! assert!(!RemoteAction::CreateService.needs_existence_check());
//! assert_eq!(SERVICE_TYPE, "apigateway");
//! ```

pub mod apigw;
pub mod config;
pub mod logging;
pub mod settings;
