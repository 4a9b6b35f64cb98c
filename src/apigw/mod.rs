//! API 게이트웨이 원격 액션 디스패치
//!
//! 고정된 액션 허용 목록으로 호출 테이블을 만들고, 각 호출을
//! [`RpcClient`] 협력자에게 위임한다. 서명과 전송은 협력자의 책임이다.

mod action;
mod client;
mod dispatcher;
mod error;

pub use action::{RemoteAction, UnknownAction};
pub use client::{
    ConnectionOptions, HttpRpcClient, RequestOptions, RpcClient, TransportProtocol,
    V3_API_VERSION, V3_ERROR_CODE,
};
pub use dispatcher::{ActionEntry, BoundAction, Dispatcher, SERVICE_TYPE, TRANSPORT_PATH};
pub use error::{ApiError, HttpError, TransportError};
