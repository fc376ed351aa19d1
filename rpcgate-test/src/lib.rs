//! 测试夹具：记录请求的 mock fetch、DTO 以及宏生成的客户端

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use rpcgate::reqwest::header::HeaderMap;
use rpcgate::reqwest::{Method, StatusCode};
use rpcgate::{Fetch, FetchResponse, RequestOptions};
use serde::{Deserialize, Serialize};

mod macros;

pub use macros::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Created {
    pub id: u64,
}

/// mock 观察到的一次请求
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

#[derive(Default)]
struct MockState {
    requests: Vec<RecordedRequest>,
}

/// 固定返回同一个响应，并记录所有请求与响应体读取次数
#[derive(Clone)]
pub struct MockFetch {
    status: StatusCode,
    body: Vec<u8>,
    state: Arc<Mutex<MockState>>,
    body_reads: Arc<AtomicUsize>,
}

impl MockFetch {
    pub fn respond(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
            state: Arc::default(),
            body_reads: Arc::default(),
        }
    }

    pub fn respond_json(status: StatusCode, body: serde_json::Value) -> Self {
        Self::respond(status, body.to_string())
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .requests
            .clone()
    }

    /// 唯一一次请求；请求数不为 1 时 panic
    pub fn single_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request, got {requests:?}");
        requests[0].clone()
    }

    pub fn body_reads(&self) -> usize {
        self.body_reads.load(Ordering::SeqCst)
    }
}

impl Fetch for MockFetch {
    type Response = MockResponse;

    fn fetch(
        &self,
        url: String,
        options: RequestOptions,
    ) -> impl Future<Output = rpcgate::Result<MockResponse>> + Send {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .requests
            .push(RecordedRequest {
                url,
                method: options.method,
                headers: options.headers,
                body: options.body,
            });

        let response = MockResponse {
            status: self.status,
            body: self.body.clone(),
            reads: self.body_reads.clone(),
        };
        async move { Ok(response) }
    }
}

pub struct MockResponse {
    status: StatusCode,
    body: Vec<u8>,
    reads: Arc<AtomicUsize>,
}

impl FetchResponse for MockResponse {
    fn status(&self) -> StatusCode {
        self.status
    }

    fn body(self) -> impl Future<Output = rpcgate::Result<Vec<u8>>> + Send {
        self.reads.fetch_add(1, Ordering::SeqCst);
        async move { Ok(self.body) }
    }
}
