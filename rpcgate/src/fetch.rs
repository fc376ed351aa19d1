//! 可注入的请求能力
//!
//! [`Dispatcher`](crate::Dispatcher) 只依赖这里的两个 trait，不绑定具体传输库：
//! 生产环境用 [`HttpClient`](crate::HttpClient)，测试里可以直接传一个闭包。

use std::future::Future;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};

use crate::error::Result;

/// 一次请求的描述：方法、请求头、可选的 JSON 请求体
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// 执行一次请求
///
/// 同时为 `Fn(String, RequestOptions) -> Future` 闭包提供了实现。
///
/// 实现者必须是 `Send + Sync`，返回的 future 必须是 `Send`。
/// 浏览器 fetch（wasm 下的 `JsFuture`）这类非 `Send` 的实现不能直接接入，
/// 需要先包装成 `Send` 的 future（例如在单线程执行器上 spawn 后通过 channel 取回结果）。
pub trait Fetch: Send + Sync {
    type Response: FetchResponse;

    fn fetch(
        &self,
        url: String,
        options: RequestOptions,
    ) -> impl Future<Output = Result<Self::Response>> + Send;
}

/// 响应：状态码 + 按需读取的响应体
pub trait FetchResponse: Send {
    fn status(&self) -> StatusCode;

    fn is_success(&self) -> bool {
        self.status().is_success()
    }

    /// 消费响应并读取完整响应体
    fn body(self) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

impl<F, Fut, R> Fetch for F
where
    F: Fn(String, RequestOptions) -> Fut + Send + Sync,
    Fut: Future<Output = Result<R>> + Send,
    R: FetchResponse,
{
    type Response = R;

    fn fetch(
        &self,
        url: String,
        options: RequestOptions,
    ) -> impl Future<Output = Result<R>> + Send {
        self(url, options)
    }
}

impl FetchResponse for reqwest::Response {
    fn status(&self) -> StatusCode {
        reqwest::Response::status(self)
    }

    fn body(self) -> impl Future<Output = Result<Vec<u8>>> + Send {
        async move { Ok(self.bytes().await?.to_vec()) }
    }
}

/// 内存中的静态响应，适用于 mock 或非网络实现
#[derive(Debug, Clone)]
pub struct StaticResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl StaticResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn json(status: StatusCode, body: &serde_json::Value) -> Self {
        Self::new(status, body.to_string())
    }
}

impl FetchResponse for StaticResponse {
    fn status(&self) -> StatusCode {
        self.status
    }

    fn body(self) -> impl Future<Output = Result<Vec<u8>>> + Send {
        async move { Ok(self.body) }
    }
}
