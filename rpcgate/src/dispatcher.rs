//! 请求分发器
//!
//! 每次调用：拼接 `base_url + path`，可选地附带 JSON 请求体，
//! 调用一次注入的 [`Fetch`]，非 2xx 返回 [`Error::Request`]，
//! 否则把响应体解码为调用方期望的类型。

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace};

use crate::codec::{self, JSON_CONTENT_TYPE};
use crate::error::{Error, Result};
use crate::fetch::{Fetch, FetchResponse, RequestOptions};
use crate::path;

/// 默认的基础地址
pub const DEFAULT_BASE_URL: &str = "/api";

#[derive(Debug, Clone)]
pub struct Dispatcher<F> {
    fetch: F,
    base_url: String,
}

impl<F> Dispatcher<F> {
    pub fn new(fetch: F) -> Self {
        Self::with_base_url(fetch, DEFAULT_BASE_URL)
    }

    /// `base_url` 不做任何校验或规范化
    pub fn with_base_url(fetch: F, base_url: impl Into<String>) -> Self {
        Self {
            fetch,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn fetcher(&self) -> &F {
        &self.fetch
    }

    /// 见 [`path::resolve_path`]
    pub fn resolve_path<I, K, V>(&self, pattern: &str, params: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        path::resolve_path(pattern, params)
    }

    /// 见 [`path::try_resolve_path`]
    pub fn try_resolve_path<I, K, V>(&self, pattern: &str, params: I) -> Result<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        path::try_resolve_path(pattern, params)
    }
}

impl<F: Fetch> Dispatcher<F> {
    /// 发送一次请求并解码 JSON 响应体。
    ///
    /// `path` 原样追加在 `base_url` 之后；`payload` 为 `Some` 时序列化为请求体。
    /// 无论有无请求体都会声明 `content-type: application/json`。
    pub async fn send<T, P>(&self, method: Method, path: &str, payload: Option<&P>) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let body = payload.map(codec::encode).transpose()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

        debug!(%method, %url, has_body = body.is_some(), "dispatching request");
        let options = RequestOptions { method, headers, body };
        let response = self.fetch.fetch(url.clone(), options).await?;

        let status = response.status();
        trace!(%url, status = status.as_u16(), "response received");
        if !response.is_success() {
            return Err(Error::Request {
                url,
                status: status.as_u16(),
            });
        }

        let bytes = response.body().await?;
        codec::decode(&url, &bytes)
    }

    /// 不带请求体的 [`send`](Self::send)
    pub async fn send_empty<T>(&self, method: Method, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.send::<T, ()>(method, path, None).await
    }
}
