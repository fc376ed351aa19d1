use std::future::Future;
use std::time::Duration;

use derive_builder::Builder;
use reqwest::Client;
use tracing::{debug, trace};
use url::Url;

use crate::error::{Error, Result};
use crate::fetch::{Fetch, RequestOptions};

const DEFAULT_TIMEOUT_SECS: u64 = 6; // 默认请求超时，单位秒
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 6; // 默认连接超时，单位秒
const DEFAULT_READ_TIMEOUT_SECS: u64 = 6; // 默认读取超时，单位秒
// 默认 User-Agent 头 rpcgate-client/<version>
const DEFAULT_USER_AGENT: &str = concat!("rpcgate-client/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug, Builder)]
pub struct HttpClientOption {
    #[builder(default, setter(custom))]
    pub origin: Option<Url>,            // 相对 URL（如 /api/users）拼接到此源
    #[builder(default = "Duration::from_secs(DEFAULT_TIMEOUT_SECS)")]
    pub timeout: Duration,              // 请求超时
    #[builder(default = "default_headers()")]
    pub headers: Vec<(String, String)>, // 额外基础请求头
    #[builder(default = "Duration::from_secs(DEFAULT_READ_TIMEOUT_SECS)")]
    pub read_timeout: Duration,         // 读取超时
    #[builder(default = "Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)")]
    pub connect_timeout: Duration,      // 连接超时
}

impl HttpClientOption {
    pub fn builder() -> HttpClientOptionBuilder {
        HttpClientOptionBuilder::default()
    }

    pub fn with_origin(origin: Url) -> Result<HttpClientOption> {
        HttpClientOption::builder()
            .origin(origin)
            .build()
            .map_err(|e| Error::InvalidArgument(format!("Build HttpClientOption failed: {}", e)))
    }
}

impl HttpClientOptionBuilder {
    pub fn origin(&mut self, origin: Url) -> &mut Self {
        self.origin = Some(Some(origin));
        self
    }
}

fn default_headers() -> Vec<(String, String)> {
    vec![
        ("User-Agent".to_string(), DEFAULT_USER_AGENT.to_string()),
    ]
}

fn build_client(
    headers: reqwest::header::HeaderMap,
    timeout: Duration,
    connect_timeout: Duration,
    read_timeout: Duration,
) -> Result<Client> {
    let client = Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .read_timeout(read_timeout)
        .build()?;

    Ok(client)
}

/// 基于 reqwest 的 [`Fetch`] 实现
#[derive(Clone, Debug)]
pub struct HttpClient {
    inner: Client,
    option: HttpClientOption,
}

impl HttpClient {
    /// 创建一个新的 HttpClient 实例
    pub fn new(option: HttpClientOption) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();

        for (header, value) in &option.headers {
            headers.insert(
                reqwest::header::HeaderName::from_bytes(header.as_bytes())
                    .map_err(|e| Error::InvalidHeader(format!("{}: {}", header, e)))?,
                // 兼容非 ASCII 的值：优先 from_str，失败则回退到原始字节
                reqwest::header::HeaderValue::from_str(value)
                    .or_else(|_| reqwest::header::HeaderValue::from_bytes(value.as_bytes()))
                    .map_err(|e| Error::InvalidHeader(format!("{}: {}", header, e)))?,
            );
        }

        let inner = build_client(headers, option.timeout, option.connect_timeout, option.read_timeout)?;

        Ok(Self { inner, option })
    }

    pub fn with_origin(origin: impl AsRef<str>) -> Result<Self> {
        let origin = Url::parse(origin.as_ref())?;
        Self::new(HttpClientOption::with_origin(origin)?)
    }

    pub fn from_reqwest(inner: Client, origin: impl AsRef<str>) -> Result<Self> {
        let origin = Url::parse(origin.as_ref())?;
        Ok(Self {
            inner,
            option: HttpClientOption::with_origin(origin)?,
        })
    }

    pub fn client(&self) -> &Client {
        &self.inner
    }

    pub fn origin(&self) -> Option<&Url> {
        self.option.origin.as_ref()
    }

    pub fn options(&self) -> &HttpClientOption {
        &self.option
    }

    /// 绝对 URL 原样使用；相对 URL 拼接到 origin 上
    pub fn resolve_url(&self, url: &str) -> Result<Url> {
        match Url::parse(url) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => match &self.option.origin {
                Some(origin) => Ok(origin.join(url)?),
                None => Err(Error::UrlParse(url::ParseError::RelativeUrlWithoutBase)),
            },
            Err(e) => Err(e.into()),
        }
    }
}

impl Fetch for HttpClient {
    type Response = reqwest::Response;

    fn fetch(
        &self,
        url: String,
        options: RequestOptions,
    ) -> impl Future<Output = Result<reqwest::Response>> + Send {
        async move {
            let url = self.resolve_url(&url)?;
            let RequestOptions { method, headers, body } = options;
            debug!(%method, %url, "sending http request");

            let mut req = self.inner.request(method, url).headers(headers);
            if let Some(body) = body {
                req = req.body(body);
            }

            let resp = req.send().await?;
            trace!(status = resp.status().as_u16(), "http response received");
            Ok(resp)
        }
    }
}
