use thiserror::Error;

/// 定义错误类型
#[derive(Debug, Error)]
pub enum Error {
    // 传输层/超时/DNS 等，直接透传 reqwest::Error
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    // 非 2xx 状态码，不读取响应体
    #[error("HTTP error! status: {status} for URL: {url}")]
    Request { url: String, status: u16 },

    // 成功响应的响应体不是合法 JSON，附带 URL、源错误以及响应体片段
    #[error("Failed to parse response from URL: {url}\nSource error: {source}\nResponse body (truncated): {body_snippet}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
        body_snippet: String,
    },

    // 请求体序列化失败
    #[error("Failed to encode request payload: {0}")]
    Encode(#[source] serde_json::Error),

    // URL 解析错误，附带源错误
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    // 严格模式下路径模板仍有未替换的占位符
    #[error("Unresolved placeholder `${{{name}}}` in path: {path}")]
    UnresolvedPlaceholder { name: String, path: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// 非 2xx 响应的状态码；其它错误返回 `None`
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Request { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// 截取响应体的前 N 个字符用于错误消息 避免过长导致日志臃肿
pub fn snippet(s: &str, limit: usize) -> String {
    const ELLIPSIS: &str = "…";
    if s.chars().count() <= limit {
        s.to_string()
    } else {
        let mut out = s.chars().take(limit).collect::<String>();
        out.push_str(ELLIPSIS);
        out
    }
}
