//! 请求体编码 / 返回体解码
//!
//! 线上格式只有 UTF-8 JSON。

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{snippet, Error, Result};

/// 错误消息里保留的响应体字符数
const BODY_SNIPPET_LIMIT: usize = 256;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// 将请求负载序列化为 JSON 字符串
pub fn encode<P>(payload: &P) -> Result<String>
where
    P: Serialize + ?Sized,
{
    serde_json::to_string(payload).map_err(Error::Encode)
}

/// 将响应体解码为 `T`，失败时附带 URL 与响应体片段
pub fn decode<T>(url: &str, body: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(body).map_err(|source| Error::Decode {
        url: url.to_string(),
        source,
        body_snippet: snippet(&String::from_utf8_lossy(body), BODY_SNIPPET_LIMIT),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn encode_matches_serde_json() {
        let payload = json!({ "name": "Grace" });
        assert_eq!(encode(&payload).unwrap(), r#"{"name":"Grace"}"#);
    }

    #[test]
    fn decode_reports_url_and_snippet() {
        let err = decode::<Value>("/api/users", b"<html>oops</html>").unwrap_err();
        match err {
            Error::Decode { url, body_snippet, .. } => {
                assert_eq!(url, "/api/users");
                assert_eq!(body_snippet, "<html>oops</html>");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_body_is_a_decode_error() {
        assert!(matches!(decode::<Value>("/api/users/7", b""), Err(Error::Decode { .. })));
    }
}
