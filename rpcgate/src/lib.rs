//! 基于端点路径模板的 RPC 客户端。
//!
//! - [`Dispatcher`]：一次请求 -> 一次 [`Fetch`] 调用 -> JSON 解码
//! - [`resolve_path`]：用参数填充 `${name}` 占位符
//! - [`endpoints`]：为 trait 上的每个端点生成调用 `resolve_path` + `send` 的方法
//!
//! ```ignore
//! #[allow(async_fn_in_trait)]
//! #[rpcgate::endpoints(base_url = "/api")]
//! pub trait Users {
//!     #[get(path = "/users/${id}")]
//!     async fn retrieve(&self, #[path] id: u64) -> rpcgate::Result<serde_json::Value>;
//! }
//!
//! let users = UsersClient::from_fetch(rpcgate::HttpClient::with_origin("http://localhost:8000")?);
//! let user = users.retrieve(7).await?;
//! ```

pub mod client;
pub mod codec;
pub mod dispatcher;
pub mod error;
pub mod fetch;
pub mod path;
pub mod route;
pub mod view;

pub use client::{HttpClient, HttpClientOption, HttpClientOptionBuilder};
pub use dispatcher::{Dispatcher, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use fetch::{Fetch, FetchResponse, RequestOptions, StaticResponse};
pub use path::{placeholders, resolve_path, try_resolve_path};
pub use route::{api_view_methods, endpoint_name, extract_url_params, Action, DEFAULT_HTTP_METHOD_NAMES};
pub use view::{Operation, ViewRoute};

pub use rpcgate_macros::endpoints;

// 生成代码通过 ::rpcgate::reqwest 访问 HTTP 类型
pub use reqwest;
pub use url;
