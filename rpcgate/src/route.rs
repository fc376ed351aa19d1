//! 服务端正则路由 -> 路径模板
//!
//! 服务端路由形如 `^patients/(?P<patient_id>[^/.]+)/visits/$`，
//! 每个命名分组转换为一个 `${name}` 占位符，其余正则语法保持不动。

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use reqwest::Method;

use crate::error::{Error, Result};
use crate::path::marker;

fn named_group() -> &'static Regex {
    static NAMED_GROUP: OnceLock<Regex> = OnceLock::new();
    NAMED_GROUP.get_or_init(|| {
        // 分组体内不允许出现 `)`
        Regex::new(r"\(\?P<(\w+)>[^)]+\)").expect("named group pattern is valid")
    })
}

/// 提取路由中的命名参数，返回 `(参数名列表, 路径模板)`
pub fn extract_url_params(route: &str) -> (Vec<String>, String) {
    let re = named_group();
    let params = re
        .captures_iter(route)
        .map(|caps| caps[1].to_string())
        .collect();
    let template = re
        .replace_all(route, |caps: &Captures| marker(&caps[1]))
        .into_owned();
    (params, template)
}

/// 由视图类名得到端点名：去掉 `ViewSet` / `View` 后缀，首字母小写
pub fn endpoint_name(view_name: &str) -> String {
    let stem = view_name
        .strip_suffix("ViewSet")
        .or_else(|| view_name.strip_suffix("View"))
        .unwrap_or(view_name);
    let mut chars = stem.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// APIView 默认的 `http_method_names`
pub const DEFAULT_HTTP_METHOD_NAMES: [&str; 8] =
    ["get", "post", "put", "patch", "delete", "head", "options", "trace"];

/// APIView 暴露的方法：名称转小写后去掉 `options` 与 `head`
///
/// `head` 的成功响应没有响应体，无法走 JSON 分发，所以一并排除。
pub fn api_view_methods<S: AsRef<str>>(http_method_names: &[S]) -> Result<Vec<Method>> {
    http_method_names
        .iter()
        .map(|name| name.as_ref().to_lowercase())
        .filter(|name| name != "options" && name != "head")
        .map(|name| {
            Method::from_bytes(name.to_uppercase().as_bytes())
                .map_err(|e| Error::InvalidArgument(format!("Invalid HTTP method name `{}`: {}", name, e)))
        })
        .collect()
}

/// 资源动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    List,
    Create,
    Retrieve,
    Update,
    PartialUpdate,
    Destroy,
}

impl Action {
    /// ViewSet 暴露的全部标准动作
    pub const VIEWSET: [Action; 6] = [
        Action::List,
        Action::Create,
        Action::Retrieve,
        Action::Update,
        Action::PartialUpdate,
        Action::Destroy,
    ];

    pub fn verb(&self) -> Method {
        match self {
            Action::List | Action::Retrieve => Method::GET,
            Action::Create => Method::POST,
            Action::Update => Method::PUT,
            Action::PartialUpdate => Method::PATCH,
            Action::Destroy => Method::DELETE,
        }
    }

    /// 只读动作（list / retrieve），其余为变更
    pub fn is_query(&self) -> bool {
        matches!(self, Action::List | Action::Retrieve)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::List => "list",
            Action::Create => "create",
            Action::Retrieve => "retrieve",
            Action::Update => "update",
            Action::PartialUpdate => "partial_update",
            Action::Destroy => "destroy",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::VIEWSET
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| Error::InvalidArgument(format!("Unsupported action: {}", s)))
    }
}
