use std::str::FromStr;
use quote::quote;

/// HTTP 请求方法枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    GET,
    POST,
    PUT,
    OPTIONS,
    DELETE,
    PATCH,
}

impl Method {
    /// 方法级注解名，如 `#[get(...)]`
    ///
    /// 不支持 HEAD：成功的 HEAD 响应没有响应体，而分发器总是解码 JSON。
    pub const ATTRS: [&'static str; 6] = ["get", "post", "put", "options", "delete", "patch"];

    pub fn to_token(&self) -> proc_macro2::TokenStream {
        match self {
            Method::GET => quote! { ::rpcgate::reqwest::Method::GET },
            Method::POST => quote! { ::rpcgate::reqwest::Method::POST },
            Method::PUT => quote! { ::rpcgate::reqwest::Method::PUT },
            Method::OPTIONS => quote! { ::rpcgate::reqwest::Method::OPTIONS },
            Method::DELETE => quote! { ::rpcgate::reqwest::Method::DELETE },
            Method::PATCH => quote! { ::rpcgate::reqwest::Method::PATCH },
        }
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "OPTIONS" => Ok(Method::OPTIONS),
            "DELETE" => Ok(Method::DELETE),
            "PATCH" => Ok(Method::PATCH),
            _ => Err(format!("Unsupported HTTP method: {}", s)),
        }
    }
}
