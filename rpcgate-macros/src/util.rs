use syn::{FnArg, ItemTrait, TraitItem};

use crate::http::method::Method;

/// 参数级注解名
pub const PARAM_ATTRS: [&str; 2] = ["path", "json"];

pub fn is_route_attr(attr: &syn::Attribute) -> bool {
    attr.path()
        .get_ident()
        .is_some_and(|id| Method::ATTRS.iter().any(|name| id == name))
}

pub fn is_param_attr(attr: &syn::Attribute) -> bool {
    attr.path()
        .get_ident()
        .is_some_and(|id| PARAM_ATTRS.iter().any(|name| id == name))
}

/// 剥离自定义注解 避免“未知属性”错误
pub fn strip_custom_attrs_in_trait(trait_item: &mut ItemTrait) {
    for item in &mut trait_item.items {
        if let TraitItem::Fn(m) = item {
            // 方法级：去掉 get/post/put/...
            m.attrs.retain(|a| !is_route_attr(a));
            strip_param_attrs(&mut m.sig);
        }
    }
}

/// 参数级：去掉 path/json
pub fn strip_param_attrs(sig: &mut syn::Signature) {
    for input in &mut sig.inputs {
        if let FnArg::Typed(pt) = input {
            pt.attrs.retain(|a| !is_param_attr(a));
        }
    }
}

/// 路径模板中的 `${name}` 占位符，按出现顺序
pub fn path_placeholders(path: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = path;
    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            break;
        };
        names.push(after[..end].to_string());
        rest = &after[end + 1..];
    }
    names
}
