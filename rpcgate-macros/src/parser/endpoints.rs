use proc_macro2::TokenStream;
use syn::parse::Parser as _;
use syn::{FnArg, ItemTrait, LitStr, Pat, TraitItem, TraitItemFn};

use crate::http::method::Method;
use crate::util::{is_param_attr, is_route_attr, strip_param_attrs};

/// 接口级解析属性
pub struct EndpointsAttributes {
    pub base_url: Option<String>,
}

// 接口级宏上的属性解析器
pub struct EndpointsAttributeParser;

impl crate::parser::Parser<TokenStream> for EndpointsAttributeParser {
    type Output = EndpointsAttributes;

    fn parse(input: &TokenStream) -> syn::Result<Self::Output> {
        let mut base_url: Option<String> = None;

        let parser = syn::meta::parser(|meta| {
            if meta.path.is_ident("base_url") {
                let lit: LitStr = meta.value()?.parse()?;
                base_url = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error("unsupported attribute, expected `base_url = \"...\"`"))
            }
        });
        parser.parse2(input.clone())?;

        Ok(EndpointsAttributes { base_url })
    }
}

/// 参数标注类型
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    /// 替换路径中的 `${ident}`
    Path,
    /// 序列化为 JSON 请求体
    Json,
}

/// 参数标注元信息
#[derive(Clone)]
pub struct ParamMeta {
    pub ident: syn::Ident,
    pub kind: ParamKind,
}

/// 单个端点方法的元信息
#[derive(Clone)]
pub struct MethodMeta {
    // 已剥离参数注解的方法签名，直接用于生成 impl
    pub sig: syn::Signature,
    pub method: Method,
    pub path: LitStr,
    pub params: Vec<ParamMeta>,
}

pub struct MethodMetaParser;

impl crate::parser::Parser<ItemTrait> for MethodMetaParser {
    type Output = Vec<MethodMeta>;

    fn parse(input: &ItemTrait) -> syn::Result<Self::Output> {
        input
            .items
            .iter()
            .map(|item| match item {
                TraitItem::Fn(m) => parse_method(m),
                other => Err(syn::Error::new_spanned(
                    other,
                    "only endpoint methods are supported inside #[endpoints]",
                )),
            })
            .collect()
    }
}

fn parse_method(m: &TraitItemFn) -> syn::Result<MethodMeta> {
    let sig = &m.sig;

    if let Some(default) = &m.default {
        return Err(syn::Error::new_spanned(default, "endpoint methods must not have a default body"));
    }
    if sig.asyncness.is_none() {
        return Err(syn::Error::new_spanned(&sig.fn_token, "endpoint methods must be `async fn`"));
    }
    if sig.receiver().is_none() {
        return Err(syn::Error::new_spanned(&sig.ident, "endpoint methods must take `&self`"));
    }

    let mut route_attrs = m.attrs.iter().filter(|a| is_route_attr(a));
    let route_attr = route_attrs.next().ok_or_else(|| {
        syn::Error::new_spanned(
            &sig.ident,
            "missing HTTP method attribute, e.g. #[get(path = \"/users/${id}\")]",
        )
    })?;
    if let Some(extra) = route_attrs.next() {
        return Err(syn::Error::new_spanned(extra, "only one HTTP method attribute is allowed"));
    }

    let (method, path) = parse_route_attr(route_attr)?;
    let params = parse_params(sig)?;

    let mut sig = sig.clone();
    strip_param_attrs(&mut sig);

    Ok(MethodMeta { sig, method, path, params })
}

/// 解析 `#[get(path = "...")]`
fn parse_route_attr(attr: &syn::Attribute) -> syn::Result<(Method, LitStr)> {
    let name = attr
        .path()
        .get_ident()
        .map(|id| id.to_string())
        .unwrap_or_default();
    let method: Method = name
        .parse()
        .map_err(|e: String| syn::Error::new_spanned(attr.path(), e))?;

    let mut path: Option<LitStr> = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("path") {
            path = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported route attribute, expected `path = \"...\"`"))
        }
    })?;

    let path = path.ok_or_else(|| syn::Error::new_spanned(attr, "missing `path = \"...\"`"))?;
    Ok((method, path))
}

/// 解析参数标注属性
fn parse_params(sig: &syn::Signature) -> syn::Result<Vec<ParamMeta>> {
    let mut params = Vec::new();

    for input in &sig.inputs {
        let FnArg::Typed(pt) = input else {
            continue;
        };
        let ident = match &*pt.pat {
            Pat::Ident(pi) => pi.ident.clone(),
            other => {
                return Err(syn::Error::new_spanned(other, "unsupported parameter pattern"));
            }
        };

        let mut kinds = pt.attrs.iter().filter(|a| is_param_attr(a)).map(|a| {
            if a.path().is_ident("path") {
                ParamKind::Path
            } else {
                ParamKind::Json
            }
        });
        let kind = kinds.next().ok_or_else(|| {
            syn::Error::new_spanned(&pt.pat, "parameter must be annotated with #[path] or #[json]")
        })?;
        if kinds.next().is_some() {
            return Err(syn::Error::new_spanned(&pt.pat, "parameter can only have one of #[path] or #[json]"));
        }

        params.push(ParamMeta { ident, kind });
    }

    Ok(params)
}
