use crate::{http::method::Method, parser::ParamKind, parser::ParamMeta, util::path_placeholders};
use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::LitStr;

/// 占位符名：`r#type` -> `type`
fn param_key(ident: &syn::Ident) -> String {
    ident.unraw().to_string()
}

#[derive(Clone)]
pub struct MethodCtx {
    pub sig_ident: syn::Ident,
    pub method: Method,
    pub path: LitStr,          // 含 ${name} 占位符的路径模板
    pub params: Vec<ParamMeta>, // 统一参数模型
}

pub struct MethodExpander {
    ctx: MethodCtx,
    body: TokenStream, // 方法体代码
}

impl MethodExpander {
    pub fn new(ctx: MethodCtx) -> Self {
        Self {
            ctx,
            body: TokenStream::new(),
        }
    }

    pub fn validate(self) -> syn::Result<Self> {
        let path = self.ctx.path.value();
        if path.is_empty() {
            return Err(syn::Error::new(
                self.ctx.sig_ident.span(),
                "The 'path' attribute cannot be empty.",
            ));
        }

        let mut json = self.ctx.params.iter().filter(|p| p.kind == ParamKind::Json);
        if let (Some(_), Some(extra)) = (json.next(), json.next()) {
            return Err(syn::Error::new(
                extra.ident.span(),
                "at most one #[json] parameter is allowed",
            ));
        }

        // #[path] 参数与 ${name} 占位符必须一一对应
        let placeholders = path_placeholders(&path);
        for (i, name) in placeholders.iter().enumerate() {
            // resolve_path 只替换第一次出现，重复的占位符会残留在路径里
            if placeholders[..i].contains(name) {
                return Err(syn::Error::new(
                    self.ctx.path.span(),
                    format!("placeholder `${{{}}}` appears more than once in path \"{}\"", name, path),
                ));
            }
        }
        for p in self.path_params() {
            let key = param_key(&p.ident);
            if !placeholders.contains(&key) {
                return Err(syn::Error::new(
                    p.ident.span(),
                    format!("`${{{}}}` does not appear in path \"{}\"", key, path),
                ));
            }
        }
        for name in &placeholders {
            if !self.path_params().any(|p| param_key(&p.ident) == *name) {
                return Err(syn::Error::new(
                    self.ctx.path.span(),
                    format!("placeholder `${{{}}}` has no matching #[path] parameter", name),
                ));
            }
        }

        Ok(self)
    }

    fn path_params(&self) -> impl Iterator<Item = &ParamMeta> {
        self.ctx.params.iter().filter(|p| p.kind == ParamKind::Path)
    }

    pub fn stage_resolve_path(mut self) -> Self {
        // 用 Path 参数替换 ${name}
        let path = &self.ctx.path;
        let pairs = self
            .path_params()
            .map(|p| {
                let ident = &p.ident;
                let key = LitStr::new(&param_key(&p.ident), p.ident.span());
                quote! { (#key, ::std::string::ToString::to_string(&#ident)) }
            })
            .collect::<Vec<_>>();

        let params = if pairs.is_empty() {
            quote! { ::std::iter::empty::<(&str, ::std::string::String)>() }
        } else {
            quote! { [ #(#pairs),* ] }
        };

        self.body.extend(quote! {
            let __path = self.dispatcher.resolve_path(#path, #params);
        });
        self
    }

    pub fn stage_send(mut self) -> Self {
        let method_tokens = self.ctx.method.to_token();
        let json = self.ctx.params.iter().find(|p| p.kind == ParamKind::Json);

        self.body.extend(match json {
            Some(p) => {
                let ident = &p.ident;
                quote! {
                    self.dispatcher
                        .send(#method_tokens, &__path, ::core::option::Option::Some(&#ident))
                        .await
                }
            }
            None => quote! {
                self.dispatcher.send_empty(#method_tokens, &__path).await
            },
        });
        self
    }

    pub fn finish(self) -> TokenStream {
        let body = self.body;
        quote! {{ #body }}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proc_macro2::Span;

    fn param(name: &str, kind: ParamKind) -> ParamMeta {
        ParamMeta { ident: syn::Ident::new(name, Span::call_site()), kind }
    }

    fn ctx(path: &str, params: Vec<ParamMeta>) -> MethodCtx {
        MethodCtx {
            sig_ident: syn::Ident::new("call", Span::call_site()),
            method: Method::POST,
            path: LitStr::new(path, Span::call_site()),
            params,
        }
    }

    #[test]
    fn rejects_empty_path() {
        assert!(MethodExpander::new(ctx("", vec![])).validate().is_err());
    }

    #[test]
    fn rejects_second_json_param() {
        let params = vec![param("a", ParamKind::Json), param("b", ParamKind::Json)];
        assert!(MethodExpander::new(ctx("/x", params)).validate().is_err());
    }

    #[test]
    fn rejects_path_param_missing_from_template() {
        let params = vec![param("id", ParamKind::Path)];
        let err = MethodExpander::new(ctx("/users/", params)).validate().err().unwrap();
        assert!(err.to_string().contains("does not appear in path"));
    }

    #[test]
    fn rejects_placeholder_without_param() {
        let err = MethodExpander::new(ctx("/users/${id}", vec![])).validate().err().unwrap();
        assert!(err.to_string().contains("has no matching #[path] parameter"));
    }

    #[test]
    fn rejects_duplicate_placeholder() {
        let params = vec![param("id", ParamKind::Path)];
        let err = MethodExpander::new(ctx("/a/${id}/b/${id}", params)).validate().err().unwrap();
        assert!(err.to_string().contains("appears more than once"));
    }

    #[test]
    fn raw_ident_matches_unprefixed_placeholder() {
        let params = vec![ParamMeta {
            ident: syn::Ident::new_raw("type", Span::call_site()),
            kind: ParamKind::Path,
        }];
        let body = MethodExpander::new(ctx("/kinds/${type}", params))
            .validate()
            .unwrap()
            .stage_resolve_path()
            .finish()
            .to_string();
        assert!(body.contains("(\"type\" , :: std :: string :: ToString :: to_string (& r#type))"));
    }

    #[test]
    fn body_resolves_path_then_sends_payload() {
        let params = vec![param("id", ParamKind::Path), param("body", ParamKind::Json)];
        let body = MethodExpander::new(ctx("/users/${id}", params))
            .validate()
            .unwrap()
            .stage_resolve_path()
            .stage_send()
            .finish()
            .to_string();

        let resolve = body.find("resolve_path").unwrap();
        let send = body.find(". send (").unwrap();
        assert!(resolve < send);
        assert!(body.contains("(\"id\" , :: std :: string :: ToString :: to_string (& id))"));
        assert!(body.contains("Some (& body)"));
    }
}
