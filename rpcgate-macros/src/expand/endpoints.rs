use super::{MacroCall, MacroForm};
use crate::{
    expand::method::{MethodCtx, MethodExpander},
    parser::{EndpointsAttributeParser, MethodMeta, MethodMetaParser, Parser},
    util::strip_custom_attrs_in_trait,
};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ItemTrait;

pub struct EndpointsExpander;

impl super::Expander for EndpointsExpander {
    fn expand(&self, call: MacroCall) -> syn::Result<TokenStream> {
        let MacroForm::Attribute { attr, item } = call.form;

        // 解析宏属性
        let attributes = EndpointsAttributeParser::parse(&attr)?;

        let mut trait_item: ItemTrait = syn::parse2(item)?;
        if !trait_item.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &trait_item.generics,
                "#[endpoints] does not support generic traits",
            ));
        }

        // 收集方法元信息（剥离前）
        let methods = MethodMetaParser::parse(&trait_item)?;

        // 剥离自定义注解 避免“未知属性”错误
        strip_custom_attrs_in_trait(&mut trait_item);

        let method_impls = methods
            .iter()
            .map(expand_method_impl)
            .collect::<syn::Result<Vec<_>>>()?;

        let vis = &trait_item.vis;
        let trait_ident = &trait_item.ident;
        let client_ident = format_ident!("{}Client", trait_ident);
        let client_doc = format!("由 `#[endpoints]` 为 [`{}`] 生成的客户端", trait_ident);

        // 未指定 base_url 时使用运行时默认值
        let base_url = match &attributes.base_url {
            Some(base_url) => quote! { #base_url },
            None => quote! { ::rpcgate::DEFAULT_BASE_URL },
        };

        Ok(quote! {
            #trait_item

            #[doc = #client_doc]
            #vis struct #client_ident<F> {
                pub dispatcher: ::rpcgate::Dispatcher<F>,
            }

            impl<F> #client_ident<F> {
                pub fn new(dispatcher: ::rpcgate::Dispatcher<F>) -> Self {
                    Self { dispatcher }
                }

                pub fn from_fetch(fetch: F) -> Self {
                    Self { dispatcher: ::rpcgate::Dispatcher::with_base_url(fetch, #base_url) }
                }
            }

            impl<F: ::rpcgate::Fetch> #trait_ident for #client_ident<F> {
                #(#method_impls)*
            }
        })
    }
}

fn expand_method_impl(meta: &MethodMeta) -> syn::Result<TokenStream> {
    let ctx = MethodCtx {
        sig_ident: meta.sig.ident.clone(),
        method: meta.method,
        path: meta.path.clone(),
        params: meta.params.clone(),
    };

    let body = MethodExpander::new(ctx)
        .validate()?
        .stage_resolve_path()
        .stage_send()
        .finish();

    let sig = &meta.sig;
    Ok(quote! {
        #sig #body
    })
}
