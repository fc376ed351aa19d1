// 解析器

mod endpoints;

pub use endpoints::{EndpointsAttributeParser, MethodMetaParser, MethodMeta, ParamKind, ParamMeta};

/// 解析器 trait
pub trait Parser<I> {
    type Output;

    fn parse(input: &I) -> syn::Result<Self::Output>;
}
