mod endpoints;
mod method;

/// 宏输入类型枚举
pub enum MacroForm {
    /// #[proc_macro_attribute]
    ///
    /// #[endpoints(base_url = "...")]
    Attribute {
        attr: proc_macro2::TokenStream,
        item: proc_macro2::TokenStream,
    },
}

/// 具体使用的宏枚举
pub enum MacroKind {
    Endpoints,
}

/// 宏调用信息结构体
pub struct MacroCall {
    pub kind: MacroKind,
    pub form: MacroForm,
}

impl MacroCall {
    pub fn new(kind: MacroKind, form: MacroForm) -> Self {
        Self { kind, form }
    }
}

/// 展开器 trait
pub trait Expander {
    fn expand(&self, call: MacroCall) -> syn::Result<proc_macro2::TokenStream>;
}

/// dispatch 宏展开
pub fn dispatch(call: MacroCall) -> proc_macro2::TokenStream {
    let expander: Box<dyn Expander> = match call.kind {
        MacroKind::Endpoints => Box::new(endpoints::EndpointsExpander {}),
    };
    expander.expand(call).unwrap_or_else(|e| e.to_compile_error())
}
