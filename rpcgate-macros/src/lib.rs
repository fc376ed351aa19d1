use proc_macro::TokenStream;

mod http;
mod util;
mod expand;
mod parser;

/// trait 宏入口：`#[endpoints(...)]`
/// 只在入口使用 `proc_macro::TokenStream`，内部统一用 `proc_macro2::TokenStream`
///
/// ```ignore
/// #[allow(async_fn_in_trait)]
/// #[rpcgate::endpoints(base_url = "/api")]
/// pub trait Patients {
///     #[get(path = "/patients/${pk}/")]
///     async fn retrieve(&self, #[path] pk: String) -> rpcgate::Result<Patient>;
///
///     #[post(path = "/patients/")]
///     async fn create(&self, #[json] body: NewPatient) -> rpcgate::Result<Patient>;
/// }
/// ```
///
/// 生成 `PatientsClient<F>`，其方法通过 `Dispatcher::resolve_path` 与 `Dispatcher::send` 发起请求。
#[proc_macro_attribute]
pub fn endpoints(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = expand::MacroForm::Attribute { attr: attr.into(), item: item.into() };
    let call = expand::MacroCall::new(expand::MacroKind::Endpoints, input);
    expand::dispatch(call).into()
}
